//! Graph rendering tests against the loading machine.

use std::collections::HashSet;
use switchyard::graph::{GraphRenderer, NodeKind};
use switchyard::machine::Machine;
use switchyard::{action_enum, state_enum};

state_enum! {
    enum LoadState {
        Empty,
        Loading,
        Complete,
        Failed,
    }
}

action_enum! {
    enum LoadAction {
        Load,
        FinishLoading,
    }
}

fn register_load(machine: &Machine<LoadState, LoadAction>) {
    machine
        .register_action(
            LoadAction::Load,
            [LoadState::Empty, LoadState::Failed],
            [LoadState::Loading],
            |_| LoadState::Loading,
        )
        .unwrap();
}

fn register_finish(machine: &Machine<LoadState, LoadAction>) {
    machine
        .register_action(
            LoadAction::FinishLoading,
            [LoadState::Loading],
            [LoadState::Complete, LoadState::Failed],
            |_| LoadState::Complete,
        )
        .unwrap();
}

#[test]
fn renders_loading_machine_exactly() {
    let machine = Machine::new(LoadState::Empty, 3);
    register_load(&machine);
    register_finish(&machine);

    let expected = "\
digraph {
  graph [rankdir=TB]

  0 [label=\"\", shape=plaintext]
  0 -> 1

  // nodes
  1 [label=\"Empty\", shape=box]
  2 [label=\"Failed\", shape=box]
  3 [label=\"Load\", shape=oval]
  4 [label=\"Loading\", shape=box]
  5 [label=\"FinishLoading\", shape=oval]
  6 [label=\"Complete\", shape=box]

  // links
  1 -> 3 [arrowhead=none]
  3 -> 4
  2 -> 3 [arrowhead=none]
  4 -> 5 [arrowhead=none]
  5 -> 6
  5 -> 2
}
";

    assert_eq!(GraphRenderer::render(&machine), expected);
}

#[test]
fn repeated_rendering_is_identical() {
    let machine = Machine::new(LoadState::Empty, 3);
    register_load(&machine);
    register_finish(&machine);

    let first = GraphRenderer::render(&machine);
    let second = GraphRenderer::render(&machine);

    assert_eq!(first, second);
}

#[test]
fn registration_order_only_changes_numbering() {
    let forward = Machine::new(LoadState::Empty, 3);
    register_load(&forward);
    register_finish(&forward);

    let reverse = Machine::new(LoadState::Empty, 3);
    register_finish(&reverse);
    register_load(&reverse);

    let a = GraphRenderer::graph(&forward);
    let b = GraphRenderer::graph(&reverse);

    let labels = |g: &switchyard::graph::Graph| -> HashSet<(NodeKind, String)> {
        g.nodes
            .iter()
            .map(|n| (n.kind, n.label.clone()))
            .collect()
    };
    let named_edges = |g: &switchyard::graph::Graph| -> HashSet<(String, String)> {
        g.edges
            .iter()
            .map(|e| {
                let from = g.node(e.from).map(|n| n.label.clone()).unwrap_or_default();
                let to = g.node(e.to).map(|n| n.label.clone()).unwrap_or_default();
                (from, to)
            })
            .collect()
    };

    assert_eq!(labels(&a), labels(&b));
    assert_eq!(named_edges(&a), named_edges(&b));
    assert_eq!(a.nodes[0].label, "Empty");
    assert_eq!(b.nodes[0].label, "Empty");
    assert_ne!(a.to_dot(), b.to_dot());
    assert_eq!(
        b.find(NodeKind::Action, "FinishLoading").map(|n| n.id),
        Some(3)
    );
}

#[test]
fn reregistration_keeps_numbering_position() {
    let machine = Machine::new(LoadState::Empty, 3);
    register_load(&machine);
    register_finish(&machine);
    let before = GraphRenderer::render(&machine);

    register_load(&machine);

    assert_eq!(GraphRenderer::render(&machine), before);
}

#[test]
fn labels_with_quotes_are_escaped() {
    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    struct Quoted(&'static str);

    impl switchyard::core::State for Quoted {
        fn name(&self) -> &str {
            self.0
        }
    }

    impl switchyard::core::Action for Quoted {
        fn name(&self) -> &str {
            self.0
        }
    }

    let machine: Machine<Quoted, Quoted> = Machine::new(Quoted("say \"hi\""), 1);

    let dot = GraphRenderer::render(&machine);

    assert!(dot.contains("1 [label=\"say \\\"hi\\\"\", shape=box]"));
}
