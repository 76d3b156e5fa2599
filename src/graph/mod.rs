//! Graph rendering of a machine's action table.
//!
//! States and actions become nodes, numbered in first-discovery order
//! starting with the initial state as node `1`. Node `0` is reserved for
//! the root marker that points at the initial state.
//!
//! For every registration and every pair of source and target state the
//! graph carries an arrowless edge from the source state to the action and a
//! directed edge from the action to the target state. The DOT text printed
//! from the graph is byte-for-byte reproducible for a given registration
//! order.

mod dot;

use crate::core::{Action, State};
use crate::machine::Machine;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Identifier of the root marker node.
pub const ROOT_NODE: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Drawn as a box
    State,
    /// Drawn as an oval
    Action,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    pub id: usize,
    pub kind: NodeKind,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Source state to action, drawn without an arrowhead
    Source,
    /// Action to target state
    Target,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
    pub kind: EdgeKind,
}

/// Nodes and edges of a rendered machine, in output order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn node(&self, id: usize) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Find a node by kind and label.
    pub fn find(&self, kind: NodeKind, label: &str) -> Option<&GraphNode> {
        self.nodes
            .iter()
            .find(|n| n.kind == kind && n.label == label)
    }
}

/// Assigns ids in first-discovery order from a shared counter.
struct Numbering<'a, T: Eq + Hash> {
    ids: HashMap<&'a T, usize>,
}

impl<'a, T: Eq + Hash> Numbering<'a, T> {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
        }
    }

    /// Return the id of `value`, allocating the next one if it is new.
    fn id(&mut self, value: &'a T, next: &mut usize, on_new: impl FnOnce(usize)) -> usize {
        if let Some(&id) = self.ids.get(value) {
            return id;
        }
        let id = *next;
        *next += 1;
        self.ids.insert(value, id);
        on_new(id);
        id
    }
}

/// Renders a machine's action table. Holds no state of its own.
pub struct GraphRenderer;

impl GraphRenderer {
    /// Build the structural graph of `machine`.
    pub fn graph<S: State, A: Action>(machine: &Machine<S, A>) -> Graph {
        let registrations = machine.registrations();
        let initial = machine.initial_state();

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut seen_edges = HashSet::new();
        let mut next = ROOT_NODE + 1;
        let mut states: Numbering<'_, S> = Numbering::new();
        let mut actions: Numbering<'_, A> = Numbering::new();

        let state_node = |state: &S, id: usize| GraphNode {
            id,
            kind: NodeKind::State,
            label: state.name().to_string(),
        };

        states.id(initial, &mut next, |id| nodes.push(state_node(initial, id)));

        for registration in &registrations {
            let action = registration.action();

            let from: Vec<usize> = registration
                .from_states()
                .iter()
                .map(|s| states.id(s, &mut next, |id| nodes.push(state_node(s, id))))
                .collect();
            let action_id = actions.id(action, &mut next, |id| {
                nodes.push(GraphNode {
                    id,
                    kind: NodeKind::Action,
                    label: action.name().to_string(),
                })
            });
            let to: Vec<usize> = registration
                .to_states()
                .iter()
                .map(|s| states.id(s, &mut next, |id| nodes.push(state_node(s, id))))
                .collect();

            for &source in &from {
                for &target in &to {
                    for edge in [
                        GraphEdge {
                            from: source,
                            to: action_id,
                            kind: EdgeKind::Source,
                        },
                        GraphEdge {
                            from: action_id,
                            to: target,
                            kind: EdgeKind::Target,
                        },
                    ] {
                        if seen_edges.insert(edge) {
                            edges.push(edge);
                        }
                    }
                }
            }
        }

        Graph { nodes, edges }
    }

    /// Render `machine` as DOT text.
    pub fn render<S: State, A: Action>(machine: &Machine<S, A>) -> String {
        Self::graph(machine).to_dot()
    }
}
