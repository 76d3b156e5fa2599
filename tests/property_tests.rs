//! Property-based tests for the transition engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated action sequences.

use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use switchyard::core::StateHistory;
use switchyard::graph::GraphRenderer;
use switchyard::machine::Machine;
use switchyard::{action_enum, state_enum};

state_enum! {
    enum LoadState {
        Empty,
        Loading,
        Complete,
        Failed,
    }
    final: [Complete]
}

action_enum! {
    enum LoadAction {
        Load,
        FinishLoading,
        Fail,
        Unknown,
    }
}

prop_compose! {
    fn arbitrary_state()(variant in 0..4u8) -> LoadState {
        match variant {
            0 => LoadState::Empty,
            1 => LoadState::Loading,
            2 => LoadState::Complete,
            _ => LoadState::Failed,
        }
    }
}

prop_compose! {
    fn arbitrary_action()(variant in 0..4u8) -> LoadAction {
        match variant {
            0 => LoadAction::Load,
            1 => LoadAction::FinishLoading,
            2 => LoadAction::Fail,
            _ => LoadAction::Unknown,
        }
    }
}

/// Loading machine whose `FinishLoading` handler alternates between
/// success and failure, and whose `Fail` handler sometimes returns an
/// undeclared state.
fn loading_machine(bound: usize) -> Machine<LoadState, LoadAction> {
    let machine = Machine::new(LoadState::Empty, bound);
    machine
        .register_action(
            LoadAction::Load,
            [LoadState::Empty, LoadState::Failed],
            [LoadState::Loading],
            |_| LoadState::Loading,
        )
        .unwrap();
    let finishes = Cell::new(0u32);
    machine
        .register_action(
            LoadAction::FinishLoading,
            [LoadState::Loading],
            [LoadState::Complete, LoadState::Failed],
            move |_| {
                finishes.set(finishes.get() + 1);
                if finishes.get() % 2 == 0 {
                    LoadState::Complete
                } else {
                    LoadState::Failed
                }
            },
        )
        .unwrap();
    machine
        .register_action(
            LoadAction::Fail,
            [LoadState::Loading, LoadState::Complete],
            [LoadState::Failed],
            |m| {
                if m.current_state() == LoadState::Complete {
                    LoadState::Empty
                } else {
                    LoadState::Failed
                }
            },
        )
        .unwrap();
    machine
}

proptest! {
    #[test]
    fn history_length_tracks_successes(
        bound in 0..6usize,
        actions in prop::collection::vec(arbitrary_action(), 0..30)
    ) {
        let machine = loading_machine(bound);
        let mut successes = 0usize;

        for action in &actions {
            if machine.perform_action(action).is_some() {
                successes += 1;
            }
        }

        let history = machine.history();
        prop_assert_eq!(history.len(), (successes + 1).min(bound));
        if bound > 0 {
            let current = machine.current_state();
            prop_assert_eq!(history.last(), Some(&current));
        }
    }

    #[test]
    fn failed_actions_change_nothing(
        actions in prop::collection::vec(arbitrary_action(), 0..30)
    ) {
        let machine = loading_machine(4);

        for action in &actions {
            let before_state = machine.current_state();
            let before_history = machine.history();

            if machine.try_perform_action(action).is_err() {
                prop_assert_eq!(machine.current_state(), before_state);
                prop_assert_eq!(machine.history(), before_history);
            }
        }
    }

    #[test]
    fn listeners_fire_once_per_success(
        actions in prop::collection::vec(arbitrary_action(), 0..30)
    ) {
        let machine = loading_machine(2);
        let fired = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&fired);
        machine.on_any_change(move |_, _| counter.set(counter.get() + 1));

        let successes = actions
            .iter()
            .filter(|a| machine.perform_action(a).is_some())
            .count();

        prop_assert_eq!(fired.get(), successes);
    }

    #[test]
    fn successful_results_are_declared_targets(
        actions in prop::collection::vec(arbitrary_action(), 0..30)
    ) {
        let machine = loading_machine(3);

        for action in &actions {
            let from = machine.current_state();
            let allowed = machine.can_perform(action);
            match machine.perform_action(action) {
                Some(to) => {
                    prop_assert!(allowed);
                    let registration = machine
                        .registrations()
                        .into_iter()
                        .find(|r| r.action() == action)
                        .unwrap();
                    prop_assert!(registration.can_start_from(&from));
                    prop_assert!(registration.allows_target(&to));
                }
                None => {
                    prop_assert_eq!(machine.current_state(), from);
                }
            }
        }
    }

    #[test]
    fn history_never_exceeds_bound(
        bound in 0..5usize,
        states in prop::collection::vec(arbitrary_state(), 0..20)
    ) {
        let mut history = StateHistory::new(bound);
        for state in &states {
            history.record(*state);
        }

        prop_assert!(history.len() <= bound);
        prop_assert_eq!(history.len(), states.len().min(bound));
        if bound > 0 {
            prop_assert_eq!(history.last(), states.last());
        }
    }

    #[test]
    fn rendering_is_deterministic(
        actions in prop::collection::vec(arbitrary_action(), 0..10)
    ) {
        let machine = loading_machine(3);
        let before = GraphRenderer::render(&machine);

        for action in &actions {
            machine.perform_action(action);
        }

        prop_assert_eq!(GraphRenderer::render(&machine), before);
    }
}
