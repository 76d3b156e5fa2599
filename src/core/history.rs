//! Bounded state history.
//!
//! Tracks the most recent states a machine has been in, evicting the oldest
//! entry once the bound is reached.

use std::collections::VecDeque;

/// Ordered, bounded history of states.
///
/// A bound of `0` disables recording entirely. With a positive bound `N` the
/// history keeps at most the `N` most recent states, oldest first.
///
/// # Example
///
/// ```rust
/// use switchyard::core::StateHistory;
///
/// let mut history = StateHistory::new(2);
/// history.record("Empty");
/// history.record("Loading");
/// history.record("Complete");
///
/// assert_eq!(history.path(), vec![&"Loading", &"Complete"]);
/// assert_eq!(history.last(), Some(&"Complete"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StateHistory<S> {
    states: VecDeque<S>,
    max_len: usize,
}

impl<S> StateHistory<S> {
    /// Create an empty history holding at most `max_len` states.
    pub fn new(max_len: usize) -> Self {
        Self {
            states: VecDeque::with_capacity(max_len.min(64)),
            max_len,
        }
    }

    /// Record a state, evicting the oldest entries if the bound is exceeded.
    ///
    /// Does nothing when the history is disabled.
    pub fn record(&mut self, state: S) {
        if self.max_len == 0 {
            return;
        }
        while self.states.len() >= self.max_len {
            self.states.pop_front();
        }
        self.states.push_back(state);
    }

    /// Get the path of states, oldest first.
    pub fn path(&self) -> Vec<&S> {
        self.states.iter().collect()
    }

    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, S> {
        self.states.iter()
    }

    /// Most recently recorded state.
    pub fn last(&self) -> Option<&S> {
        self.states.back()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Whether states are recorded at all.
    pub fn is_enabled(&self) -> bool {
        self.max_len > 0
    }
}

impl<S: Clone> StateHistory<S> {
    /// Owned copy of the recorded states, oldest first.
    pub fn to_vec(&self) -> Vec<S> {
        self.states.iter().cloned().collect()
    }
}
