//! User-interaction abstraction.
//!
//! Destructive flows (removals, deletions, the mass send itself) ask the
//! user before acting. Modeling the question/answer exchange as a trait
//! lets the session stay front-end agnostic and lets tests substitute a
//! scripted responder.

use std::collections::VecDeque;

/// A source of confirmations and line inputs.
pub trait Interact {
    /// Asks a yes/no question; `false` means the user declined.
    fn confirm(&mut self, question: &str) -> bool;

    /// Asks for a line of input; `None` means the user cancelled.
    fn input(&mut self, label: &str) -> Option<String>;
}

/// Test double with queued responses, consumed in order.
///
/// An exhausted queue declines or cancels, so a test that scripts too
/// few answers fails the flow instead of hanging.
#[derive(Debug, Default)]
pub struct Scripted {
    confirms: VecDeque<bool>,
    inputs: VecDeque<Option<String>>,
}

impl Scripted {
    /// Creates an empty script (declines and cancels everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an answer for the next `confirm` call.
    #[must_use]
    pub fn confirming(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    /// Queues a value for the next `input` call.
    #[must_use]
    pub fn entering(mut self, value: impl Into<String>) -> Self {
        self.inputs.push_back(Some(value.into()));
        self
    }

    /// Queues a cancellation for the next `input` call.
    #[must_use]
    pub fn cancelling(mut self) -> Self {
        self.inputs.push_back(None);
        self
    }
}

impl Interact for Scripted {
    fn confirm(&mut self, _question: &str) -> bool {
        self.confirms.pop_front().unwrap_or(false)
    }

    fn input(&mut self, _label: &str) -> Option<String> {
        self.inputs.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_answers_in_order() {
        let mut script = Scripted::new()
            .confirming(true)
            .confirming(false)
            .entering("a@b.com")
            .cancelling();

        assert!(script.confirm("first?"));
        assert!(!script.confirm("second?"));
        assert_eq!(script.input("email"), Some("a@b.com".to_owned()));
        assert_eq!(script.input("name"), None);
    }

    #[test]
    fn exhausted_script_declines() {
        let mut script = Scripted::new();
        assert!(!script.confirm("anything?"));
        assert_eq!(script.input("anything"), None);
    }
}
