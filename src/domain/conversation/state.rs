//! Session state machine.
//!
//! Defines the lifecycle states of a survey conversation and valid transitions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle state of a survey conversation.
///
/// Sessions move through these states from creation to completion:
/// - `Initial`: greeting sent, waiting for the respondent to agree to participate
/// - `Asking`: walking through the question list
/// - `Complete`: all questions asked; conversation stays live for extra feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Opening greeting delivered, participation not yet affirmed.
    ///
    /// A session that never affirms stays here indefinitely; the respondent
    /// may retry affirmation on any later turn.
    #[default]
    Initial,

    /// Actively asking questions from the snapshot.
    Asking,

    /// Question flow finished. Terminal for questions, but the conversation
    /// remains live for additional free-form feedback.
    Complete,
}

impl SessionState {
    /// Returns true if the question flow is still open.
    pub fn is_asking(&self) -> bool {
        matches!(self, Self::Asking)
    }

    /// Returns true if the question flow has finished.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl StateMachine for SessionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionState::*;
        matches!(
            (self, target),
            // Respondent affirms participation
            (Initial, Asking) |
            // Last question answered
            (Asking, Complete)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionState::*;
        match self {
            Initial => vec![Asking],
            Asking => vec![Complete],
            Complete => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_initial() {
        assert_eq!(SessionState::default(), SessionState::Initial);
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&SessionState::Asking).unwrap();
        assert_eq!(json, "\"asking\"");
    }

    #[test]
    fn initial_transitions_only_to_asking() {
        let state = SessionState::Initial;
        assert!(state.can_transition_to(&SessionState::Asking));
        assert!(!state.can_transition_to(&SessionState::Complete));
    }

    #[test]
    fn asking_transitions_only_to_complete() {
        let state = SessionState::Asking;
        assert!(state.can_transition_to(&SessionState::Complete));
        assert!(!state.can_transition_to(&SessionState::Initial));
    }

    #[test]
    fn complete_is_terminal() {
        let state = SessionState::Complete;
        assert!(state.valid_transitions().is_empty());
        assert!(state.is_terminal());
        assert!(!state.can_transition_to(&SessionState::Initial));
        assert!(!state.can_transition_to(&SessionState::Asking));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = SessionState::Initial.transition_to(SessionState::Complete);
        assert!(result.is_err());
    }
}
