//! Advancement policy.
//!
//! Decides when discussion of the current question is done and the next
//! question should be asked. Kept behind a trait so the signal detection can
//! be swapped without touching the orchestrator.

/// Policy deciding whether to advance to the next survey question.
pub trait AdvancementPolicy: Send + Sync {
    /// Returns true if the conversation should move to the next question,
    /// given the model's latest reply and the number of respondent turns
    /// spent on the current question.
    fn should_advance(&self, reply: &str, respondent_turns: u32) -> bool;
}

/// Default cap on respondent turns per question.
///
/// The cap is a liveness bound: even if the model never emits a transition
/// phrase, the conversation still makes forward progress.
pub const DEFAULT_TURN_CAP: u32 = 3;

/// Advances on a transition phrase in the model reply, or when the turn cap
/// for the current question is exceeded.
#[derive(Debug, Clone)]
pub struct TransitionSignalPolicy {
    /// Case-insensitive phrases that signal the model wants to move on.
    pub transition_phrases: Vec<String>,
    /// Maximum respondent turns on one question before forcing advancement.
    pub turn_cap: u32,
}

impl Default for TransitionSignalPolicy {
    fn default() -> Self {
        Self {
            transition_phrases: vec![
                "next question".to_string(),
                "moving on".to_string(),
                "let's move on".to_string(),
            ],
            turn_cap: DEFAULT_TURN_CAP,
        }
    }
}

impl TransitionSignalPolicy {
    /// Creates a policy with a custom turn cap.
    pub fn with_turn_cap(mut self, cap: u32) -> Self {
        self.turn_cap = cap;
        self
    }

    fn contains_transition_phrase(&self, reply: &str) -> bool {
        let lower = reply.to_lowercase();
        self.transition_phrases
            .iter()
            .any(|phrase| lower.contains(&phrase.to_lowercase()))
    }
}

impl AdvancementPolicy for TransitionSignalPolicy {
    fn should_advance(&self, reply: &str, respondent_turns: u32) -> bool {
        self.contains_transition_phrase(reply) || respondent_turns > self.turn_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_on_transition_phrase() {
        let policy = TransitionSignalPolicy::default();
        assert!(policy.should_advance("Great, on to the next question!", 1));
        assert!(policy.should_advance("Thanks. Moving on.", 1));
        assert!(policy.should_advance("Let's move on to something else.", 1));
    }

    #[test]
    fn phrase_match_is_case_insensitive() {
        let policy = TransitionSignalPolicy::default();
        assert!(policy.should_advance("NEXT QUESTION coming up", 1));
    }

    #[test]
    fn continues_without_phrase_under_cap() {
        let policy = TransitionSignalPolicy::default();
        assert!(!policy.should_advance("Tell me more about that.", 1));
        assert!(!policy.should_advance("Interesting, why do you think so?", 3));
    }

    #[test]
    fn advances_when_turn_cap_exceeded() {
        let policy = TransitionSignalPolicy::default();
        assert!(policy.should_advance("Tell me more about that.", 4));
    }

    #[test]
    fn custom_turn_cap_is_honored() {
        let policy = TransitionSignalPolicy::default().with_turn_cap(1);
        assert!(!policy.should_advance("Go on.", 1));
        assert!(policy.should_advance("Go on.", 2));
    }
}
