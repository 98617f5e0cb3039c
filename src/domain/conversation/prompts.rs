//! Canned prompt and reply text for the survey assistant.
//!
//! All fixed strings the orchestrator and the resilient model client emit
//! live here, so the wording can be reviewed in one place.

/// Persona instruction sent with every completion request.
pub const PERSONA: &str = "You are a friendly and engaging survey assistant. Your goal is to \
have a natural conversation while gathering feedback. Ask follow-up questions when \
appropriate, show genuine interest in the responses, and maintain a conversational tone. \
Keep responses concise but engaging. When the conversation naturally concludes, ask if the \
respondent has any additional feedback or questions about the survey topic.";

/// System instruction while a question is under discussion.
pub const DISCUSS_TOPIC: &str = "Discuss the current survey question with the respondent. \
If the topic feels exhausted, transition naturally toward the next question.";

/// System instruction for the first reply after the question flow completes.
pub const WRAP_UP_FIRST: &str = "Respond naturally to the respondent's feedback. If the \
conversation seems to be concluding naturally, ask if they have any additional feedback or \
questions about the survey topic. Otherwise, continue the conversation naturally.";

/// System instruction for later replies in the complete state.
pub const WRAP_UP_REPEAT: &str = "Respond naturally to the respondent's feedback. If they \
haven't provided any additional feedback yet, ask again if they have any other thoughts or \
questions about the survey topic.";

/// Fixed acknowledgement when the respondent declines to participate.
pub const DECLINE_ACK: &str = "I understand. Let me know if you change your mind and would \
like to participate in the survey.";

/// Fallback reply when the provider is unreachable and the respondent spoke last.
pub const FALLBACK_AFTER_RESPONDENT: &str =
    "Thank you for sharing that. Let's move on to the next question.";

/// Fallback reply when the provider is unreachable and the assistant spoke last.
pub const FALLBACK_NEUTRAL: &str = "I understand. Please continue with your thoughts.";

/// Affirmation vocabulary for the initial participation check.
pub const AFFIRMATIONS: &[&str] = &["yes", "sure", "ok", "alright"];

/// Returns true if the message affirms participation.
///
/// Case-insensitive substring match against the fixed affirmation vocabulary.
pub fn is_affirmation(message: &str) -> bool {
    let lower = message.to_lowercase();
    AFFIRMATIONS.iter().any(|word| lower.contains(word))
}
