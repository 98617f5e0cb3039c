//! Conversation session entity.
//!
//! The only mutable entity in the core. One session exists per
//! (survey, respondent) pair and lives for the process lifetime.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, QuestionId, RespondentId, StateMachine, SurveyId, ValidationError,
};
use crate::domain::survey::Question;

use super::message::Message;
use super::state::SessionState;

/// Key identifying a session: one active conversation per survey/respondent pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub survey_id: SurveyId,
    pub respondent_id: RespondentId,
}

impl SessionKey {
    /// Creates a new session key.
    pub fn new(survey_id: SurveyId, respondent_id: RespondentId) -> Self {
        Self {
            survey_id,
            respondent_id,
        }
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.survey_id, self.respondent_id)
    }
}

/// Mutable state of one survey conversation.
///
/// # Invariants
///
/// - The question index is monotonically non-decreasing and bounded by
///   `questions.len() - 1`; it is `None` until the first question is asked.
/// - Once the state reaches `Complete` it never returns to `Asking` or `Initial`.
/// - `messages` is append-only: prior entries are never reordered or removed.
/// - `feedback_requested` flips false -> true at most once.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    key: SessionKey,
    state: SessionState,
    /// Snapshot of the question store at creation; later store changes do
    /// not affect an in-flight session.
    questions: Vec<Question>,
    current_question: Option<usize>,
    responses: HashMap<QuestionId, String>,
    feedback_requested: bool,
    messages: Vec<Message>,
    respondent_turns_on_question: u32,
}

impl ConversationSession {
    /// Creates a new session in the `Initial` state with the opening
    /// assistant greeting already in the log.
    pub fn new(key: SessionKey, questions: Vec<Question>, opening: Message) -> Self {
        Self {
            key,
            state: SessionState::Initial,
            questions,
            current_question: None,
            responses: HashMap::new(),
            feedback_requested: false,
            messages: vec![opening],
            respondent_turns_on_question: 0,
        }
    }

    /// Returns the session key.
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the question snapshot.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the index of the question under discussion, if any.
    pub fn current_question_index(&self) -> Option<usize> {
        self.current_question
    }

    /// Returns the question currently under discussion, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.and_then(|i| self.questions.get(i))
    }

    /// Returns true if the current question is the last in the snapshot.
    pub fn on_last_question(&self) -> bool {
        match self.current_question {
            Some(i) => i + 1 == self.questions.len(),
            None => false,
        }
    }

    /// Returns the recorded answers keyed by question.
    pub fn responses(&self) -> &HashMap<QuestionId, String> {
        &self.responses
    }

    /// Returns the in-memory message log (mirror of the transcript store).
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns true once the one-shot additional-feedback request was made.
    pub fn feedback_requested(&self) -> bool {
        self.feedback_requested
    }

    /// Returns the respondent turns spent on the current question.
    pub fn respondent_turns_on_question(&self) -> u32 {
        self.respondent_turns_on_question
    }

    /// Appends a message to the in-memory log.
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Records the respondent's answer for the current question and counts
    /// the turn. Last write wins if a question is revisited.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if no question is under discussion
    pub fn record_response(&mut self, answer: impl Into<String>) -> Result<(), DomainError> {
        let question = self.current_question().ok_or_else(|| {
            DomainError::new(
                crate::domain::foundation::ErrorCode::InvalidStateTransition,
                "No question is currently under discussion",
            )
        })?;
        let id = question.id().clone();
        self.responses.insert(id, answer.into());
        self.respondent_turns_on_question += 1;
        Ok(())
    }

    /// Starts the question flow: `Initial -> Asking` with index 0.
    ///
    /// # Errors
    ///
    /// - invalid transition if the session is not in `Initial`
    /// - `QuestionsNotFound` if the snapshot is empty
    pub fn begin_asking(&mut self) -> Result<&Question, DomainError> {
        if self.questions.is_empty() {
            return Err(DomainError::new(
                crate::domain::foundation::ErrorCode::QuestionsNotFound,
                "Survey has no questions",
            ));
        }
        self.state = self.state.transition_to(SessionState::Asking)?;
        self.current_question = Some(0);
        self.respondent_turns_on_question = 0;
        Ok(&self.questions[0])
    }

    /// Moves to the next question, resetting the per-question turn count.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if not asking or already on the last question
    pub fn advance_question(&mut self) -> Result<&Question, DomainError> {
        let current = match (self.state, self.current_question) {
            (SessionState::Asking, Some(i)) => i,
            _ => {
                return Err(invalid_transition("advance outside the asking state").into());
            }
        };
        let next = current + 1;
        if next >= self.questions.len() {
            return Err(invalid_transition("advance past the last question").into());
        }
        self.current_question = Some(next);
        self.respondent_turns_on_question = 0;
        Ok(&self.questions[next])
    }

    /// Finishes the question flow: `Asking -> Complete`.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.state = self.state.transition_to(SessionState::Complete)?;
        Ok(())
    }

    /// Marks the one-shot additional-feedback request as made.
    ///
    /// Idempotent; the flag never returns to false.
    pub fn mark_feedback_requested(&mut self) {
        self.feedback_requested = true;
    }
}

fn invalid_transition(reason: &str) -> ValidationError {
    ValidationError::invalid_format("state_transition", format!("Cannot {}", reason))
}
