//! Question entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, QuestionId};

/// A single survey question.
///
/// `order` defines the respondent-facing sequence. Questions are owned by
/// the question store and read-only from the orchestrator's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    order: u32,
}

impl Question {
    /// Creates a new question.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is empty
    pub fn new(id: QuestionId, text: impl Into<String>, order: u32) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::validation(
                "text",
                "Question text cannot be empty",
            ));
        }
        Ok(Self { id, text, order })
    }

    /// Returns the question ID.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Returns the question text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the position in the respondent-facing sequence.
    pub fn order(&self) -> u32 {
        self.order
    }
}

/// Sorts questions by ascending `order` (stable, as the store contract requires).
pub(crate) fn sort_by_order(questions: &mut [Question]) {
    questions.sort_by_key(|q| q.order);
}
