//! Question store port - source of survey metadata and questions.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SurveyId};
use crate::domain::survey::{Question, Survey};

/// Port for reading survey metadata and question lists.
///
/// Implementations return questions in no particular order; callers sort by
/// the `order` field before use. Session creation reads from this store
/// exactly once per (survey, respondent) pair; later store changes do not
/// affect in-flight sessions.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Fetches survey metadata (title, optional context).
    ///
    /// # Errors
    ///
    /// - `SurveyNotFound` if no survey exists for the id
    async fn survey(&self, survey_id: &SurveyId) -> Result<Survey, DomainError>;

    /// Fetches the questions for a survey.
    ///
    /// # Errors
    ///
    /// - `QuestionsNotFound` if the survey has no question list
    async fn questions(&self, survey_id: &SurveyId) -> Result<Vec<Question>, DomainError>;
}
