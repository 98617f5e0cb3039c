//! In-memory store adapters.
//!
//! Process-local implementations of the question and transcript stores,
//! used in tests and single-node deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::conversation::{Message, SessionKey};
use crate::domain::foundation::{DomainError, ErrorCode, SurveyId};
use crate::domain::survey::{Question, Survey};
use crate::ports::{QuestionStore, TranscriptStore};

/// In-memory question store.
#[derive(Debug, Default)]
pub struct InMemoryQuestionStore {
    surveys: Mutex<HashMap<SurveyId, Survey>>,
    questions: Mutex<HashMap<SurveyId, Vec<Question>>>,
}

impl InMemoryQuestionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a survey and its question list.
    pub fn insert(&self, survey: Survey, questions: Vec<Question>) {
        let id = survey.id().clone();
        self.surveys.lock().unwrap().insert(id.clone(), survey);
        self.questions.lock().unwrap().insert(id, questions);
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn survey(&self, survey_id: &SurveyId) -> Result<Survey, DomainError> {
        self.surveys
            .lock()
            .unwrap()
            .get(survey_id)
            .cloned()
            .ok_or_else(|| DomainError::survey_not_found(survey_id.as_str()))
    }

    async fn questions(&self, survey_id: &SurveyId) -> Result<Vec<Question>, DomainError> {
        self.questions
            .lock()
            .unwrap()
            .get(survey_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::QuestionsNotFound,
                    format!("No questions for survey '{}'", survey_id),
                )
                .with_detail("survey_id", survey_id.as_str())
            })
    }
}

/// In-memory transcript store.
///
/// Appends are totally ordered per key by the interior mutex.
#[derive(Debug, Default)]
pub struct InMemoryTranscriptStore {
    logs: Mutex<HashMap<SessionKey, Vec<Message>>>,
}

impl InMemoryTranscriptStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of messages stored for a session.
    pub fn len(&self, key: &SessionKey) -> usize {
        self.logs.lock().unwrap().get(key).map_or(0, Vec::len)
    }

    /// Returns true if no messages are stored for a session.
    pub fn is_empty(&self, key: &SessionKey) -> bool {
        self.len(key) == 0
    }
}

#[async_trait]
impl TranscriptStore for InMemoryTranscriptStore {
    async fn append(&self, key: &SessionKey, message: &Message) -> Result<(), DomainError> {
        self.logs
            .lock()
            .unwrap()
            .entry(key.clone())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn transcript(&self, key: &SessionKey) -> Result<Vec<Message>, DomainError> {
        Ok(self
            .logs
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default())
    }
}
