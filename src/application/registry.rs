//! Session registry - lazy, process-lifetime session map.
//!
//! Holds one session per (survey, respondent) pair behind a per-session async
//! mutex. Turns for the same session are serialized; distinct sessions
//! proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::domain::conversation::{ConversationSession, Message, SessionKey};
use crate::domain::foundation::{DomainError, RespondentId, SurveyId};
use crate::domain::survey::sort_by_order;
use crate::ports::{QuestionStore, TranscriptStore};

/// Shared handle to a single session.
pub type SessionHandle = Arc<tokio::sync::Mutex<ConversationSession>>;

/// In-memory registry of live sessions.
///
/// Sessions are created lazily on first contact and never evicted; the
/// registry lives as long as the process.
pub struct SessionRegistry {
    questions: Arc<dyn QuestionStore>,
    transcripts: Arc<dyn TranscriptStore>,
    sessions: Mutex<HashMap<SessionKey, SessionHandle>>,
}

impl SessionRegistry {
    /// Creates a new registry over the given stores.
    pub fn new(questions: Arc<dyn QuestionStore>, transcripts: Arc<dyn TranscriptStore>) -> Self {
        Self {
            questions,
            transcripts,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the session for the pair, creating it on first contact.
    ///
    /// Creation fetches the survey and its questions, synthesizes the opening
    /// greeting, and appends the greeting to the transcript. An existing
    /// session is returned unchanged.
    ///
    /// Two callers racing on the same key may both run the miss path; the
    /// insert below keeps the first session and discards the loser's, which
    /// can leave a duplicate greeting in the transcript. The transcript
    /// contract is at-least-once, so this is tolerated rather than holding
    /// the map lock across the store calls.
    ///
    /// # Errors
    ///
    /// - `SurveyNotFound` / `QuestionsNotFound` from the question store
    /// - `StorageError` if the greeting cannot be persisted
    pub async fn get_or_create(
        &self,
        survey_id: &SurveyId,
        respondent_id: &RespondentId,
    ) -> Result<SessionHandle, DomainError> {
        let key = SessionKey::new(survey_id.clone(), respondent_id.clone());

        if let Some(existing) = self.sessions.lock().unwrap().get(&key) {
            debug!(session = %key, "session hit");
            return Ok(Arc::clone(existing));
        }

        // Miss path runs without the map lock; a racing creator for the same
        // key is resolved at insert time below.
        let survey = self.questions.survey(survey_id).await?;
        let mut questions = self.questions.questions(survey_id).await?;
        sort_by_order(&mut questions);

        let opening = Message::assistant(survey.greeting())?;
        self.transcripts.append(&key, &opening).await?;

        let session = ConversationSession::new(key.clone(), questions, opening);

        let mut sessions = self.sessions.lock().unwrap();
        let handle = sessions
            .entry(key.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(session)));
        info!(session = %key, "session ready");
        Ok(Arc::clone(handle))
    }

    /// Returns the session for the pair if it already exists.
    pub fn get(&self, survey_id: &SurveyId, respondent_id: &RespondentId) -> Option<SessionHandle> {
        let key = SessionKey::new(survey_id.clone(), respondent_id.clone());
        self.sessions.lock().unwrap().get(&key).map(Arc::clone)
    }

    /// Returns the number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Returns true if no sessions exist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
