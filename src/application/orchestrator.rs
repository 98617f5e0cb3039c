//! Conversation orchestrator - drives one turn of a survey dialogue.
//!
//! Dispatches on the session state, records the respondent's answer, calls
//! the model where needed, and returns exactly one visible reply per turn.
//! Everything persisted within a turn goes through the transcript store as
//! well as the in-session mirror.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::conversation::{
    prompts, AdvancementPolicy, ConversationSession, Message, SessionState,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{AiProvider, ChatMessage, CompletionRequest, TranscriptStore};

/// Orchestrates survey conversation turns.
///
/// Wire the provider through `ResilientAiProvider` in production so model
/// failures degrade to canned fallback replies instead of surfacing here.
pub struct ConversationOrchestrator {
    provider: Arc<dyn AiProvider>,
    transcripts: Arc<dyn TranscriptStore>,
    advancement: Arc<dyn AdvancementPolicy>,
}

impl ConversationOrchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        provider: Arc<dyn AiProvider>,
        transcripts: Arc<dyn TranscriptStore>,
        advancement: Arc<dyn AdvancementPolicy>,
    ) -> Self {
        Self {
            provider,
            transcripts,
            advancement,
        }
    }

    /// Handles one incoming respondent message and returns the single reply
    /// to present.
    ///
    /// The caller must hold the session's mutex for the duration of the turn.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the text is empty
    /// - `StorageError` if a transcript append fails
    #[instrument(skip_all, fields(session = %session.key(), state = ?session.state()))]
    pub async fn handle_incoming(
        &self,
        session: &mut ConversationSession,
        text: &str,
    ) -> Result<String, DomainError> {
        let incoming = Message::respondent(text)?;
        self.append(session, incoming).await?;

        match session.state() {
            SessionState::Initial => self.handle_initial(session, text).await,
            SessionState::Asking => self.handle_asking(session, text).await,
            SessionState::Complete => self.handle_complete(session).await,
        }
    }

    /// Initial state: wait for the respondent to agree to participate.
    async fn handle_initial(
        &self,
        session: &mut ConversationSession,
        text: &str,
    ) -> Result<String, DomainError> {
        if !prompts::is_affirmation(text) {
            debug!("participation not affirmed");
            return self.reply(session, prompts::DECLINE_ACK).await;
        }

        let first = session.begin_asking()?.text().to_string();
        info!("participation affirmed, asking first question");
        self.reply(session, &first).await
    }

    /// Asking state: record the answer, get a model reply, maybe advance.
    async fn handle_asking(
        &self,
        session: &mut ConversationSession,
        text: &str,
    ) -> Result<String, DomainError> {
        session.record_response(text)?;

        let request = self
            .conversation_request(session)
            .with_system_prompt(format!("{}\n\n{}", prompts::PERSONA, prompts::DISCUSS_TOPIC));
        let reply = self.complete(request).await?;
        self.append(session, Message::assistant(&reply)?).await?;

        let turns = session.respondent_turns_on_question();
        if !self.advancement.should_advance(&reply, turns) {
            return Ok(reply);
        }

        if session.on_last_question() {
            session.complete()?;
            info!("last question answered, session complete");
            return Ok(reply);
        }

        // The model reply stays in the transcript, but the next question is
        // the one visible text for this turn.
        let next = session.advance_question()?.text().to_string();
        debug!(index = ?session.current_question_index(), "advanced to next question");
        self.reply(session, &next).await
    }

    /// Complete state: free-form wrap-up, asking once for extra feedback.
    async fn handle_complete(
        &self,
        session: &mut ConversationSession,
    ) -> Result<String, DomainError> {
        let instruction = if session.feedback_requested() {
            prompts::WRAP_UP_REPEAT
        } else {
            prompts::WRAP_UP_FIRST
        };

        let request = self
            .conversation_request(session)
            .with_system_prompt(format!("{}\n\n{}", prompts::PERSONA, instruction));
        let reply = self.complete(request).await?;

        session.mark_feedback_requested();
        self.reply(session, &reply).await
    }

    /// Maps the visible session log into provider wire messages.
    fn conversation_request(&self, session: &ConversationSession) -> CompletionRequest {
        let messages = session.messages().iter().filter_map(|m| {
            if m.is_respondent() {
                Some(ChatMessage::user(m.content()))
            } else if m.is_assistant() {
                Some(ChatMessage::assistant(m.content()))
            } else {
                None
            }
        });
        CompletionRequest::new().with_messages(messages)
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, DomainError> {
        let response = self.provider.complete(request).await.map_err(|e| {
            DomainError::new(ErrorCode::InternalError, "Model completion failed")
                .with_detail("cause", e.to_string())
        })?;
        Ok(response.content)
    }

    /// Appends an assistant message and returns its text as the turn's reply.
    async fn reply(
        &self,
        session: &mut ConversationSession,
        content: &str,
    ) -> Result<String, DomainError> {
        self.append(session, Message::assistant(content)?).await?;
        Ok(content.to_string())
    }

    async fn append(
        &self,
        session: &mut ConversationSession,
        message: Message,
    ) -> Result<(), DomainError> {
        self.transcripts.append(session.key(), &message).await?;
        session.push_message(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::store::InMemoryTranscriptStore;
    use crate::domain::conversation::{SessionKey, TransitionSignalPolicy};
    use crate::domain::foundation::{QuestionId, RespondentId, SurveyId};
    use crate::domain::survey::Question;

    fn session(question_count: usize) -> ConversationSession {
        let key = SessionKey::new(
            SurveyId::new("s1").unwrap(),
            RespondentId::new("r1").unwrap(),
        );
        let questions = (0..question_count)
            .map(|i| {
                Question::new(
                    QuestionId::new(format!("q{}", i)).unwrap(),
                    format!("Question {}?", i),
                    i as u32,
                )
                .unwrap()
            })
            .collect();
        ConversationSession::new(
            key,
            questions,
            Message::assistant("Hi! Would you like to share your thoughts?").unwrap(),
        )
    }

    fn orchestrator(mock: MockAiProvider) -> ConversationOrchestrator {
        ConversationOrchestrator::new(
            Arc::new(mock),
            Arc::new(InMemoryTranscriptStore::new()),
            Arc::new(TransitionSignalPolicy::default()),
        )
    }

    #[tokio::test]
    async fn affirmation_starts_the_questions() {
        let orchestrator = orchestrator(MockAiProvider::new());
        let mut session = session(2);

        let reply = orchestrator
            .handle_incoming(&mut session, "Sure, happy to")
            .await
            .unwrap();

        assert_eq!(reply, "Question 0?");
        assert_eq!(session.state(), SessionState::Asking);
        assert_eq!(session.current_question_index(), Some(0));
    }

    #[tokio::test]
    async fn decline_keeps_session_initial() {
        let orchestrator = orchestrator(MockAiProvider::new());
        let mut session = session(2);

        let reply = orchestrator
            .handle_incoming(&mut session, "not right now")
            .await
            .unwrap();

        assert_eq!(reply, prompts::DECLINE_ACK);
        assert_eq!(session.state(), SessionState::Initial);
        assert_eq!(session.current_question_index(), None);
    }

    #[tokio::test]
    async fn respondent_can_affirm_after_declining() {
        let orchestrator = orchestrator(MockAiProvider::new());
        let mut session = session(1);

        orchestrator
            .handle_incoming(&mut session, "hmm, maybe later")
            .await
            .unwrap();
        let reply = orchestrator
            .handle_incoming(&mut session, "alright, let's do it")
            .await
            .unwrap();

        assert_eq!(reply, "Question 0?");
        assert_eq!(session.state(), SessionState::Asking);
    }

    #[tokio::test]
    async fn asking_without_transition_returns_model_reply() {
        let mock = MockAiProvider::new().with_response("Why do you say that?");
        let orchestrator = orchestrator(mock);
        let mut session = session(2);
        session.begin_asking().unwrap();

        let reply = orchestrator
            .handle_incoming(&mut session, "It works fine I guess")
            .await
            .unwrap();

        assert_eq!(reply, "Why do you say that?");
        assert_eq!(session.current_question_index(), Some(0));
        assert_eq!(
            session.responses()[&QuestionId::new("q0").unwrap()],
            "It works fine I guess"
        );
    }

    #[tokio::test]
    async fn transition_phrase_advances_and_returns_next_question() {
        let mock = MockAiProvider::new().with_response("Great, on to the next question!");
        let orchestrator = orchestrator(mock);
        let mut session = session(2);
        session.begin_asking().unwrap();

        let reply = orchestrator
            .handle_incoming(&mut session, "I like the snacks")
            .await
            .unwrap();

        // Model reply persisted, next question returned
        assert_eq!(reply, "Question 1?");
        assert_eq!(session.current_question_index(), Some(1));
        let contents: Vec<_> = session.messages().iter().map(|m| m.content()).collect();
        assert!(contents.contains(&"Great, on to the next question!"));
    }

    #[tokio::test]
    async fn transition_on_last_question_completes_session() {
        let mock = MockAiProvider::new().with_response("Thanks! Let's move on.");
        let orchestrator = orchestrator(mock);
        let mut session = session(1);
        session.begin_asking().unwrap();

        let reply = orchestrator
            .handle_incoming(&mut session, "That's all I have to say")
            .await
            .unwrap();

        assert_eq!(reply, "Thanks! Let's move on.");
        assert_eq!(session.state(), SessionState::Complete);
    }

    #[tokio::test]
    async fn turn_cap_forces_advancement() {
        // Four bland replies, none containing a transition phrase
        let mock = MockAiProvider::new()
            .with_response("Interesting, go on.")
            .with_response("Tell me more.")
            .with_response("I see.")
            .with_response("Noted.");
        let orchestrator = orchestrator(mock);
        let mut session = session(2);
        session.begin_asking().unwrap();

        for text in ["a", "b", "c"] {
            let reply = orchestrator.handle_incoming(&mut session, text).await.unwrap();
            assert_ne!(reply, "Question 1?");
            assert_eq!(session.current_question_index(), Some(0));
        }

        let reply = orchestrator.handle_incoming(&mut session, "d").await.unwrap();
        assert_eq!(reply, "Question 1?");
        assert_eq!(session.current_question_index(), Some(1));
    }

    #[tokio::test]
    async fn complete_state_varies_instruction_once() {
        let mock = MockAiProvider::new()
            .with_response("Anything else you'd like to add?")
            .with_response("Thanks again for your time!");
        let orchestrator = orchestrator(mock.clone());
        let mut session = session(1);
        session.begin_asking().unwrap();
        session.complete().unwrap();
        assert!(!session.feedback_requested());

        orchestrator
            .handle_incoming(&mut session, "that was fun")
            .await
            .unwrap();
        assert!(session.feedback_requested());
        let first = mock.calls()[0].system_prompt.clone().unwrap();
        assert!(first.contains(prompts::WRAP_UP_FIRST));

        orchestrator
            .handle_incoming(&mut session, "no, all good")
            .await
            .unwrap();
        let second = mock.calls()[1].system_prompt.clone().unwrap();
        assert!(second.contains(prompts::WRAP_UP_REPEAT));
        assert_eq!(session.state(), SessionState::Complete);
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let orchestrator = orchestrator(MockAiProvider::new());
        let mut session = session(1);

        let result = orchestrator.handle_incoming(&mut session, "   ").await;
        assert!(result.is_err());
        // Nothing appended
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn model_sees_only_visible_messages() {
        let mock = MockAiProvider::new().with_response("Go on.");
        let orchestrator = orchestrator(mock.clone());
        let mut session = session(1);
        session.begin_asking().unwrap();
        session.push_message(Message::system("hidden instruction").unwrap());

        orchestrator
            .handle_incoming(&mut session, "my answer")
            .await
            .unwrap();

        let call = mock.last_call().unwrap();
        assert!(call
            .messages
            .iter()
            .all(|m| m.content != "hidden instruction"));
        assert!(call.messages.iter().any(|m| m.content == "my answer"));
    }
}
