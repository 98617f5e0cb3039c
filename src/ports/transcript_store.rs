//! Transcript store port - durable per-session message log.

use async_trait::async_trait;

use crate::domain::conversation::{Message, SessionKey};
use crate::domain::foundation::DomainError;

/// Port for the durable, append-only conversation transcript.
///
/// Appends within a turn are not atomic with the model call: a turn that
/// fails midway may leave the respondent message persisted without a reply.
/// Readers must tolerate that (at-least-once delivery).
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Appends a message to the transcript for a session.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the write fails
    async fn append(&self, key: &SessionKey, message: &Message) -> Result<(), DomainError>;

    /// Returns the full transcript for a session, in append order.
    ///
    /// An unknown key yields an empty transcript, not an error.
    async fn transcript(&self, key: &SessionKey) -> Result<Vec<Message>, DomainError>;
}
