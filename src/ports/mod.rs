//! Ports - Interfaces between the application core and the outside world.
//!
//! Each port is a trait the application layer depends on. Adapters provide
//! concrete implementations (HTTP providers, in-memory stores) without the
//! core knowing about them.

pub mod ai_provider;
pub mod question_store;
pub mod transcript_store;

pub use ai_provider::{
    AiError, AiProvider, ChatMessage, ChatRole, CompletionRequest, CompletionResponse,
    ProviderInfo,
};
pub use question_store::QuestionStore;
pub use transcript_store::TranscriptStore;
