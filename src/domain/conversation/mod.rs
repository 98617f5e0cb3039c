//! Conversation domain module.
//!
//! The mutable heart of the engine: per-respondent session state, the
//! `initial -> asking -> complete` lifecycle, message entities, the
//! advancement policy, and the canned prompt text.

mod advancement;
mod message;
pub mod prompts;
mod session;
mod state;

pub use advancement::{AdvancementPolicy, TransitionSignalPolicy, DEFAULT_TURN_CAP};
pub use message::{Message, MessageId, Role};
pub use session::{ConversationSession, SessionKey};
pub use state::SessionState;
