//! Domain layer - entities, value objects, and pure decision logic.

pub mod conversation;
pub mod foundation;
pub mod survey;
