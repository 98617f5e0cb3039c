//! Survey domain module.
//!
//! Read-only survey metadata and questions as seen by the conversation
//! engine. Authoring and storage of surveys live behind the question store
//! port.

mod question;
mod survey;

pub use question::Question;
pub(crate) use question::sort_by_order;
pub use survey::Survey;
