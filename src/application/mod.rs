//! Application layer - use cases wiring the domain to the ports.

pub mod analysis;
pub mod orchestrator;
pub mod registry;

pub use analysis::{QuestionAnalysis, ResponseAnalyzer, SentimentBreakdown};
pub use orchestrator::ConversationOrchestrator;
pub use registry::SessionRegistry;
