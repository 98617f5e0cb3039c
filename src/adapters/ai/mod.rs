//! AI provider adapters.

mod mock_provider;
mod openai_provider;
mod resilient;

pub use mock_provider::{MockAiProvider, MockError, MockResponse};
pub use openai_provider::{OpenAiConfig, OpenAiProvider};
pub use resilient::{ResilientAiProvider, RetryPolicy};
