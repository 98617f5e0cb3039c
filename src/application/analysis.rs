//! Response analysis - structured sentiment over collected answers.
//!
//! Builds a JSON-formatted prompt per question, parses the model's sentiment
//! breakdown, and snaps percentages so each response counts as a whole unit.
//! Analysis degrades to a neutral default rather than failing: a survey
//! report with a stock summary beats an aborted report.

use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::domain::survey::Question;
use crate::ports::{AiProvider, ChatRole, CompletionRequest};

/// Sentiment percentages for one question's responses.
///
/// Values are percentages summing to 100, each a multiple of
/// `100 / response_count` so one response is never split across buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentBreakdown {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentBreakdown {
    /// All-neutral default used when analysis cannot run.
    pub fn neutral_default() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 100.0,
        }
    }
}

/// Analysis result for one question.
#[derive(Debug, Clone)]
pub struct QuestionAnalysis {
    pub question_text: String,
    pub sentiment: SentimentBreakdown,
    pub summary: String,
    pub response_count: usize,
}

/// Analyzes collected responses with the model.
pub struct ResponseAnalyzer {
    provider: Arc<dyn AiProvider>,
}

impl ResponseAnalyzer {
    /// Creates a new analyzer.
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Analyzes the responses gathered for one question.
    ///
    /// Empty input, provider failure, and unparseable model output all yield
    /// a neutral default analysis instead of an error.
    pub async fn analyze_question(
        &self,
        question: &Question,
        responses: &[String],
    ) -> QuestionAnalysis {
        if responses.is_empty() {
            return QuestionAnalysis {
                question_text: question.text().to_string(),
                sentiment: SentimentBreakdown::neutral_default(),
                summary: "No responses received yet.".to_string(),
                response_count: 0,
            };
        }

        let request = CompletionRequest::new()
            .with_message(ChatRole::User, build_prompt(question.text(), responses))
            .with_temperature(0.7);

        let raw = match self.provider.complete(request).await {
            Ok(response) => parse_analysis(&response.content),
            Err(err) => {
                warn!(error = %err, "analysis completion failed, using neutral default");
                RawAnalysis::error_default()
            }
        };

        QuestionAnalysis {
            question_text: question.text().to_string(),
            sentiment: snap_to_response_units(&raw.sentiment, responses.len()),
            summary: raw.summary,
            response_count: responses.len(),
        }
    }
}

/// Builds the per-question analysis prompt.
fn build_prompt(question_text: &str, responses: &[String]) -> String {
    let n = responses.len();
    format!(
        "Analyze these {n} responses to the question \"{question_text}\" and provide:\n\
        1. Sentiment breakdown (positive, negative, neutral percentages) - calculate based on actual responses:\n\
        \x20  - For {n} responses, each response should be counted as a whole (not split)\n\
        \x20  - If a response is positive, count it as 100% positive\n\
        \x20  - If a response is negative, count it as 100% negative\n\
        \x20  - If a response is neutral, count it as 100% neutral\n\
        \x20  - Then calculate the percentage of total responses for each sentiment\n\
        2. A brief summary that includes specific examples from the responses\n\
        \n\
        Responses:\n\
        {responses}\n\
        \n\
        Format the response as JSON with these fields:\n\
        {{\n\
        \x20 \"sentiment\": {{\n\
        \x20   \"positive\": number,\n\
        \x20   \"negative\": number,\n\
        \x20   \"neutral\": number\n\
        \x20 }},\n\
        \x20 \"summary\": string\n\
        }}\n\
        Each percentage must be a multiple of (100/{n}).",
        responses = responses.join("\n"),
    )
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    sentiment: RawSentiment,
    summary: String,
}

#[derive(Debug, Deserialize)]
struct RawSentiment {
    #[serde(default)]
    positive: f64,
    #[serde(default)]
    negative: f64,
    #[serde(default)]
    neutral: f64,
}

impl RawAnalysis {
    fn error_default() -> Self {
        Self {
            sentiment: RawSentiment {
                positive: 0.0,
                negative: 0.0,
                neutral: 100.0,
            },
            summary: "Error analyzing responses.".to_string(),
        }
    }
}

fn parse_analysis(content: &str) -> RawAnalysis {
    match serde_json::from_str(content) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(error = %err, "could not parse analysis response, using neutral default");
            RawAnalysis::error_default()
        }
    }
}

/// Rounds percentages to multiples of `100 / n`, deriving neutral as the
/// remainder so the three always sum to 100.
fn snap_to_response_units(raw: &RawSentiment, n: usize) -> SentimentBreakdown {
    let unit = 100.0 / n as f64;
    let positive = round2((raw.positive / unit).round() * unit);
    let negative = round2((raw.negative / unit).round() * unit);
    let neutral = round2(100.0 - positive - negative);
    SentimentBreakdown {
        positive,
        negative,
        neutral,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
