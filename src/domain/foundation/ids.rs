//! Strongly-typed identifier value objects.
//!
//! Survey, respondent, and question identifiers originate in the external
//! stores, so they are validated strings rather than locally generated UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Identifier for a survey (assigned by the survey store).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyId(String);

impl SurveyId {
    /// Creates a new SurveyId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("survey_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurveyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a respondent (typically from the auth provider).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RespondentId(String);

impl RespondentId {
    /// Creates a new RespondentId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("respondent_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RespondentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a question within a survey (assigned by the question store).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a new QuestionId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("question_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_id_rejects_empty() {
        assert!(SurveyId::new("").is_err());
    }

    #[test]
    fn survey_id_preserves_value() {
        let id = SurveyId::new("survey-42").unwrap();
        assert_eq!(id.as_str(), "survey-42");
        assert_eq!(id.to_string(), "survey-42");
    }

    #[test]
    fn respondent_id_rejects_empty() {
        assert!(RespondentId::new("").is_err());
    }

    #[test]
    fn question_id_rejects_empty() {
        assert!(QuestionId::new("").is_err());
    }

    #[test]
    fn ids_with_equal_values_are_equal() {
        assert_eq!(
            QuestionId::new("q1").unwrap(),
            QuestionId::new("q1").unwrap()
        );
        assert_ne!(
            QuestionId::new("q1").unwrap(),
            QuestionId::new("q2").unwrap()
        );
    }

    #[test]
    fn survey_id_serializes_transparently() {
        let id = SurveyId::new("survey-42").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"survey-42\"");
    }
}
