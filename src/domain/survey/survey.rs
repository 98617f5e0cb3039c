//! Survey metadata entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, SurveyId};

/// Survey metadata used when opening a conversation.
///
/// The optional `context` string describes what the survey owner is looking
/// to learn; it is interpolated (lower-cased) into the opening greeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    id: SurveyId,
    title: String,
    context: Option<String>,
}

impl Survey {
    /// Creates new survey metadata.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title is empty
    pub fn new(
        id: SurveyId,
        title: impl Into<String>,
        context: Option<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation(
                "title",
                "Survey title cannot be empty",
            ));
        }
        Ok(Self { id, title, context })
    }

    /// Returns the survey ID.
    pub fn id(&self) -> &SurveyId {
        &self.id
    }

    /// Returns the survey title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the optional context string.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Builds the opening greeting shown to a respondent.
    ///
    /// The context clause is only included when the survey carries one, and
    /// the context text is lower-cased when interpolated.
    pub fn greeting(&self) -> String {
        let mut greeting = format!("Hi! I'd like to get your feedback on {}", self.title);
        if let Some(context) = &self.context {
            greeting.push_str(&format!(". We're looking to {}.", context.to_lowercase()));
        }
        greeting.push_str(" Would you like to share your thoughts?");
        greeting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_title() {
        let result = Survey::new(SurveyId::new("s1").unwrap(), "", None);
        assert!(result.is_err());
    }

    #[test]
    fn greeting_without_context() {
        let survey = Survey::new(SurveyId::new("s1").unwrap(), "Office Snacks", None).unwrap();
        assert_eq!(
            survey.greeting(),
            "Hi! I'd like to get your feedback on Office Snacks Would you like to share your thoughts?"
        );
    }

    #[test]
    fn greeting_lowercases_context() {
        let survey = Survey::new(
            SurveyId::new("s1").unwrap(),
            "Office Snacks",
            Some("Improve The Kitchen".to_string()),
        )
        .unwrap();
        assert_eq!(
            survey.greeting(),
            "Hi! I'd like to get your feedback on Office Snacks. We're looking to improve the kitchen. Would you like to share your thoughts?"
        );
    }
}
