//! Inquiry value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Text submitted by the inquirer (Value Object)
///
/// Surrounding whitespace is trimmed; blank input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    content: String,
}

impl Inquiry {
    /// Create a new inquiry, rejecting blank text
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInput(
                "inquiry cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Get the inquiry content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Inquiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Inquiry {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Inquiry::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inquiry_creation_trims() {
        let inquiry = Inquiry::new("  I'm stuck deciding between two job offers. \n").unwrap();
        assert_eq!(
            inquiry.content(),
            "I'm stuck deciding between two job offers."
        );
    }

    #[test]
    fn test_blank_inquiry_rejected() {
        assert!(Inquiry::new("").is_err());
        assert!(Inquiry::new("   \t\n").is_err());
    }

    #[test]
    fn test_try_from_str() {
        let inquiry: Inquiry = "Should I move?".try_into().unwrap();
        assert_eq!(inquiry.to_string(), "Should I move?");
    }
}
