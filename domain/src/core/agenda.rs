//! Agenda value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The case description driving one advisory round (Value Object)
///
/// Free text supplied by the operator. Guaranteed non-blank once
/// constructed; everything downstream may rely on that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Agenda {
    text: String,
}

impl Agenda {
    /// Create a new agenda, rejecting blank input
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyAgenda);
        }
        Ok(Self { text })
    }

    /// Get the agenda text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume and return the inner text
    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Agenda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl TryFrom<&str> for Agenda {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Agenda::new(s)
    }
}

impl TryFrom<String> for Agenda {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Agenda::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agenda_creation() {
        let agenda = Agenda::new("58-year-old with chest pain and dyspnea").unwrap();
        assert_eq!(agenda.text(), "58-year-old with chest pain and dyspnea");
    }

    #[test]
    fn test_blank_agenda_rejected() {
        assert!(matches!(Agenda::new(""), Err(DomainError::EmptyAgenda)));
        assert!(matches!(Agenda::new("   \n"), Err(DomainError::EmptyAgenda)));
    }

    #[test]
    fn test_try_from_str() {
        let agenda: Agenda = "acute abdominal pain".try_into().unwrap();
        assert_eq!(agenda.text(), "acute abdominal pain");
    }
}
