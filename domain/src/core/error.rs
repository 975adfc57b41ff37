//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Agenda is empty")]
    EmptyAgenda,

    #[error("Roster has no members")]
    EmptyRoster,

    #[error("Invalid round count: {0}")]
    InvalidRoundCount(usize),
}

impl DomainError {
    /// Check whether this error is caused by missing caller input
    pub fn is_input_error(&self) -> bool {
        matches!(self, DomainError::EmptyAgenda | DomainError::EmptyRoster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_agenda_display() {
        let error = DomainError::EmptyAgenda;
        assert_eq!(error.to_string(), "Agenda is empty");
    }

    #[test]
    fn test_is_input_error() {
        assert!(DomainError::EmptyAgenda.is_input_error());
        assert!(DomainError::EmptyRoster.is_input_error());
        assert!(!DomainError::InvalidRoundCount(0).is_input_error());
    }
}
