//! Core domain types: errors and the agenda value object.

pub mod agenda;
pub mod error;

pub use agenda::Agenda;
pub use error::DomainError;
