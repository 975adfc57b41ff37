//! Domain layer for consilium
//!
//! This crate contains the core entities and pure logic of the advisory
//! panel. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Round
//!
//! A round is one complete advisory cycle: the agenda is fanned out to every
//! panel member for an independent opinion, then the lead synthesizes the
//! surviving opinions into a single consensus document.
//!
//! ## Panel
//!
//! The panel is the immutable cast of one round: a lead advisor and an
//! ordered list of member advisors, each backed by a model identifier.

pub mod core;
pub mod intake;
pub mod panel;
pub mod prompt;
pub mod round;
pub mod util;

// Re-export commonly used types
pub use core::{agenda::Agenda, error::DomainError};
pub use intake::extract_questions;
pub use panel::{advisor::AdvisorSpec, roster::Roster};
pub use prompt::{Guardrails, PromptTemplate};
pub use round::{
    request::RoundRequest,
    transcript::render_transcript,
    value_objects::{FALLBACK_SUMMARY, MemberResult, RoundResult},
};
pub use util::preview;
