//! Context provider adapters.
//!
//! Each provider contributes one opaque pre-formatted block to a round,
//! and swallows its own failures to an empty string: enrichment is never
//! allowed to break a round.

pub mod pubmed;
pub mod web;

pub use pubmed::PubMedHighlights;
pub use web::WebSearchHighlights;
