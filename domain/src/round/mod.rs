//! Round types: the unit of work and its results.

pub mod request;
pub mod transcript;
pub mod value_objects;

pub use request::RoundRequest;
pub use transcript::render_transcript;
pub use value_objects::{FALLBACK_SUMMARY, MemberResult, RoundResult};
