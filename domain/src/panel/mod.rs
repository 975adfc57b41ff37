//! Panel composition: advisor specifications and the roster.

pub mod advisor;
pub mod roster;

pub use advisor::AdvisorSpec;
pub use roster::Roster;
