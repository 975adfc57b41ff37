//! Roster entity

use crate::core::error::DomainError;
use crate::panel::advisor::AdvisorSpec;
use serde::{Deserialize, Serialize};

/// The immutable cast of one advisory round
///
/// A lead advisor plus an ordered list of member advisors. Member order is
/// significant: round results are always reported in roster order, and
/// member outputs are tagged by their position here. Unique titles are not
/// required, only recommended for readability of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub lead: AdvisorSpec,
    pub members: Vec<AdvisorSpec>,
}

impl Roster {
    /// Create a roster, rejecting an empty member list
    pub fn new(lead: AdvisorSpec, members: Vec<AdvisorSpec>) -> Result<Self, DomainError> {
        if members.is_empty() {
            return Err(DomainError::EmptyRoster);
        }
        Ok(Self { lead, members })
    }

    /// Number of member advisors (the lead is not counted)
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Titles of all member advisors, in roster order
    pub fn member_titles(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.title.as_str()).collect()
    }
}
