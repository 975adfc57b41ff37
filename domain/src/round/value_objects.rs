//! Round value objects - immutable result types for advisory rounds.
//!
//! These types represent the outputs of one round:
//! - [`MemberResult`] - One member advisor's opinion (or recorded failure)
//! - [`RoundResult`] - The complete round: consensus summary plus all
//!   member results, with the originating request echoed for persistence

use crate::panel::advisor::AdvisorSpec;
use crate::round::request::RoundRequest;
use serde::{Deserialize, Serialize};

/// Summary used when the lead synthesis call fails or returns nothing.
/// A round is structurally complete even then.
pub const FALLBACK_SUMMARY: &str = "(No summary generated)";

/// Opinion produced by a single member advisor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResult {
    /// The advisor that produced this result
    pub spec: AdvisorSpec,
    /// The opinion text; empty when the invocation failed
    pub output: String,
    /// Whether the invocation failed (transport error or empty response)
    pub failed: bool,
}

impl MemberResult {
    /// Record a successful opinion
    pub fn success(spec: AdvisorSpec, output: impl Into<String>) -> Self {
        Self {
            spec,
            output: output.into(),
            failed: false,
        }
    }

    /// Record a failed invocation; the failure never aborts the round
    pub fn failure(spec: AdvisorSpec) -> Self {
        Self {
            spec,
            output: String::new(),
            failed: true,
        }
    }

    /// True when the opinion is usable for synthesis
    pub fn is_usable(&self) -> bool {
        !self.failed && !self.output.trim().is_empty()
    }
}

/// Complete result of one advisory round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResult {
    /// The lead's consensus document (markdown), or [`FALLBACK_SUMMARY`]
    pub summary_markdown: String,
    /// One entry per roster member, in roster order
    pub member_results: Vec<MemberResult>,
    /// The originating request, echoed for lossless persistence
    pub request: RoundRequest,
}

impl RoundResult {
    pub fn new(
        summary_markdown: impl Into<String>,
        member_results: Vec<MemberResult>,
        request: RoundRequest,
    ) -> Self {
        let summary = summary_markdown.into();
        Self {
            summary_markdown: if summary.trim().is_empty() {
                FALLBACK_SUMMARY.to_string()
            } else {
                summary
            },
            member_results,
            request,
        }
    }

    /// Member results that produced usable opinions, with roster positions
    pub fn usable_results(&self) -> impl Iterator<Item = (usize, &MemberResult)> {
        self.member_results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_usable())
    }

    /// Number of failed member invocations
    pub fn failed_count(&self) -> usize {
        self.member_results.iter().filter(|r| r.failed).count()
    }

    /// True when synthesis fell back to the placeholder
    pub fn is_fallback(&self) -> bool {
        self.summary_markdown == FALLBACK_SUMMARY
    }
}
