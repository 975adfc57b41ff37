//! Context provider port
//!
//! External enrichment sources (web search, literature search) contribute
//! one opaque pre-formatted text block per round. The engine never parses
//! these blocks; it only joins them into prompts.

use async_trait::async_trait;

/// One optional source of shared context for a round
///
/// Implementations must swallow their own failures and return an empty
/// string to signal "no contribution". A broken provider must never
/// break a round.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Produce a pre-formatted context block for the case, or empty string
    async fn gather(&self, case_text: &str, category: &str) -> String;
}
