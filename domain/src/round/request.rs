//! Round request entity and its cache fingerprint.

use crate::core::agenda::Agenda;
use crate::core::error::DomainError;
use crate::panel::roster::Roster;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Everything that defines one advisory round (the unit of work)
///
/// Also the cache key material: every field except `session_name`
/// contributes to [`RoundRequest::fingerprint`]. Session naming is a
/// persistence concern and must not split otherwise-identical requests
/// into distinct cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRequest {
    pub agenda: Agenda,
    /// Structured agenda questions the panel should address
    pub questions: Vec<String>,
    /// Ground rules for the discussion
    pub rules: Vec<String>,
    /// Opaque pre-formatted context blocks (clarifications, search highlights)
    pub contexts: Vec<String>,
    /// Number of deliberation rounds (>= 1)
    pub round_count: usize,
    pub roster: Roster,
    /// Caller-chosen persistence name; excluded from the fingerprint
    pub session_name: String,
}

/// Serialization view for fingerprinting; field order is the digest layout.
#[derive(Serialize)]
struct FingerprintView<'a> {
    agenda: &'a Agenda,
    questions: &'a [String],
    rules: &'a [String],
    contexts: &'a [String],
    round_count: usize,
    roster: &'a Roster,
}

impl RoundRequest {
    /// Create a request with defaults: one round, no extra sections
    pub fn new(agenda: Agenda, roster: Roster) -> Self {
        Self {
            agenda,
            questions: Vec::new(),
            rules: Vec::new(),
            contexts: Vec::new(),
            round_count: 1,
            roster,
            session_name: String::new(),
        }
    }

    pub fn with_questions(mut self, questions: Vec<String>) -> Self {
        self.questions = questions;
        self
    }

    pub fn with_rules(mut self, rules: Vec<String>) -> Self {
        self.rules = rules;
        self
    }

    /// Attach context blocks, dropping empty contributions
    pub fn with_contexts(mut self, contexts: Vec<String>) -> Self {
        self.contexts = contexts.into_iter().filter(|c| !c.trim().is_empty()).collect();
        self
    }

    pub fn with_round_count(mut self, round_count: usize) -> Result<Self, DomainError> {
        if round_count == 0 {
            return Err(DomainError::InvalidRoundCount(round_count));
        }
        self.round_count = round_count;
        Ok(self)
    }

    pub fn with_session_name(mut self, name: impl Into<String>) -> Self {
        self.session_name = name.into();
        self
    }

    /// Deterministic digest of every substantive field
    ///
    /// `session_name` is deliberately left out: two rounds with identical
    /// substantive input but different session names are the same
    /// computation.
    pub fn fingerprint(&self) -> String {
        let view = FingerprintView {
            agenda: &self.agenda,
            questions: &self.questions,
            rules: &self.rules,
            contexts: &self.contexts,
            round_count: self.round_count,
            roster: &self.roster,
        };
        // Struct and Vec serialization order is deterministic, so the JSON
        // bytes are a canonical encoding of the view.
        let bytes = serde_json::to_vec(&view).expect("fingerprint view serializes");
        encode_hex(Sha256::digest(&bytes).as_slice())
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::advisor::AdvisorSpec;

    fn advisor(title: &str) -> AdvisorSpec {
        AdvisorSpec::new(title, "expertise", "goal", "role", "gpt-5-mini")
    }

    fn request() -> RoundRequest {
        let roster = Roster::new(advisor("Lead"), vec![advisor("A"), advisor("B")]).unwrap();
        RoundRequest::new(Agenda::new("chest pain case").unwrap(), roster)
            .with_questions(vec!["What is the differential?".into()])
            .with_rules(vec!["State uncertainty.".into()])
            .with_contexts(vec!["Web highlights: ...".into()])
    }

    #[test]
    fn test_session_name_excluded_from_fingerprint() {
        let a = request().with_session_name("round_00001");
        let b = request().with_session_name("round_00042");
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_context_change_alters_fingerprint() {
        let a = request();
        let b = request().with_contexts(vec!["different highlights".into()]);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_roster_change_alters_fingerprint() {
        let a = request();
        let mut b = request();
        b.roster.members[0].expertise = "something else".into();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_round_count_change_alters_fingerprint() {
        let a = request();
        let b = request().with_round_count(2).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_zero_round_count_rejected() {
        let result = request().with_round_count(0);
        assert!(matches!(result, Err(DomainError::InvalidRoundCount(0))));
    }

    #[test]
    fn test_empty_contexts_dropped() {
        let req = request().with_contexts(vec!["".into(), "  ".into(), "kept".into()]);
        assert_eq!(req.contexts, vec!["kept".to_string()]);
    }
}
