//! File configuration from TOML.
//!
//! Example configuration:
//!
//! ```toml
//! [panel]
//! category = "Medical"
//!
//! [panel.lead]
//! title = "Attending Physician"
//! expertise = "evidence-based medicine"
//! goal = "synthesize a diagnostic and management plan"
//! role = "team lead and final arbiter"
//!
//! [[panel.members]]
//! title = "Radiology"
//! expertise = "imaging selection and interpretation"
//! goal = "recommend appropriate imaging"
//! role = "radiology"
//!
//! [limits]
//! rate_window_secs = 60
//! rate_max_calls = 3
//! retention = 5
//!
//! [invoker]
//! base_url = "https://api.openai.com/v1"
//! api_key_env = "OPENAI_API_KEY"
//! default_model = "gpt-5-mini"
//!
//! [invoker.aliases]
//! "gpt-5-mini" = "gpt-4.1-nano"
//! ```

use crate::invoker::http::HttpInvokerConfig;
use consilium_application::config::ServiceLimits;
use consilium_domain::{AdvisorSpec, DomainError, Roster};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Configuration problems that prevent startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Panel has no members configured")]
    NoMembers,

    #[error("round_count must be at least 1")]
    ZeroRounds,

    #[error("retention must be at least 1")]
    ZeroRetention,
}

/// One advisor as written in the config file; the model id is assigned
/// at wiring time from `[invoker].default_model`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAdvisor {
    pub title: String,
    pub expertise: String,
    pub goal: String,
    pub role: String,
}

impl FileAdvisor {
    fn to_spec(&self, model: &str) -> AdvisorSpec {
        AdvisorSpec::new(&self.title, &self.expertise, &self.goal, &self.role, model)
    }
}

/// `[panel]` section: the advisory cast and its agenda scaffolding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePanelConfig {
    /// Domain label passed to intake and context providers
    pub category: String,
    pub lead: FileAdvisor,
    pub members: Vec<FileAdvisor>,
    /// Standing agenda questions for every round
    pub questions: Vec<String>,
    /// Standing ground rules for every round
    pub rules: Vec<String>,
}

impl FilePanelConfig {
    /// Build the roster, assigning `model` to every advisor
    pub fn to_roster(&self, model: &str) -> Result<Roster, DomainError> {
        Roster::new(
            self.lead.to_spec(model),
            self.members.iter().map(|m| m.to_spec(model)).collect(),
        )
    }
}

impl Default for FilePanelConfig {
    /// The stock multidisciplinary medical panel
    fn default() -> Self {
        let advisor = |title: &str, expertise: &str, goal: &str, role: &str| FileAdvisor {
            title: title.to_string(),
            expertise: expertise.to_string(),
            goal: goal.to_string(),
            role: role.to_string(),
        };

        Self {
            category: "Medical".to_string(),
            lead: advisor(
                "Attending Physician",
                "evidence-based medicine, multidisciplinary care",
                "synthesize differential diagnosis, diagnostics, and initial management plan \
                 with risks and contingencies. Produce a final consensus under the headings: \
                 Assumptions; Options (pros/cons); Recommendation; Risks & Mitigations; Next \
                 Steps. The Recommendation MUST be a short numbered action plan (3-7 items).",
                "team lead and final arbiter",
            ),
            members: vec![
                advisor(
                    "Emergency Medicine",
                    "triage, resuscitation, stabilization",
                    "prioritize ABCs, immediate stabilization steps, and initial orders",
                    "emergency",
                ),
                advisor(
                    "Internal Medicine",
                    "differential diagnosis, inpatient management",
                    "construct prioritized differential and inpatient plan",
                    "hospitalist",
                ),
                advisor(
                    "Radiology",
                    "imaging selection and interpretation",
                    "recommend appropriate imaging and interpret key findings",
                    "radiology",
                ),
                advisor(
                    "Cardiology",
                    "ACS workup, arrhythmias, heart failure",
                    "assess cardiac risks, tests, and management",
                    "cardiology",
                ),
                advisor(
                    "Insurance Expert",
                    "coverage criteria, prior authorization, coding/billing",
                    "identify coverage constraints, recommend documentation for approvals, \
                     and estimate patient cost",
                    "insurance",
                ),
                advisor(
                    "Clinical Pharmacist",
                    "dosing, interactions, renal/hepatic adjustments",
                    "optimize medications, dosing, and monitoring parameters",
                    "pharmacy",
                ),
            ],
            questions: vec![
                "What are the most likely and must-not-miss diagnoses given the presentation?"
                    .to_string(),
                "What additional history, exam findings, and risk factors are critical to \
                 narrow the differential?"
                    .to_string(),
                "What immediate stabilization steps and precautions are needed, if any?".to_string(),
                "What initial labs and imaging are recommended, with rationale?".to_string(),
                "What evidence-based initial management and disposition are appropriate?"
                    .to_string(),
            ],
            rules: vec![
                "Educational use only; not medical advice. Verify with local guidelines and \
                 supervising clinicians."
                    .to_string(),
                "Prioritize safety: identify red flags, contraindications, and required \
                 monitoring."
                    .to_string(),
                "State diagnostic uncertainty and outline alternatives and contingencies."
                    .to_string(),
                "Cite guideline-aligned recommendations when possible; prefer least-harm \
                 options."
                    .to_string(),
            ],
        }
    }
}

/// `[limits]` section: resource bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLimitsConfig {
    pub rate_window_secs: u64,
    pub rate_max_calls: usize,
    pub cache_ttl_secs: u64,
    pub member_concurrency: usize,
    /// Sessions kept on disk after pruning
    pub retention: usize,
    /// Deliberation rounds per request
    pub round_count: usize,
}

impl Default for FileLimitsConfig {
    fn default() -> Self {
        let limits = ServiceLimits::default();
        Self {
            rate_window_secs: limits.rate_window_secs,
            rate_max_calls: limits.rate_max_calls,
            cache_ttl_secs: limits.cache_ttl_secs,
            member_concurrency: limits.member_concurrency,
            retention: 5,
            round_count: 2,
        }
    }
}

impl FileLimitsConfig {
    pub fn to_service_limits(&self) -> ServiceLimits {
        ServiceLimits {
            rate_window_secs: self.rate_window_secs,
            rate_max_calls: self.rate_max_calls,
            cache_ttl_secs: self.cache_ttl_secs,
            member_concurrency: self.member_concurrency,
        }
    }
}

/// `[invoker]` section: endpoint and model policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInvokerConfig {
    pub base_url: String,
    /// Environment variable holding the bearer token
    pub api_key_env: String,
    pub timeout_secs: u64,
    /// Model assigned to every advisor unless overridden on the CLI
    pub default_model: String,
    /// Compatibility translations applied inside the invoker
    pub aliases: HashMap<String, String>,
}

impl Default for FileInvokerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 120,
            default_model: "gpt-5-mini".to_string(),
            aliases: HashMap::new(),
        }
    }
}

impl FileInvokerConfig {
    /// Resolve to adapter settings, reading the key from the environment
    pub fn to_http_config(&self) -> HttpInvokerConfig {
        HttpInvokerConfig {
            base_url: self.base_url.clone(),
            api_key: std::env::var(&self.api_key_env).ok().filter(|k| !k.is_empty()),
            timeout_secs: self.timeout_secs,
            aliases: self.aliases.clone(),
        }
    }
}

/// `[store]` section: artifact location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    pub dir: String,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            dir: "advisor_sessions".to_string(),
        }
    }
}

/// `[context]` section: enrichment providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileContextConfig {
    pub web_search: bool,
    pub pubmed: bool,
    pub max_results: usize,
}

impl Default for FileContextConfig {
    fn default() -> Self {
        Self {
            web_search: true,
            pubmed: true,
            max_results: 5,
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub panel: FilePanelConfig,
    pub limits: FileLimitsConfig,
    pub invoker: FileInvokerConfig,
    pub store: FileStoreConfig,
    pub context: FileContextConfig,
}

impl FileConfig {
    /// Reject configurations the engine cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.panel.members.is_empty() {
            return Err(ConfigError::NoMembers);
        }
        if self.limits.round_count == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if self.limits.retention == 0 {
            return Err(ConfigError::ZeroRetention);
        }
        Ok(())
    }
}
