//! Advisor specification value object

use serde::{Deserialize, Serialize};

/// One advisor role on the panel (Value Object)
///
/// All fields are opaque text from the engine's perspective except `model`,
/// which selects the invoker backend used for this advisor's calls.
/// Immutable once a round starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorSpec {
    /// Display title, e.g. "Clinical Pharmacist"
    pub title: String,
    /// Free-text expertise summary
    pub expertise: String,
    /// What this advisor is asked to accomplish
    pub goal: String,
    /// Short role tag, e.g. "pharmacy"
    pub role: String,
    /// Model identifier passed to the invoker
    pub model: String,
}

impl AdvisorSpec {
    pub fn new(
        title: impl Into<String>,
        expertise: impl Into<String>,
        goal: impl Into<String>,
        role: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            expertise: expertise.into(),
            goal: goal.into(),
            role: role.into(),
            model: model.into(),
        }
    }

    /// Return a copy with a different model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl std::fmt::Display for AdvisorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisor_display() {
        let spec = AdvisorSpec::new(
            "Radiology",
            "imaging selection and interpretation",
            "recommend appropriate imaging",
            "radiology",
            "gpt-5-mini",
        );
        assert_eq!(spec.to_string(), "Radiology (radiology)");
    }

    #[test]
    fn test_with_model() {
        let spec = AdvisorSpec::new("Cardiology", "ACS workup", "assess cardiac risks", "cardiology", "gpt-5-mini")
            .with_model("gpt-4.1");
        assert_eq!(spec.model, "gpt-4.1");
        assert_eq!(spec.title, "Cardiology");
    }
}
