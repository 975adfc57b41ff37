//! Prompt templates for the advisory round flow

use crate::panel::advisor::AdvisorSpec;

/// The two fixed guardrail clauses appended to advisor system prompts.
///
/// The engine treats these as opaque caller-supplied text; the defaults
/// ship the stock wording so an unconfigured panel still behaves sensibly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guardrails {
    /// Advisors must advise, not only critique
    pub advice_rule: String,
    /// Recommendations must be a concrete numbered action plan
    pub actionability_rule: String,
}

impl Default for Guardrails {
    fn default() -> Self {
        Self {
            advice_rule: "Advisors must provide actionable advice (specific actions and why), \
                not just critique. Include at least one concrete recommended action and an \
                alternative with tradeoffs, when applicable."
                .to_string(),
            actionability_rule: "Recommendation must be a numbered action plan (3-7 items). \
                For each action, specify: Action, Owner, Deadline, Steps, Tools/Resources, \
                Success Metric, Risk & Mitigation. Avoid vague language."
                .to_string(),
        }
    }
}

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for one member advisor
    pub fn member_system(spec: &AdvisorSpec, guardrails: &Guardrails) -> String {
        format!(
            "You are {}. Expertise: {}. Goal: {}. {} {}",
            spec.title, spec.expertise, spec.goal, guardrails.advice_rule, guardrails.actionability_rule
        )
    }

    /// User prompt shared by all member advisors in one round
    pub fn member_user(
        agenda: &str,
        questions: &[String],
        rules: &[String],
        contexts: &[String],
    ) -> String {
        let mut prompt = format!("Agenda:\n{}\n\n", agenda);

        if !questions.is_empty() {
            prompt.push_str("Questions to address:\n");
            for question in questions {
                prompt.push_str(&format!("- {}\n", question));
            }
            prompt.push('\n');
        }

        if !rules.is_empty() {
            prompt.push_str("Ground rules:\n");
            for rule in rules {
                prompt.push_str(&format!("- {}\n", rule));
            }
            prompt.push('\n');
        }

        if !contexts.is_empty() {
            prompt.push_str(&format!("Context:\n{}\n\n", contexts.join("\n\n")));
        }

        prompt.push_str("Provide your actionable advice now. Be concise.");
        prompt
    }

    /// System prompt for the lead synthesis call
    pub fn lead_system(lead: &AdvisorSpec, guardrails: &Guardrails) -> String {
        format!(
            "You are {}. Expertise: {}. Goal: {}. {}",
            lead.title, lead.expertise, lead.goal, guardrails.actionability_rule
        )
    }

    /// User prompt for the lead synthesis call.
    ///
    /// `member_outputs` carries only usable opinions, tagged by roster
    /// position (zero-based; rendered one-based).
    pub fn lead_user(
        agenda: &str,
        contexts: &[String],
        member_outputs: &[(usize, &str)],
    ) -> String {
        let mut prompt = format!("Agenda:\n{}\n\n", agenda);

        if !contexts.is_empty() {
            prompt.push_str(&format!("Context:\n{}\n\n", contexts.join("\n\n")));
        }

        if !member_outputs.is_empty() {
            prompt.push_str("Team member advice:\n");
            for (position, output) in member_outputs {
                prompt.push_str(&format!("[member {}]\n{}\n\n", position + 1, output));
            }
        }

        prompt.push_str("Produce the final consensus in markdown.");
        prompt
    }

    /// System prompt for the clarifying-questions intake call
    pub fn intake_system() -> &'static str {
        "You are a domain intake assistant for a multi-agent advisor. Read the user's case \
         description and draft concise clarifying questions to remove ambiguity and capture \
         missing critical details for the specified domain. Do not answer the questions. \
         Return exactly the requested number of questions, strictly as a numbered list \
         (1., 2., 3., ...) with no preamble or commentary."
    }

    /// User prompt for the clarifying-questions intake call
    pub fn intake_user(case_text: &str, max_questions: usize, category: &str) -> String {
        format!(
            "Domain/category: {}\n\nCase description:\n\n{}\n\nReturn exactly {} clarifying \
             questions, numbered 1..{}.",
            category, case_text, max_questions, max_questions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advisor() -> AdvisorSpec {
        AdvisorSpec::new(
            "Clinical Pharmacist",
            "dosing, interactions",
            "optimize medications",
            "pharmacy",
            "gpt-5-mini",
        )
    }

    #[test]
    fn test_member_system_carries_guardrails() {
        let prompt = PromptTemplate::member_system(&advisor(), &Guardrails::default());
        assert!(prompt.starts_with("You are Clinical Pharmacist."));
        assert!(prompt.contains("not just critique"));
        assert!(prompt.contains("numbered action plan"));
    }

    #[test]
    fn test_member_user_sections() {
        let prompt = PromptTemplate::member_user(
            "chest pain",
            &["What is the differential?".into()],
            &["State uncertainty.".into()],
            &["Web highlights".into(), "PubMed highlights".into()],
        );
        assert!(prompt.starts_with("Agenda:\nchest pain"));
        assert!(prompt.contains("- What is the differential?"));
        assert!(prompt.contains("- State uncertainty."));
        assert!(prompt.contains("Web highlights\n\nPubMed highlights"));
        assert!(prompt.ends_with("Provide your actionable advice now. Be concise."));
    }

    #[test]
    fn test_member_user_omits_empty_sections() {
        let prompt = PromptTemplate::member_user("case", &[], &[], &[]);
        assert!(!prompt.contains("Questions to address"));
        assert!(!prompt.contains("Ground rules"));
        assert!(!prompt.contains("Context:"));
    }

    #[test]
    fn test_lead_system_uses_actionability_only() {
        let guardrails = Guardrails::default();
        let prompt = PromptTemplate::lead_system(&advisor(), &guardrails);
        assert!(prompt.contains(&guardrails.actionability_rule));
        assert!(!prompt.contains("not just critique"));
    }

    #[test]
    fn test_lead_user_tags_members_by_position() {
        let prompt = PromptTemplate::lead_user(
            "case",
            &[],
            &[(0, "first opinion"), (2, "third opinion")],
        );
        assert!(prompt.contains("[member 1]\nfirst opinion"));
        assert!(prompt.contains("[member 3]\nthird opinion"));
        assert!(!prompt.contains("[member 2]"));
        assert!(prompt.ends_with("Produce the final consensus in markdown."));
    }

    #[test]
    fn test_lead_user_without_advice_block() {
        let prompt = PromptTemplate::lead_user("case", &[], &[]);
        assert!(!prompt.contains("Team member advice"));
    }

    #[test]
    fn test_intake_user_format() {
        let prompt = PromptTemplate::intake_user("sore throat for a week", 5, "Medical");
        assert!(prompt.contains("Domain/category: Medical"));
        assert!(prompt.contains("sore throat for a week"));
        assert!(prompt.contains("Return exactly 5 clarifying questions, numbered 1..5."));
    }
}
