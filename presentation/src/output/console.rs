//! Console output formatter for round results

use colored::Colorize;
use consilium_domain::RoundResult;

/// Formats round results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete round: every opinion plus the consensus
    pub fn format(result: &RoundResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Advisory Panel Results ===".cyan().bold()
        ));

        output.push_str(&format!(
            "{} {}\n\n",
            "Agenda:".cyan().bold(),
            result.request.agenda
        ));

        output.push_str(&format!(
            "{} {}\n",
            "Panel:".cyan().bold(),
            result
                .request
                .roster
                .member_titles()
                .join(", ")
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Lead:".cyan().bold(),
            result.request.roster.lead.title
        ));

        output.push_str(&format!("{}\n", "--- Advisor Opinions ---".bold()));
        for member in &result.member_results {
            if member.failed {
                output.push_str(&format!(
                    "\n{}\n(no opinion produced)\n",
                    format!("-- {} --", member.spec.title).red().bold()
                ));
            } else {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("-- {} --", member.spec.title).yellow().bold(),
                    member.output
                ));
            }
        }

        output.push_str(&format!("\n{}\n\n", "--- Consensus Summary ---".bold()));
        output.push_str(&result.summary_markdown);
        output.push('\n');

        if !result.request.session_name.is_empty() {
            output.push_str(&format!(
                "\n{} {}\n",
                "Session:".cyan().bold(),
                result.request.session_name
            ));
        }

        output
    }

    /// Format only the consensus summary (concise output)
    pub fn format_summary_only(result: &RoundResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Consensus Summary ===".cyan().bold()
        ));
        output.push_str(&result.summary_markdown);
        output.push('\n');

        let failed = result.failed_count();
        if failed > 0 {
            output.push_str(&format!(
                "\n{}\n",
                format!("({failed} advisor(s) produced no opinion)").yellow()
            ));
        }
        if !result.request.session_name.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Session:".cyan().bold(),
                result.request.session_name
            ));
        }

        output
    }

    /// Format as JSON (the lossless record)
    pub fn format_json(result: &RoundResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a clarifying-question list
    pub fn format_questions(questions: &[String]) -> String {
        if questions.is_empty() {
            return "No clarifying questions were produced.".to_string();
        }
        let mut output = format!("{}\n\n", "=== Clarifying Questions ===".cyan().bold());
        for (i, question) in questions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, question));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consilium_domain::{Agenda, AdvisorSpec, MemberResult, Roster, RoundRequest};

    fn result() -> RoundResult {
        let lead = AdvisorSpec::new("Attending", "EBM", "synthesize", "lead", "gpt-5-mini");
        let ok = AdvisorSpec::new("Radiology", "imaging", "recommend", "radiology", "gpt-5-mini");
        let bad = AdvisorSpec::new("Cardiology", "ACS", "assess", "cardiology", "gpt-5-mini");
        let roster = Roster::new(lead, vec![ok.clone(), bad.clone()]).unwrap();
        let request = RoundRequest::new(Agenda::new("chest pain").unwrap(), roster)
            .with_session_name("round_00002");
        RoundResult::new(
            "### Recommendation\n1. Obtain ECG",
            vec![
                MemberResult::success(ok, "order a CT"),
                MemberResult::failure(bad),
            ],
            request,
        )
    }

    #[test]
    fn test_full_format_shows_opinions_and_failures() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&result());
        assert!(text.contains("Agenda: chest pain"));
        assert!(text.contains("-- Radiology --"));
        assert!(text.contains("order a CT"));
        assert!(text.contains("-- Cardiology --"));
        assert!(text.contains("(no opinion produced)"));
        assert!(text.contains("Session: round_00002"));
    }

    #[test]
    fn test_summary_format_reports_failures() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_summary_only(&result());
        assert!(text.contains("### Recommendation"));
        assert!(text.contains("1 advisor(s) produced no opinion"));
        assert!(!text.contains("order a CT"));
    }

    #[test]
    fn test_json_format_round_trips() {
        let text = ConsoleFormatter::format_json(&result());
        let back: RoundResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back.member_results.len(), 2);
    }

    #[test]
    fn test_question_list_format() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_questions(&["A?".to_string(), "B?".to_string()]);
        assert!(text.contains("1. A?"));
        assert!(text.contains("2. B?"));

        let empty = ConsoleFormatter::format_questions(&[]);
        assert!(empty.contains("No clarifying questions"));
    }
}
