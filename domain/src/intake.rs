//! Clarifying-question extraction from free-text model responses.
//!
//! Intake calls ask a model for a numbered list of clarifying questions;
//! this module turns the raw response back into structured data. Pure text
//! processing: no I/O, no session state.

/// Extract up to `max` unique questions from a numbered or bulleted list.
///
/// Lines are candidates only when they carry list markup: a leading digit
/// (the `<number>.` token is stripped) or a `- ` / `• ` bullet marker.
/// Candidates are deduplicated by exact match, first occurrence wins, and
/// the result is cut to the first `max` unique entries. Fewer than `max`
/// matches return fewer entries; the list is never padded.
pub fn extract_questions(text: &str, max: usize) -> Vec<String> {
    let mut questions: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let candidate = if line.starts_with(|c: char| c.is_ascii_digit()) {
            // Strip the "<number>." token; a digit-led line without a dot
            // is kept whole (e.g. "3 key unknowns ...").
            match line.split_once('.') {
                Some((_, rest)) => rest.trim(),
                None => line,
            }
        } else if let Some(rest) = line.strip_prefix("- ") {
            rest.trim()
        } else if let Some(rest) = line.strip_prefix("\u{2022} ") {
            rest.trim()
        } else {
            // No recognizable list markup
            continue;
        };

        if candidate.is_empty() {
            continue;
        }

        if !questions.iter().any(|q| q == candidate) {
            questions.push(candidate.to_string());
            if questions.len() == max {
                break;
            }
        }
    }

    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list_with_duplicates() {
        let text = "1. Is it painful?\n2. Since when?\n2. Since when?\n";
        assert_eq!(
            extract_questions(text, 5),
            vec!["Is it painful?".to_string(), "Since when?".to_string()]
        );
    }

    #[test]
    fn test_no_list_markup_yields_empty() {
        let text = "The patient should be asked about onset.\nAlso about medication.";
        assert!(extract_questions(text, 5).is_empty());
    }

    #[test]
    fn test_bullet_markers() {
        let text = "- What medications?\n\u{2022} Any allergies?\n";
        assert_eq!(
            extract_questions(text, 5),
            vec!["What medications?".to_string(), "Any allergies?".to_string()]
        );
    }

    #[test]
    fn test_truncates_to_max() {
        let text = "1. A?\n2. B?\n3. C?\n4. D?\n";
        assert_eq!(extract_questions(text, 2), vec!["A?".to_string(), "B?".to_string()]);
    }

    #[test]
    fn test_blank_and_marker_only_lines_skipped() {
        let text = "\n\n1.\n- \n2. Real question?\n";
        assert_eq!(extract_questions(text, 5), vec!["Real question?".to_string()]);
    }

    #[test]
    fn test_multi_digit_numbering() {
        let text = "10. Tenth question?\n11. Eleventh question?\n";
        assert_eq!(
            extract_questions(text, 5),
            vec!["Tenth question?".to_string(), "Eleventh question?".to_string()]
        );
    }

    #[test]
    fn test_never_pads() {
        let text = "1. Only one?\n";
        assert_eq!(extract_questions(text, 5).len(), 1);
    }
}
