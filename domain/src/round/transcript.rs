//! Transcript rendering for the persisted human-readable artifact.

use crate::round::value_objects::RoundResult;

/// Render the human-readable session document for a completed round.
///
/// This is the `.md` artifact external viewers read: agenda, context
/// blocks, the panel line-up, and the consensus document. The lossless
/// structured record lives in the companion `.json` artifact.
pub fn render_transcript(result: &RoundResult) -> String {
    let request = &result.request;
    let mut doc = String::new();

    doc.push_str("# Advisory Panel — Transcript\n\n");

    doc.push_str("## Agenda\n\n");
    doc.push_str(request.agenda.text().trim());
    doc.push_str("\n\n");

    for (i, context) in request.contexts.iter().enumerate() {
        doc.push_str(&format!("## Context {}\n\n{}\n\n", i + 1, context.trim()));
    }

    doc.push_str("## Panel\n\n");
    doc.push_str(&format!("- Lead: {}\n", request.roster.lead.title));
    for member in &request.roster.members {
        doc.push_str(&format!("- {}\n", member.title));
    }
    doc.push('\n');

    doc.push_str("## Consensus Summary\n\n");
    doc.push_str(&result.summary_markdown);
    doc.push('\n');

    doc
}
