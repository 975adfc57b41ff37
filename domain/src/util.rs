//! Shared utility functions.

/// Return the first `max_chars` characters of `s`, appending an ellipsis
/// when the input was longer. Used for log previews of agendas and model
/// output; counts characters, so multibyte text is never split.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}\u{2026}")
    } else {
        head
    }
}
