//! Context text handed to the external answer synthesizer.

use equinet_core::QueryResult;

/// Join results into `"text: source"` blocks separated by blank lines, in
/// result order. Each snippet is cut to at most `snippet_chars` characters.
pub fn build_context(results: &[QueryResult], snippet_chars: usize) -> String {
    results
        .iter()
        .map(|r| {
            format!(
                "{}: {}",
                truncate_chars(&r.metadata.text, snippet_chars),
                r.metadata.source
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
