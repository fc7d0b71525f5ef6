use similar::{ChangeTag, TextDiff};

use crate::formatter::{format_sql, SqlFormatOptions};

/// Whether the source is already in the formatter's output form.
/// Empty input counts as formatted (there is nothing to do).
pub fn sql_is_formatted(source: &str, options: &SqlFormatOptions) -> bool {
    match format_sql(source, options) {
        Some(formatted) => source.trim() == formatted,
        None => true,
    }
}

/// Render a unified line diff between original and formatted text.
pub fn render_diff(original: &str, formatted: &str) -> String {
    let diff = TextDiff::from_lines(original, formatted);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        out.push_str(sign);
        out.push_str(change.value());
        if !change.value().ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
