pub mod auth;
pub mod cart;
pub mod categories;
pub mod orders;
pub mod products;

/// Collapse runs of whitespace and trim the ends. Used for names and other
/// single-line fields.
pub(crate) fn sanitize_inline_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim a free-text field while keeping internal line breaks.
pub(crate) fn sanitize_multiline_text(value: &str) -> String {
    value.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_collapses_whitespace() {
        assert_eq!(sanitize_inline_text("  Desk\t Lamp  "), "Desk Lamp");
        assert_eq!(sanitize_inline_text("   "), "");
    }

    #[test]
    fn multiline_text_keeps_line_breaks() {
        assert_eq!(sanitize_multiline_text(" a\nb "), "a\nb");
    }
}
