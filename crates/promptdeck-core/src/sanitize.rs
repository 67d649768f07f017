//! Input sanitization helpers.

/// Trim surrounding whitespace and escape HTML-significant characters.
///
/// Escapes `&`, `<`, `>`, `"`, and `'` to their entity forms so instruction
/// text can be echoed into markup contexts unchanged. Alphabetic content is
/// preserved; the transform is pure and deterministic.
pub fn sanitize(input: &str) -> String {
    let trimmed = input.trim();
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::sanitize;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_markup_and_keeps_text() {
        assert_eq!(sanitize("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn escapes_quotes_and_ampersands() {
        assert_eq!(sanitize(r#"say "hi" & 'bye'"#), "say &quot;hi&quot; &amp; &#039;bye&#039;");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(sanitize("  a poem  "), "a poem");
        assert_eq!(sanitize(" \t\n "), "");
    }

    #[test]
    fn is_deterministic() {
        let input = "  <i>same & same</i> ";
        assert_eq!(sanitize(input), sanitize(input));
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(sanitize("a poem about rust"), "a poem about rust");
    }
}
