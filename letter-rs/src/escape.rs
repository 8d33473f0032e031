//! Text escaping for the two output formats

use askama::{Html, MarkupDisplay};
use std::borrow::Cow;

/// Output format a piece of caller text is embedded into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Markup,
    PlainText,
}

/// Make caller text safe for embedding in `format`
///
/// Markup escaping goes through askama's HTML escaper, which replaces the
/// characters that can change document structure and leaves everything else
/// untouched. Plain text is kept verbatim apart from line-ending
/// normalization and trailing whitespace at line ends. Borrows when nothing
/// needs to change.
pub fn escape(raw: &str, format: Format) -> Cow<'_, str> {
    match format {
        Format::Markup => escape_markup(raw),
        Format::PlainText => normalize_plain(raw),
    }
}

fn escape_markup(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }

    Cow::Owned(MarkupDisplay::new_unsafe(raw, Html).to_string())
}

fn normalize_plain(raw: &str) -> Cow<'_, str> {
    let needs_work = raw.contains('\r')
        || raw
            .split('\n')
            .any(|line| line.ends_with([' ', '\t']));

    if !needs_work {
        return Cow::Borrowed(raw);
    }

    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = unified
        .split('\n')
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect();

    Cow::Owned(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_escapes_structure() {
        assert_eq!(
            escape("<script>alert('x') & \"y\"</script>", Format::Markup),
            "&lt;script&gt;alert(&#x27;x&#x27;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_markup_borrows_clean_text() {
        assert!(matches!(
            escape("Welcome to Acme", Format::Markup),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_markup_keeps_unicode_and_order() {
        assert_eq!(escape("héllo → <b>", Format::Markup), "héllo → &lt;b&gt;");
    }

    #[test]
    fn test_plain_text_verbatim() {
        let raw = "<script>alert('x')</script>";
        assert_eq!(escape(raw, Format::PlainText), raw);
    }

    #[test]
    fn test_plain_text_line_endings() {
        assert_eq!(
            escape("first  \r\nsecond\t\rthird", Format::PlainText),
            "first\nsecond\nthird"
        );
    }

    #[test]
    fn test_plain_text_keeps_inner_whitespace() {
        assert_eq!(escape("  a   b", Format::PlainText), "  a   b");
    }
}
