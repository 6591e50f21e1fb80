//! Unicode helpers for decoding input and displaying text.

use unicode_segmentation::UnicodeSegmentation;

/// Validates that a byte slice is valid UTF-8.
///
/// # Errors
///
/// Returns the byte offset of the first invalid UTF-8 sequence.
pub fn validate_utf8(bytes: &[u8]) -> std::result::Result<&str, usize> {
    std::str::from_utf8(bytes).map_err(|e| e.valid_up_to())
}

/// Strips a leading UTF-8 byte order mark, if present.
#[must_use]
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}

/// Counts the number of grapheme clusters in a string.
///
/// # Examples
///
/// ```
/// use studypack::io::unicode::grapheme_count;
///
/// assert_eq!(grapheme_count("Hello"), 5);
/// assert_eq!(grapheme_count("e\u{301}"), 1);
/// ```
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Truncates a string at a grapheme cluster boundary.
#[must_use]
pub fn truncate_graphemes(s: &str, max_graphemes: usize) -> &str {
    let end_byte = s
        .grapheme_indices(true)
        .nth(max_graphemes)
        .map_or(s.len(), |(pos, _)| pos);
    &s[..end_byte]
}

/// Single-line preview of text for terminal output.
///
/// Whitespace runs (including newlines) collapse to one space and the
/// result is cut to `max_graphemes`, with `...` appended when cut.
///
/// # Examples
///
/// ```
/// use studypack::io::preview;
///
/// assert_eq!(preview("One.\n\nTwo.", 20), "One. Two.");
/// assert_eq!(preview("abcdefgh", 4), "abcd...");
/// ```
#[must_use]
pub fn preview(text: &str, max_graphemes: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated = truncate_graphemes(&collapsed, max_graphemes);
    if truncated.len() < collapsed.len() {
        format!("{truncated}...")
    } else {
        collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_utf8() {
        assert_eq!(validate_utf8(b"plain"), Ok("plain"));
        assert_eq!(validate_utf8(b"ok\xffbad"), Err(2));
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{FEFF}Title"), "Title");
        assert_eq!(strip_bom("Title"), "Title");
    }

    #[test]
    fn test_grapheme_count_combining() {
        // e + combining acute accent
        assert_eq!(grapheme_count("caf\u{0065}\u{0301}"), 4);
        assert_eq!(grapheme_count(""), 0);
    }

    #[test]
    fn test_truncate_graphemes() {
        assert_eq!(truncate_graphemes("Hello", 3), "Hel");
        assert_eq!(truncate_graphemes("Hello", 10), "Hello");
        assert_eq!(truncate_graphemes("世界世界", 2), "世界");
        assert_eq!(truncate_graphemes("e\u{301}x", 1), "e\u{301}");
        assert_eq!(truncate_graphemes("abc", 0), "");
    }

    #[test]
    fn test_preview_collapses_whitespace() {
        assert_eq!(preview("  a\n\nb\tc  ", 80), "a b c");
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("Paragraph one text.", 9), "Paragraph...");
        assert_eq!(preview("short", 5), "short");
    }
}
