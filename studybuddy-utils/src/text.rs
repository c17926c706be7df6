use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

/// Truncate a string to at most `max` characters, respecting char boundaries.
pub fn clip_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Remove HTML tags, leaving the text content in place.
pub fn strip_html(text: &str) -> String {
    tag_pattern().replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::{clip_chars, strip_html};

    #[test]
    fn clips_by_characters_not_bytes() {
        assert_eq!(clip_chars("hello", 10), "hello");
        assert_eq!(clip_chars("hello", 3), "hel");
        assert_eq!(clip_chars("héllo", 2), "hé");
        assert_eq!(clip_chars("🧠🧠🧠", 2), "🧠🧠");
    }

    #[test]
    fn clipping_empty_input_is_a_noop() {
        assert_eq!(clip_chars("", 5), "");
        assert_eq!(clip_chars("abc", 0), "");
    }

    #[test]
    fn strips_tags_but_keeps_text() {
        assert_eq!(strip_html("<p>Hi <b>there</b></p>"), "Hi there");
        assert_eq!(strip_html("no tags here"), "no tags here");
        assert_eq!(strip_html("<script>alert(1)</script>"), "alert(1)");
    }
}
