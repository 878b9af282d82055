//! Utility functions shared across the codebase.

use std::path::Path;

use crate::constants::TRUNCATION_MARKER;

/// Shorten a path for display by replacing the home directory with `~`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use cityclock::utils::path_for_display;
/// assert_eq!(path_for_display(Path::new("/etc/cities.json")), "/etc/cities.json");
/// ```
pub fn path_for_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

/// Cut `text` to at most `max_chars` characters, appending `…` when cut.
///
/// Counting is by Unicode scalar value, so multi-byte scripts are never split
/// mid-character. Trailing whitespace left at the cut point is dropped before
/// the marker is appended.
///
/// # Examples
/// ```
/// use cityclock::utils::truncate_with_marker;
/// assert_eq!(truncate_with_marker("Tokyo", 10), "Tokyo");
/// assert_eq!(truncate_with_marker("Tokyo is big", 6), "Tokyo…");
/// ```
pub fn truncate_with_marker(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(max_chars).collect();
    cut.truncate(cut.trim_end().len());
    cut.push(TRUNCATION_MARKER);
    cut
}

/// Replace line breaks with spaces and trim the ends.
pub fn flatten_lines(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_truncate_short_text_verbatim() {
        assert_eq!(truncate_with_marker("abcde", 10), "abcde");
    }

    #[test]
    fn test_truncate_exact_length_verbatim() {
        assert_eq!(truncate_with_marker("abcdefghij", 10), "abcdefghij");
    }

    #[test]
    fn test_truncate_long_text() {
        let text = "a".repeat(50);
        let result = truncate_with_marker(&text, 10);
        assert_eq!(result.chars().count(), 11);
        assert!(result.ends_with('…'));
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "東京は日本の首都であり、世界最大級の都市圏を形成している。";
        let result = truncate_with_marker(text, 5);
        assert_eq!(result, "東京は日本…");
    }

    #[test]
    fn test_truncate_drops_trailing_space_at_cut() {
        assert_eq!(truncate_with_marker("Paris is nice", 6), "Paris…");
    }

    #[test]
    fn test_flatten_lines() {
        assert_eq!(flatten_lines("  line one\nline two\r\nthree \n"), "line one line two three");
    }

    #[test]
    fn test_path_for_display_outside_home() {
        assert_eq!(
            path_for_display(Path::new("/nonexistent-root/cities.json")),
            "/nonexistent-root/cities.json"
        );
    }

    proptest! {
        #[test]
        fn truncation_never_exceeds_budget(text in "\\PC{0,200}", max in 1usize..100) {
            let result = truncate_with_marker(&text, max);
            prop_assert!(result.chars().count() <= max + 1);
            if text.chars().count() <= max {
                prop_assert_eq!(result, text);
            } else {
                prop_assert!(result.ends_with('…'));
            }
        }
    }
}
