//! Filename sanitization.

/// Replacement for characters outside the safe set.
const REPLACEMENT: char = '_';

/// Whether a character may appear in a substituted path component.
fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Sanitize a value substituted into an output path.
///
/// Keeps `[A-Za-z0-9._-]` and replaces everything else (including path
/// separators) with `_`. A value that is empty or made only of dots becomes
/// `_`, so no substituted value can climb out of the output directory.
pub fn sanitize_component(value: &str) -> String {
    let sanitized: String = value
        .chars()
        .map(|c| if is_safe_char(c) { c } else { REPLACEMENT })
        .collect();

    if sanitized.chars().all(|c| c == '.') {
        return REPLACEMENT.to_string();
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_component("ABC123"), "ABC123");
        assert_eq!(sanitize_component("some_user-01.jpg"), "some_user-01.jpg");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_component("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_component("file:name?.txt"), "file_name_.txt");
        assert_eq!(sanitize_component("tab\there"), "tab_here");
        assert_eq!(sanitize_component("üï"), "__");
        assert_eq!(sanitize_component("ünï"), "_n_");
    }

    #[test]
    fn test_sanitize_path_traversal() {
        assert_eq!(sanitize_component(".."), "_");
        assert_eq!(sanitize_component("."), "_");
        assert_eq!(sanitize_component("../etc"), ".._etc");
        assert!(!sanitize_component("../etc").contains('/'));
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_component(""), "_");
    }
}
