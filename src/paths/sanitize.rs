/// Make `s` safe as a single path component.
///
/// Characters that are invalid on Windows or separate paths (`<>:"/\|?*`)
/// and control characters become `_`. Surrounding whitespace is trimmed and a
/// segment made only of dots (`.`, `..`) collapses to the empty string. Other
/// dots are kept, so `To Be Continued...` stays as written.
pub fn sanitize_segment(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = replaced.trim();
    if trimmed.chars().all(|c| c == '.') {
        return String::new();
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_separators_and_reserved_characters() {
        assert_eq!(sanitize_segment("AC/DC"), "AC_DC");
        assert_eq!(sanitize_segment("What? Why: \"Now\""), "What_ Why_ _Now_");
        assert_eq!(sanitize_segment("tab\there"), "tab_here");
    }

    #[test]
    fn trims_whitespace_and_drops_dot_only_segments() {
        assert_eq!(sanitize_segment("  Album  "), "Album");
        assert_eq!(sanitize_segment("To Be Continued..."), "To Be Continued...");
        assert_eq!(sanitize_segment(".."), "");
        assert_eq!(sanitize_segment(" . "), "");
        assert_eq!(sanitize_segment("Vol. 2"), "Vol. 2");
    }

    #[test]
    fn is_idempotent() {
        let once = sanitize_segment(" a/b. . ");
        assert_eq!(sanitize_segment(&once), once);
    }
}
