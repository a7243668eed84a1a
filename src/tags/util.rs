//! Small parsing helpers shared by tag reading and writing.

/// Parse strings like:
/// - "3" -> ("3", "")
/// - "3/12" -> ("3", "12")
/// - " 03 / 12 " -> ("3", "12")
///
/// Non-numeric parts are dropped.
pub fn parse_slash_pair(s: &str) -> (String, String) {
    let mut parts = s.split('/');
    let number = |p: Option<&str>| {
        p.and_then(|p| p.trim().parse::<u32>().ok())
            .map(|n| n.to_string())
            .unwrap_or_default()
    };
    let a = number(parts.next());
    let b = number(parts.next());
    (a, b)
}

/// The leading four-digit year of a date-ish string ("2019", "2019-05-01").
pub fn year_of(s: &str) -> String {
    let s = s.trim();
    let digits: String = s.chars().take(4).collect();
    if digits.len() == 4
        && digits.chars().all(|c| c.is_ascii_digit())
        && s.chars().nth(4).is_none_or(|c| !c.is_ascii_digit())
    {
        digits
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_pairs() {
        assert_eq!(parse_slash_pair("3"), ("3".into(), String::new()));
        assert_eq!(parse_slash_pair("3/12"), ("3".into(), "12".into()));
        assert_eq!(parse_slash_pair(" 03 / 12 "), ("3".into(), "12".into()));
        assert_eq!(parse_slash_pair(""), (String::new(), String::new()));
        assert_eq!(parse_slash_pair("A/B"), (String::new(), String::new()));
    }

    #[test]
    fn years_from_dates() {
        assert_eq!(year_of("2019"), "2019");
        assert_eq!(year_of("2019-05-01"), "2019");
        assert_eq!(year_of("20190"), "");
        assert_eq!(year_of("19"), "");
        assert_eq!(year_of(""), "");
    }
}
