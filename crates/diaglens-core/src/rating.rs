//! Rating extraction from analysis text.

use std::sync::LazyLock;

use regex::Regex;

// Flexible enough to catch variations like "**Overall Rating: 8/10**".
static RATING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\*\*)?Overall Rating:\s*(\d+)/10(?:\*\*)?").expect("Invalid regex")
});

/// Extract an "Overall Rating: N/10" score from assistant text.
///
/// Returns `None` when no rating is present or the value falls outside 1-10.
pub fn parse_rating(content: &str) -> Option<u8> {
    let captures = RATING_PATTERN.captures(content)?;
    let value: u8 = captures.get(1)?.as_str().parse().ok()?;
    (1..=10).contains(&value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_rating() {
        assert_eq!(parse_rating("Overall Rating: 8/10"), Some(8));
    }

    #[test]
    fn test_parses_bold_and_case_variants() {
        assert_eq!(parse_rating("**Overall Rating: 7/10**"), Some(7));
        assert_eq!(parse_rating("overall rating: 10/10"), Some(10));
    }

    #[test]
    fn test_parses_rating_inside_longer_text() {
        let text = "The design is sound.\n\n**Overall Rating: 6/10** - room to improve.";
        assert_eq!(parse_rating(text), Some(6));
    }

    #[test]
    fn test_rejects_out_of_range_or_missing() {
        assert_eq!(parse_rating("Overall Rating: 0/10"), None);
        assert_eq!(parse_rating("Overall Rating: 11/10"), None);
        assert_eq!(parse_rating("no rating here"), None);
        assert_eq!(parse_rating("Rating: 8/10"), None);
    }
}
