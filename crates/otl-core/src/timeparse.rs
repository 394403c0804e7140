use chrono::NaiveTime;

/// Textual encodings accepted for a time cell, tried in order. The last
/// entry stands in for the original locale-default representation, which
/// resolves to `HH:MM:SS` under the C locale.
pub const ACCEPTED_FORMATS: [&str; 4] = ["%H:%M", "%I:%M:%S %p", "%I:%M %p", "%H:%M:%S"];

/// Canonical output encoding: zero-padded 24-hour `HH:MM`
pub const CANONICAL_FORMAT: &str = "%H:%M";

/// Parse a time-of-day cell, trying each accepted format in order.
/// Returns `None` for blank or unparseable input; the caller decides
/// whether that warrants a warning.
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
}

/// Parse a time cell and re-encode it canonically (`HH:MM`, 24h)
pub fn canonicalize(text: &str) -> Option<String> {
    parse_time_of_day(text).map(|time| time.format(CANONICAL_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_24h_passes_through() {
        assert_eq!(canonicalize("14:05").unwrap(), "14:05");
        assert_eq!(canonicalize("08:00").unwrap(), "08:00");
    }

    #[test]
    fn test_12h_converts() {
        assert_eq!(canonicalize("2:30 PM").unwrap(), "14:30");
        assert_eq!(canonicalize("12:15 AM").unwrap(), "00:15");
        assert_eq!(canonicalize("12:00 PM").unwrap(), "12:00");
    }

    #[test]
    fn test_12h_with_seconds_converts() {
        assert_eq!(canonicalize("2:30:00 PM").unwrap(), "14:30");
    }

    #[test]
    fn test_24h_with_seconds_converts() {
        assert_eq!(canonicalize("09:45:30").unwrap(), "09:45");
    }

    #[test]
    fn test_unpadded_hour_is_zero_padded() {
        assert_eq!(canonicalize("7:05").unwrap(), "07:05");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(canonicalize(" 08:00 ").unwrap(), "08:00");
    }

    #[test]
    fn test_blank_is_none() {
        assert!(canonicalize("").is_none());
        assert!(canonicalize("   ").is_none());
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(canonicalize("noon").is_none());
        assert!(canonicalize("25:00").is_none());
        assert!(canonicalize("8").is_none());
    }
}
