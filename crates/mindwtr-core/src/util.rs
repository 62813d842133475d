//! Shared utility functions used across multiple modules.

use chrono::{DateTime, SecondsFormat, Utc};

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Current UTC time as an ISO-8601 / RFC 3339 string.
///
/// This is the representation every entity timestamp uses on the wire.
pub fn now_iso() -> String {
    // Millisecond precision with a Z suffix, the same shape the editing
    // clients produce.
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO-8601 timestamp to epoch milliseconds.
///
/// Entity timestamps are produced by the editing layer and assumed parseable;
/// an unparseable value sorts as the epoch so it always loses a merge.
pub fn parse_timestamp_ms(value: &str) -> i64 {
    DateTime::parse_from_rfc3339(value).map_or(0, |parsed| parsed.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" https://example.com ".to_string())),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn is_http_url_accepts_valid_schemes() {
        assert!(is_http_url("http://localhost"));
        assert!(is_http_url("https://example.com"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("example.com"));
    }

    #[test]
    fn parse_timestamp_ms_orders_real_times() {
        let earlier = parse_timestamp_ms("2025-01-01T00:00:00Z");
        let later = parse_timestamp_ms("2025-01-02T00:00:00Z");
        assert!(later > earlier);
    }

    #[test]
    fn parse_timestamp_ms_treats_garbage_as_epoch() {
        assert_eq!(parse_timestamp_ms("not-a-date"), 0);
    }
}
