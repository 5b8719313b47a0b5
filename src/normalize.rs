// src/normalize.rs
//! Free-text and timestamp normalization shared by the collector.
//! Both functions are total: bad input degrades, it never errors.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::OnceCell;
use regex::Regex;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::{OffsetDateTime, UtcOffset};

/// Strip HTML markup down to plain text: decode entities, drop tags,
/// collapse whitespace, trim. Malformed markup degrades to whatever text
/// survives tag removal.
pub fn strip_markup(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    let mut out = html_escape::decode_html_entities(s).to_string();

    // Tags become spaces so "<p>a</p><p>b</p>" keeps its word boundary.
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

/// Naive formats some feeds emit, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

/// Parse a loosely formatted feed timestamp into an RFC 3339 UTC string.
/// Returns "" when nothing matches; callers sort unknown dates last.
pub fn normalize_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    // RFC 2822 ("Tue, 02 Jan 2024 03:04:05 GMT") and RFC 3339 cover almost
    // everything real feeds emit.
    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc2822) {
        return rfc3339_utc(dt);
    }
    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
        return rfc3339_utc(dt);
    }
    // chrono is laxer about RFC 2822 obsolete zone names ("GMT", "UT").
    if let Ok(dt) = chrono::DateTime::parse_from_rfc2822(raw) {
        return dt.naive_utc().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return format_utc(naive);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = d.and_hms_opt(0, 0, 0) {
            return format_utc(naive);
        }
    }

    String::new()
}

fn rfc3339_utc(dt: OffsetDateTime) -> String {
    dt.to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_default()
}

fn format_utc(naive: NaiveDateTime) -> String {
    Utc.from_utc_datetime(&naive)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_markup_drops_tags_and_entities() {
        let s = "<p>Hello&nbsp;<b>world</b></p>  &amp; more";
        assert_eq!(strip_markup(s), "Hello world & more");
    }

    #[test]
    fn strip_markup_survives_malformed_input() {
        assert_eq!(strip_markup("<div unclosed  Hello"), "<div unclosed Hello");
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn rfc2822_converts_to_utc() {
        let out = normalize_timestamp("Tue, 02 Jan 2024 03:04:05 +0200");
        assert_eq!(out, "2024-01-02T01:04:05Z");
    }

    #[test]
    fn rfc2822_gmt_zone_is_accepted() {
        let out = normalize_timestamp("Tue, 02 Jan 2024 03:04:05 GMT");
        assert_eq!(out, "2024-01-02T03:04:05Z");
    }

    #[test]
    fn rfc3339_passes_through_as_utc() {
        assert_eq!(
            normalize_timestamp("2024-01-02T03:04:05-05:00"),
            "2024-01-02T08:04:05Z"
        );
    }

    #[test]
    fn naive_timestamps_are_assumed_utc() {
        assert_eq!(
            normalize_timestamp("2024-01-02 03:04:05"),
            "2024-01-02T03:04:05Z"
        );
        assert_eq!(normalize_timestamp("2024-01-02"), "2024-01-02T00:00:00Z");
    }

    #[test]
    fn garbage_yields_empty_string() {
        assert_eq!(normalize_timestamp("yesterday-ish"), "");
        assert_eq!(normalize_timestamp(""), "");
        assert_eq!(normalize_timestamp("   "), "");
    }
}
