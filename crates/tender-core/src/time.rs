//! Asia/Kolkata timestamp helpers.
//!
//! Every persisted timestamp is an ISO-8601 string carrying the fixed
//! `+05:30` offset. Tender documents print dates as `DD-MM-YYYY`.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// UTC offset of Indian Standard Time, in seconds.
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Timestamp type used by all entities.
pub type Timestamp = DateTime<FixedOffset>;

/// The IST fixed offset.
#[must_use]
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current time in IST.
#[must_use]
pub fn now_ist() -> Timestamp {
    Utc::now().with_timezone(&ist())
}

/// Convert any timestamp to IST.
#[must_use]
pub fn to_ist<Tz: chrono::TimeZone>(dt: &DateTime<Tz>) -> Timestamp {
    dt.with_timezone(&ist())
}

/// Format a timestamp's calendar date the way Indian tender forms print it.
#[must_use]
pub fn display_date(ts: &Timestamp) -> String {
    to_ist(ts).format("%d-%m-%Y").to_string()
}

/// Parse the date formats found in tender notices.
///
/// Accepts `YYYY-MM-DD`, `DD-MM-YYYY`, `DD/MM/YYYY`, `DD.MM.YYYY` and full
/// RFC 3339 timestamps. Returns `None` for anything else.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(to_ist(&dt).date_naive());
    }
    ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn now_is_in_ist() {
        let now = now_ist();
        assert_eq!(now.offset().local_minus_utc(), IST_OFFSET_SECS);
        assert!(now.to_rfc3339().ends_with("+05:30"));
    }

    #[test]
    fn utc_evening_rolls_into_next_ist_day() {
        let utc = DateTime::parse_from_rfc3339("2026-03-31T20:00:00+00:00").unwrap();
        assert_eq!(display_date(&utc), "01-04-2026");
    }

    #[rstest]
    #[case("2026-04-01")]
    #[case("01-04-2026")]
    #[case("01/04/2026")]
    #[case("01.04.2026")]
    #[case("2026-04-01T10:00:00+05:30")]
    fn parses_common_notice_formats(#[case] raw: &str) {
        assert_eq!(parse_date(raw), NaiveDate::from_ymd_opt(2026, 4, 1));
    }

    #[test]
    fn rejects_free_text() {
        assert_eq!(parse_date("next monday"), None);
        assert_eq!(parse_date("   "), None);
    }
}
