//! Time-aware cache validity.
//!
//! Bills move more during weekday business hours, so cached list data is
//! kept for a short window then and a long one otherwise.

use std::sync::Mutex;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Timelike,
};

/// Weekday window, Monday to Friday, [9:00, 15:00) local time.
const BUSINESS_HOURS: std::ops::Range<u32> = 9..15;
const BUSINESS_INTERVAL_MINUTES: i64 = 10;
const OFF_HOURS_INTERVAL_MINUTES: i64 = 90;

/// Source of "now" for cache decisions and record timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the process's local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Settable clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Allowed staleness for an entry read at `now`.
pub fn refresh_interval<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let weekday = now.weekday().num_days_from_monday() < 5;
    if weekday && BUSINESS_HOURS.contains(&now.hour()) {
        Duration::minutes(BUSINESS_INTERVAL_MINUTES)
    } else {
        Duration::minutes(OFF_HOURS_INTERVAL_MINUTES)
    }
}

/// Whether an entry written at `timestamp` may still be served at `now`.
///
/// Missing or unparsable timestamps are never valid.
pub fn is_valid<Tz: TimeZone>(timestamp: Option<&str>, now: &DateTime<Tz>) -> bool {
    let Some(written) = timestamp.and_then(|ts| parse_timestamp(ts, now.offset().fix())) else {
        return false;
    };

    let age = now.fixed_offset().signed_duration_since(written);
    age < refresh_interval(now)
}

/// Parses RFC 3339, or a bare ISO-8601 local datetime read in `offset`.
pub fn parse_timestamp(raw: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn minutes_before(now: DateTime<FixedOffset>, minutes: i64) -> String {
        (now - Duration::minutes(minutes)).to_rfc3339()
    }

    // 2025-01-15 is a Wednesday, 2025-01-18 a Saturday.

    #[test]
    fn business_hours_window_is_ten_minutes() {
        let now = at("2025-01-15T10:00:00-05:00");

        assert_eq!(refresh_interval(&now), Duration::minutes(10));
        assert!(is_valid(Some(&minutes_before(now, 5)), &now));
        assert!(!is_valid(Some(&minutes_before(now, 15)), &now));
    }

    #[test]
    fn off_hours_window_is_ninety_minutes() {
        let now = at("2025-01-18T22:00:00-05:00");

        assert_eq!(refresh_interval(&now), Duration::minutes(90));
        assert!(is_valid(Some(&minutes_before(now, 80)), &now));
        assert!(!is_valid(Some(&minutes_before(now, 100)), &now));
    }

    #[test]
    fn window_edges() {
        assert_eq!(refresh_interval(&at("2025-01-15T09:00:00+00:00")), Duration::minutes(10));
        assert_eq!(refresh_interval(&at("2025-01-15T14:59:59+00:00")), Duration::minutes(10));
        assert_eq!(refresh_interval(&at("2025-01-15T15:00:00+00:00")), Duration::minutes(90));
        assert_eq!(refresh_interval(&at("2025-01-15T08:59:59+00:00")), Duration::minutes(90));
        // Friday counts, Sunday doesn't.
        assert_eq!(refresh_interval(&at("2025-01-17T12:00:00+00:00")), Duration::minutes(10));
        assert_eq!(refresh_interval(&at("2025-01-19T12:00:00+00:00")), Duration::minutes(90));
    }

    #[test]
    fn age_equal_to_interval_is_stale() {
        let now = at("2025-01-15T10:00:00+00:00");
        assert!(!is_valid(Some(&minutes_before(now, 10)), &now));
    }

    #[test]
    fn missing_or_malformed_timestamp_is_invalid() {
        for now in [at("2025-01-15T10:00:00+00:00"), at("2025-01-18T22:00:00+00:00")] {
            assert!(!is_valid(None, &now));
            assert!(!is_valid(Some(""), &now));
            assert!(!is_valid(Some("yesterday"), &now));
            assert!(!is_valid(Some("2025-13-40T99:00:00"), &now));
        }
    }

    #[test]
    fn naive_timestamps_are_read_in_the_local_offset() {
        let now = at("2025-01-15T10:00:00-05:00");
        assert!(is_valid(Some("2025-01-15T09:55:00.123456"), &now));
        assert!(!is_valid(Some("2025-01-15T09:45:00"), &now));
    }

    #[test]
    fn offsets_are_respected() {
        // 09:55 at -05:00 is 14:55 UTC.
        let now = at("2025-01-15T10:00:00-05:00");
        assert!(is_valid(Some("2025-01-15T14:55:00Z"), &now));
    }

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::new(at("2025-01-15T10:00:00+00:00"));
        clock.advance(Duration::minutes(30));
        assert_eq!(clock.now(), at("2025-01-15T10:30:00+00:00"));
    }
}
