// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Activity window: the "last N days" cutoff shared by every fetcher.
//!
//! Timestamps from the provider come in several encodings
//! (`2023-12-25T10:00:00+08:00`, `2023-12-25T02:00:00Z`, with or without
//! fractional seconds, occasionally without any offset). All of them are
//! normalized to UTC before comparing. Offset-less values are taken as UTC.
//!
//! The boundary is inclusive: a timestamp equal to `since` is inside.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use thiserror::Error;

/// Format of the `since` query parameter sent to the provider
pub const SINCE_PARAM_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("unparseable timestamp '{value}'")]
    InvalidTimestamp { value: String },

    #[error("missing timestamp")]
    MissingTimestamp,

    #[error("a {days}-day window reaches past the earliest representable date")]
    OutOfRange { days: u32 },
}

/// Source of "now"
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    since: DateTime<Utc>,
}

impl ActivityWindow {
    pub fn starting_at(since: DateTime<Utc>) -> Self {
        Self { since }
    }

    /// Window covering the last `days` days as seen by `clock`
    pub fn last_days(days: u32, clock: &dyn Clock) -> Result<Self, WindowError> {
        Duration::try_days(i64::from(days))
            .and_then(|span| clock.now().checked_sub_signed(span))
            .map(Self::starting_at)
            .ok_or(WindowError::OutOfRange { days })
    }

    pub fn since(&self) -> DateTime<Utc> {
        self.since
    }

    /// Value for the provider's `since` query parameter
    pub fn since_param(&self) -> String {
        self.since.format(SINCE_PARAM_FORMAT).to_string()
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.since
    }

    /// Parse `raw` and test it against the window
    pub fn contains_raw(&self, raw: &str) -> Result<bool, WindowError> {
        is_within_window(raw, self.since)
    }
}

pub fn is_within_window(raw: &str, since: DateTime<Utc>) -> Result<bool, WindowError> {
    Ok(parse_timestamp(raw)? >= since)
}

/// Parse a provider timestamp into UTC
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, WindowError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(WindowError::MissingTimestamp);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    // offsets without a colon, e.g. +0800
    if let Ok(parsed) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(WindowError::InvalidTimestamp {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[gp_test_utils::logged_test]
    fn offset_and_zulu_encodings_agree() {
        let since = utc(2023, 12, 25, 0, 0, 0);
        assert!(is_within_window("2023-12-25T10:00:00+08:00", since).unwrap());
        assert!(is_within_window("2023-12-25T10:00:00Z", since).unwrap());
        assert_eq!(
            parse_timestamp("2023-12-25T10:00:00+08:00").unwrap(),
            parse_timestamp("2023-12-25T02:00:00Z").unwrap()
        );
    }

    #[gp_test_utils::logged_test]
    fn offsets_shift_across_the_boundary() {
        // 2023-12-25T06:00:00+08:00 is 2023-12-24T22:00:00Z
        let since = utc(2023, 12, 25, 0, 0, 0);
        assert!(!is_within_window("2023-12-25T06:00:00+08:00", since).unwrap());
        assert!(!is_within_window("2023-12-24T23:59:59Z", since).unwrap());
    }

    #[gp_test_utils::logged_test]
    fn boundary_is_inclusive() {
        let since = utc(2023, 12, 25, 0, 0, 0);
        assert!(is_within_window("2023-12-25T00:00:00Z", since).unwrap());
        assert!(is_within_window("2023-12-25T08:00:00+08:00", since).unwrap());
    }

    #[gp_test_utils::logged_test]
    fn tolerated_variants() {
        let expected = utc(2024, 3, 1, 12, 30, 0);
        for raw in [
            "2024-03-01T12:30:00.000Z",
            "2024-03-01T20:30:00.000+08:00",
            "2024-03-01T20:30:00+0800",
            "2024-03-01T12:30:00",
            "2024-03-01 12:30:00",
        ] {
            assert_eq!(parse_timestamp(raw).unwrap(), expected, "{}", raw);
        }
    }

    #[gp_test_utils::logged_test]
    fn malformed_timestamps_are_distinct_errors() {
        assert_eq!(
            parse_timestamp("yesterday"),
            Err(WindowError::InvalidTimestamp {
                value: "yesterday".into()
            })
        );
        assert_eq!(parse_timestamp("  "), Err(WindowError::MissingTimestamp));
    }

    #[gp_test_utils::logged_test]
    fn window_from_fixed_clock() {
        let clock = FixedClock(utc(2024, 1, 8, 9, 15, 42));
        let window = ActivityWindow::last_days(7, &clock).unwrap();
        assert_eq!(window.since(), utc(2024, 1, 1, 9, 15, 42));
        assert_eq!(window.since_param(), "2024-01-01T09:15:42Z");
        assert!(window.contains(utc(2024, 1, 1, 9, 15, 42)));
        assert!(!window.contains(utc(2024, 1, 1, 9, 15, 41)));
    }

    #[gp_test_utils::logged_test]
    fn oversized_window_is_an_error() {
        let clock = FixedClock(utc(2024, 1, 8, 9, 15, 42));
        assert_eq!(
            ActivityWindow::last_days(u32::MAX, &clock),
            Err(WindowError::OutOfRange { days: u32::MAX })
        );
        // about 27 centuries still fits
        assert!(ActivityWindow::last_days(1_000_000, &clock).is_ok());
    }

    proptest! {
        #[test]
        fn encodings_of_one_instant_classify_identically(
            secs in 1_600_000_000i64..1_800_000_000i64,
            offset_hours in -11i32..=12,
            since_secs in 1_600_000_000i64..1_800_000_000i64,
        ) {
            let instant = Utc.timestamp_opt(secs, 0).unwrap();
            let since = Utc.timestamp_opt(since_secs, 0).unwrap();
            let offset = chrono::FixedOffset::east_opt(offset_hours * 3600).unwrap();

            let zulu = instant.format("%Y-%m-%dT%H:%M:%SZ").to_string();
            let shifted = instant.with_timezone(&offset).to_rfc3339();

            prop_assert_eq!(
                is_within_window(&zulu, since).unwrap(),
                is_within_window(&shifted, since).unwrap()
            );
            prop_assert_eq!(is_within_window(&zulu, since).unwrap(), secs >= since_secs);
        }
    }
}
