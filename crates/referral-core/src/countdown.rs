//! Countdown derivation for invitation rows and the entitlement banner.
//!
//! Every label is recomputed from the absolute expiry timestamp, so a process
//! that was suspended catches up on the next tick instead of drifting.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::{Interval, MissedTickBehavior};

/// Label shown once a countdown has run out.
pub const EXPIRED_LABEL: &str = "00:00:00";

/// Word used between the day count and the clock in the entitlement banner.
pub const DAYS_WORD: &str = "өдөр";

/// Period between countdown recomputations.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Time left until an expiry timestamp, clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Remaining {
    millis: i64,
}

impl Remaining {
    pub fn from_millis(millis: i64) -> Self {
        Self {
            millis: millis.max(0),
        }
    }

    /// True once the expiry instant has been reached.
    pub fn is_expired(&self) -> bool {
        self.millis == 0
    }

    pub fn total_seconds(&self) -> i64 {
        self.millis / 1000
    }

    pub fn days(&self) -> i64 {
        self.total_seconds() / 86_400
    }

    /// Hours within the current day.
    pub fn hours(&self) -> i64 {
        (self.total_seconds() % 86_400) / 3600
    }

    pub fn minutes(&self) -> i64 {
        (self.total_seconds() % 3600) / 60
    }

    pub fn seconds(&self) -> i64 {
        self.total_seconds() % 60
    }

    /// `HH:MM:SS`, where hours are not wrapped at 24.
    pub fn clock(&self) -> String {
        if self.is_expired() {
            return EXPIRED_LABEL.to_string();
        }
        let total_hours = self.total_seconds() / 3600;
        format!(
            "{:02}:{:02}:{:02}",
            total_hours,
            self.minutes(),
            self.seconds()
        )
    }

    /// `D өдөр HH:MM:SS`.
    pub fn with_days(&self) -> String {
        if self.is_expired() {
            return EXPIRED_LABEL.to_string();
        }
        format!(
            "{} {} {:02}:{:02}:{:02}",
            self.days(),
            DAYS_WORD,
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }

    pub fn format(&self, format: CountdownFormat) -> String {
        match format {
            CountdownFormat::Clock => self.clock(),
            CountdownFormat::Days => self.with_days(),
        }
    }
}

/// Which label layout a countdown renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownFormat {
    /// Invitation rows
    #[default]
    Clock,
    /// Entitlement banner
    Days,
}

/// Time left from `now` until `expiry`.
pub fn remaining(now: DateTime<Utc>, expiry: DateTime<Utc>) -> Remaining {
    Remaining::from_millis((expiry - now).num_milliseconds())
}

/// One observation of a running countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub label: String,
    pub remaining: Remaining,
    /// Set on the single observation where the countdown crossed zero
    pub just_expired: bool,
}

/// Countdown for one record that signals expiry exactly once.
#[derive(Debug, Clone)]
pub struct ExpiryLatch {
    expiry: DateTime<Utc>,
    format: CountdownFormat,
    fired: bool,
}

impl ExpiryLatch {
    pub fn new(expiry: DateTime<Utc>, format: CountdownFormat) -> Self {
        Self {
            expiry,
            format,
            fired: false,
        }
    }

    pub fn expiry(&self) -> DateTime<Utc> {
        self.expiry
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Recompute the label for `now`.
    pub fn observe(&mut self, now: DateTime<Utc>) -> Tick {
        let remaining = remaining(now, self.expiry);
        let just_expired = remaining.is_expired() && !self.fired;
        if just_expired {
            self.fired = true;
        }
        Tick {
            label: remaining.format(self.format),
            remaining,
            just_expired,
        }
    }
}

/// The one-second interval views recompute their countdowns on.
///
/// Missed ticks are skipped rather than replayed after a suspend.
pub fn ticker() -> Interval {
    let mut interval = tokio::time::interval(TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_750_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_clock_is_zero_padded() {
        let r = remaining(at(0), at(3 * 3600 + 4 * 60 + 5));
        assert_eq!(r.clock(), "03:04:05");
    }

    #[test]
    fn test_clock_hours_exceed_a_day() {
        let r = remaining(at(0), at(47 * 3600 + 59 * 60 + 59));
        assert_eq!(r.clock(), "47:59:59");
    }

    #[test]
    fn test_with_days() {
        let r = remaining(at(0), at(2 * 86_400 + 3600 + 61));
        assert_eq!(r.with_days(), "2 өдөр 01:01:01");
        assert_eq!(remaining(at(0), at(59)).with_days(), "0 өдөр 00:00:59");
    }

    #[test]
    fn test_past_expiry_clamps_to_zero() {
        let r = remaining(at(100), at(0));
        assert!(r.is_expired());
        assert_eq!(r.total_seconds(), 0);
        assert_eq!(r.clock(), EXPIRED_LABEL);
        assert_eq!(r.with_days(), EXPIRED_LABEL);
    }

    #[test]
    fn test_sub_second_remaining_is_not_expired() {
        let now = at(0);
        let r = remaining(now, now + ChronoDuration::milliseconds(400));
        assert!(!r.is_expired());
        assert_eq!(r.total_seconds(), 0);
    }

    #[test]
    fn test_latch_fires_once() {
        let mut latch = ExpiryLatch::new(at(2), CountdownFormat::Clock);

        let first = latch.observe(at(0));
        assert_eq!(first.label, "00:00:02");
        assert!(!first.just_expired);

        let second = latch.observe(at(2));
        assert_eq!(second.label, EXPIRED_LABEL);
        assert!(second.just_expired);

        let third = latch.observe(at(3));
        assert_eq!(third.label, EXPIRED_LABEL);
        assert!(!third.just_expired);
        assert!(latch.has_fired());
    }

    #[test]
    fn test_latch_recomputes_from_absolute_expiry() {
        let mut latch = ExpiryLatch::new(at(3600), CountdownFormat::Clock);
        assert_eq!(latch.observe(at(0)).label, "01:00:00");
        // a long suspend between ticks
        assert_eq!(latch.observe(at(3000)).label, "00:10:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_period() {
        let mut interval = ticker();
        let start = tokio::time::Instant::now();
        interval.tick().await;
        interval.tick().await;
        assert_eq!(start.elapsed(), TICK_PERIOD);
    }
}
