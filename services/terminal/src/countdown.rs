//! Time left before a throw closes
//!
//! Display only: the backend enforces closing.

use chrono::{DateTime, Utc};
use std::time::Duration;

pub fn time_remaining(closes_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<Duration> {
    (closes_at - now).to_std().ok().filter(|d| !d.is_zero())
}

/// `HH:MM:SS`, or "closed" once the throw has closed
pub fn format_countdown(remaining: Option<Duration>) -> String {
    match remaining {
        Some(d) => {
            let secs = d.as_secs();
            format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
        }
        None => "closed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_remaining() {
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();
        let closes = Utc.with_ymd_and_hms(2026, 10, 14, 13, 2, 5).unwrap();

        let remaining = time_remaining(closes, now);
        assert_eq!(remaining, Some(Duration::from_secs(3725)));
        assert_eq!(format_countdown(remaining), "01:02:05");
    }

    #[test]
    fn test_closed_throw() {
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();
        assert_eq!(time_remaining(now, now), None);
        assert_eq!(time_remaining(now - chrono::Duration::seconds(5), now), None);
        assert_eq!(format_countdown(None), "closed");
    }
}
