//! Remaining-time formatting for the attempt countdown.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Remaining time split into zero-padded, two-digit fields.
///
/// Hours are not wrapped at 24, so very long attempts show e.g. `"25"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingTime {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

/// Convert a millisecond count into hours, minutes and seconds.
///
/// Negative input (an expired deadline) is clamped to zero. Partial seconds
/// are floored.
pub fn format_remaining_time(milliseconds: i64) -> RemainingTime {
    let total_seconds = milliseconds.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    RemainingTime {
        hours: format!("{hours:02}"),
        minutes: format!("{minutes:02}"),
        seconds: format!("{seconds:02}"),
    }
}

/// Signed milliseconds from `now` until `deadline`; negative once expired.
pub fn remaining_millis(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (deadline - now).num_milliseconds()
}
