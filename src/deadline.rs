// Deadline evaluation - remaining validity of a certificate

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// Display date and remaining days for one certificate expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    /// `NotAfter` rendered as `YYYY-MM-DD` in the reporting timezone
    pub display_date: String,
    /// Whole days left, floored; negative once expired
    pub remaining_days: i64,
}

/// Turns certificate expiry instants into reportable deadlines
#[derive(Debug, Clone, Copy)]
pub struct DeadlineEvaluator {
    timezone: Tz,
}

impl DeadlineEvaluator {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Evaluate `not_after` relative to `now`.
    ///
    /// `remaining_days` is `floor(hours / 24)`: 23h59m left reports 0 and
    /// half an hour past expiry reports -1.
    pub fn evaluate(&self, not_after: DateTime<Utc>, now: DateTime<Utc>) -> Deadline {
        let display_date = not_after
            .with_timezone(&self.timezone)
            .format("%Y-%m-%d")
            .to_string();

        Deadline {
            display_date,
            remaining_days: remaining_days(not_after, now),
        }
    }
}

/// Floored whole days between `now` and `not_after`
pub fn remaining_days(not_after: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let delta = not_after.signed_duration_since(now);
    let mut seconds = delta.num_seconds();

    // a sub-second negative remainder still counts toward the earlier day
    if delta.subsec_nanos() < 0 {
        seconds -= 1;
    }

    seconds.div_euclid(SECONDS_PER_DAY)
}
