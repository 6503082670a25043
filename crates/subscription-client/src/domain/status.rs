//! # Lifecycle Status
//!
//! Pure classification of a subscription's end time against a caller-supplied
//! clock reading. Time never triggers a transition on the remote program;
//! a record drifts `Active -> ExpiringSoon -> Expired` purely by the clock.

use serde::{Deserialize, Serialize};

/// Seconds in a day, for duration-to-end-time arithmetic.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Width of the expiring-soon window: seven days in seconds.
pub const EXPIRING_SOON_WINDOW_SECS: i64 = 7 * SECONDS_PER_DAY;

/// Where a subscription sits relative to its end time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// More than seven days of coverage remain.
    Active,
    /// Seven days or less remain.
    ExpiringSoon,
    /// The end time has passed (or is exactly now).
    Expired,
}

/// Classify an end time against `now` (both Unix seconds).
///
/// `end_time == now` reads as [`SubscriptionStatus::Expired`]: at the instant
/// of expiry the subscription no longer grants access.
pub fn classify(end_time: i64, now: i64) -> SubscriptionStatus {
    if end_time <= now {
        SubscriptionStatus::Expired
    } else if end_time - now <= EXPIRING_SOON_WINDOW_SECS {
        SubscriptionStatus::ExpiringSoon
    } else {
        SubscriptionStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_past_end_time_is_expired() {
        assert_eq!(classify(NOW - 1, NOW), SubscriptionStatus::Expired);
    }

    #[test]
    fn test_end_time_equal_now_is_expired() {
        assert_eq!(classify(NOW, NOW), SubscriptionStatus::Expired);
    }

    #[test]
    fn test_one_second_of_coverage_is_expiring_soon() {
        assert_eq!(classify(NOW + 1, NOW), SubscriptionStatus::ExpiringSoon);
    }

    #[test]
    fn test_exactly_seven_days_is_expiring_soon() {
        assert_eq!(
            classify(NOW + EXPIRING_SOON_WINDOW_SECS, NOW),
            SubscriptionStatus::ExpiringSoon
        );
    }

    #[test]
    fn test_beyond_seven_days_is_active() {
        assert_eq!(
            classify(NOW + EXPIRING_SOON_WINDOW_SECS + 1, NOW),
            SubscriptionStatus::Active
        );
    }

    #[test]
    fn test_window_constant_is_seven_days() {
        assert_eq!(EXPIRING_SOON_WINDOW_SECS, 604_800);
    }
}
