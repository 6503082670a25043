//! # System Clock
//!
//! Wall-clock adapter for production use. Tests inject
//! [`crate::ports::FixedClock`] instead.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::ports::Clock;

/// Clock backed by the operating system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_past_2023() {
        // 2023-01-01T00:00:00Z
        assert!(SystemClock.unix_now() > 1_672_531_200);
    }
}
