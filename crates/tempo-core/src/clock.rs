//! The `Clock` trait — the engine's view of the externally-owned game timer.

use std::time::{Duration, Instant};

/// Wall-clock time source polled by the search.
///
/// `elapsed_millis` measures the time spent on the current move;
/// `remaining_millis` is the total budget left on the game clock, from
/// which the engine derives its per-move budget.
pub trait Clock {
    /// Milliseconds elapsed since thinking began for the current move.
    fn elapsed_millis(&self) -> u64;

    /// Milliseconds remaining on the game clock.
    fn remaining_millis(&self) -> u64;
}

/// A straightforward [`Instant`]-based clock for callers that manage a
/// fixed time bank.
pub struct WallClock {
    start: Instant,
    bank: Duration,
}

impl WallClock {
    /// Start the clock with `bank` remaining on it.
    pub fn start(bank: Duration) -> WallClock {
        WallClock {
            start: Instant::now(),
            bank,
        }
    }
}

impl Clock for WallClock {
    fn elapsed_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn remaining_millis(&self) -> u64 {
        self.bank
            .saturating_sub(self.start.elapsed())
            .as_millis() as u64
    }
}
