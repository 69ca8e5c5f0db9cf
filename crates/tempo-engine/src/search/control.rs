//! Search control — time budgets and the cooperative abort latch.

use tempo_core::Clock;

/// Node-count interval between clock polls. Checking every node would
/// dominate runtime; checking every 2048 keeps the overrun bounded to a
/// few thousand nodes' worth of work.
const POLL_INTERVAL: u64 = 2048;

/// Decides when the current search must stop.
///
/// Two thresholds derived from the remaining game time:
/// - the **soft** limit stops iterative deepening from starting another
///   iteration;
/// - the **hard** limit aborts the search mid-iteration, checked every
///   [`POLL_INTERVAL`] nodes.
///
/// Once the hard limit trips, the latch stays set so enclosing frames
/// unwind without re-reading the clock.
pub struct SearchControl<'a, C: Clock> {
    clock: &'a C,
    soft_millis: u64,
    hard_millis: u64,
    aborted: bool,
}

impl<'a, C: Clock> SearchControl<'a, C> {
    /// Derive budgets from the clock: soft = `remaining / soft_fraction`,
    /// hard = `soft * hard_factor`, capped at half the remaining time.
    pub fn new(clock: &'a C, soft_fraction: u64, hard_factor: u64) -> SearchControl<'a, C> {
        let remaining = clock.remaining_millis();
        let soft = remaining / soft_fraction.max(1);
        let hard = (soft * hard_factor).min(remaining / 2).max(1);
        SearchControl {
            clock,
            soft_millis: soft,
            hard_millis: hard,
            aborted: false,
        }
    }

    /// Whether the search must abort now. Polls the clock only every
    /// [`POLL_INTERVAL`] nodes; once tripped, always `true`.
    pub fn should_stop(&mut self, nodes: u64) -> bool {
        if self.aborted {
            return true;
        }
        if nodes % POLL_INTERVAL != 0 {
            return false;
        }
        if self.clock.elapsed_millis() >= self.hard_millis {
            self.aborted = true;
        }
        self.aborted
    }

    /// Whether the abort latch has tripped.
    #[inline]
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Whether iterative deepening should refrain from another iteration.
    pub fn should_stop_iterating(&self) -> bool {
        self.aborted || self.clock.elapsed_millis() >= self.soft_millis
    }
}
