//! Running state of the projection between frames

use log::debug;

use super::model::Baseline;

/// Accumulated debt and frame bookkeeping
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projected debt (base currency)
    accumulated_value: f64,

    /// Debt increase per second, fixed for the lifetime of the state
    per_second_rate: f64,

    /// Timestamp of the previous frame (ms), None until the next frame arrives
    last_tick: Option<f64>,
}

impl ProjectionState {
    /// Initialize state from an extrapolated baseline
    pub fn from_baseline(baseline: Baseline) -> Self {
        Self {
            accumulated_value: baseline.initial_value,
            per_second_rate: baseline.per_second_rate,
            last_tick: None,
        }
    }

    pub fn accumulated_value(&self) -> f64 {
        self.accumulated_value
    }

    pub fn per_second_rate(&self) -> f64 {
        self.per_second_rate
    }

    pub fn last_tick(&self) -> Option<f64> {
        self.last_tick
    }

    /// Accrue debt for the time since the previous frame
    ///
    /// The first frame after construction or [`reset_tick`](Self::reset_tick)
    /// only records the timestamp. Returns the elapsed seconds that were accrued.
    pub fn advance(&mut self, timestamp_ms: f64) -> f64 {
        let previous = self.last_tick.replace(timestamp_ms);

        let elapsed = match previous {
            None => 0.0,
            Some(last) => (timestamp_ms - last) / 1000.0,
        };

        // Frame timestamps should be monotonic; never let the value move backwards
        let elapsed = if elapsed < 0.0 {
            debug!("frame timestamp went backwards by {:.3}s, ignoring", -elapsed);
            0.0
        } else {
            elapsed
        };

        self.accumulated_value += self.per_second_rate * elapsed;
        elapsed
    }

    /// Forget the previous frame so the next one accrues nothing
    pub fn reset_tick(&mut self) {
        self.last_tick = None;
    }
}
