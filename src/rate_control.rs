//! Interest rate control: debounced slider input and step buttons
//!
//! The control is a small state machine driven by caller-supplied timestamps
//! (milliseconds), so the debounce delay needs no real timer:
//!
//! ```text
//! Idle/Committed --input--> Debouncing --poll(now >= deadline)--> Committed
//!                            |   ^
//!                            +---+ input (candidate and deadline replaced)
//! ```
//!
//! Step buttons commit immediately and drop any pending slider value.

use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::DebtConfig;
use crate::error::ConfigError;
use crate::format::Formatter;

/// Direction of a committed rate change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Increased,
    Decreased,
    Unchanged,
}

impl Direction {
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            Direction::Increased
        } else if current < previous {
            Direction::Decreased
        } else {
            Direction::Unchanged
        }
    }
}

/// Raw value coming from the rate slider
#[derive(Debug, Clone, PartialEq)]
pub enum RateInput {
    Value(f64),
    /// Text as typed or read from an input element
    Text(String),
}

impl RateInput {
    /// Candidate rate; malformed or non-finite input counts as zero
    pub fn candidate(&self) -> f64 {
        let value = match self {
            RateInput::Value(v) => Some(*v),
            RateInput::Text(text) => text.trim().parse::<f64>().ok(),
        };

        match value {
            Some(v) if v.is_finite() => v,
            _ => {
                warn!("malformed rate input {:?}, using 0", self);
                0.0
            }
        }
    }
}

impl From<f64> for RateInput {
    fn from(value: f64) -> Self {
        RateInput::Value(value)
    }
}

impl From<&str> for RateInput {
    fn from(text: &str) -> Self {
        RateInput::Text(text.to_string())
    }
}

/// Which configured step a button applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepSize {
    Coarse,
    Fine,
}

impl FromStr for StepSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coarse" => Ok(StepSize::Coarse),
            "fine" => Ok(StepSize::Fine),
            _ => Err(ConfigError::UnknownStepSize(s.to_string())),
        }
    }
}

/// Step applied by the increase and decrease buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateButtons {
    pub up: StepSize,
    pub down: StepSize,
}

impl Default for RateButtons {
    /// Fine step up, coarse step down
    fn default() -> Self {
        Self {
            up: StepSize::Fine,
            down: StepSize::Coarse,
        }
    }
}

/// State of the debounce machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateState {
    Idle,
    /// Waiting for the input to settle
    Debouncing { candidate: f64, deadline: f64 },
    Committed,
}

/// A committed rate change
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateChange {
    pub previous: f64,
    pub current: f64,
    pub direction: Direction,
    /// Timestamp of the commit (ms)
    pub committed_at: f64,
}

impl RateChange {
    /// Slider readout for the new rate
    pub fn readout(&self) -> String {
        Formatter::percent(self.current)
    }
}

/// Owner of the interest rate parameter
#[derive(Debug, Clone)]
pub struct RateControl {
    /// Current rate (percent), never negative
    rate: f64,
    state: RateState,
    debounce_ms: f64,
    pulse_ms: f64,
    coarse_step: f64,
    fine_step: f64,
    buttons: RateButtons,
    /// Last directional change and when its highlight ends
    pulse: Option<(Direction, f64)>,
}

impl RateControl {
    /// Control starting at the configured default rate
    pub fn new(config: &DebtConfig) -> Self {
        Self {
            rate: config.default_rate.max(0.0),
            state: RateState::Idle,
            debounce_ms: config.debounce_ms as f64,
            pulse_ms: config.pulse_ms as f64,
            coarse_step: config.coarse_step,
            fine_step: config.fine_step,
            buttons: config.rate_buttons,
            pulse: None,
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn state(&self) -> RateState {
        self.state
    }

    pub fn buttons(&self) -> RateButtons {
        self.buttons
    }

    /// Step in percentage points for a button size
    pub fn step_amount(&self, size: StepSize) -> f64 {
        match size {
            StepSize::Coarse => self.coarse_step,
            StepSize::Fine => self.fine_step,
        }
    }

    /// When the pending input will commit, if any
    pub fn pending_deadline(&self) -> Option<f64> {
        match self.state {
            RateState::Debouncing { deadline, .. } => Some(deadline),
            _ => None,
        }
    }

    /// Record a slider event; only the last event of a burst survives
    pub fn input(&mut self, input: impl Into<RateInput>, now: f64) {
        let candidate = input.into().candidate();
        self.state = RateState::Debouncing {
            candidate,
            deadline: now + self.debounce_ms,
        };
    }

    /// Commit the pending input if its quiet period has elapsed
    pub fn poll(&mut self, now: f64) -> Option<RateChange> {
        match self.state {
            RateState::Debouncing { candidate, deadline } if now >= deadline => {
                Some(self.commit(candidate, now))
            }
            _ => None,
        }
    }

    /// Increase button
    pub fn step_up(&mut self, now: f64) -> RateChange {
        let step = self.step_amount(self.buttons.up);
        self.commit(self.rate + step, now)
    }

    /// Decrease button
    pub fn step_down(&mut self, now: f64) -> RateChange {
        let step = self.step_amount(self.buttons.down);
        self.commit(self.rate - step, now)
    }

    /// Direction to highlight at `now`, while the pulse of the last change lasts
    pub fn highlight(&self, now: f64) -> Option<Direction> {
        match self.pulse {
            Some((direction, until)) if now < until => Some(direction),
            _ => None,
        }
    }

    fn commit(&mut self, candidate: f64, now: f64) -> RateChange {
        let previous = self.rate;
        let current = candidate.max(0.0);
        let direction = Direction::between(previous, current);

        self.rate = current;
        self.state = RateState::Committed;
        if direction != Direction::Unchanged {
            self.pulse = Some((direction, now + self.pulse_ms));
        }

        debug!("interest rate {:.2}% -> {:.2}% ({:?})", previous, current, direction);

        RateChange {
            previous,
            current,
            direction,
            committed_at: now,
        }
    }
}
