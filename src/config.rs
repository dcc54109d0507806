//! Baseline figures and tunables for the debt clock
//!
//! The built-in values are the latest published French public debt figures.
//! A JSON file can override any subset of fields; missing fields keep the
//! built-in value.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::language::Language;
use crate::rate_control::RateButtons;

/// Date of the latest published debt figure
pub const DEFAULT_BASELINE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 3, 31) {
    Some(date) => date,
    None => panic!("invalid baseline date"),
};

/// Total public debt at the baseline date (EUR)
pub const DEFAULT_BASELINE_VALUE: f64 = 3_345_400_000_000.0;

/// Average monthly debt increase (EUR)
pub const DEFAULT_MONTHLY_GROWTH: f64 = 13_000_000_000.0;

pub const DEFAULT_POPULATION: u64 = 68_520_000;

/// Taxpaying households
pub const DEFAULT_HOUSEHOLD_COUNT: u64 = 18_200_000;

/// Average interest rate on the debt (percent)
pub const DEFAULT_INTEREST_RATE: f64 = 2.95;

/// EUR to USD rate applied to the English variant
pub const DEFAULT_EXCHANGE_RATE: f64 = 1.1676;

/// Step of the coarse rate button (percentage points)
pub const DEFAULT_COARSE_STEP: f64 = 0.5;

/// Step of the fine rate button (percentage points)
pub const DEFAULT_FINE_STEP: f64 = 0.05;

/// Bundled copy of the built-in figures
pub const DEFAULT_CONFIG_PATH: &str = "data/debt_config.json";

pub const DEFAULT_DEBOUNCE_MS: u64 = 100;
pub const DEFAULT_PULSE_MS: u64 = 300;

/// Immutable configuration of a debt clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebtConfig {
    /// Date the baseline value was published (taken as UTC midnight)
    pub baseline_date: NaiveDate,

    /// Debt at the baseline date, in the base currency
    pub baseline_value: f64,

    /// Debt increase per (average) month
    pub monthly_growth: f64,

    pub population: u64,

    pub household_count: u64,

    /// Language shown at startup
    pub default_language: Language,

    /// Interest rate shown at startup (percent)
    pub default_rate: f64,

    /// Conversion applied to amounts shown in English
    /// If None, both variants display the base currency
    pub exchange_rate: Option<f64>,

    pub coarse_step: f64,

    pub fine_step: f64,

    /// Which step the increase and decrease buttons apply
    pub rate_buttons: RateButtons,

    /// Quiet period before a slider value is committed (ms)
    pub debounce_ms: u64,

    /// How long the rate readout stays highlighted after a change (ms)
    pub pulse_ms: u64,

    /// Minimum spacing between rendered frames (ms, 0 = every frame)
    pub frame_throttle_ms: u64,
}

impl DebtConfig {
    /// French public debt figures with conversion to USD for English readers
    pub fn default_france() -> Self {
        Self {
            baseline_date: DEFAULT_BASELINE_DATE,
            baseline_value: DEFAULT_BASELINE_VALUE,
            monthly_growth: DEFAULT_MONTHLY_GROWTH,
            population: DEFAULT_POPULATION,
            household_count: DEFAULT_HOUSEHOLD_COUNT,
            default_language: Language::French,
            default_rate: DEFAULT_INTEREST_RATE,
            exchange_rate: Some(DEFAULT_EXCHANGE_RATE),
            coarse_step: DEFAULT_COARSE_STEP,
            fine_step: DEFAULT_FINE_STEP,
            rate_buttons: RateButtons::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            pulse_ms: DEFAULT_PULSE_MS,
            frame_throttle_ms: 0,
        }
    }

    /// Load a config override file (JSON)
    pub fn from_json_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the projection and derivation rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("baseline_value", self.baseline_value)?;
        finite("monthly_growth", self.monthly_growth)?;
        non_negative("default_rate", self.default_rate)?;

        if self.population == 0 {
            return Err(ConfigError::NonPositive { field: "population" });
        }
        if self.household_count == 0 {
            return Err(ConfigError::NonPositive { field: "household_count" });
        }

        if let Some(rate) = self.exchange_rate {
            positive("exchange_rate", rate)?;
        }
        positive("coarse_step", self.coarse_step)?;
        positive("fine_step", self.fine_step)?;

        Ok(())
    }
}

impl Default for DebtConfig {
    fn default() -> Self {
        Self::default_france()
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field });
    }
    Ok(())
}
