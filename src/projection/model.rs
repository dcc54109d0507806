//! Linear extrapolation of the debt from its published baseline

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::config::DebtConfig;

/// Average month length used to spread the monthly growth (days)
pub const AVERAGE_MONTH_DAYS: f64 = 30.44;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Seconds in an average month
pub const SECONDS_PER_MONTH: f64 = AVERAGE_MONTH_DAYS * SECONDS_PER_DAY;

/// Starting point of a projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    /// Debt extrapolated to the start instant
    pub initial_value: f64,

    /// Debt increase per second
    pub per_second_rate: f64,
}

/// The baseline date as an instant (UTC midnight)
pub fn baseline_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Fractional number of average months between the baseline date and `now`
///
/// Not calendar accurate: the wall-clock difference is divided by a fixed
/// 30.44-day month. Negative when `now` precedes the baseline.
pub fn months_elapsed(baseline_date: NaiveDate, now: DateTime<Utc>) -> f64 {
    let millis = (now - baseline_instant(baseline_date)).num_milliseconds() as f64;
    millis / (1000.0 * SECONDS_PER_MONTH)
}

/// Constant accrual rate derived from a monthly growth figure
pub fn per_second_rate(monthly_growth: f64) -> f64 {
    monthly_growth / SECONDS_PER_MONTH
}

/// Extrapolate the configured baseline to `now`
pub fn derive_baseline(config: &DebtConfig, now: DateTime<Utc>) -> Baseline {
    let months = months_elapsed(config.baseline_date, now);

    Baseline {
        initial_value: config.baseline_value + months * config.monthly_growth,
        per_second_rate: per_second_rate(config.monthly_growth),
    }
}
