//! Metrics derived from the projected debt each frame

use serde::Serialize;

use crate::config::DebtConfig;
use super::model::{per_second_rate, SECONDS_PER_DAY};

/// Period of an interest cost row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InterestPeriod {
    Year,
    Month,
    Day,
}

impl InterestPeriod {
    /// Rows in display order
    pub const ALL: [InterestPeriod; 3] = [InterestPeriod::Year, InterestPeriod::Month, InterestPeriod::Day];

    /// Number of periods per year (a year is 12 months or 365 days)
    pub fn per_year(self) -> f64 {
        match self {
            InterestPeriod::Year => 1.0,
            InterestPeriod::Month => 12.0,
            InterestPeriod::Day => 365.0,
        }
    }
}

/// Interest cost for one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterestRow {
    pub period: InterestPeriod,
    pub total: f64,
    pub per_capita: f64,
    pub per_household: f64,
}

/// Everything shown on screen for one frame, in the base currency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// Projected total debt
    pub total: f64,
    pub per_capita: f64,
    pub per_household: f64,
    /// Debt increase per second
    pub per_second: f64,
    /// Debt increase per day
    pub per_day: f64,
    /// Interest rate the breakdown was computed with (percent)
    pub interest_rate: f64,
    /// Interest cost per year, month and day
    pub interest: [InterestRow; 3],
}

impl DerivedMetrics {
    /// Row for a given period
    pub fn interest_row(&self, period: InterestPeriod) -> &InterestRow {
        match period {
            InterestPeriod::Year => &self.interest[0],
            InterestPeriod::Month => &self.interest[1],
            InterestPeriod::Day => &self.interest[2],
        }
    }

    /// Annual interest cost
    pub fn annual_interest(&self) -> f64 {
        self.interest[0].total
    }
}

/// Compute the displayed metrics for a projected debt and interest rate (percent)
pub fn derive(accumulated_value: f64, interest_rate: f64, config: &DebtConfig) -> DerivedMetrics {
    let population = config.population as f64;
    let households = config.household_count as f64;
    let per_second = per_second_rate(config.monthly_growth);

    let annual = accumulated_value * (interest_rate / 100.0);
    let interest = InterestPeriod::ALL.map(|period| {
        let total = annual / period.per_year();
        InterestRow {
            period,
            total,
            per_capita: total / population,
            per_household: total / households,
        }
    });

    DerivedMetrics {
        total: accumulated_value,
        per_capita: accumulated_value / population,
        per_household: accumulated_value / households,
        per_second,
        per_day: per_second * SECONDS_PER_DAY,
        interest_rate,
        interest,
    }
}
