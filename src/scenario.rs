//! Scenario runner for interest rate sensitivity
//!
//! Evaluates the derived metrics at a fixed instant for many interest rates
//! without running a frame loop.

use chrono::{DateTime, Utc};

use crate::config::DebtConfig;
use crate::projection::{derive, derive_baseline, DerivedMetrics};

/// Pre-configured runner for what-if interest rates
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(DebtConfig::default_france());
///
/// for (rate, metrics) in runner.run_rates(Utc::now(), &[2.0, 3.0, 4.0]) {
///     println!("{rate}: {}", metrics.annual_interest());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: DebtConfig,
}

impl ScenarioRunner {
    pub fn new(config: DebtConfig) -> Self {
        Self { config }
    }

    /// Projected debt at an instant
    pub fn value_at(&self, at: DateTime<Utc>) -> f64 {
        derive_baseline(&self.config, at).initial_value
    }

    /// Metrics at an instant for one interest rate (percent, clamped at zero)
    pub fn run(&self, at: DateTime<Utc>, rate: f64) -> DerivedMetrics {
        derive(self.value_at(at), rate.max(0.0), &self.config)
    }

    /// Metrics at an instant for several interest rates
    pub fn run_rates(&self, at: DateTime<Utc>, rates: &[f64]) -> Vec<(f64, DerivedMetrics)> {
        let value = self.value_at(at);
        rates
            .iter()
            .map(|&rate| (rate, derive(value, rate.max(0.0), &self.config)))
            .collect()
    }

    pub fn config(&self) -> &DebtConfig {
        &self.config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(DebtConfig::default_france())
    }
}

/// Rates from `from` to `to` inclusive, `step` apart
///
/// Each rate is computed from its index so the grid does not accumulate
/// rounding error. Empty when `step` is not positive or `to < from`.
pub fn rate_grid(from: f64, to: f64, step: f64) -> Vec<f64> {
    if step.is_nan() || step <= 0.0 || to < from {
        return Vec::new();
    }

    // Tolerance so that e.g. 0.0..=5.0 by 0.05 includes 5.0
    let count = ((to - from) / step + 1e-9).floor() as usize + 1;
    (0..count).map(|i| from + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::baseline_instant;
    use approx::assert_relative_eq;
    use chrono::Duration;

    #[test]
    fn test_runner_at_baseline() {
        let runner = ScenarioRunner::default();
        let at = baseline_instant(runner.config().baseline_date);

        let metrics = runner.run(at, 2.95);
        assert_relative_eq!(metrics.annual_interest(), 98_689_300_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_higher_rate_costs_more() {
        let runner = ScenarioRunner::default();
        let at = baseline_instant(runner.config().baseline_date) + Duration::days(200);

        let results = runner.run_rates(at, &[1.0, 2.0, 3.0]);
        assert_eq!(results.len(), 3);
        assert!(results[2].1.annual_interest() > results[0].1.annual_interest());

        // Same projected debt for every rate
        assert!(results.iter().all(|(_, m)| m.total == results[0].1.total));
        assert!(results[0].1.total > runner.config().baseline_value);
    }

    #[test]
    fn test_negative_rate_clamped() {
        let runner = ScenarioRunner::default();
        let metrics = runner.run(Utc::now(), -1.0);
        assert_eq!(metrics.interest_rate, 0.0);
        assert_eq!(metrics.annual_interest(), 0.0);
    }

    #[test]
    fn test_rate_grid() {
        let grid = rate_grid(0.0, 5.0, 0.05);
        assert_eq!(grid.len(), 101);
        assert_relative_eq!(*grid.last().unwrap(), 5.0, max_relative = 1e-12);

        assert_eq!(rate_grid(1.0, 2.0, 0.5), vec![1.0, 1.5, 2.0]);
        assert!(rate_grid(2.0, 1.0, 0.5).is_empty());
        assert!(rate_grid(1.0, 2.0, 0.0).is_empty());
    }
}
