//! Debt projection: baseline extrapolation, per-frame accrual and derived metrics

mod model;
mod state;
mod metrics;

pub use model::{
    derive_baseline, months_elapsed, per_second_rate, baseline_instant, Baseline,
    AVERAGE_MONTH_DAYS, SECONDS_PER_DAY, SECONDS_PER_MONTH,
};
pub use state::ProjectionState;
pub use metrics::{derive, DerivedMetrics, InterestPeriod, InterestRow};
