//! Debt Clock - Real-time public debt projection engine
//!
//! This library provides:
//! - Linear debt projection from a dated baseline and a monthly growth figure
//! - Per-capita, per-household and interest cost metrics recomputed every frame
//! - Locale-aware currency formatting for the French and English variants
//! - An interest rate control with debounced input and step buttons
//! - A frame-driven engine that pushes snapshots to a pluggable render sink

pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod language;
pub mod projection;
pub mod rate_control;
pub mod render;
pub mod scenario;
pub mod scheduler;
pub mod translations;

// Re-export commonly used types
pub use config::DebtConfig;
pub use engine::DebtClock;
pub use error::{ConfigError, EngineError};
pub use format::Formatter;
pub use language::Language;
pub use projection::{DerivedMetrics, InterestPeriod, InterestRow, ProjectionState};
pub use rate_control::{Direction, RateChange, RateControl, RateInput};
pub use render::{Frame, RenderSink, RenderTarget, TerminalSink};
pub use scenario::ScenarioRunner;
pub use scheduler::{FrameSource, FrameThrottle, SyntheticFrames};
