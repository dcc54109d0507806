//! The debt clock engine: owns the projection, rate and language state and
//! drives one render cycle per frame

use chrono::{DateTime, Utc};
use log::{debug, error, info};

use crate::config::DebtConfig;
use crate::error::EngineError;
use crate::format::Formatter;
use crate::language::Language;
use crate::projection::{derive, derive_baseline, DerivedMetrics, ProjectionState};
use crate::rate_control::{RateChange, RateControl, RateInput};
use crate::render::{DisplayFrame, Frame, RenderSink};
use crate::scheduler::{FrameSource, FrameThrottle};
use crate::translations::{help_content, labels};

/// A single debt clock instance
pub struct DebtClock {
    config: DebtConfig,
    formatter: Formatter,
    projection: ProjectionState,
    rate: RateControl,
    language: Language,
    help_open: bool,
    throttle: FrameThrottle,
    frames_rendered: u64,
}

impl DebtClock {
    /// Engine whose projection is extrapolated to `now`; reached through [`DebtClock::start`]
    fn new(config: DebtConfig, now: DateTime<Utc>) -> Result<Self, EngineError> {
        config.validate()?;

        let baseline = derive_baseline(&config, now);
        info!(
            "projection starts at {:.0} ({:.2}/s) from baseline {} on {}",
            baseline.initial_value, baseline.per_second_rate, config.baseline_value, config.baseline_date
        );

        Ok(Self {
            formatter: Formatter::from_config(&config),
            projection: ProjectionState::from_baseline(baseline),
            rate: RateControl::new(&config),
            language: config.default_language,
            help_open: false,
            throttle: FrameThrottle::new(config.frame_throttle_ms as f64),
            frames_rendered: 0,
            config,
        })
    }

    /// Create an engine bound to a sink, refusing to start if the sink
    /// cannot display every target
    pub fn start<S: RenderSink>(config: DebtConfig, now: DateTime<Utc>, sink: &mut S) -> Result<Self, EngineError> {
        ensure_complete(sink)?;

        let clock = Self::new(config, now)?;
        sink.render_labels(labels(clock.language))?;
        Ok(clock)
    }

    pub fn config(&self) -> &DebtConfig {
        &self.config
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Current interest rate (percent)
    pub fn rate(&self) -> f64 {
        self.rate.rate()
    }

    pub fn rate_control(&self) -> &RateControl {
        &self.rate
    }

    pub fn projection(&self) -> &ProjectionState {
        &self.projection
    }

    pub fn accumulated_value(&self) -> f64 {
        self.projection.accumulated_value()
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Metrics for the current state, without advancing time
    pub fn metrics(&self) -> DerivedMetrics {
        derive(self.projection.accumulated_value(), self.rate.rate(), &self.config)
    }

    /// Process one frame: commit settled rate input, accrue, derive and render
    ///
    /// Returns false when the frame was dropped by the throttle. Fails without
    /// touching any state if the sink cannot display every target.
    pub fn frame<S: RenderSink>(&mut self, timestamp: f64, sink: &mut S) -> Result<bool, EngineError> {
        ensure_complete(sink)?;

        if self.rate.poll(timestamp).is_some() {
            self.projection.reset_tick();
        }

        if !self.throttle.admit(timestamp) {
            return Ok(false);
        }

        self.render_at(timestamp, sink)?;
        Ok(true)
    }

    /// Run frames until the source is exhausted; returns the number rendered
    pub fn run<F: FrameSource, S: RenderSink>(&mut self, frames: &mut F, sink: &mut S) -> Result<u64, EngineError> {
        let mut rendered = 0;
        while let Some(timestamp) = frames.next_frame() {
            if self.frame(timestamp, sink)? {
                rendered += 1;
            }
        }
        Ok(rendered)
    }

    /// Slider event; committed by a later frame once the input settles
    pub fn rate_input(&mut self, input: impl Into<RateInput>, now: f64) {
        self.rate.input(input, now);
    }

    /// Increase button
    pub fn step_up(&mut self, now: f64) -> RateChange {
        let change = self.rate.step_up(now);
        self.projection.reset_tick();
        change
    }

    /// Decrease button
    pub fn step_down(&mut self, now: f64) -> RateChange {
        let change = self.rate.step_down(now);
        self.projection.reset_tick();
        change
    }

    /// Switch language, refresh every caption and render immediately
    pub fn toggle_language<S: RenderSink>(&mut self, now: f64, sink: &mut S) -> Result<(), EngineError> {
        ensure_complete(sink)?;
        self.language = self.language.toggled();
        debug!("language switched to {}", self.language.locale());

        sink.render_labels(labels(self.language))?;
        if self.help_open {
            let help = help_content(&self.config, &self.formatter, self.language);
            sink.render_help(Some(&help))?;
        }

        self.projection.reset_tick();
        self.throttle.mark(now);
        self.render_at(now, sink)
    }

    pub fn open_help<S: RenderSink>(&mut self, sink: &mut S) -> Result<(), EngineError> {
        self.help_open = true;
        let help = help_content(&self.config, &self.formatter, self.language);
        sink.render_help(Some(&help))?;
        Ok(())
    }

    pub fn close_help<S: RenderSink>(&mut self, sink: &mut S) -> Result<(), EngineError> {
        self.help_open = false;
        sink.render_help(None)?;
        Ok(())
    }

    fn render_at<S: RenderSink>(&mut self, timestamp: f64, sink: &mut S) -> Result<(), EngineError> {
        self.projection.advance(timestamp);

        let metrics = self.metrics();
        let display = DisplayFrame::new(&metrics, self.language, labels(self.language), &self.formatter);
        let frame = Frame {
            timestamp,
            language: self.language,
            rate: self.rate.rate(),
            highlight: self.rate.highlight(timestamp),
            metrics,
            display,
        };

        sink.render_frame(&frame)?;
        self.frames_rendered += 1;
        Ok(())
    }
}

fn ensure_complete<S: RenderSink>(sink: &S) -> Result<(), EngineError> {
    let missing = sink.missing_targets();
    if missing.is_empty() {
        return Ok(());
    }
    error!("render sink is missing {} target(s)", missing.len());
    Err(EngineError::MissingRenderTargets(missing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{baseline_instant, InterestPeriod};
    use crate::rate_control::{Direction, RateButtons, StepSize};
    use crate::render::RenderTarget;
    use crate::scheduler::SyntheticFrames;
    use crate::translations::{HelpContent, Labels};
    use approx::assert_relative_eq;
    use std::io;

    /// Sink that keeps everything it was given
    #[derive(Default)]
    struct RecordingSink {
        missing: Vec<RenderTarget>,
        frames: Vec<Frame>,
        labels: Vec<Labels>,
        help: Vec<Option<HelpContent>>,
    }

    impl RenderSink for RecordingSink {
        fn missing_targets(&self) -> Vec<RenderTarget> {
            self.missing.clone()
        }

        fn render_frame(&mut self, frame: &Frame) -> io::Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn render_labels(&mut self, labels: &Labels) -> io::Result<()> {
            self.labels.push(*labels);
            Ok(())
        }

        fn render_help(&mut self, help: Option<&HelpContent>) -> io::Result<()> {
            self.help.push(help.cloned());
            Ok(())
        }
    }

    fn at_baseline(sink: &mut RecordingSink) -> DebtClock {
        let config = DebtConfig::default_france();
        let now = baseline_instant(config.baseline_date);
        DebtClock::start(config, now, sink).unwrap()
    }

    #[test]
    fn test_start_refuses_incomplete_sink() {
        let mut sink = RecordingSink {
            missing: vec![RenderTarget::PerDay],
            ..Default::default()
        };
        let config = DebtConfig::default_france();
        let now = baseline_instant(config.baseline_date);

        let result = DebtClock::start(config, now, &mut sink);
        assert!(matches!(result, Err(EngineError::MissingRenderTargets(ref t)) if t == &vec![RenderTarget::PerDay]));
        assert!(sink.labels.is_empty());
        assert!(sink.frames.is_empty());
    }

    #[test]
    fn test_frames_refused_on_incomplete_sink() {
        let mut sink = RecordingSink::default();
        let mut clock = at_baseline(&mut sink);
        clock.frame(0.0, &mut sink).unwrap();
        let value = clock.accumulated_value();

        let mut partial = RecordingSink {
            missing: vec![RenderTarget::InterestTable, RenderTarget::Total],
            ..Default::default()
        };
        let result = clock.frame(1_000.0, &mut partial);
        assert!(matches!(result, Err(EngineError::MissingRenderTargets(ref t)) if t.len() == 2));
        assert!(partial.frames.is_empty());

        let mut frames = SyntheticFrames::new(2_000.0, 16.0, 5);
        assert!(clock.run(&mut frames, &mut partial).is_err());
        assert!(partial.frames.is_empty());

        // Refused frames leave the projection untouched
        assert_eq!(clock.accumulated_value(), value);
        assert_eq!(clock.projection().last_tick(), Some(0.0));
        assert_eq!(clock.frames_rendered(), 1);
    }

    #[test]
    fn test_configured_buttons_drive_steps() {
        let mut sink = RecordingSink::default();
        let config = DebtConfig {
            rate_buttons: RateButtons {
                up: StepSize::Coarse,
                down: StepSize::Fine,
            },
            ..DebtConfig::default_france()
        };
        let now = baseline_instant(config.baseline_date);
        let mut clock = DebtClock::start(config, now, &mut sink).unwrap();
        assert_eq!(clock.rate_control().buttons().down, StepSize::Fine);

        let up = clock.step_up(0.0);
        assert!((up.current - 3.45).abs() < 1e-9);
        let down = clock.step_down(10.0);
        assert!((down.current - 3.40).abs() < 1e-9);
        assert_eq!(down.direction, Direction::Decreased);
    }

    #[test]
    fn test_start_rejects_invalid_config() {
        let mut sink = RecordingSink::default();
        let config = DebtConfig {
            household_count: 0,
            ..DebtConfig::default_france()
        };
        let result = DebtClock::start(config, Utc::now(), &mut sink);
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_start_renders_default_labels() {
        let mut sink = RecordingSink::default();
        let clock = at_baseline(&mut sink);

        assert_eq!(clock.language(), Language::French);
        assert_eq!(sink.labels.len(), 1);
        assert_eq!(sink.labels[0].language_button, "English");
        assert_eq!(clock.accumulated_value(), 3_345_400_000_000.0);
    }

    #[test]
    fn test_frames_accrue_linearly() {
        let mut sink = RecordingSink::default();
        let mut clock = at_baseline(&mut sink);
        let rate = clock.projection().per_second_rate();

        let mut frames = SyntheticFrames::at_hz(1_000.0, 60.0, 2.0);
        let rendered = clock.run(&mut frames, &mut sink).unwrap();
        assert_eq!(rendered, 121);

        // First frame only records the timestamp
        assert_eq!(sink.frames[0].metrics.total, 3_345_400_000_000.0);

        let first = &sink.frames[10];
        let last = sink.frames.last().unwrap();
        assert_relative_eq!(
            last.metrics.total - first.metrics.total,
            rate * (last.timestamp - first.timestamp) / 1000.0,
            max_relative = 1e-6
        );
        assert_relative_eq!(clock.accumulated_value(), 3_345_400_000_000.0 + rate * 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_debounced_input_commits_on_a_later_frame() {
        let mut sink = RecordingSink::default();
        let mut clock = at_baseline(&mut sink);

        clock.frame(0.0, &mut sink).unwrap();
        for (i, value) in ["3.1", "3.2", "3.3", "3.4"].iter().enumerate() {
            clock.rate_input(*value, 10.0 + i as f64 * 20.0);
        }

        clock.frame(16.0, &mut sink).unwrap();
        clock.frame(100.0, &mut sink).unwrap();
        assert_eq!(clock.rate(), 2.95);

        // Last input at 70ms settles at 170ms
        clock.frame(170.0, &mut sink).unwrap();
        assert_eq!(clock.rate(), 3.4);

        let frame = sink.frames.last().unwrap();
        assert_eq!(frame.rate, 3.4);
        assert_eq!(frame.highlight, Some(Direction::Increased));
        assert_eq!(frame.display.rate, "3.40%");
        assert_relative_eq!(
            frame.metrics.interest_row(InterestPeriod::Year).total,
            frame.metrics.total * 0.034,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_rate_commit_resets_tick() {
        let mut sink = RecordingSink::default();
        let mut clock = at_baseline(&mut sink);

        clock.frame(0.0, &mut sink).unwrap();
        clock.frame(1_000.0, &mut sink).unwrap();
        let value = clock.accumulated_value();

        clock.step_up(1_500.0);
        assert_eq!(clock.projection().last_tick(), None);

        // The frame after a commit does not accrue
        clock.frame(2_000.0, &mut sink).unwrap();
        assert_eq!(clock.accumulated_value(), value);
        assert!((clock.rate() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_double_toggle_restores_language_and_metrics() {
        let mut sink = RecordingSink::default();
        let mut clock = at_baseline(&mut sink);
        clock.frame(0.0, &mut sink).unwrap();
        let before = clock.metrics();

        clock.toggle_language(10.0, &mut sink).unwrap();
        assert_eq!(clock.language(), Language::English);
        clock.toggle_language(20.0, &mut sink).unwrap();
        assert_eq!(clock.language(), Language::French);

        // Each toggle resets the tick, so no time accrued in between
        assert_eq!(clock.metrics(), before);
        assert_eq!(sink.labels.len(), 3);
        assert_eq!(sink.labels[1].title, "French Public Debt in Real Time");
    }

    #[test]
    fn test_toggle_forces_a_render() {
        let mut sink = RecordingSink::default();
        let mut clock = at_baseline(&mut sink);
        clock.frame(0.0, &mut sink).unwrap();

        clock.toggle_language(5.0, &mut sink).unwrap();
        assert_eq!(sink.frames.len(), 2);

        let frame = sink.frames.last().unwrap();
        assert_eq!(frame.language, Language::English);
        assert_eq!(frame.timestamp, 5.0);
        assert!(frame.display.total.starts_with('$'));
        assert_eq!(frame.display.rows[0].label, "Year");
    }

    #[test]
    fn test_toggle_refreshes_open_help() {
        let mut sink = RecordingSink::default();
        let mut clock = at_baseline(&mut sink);

        clock.toggle_language(0.0, &mut sink).unwrap();
        assert!(sink.help.is_empty());

        clock.open_help(&mut sink).unwrap();
        clock.toggle_language(10.0, &mut sink).unwrap();

        let titles: Vec<_> = sink.help.iter().flatten().map(|h| h.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Information about French Public Debt", "Information sur la dette publique française"]
        );

        clock.close_help(&mut sink).unwrap();
        assert!(!clock.help_open());
        assert_eq!(sink.help.last(), Some(&None));
    }

    #[test]
    fn test_throttled_frames_still_accrue_real_time() {
        let mut sink = RecordingSink::default();
        let config = DebtConfig {
            frame_throttle_ms: 100,
            ..DebtConfig::default_france()
        };
        let now = baseline_instant(config.baseline_date);
        let mut clock = DebtClock::start(config, now, &mut sink).unwrap();
        let rate = clock.projection().per_second_rate();

        let mut frames = SyntheticFrames::new(0.0, 25.0, 41);
        let rendered = clock.run(&mut frames, &mut sink).unwrap();

        assert_eq!(rendered, 11);
        assert_relative_eq!(clock.accumulated_value(), 3_345_400_000_000.0 + rate, max_relative = 1e-12);
    }
}
