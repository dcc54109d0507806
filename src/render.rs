//! Render sink interface and a plain-text terminal implementation

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::format::Formatter;
use crate::language::Language;
use crate::projection::{DerivedMetrics, InterestPeriod};
use crate::rate_control::Direction;
use crate::translations::{HelpContent, Labels, TableHeaders};

/// On-screen element a sink must provide before the engine starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RenderTarget {
    Total,
    PerCapita,
    PerHousehold,
    PerSecond,
    PerDay,
    Title,
    LanguageButton,
    InterestSlider,
    InterestReadout,
    InterestTitle,
    InterestLabel,
    InterestTable,
    CardLabels,
}

impl RenderTarget {
    pub const ALL: [RenderTarget; 13] = [
        RenderTarget::Total,
        RenderTarget::PerCapita,
        RenderTarget::PerHousehold,
        RenderTarget::PerSecond,
        RenderTarget::PerDay,
        RenderTarget::Title,
        RenderTarget::LanguageButton,
        RenderTarget::InterestSlider,
        RenderTarget::InterestReadout,
        RenderTarget::InterestTitle,
        RenderTarget::InterestLabel,
        RenderTarget::InterestTable,
        RenderTarget::CardLabels,
    ];

    /// Element id on the page
    pub fn id(self) -> &'static str {
        match self {
            RenderTarget::Total => "debt",
            RenderTarget::PerCapita => "perCapita",
            RenderTarget::PerHousehold => "perTaxpayingHousehold",
            RenderTarget::PerSecond => "perSecond",
            RenderTarget::PerDay => "perDay",
            RenderTarget::Title => "title",
            RenderTarget::LanguageButton => "langBtn",
            RenderTarget::InterestSlider => "interestRate",
            RenderTarget::InterestReadout => "interestValue",
            RenderTarget::InterestTitle => "interestTitle",
            RenderTarget::InterestLabel => "interestLabel",
            RenderTarget::InterestTable => "interestTableBody",
            RenderTarget::CardLabels => "cardLabels",
        }
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One formatted row of the interest table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub label: &'static str,
    pub total: String,
    pub per_capita: String,
    pub per_household: String,
}

/// Display strings for a frame, in the frame's language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFrame {
    pub total: String,
    pub per_capita: String,
    pub per_household: String,
    pub per_second: String,
    pub per_day: String,
    /// Slider readout, e.g. `2.95%`
    pub rate: String,
    pub interest_title: &'static str,
    pub headers: TableHeaders,
    pub rows: Vec<DisplayRow>,
}

impl DisplayFrame {
    pub fn new(metrics: &DerivedMetrics, language: Language, labels: &Labels, formatter: &Formatter) -> Self {
        let money = |value: f64| formatter.currency(value, language);

        let rows = InterestPeriod::ALL
            .iter()
            .map(|&period| {
                let row = metrics.interest_row(period);
                DisplayRow {
                    label: labels.row_label(period),
                    total: money(row.total),
                    per_capita: money(row.per_capita),
                    per_household: money(row.per_household),
                }
            })
            .collect();

        Self {
            total: money(metrics.total),
            per_capita: money(metrics.per_capita),
            per_household: money(metrics.per_household),
            per_second: money(metrics.per_second),
            per_day: money(metrics.per_day),
            rate: Formatter::percent(metrics.interest_rate),
            interest_title: labels.interest_title,
            headers: labels.table,
            rows,
        }
    }
}

/// Snapshot handed to the sink on every rendered frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Frame timestamp (ms)
    pub timestamp: f64,
    pub language: Language,
    /// Current interest rate for the slider position (percent)
    pub rate: f64,
    /// Direction of a recent rate change, while its highlight lasts
    pub highlight: Option<Direction>,
    pub metrics: DerivedMetrics,
    pub display: DisplayFrame,
}

/// Consumer of engine output
pub trait RenderSink {
    /// Targets this sink cannot display; a non-empty list aborts startup
    fn missing_targets(&self) -> Vec<RenderTarget> {
        Vec::new()
    }

    fn render_frame(&mut self, frame: &Frame) -> io::Result<()>;

    /// Static captions, sent at startup and on every language change
    fn render_labels(&mut self, labels: &Labels) -> io::Result<()>;

    /// Show the help dialog, or hide it when `None`
    fn render_help(&mut self, help: Option<&HelpContent>) -> io::Result<()>;
}

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Text rendering of the page for terminals and logs
pub struct TerminalSink<W: Write> {
    out: W,
    /// Redraw in place and color the rate highlight
    ansi: bool,
    labels: Option<Labels>,
    help: Option<HelpContent>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, ansi: bool) -> Self {
        Self {
            out,
            ansi,
            labels: None,
            help: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_help(&mut self) -> io::Result<()> {
        let Some(help) = &self.help else {
            return Ok(());
        };

        writeln!(self.out)?;
        writeln!(self.out, "== {} ==", help.title)?;
        for line in &help.intro {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out, "-- {} --", help.data_heading)?;
        for line in &help.data {
            writeln!(self.out, "  {line}")?;
        }
        Ok(())
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn render_frame(&mut self, frame: &Frame) -> io::Result<()> {
        let Some(labels) = self.labels else {
            return Err(io::Error::other("labels not rendered yet"));
        };
        let d = &frame.display;

        if self.ansi {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }

        writeln!(self.out, "{}", labels.title)?;
        writeln!(self.out, "{:>32}", d.total)?;
        writeln!(self.out, "{:<34}{:>20}", labels.per_capita, d.per_capita)?;
        writeln!(self.out, "{:<34}{:>20}", labels.per_household, d.per_household)?;
        writeln!(self.out, "{:<34}{:>20}", labels.per_second, d.per_second)?;
        writeln!(self.out, "{:<34}{:>20}", labels.per_day, d.per_day)?;
        writeln!(self.out)?;

        let rate = match (self.ansi, frame.highlight) {
            (true, Some(Direction::Increased)) => format!("{RED}{}{RESET}", d.rate),
            (true, Some(Direction::Decreased)) => format!("{GREEN}{}{RESET}", d.rate),
            _ => d.rate.clone(),
        };
        writeln!(self.out, "{}: {}", labels.interest_label, rate)?;
        writeln!(self.out, "{}", d.interest_title)?;
        writeln!(
            self.out,
            "{:<12}{:>24}{:>16}{:>18}",
            d.headers.period, d.headers.total, d.headers.per_capita, d.headers.per_household
        )?;
        for row in &d.rows {
            writeln!(
                self.out,
                "{:<12}{:>24}{:>16}{:>18}",
                row.label, row.total, row.per_capita, row.per_household
            )?;
        }
        writeln!(self.out, "[{}]", labels.language_button)?;

        self.write_help()?;
        self.out.flush()
    }

    fn render_labels(&mut self, labels: &Labels) -> io::Result<()> {
        self.labels = Some(*labels);
        Ok(())
    }

    fn render_help(&mut self, help: Option<&HelpContent>) -> io::Result<()> {
        self.help = help.cloned();
        Ok(())
    }
}
