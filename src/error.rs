//! Error types for configuration loading and engine startup

use std::path::PathBuf;

use thiserror::Error;

use crate::render::RenderTarget;

/// Errors raised while loading or validating a [`DebtConfig`](crate::DebtConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },

    #[error("unknown language '{0}' (expected 'fr' or 'en')")]
    UnknownLanguage(String),

    #[error("unknown step size '{0}' (expected 'coarse' or 'fine')")]
    UnknownStepSize(String),
}

/// Errors raised by the [`DebtClock`](crate::DebtClock) engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    /// The render sink cannot display every metric; the update cycle must not start
    #[error("render sink is missing targets: {}", join_targets(.0))]
    MissingRenderTargets(Vec<RenderTarget>),

    #[error("render sink failed")]
    Render(#[from] std::io::Error),
}

fn join_targets(targets: &[RenderTarget]) -> String {
    targets
        .iter()
        .map(|t| t.id())
        .collect::<Vec<_>>()
        .join(", ")
}
