//! Error types for an extraction cycle.

use std::time::Duration;
use thiserror::Error;

/// Everything that can abort an extraction cycle.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page did not finish loading within the navigation bound.
    #[error("navigation to {url} timed out after {}s", .timeout.as_secs_f32())]
    NavigationTimeout { url: String, timeout: Duration },

    /// The browser could not load the page (DNS, connection or TLS errors).
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The page did not have the structure the extractor expects.
    #[error("extraction failed: {0}")]
    ExtractionFailure(String),

    /// The browser process could not be launched or closed.
    #[error("browser resource error: {0}")]
    Resource(String),

    /// The whole cycle ran past its overall deadline.
    #[error("extraction cycle exceeded its {}s deadline", .0.as_secs_f32())]
    DeadlineExceeded(Duration),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ExtractError {
    /// Short machine-readable kind, used in JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NavigationTimeout { .. } => "navigation_timeout",
            Self::Navigation(_) => "navigation_error",
            Self::ExtractionFailure(_) => "extraction_failure",
            Self::Resource(_) => "resource_error",
            Self::DeadlineExceeded(_) => "deadline_exceeded",
            Self::Config(_) => "config_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
