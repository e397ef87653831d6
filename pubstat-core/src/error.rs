//! Structured errors
//!
//! Every failure surfaces immediately to the caller. Nothing is clamped,
//! substituted or retried.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";
}

/// Error taxonomy shared by the formatter, the engine and the provider
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatError {
    /// Argument outside the domain of the operation
    #[error("Domain error in '{argument}': {details}")]
    Domain { argument: String, details: String },

    /// Unrecognized or missing option
    #[error("Configuration error in '{option}': {details}")]
    Configuration { option: String, details: String },

    /// The statistics provider could not complete the test
    #[error("Provider error in {test}(): {details}")]
    Provider { test: String, details: String },
}

impl StatError {
    pub fn domain(argument: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Domain {
            argument: argument.into(),
            details: details.into(),
        }
    }

    pub fn configuration(option: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Configuration {
            option: option.into(),
            details: details.into(),
        }
    }

    pub fn provider(test: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Provider {
            test: test.into(),
            details: details.into(),
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Domain { .. } => codes::DOMAIN_ERROR,
            Self::Configuration { .. } => codes::CONFIG_ERROR,
            Self::Provider { .. } => codes::PROVIDER_ERROR,
        }
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }

    // ========== Common Error Constructors ==========

    /// Probability outside [0, 1]
    pub fn probability(argument: &str, value: f64) -> Self {
        Self::domain(argument, format!("probability must lie in [0, 1], got {}", value))
    }

    /// NaN or infinite input
    pub fn non_finite(argument: &str, value: f64) -> Self {
        Self::domain(argument, format!("value must be finite, got {}", value))
    }

    /// Confidence percentage outside [50, 100]
    pub fn percent(argument: &str, value: f64) -> Self {
        Self::domain(argument, format!("percentage must lie in [50, 100], got {}", value))
    }

    /// Too few observations for the requested computation
    pub fn too_small(argument: &str, required: usize, got: usize) -> Self {
        Self::domain(
            argument,
            format!("requires at least {} observations, got {}", required, got),
        )
    }
}
