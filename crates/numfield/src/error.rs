//! Error types for numfield.

use thiserror::Error;

/// Errors raised while validating configuration or constructing a formatter.
///
/// These errors surface at construction or reconfiguration time only; edit
/// operations themselves never fail, they are rejected silently the way a
/// text input swallows an invalid keystroke.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The locale identifier could not be parsed as a BCP 47 tag.
    #[error("invalid locale identifier `{tag}`")]
    InvalidLocale {
        /// The offending tag.
        tag: String,
    },

    /// The currency style was selected without a currency code.
    #[error("currency style requires a currency code")]
    MissingCurrency,

    /// Minimum fraction digits exceed the maximum.
    #[error("minimum fraction digits ({min}) exceed maximum fraction digits ({max})")]
    FractionDigitsOutOfOrder {
        /// Configured minimum.
        min: u8,
        /// Configured maximum.
        max: u8,
    },

    /// The range minimum exceeds the range maximum.
    #[error("range minimum ({min}) exceeds range maximum ({max})")]
    RangeOutOfOrder {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// The step size must be a positive, finite number.
    #[error("step must be positive and finite, got {step}")]
    InvalidStep {
        /// Configured step.
        step: f64,
    },
}
