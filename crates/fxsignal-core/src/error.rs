use thiserror::Error;

/// Validation and contract errors exposed by `fxsignal-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("currency code cannot be empty")]
    EmptyCurrency,
    #[error("unsupported currency '{value}'")]
    UnsupportedCurrency { value: String },
    #[error("base and target currency are both '{code}'")]
    SameCurrency { code: String },
}

impl ValidationError {
    /// Stable machine-readable code used in API and CLI error bodies.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SameCurrency { .. } => "base_target_same",
            Self::EmptyCurrency | Self::UnsupportedCurrency { .. } => "unsupported_currency",
        }
    }
}

/// Errors raised while loading [`AppConfig`](crate::AppConfig).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}: '{value}'")]
    Unparseable {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("{key} must be at least {min}, got {value}")]
    TooSmall { key: &'static str, value: u64, min: u64 },
    #[error("{key} must be at most {max}, got {value}")]
    TooLarge { key: &'static str, value: u64, max: u64 },
    #[error("{key} must be a finite fraction in [0, 1], got {value}")]
    QuantileOutOfRange { key: &'static str, value: f64 },
    #[error("lower quantile {lower} must not exceed upper quantile {upper}")]
    QuantilesInverted { lower: f64, upper: f64 },
    #[error("provider url cannot be empty")]
    EmptyProviderUrl,
}
