use thiserror::Error;

use fxsignal_core::{ConfigError, SignalError, ValidationError};
use fxsignal_web::WebError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Web(#[from] WebError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Config(_) => 3,
            Self::Signal(SignalError::Upstream(_)) => 4,
            Self::Signal(SignalError::Internal(_)) | Self::Serialization(_) => 1,
            Self::Web(_) | Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxsignal_core::SourceError;

    #[test]
    fn exit_codes_follow_error_category() {
        let same = CliError::from(ValidationError::SameCurrency {
            code: String::from("USD"),
        });
        assert_eq!(same.exit_code(), 2);

        let config = CliError::from(ConfigError::EmptyProviderUrl);
        assert_eq!(config.exit_code(), 3);

        let upstream = CliError::from(SignalError::Upstream(SourceError::unavailable("down")));
        assert_eq!(upstream.exit_code(), 4);

        let internal = CliError::from(SignalError::Internal(String::from("boom")));
        assert_eq!(internal.exit_code(), 1);
    }
}
