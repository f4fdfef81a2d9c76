use std::io;
use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fxsignal_core::{CurrencyCode, SignalError, SourceError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Request-level failure, rendered as the JSON error body of `/api/*`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{error}")]
    Validation {
        error: ValidationError,
        supported: Vec<CurrencyCode>,
    },

    #[error("malformed query string: {message}")]
    MalformedQuery {
        message: String,
        supported: Vec<CurrencyCode>,
    },

    #[error("upstream fetch failed: {0}")]
    Upstream(SourceError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(error: ValidationError, supported: &[CurrencyCode]) -> Self {
        Self::Validation {
            error,
            supported: supported.to_vec(),
        }
    }

    pub fn malformed_query(message: impl Into<String>, supported: &[CurrencyCode]) -> Self {
        Self::MalformedQuery {
            message: message.into(),
            supported: supported.to_vec(),
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::MalformedQuery { .. } => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable `error` field of the response body.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation { error, .. } => error.code(),
            Self::MalformedQuery { .. } => "unsupported_currency",
            Self::Upstream(_) => "http_error",
            Self::Internal(_) => "unknown",
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Validation {
                error: ValidationError::SameCurrency { .. },
                ..
            } => ErrorBody::bare(self.code()),
            Self::Validation { supported, .. } => ErrorBody {
                error: self.code(),
                supported: Some(supported.clone()),
                detail: None,
            },
            Self::MalformedQuery { message, supported } => ErrorBody {
                error: self.code(),
                supported: Some(supported.clone()),
                detail: Some(message.clone()),
            },
            Self::Upstream(source) => ErrorBody::detailed(self.code(), source.message()),
            Self::Internal(message) => ErrorBody::detailed(self.code(), message),
        }
    }
}

impl From<SignalError> for ApiError {
    fn from(error: SignalError) -> Self {
        match error {
            SignalError::Upstream(source) => Self::Upstream(source),
            SignalError::Internal(message) => Self::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    supported: Option<Vec<CurrencyCode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ErrorBody {
    fn bare(error: &'static str) -> Self {
        Self {
            error,
            supported: None,
            detail: None,
        }
    }

    fn detailed(error: &'static str, detail: impl Into<String>) -> Self {
        Self {
            error,
            supported: None,
            detail: Some(detail.into()),
        }
    }
}

/// Server bootstrap failure.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_currency_body_has_only_error_code() {
        let error = ApiError::validation(
            ValidationError::SameCurrency {
                code: String::from("USD"),
            },
            &CurrencyCode::ALL,
        );
        let body = serde_json::to_value(error.body()).expect("serialize");
        assert_eq!(body, serde_json::json!({ "error": "base_target_same" }));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unsupported_body_lists_supported_codes() {
        let error = ApiError::validation(
            ValidationError::UnsupportedCurrency {
                value: String::from("MXN"),
            },
            &[CurrencyCode::Usd, CurrencyCode::Eur],
        );
        let body = serde_json::to_value(error.body()).expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({ "error": "unsupported_currency", "supported": ["USD", "EUR"] })
        );
    }

    #[test]
    fn malformed_query_is_a_json_validation_error() {
        let error = ApiError::malformed_query("bad query", &[CurrencyCode::Usd]);
        let body = serde_json::to_value(error.body()).expect("serialize");
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({
                "error": "unsupported_currency",
                "supported": ["USD"],
                "detail": "bad query"
            })
        );
    }

    #[test]
    fn signal_errors_map_to_gateway_and_internal() {
        let upstream = ApiError::from(SignalError::Upstream(SourceError::unavailable("down")));
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream.code(), "http_error");

        let internal = ApiError::from(SignalError::Internal(String::from("boom")));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.code(), "unknown");
    }
}
