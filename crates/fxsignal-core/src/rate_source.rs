//! Rate source trait and its error type.
//!
//! [`RateSource`] is the narrow contract between the classifier and an
//! exchange-rate provider. It has exactly two operations:
//!
//! | Operation | Response | Description |
//! |-----------|----------|-------------|
//! | [`time_series`](RateSource::time_series) | [`RateSeries`] | Daily rates over a trailing window |
//! | [`latest`](RateSource::latest) | `Option<f64>` | Most recent published rate |
//!
//! "No data" is not an error: an empty series or a `None` latest rate is a
//! normal outcome. [`SourceError`] is reserved for failed fetches.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{CurrencyCode, RateSeries};

/// Boxed future returned by [`RateSource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Transport failure or timeout; no response was received.
    Unavailable,
    /// The provider answered with a non-2xx status.
    Status,
    /// The response body could not be decoded.
    Malformed,
    /// A local failure unrelated to the provider.
    Internal,
}

/// Structured error for a failed upstream fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    status: Option<u16>,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            status: None,
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Status,
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Malformed,
            message: message.into(),
            status: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            status: None,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status returned by the provider, for [`SourceErrorKind::Status`].
    pub const fn http_status(&self) -> Option<u16> {
        self.status
    }

    /// True when the provider itself failed rather than this process.
    pub const fn is_upstream(&self) -> bool {
        !matches!(self.kind, SourceErrorKind::Internal)
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::Status => "source.status",
            SourceErrorKind::Malformed => "source.malformed",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Exchange-rate provider contract.
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// request the server handles.
///
/// # Example Implementation
///
/// ```rust
/// use fxsignal_core::{CurrencyCode, RateSeries, RateSource, SourceFuture};
///
/// struct Flat(f64);
///
/// impl RateSource for Flat {
///     fn time_series<'a>(
///         &'a self,
///         _base: CurrencyCode,
///         _target: CurrencyCode,
///         days: u32,
///     ) -> SourceFuture<'a, RateSeries> {
///         let rates = vec![self.0; days as usize];
///         Box::pin(async move { Ok(RateSeries::new(rates)) })
///     }
///
///     fn latest<'a>(
///         &'a self,
///         _base: CurrencyCode,
///         _target: CurrencyCode,
///     ) -> SourceFuture<'a, Option<f64>> {
///         Box::pin(async move { Ok(Some(self.0)) })
///     }
/// }
/// ```
pub trait RateSource: Send + Sync {
    /// Fetches daily `base -> target` rates for the trailing `days` days
    /// (inclusive of today), oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the provider is unreachable, times out,
    /// answers with a non-2xx status, or sends an undecodable body.
    fn time_series<'a>(
        &'a self,
        base: CurrencyCode,
        target: CurrencyCode,
        days: u32,
    ) -> SourceFuture<'a, RateSeries>;

    /// Fetches the most recent `base -> target` rate, `None` when the
    /// provider has no quote for `target`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`time_series`](RateSource::time_series).
    fn latest<'a>(
        &'a self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> SourceFuture<'a, Option<f64>>;
}
