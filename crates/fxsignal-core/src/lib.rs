//! # fxsignal core
//!
//! Domain types, the rate source contract and the signal classifier behind
//! the fxsignal service.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Frankfurter) |
//! | [`config`] | Process configuration loaded from the environment |
//! | [`domain`] | Currency codes, rate series and signal results |
//! | [`error`] | Validation and configuration errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`pair`] | Validated base/target pair |
//! | [`percentile`] | Linear-interpolated percentile |
//! | [`rate_source`] | Rate source trait and source errors |
//! | [`signal`] | Classifier |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fxsignal_core::{compute_signal, CurrencyCode, FrankfurterAdapter, Thresholds};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = FrankfurterAdapter::default();
//!     let result = compute_signal(
//!         &adapter,
//!         CurrencyCode::Usd,
//!         CurrencyCode::Eur,
//!         180,
//!         Thresholds::default(),
//!     )
//!     .await?;
//!     println!("{}: {}", result.signal, result.label);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ Web / CLI       │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ SignalClassifier│────▶│ percentile()     │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ RateSource      │────▶│ HttpClient       │
//! │ (Frankfurter)   │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod pair;
pub mod percentile;
pub mod rate_source;
pub mod signal;

// Adapter implementations
pub use adapters::{history_window, FrankfurterAdapter};

// Configuration
pub use config::{AppConfig, ProviderConfig, ServerConfig, SignalSettings, Thresholds};

// Domain models
pub use domain::{normalize_code, CurrencyCode, RateSeries, Signal, SignalResult, UnknownReason};

// Error types
pub use error::{ConfigError, ValidationError};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use pair::CurrencyPair;
pub use percentile::percentile;

// Rate source trait
pub use rate_source::{RateSource, SourceError, SourceErrorKind, SourceFuture};

// Classifier
pub use signal::{classify, compute_signal, SignalClassifier, SignalError};
