//! # Domain Models
//!
//! Canonical domain types for fxsignal.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CurrencyCode`] | One of the 11 supported currencies |
//! | [`RateSeries`] | Daily rates for a pair, oldest first |
//! | [`Signal`] | green / amber / red / unknown verdict |
//! | [`UnknownReason`] | Why a verdict is unknown |
//! | [`SignalResult`] | Full classifier output |
//!
//! All values are built per request and never persisted.

mod currency;
mod series;
mod signal;

pub use currency::{normalize_code, CurrencyCode};
pub use series::RateSeries;
pub use signal::{Signal, SignalResult, UnknownReason};
