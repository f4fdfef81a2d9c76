use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Three-tier conversion verdict, or `Unknown` when data is insufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Green,
    Amber,
    Red,
    Unknown,
}

impl Signal {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Red => "red",
            Self::Unknown => "unknown",
        }
    }

    /// Human label shown next to the verdict.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "Great time to convert",
            Self::Amber => "Decent time to convert",
            Self::Red => "Probably wait",
            Self::Unknown => "Not enough data",
        }
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a result is [`Signal::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownReason {
    /// The provider returned no rates for the history window.
    NoData,
    /// History exists but the provider has no current quote.
    NoLatest,
}

impl UnknownReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoData => "no_data",
            Self::NoLatest => "no_latest",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NoData => "Not enough data",
            Self::NoLatest => "No current quote",
        }
    }
}

/// Outcome of one signal computation, serialized as the `/api/signal` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub signal: Signal,
    pub label: String,
    pub latest: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p50: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p75: Option<f64>,
    pub days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnknownReason>,
}

impl SignalResult {
    pub fn unknown(reason: UnknownReason, days: u32) -> Self {
        Self {
            signal: Signal::Unknown,
            label: reason.label().to_owned(),
            latest: None,
            p50: None,
            p75: None,
            days,
            reason: Some(reason),
        }
    }

    pub fn classified(signal: Signal, latest: f64, p50: f64, p75: f64, days: u32) -> Self {
        Self {
            signal,
            label: signal.label().to_owned(),
            latest: Some(latest),
            p50: Some(p50),
            p75: Some(p75),
            days,
            reason: None,
        }
    }
}
