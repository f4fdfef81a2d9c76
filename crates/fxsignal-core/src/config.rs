//! Process configuration, loaded once at startup.
//!
//! Every key is read with an `FXSIGNAL_` prefix first; the thresholds and
//! window also accept the bare names (`HISTORY_DAYS`, `P75_THRESHOLD`,
//! `P50_THRESHOLD`).
//!
//! | Key | Default |
//! |-----|---------|
//! | `FXSIGNAL_HISTORY_DAYS` | `180` |
//! | `FXSIGNAL_P75_THRESHOLD` | `0.75` |
//! | `FXSIGNAL_P50_THRESHOLD` | `0.50` |
//! | `FXSIGNAL_PROVIDER_URL` | `https://api.frankfurter.app` |
//! | `FXSIGNAL_SERIES_TIMEOUT_MS` | `15000` |
//! | `FXSIGNAL_LATEST_TIMEOUT_MS` | `10000` |
//! | `FXSIGNAL_BIND` | `0.0.0.0:8000` |
//! | `FXSIGNAL_STATIC_DIR` | `static` |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{ConfigError, CurrencyCode};

pub const DEFAULT_HISTORY_DAYS: u32 = 180;
/// Upper bound on the lookback window; keeps `today - days` a valid date.
pub const MAX_HISTORY_DAYS: u32 = 36_500;
pub const DEFAULT_UPPER_QUANTILE: f64 = 0.75;
pub const DEFAULT_LOWER_QUANTILE: f64 = 0.50;
pub const DEFAULT_PROVIDER_URL: &str = "https://api.frankfurter.app";
pub const DEFAULT_SERIES_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_LATEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Quantile fractions separating the three signal tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// At or above this quantile the signal is at least amber.
    pub lower: f64,
    /// At or above this quantile the signal is green.
    pub upper: f64,
}

impl Thresholds {
    pub fn new(lower: f64, upper: f64) -> Result<Self, ConfigError> {
        let lower = check_quantile("lower quantile", lower)?;
        let upper = check_quantile("upper quantile", upper)?;
        if lower > upper {
            return Err(ConfigError::QuantilesInverted { lower, upper });
        }
        Ok(Self { lower, upper })
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER_QUANTILE,
            upper: DEFAULT_UPPER_QUANTILE,
        }
    }
}

/// Inputs to every classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSettings {
    pub history_days: u32,
    pub thresholds: Thresholds,
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            history_days: DEFAULT_HISTORY_DAYS,
            thresholds: Thresholds::default(),
        }
    }
}

/// Upstream provider endpoint and per-call timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub series_timeout_ms: u64,
    pub latest_timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_PROVIDER_URL),
            series_timeout_ms: DEFAULT_SERIES_TIMEOUT_MS,
            latest_timeout_ms: DEFAULT_LATEST_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

/// Complete process configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub signal: SignalSettings,
    pub provider: ProviderConfig,
    pub server: ServerConfig,
    pub supported: Vec<CurrencyCode>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            signal: SignalSettings::default(),
            provider: ProviderConfig::default(),
            server: ServerConfig::default(),
            supported: CurrencyCode::ALL.to_vec(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset keys take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset, so a blank prefixed key still falls
        // through to the bare one. The key actually read is reported back.
        let present = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .map(|value| (key, value))
        };
        let read = |primary: &'static str, fallback: Option<&'static str>| {
            present(primary).or_else(|| fallback.and_then(|key| present(key)))
        };

        let history_days = match read("FXSIGNAL_HISTORY_DAYS", Some("HISTORY_DAYS")) {
            Some((key, value)) => {
                let days: u32 = parse_value(key, &value, "non-negative integer")?;
                check_history_days(key, days)?
            }
            None => DEFAULT_HISTORY_DAYS,
        };

        let upper = match read("FXSIGNAL_P75_THRESHOLD", Some("P75_THRESHOLD")) {
            Some((key, value)) => check_quantile(key, parse_value(key, &value, "number")?)?,
            None => DEFAULT_UPPER_QUANTILE,
        };
        let lower = match read("FXSIGNAL_P50_THRESHOLD", Some("P50_THRESHOLD")) {
            Some((key, value)) => check_quantile(key, parse_value(key, &value, "number")?)?,
            None => DEFAULT_LOWER_QUANTILE,
        };
        let thresholds = Thresholds::new(lower, upper)?;

        let base_url = match read("FXSIGNAL_PROVIDER_URL", None) {
            Some((_, value)) => value.trim_end_matches('/').to_owned(),
            None => String::from(DEFAULT_PROVIDER_URL),
        };
        if base_url.is_empty() {
            return Err(ConfigError::EmptyProviderUrl);
        }

        let series_timeout_ms = read_timeout(
            read("FXSIGNAL_SERIES_TIMEOUT_MS", None),
            DEFAULT_SERIES_TIMEOUT_MS,
        )?;
        let latest_timeout_ms = read_timeout(
            read("FXSIGNAL_LATEST_TIMEOUT_MS", None),
            DEFAULT_LATEST_TIMEOUT_MS,
        )?;

        let bind = match read("FXSIGNAL_BIND", None) {
            Some((key, value)) => parse_value(key, &value, "socket address")?,
            None => parse_value("FXSIGNAL_BIND", DEFAULT_BIND, "socket address")?,
        };
        let static_dir = read("FXSIGNAL_STATIC_DIR", None)
            .map(|(_, value)| PathBuf::from(value))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Self {
            signal: SignalSettings {
                history_days,
                thresholds,
            },
            provider: ProviderConfig {
                base_url,
                series_timeout_ms,
                latest_timeout_ms,
            },
            server: ServerConfig { bind, static_dir },
            supported: CurrencyCode::ALL.to_vec(),
        })
    }

    /// Replace the lookback window, applying the same lower bound as the
    /// environment loader.
    pub fn with_history_days(mut self, days: u32) -> Result<Self, ConfigError> {
        self.signal.history_days = check_history_days("history_days", days)?;
        Ok(self)
    }

    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.server.bind = bind;
        self
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str, expected: &'static str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Unparseable {
        key,
        value: value.to_owned(),
        expected,
    })
}

fn check_history_days(key: &'static str, days: u32) -> Result<u32, ConfigError> {
    if days < 1 {
        return Err(ConfigError::TooSmall {
            key,
            value: u64::from(days),
            min: 1,
        });
    }
    if days > MAX_HISTORY_DAYS {
        return Err(ConfigError::TooLarge {
            key,
            value: u64::from(days),
            max: u64::from(MAX_HISTORY_DAYS),
        });
    }
    Ok(days)
}

fn check_quantile(key: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::QuantileOutOfRange { key, value })
    }
}

fn read_timeout(entry: Option<(&'static str, String)>, default: u64) -> Result<u64, ConfigError> {
    let Some((key, value)) = entry else {
        return Ok(default);
    };
    let timeout: u64 = parse_value(key, &value, "millisecond count")?;
    if timeout < 1 {
        return Err(ConfigError::TooSmall {
            key,
            value: timeout,
            min: 1,
        });
    }
    Ok(timeout)
}
