//! CLI argument definitions.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Run the web server |
//! | `signal` | Classify one currency pair and print the result |
//! | `currencies` | List supported currencies |
//!
//! Configuration comes from `FXSIGNAL_*` environment variables; the flags
//! below override individual values.
//!
//! ```bash
//! fxsignal serve --bind 127.0.0.1:8000
//! fxsignal signal --base GBP --target JPY --pretty
//! RUST_LOG=debug fxsignal signal --history-days 30
//! ```

use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};

/// Is now a good time to convert currency?
///
/// Compares today's exchange rate with the trailing history window and
/// answers green, amber or red.
#[derive(Debug, Parser)]
#[command(name = "fxsignal", author, version, about = "FX rate signal service")]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the page, JSON API and preview image.
    Serve(ServeArgs),
    /// Compute the signal for one pair.
    Signal(SignalArgs),
    /// Print the supported currencies.
    Currencies,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Socket address to listen on (overrides FXSIGNAL_BIND).
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Lookback window in days (overrides FXSIGNAL_HISTORY_DAYS).
    #[arg(long)]
    pub history_days: Option<u32>,
}

#[derive(Debug, Args)]
pub struct SignalArgs {
    /// Currency to convert from.
    #[arg(long, default_value = "USD")]
    pub base: String,

    /// Currency to convert to.
    #[arg(long, default_value = "EUR")]
    pub target: String,

    /// Lookback window in days (overrides FXSIGNAL_HISTORY_DAYS).
    #[arg(long)]
    pub history_days: Option<u32>,
}

impl Command {
    pub fn history_days(&self) -> Option<u32> {
        match self {
            Self::Serve(args) => args.history_days,
            Self::Signal(args) => args.history_days,
            Self::Currencies => None,
        }
    }
}
