mod currencies;
mod serve;
mod signal;

use std::sync::Arc;

use fxsignal_core::{AppConfig, FrankfurterAdapter, RateSource, ReqwestHttpClient};
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Environment configuration with command-line overrides applied.
pub fn load_config(cli: &Cli) -> Result<AppConfig, CliError> {
    let mut config = AppConfig::from_env()?;
    if let Some(days) = cli.command.history_days() {
        config = config.with_history_days(days)?;
    }
    debug!(?config, "configuration loaded");
    Ok(config)
}

/// Runs the selected command. Returns the JSON document to print, if any.
pub async fn run(cli: &Cli, config: AppConfig) -> Result<Option<Value>, CliError> {
    match &cli.command {
        Command::Serve(args) => {
            serve::run(args, config).await?;
            Ok(None)
        }
        Command::Signal(args) => {
            let source = rate_source(&config);
            signal::run(args, &config, source.as_ref()).await.map(Some)
        }
        Command::Currencies => currencies::run(&config).map(Some),
    }
}

fn rate_source(config: &AppConfig) -> Arc<dyn RateSource> {
    let http_client = Arc::new(ReqwestHttpClient::new());
    Arc::new(FrankfurterAdapter::new(http_client, &config.provider))
}
