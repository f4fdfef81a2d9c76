use fxsignal_core::{compute_signal, AppConfig, CurrencyPair, RateSource};
use serde_json::Value;

use crate::cli::SignalArgs;
use crate::error::CliError;

pub async fn run(
    args: &SignalArgs,
    config: &AppConfig,
    source: &dyn RateSource,
) -> Result<Value, CliError> {
    let pair = CurrencyPair::validate(&args.base, &args.target, &config.supported)?;
    let result = compute_signal(
        source,
        pair.base,
        pair.target,
        config.signal.history_days,
        config.signal.thresholds,
    )
    .await?;
    Ok(serde_json::to_value(result)?)
}
