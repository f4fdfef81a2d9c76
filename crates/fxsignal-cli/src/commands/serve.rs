use fxsignal_core::AppConfig;
use fxsignal_web::AppState;
use tracing::info;

use crate::cli::ServeArgs;
use crate::error::CliError;

use super::rate_source;

pub async fn run(args: &ServeArgs, config: AppConfig) -> Result<(), CliError> {
    let config = match args.bind {
        Some(bind) => config.with_bind(bind),
        None => config,
    };
    let bind = config.server.bind;
    info!(provider = %config.provider.base_url, "using rate provider");

    let source = rate_source(&config);
    fxsignal_web::serve(AppState::new(config, source), bind).await?;
    Ok(())
}
