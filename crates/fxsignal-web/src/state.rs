use std::sync::Arc;

use fxsignal_core::{AppConfig, RateSource, SignalClassifier};

/// Application state shared across all handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub classifier: SignalClassifier,
}

impl AppState {
    pub fn new(config: AppConfig, source: Arc<dyn RateSource>) -> Self {
        let classifier = SignalClassifier::new(source, config.signal);
        Self {
            config: Arc::new(config),
            classifier,
        }
    }
}
