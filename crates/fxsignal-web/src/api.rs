use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use fxsignal_core::{CurrencyCode, CurrencyPair, SignalResult};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub const DEFAULT_BASE: &str = "USD";
pub const DEFAULT_TARGET: &str = "EUR";

/// Raw query string as ordered key/value pairs; repeated keys are kept.
pub type RawPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Query parameters for `/api/signal` and `/og.svg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairQuery {
    pub base: String,
    pub target: String,
}

impl Default for PairQuery {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE.to_owned(),
            target: DEFAULT_TARGET.to_owned(),
        }
    }
}

impl PairQuery {
    /// Build from decoded pairs. The first `base` and the first `target`
    /// win; missing keys take the USD/EUR defaults and unknown keys are
    /// ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut base = None;
        let mut target = None;
        for (key, value) in pairs {
            match key.as_str() {
                "base" if base.is_none() => base = Some(value),
                "target" if target.is_none() => target = Some(value),
                _ => {}
            }
        }

        let defaults = Self::default();
        Self {
            base: base.unwrap_or(defaults.base),
            target: target.unwrap_or(defaults.target),
        }
    }

    /// Accept the extractor result, turning a rejected query string into
    /// the JSON validation error instead of axum's plain-text body.
    pub fn from_raw(raw: RawPairs, supported: &[CurrencyCode]) -> Result<Self, ApiError> {
        match raw {
            Ok(Query(pairs)) => Ok(Self::from_pairs(pairs)),
            Err(rejection) => Err(ApiError::malformed_query(rejection.body_text(), supported)),
        }
    }
}

/// Validate the pair and run the classifier with the configured settings.
///
/// Validation failures return before any upstream call is made.
pub async fn evaluate(state: &AppState, query: &PairQuery) -> Result<(CurrencyPair, SignalResult), ApiError> {
    let supported = &state.config.supported;
    let pair = CurrencyPair::validate(&query.base, &query.target, supported)
        .map_err(|error| ApiError::validation(error, supported))?;

    let result = state
        .classifier
        .compute(pair.base, pair.target)
        .await
        .map_err(ApiError::from)?;
    Ok((pair, result))
}

/// GET /api/signal?base=USD&target=EUR
#[instrument(skip(state, raw), fields(request_id = %Uuid::new_v4()))]
pub async fn signal_handler(
    State(state): State<AppState>,
    raw: RawPairs,
) -> Result<Json<SignalResult>, ApiError> {
    let outcome = match PairQuery::from_raw(raw, &state.config.supported) {
        Ok(query) => evaluate(&state, &query).await,
        Err(error) => Err(error),
    };
    match outcome {
        Ok((pair, result)) => {
            info!(%pair, signal = %result.signal, "signal served");
            Ok(Json(result))
        }
        Err(error) => {
            match &error {
                ApiError::Validation { error, .. } => info!(%error, "rejected signal request"),
                ApiError::MalformedQuery { message, .. } => info!(%message, "rejected query string"),
                other => warn!(error = %other, "signal request failed"),
            }
            Err(error)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CurrencyEntry {
    pub code: CurrencyCode,
    pub flag: &'static str,
    pub region: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CurrenciesResponse {
    pub supported: Vec<CurrencyEntry>,
}

/// GET /api/currencies
pub async fn currencies_handler(State(state): State<AppState>) -> Json<CurrenciesResponse> {
    let supported = state
        .config
        .supported
        .iter()
        .map(|&code| CurrencyEntry {
            code,
            flag: code.flag(),
            region: code.region(),
        })
        .collect();
    Json(CurrenciesResponse { supported })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /healthz
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
