//! Signal classification over a rate source.
//!
//! The flow for one pair is fixed: fetch the history window, short-circuit
//! on an empty series, fetch the latest rate, short-circuit when it is
//! missing, then compare the latest rate against the two percentiles.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{SignalSettings, Thresholds};
use crate::rate_source::{RateSource, SourceError};
use crate::{CurrencyCode, Signal, SignalResult, UnknownReason};

/// Failure of a classification. "No data" is not a failure; see
/// [`UnknownReason`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    #[error("upstream fetch failed: {0}")]
    Upstream(SourceError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<SourceError> for SignalError {
    fn from(error: SourceError) -> Self {
        if error.is_upstream() {
            Self::Upstream(error)
        } else {
            Self::Internal(error.message().to_owned())
        }
    }
}

/// Tier for `latest` given the two percentile cut-offs.
///
/// Ties go to the higher tier: a rate exactly at `p75` is green and a rate
/// exactly at `p50` is amber.
pub fn classify(latest: f64, p50: f64, p75: f64) -> Signal {
    if latest >= p75 {
        Signal::Green
    } else if latest >= p50 {
        Signal::Amber
    } else {
        Signal::Red
    }
}

/// Computes the signal for `base -> target` over the trailing
/// `history_days`.
///
/// # Errors
///
/// Returns [`SignalError::Upstream`] when either fetch fails. The latest rate
/// is never requested when the history is empty.
pub async fn compute_signal(
    source: &dyn RateSource,
    base: CurrencyCode,
    target: CurrencyCode,
    history_days: u32,
    thresholds: Thresholds,
) -> Result<SignalResult, SignalError> {
    let series = source.time_series(base, target, history_days).await?;
    if series.is_empty() {
        debug!(%base, %target, history_days, "empty history window");
        return Ok(SignalResult::unknown(UnknownReason::NoData, history_days));
    }

    let Some(latest) = source.latest(base, target).await? else {
        debug!(%base, %target, "no latest quote");
        return Ok(SignalResult::unknown(UnknownReason::NoLatest, history_days));
    };

    let (Some(p50), Some(p75)) = (
        series.percentile(thresholds.lower),
        series.percentile(thresholds.upper),
    ) else {
        return Err(SignalError::Internal(String::from(
            "percentile undefined for non-empty series",
        )));
    };

    let signal = classify(latest, p50, p75);
    info!(
        %base,
        %target,
        %signal,
        latest,
        p50,
        p75,
        points = series.len(),
        "signal computed"
    );
    Ok(SignalResult::classified(signal, latest, p50, p75, history_days))
}

/// A rate source bundled with the settings it should be classified under.
///
/// Cheap to clone; the web layer keeps one in its shared state.
#[derive(Clone)]
pub struct SignalClassifier {
    source: Arc<dyn RateSource>,
    settings: SignalSettings,
}

impl SignalClassifier {
    pub fn new(source: Arc<dyn RateSource>, settings: SignalSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> SignalSettings {
        self.settings
    }

    pub async fn compute(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<SignalResult, SignalError> {
        compute_signal(
            self.source.as_ref(),
            base,
            target,
            self.settings.history_days,
            self.settings.thresholds,
        )
        .await
    }
}
