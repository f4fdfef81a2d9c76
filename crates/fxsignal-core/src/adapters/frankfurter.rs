use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Deserialize;
use time::{Date, Duration, OffsetDateTime};
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::rate_source::{RateSource, SourceError, SourceFuture};
use crate::{CurrencyCode, RateSeries};

/// Adapter for the Frankfurter API (<https://www.frankfurter.app>), a free
/// ECB-backed rate service that needs no key.
#[derive(Clone)]
pub struct FrankfurterAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    series_timeout_ms: u64,
    latest_timeout_ms: u64,
    fixed_today: Option<Date>,
}

impl Default for FrankfurterAdapter {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), &ProviderConfig::default())
    }
}

impl FrankfurterAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &ProviderConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            series_timeout_ms: config.series_timeout_ms,
            latest_timeout_ms: config.latest_timeout_ms,
            fixed_today: None,
        }
    }

    /// Pin "today" instead of reading the UTC clock.
    pub fn with_fixed_today(mut self, today: Date) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn today(&self) -> Date {
        self.fixed_today
            .unwrap_or_else(|| OffsetDateTime::now_utc().date())
    }

    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, SourceError> {
        let url = request.full_url();
        debug!(%url, timeout_ms = request.timeout_ms, "calling frankfurter");

        let response = self.http_client.execute(request).await.map_err(|error| {
            warn!(%url, timed_out = error.timed_out(), "frankfurter transport error: {}", error.message());
            SourceError::unavailable(format!("frankfurter transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            warn!(%url, status = response.status, "frankfurter returned error status");
            return Err(SourceError::status(
                response.status,
                format!("frankfurter returned status {} for {url}", response.status),
            ));
        }

        Ok(response)
    }

    async fn fetch_time_series(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
        days: u32,
    ) -> Result<RateSeries, SourceError> {
        let (start, end) = history_window(self.today(), days)?;
        let request = HttpRequest::get(format!("{}/{start}..{end}", self.base_url))
            .with_query("from", base.as_str())
            .with_query("to", target.as_str())
            .with_header("accept", "application/json")
            .with_timeout_ms(self.series_timeout_ms);

        let response = self.fetch(request).await?;
        let payload: FrankfurterSeriesResponse = serde_json::from_str(&response.body)
            .map_err(|e| SourceError::malformed(format!("failed to parse frankfurter time series: {e}")))?;

        let series = payload.into_series(target);
        debug!(%base, %target, days, points = series.len(), "time series fetched");
        Ok(series)
    }

    async fn fetch_latest(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<Option<f64>, SourceError> {
        let request = HttpRequest::get(format!("{}/latest", self.base_url))
            .with_query("from", base.as_str())
            .with_query("to", target.as_str())
            .with_header("accept", "application/json")
            .with_timeout_ms(self.latest_timeout_ms);

        let response = self.fetch(request).await?;
        let payload: FrankfurterLatestResponse = serde_json::from_str(&response.body)
            .map_err(|e| SourceError::malformed(format!("failed to parse frankfurter latest rate: {e}")))?;

        let latest = payload.rate_for(target);
        debug!(%base, %target, ?latest, "latest rate fetched");
        Ok(latest)
    }
}

impl RateSource for FrankfurterAdapter {
    fn time_series<'a>(
        &'a self,
        base: CurrencyCode,
        target: CurrencyCode,
        days: u32,
    ) -> SourceFuture<'a, RateSeries> {
        Box::pin(self.fetch_time_series(base, target, days))
    }

    fn latest<'a>(
        &'a self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> SourceFuture<'a, Option<f64>> {
        Box::pin(self.fetch_latest(base, target))
    }
}

/// Inclusive `[end - days, end]` date window.
pub fn history_window(end: Date, days: u32) -> Result<(Date, Date), SourceError> {
    let start = end
        .checked_sub(Duration::days(i64::from(days)))
        .ok_or_else(|| SourceError::internal(format!("history window of {days} days is out of range")))?;
    Ok((start, end))
}

// Frankfurter API response structures
#[derive(Debug, Clone, Deserialize)]
struct FrankfurterSeriesResponse {
    /// Keyed by ISO date, so map order is date order.
    #[serde(default)]
    rates: BTreeMap<String, HashMap<String, Option<f64>>>,
}

impl FrankfurterSeriesResponse {
    fn into_series(self, target: CurrencyCode) -> RateSeries {
        self.rates
            .into_values()
            .filter_map(|day| day.get(target.as_str()).copied().flatten())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct FrankfurterLatestResponse {
    #[serde(default)]
    rates: HashMap<String, Option<f64>>,
}

impl FrankfurterLatestResponse {
    fn rate_for(&self, target: CurrencyCode) -> Option<f64> {
        self.rates.get(target.as_str()).copied().flatten()
    }
}
