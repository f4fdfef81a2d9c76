//! Deterministic in-memory doubles shared by the behaviour tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use fxsignal_core::{
    CurrencyCode, HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse, RateSeries,
    RateSource, SourceError, SourceFuture,
};

/// Rate source answering from fixed values and counting calls.
pub struct StubRateSource {
    series: Result<Vec<f64>, SourceError>,
    latest: Result<Option<f64>, SourceError>,
    series_calls: AtomicUsize,
    latest_calls: AtomicUsize,
    last_days: Mutex<Option<u32>>,
}

impl StubRateSource {
    pub fn new(series: Vec<f64>, latest: Option<f64>) -> Self {
        Self {
            series: Ok(series),
            latest: Ok(latest),
            series_calls: AtomicUsize::new(0),
            latest_calls: AtomicUsize::new(0),
            last_days: Mutex::new(None),
        }
    }

    pub fn one_to_ten(latest: f64) -> Self {
        Self::new((1..=10).map(f64::from).collect(), Some(latest))
    }

    pub fn failing_series(error: SourceError) -> Self {
        Self {
            series: Err(error),
            ..Self::new(Vec::new(), None)
        }
    }

    pub fn failing_latest(series: Vec<f64>, error: SourceError) -> Self {
        Self {
            latest: Err(error),
            ..Self::new(series, None)
        }
    }

    pub fn series_calls(&self) -> usize {
        self.series_calls.load(Ordering::SeqCst)
    }

    pub fn latest_calls(&self) -> usize {
        self.latest_calls.load(Ordering::SeqCst)
    }

    pub fn last_days(&self) -> Option<u32> {
        *self.last_days.lock().expect("lock")
    }
}

impl RateSource for StubRateSource {
    fn time_series<'a>(
        &'a self,
        _base: CurrencyCode,
        _target: CurrencyCode,
        days: u32,
    ) -> SourceFuture<'a, RateSeries> {
        self.series_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_days.lock().expect("lock") = Some(days);
        let result = self.series.clone().map(RateSeries::new);
        Box::pin(async move { result })
    }

    fn latest<'a>(
        &'a self,
        _base: CurrencyCode,
        _target: CurrencyCode,
    ) -> SourceFuture<'a, Option<f64>> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.latest.clone();
        Box::pin(async move { result })
    }
}

/// HTTP transport replaying queued responses and recording every request.
#[derive(Default)]
pub struct ScriptedHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Result<HttpResponse, HttpError>) -> Self {
        self.responses.lock().expect("lock").push_back(response);
        self
    }

    pub fn respond_json(self, body: &str) -> Self {
        self.respond(Ok(HttpResponse::ok_json(body)))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(&'a self, request: HttpRequest) -> HttpFuture<'a> {
        self.requests.lock().expect("lock").push(request);
        let next = self
            .responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::new("no scripted response left")));
        Box::pin(async move { next })
    }
}
