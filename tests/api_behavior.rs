//! Behavior-driven tests for the HTTP surface
//!
//! These tests drive the router in-process with `tower::ServiceExt::oneshot`
//! and a stub rate source, checking status codes and JSON bodies.

mod support;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use fxsignal_core::{AppConfig, CurrencyCode, SourceError};
use fxsignal_web::{router, AppState};
use serde_json::{json, Value};
use support::StubRateSource;
use tower::ServiceExt;

fn app_with(source: Arc<StubRateSource>) -> Router {
    router(AppState::new(AppConfig::default(), source))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("router is infallible");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body")
        .to_vec();
    (status, content_type, body)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get(app, uri).await;
    let value = serde_json::from_slice(&body).expect("json body");
    (status, value)
}

// =============================================================================
// /api/signal success paths
// =============================================================================

#[tokio::test]
async fn when_pair_is_valid_signal_is_returned_as_json() {
    // Given: History 1..=10 and a latest rate of 6
    let source = Arc::new(StubRateSource::one_to_ten(6.0));

    // When: A supported pair is requested
    let (status, body) = get_json(app_with(source), "/api/signal?base=GBP&target=JPY").await;

    // Then: The amber verdict comes back with its numbers
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "signal": "amber",
            "label": "Decent time to convert",
            "latest": 6.0,
            "p50": 5.5,
            "p75": 7.75,
            "days": 180
        })
    );
}

#[tokio::test]
async fn when_no_pair_is_given_usd_to_eur_is_used() {
    // Given: A working source
    let source = Arc::new(StubRateSource::one_to_ten(10.0));

    // When: The endpoint is called without parameters
    let (status, body) = get_json(app_with(Arc::clone(&source)), "/api/signal").await;

    // Then: The default pair was classified
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signal"], "green");
    assert_eq!(source.series_calls(), 1);
}

#[tokio::test]
async fn when_lowercase_codes_are_sent_they_are_normalized() {
    // Given: A working source
    let source = Arc::new(StubRateSource::one_to_ten(1.0));

    // When: Codes arrive in lowercase with whitespace
    let (status, body) =
        get_json(app_with(source), "/api/signal?base=%20usd%20&target=eur").await;

    // Then: They are accepted
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signal"], "red");
}

#[tokio::test]
async fn when_history_is_empty_unknown_is_returned_with_ok_status() {
    // Given: A source with no data points
    let source = Arc::new(StubRateSource::new(Vec::new(), Some(1.0)));

    // When: The signal is requested
    let (status, body) = get_json(app_with(source), "/api/signal?base=USD&target=EUR").await;

    // Then: "No data" is a successful answer
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "signal": "unknown",
            "label": "Not enough data",
            "latest": null,
            "days": 180,
            "reason": "no_data"
        })
    );
}

// =============================================================================
// /api/signal validation
// =============================================================================

#[tokio::test]
async fn when_a_parameter_is_repeated_the_first_value_is_used() {
    // Given: A working source
    let source = Arc::new(StubRateSource::one_to_ten(10.0));

    // When: `base` appears twice
    let (status, content_type, body) = get(
        app_with(Arc::clone(&source)),
        "/api/signal?base=USD&base=GBP&target=EUR",
    )
    .await;
    let body: Value = serde_json::from_slice(&body).expect("json body");

    // Then: The request is answered as JSON for the first value
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("application/json"));
    assert_eq!(body["signal"], "green");
    assert_eq!(source.series_calls(), 1);
}

#[tokio::test]
async fn when_repeated_base_matches_target_first_value_decides_rejection() {
    // Given: A source that counts calls
    let source = Arc::new(StubRateSource::one_to_ten(5.0));

    // When: The first `base` equals the target and a later one does not
    let (status, body) = get_json(
        app_with(Arc::clone(&source)),
        "/api/signal?base=EUR&target=EUR&base=GBP",
    )
    .await;

    // Then: The first value is validated and rejected
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "base_target_same" }));
    assert_eq!(source.series_calls(), 0);
}

#[tokio::test]
async fn when_base_equals_target_request_is_rejected_without_fetching() {
    // Given: A source that counts calls
    let source = Arc::new(StubRateSource::one_to_ten(5.0));

    // When: The same currency is sent in different cases
    let (status, body) =
        get_json(app_with(Arc::clone(&source)), "/api/signal?base=usd&target=USD").await;

    // Then: 400 with the same-currency code and no upstream traffic
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "base_target_same" }));
    assert_eq!(source.series_calls(), 0);
    assert_eq!(source.latest_calls(), 0);
}

#[tokio::test]
async fn when_currency_is_unsupported_supported_list_is_returned() {
    // Given: A source that counts calls
    let source = Arc::new(StubRateSource::one_to_ten(5.0));

    // When: A code outside the allow-list is requested
    let (status, body) =
        get_json(app_with(Arc::clone(&source)), "/api/signal?base=MXN&target=USD").await;

    // Then: 400 lists every supported code in order
    let expected: Vec<&str> = CurrencyCode::ALL.iter().map(|code| code.as_str()).collect();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unsupported_currency");
    assert_eq!(body["supported"], json!(expected));
    assert_eq!(source.series_calls(), 0);
}

// =============================================================================
// /api/signal failures
// =============================================================================

#[tokio::test]
async fn when_provider_is_unreachable_bad_gateway_is_returned() {
    // Given: A source whose history fetch fails in transport
    let source = Arc::new(StubRateSource::failing_series(SourceError::unavailable(
        "connection refused",
    )));

    // When: The signal is requested
    let (status, body) = get_json(app_with(source), "/api/signal?base=USD&target=EUR").await;

    // Then: 502 with the failure detail
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "http_error");
    assert_eq!(body["detail"], "connection refused");
}

#[tokio::test]
async fn when_latest_fetch_returns_error_status_bad_gateway_is_returned() {
    // Given: History succeeds but the latest call answers 503
    let source = Arc::new(StubRateSource::failing_latest(
        vec![1.0, 2.0],
        SourceError::status(503, "provider returned HTTP 503"),
    ));

    // When: The signal is requested
    let (status, body) = get_json(app_with(source), "/api/signal").await;

    // Then: 502 http_error
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "http_error");
}

#[tokio::test]
async fn when_an_internal_failure_occurs_unknown_error_is_returned() {
    // Given: A source that fails for a non-network reason
    let source = Arc::new(StubRateSource::failing_series(SourceError::internal(
        "history window out of range",
    )));

    // When: The signal is requested
    let (status, body) = get_json(app_with(source), "/api/signal").await;

    // Then: 500 with the detail
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "unknown", "detail": "history window out of range" })
    );
}

// =============================================================================
// Presentation routes
// =============================================================================

#[tokio::test]
async fn when_currencies_are_listed_flags_and_regions_are_included() {
    let source = Arc::new(StubRateSource::one_to_ten(5.0));

    let (status, body) = get_json(app_with(source), "/api/currencies").await;

    assert_eq!(status, StatusCode::OK);
    let supported = body["supported"].as_array().expect("array");
    assert_eq!(supported.len(), CurrencyCode::ALL.len());
    assert_eq!(supported[0]["code"], "USD");
    assert_eq!(supported[1]["code"], "EUR");
    assert_eq!(supported[1]["region"], "eu");
}

#[tokio::test]
async fn when_health_is_probed_ok_is_returned() {
    let source = Arc::new(StubRateSource::one_to_ten(5.0));

    let (status, body) = get_json(app_with(source), "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn when_index_is_requested_html_page_is_served() {
    let source = Arc::new(StubRateSource::one_to_ten(5.0));

    let (status, content_type, body) = get(app_with(source), "/").await;
    let html = String::from_utf8(body).expect("utf8");

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert!(html.contains(r#"<select id="base">"#));
    assert!(html.contains("/static/app.js"));
}

#[tokio::test]
async fn when_preview_is_requested_svg_card_is_served() {
    let source = Arc::new(StubRateSource::one_to_ten(10.0));

    let (status, content_type, body) = get(app_with(source), "/og.svg?base=USD&target=EUR").await;
    let svg = String::from_utf8(body).expect("utf8");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "image/svg+xml");
    assert!(svg.contains("Great time to convert"));
}

#[tokio::test]
async fn when_preview_cannot_compute_a_signal_neutral_card_is_still_served() {
    // Given: An unreachable provider
    let source = Arc::new(StubRateSource::failing_series(SourceError::unavailable(
        "timed out",
    )));

    // When: The preview image is requested
    let (status, content_type, body) = get(app_with(source), "/og.svg").await;
    let svg = String::from_utf8(body).expect("utf8");

    // Then: A 200 image with the neutral card
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "image/svg+xml");
    assert!(svg.contains("Signal unavailable"));
}

#[tokio::test]
async fn when_preview_query_repeats_a_parameter_card_uses_the_first_value() {
    let source = Arc::new(StubRateSource::one_to_ten(10.0));

    let (status, content_type, body) =
        get(app_with(source), "/og.svg?base=GBP&base=USD&target=JPY").await;
    let svg = String::from_utf8(body).expect("utf8");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "image/svg+xml");
    assert!(svg.contains("GBP/JPY"));
}
