//! Social-preview card (`og:image`) rendered as SVG.

use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use fxsignal_core::{Signal, SignalResult};
use tracing::warn;

use crate::api::{evaluate, PairQuery, RawPairs};
use crate::state::AppState;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 630;
const CACHE_POLICY: &str = "public, max-age=900";

/// GET /og.svg?base=USD&target=EUR
///
/// Always answers 200 with an image; failures render a neutral card so
/// link unfurlers never show a broken preview.
pub async fn preview_handler(
    State(state): State<AppState>,
    raw: RawPairs,
) -> Response {
    let outcome = match PairQuery::from_raw(raw, &state.config.supported) {
        Ok(query) => evaluate(&state, &query).await,
        Err(error) => Err(error),
    };
    let card = match outcome {
        Ok((pair, result)) => PreviewCard::from_result(&pair.to_string(), &result),
        Err(error) => {
            warn!(code = error.code(), "preview rendered without a signal");
            PreviewCard::unavailable()
        }
    };

    (
        [(CONTENT_TYPE, "image/svg+xml"), (CACHE_CONTROL, CACHE_POLICY)],
        card.render(),
    )
        .into_response()
}

/// Text and colour of one preview image.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewCard {
    pub title: String,
    pub headline: String,
    pub detail: String,
    pub signal: Signal,
}

impl PreviewCard {
    pub fn from_result(pair: &str, result: &SignalResult) -> Self {
        let detail = match (result.latest, result.p50, result.p75) {
            (Some(latest), Some(p50), Some(p75)) => format!(
                "{pair} = {latest:.4}  |  p50 {p50:.4}  |  p75 {p75:.4}  |  {} days",
                result.days
            ),
            _ => format!("{pair}: no rate data for the last {} days", result.days),
        };

        Self {
            title: format!("FX Signal {pair}"),
            headline: result.label.clone(),
            detail,
            signal: result.signal,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            title: String::from("FX Signal"),
            headline: String::from("Signal unavailable"),
            detail: String::from("Rates could not be loaded right now"),
            signal: Signal::Unknown,
        }
    }

    pub fn render(&self) -> String {
        let accent = accent_colour(self.signal);
        let title = escape_xml(&self.title);
        let headline = escape_xml(&self.headline);
        let detail = escape_xml(&self.detail);

        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">
  <rect width="{WIDTH}" height="{HEIGHT}" fill="#0f172a"/>
  <rect x="0" y="0" width="24" height="{HEIGHT}" fill="{accent}"/>
  <circle cx="1040" cy="160" r="72" fill="{accent}"/>
  <text x="96" y="170" font-family="Helvetica, Arial, sans-serif" font-size="44" fill="#94a3b8">{title}</text>
  <text x="96" y="330" font-family="Helvetica, Arial, sans-serif" font-size="88" font-weight="700" fill="#f8fafc">{headline}</text>
  <text x="96" y="450" font-family="Helvetica, Arial, sans-serif" font-size="36" fill="#cbd5e1">{detail}</text>
</svg>
"##
        )
    }
}

fn accent_colour(signal: Signal) -> &'static str {
    match signal {
        Signal::Green => "#16a34a",
        Signal::Amber => "#f59e0b",
        Signal::Red => "#dc2626",
        Signal::Unknown => "#64748b",
    }
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxsignal_core::UnknownReason;

    #[test]
    fn classified_card_shows_rates_and_signal_colour() {
        let result = SignalResult::classified(Signal::Green, 0.9312, 0.91, 0.925, 180);
        let card = PreviewCard::from_result("USD/EUR", &result);
        let svg = card.render();

        assert_eq!(card.headline, "Great time to convert");
        assert!(svg.contains("USD/EUR = 0.9312"));
        assert!(svg.contains("#16a34a"));
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn unknown_card_is_neutral() {
        let result = SignalResult::unknown(UnknownReason::NoData, 180);
        let card = PreviewCard::from_result("GBP/JPY", &result);

        assert_eq!(card.signal, Signal::Unknown);
        assert!(card.detail.contains("no rate data"));
        assert!(card.render().contains("#64748b"));
    }

    #[test]
    fn text_is_xml_escaped() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
