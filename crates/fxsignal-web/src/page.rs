//! Server-rendered index page.

use std::fmt::Write;

use axum::extract::State;
use axum::response::Html;
use fxsignal_core::{CurrencyCode, SignalSettings};

use crate::api::{DEFAULT_BASE, DEFAULT_TARGET};
use crate::state::AppState;

/// GET /
pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.config.supported, state.classifier.settings()))
}

pub fn render_index(supported: &[CurrencyCode], settings: SignalSettings) -> String {
    let base_options = render_options(supported, DEFAULT_BASE);
    let target_options = render_options(supported, DEFAULT_TARGET);
    let days = settings.history_days;
    let upper = quantile_label(settings.thresholds.upper);
    let lower = quantile_label(settings.thresholds.lower);
    let (base, target) = (DEFAULT_BASE, DEFAULT_TARGET);

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>FX Signal: is now a good time to convert?</title>
  <meta property="og:title" content="FX Signal">
  <meta property="og:description" content="Compare today's exchange rate against the last {days} days.">
  <meta property="og:image" content="/og.svg?base={base}&amp;target={target}">
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <main>
    <h1>Is now a good time to convert?</h1>
    <form id="pair" onsubmit="return false">
      <label>From
        <select id="base">
{base_options}        </select>
      </label>
      <label>To
        <select id="target">
{target_options}        </select>
      </label>
      <button id="check" type="button">Check</button>
    </form>
    <section id="status" class="status neutral">
      <span class="dot"></span>
      <span class="label">Pick a pair and press Check</span>
    </section>
    <p id="details"></p>
    <footer>
      Green: at or above the {upper} of the last {days} days.
      Amber: at or above the {lower}. Red: below it.
      Rates from the European Central Bank via Frankfurter.
    </footer>
  </main>
  <script src="/static/app.js"></script>
</body>
</html>
"#
    )
}

fn render_options(supported: &[CurrencyCode], selected: &str) -> String {
    let mut out = String::new();
    for code in supported {
        let marker = if code.as_str() == selected { " selected" } else { "" };
        let _ = writeln!(
            out,
            r#"          <option value="{code}" data-region="{region}"{marker}>{flag} {code}</option>"#,
            region = code.region(),
            flag = code.flag(),
        );
    }
    out
}

fn quantile_label(fraction: f64) -> String {
    let percent = (fraction * 100.0).round() as u32;
    let suffix = match (percent % 10, percent % 100) {
        (1, p) if p != 11 => "st",
        (2, p) if p != 12 => "nd",
        (3, p) if p != 13 => "rd",
        _ => "th",
    };
    format!("{percent}{suffix} percentile")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lists_every_supported_currency_with_defaults_selected() {
        let html = render_index(&CurrencyCode::ALL, SignalSettings::default());

        for code in CurrencyCode::ALL {
            assert!(html.contains(&format!(r#"value="{code}""#)), "missing {code}");
        }
        assert!(html.contains(r#"<option value="USD" data-region="us" selected>"#));
        assert!(html.contains(r#"<option value="EUR" data-region="eu" selected>"#));
        assert!(html.contains("last 180 days"));
        assert!(html.contains("75th percentile"));
        assert!(html.contains("50th percentile"));
    }

    #[test]
    fn quantile_labels_use_ordinal_suffixes() {
        assert_eq!(quantile_label(0.75), "75th percentile");
        assert_eq!(quantile_label(0.21), "21st percentile");
        assert_eq!(quantile_label(0.12), "12th percentile");
        assert_eq!(quantile_label(0.93), "93rd percentile");
    }
}
