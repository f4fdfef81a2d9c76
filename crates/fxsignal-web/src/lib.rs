//! HTTP surface for fxsignal.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /` | [`page::index_handler`] |
//! | `GET /api/signal` | [`api::signal_handler`] |
//! | `GET /api/currencies` | [`api::currencies_handler`] |
//! | `GET /healthz` | [`api::health_handler`] |
//! | `GET /og.svg` | [`preview::preview_handler`] |
//! | `GET /static/*` | files under the configured static directory |

pub mod api;
pub mod error;
pub mod page;
pub mod preview;
pub mod state;

use std::net::SocketAddr;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::{ApiError, WebError};
pub use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    let api = Router::new()
        .route("/signal", get(api::signal_handler))
        .route("/currencies", get(api::currencies_handler))
        .layer(cors);

    Router::new()
        .route("/", get(page::index_handler))
        .route("/og.svg", get(preview::preview_handler))
        .route("/healthz", get(api::health_handler))
        .nest("/api", api)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until ctrl-c.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), WebError> {
    info!(
        static_dir = %state.config.server.static_dir.display(),
        history_days = state.config.signal.history_days,
        "starting fxsignal server"
    );

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| WebError::Bind { addr, source })?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown requested");
        })
        .await?;
    Ok(())
}
