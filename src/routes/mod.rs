// HTTP routes: dashboard page + JSON API

mod http;

use std::sync::Arc;

use axum::{Router, routing::get};
use tera::Tera;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::command::SystemRunner;
use crate::config::AppConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) runner: Arc<SystemRunner>,
    pub(crate) tera: Arc<Tera>,
}

/// Build the Tera instance with the dashboard template embedded at compile
/// time, so the binary does not depend on a templates/ dir at runtime.
pub fn templates() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template("index.html", include_str!("../../templates/index.html"))?;
    Ok(tera)
}

pub fn app(config: AppConfig, tera: Tera) -> Router {
    let state = AppState {
        config,
        runner: Arc::new(SystemRunner),
        tera: Arc::new(tera),
    };
    Router::new()
        .route("/", get(http::index_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/status", get(http::api_status_handler)) // GET /api/status
        .route("/api/dhcp_leases", get(http::api_dhcp_leases_handler)) // GET /api/dhcp_leases
        .route("/api/logs", get(http::api_logs_handler)) // GET /api/logs
        .nest_service("/static", ServeDir::new("static"))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
