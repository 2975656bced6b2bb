// GET handlers: page render, version, status/lease/log JSON

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use thiserror::Error;

use super::AppState;
use crate::collectors::{connectivity, dhcp, interfaces, logs, nat};
use crate::models::StatusSnapshot;
use crate::version::{NAME, VERSION};

#[derive(Debug, Error)]
pub(super) enum AppError {
    #[error("template render: {0}")]
    Render(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// GET / — the dashboard page; the client polls the /api endpoints.
pub(super) async fn index_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut context = tera::Context::new();
    context.insert("refresh", &state.config.dashboard.refresh_secs);
    context.insert("wan_if", &state.config.network.wan_if);
    context.insert("lan_if", &state.config.network.lan_if);
    context.insert("ping_ip", &state.config.network.ping_ip);
    context.insert("ping_dns", &state.config.network.ping_dns);
    let html = state.tera.render("index.html", &context)?;
    Ok(Html(html).into_response())
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/status — one sequential collection pass over interfaces, route,
/// NAT and connectivity. Collector failures degrade fields; this never 500s.
pub(super) async fn api_status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let runner = state.runner.as_ref();
    let net = &state.config.network;

    let interface_status =
        interfaces::collect_interface_status(runner, &net.wan_if, &net.lan_if).await;
    let nat = nat::collect_nat_status(runner).await;
    let connectivity =
        connectivity::collect_connectivity(runner, &net.ping_ip, &net.ping_dns).await;

    axum::Json(StatusSnapshot {
        interfaces: interface_status.interfaces,
        default_route: interface_status.default_route,
        nat,
        connectivity,
        errors: interface_status.errors,
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}

/// GET /api/dhcp_leases — leases from the configured (or auto-probed) file.
pub(super) async fn api_dhcp_leases_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(dhcp::collect_dhcp_leases(&state.config.dhcp.lease_file).await)
}

/// GET /api/logs — recent journal entries, classified.
pub(super) async fn api_logs_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(logs::collect_logs(state.runner.as_ref(), state.config.logs.limit).await)
}
