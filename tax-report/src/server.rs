//! HTTP front end serving the comparison page.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | HTML comparison page |
//! | `GET /api/comparisons` | JSON report |
//!
//! Both routes accept `income` (comma-separated, also spelled `incomes`),
//! `jurisdiction` and `carryover` query parameters; anything omitted falls
//! back to the server's [`ReportConfig`]. Unknown parameters are rejected.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tax_core::IncomeCarryover;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::{ConfigOverrides, ReportConfig};
use crate::render::{ComparisonReport, OutputFormat, render};
use crate::utils::parse_income_list;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ComparisonQuery {
    #[serde(alias = "incomes")]
    income: Option<String>,
    jurisdiction: Option<String>,
    carryover: Option<IncomeCarryover>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Clone)]
struct AppState {
    config: Arc<ReportConfig>,
}

/// Builds the router; `config` supplies defaults for every request.
pub fn router(config: ReportConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/api/comparisons", get(comparisons_handler))
        .fallback(not_found_handler)
        .with_state(state)
}

/// Binds `config.server` and serves until the process is stopped.
pub async fn run_http_server(config: ReportConfig) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(addr.as_str()).await?;
    let local: SocketAddr = listener.local_addr()?;
    info!(%local, jurisdiction = %config.jurisdiction, "comparison server listening");

    axum::serve(listener, router(config)).await
}

async fn index_handler(
    State(state): State<AppState>,
    query: Result<Query<ComparisonQuery>, QueryRejection>,
) -> Response {
    respond(&state, query, OutputFormat::Html)
}

async fn comparisons_handler(
    State(state): State<AppState>,
    query: Result<Query<ComparisonQuery>, QueryRejection>,
) -> Response {
    respond(&state, query, OutputFormat::Json)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn respond(
    state: &AppState,
    query: Result<Query<ComparisonQuery>, QueryRejection>,
    format: OutputFormat,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected query string");
            return error_response(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    let incomes = match query.income.as_deref().map(parse_income_list).transpose() {
        Ok(incomes) => incomes.unwrap_or_default(),
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let config = state.config.as_ref().clone().with_overrides(ConfigOverrides {
        jurisdiction: query.jurisdiction,
        incomes,
        carryover: query.carryover,
        ..ConfigOverrides::default()
    });

    let records = match config.comparisons() {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "rejected comparison request");
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    let report = ComparisonReport {
        jurisdiction: &config.jurisdiction,
        carryover: config.carryover,
        records: &records,
    };
    match render(format, &report) {
        Ok(body) if format == OutputFormat::Html => with_cache_control(Html(body)),
        Ok(body) => with_cache_control((
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(
    status: StatusCode,
    msg: &str,
) -> Response {
    with_cache_control((
        status,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    ))
}
