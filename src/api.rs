//! HTTP API for the dashboard UI

use crate::aggregate::{ChartData, ChartKind};
use crate::error::DashboardError;
use crate::export::{export_file_name, DEFAULT_EXPORT_LIMIT};
use crate::filter::FilterCriteria;
use crate::options::FilterOptions;
use crate::pagination::{parse_or, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::service::{InsightService, Listing};
use crate::stats::StatsSummary;
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

pub type AppState = Arc<InsightService>;

type Params = HashMap<String, String>;

/// Routes for the dashboard API. The service may be handed over with a cold
/// cache: the first request reads the dataset on the blocking pool.
pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/insights", get(list_insights))
        .route("/api/charts", get(chart))
        .route("/api/stats", get(stats))
        .route("/api/filters", get(filters))
        .route("/api/export", get(export))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Failure surfaced to the client as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(DashboardError);

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Keeps the one-time file read off the async workers. Later calls hit the
/// cache and skip the hop.
async fn ensure_loaded(service: &AppState) {
    if service.is_loaded() {
        return;
    }
    let warm = Arc::clone(service);
    let result = tokio::task::spawn_blocking(move || {
        let _ = warm.dataset();
    })
    .await;
    if let Err(e) = result {
        error!("Dataset load task failed: {}", e);
    }
}

fn page_params(params: &Params, default_limit: usize) -> (usize, usize) {
    let page = parse_or(params.get("page").map(String::as_str), DEFAULT_PAGE);
    let limit = parse_or(params.get("limit").map(String::as_str), default_limit);
    (page, limit)
}

/// GET /api/health
async fn health(State(service): State<AppState>) -> Response {
    ensure_loaded(&service).await;
    match service.health() {
        Ok(report) => Json(report).into_response(),
        Err(reason) => {
            warn!("API health check failed: {}", reason);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": "Failed to load JSON data",
                    "error": reason,
                })),
            )
                .into_response()
        }
    }
}

/// GET /api/insights
async fn list_insights(
    State(service): State<AppState>,
    Query(params): Query<Params>,
) -> ApiResult<Json<Listing>> {
    ensure_loaded(&service).await;
    let criteria = FilterCriteria::from_params(&params);
    let (page, limit) = page_params(&params, DEFAULT_LIMIT);
    Ok(Json(service.list(&criteria, page, limit)?))
}

/// GET /api/charts
async fn chart(
    State(service): State<AppState>,
    Query(params): Query<Params>,
) -> ApiResult<Json<ChartData>> {
    ensure_loaded(&service).await;
    let criteria = FilterCriteria::from_params(&params);
    let selector = params
        .get("chartType")
        .or_else(|| params.get("chart_type"))
        .map(String::as_str);
    let kind = ChartKind::from_selector(selector);
    Ok(Json(service.chart(&criteria, kind)?))
}

/// GET /api/stats
async fn stats(
    State(service): State<AppState>,
    Query(params): Query<Params>,
) -> ApiResult<Json<StatsSummary>> {
    ensure_loaded(&service).await;
    let criteria = FilterCriteria::from_params(&params);
    Ok(Json(service.stats(&criteria)?))
}

/// GET /api/filters
async fn filters(State(service): State<AppState>) -> ApiResult<Json<FilterOptions>> {
    ensure_loaded(&service).await;
    Ok(Json(service.filter_options()?))
}

/// GET /api/export
async fn export(
    State(service): State<AppState>,
    Query(params): Query<Params>,
) -> ApiResult<Response> {
    ensure_loaded(&service).await;
    let criteria = FilterCriteria::from_params(&params);
    let (page, limit) = page_params(&params, DEFAULT_EXPORT_LIMIT);
    let csv = service.export_csv(&criteria, page, limit)?;

    let file_name = export_file_name(chrono::Local::now().date_naive());
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ),
    ];
    Ok((headers, csv).into_response())
}

async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<Value>) {
    warn!("404: {} {} not found", method, uri.path());
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": format!("Endpoint not found: {} {}", method, uri.path())
        })),
    )
}
