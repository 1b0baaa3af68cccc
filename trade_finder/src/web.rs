//! Web server for the trade finder UI
//!
//! Provides REST API endpoints for comparing two players and for managing the
//! loaded card catalog.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use pocket_common::TradeError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::export::combined_csv;
use crate::reconcile::ReconciliationResult;
use crate::service::ReconciliationService;

/// Shared application state
#[derive(Clone)]
struct AppState {
    service: Arc<ReconciliationService>,
}

/// Compare query parameters
#[derive(Deserialize)]
struct CompareParams {
    #[serde(default)]
    player1: String,
    #[serde(default)]
    player2: String,
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            kind: None,
        }
    }
}

/// Loaded catalog summary
#[derive(Serialize)]
struct CatalogSummary {
    cards: usize,
    queries: Vec<String>,
}

type ApiError = (StatusCode, Json<ApiResponse<()>>);

fn status_for(err: &TradeError) -> StatusCode {
    match err {
        TradeError::SourceUnavailable(_) => StatusCode::BAD_GATEWAY,
        TradeError::MalformedCatalogData(_) | TradeError::MalformedPlayerData(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        TradeError::CatalogNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
        TradeError::InvalidPlayerId => StatusCode::BAD_REQUEST,
    }
}

fn api_error(err: TradeError) -> ApiError {
    let status = status_for(&err);
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(err.to_string()),
            kind: Some(err.kind()),
        }),
    )
}

/// GET / - Serve the web UI (single HTML page)
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// GET /api/catalog
async fn catalog_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CatalogSummary>>, ApiError> {
    match state.service.catalog().await {
        Some(catalog) => Ok(Json(ApiResponse::ok(CatalogSummary {
            cards: catalog.len(),
            queries: state.service.catalog_queries().to_vec(),
        }))),
        None => Err(api_error(TradeError::CatalogNotLoaded)),
    }
}

/// POST /api/catalog/refresh
async fn refresh_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CatalogSummary>>, ApiError> {
    match state.service.load_catalog().await {
        Ok(catalog) => Ok(Json(ApiResponse::ok(CatalogSummary {
            cards: catalog.len(),
            queries: state.service.catalog_queries().to_vec(),
        }))),
        Err(e) => {
            log::error!("Catalog refresh failed, keeping previous catalog: {}", e);
            Err(api_error(e))
        }
    }
}

/// GET /api/compare?player1={id}&player2={id}
async fn compare_handler(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<ApiResponse<ReconciliationResult>>, ApiError> {
    match state.service.compare(&params.player1, &params.player2).await {
        Ok(result) => Ok(Json(ApiResponse::ok(result))),
        Err(e) => {
            log::warn!("Comparison failed: {}", e);
            Err(api_error(e))
        }
    }
}

/// GET /api/compare.csv?player1={id}&player2={id}
async fn compare_csv_handler(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Response {
    let result = match state.service.compare(&params.player1, &params.player2).await {
        Ok(result) => result,
        Err(e) => {
            log::warn!("Comparison failed: {}", e);
            return api_error(e).into_response();
        }
    };

    match combined_csv(&result) {
        Ok(csv) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"trades.csv\""),
            ],
            csv,
        )
            .into_response(),
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Export failed: {}", e)).into_response()
        }
    }
}

/// Build the web server router
pub fn create_router(service: Arc<ReconciliationService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/catalog/refresh", post(refresh_handler))
        .route("/api/compare", get(compare_handler))
        .route("/api/compare.csv", get(compare_csv_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the web server, stopping on Ctrl-C
///
/// Binds to 0.0.0.0 (all interfaces) to work with Docker port mapping.
pub async fn serve(
    service: Arc<ReconciliationService>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(service);
    let addr = format!("0.0.0.0:{}", port);

    log::info!("Web UI listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
            }
            log::info!("Shutting down web server");
        })
        .await?;

    Ok(())
}
