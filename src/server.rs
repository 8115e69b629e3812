use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::CorsLayer;
use tracing::info;

use creator_analytics::store::JsonDataStore;
use creator_analytics::AnalyticsEngine;

use crate::api::{error_response, ApiPredictionRequest, DateRangeQuery};

#[derive(Clone)]
struct AppState {
    engine: Arc<AnalyticsEngine<JsonDataStore>>,
}

#[derive(Debug, Deserialize)]
struct PatternsQuery {
    top_n: Option<usize>,
}

pub async fn serve(
    args: crate::ServeArgs,
    engine: AnalyticsEngine<JsonDataStore>,
) -> Result<(), String> {
    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/content/:id/insights", get(content_insights))
        .route("/api/creators/:id/patterns", get(patterns))
        .route("/api/creators/:id/recommendations", get(recommendations))
        .route("/api/creators/:id/audience", get(audience))
        .route("/api/creators/:id/compare", get(compare))
        .route("/api/creators/:id/factors", get(factors))
        .route("/api/predict", post(predict))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;
    info!(%addr, "analytics server listening");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn content_insights(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let insights = state
        .engine
        .content_insights(&content_id)
        .await
        .map_err(error_response)?;
    Ok(Json(insights))
}

async fn patterns(
    State(state): State<AppState>,
    Path(creator_id): Path<String>,
    Query(query): Query<PatternsQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let report = state
        .engine
        .high_performance_patterns(&creator_id, query.top_n)
        .await
        .map_err(error_response)?;
    Ok(Json(report))
}

async fn recommendations(
    State(state): State<AppState>,
    Path(creator_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let report = state
        .engine
        .content_recommendations(&creator_id)
        .await
        .map_err(error_response)?;
    Ok(Json(report))
}

async fn audience(
    State(state): State<AppState>,
    Path(creator_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (start, end) = query
        .resolve()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    let insights = state
        .engine
        .audience_insights(&creator_id, start, end)
        .await
        .map_err(error_response)?;
    Ok(Json(insights))
}

async fn compare(
    State(state): State<AppState>,
    Path(creator_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (start, end) = query
        .resolve()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    let report = state
        .engine
        .compare_content_types(&creator_id, start, end)
        .await
        .map_err(error_response)?;
    Ok(Json(report))
}

async fn factors(
    State(state): State<AppState>,
    Path(creator_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let factors = state
        .engine
        .engagement_factors(&creator_id)
        .await
        .map_err(error_response)?;
    Ok(Json(factors))
}

async fn predict(
    State(state): State<AppState>,
    Json(request): Json<ApiPredictionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let request = request
        .into_request()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    let report = state
        .engine
        .predict_performance(&request)
        .await
        .map_err(error_response)?;
    Ok(Json(report))
}
