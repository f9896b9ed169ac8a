//! HTTP surface: a single query-in/answer-out endpoint plus a health probe

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::domain::CragPipeline;
use crate::infrastructure::{
    InMemoryVectorStore, OllamaEmbeddingProvider, OllamaProvider, WikipediaSearchProvider,
};

/// The pipeline as wired for the default deployment
pub type EnginePipeline = CragPipeline<
    OllamaProvider,
    OllamaEmbeddingProvider,
    InMemoryVectorStore,
    WikipediaSearchProvider,
>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<EnginePipeline>,
}

#[derive(Debug, Deserialize)]
pub struct AskParams {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /ask?query=...
pub async fn ask(
    State(state): State<AppState>,
    Query(params): Query<AskParams>,
) -> Result<Json<AnswerResponse>, (StatusCode, String)> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Query parameter must not be blank".to_string(),
        ));
    }

    let answer = state.pipeline.answer(query).await;
    Ok(Json(AnswerResponse { answer }))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ask", get(ask))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
