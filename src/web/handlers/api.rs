use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::classifier::{DataPoint, DatasetParseError, DatasetTag, RULES, Rule};
use crate::generator::models::{NlQueryRequest, QueryHistoryItem};
use crate::generator::Generated;
use crate::web::state::AppState;

#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    pub dataset: DatasetTag,
    pub points: Vec<DataPoint>,
}

// System status

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime_seconds: i64,
    pub backend: String,
    pub rule_count: usize,
    pub history_count: usize,
}

// Natural language query
pub async fn nl_query(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<NlQueryRequest>,
) -> Result<Json<Generated>, (StatusCode, String)> {
    debug!("NL-query: {}", payload.question);

    if payload.question.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Boş sorgu: lütfen bir sorgu yazın.".to_string(),
        ));
    }

    let max_chars = app_state.config.query.max_question_chars;
    let question_chars = payload.question.chars().count();
    if question_chars > max_chars {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Sorgu çok uzun: {} karakter (en fazla {}).", question_chars, max_chars),
        ));
    }

    let generated = app_state
        .generator
        .generate(&payload.question)
        .await
        .map_err(|e| {
            error!("SQL generation failed: {}", e);
            (StatusCode::BAD_GATEWAY, format!("SQL oluşturulamadı: {}", e))
        })?;

    info!(
        "Generated {:?} query via {} (dataset '{}')",
        generated.result.kind, generated.backend, generated.result.dataset
    );

    app_state.record_query(&payload.question, &generated).await;

    Ok(Json(generated))
}

// Mock chart data
pub async fn get_dataset(path: Path<String>) -> Result<Json<DatasetResponse>, (StatusCode, String)> {
    let dataset: DatasetTag = path
        .0
        .parse()
        .map_err(|e: DatasetParseError| (StatusCode::NOT_FOUND, e.to_string()))?;

    Ok(Json(DatasetResponse {
        dataset,
        points: dataset.series(),
    }))
}

// History
pub async fn list_history(state: State<Arc<AppState>>) -> Json<Vec<QueryHistoryItem>> {
    Json(state.recent_history().await)
}

// Rule table
pub async fn list_rules() -> Json<&'static [Rule]> {
    Json(RULES)
}

// System status
pub async fn system_status(state: State<Arc<AppState>>) -> Json<SystemStatus> {
    let now = chrono::Utc::now();
    let uptime = now.signed_duration_since(state.startup_time).num_seconds();

    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        backend: state.generator.backend().to_string(),
        rule_count: RULES.len(),
        history_count: state.history.read().await.len(),
    })
}
