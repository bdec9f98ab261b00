use axum::{
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use super::history_store::{HistoryEntry, MAX_HISTORY_ENTRIES};
use crate::{app_module::AppState, error::HistoryError};

const DEFAULT_HISTORY_LIMIT: usize = 5;

/// `limit` is kept as raw text so malformed values get the JSON error body.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<String>,
}

impl HistoryQuery {
    /// Parses and clamps `limit` to `1..=MAX_HISTORY_ENTRIES`.
    pub fn limit(&self) -> Result<usize, HistoryError> {
        let raw = match self.limit.as_deref().map(str::trim) {
            None | Some("") => return Ok(DEFAULT_HISTORY_LIMIT),
            Some(raw) => raw,
        };

        let limit = raw
            .parse::<i64>()
            .map_err(|_| HistoryError::InvalidLimit(raw.to_string()))?;
        Ok(limit.clamp(1, MAX_HISTORY_ENTRIES as i64) as usize)
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

pub fn history_router() -> Router {
    Router::new().route("/", get(list_history).delete(clear_history))
}

pub async fn list_history(
    Extension(ctx): Extension<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, HistoryError> {
    let entries = ctx.service.history_service.recent(query.limit()?).await?;
    Ok(Json(HistoryResponse { entries }))
}

pub async fn clear_history(
    Extension(ctx): Extension<AppState>,
) -> Result<impl IntoResponse, HistoryError> {
    ctx.service.history_service.clear().await?;
    tracing::info!("History cleared");
    Ok(StatusCode::NO_CONTENT)
}
