//! Workout stats endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use super::root::MessageResponse;
use crate::db::{Connector, StatsStore, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT};
use crate::http::error::ApiError;
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;
use crate::models::{StatsRecord, StatsSubmission, StoredStats, ValidationError};

pub const SAVED_MESSAGE: &str = "Workout saved successfully!";

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<u32>,
}

/// POST /stats - store one workout session
///
/// The insert runs on its own task: if the client goes away mid-request the
/// write still completes and its result is dropped. Failures are not
/// retried. There is no idempotency key, so a client retry stores a second
/// copy.
async fn submit_stats<C: Connector>(
    State(state): State<AppState<C>>,
    ValidJson(submission): ValidJson<StatsSubmission>,
) -> Result<Json<MessageResponse>, ApiError> {
    let received_at = Utc::now();
    let handle = state.db.handle().await?;
    let doc = StoredStats::from_submission(submission, received_at);
    let exercises = doc.exercises.len();

    let id = tokio::spawn(async move { handle.insert_stats(&doc).await })
        .await
        .map_err(|e| ApiError::Internal {
            message: format!("insert task failed: {}", e),
        })??;

    info!(%id, exercises, "workout saved");
    Ok(Json(MessageResponse {
        message: SAVED_MESSAGE,
    }))
}

/// GET /stats - most recent sessions first
async fn recent_stats<C: Connector>(
    State(state): State<AppState<C>>,
    params: Result<Query<RecentParams>, QueryRejection>,
) -> Result<Json<Vec<StatsRecord>>, ApiError> {
    let Query(params) = params.map_err(|e| ValidationError::InvalidType {
        field: "limit".to_string(),
        reason: e.body_text(),
    })?;

    let limit = match params.limit.unwrap_or(DEFAULT_RECENT_LIMIT) {
        0 => {
            return Err(ValidationError::InvalidFormat {
                field: "limit",
                reason: "must be at least 1",
            }
            .into())
        }
        n => n.min(MAX_RECENT_LIMIT),
    };

    let handle = state.db.handle().await?;
    let docs = handle.recent_stats(limit).await?;
    Ok(Json(docs.into_iter().map(StatsRecord::from).collect()))
}

pub fn router<C: Connector>() -> Router<AppState<C>> {
    Router::new().route("/stats", post(submit_stats::<C>).get(recent_stats::<C>))
}
