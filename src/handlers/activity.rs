use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use super::session_from_headers;
use crate::errors::AppError;
use crate::models::{Activity, StatisticsSummary};
use crate::services::{activity, statistics};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<u32>,
}

// GET /api/activities
pub async fn recent_activities(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<Activity>>, AppError> {
    let session = session_from_headers(&headers)?;
    let limit = query.limit.unwrap_or(5);
    let raw = state.backend.recent_activities(&session, limit).await?;
    Ok(Json(activity::format_all(&raw)?))
}

// GET /api/statistics/summary
pub async fn statistics_summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatisticsSummary>, AppError> {
    let session = session_from_headers(&headers)?;
    let stats = state.backend.reservation_stats(&session).await?;
    Ok(Json(statistics::summarize(&stats)))
}
