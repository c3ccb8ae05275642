use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use super::session_from_headers;
use crate::errors::AppError;
use crate::models::{Feedback, NewFeedback};
use crate::services::feedback::{self, Page};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// POST /api/feedback
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<NewFeedback>,
) -> Result<(StatusCode, Json<Feedback>), AppError> {
    let session = session_from_headers(&headers)?;
    let draft = feedback::prepare(body)?;
    let created = state.backend.create_feedback(&session, &draft).await?;
    tracing::info!(feedback_id = created.id, venue_id = draft.venue_id, "feedback submitted");
    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/feedback/mine
pub async fn my_feedback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Feedback>>, AppError> {
    let session = session_from_headers(&headers)?;
    let page = Page::new(query.page, query.limit)?;
    Ok(Json(state.backend.list_my_feedback(&session, page).await?))
}
