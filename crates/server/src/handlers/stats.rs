//! # Stats Handler

use axum::{extract::State, Json};
use error::Result;

use crate::{dto::stats::StatsResponse, AppState};

/// Aggregate user, pull request and team reports from one snapshot
pub async fn get_stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.service.get_stats().await?;
    Ok(Json(stats.into()))
}
