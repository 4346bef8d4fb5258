//! # User Handlers

use axum::{
    extract::{Query, State},
    Json,
};
use domain::SetUserIsActiveInput;
use error::Result;

use crate::{
    dto::users::{
        GetReviewQuery,
        ReviewerAssignmentsResponse,
        SetIsActiveRequest,
        SetIsActiveResponse,
    },
    handlers::validated,
    AppState,
};

/// List the pull requests a user is assigned to review
pub async fn get_review_handler(
    State(state): State<AppState>,
    Query(query): Query<GetReviewQuery>,
) -> Result<Json<ReviewerAssignmentsResponse>> {
    let assignments = state.service.get_reviewer_assignments(query.user_id).await?;
    Ok(Json(assignments.into()))
}

/// Flip a user's activity flag
pub async fn set_is_active_handler(
    State(state): State<AppState>,
    Json(req): Json<SetIsActiveRequest>,
) -> Result<Json<SetIsActiveResponse>> {
    let req = validated(req)?;

    let user = state
        .service
        .set_user_is_active(SetUserIsActiveInput {
            user_id:   req.user_id,
            is_active: req.is_active,
        })
        .await?;

    Ok(Json(SetIsActiveResponse {
        user: user.into(),
    }))
}
