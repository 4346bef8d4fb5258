//! # Pull Request Handlers

use axum::{extract::State, http::StatusCode, Json};
use domain::{CreatePullRequestInput, MergePullRequestInput, ReassignPullRequestInput};
use error::Result;

use crate::{
    dto::pull_requests::{
        CreatePullRequestRequest,
        MergePullRequestRequest,
        PullRequestResponse,
        ReassignPullRequestRequest,
        ReassignPullRequestResponse,
        SafeReassignPullRequestRequest,
    },
    handlers::validated,
    AppState,
};

/// Create a pull request and assign up to two reviewers
pub async fn create_pull_request_handler(
    State(state): State<AppState>,
    Json(req): Json<CreatePullRequestRequest>,
) -> Result<(StatusCode, Json<PullRequestResponse>)> {
    let req = validated(req)?;

    let pr = state
        .service
        .create_pull_request(CreatePullRequestInput {
            pull_request_id:   req.pull_request_id,
            pull_request_name: req.pull_request_name,
            author_id:         req.author_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PullRequestResponse {
            pr: pr.into(),
        }),
    ))
}

/// Merge a pull request (idempotent)
pub async fn merge_pull_request_handler(
    State(state): State<AppState>,
    Json(req): Json<MergePullRequestRequest>,
) -> Result<Json<PullRequestResponse>> {
    let req = validated(req)?;

    let pr = state
        .service
        .merge_pull_request(MergePullRequestInput {
            pull_request_id: req.pull_request_id,
        })
        .await?;

    Ok(Json(PullRequestResponse {
        pr: pr.into(),
    }))
}

/// Replace one assigned reviewer with a fresh candidate
pub async fn reassign_pull_request_handler(
    State(state): State<AppState>,
    Json(req): Json<ReassignPullRequestRequest>,
) -> Result<Json<ReassignPullRequestResponse>> {
    let req = validated(req)?;

    let result = state
        .service
        .reassign_pull_request(ReassignPullRequestInput {
            pull_request_id: req.pull_request_id,
            old_user_id:     req.old_user_id,
        })
        .await?;

    Ok(Json(ReassignPullRequestResponse {
        pr:          result.pull_request.into(),
        replaced_by: result.replaced_by,
    }))
}

/// Reconcile stale reviewers on an open pull request
pub async fn safe_reassign_pull_request_handler(
    State(state): State<AppState>,
    Json(req): Json<SafeReassignPullRequestRequest>,
) -> Result<Json<PullRequestResponse>> {
    let req = validated(req)?;

    let pr = state.service.safe_reassign_pr(req.pull_request_id).await?;

    Ok(Json(PullRequestResponse {
        pr: pr.into(),
    }))
}
