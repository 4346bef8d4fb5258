//! # Pull Request Data Transfer Objects

use chrono::{DateTime, Utc};
use domain::{PrStatus, PullRequest, PullRequestShort};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreatePullRequestRequest {
    #[validate(length(min = 1, message = "pull_request_id is required"))]
    pub pull_request_id:   String,
    #[validate(length(min = 1, message = "pull_request_name is required"))]
    pub pull_request_name: String,
    #[validate(length(min = 1, message = "author_id is required"))]
    pub author_id:         String,
}

/// Request to merge a pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct MergePullRequestRequest {
    #[validate(length(min = 1, message = "pull_request_id is required"))]
    pub pull_request_id: String,
}

/// Request to replace one assigned reviewer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ReassignPullRequestRequest {
    #[validate(length(min = 1, message = "pull_request_id is required"))]
    pub pull_request_id: String,
    #[validate(length(min = 1, message = "old_user_id is required"))]
    pub old_user_id:     String,
}

/// Request to reconcile stale reviewers on an open pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct SafeReassignPullRequestRequest {
    #[validate(length(min = 1, message = "pull_request_id is required"))]
    pub pull_request_id: String,
}

/// Wire shape of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestPayload {
    pub pull_request_id:    String,
    pub pull_request_name:  String,
    pub author_id:          String,
    pub status:             PrStatus,
    pub assigned_reviewers: Vec<String>,
    pub created_at:         DateTime<Utc>,
    pub merged_at:          Option<DateTime<Utc>>,
}

impl From<PullRequest> for PullRequestPayload {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id:    pr.id,
            pull_request_name:  pr.name,
            author_id:          pr.author_id,
            status:             pr.status,
            assigned_reviewers: pr.assigned_reviewers,
            created_at:         pr.created_at,
            merged_at:          pr.merged_at,
        }
    }
}

/// Wire shape of a pull request in reviewer listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestShortPayload {
    pub pull_request_id:   String,
    pub pull_request_name: String,
    pub author_id:         String,
    pub status:            PrStatus,
}

impl From<PullRequestShort> for PullRequestShortPayload {
    fn from(pr: PullRequestShort) -> Self {
        Self {
            pull_request_id:   pr.id,
            pull_request_name: pr.name,
            author_id:         pr.author_id,
            status:            pr.status,
        }
    }
}

/// Response carrying a single pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestResponse {
    pub pr: PullRequestPayload,
}

/// Response for a reviewer replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReassignPullRequestResponse {
    pub pr:          PullRequestPayload,
    pub replaced_by: String,
}
