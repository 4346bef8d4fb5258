//! # User Data Transfer Objects

use domain::{ReviewerAssignments, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::pull_requests::PullRequestShortPayload;

/// Wire shape of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub user_id:   String,
    pub username:  String,
    pub team_name: Option<String>,
    pub is_active: bool,
}

impl From<User> for UserPayload {
    fn from(user: User) -> Self {
        Self {
            user_id:   user.user_id,
            username:  user.username,
            team_name: user.team_name,
            is_active: user.is_active,
        }
    }
}

/// Request to flip a user's activity flag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct SetIsActiveRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id:   String,
    pub is_active: bool,
}

/// Response carrying the updated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetIsActiveResponse {
    pub user: UserPayload,
}

/// Query parameters for the reviewer listing
#[derive(Debug, Clone, Deserialize)]
pub struct GetReviewQuery {
    pub user_id: String,
}

/// Response listing a user's review assignments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewerAssignmentsResponse {
    pub user_id:       String,
    pub pull_requests: Vec<PullRequestShortPayload>,
}

impl From<ReviewerAssignments> for ReviewerAssignmentsResponse {
    fn from(assignments: ReviewerAssignments) -> Self {
        Self {
            user_id:       assignments.user_id,
            pull_requests: assignments
                .pull_requests
                .into_iter()
                .map(PullRequestShortPayload::from)
                .collect(),
        }
    }
}
