//! # Domain Entities
//!
//! Teams, team members, users and pull requests as the assignment engine
//! sees them, plus the operation inputs and results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a pull request.
///
/// The only transition is `Open` -> `Merged`; merged pull requests are
/// immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrStatus {
    Open,
    Merged,
}

impl PrStatus {
    /// The wire representation (`OPEN` / `MERGED`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PrStatus::Open => "OPEN",
            PrStatus::Merged => "MERGED",
        }
    }
}

impl std::fmt::Display for PrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.as_str()) }
}

/// A pull request with its assigned reviewer roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Client-chosen identifier, unique across all pull requests.
    pub id:                 String,
    pub name:               String,
    pub author_id:          String,
    pub status:             PrStatus,
    /// Up to two distinct reviewer user ids, never containing the author.
    pub assigned_reviewers: Vec<String>,
    pub created_at:         DateTime<Utc>,
    /// Set exactly once, when the pull request is merged.
    pub merged_at:          Option<DateTime<Utc>>,
}

/// Short projection of a pull request used in reviewer listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestShort {
    pub id:        String,
    pub name:      String,
    pub author_id: String,
    pub status:    PrStatus,
}

/// A team and its members, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name:    String,
    pub members: Vec<TeamMember>,
}

/// A member of a team. Identity is the globally unique `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMember {
    pub user_id:   String,
    pub username:  String,
    pub is_active: bool,
}

/// A user as stored canonically in the user store.
///
/// `team_name` is `None` for users that have not been attached to a team;
/// such users cannot author pull requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id:   String,
    pub username:  String,
    pub team_name: Option<String>,
    pub is_active: bool,
}

/// Input for creating a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePullRequestInput {
    pub pull_request_id:   String,
    pub pull_request_name: String,
    pub author_id:         String,
}

/// Input for merging a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePullRequestInput {
    pub pull_request_id: String,
}

/// Input for replacing one assigned reviewer with a fresh candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignPullRequestInput {
    pub pull_request_id: String,
    pub old_user_id:     String,
}

/// Result of a reassignment: the updated pull request and the id of the
/// reviewer that took the vacated slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignPullRequestResult {
    pub pull_request: PullRequest,
    pub replaced_by:  String,
}

/// All pull requests a user is assigned to review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerAssignments {
    pub user_id:       String,
    pub pull_requests: Vec<PullRequestShort>,
}

/// Input for flipping a user's activity flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetUserIsActiveInput {
    pub user_id:   String,
    pub is_active: bool,
}
