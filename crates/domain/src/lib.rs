//! # Domain Model
//!
//! Core domain types for the review assignment service: teams, users, pull
//! requests, the inputs and results of the assignment operations, and the
//! aggregate statistics reports.
//!
//! This crate is persistence- and transport-agnostic; storage entities and
//! wire DTOs are converted to and from these types at the crate boundaries.

pub mod model;
pub mod stats;

pub use model::{
    CreatePullRequestInput,
    MergePullRequestInput,
    PrStatus,
    PullRequest,
    PullRequestShort,
    ReassignPullRequestInput,
    ReassignPullRequestResult,
    ReviewerAssignments,
    SetUserIsActiveInput,
    Team,
    TeamMember,
    User,
};
pub use stats::{PullRequestStats, Stats, TeamStats, TeamStatsEntry, UserStats, UserStatsEntry};
