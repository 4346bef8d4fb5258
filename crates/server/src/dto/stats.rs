//! # Statistics Data Transfer Objects
//!
//! The stats report is the one camelCase surface of the API.

use domain::{
    PullRequestStats,
    Stats,
    TeamStats,
    TeamStatsEntry,
    UserStats,
    UserStatsEntry,
};
use serde::Serialize;

/// The aggregated stats report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsResponse {
    pub users: UserStatsPayload,
    pub prs:   PullRequestStatsPayload,
    pub teams: TeamStatsPayload,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            users: stats.users.into(),
            prs:   stats.prs.into(),
            teams: stats.teams.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsPayload {
    pub total:    i64,
    pub active:   i64,
    pub inactive: i64,
    pub by_user:  Vec<UserStatsEntryPayload>,
}

impl From<UserStats> for UserStatsPayload {
    fn from(stats: UserStats) -> Self {
        Self {
            total:    stats.total,
            active:   stats.active,
            inactive: stats.inactive,
            by_user:  stats.by_user.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsEntryPayload {
    pub user_id:                String,
    pub user_name:              String,
    pub team:                   String,
    pub is_active:              bool,
    pub assigned_reviews_total: i64,
    pub open_reviews:           i64,
    pub merged_reviews:         i64,
}

impl From<UserStatsEntry> for UserStatsEntryPayload {
    fn from(entry: UserStatsEntry) -> Self {
        Self {
            user_id:                entry.user_id,
            user_name:              entry.username,
            team:                   entry.team,
            is_active:              entry.is_active,
            assigned_reviews_total: entry.assigned_reviews_total,
            open_reviews:           entry.open_reviews,
            merged_reviews:         entry.merged_reviews,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestStatsPayload {
    pub total:            i64,
    pub open:             i64,
    pub merged:           i64,
    pub with_0_reviewers: i64,
    pub with_1_reviewer:  i64,
    pub with_2_reviewers: i64,
}

impl From<PullRequestStats> for PullRequestStatsPayload {
    fn from(stats: PullRequestStats) -> Self {
        Self {
            total:            stats.total,
            open:             stats.open,
            merged:           stats.merged,
            with_0_reviewers: stats.with_0_reviewers,
            with_1_reviewer:  stats.with_1_reviewer,
            with_2_reviewers: stats.with_2_reviewers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatsPayload {
    pub total:   i64,
    pub by_team: Vec<TeamStatsEntryPayload>,
}

impl From<TeamStats> for TeamStatsPayload {
    fn from(stats: TeamStats) -> Self {
        Self {
            total:   stats.total,
            by_team: stats.by_team.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatsEntryPayload {
    pub team_name:         String,
    pub members_total:     i64,
    pub members_active:    i64,
    pub prs_created_total: i64,
    pub prs_open:          i64,
}

impl From<TeamStatsEntry> for TeamStatsEntryPayload {
    fn from(entry: TeamStatsEntry) -> Self {
        Self {
            team_name:         entry.team_name,
            members_total:     entry.members_total,
            members_active:    entry.members_active,
            prs_created_total: entry.prs_created_total,
            prs_open:          entry.prs_open,
        }
    }
}
