//! # Aggregate Statistics
//!
//! Report types produced by the stats operation. All three reports are read
//! inside a single transaction so the numbers reflect one committed
//! snapshot.

/// The full statistics report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub users: UserStats,
    pub prs:   PullRequestStats,
    pub teams: TeamStats,
}

/// User totals plus a per-user breakdown of review load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total:    i64,
    pub active:   i64,
    pub inactive: i64,
    pub by_user:  Vec<UserStatsEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStatsEntry {
    pub user_id:                String,
    pub username:               String,
    pub team:                   String,
    pub is_active:              bool,
    pub assigned_reviews_total: i64,
    pub open_reviews:           i64,
    pub merged_reviews:         i64,
}

/// Pull request totals with reviewer-count buckets (0, 1 and 2 reviewers).
///
/// Rosters larger than two are an invariant violation; they are logged by
/// the storage layer and never appear in this report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestStats {
    pub total:            i64,
    pub open:             i64,
    pub merged:           i64,
    pub with_0_reviewers: i64,
    pub with_1_reviewer:  i64,
    pub with_2_reviewers: i64,
}

/// Team total plus a per-team breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamStats {
    pub total:   i64,
    pub by_team: Vec<TeamStatsEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamStatsEntry {
    pub team_name:         String,
    pub members_total:     i64,
    pub members_active:    i64,
    pub prs_created_total: i64,
    pub prs_open:          i64,
}
