//! # Assignment Operations
//!
//! Each public method runs as one transaction: read, decide, mutate,
//! commit. Storage sentinels are translated here — `NotFound` becomes the
//! domain `NOT_FOUND`, `AlreadyExists` becomes the operation-specific
//! conflict, and anything else is logged with the operation tag and
//! collapsed into `INTERNAL_ERROR`.

use std::collections::HashSet;

use chrono::Utc;
use domain::{
    CreatePullRequestInput,
    MergePullRequestInput,
    PrStatus,
    PullRequest,
    ReassignPullRequestInput,
    ReassignPullRequestResult,
    ReviewerAssignments,
    SetUserIsActiveInput,
    Stats,
    Team,
    TeamMember,
    User,
};
use error::AppError;
use storage::{StorageError, Tx, TxManager};
use tracing::{info, warn};

use crate::picker;

/// The assignment engine, generic over the transaction manager so tests
/// can substitute an in-memory one.
pub struct AssignmentService<M> {
    txm: M,
}

impl<M: TxManager> AssignmentService<M> {
    #[must_use]
    pub fn new(txm: M) -> Self {
        Self {
            txm,
        }
    }

    /// Create a pull request and assign up to two reviewers from the
    /// author's team, excluding the author.
    ///
    /// A team consisting only of the author yields an open PR with no
    /// reviewers; that is permitted.
    pub async fn create_pull_request(&self, input: CreatePullRequestInput) -> Result<PullRequest, AppError> {
        const OP: &str = "service.create_pull_request";

        self.txm
            .with_tx(move |tx| {
                Box::pin(async move {
                    match tx.pull_requests().get_by_id(&input.pull_request_id).await {
                        Ok(_) => return Err(AppError::pr_exists()),
                        Err(StorageError::NotFound) => {},
                        Err(other) => return Err(map_storage(OP, other)),
                    }

                    let author = tx
                        .users()
                        .get_by_id(&input.author_id)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    let team = load_team_of(tx, OP, &author).await?;

                    let exclude: HashSet<String> = std::iter::once(input.author_id.clone()).collect();
                    let reviewers = picker::pick_two(&team.members, &exclude, &mut rand::rng());

                    let pr = PullRequest {
                        id:                 input.pull_request_id,
                        name:               input.pull_request_name,
                        author_id:          input.author_id,
                        status:             PrStatus::Open,
                        assigned_reviewers: reviewers,
                        created_at:         Utc::now(),
                        merged_at:          None,
                    };

                    tx.pull_requests().create(&pr).await.map_err(|err| {
                        match err {
                            StorageError::AlreadyExists => AppError::pr_exists(),
                            other => map_storage(OP, other),
                        }
                    })?;

                    info!(
                        pr_id = %pr.id,
                        author_id = %pr.author_id,
                        reviewers = pr.assigned_reviewers.len(),
                        "pull request created"
                    );
                    Ok(pr)
                })
            })
            .await
    }

    /// Merge a pull request. Idempotent: a second merge returns the PR
    /// unchanged, preserving the original `merged_at`.
    pub async fn merge_pull_request(&self, input: MergePullRequestInput) -> Result<PullRequest, AppError> {
        const OP: &str = "service.merge_pull_request";

        self.txm
            .with_tx(move |tx| {
                Box::pin(async move {
                    let mut pr = tx
                        .pull_requests()
                        .get_by_id(&input.pull_request_id)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    if pr.status == PrStatus::Merged {
                        return Ok(pr);
                    }

                    pr.status = PrStatus::Merged;
                    pr.merged_at = Some(Utc::now());

                    tx.pull_requests()
                        .update(&pr)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    info!(pr_id = %pr.id, "pull request merged");
                    Ok(pr)
                })
            })
            .await
    }

    /// Replace one assigned reviewer with a fresh candidate from the
    /// author's team, excluding the author and every current reviewer.
    pub async fn reassign_pull_request(
        &self,
        input: ReassignPullRequestInput,
    ) -> Result<ReassignPullRequestResult, AppError> {
        const OP: &str = "service.reassign_pull_request";

        self.txm
            .with_tx(move |tx| {
                Box::pin(async move {
                    let old_user = tx
                        .users()
                        .get_by_id(&input.old_user_id)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    let mut pr = tx
                        .pull_requests()
                        .get_by_id(&input.pull_request_id)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    if !pr.assigned_reviewers.contains(&old_user.user_id) {
                        return Err(AppError::not_assigned());
                    }

                    if pr.status == PrStatus::Merged {
                        return Err(AppError::pr_merged());
                    }

                    let author = tx
                        .users()
                        .get_by_id(&pr.author_id)
                        .await
                        .map_err(|err| map_storage(OP, err))?;
                    let team = load_team_of(tx, OP, &author).await?;

                    let mut exclude: HashSet<String> = pr.assigned_reviewers.iter().cloned().collect();
                    exclude.insert(pr.author_id.clone());

                    let Some(new_id) = picker::pick_one_replacement(&team.members, &exclude, &mut rand::rng())
                    else {
                        return Err(AppError::no_candidate());
                    };

                    // Replace the first occurrence, keeping slot positions.
                    let Some(slot) = pr
                        .assigned_reviewers
                        .iter()
                        .position(|id| id == &old_user.user_id)
                    else {
                        return Err(AppError::internal("internal server error"));
                    };
                    pr.assigned_reviewers[slot] = new_id.clone();

                    tx.pull_requests()
                        .update(&pr)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    info!(
                        pr_id = %pr.id,
                        old_user_id = %old_user.user_id,
                        new_user_id = %new_id,
                        "reviewer reassigned"
                    );
                    Ok(ReassignPullRequestResult {
                        pull_request: pr,
                        replaced_by:  new_id,
                    })
                })
            })
            .await
    }

    /// Create a team and upsert all its members into the user store. A
    /// failing member write rolls the whole operation back; partial team
    /// creation is forbidden.
    pub async fn create_team(&self, team: Team) -> Result<Team, AppError> {
        const OP: &str = "service.create_team";

        self.txm
            .with_tx(move |tx| {
                Box::pin(async move {
                    tx.teams().create(&team).await.map_err(|err| {
                        match err {
                            StorageError::AlreadyExists => AppError::team_exists(),
                            other => map_storage(OP, other),
                        }
                    })?;

                    let users = members_to_users(&team.name, &team.members);
                    tx.users()
                        .upsert_batch(&users)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    info!(team_name = %team.name, members = team.members.len(), "team created");
                    Ok(team)
                })
            })
            .await
    }

    /// Get a team by name.
    pub async fn get_team(&self, team_name: String) -> Result<Team, AppError> {
        const OP: &str = "service.get_team";

        self.txm
            .with_tx(move |tx| {
                Box::pin(async move {
                    tx.teams()
                        .get_by_name(&team_name)
                        .await
                        .map_err(|err| map_storage(OP, err))
                })
            })
            .await
    }

    /// List every pull request a user is assigned to review. The user must
    /// exist; an empty list is a legitimate answer.
    pub async fn get_reviewer_assignments(&self, user_id: String) -> Result<ReviewerAssignments, AppError> {
        const OP: &str = "service.get_reviewer_assignments";

        self.txm
            .with_tx(move |tx| {
                Box::pin(async move {
                    let user = tx
                        .users()
                        .get_by_id(&user_id)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    let pull_requests = tx
                        .pull_requests()
                        .get_assignments(&user.user_id)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    Ok(ReviewerAssignments {
                        user_id: user.user_id,
                        pull_requests,
                    })
                })
            })
            .await
    }

    /// Flip a user's activity flag. Does not touch any pull request;
    /// stale reviewer rosters are reconciled lazily by
    /// [`Self::safe_reassign_pr`].
    pub async fn set_user_is_active(&self, input: SetUserIsActiveInput) -> Result<User, AppError> {
        const OP: &str = "service.set_user_is_active";

        self.txm
            .with_tx(move |tx| {
                Box::pin(async move {
                    let mut user = tx
                        .users()
                        .get_by_id(&input.user_id)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    user.is_active = input.is_active;
                    tx.users()
                        .update(&user)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    info!(user_id = %user.user_id, is_active = user.is_active, "user activity updated");
                    Ok(user)
                })
            })
            .await
    }

    /// Deactivate every member of a team. Returns the number of users
    /// touched. Pull requests are left as they are.
    pub async fn deactivate_team(&self, team_name: String) -> Result<usize, AppError> {
        const OP: &str = "service.deactivate_team";

        self.txm
            .with_tx(move |tx| {
                Box::pin(async move {
                    let team = tx
                        .teams()
                        .get_by_name(&team_name)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    let mut users = members_to_users(&team.name, &team.members);
                    for user in &mut users {
                        user.is_active = false;
                    }

                    tx.users()
                        .upsert_batch(&users)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    info!(team_name = %team.name, deactivated = users.len(), "team deactivated");
                    Ok(users.len())
                })
            })
            .await
    }

    /// Reconcile a stale reviewer roster on an open pull request.
    ///
    /// Vanished reviewers are dropped; inactive reviewers are dropped and
    /// replaced when an eligible candidate exists, with replacements chosen
    /// in the same operation excluded from later picks. The roster never
    /// grows beyond its previous size. Non-open PRs are returned untouched.
    pub async fn safe_reassign_pr(&self, pr_id: String) -> Result<PullRequest, AppError> {
        const OP: &str = "service.safe_reassign_pr";

        self.txm
            .with_tx(move |tx| {
                Box::pin(async move {
                    let mut pr = tx
                        .pull_requests()
                        .get_by_id(&pr_id)
                        .await
                        .map_err(|err| map_storage(OP, err))?;

                    if pr.status != PrStatus::Open {
                        return Ok(pr);
                    }

                    let author = tx
                        .users()
                        .get_by_id(&pr.author_id)
                        .await
                        .map_err(|err| map_storage(OP, err))?;
                    let team = load_team_of(tx, OP, &author).await?;

                    let mut exclude: HashSet<String> = HashSet::new();
                    exclude.insert(pr.author_id.clone());
                    for reviewer_id in &pr.assigned_reviewers {
                        if !exclude.insert(reviewer_id.clone()) {
                            // A duplicate in the stored roster is a latent
                            // invariant violation introduced upstream.
                            warn!(pr_id = %pr.id, reviewer_id = %reviewer_id, "duplicate reviewer in roster");
                        }
                    }

                    let mut changed = false;
                    let mut rebuilt = Vec::with_capacity(pr.assigned_reviewers.len());

                    for reviewer_id in &pr.assigned_reviewers {
                        let reviewer = match tx.users().get_by_id(reviewer_id).await {
                            Ok(user) => user,
                            Err(StorageError::NotFound) => {
                                changed = true;
                                continue;
                            },
                            Err(other) => return Err(map_storage(OP, other)),
                        };

                        if reviewer.is_active {
                            rebuilt.push(reviewer_id.clone());
                            continue;
                        }

                        changed = true;
                        if let Some(replacement) =
                            picker::pick_one_replacement(&team.members, &exclude, &mut rand::rng())
                        {
                            exclude.insert(replacement.clone());
                            rebuilt.push(replacement);
                        }
                    }

                    if changed {
                        pr.assigned_reviewers = rebuilt;
                        tx.pull_requests()
                            .update(&pr)
                            .await
                            .map_err(|err| map_storage(OP, err))?;
                        info!(pr_id = %pr.id, reviewers = pr.assigned_reviewers.len(), "stale reviewers reassigned");
                    }

                    Ok(pr)
                })
            })
            .await
    }

    /// Aggregate the user, pull request and team reports from a single
    /// committed snapshot.
    pub async fn get_stats(&self) -> Result<Stats, AppError> {
        const OP: &str = "service.get_stats";

        self.txm
            .with_tx(move |tx| {
                Box::pin(async move {
                    let users = tx.users().stats().await.map_err(|err| map_storage(OP, err))?;
                    let prs = tx
                        .pull_requests()
                        .stats()
                        .await
                        .map_err(|err| map_storage(OP, err))?;
                    let teams = tx.teams().stats().await.map_err(|err| map_storage(OP, err))?;

                    Ok(Stats {
                        users,
                        prs,
                        teams,
                    })
                })
            })
            .await
    }
}

/// Resolve the team the user belongs to; a user without a team resolves to
/// `NOT_FOUND` exactly like a missing team row.
async fn load_team_of(tx: &dyn Tx, op: &'static str, user: &User) -> Result<Team, AppError> {
    let team_name = user
        .team_name
        .as_deref()
        .ok_or_else(|| AppError::not_found("resource not found"))?;

    tx.teams()
        .get_by_name(team_name)
        .await
        .map_err(|err| map_storage(op, err))
}

/// Translate a storage sentinel into the domain taxonomy. Unknown errors
/// are logged with the operation tag; their details never cross the wire.
fn map_storage(op: &'static str, err: StorageError) -> AppError {
    match err {
        StorageError::NotFound => AppError::not_found("resource not found"),
        other => {
            tracing::error!(operation = op, error = %other, "storage operation failed");
            AppError::internal("internal server error")
        },
    }
}

fn members_to_users(team_name: &str, members: &[TeamMember]) -> Vec<User> {
    members
        .iter()
        .map(|member| {
            User {
                user_id:   member.user_id.clone(),
                username:  member.username.clone(),
                team_name: Some(team_name.to_string()),
                is_active: member.is_active,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests;
