//! Unit tests for the assignment operations, run against an in-memory
//! transaction manager that mimics the storage contract including
//! commit/rollback semantics.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use domain::{
    PullRequestShort,
    PullRequestStats,
    TeamStats,
    TeamStatsEntry,
    UserStats,
    UserStatsEntry,
};
use storage::{PullRequestRepo, TeamRepo, UserRepo};

use super::*;

#[derive(Debug, Clone, Default)]
struct MemState {
    teams:            HashSet<String>,
    users:            HashMap<String, User>,
    prs:              HashMap<String, PullRequest>,
    fail_user_upsert: bool,
}

struct MemTx {
    state: Mutex<MemState>,
}

impl Tx for MemTx {
    fn pull_requests(&self) -> &dyn PullRequestRepo { self }

    fn teams(&self) -> &dyn TeamRepo { self }

    fn users(&self) -> &dyn UserRepo { self }
}

#[async_trait]
impl PullRequestRepo for MemTx {
    async fn create(&self, pr: &PullRequest) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        if state.prs.contains_key(&pr.id) {
            return Err(StorageError::AlreadyExists);
        }
        state.prs.insert(pr.id.clone(), pr.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<PullRequest, StorageError> {
        self.state
            .lock()
            .unwrap()
            .prs
            .get(id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn get_assignments(&self, reviewer_id: &str) -> Result<Vec<PullRequestShort>, StorageError> {
        let state = self.state.lock().unwrap();
        let mut result: Vec<PullRequestShort> = state
            .prs
            .values()
            .filter(|pr| pr.assigned_reviewers.iter().any(|id| id == reviewer_id))
            .map(|pr| {
                PullRequestShort {
                    id:        pr.id.clone(),
                    name:      pr.name.clone(),
                    author_id: pr.author_id.clone(),
                    status:    pr.status,
                }
            })
            .collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(result)
    }

    async fn update(&self, pr: &PullRequest) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        match state.prs.get_mut(&pr.id) {
            Some(slot) => {
                *slot = pr.clone();
                Ok(())
            },
            None => Err(StorageError::NotFound),
        }
    }

    async fn stats(&self) -> Result<PullRequestStats, StorageError> {
        let state = self.state.lock().unwrap();
        let mut stats = PullRequestStats {
            total: state.prs.len() as i64,
            ..Default::default()
        };
        for pr in state.prs.values() {
            match pr.status {
                PrStatus::Open => stats.open += 1,
                PrStatus::Merged => stats.merged += 1,
            }
            match pr.assigned_reviewers.len() {
                0 => stats.with_0_reviewers += 1,
                1 => stats.with_1_reviewer += 1,
                2 => stats.with_2_reviewers += 1,
                _ => {},
            }
        }
        Ok(stats)
    }
}

#[async_trait]
impl TeamRepo for MemTx {
    async fn create(&self, team: &Team) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        if !state.teams.insert(team.name.clone()) {
            return Err(StorageError::AlreadyExists);
        }
        Ok(())
    }

    async fn get_by_name(&self, name: &str) -> Result<Team, StorageError> {
        let state = self.state.lock().unwrap();
        if !state.teams.contains(name) {
            return Err(StorageError::NotFound);
        }
        let mut members: Vec<TeamMember> = state
            .users
            .values()
            .filter(|user| user.team_name.as_deref() == Some(name))
            .map(|user| {
                TeamMember {
                    user_id:   user.user_id.clone(),
                    username:  user.username.clone(),
                    is_active: user.is_active,
                }
            })
            .collect();
        members.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(Team {
            name: name.to_string(),
            members,
        })
    }

    async fn stats(&self) -> Result<TeamStats, StorageError> {
        let state = self.state.lock().unwrap();
        let mut names: Vec<&String> = state.teams.iter().collect();
        names.sort();

        let by_team: Vec<TeamStatsEntry> = names
            .into_iter()
            .map(|name| {
                let members: Vec<&User> = state
                    .users
                    .values()
                    .filter(|user| user.team_name.as_deref() == Some(name.as_str()))
                    .collect();
                let team_prs: Vec<&PullRequest> = state
                    .prs
                    .values()
                    .filter(|pr| {
                        state
                            .users
                            .get(&pr.author_id)
                            .is_some_and(|author| author.team_name.as_deref() == Some(name.as_str()))
                    })
                    .collect();
                TeamStatsEntry {
                    team_name:         name.clone(),
                    members_total:     members.len() as i64,
                    members_active:    members.iter().filter(|m| m.is_active).count() as i64,
                    prs_created_total: team_prs.len() as i64,
                    prs_open:          team_prs
                        .iter()
                        .filter(|pr| pr.status == PrStatus::Open)
                        .count() as i64,
                }
            })
            .collect();

        Ok(TeamStats {
            total: by_team.len() as i64,
            by_team,
        })
    }
}

#[async_trait]
impl UserRepo for MemTx {
    async fn get_by_id(&self, user_id: &str) -> Result<User, StorageError> {
        self.state
            .lock()
            .unwrap()
            .users
            .get(user_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn update(&self, user: &User) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        match state.users.get_mut(&user.user_id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(())
            },
            None => Err(StorageError::NotFound),
        }
    }

    async fn upsert_batch(&self, batch: &[User]) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_user_upsert {
            return Err(StorageError::Db(sea_orm::DbErr::Custom(
                "injected failure".to_string(),
            )));
        }
        for user in batch {
            state.users.insert(user.user_id.clone(), user.clone());
        }
        Ok(())
    }

    async fn stats(&self) -> Result<UserStats, StorageError> {
        let state = self.state.lock().unwrap();
        let mut stats = UserStats {
            total: state.users.len() as i64,
            ..Default::default()
        };
        let mut ids: Vec<&String> = state.users.keys().collect();
        ids.sort();
        for id in ids {
            let user = &state.users[id];
            if user.is_active {
                stats.active += 1;
            }
            else {
                stats.inactive += 1;
            }
            let assigned: Vec<&PullRequest> = state
                .prs
                .values()
                .filter(|pr| pr.assigned_reviewers.contains(&user.user_id))
                .collect();
            stats.by_user.push(UserStatsEntry {
                user_id:                user.user_id.clone(),
                username:               user.username.clone(),
                team:                   user.team_name.clone().unwrap_or_default(),
                is_active:              user.is_active,
                assigned_reviews_total: assigned.len() as i64,
                open_reviews:           assigned
                    .iter()
                    .filter(|pr| pr.status == PrStatus::Open)
                    .count() as i64,
                merged_reviews:         assigned
                    .iter()
                    .filter(|pr| pr.status == PrStatus::Merged)
                    .count() as i64,
            });
        }
        Ok(stats)
    }
}

struct MemTxManager {
    state: Mutex<MemState>,
}

impl MemTxManager {
    fn new(state: MemState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    fn snapshot(&self) -> MemState { self.state.lock().unwrap().clone() }
}

impl TxManager for MemTxManager {
    fn with_tx<'m, T, F>(&'m self, f: F) -> storage::TxFuture<'m, T>
    where
        T: Send + 'm,
        F: for<'t> FnOnce(&'t (dyn Tx + 't)) -> storage::TxFuture<'t, T> + Send + 'm,
    {
        Box::pin(async move {
            let snapshot = self.state.lock().unwrap().clone();
            let tx = MemTx {
                state: Mutex::new(snapshot),
            };
            let result = f(&tx).await;
            match result {
                Ok(value) => {
                    // Commit: publish the transaction-local state.
                    *self.state.lock().unwrap() = tx.state.into_inner().unwrap();
                    Ok(value)
                },
                Err(err) => Err(err),
            }
        })
    }
}

fn user(user_id: &str, team: &str, is_active: bool) -> User {
    User {
        user_id:   user_id.to_string(),
        username:  format!("user-{user_id}"),
        team_name: Some(team.to_string()),
        is_active,
    }
}

fn seed_team(state: &mut MemState, name: &str, members: &[(&str, bool)]) {
    state.teams.insert(name.to_string());
    for (id, active) in members {
        state.users.insert(id.to_string(), user(id, name, *active));
    }
}

fn seed_pr(state: &mut MemState, id: &str, author: &str, reviewers: &[&str], status: PrStatus) {
    state.prs.insert(
        id.to_string(),
        PullRequest {
            id:                 id.to_string(),
            name:               format!("pr-{id}"),
            author_id:          author.to_string(),
            status,
            assigned_reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
            created_at:         Utc::now(),
            merged_at:          match status {
                PrStatus::Open => None,
                PrStatus::Merged => Some(Utc::now()),
            },
        },
    );
}

fn service_with(state: MemState) -> AssignmentService<MemTxManager> {
    AssignmentService::new(MemTxManager::new(state))
}

fn create_input(id: &str, author: &str) -> CreatePullRequestInput {
    CreatePullRequestInput {
        pull_request_id:   id.to_string(),
        pull_request_name: format!("pr-{id}"),
        author_id:         author.to_string(),
    }
}

#[tokio::test]
async fn test_create_pull_request_assigns_two_teammates() {
    let mut state = MemState::default();
    seed_team(
        &mut state,
        "backend",
        &[("a1", true), ("b1", true), ("c1", true), ("d1", false)],
    );
    let service = service_with(state);

    let pr = service.create_pull_request(create_input("pr1", "a1")).await.unwrap();

    assert_eq!(pr.status, PrStatus::Open);
    assert!(pr.merged_at.is_none());
    assert_eq!(pr.assigned_reviewers.len(), 2);
    assert!(!pr.assigned_reviewers.contains(&"a1".to_string()));
    assert!(!pr.assigned_reviewers.contains(&"d1".to_string()));
    for reviewer in &pr.assigned_reviewers {
        assert!(["b1", "c1"].contains(&reviewer.as_str()));
    }
}

#[tokio::test]
async fn test_create_pull_request_author_alone_gets_no_reviewers() {
    let mut state = MemState::default();
    seed_team(&mut state, "solo", &[("a1", true)]);
    let service = service_with(state);

    let pr = service.create_pull_request(create_input("pr1", "a1")).await.unwrap();

    assert_eq!(pr.status, PrStatus::Open);
    assert!(pr.assigned_reviewers.is_empty());
}

#[tokio::test]
async fn test_create_pull_request_duplicate_id_refused() {
    let mut state = MemState::default();
    seed_team(&mut state, "backend", &[("a1", true), ("b1", true)]);
    let service = service_with(state);

    service.create_pull_request(create_input("pr1", "a1")).await.unwrap();
    let err = service
        .create_pull_request(create_input("pr1", "b1"))
        .await
        .unwrap_err();

    assert_eq!(err, AppError::pr_exists());
}

#[tokio::test]
async fn test_create_pull_request_unknown_author() {
    let service = service_with(MemState::default());

    let err = service
        .create_pull_request(create_input("pr1", "ghost"))
        .await
        .unwrap_err();

    assert_eq!(err, AppError::not_found("resource not found"));
}

#[tokio::test]
async fn test_create_pull_request_author_without_team() {
    let mut state = MemState::default();
    state.users.insert(
        "a1".to_string(),
        User {
            user_id:   "a1".to_string(),
            username:  "user-a1".to_string(),
            team_name: None,
            is_active: true,
        },
    );
    let service = service_with(state);

    let err = service
        .create_pull_request(create_input("pr1", "a1"))
        .await
        .unwrap_err();

    assert_eq!(err, AppError::not_found("resource not found"));
}

#[tokio::test]
async fn test_merge_is_idempotent() {
    let mut state = MemState::default();
    seed_team(&mut state, "backend", &[("a1", true), ("b1", true), ("c1", true)]);
    seed_pr(&mut state, "pr1", "a1", &["b1", "c1"], PrStatus::Open);
    let service = service_with(state);

    let input = MergePullRequestInput {
        pull_request_id: "pr1".to_string(),
    };
    let merged = service.merge_pull_request(input.clone()).await.unwrap();
    assert_eq!(merged.status, PrStatus::Merged);
    let merged_at = merged.merged_at.expect("merged_at must be set");
    assert_eq!(merged.assigned_reviewers, vec!["b1", "c1"]);

    let again = service.merge_pull_request(input).await.unwrap();
    assert_eq!(again.status, PrStatus::Merged);
    assert_eq!(again.merged_at, Some(merged_at));
    assert_eq!(again.assigned_reviewers, vec!["b1", "c1"]);
}

#[tokio::test]
async fn test_merge_unknown_pr() {
    let service = service_with(MemState::default());

    let err = service
        .merge_pull_request(MergePullRequestInput {
            pull_request_id: "ghost".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err, AppError::not_found("resource not found"));
}

#[tokio::test]
async fn test_reassign_replaces_first_occurrence_in_place() {
    let mut state = MemState::default();
    seed_team(
        &mut state,
        "backend",
        &[("a1", true), ("b1", true), ("c1", true), ("e1", true)],
    );
    seed_pr(&mut state, "pr1", "a1", &["b1", "c1"], PrStatus::Open);
    let service = service_with(state);

    let result = service
        .reassign_pull_request(ReassignPullRequestInput {
            pull_request_id: "pr1".to_string(),
            old_user_id:     "b1".to_string(),
        })
        .await
        .unwrap();

    // The only eligible candidate outside {a1, b1, c1} is e1, and it must
    // take b1's slot while c1 keeps its position.
    assert_eq!(result.replaced_by, "e1");
    assert_eq!(result.pull_request.assigned_reviewers, vec!["e1", "c1"]);
}

#[tokio::test]
async fn test_reassign_on_merged_pr() {
    let mut state = MemState::default();
    seed_team(
        &mut state,
        "backend",
        &[("a1", true), ("b1", true), ("c1", true), ("e1", true)],
    );
    seed_pr(&mut state, "pr1", "a1", &["b1", "c1"], PrStatus::Merged);
    let service = service_with(state);

    let err = service
        .reassign_pull_request(ReassignPullRequestInput {
            pull_request_id: "pr1".to_string(),
            old_user_id:     "b1".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err, AppError::pr_merged());
}

#[tokio::test]
async fn test_reassign_user_not_assigned() {
    let mut state = MemState::default();
    seed_team(
        &mut state,
        "backend",
        &[("a1", true), ("b1", true), ("c1", true), ("e1", true)],
    );
    seed_pr(&mut state, "pr1", "a1", &["b1", "c1"], PrStatus::Open);
    let service = service_with(state);

    let err = service
        .reassign_pull_request(ReassignPullRequestInput {
            pull_request_id: "pr1".to_string(),
            old_user_id:     "e1".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err, AppError::not_assigned());
}

#[tokio::test]
async fn test_reassign_no_candidate_in_team_of_two() {
    let mut state = MemState::default();
    seed_team(&mut state, "duo", &[("a1", true), ("b1", true)]);
    seed_pr(&mut state, "pr1", "a1", &["b1"], PrStatus::Open);
    let service = service_with(state);

    let err = service
        .reassign_pull_request(ReassignPullRequestInput {
            pull_request_id: "pr1".to_string(),
            old_user_id:     "b1".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err, AppError::no_candidate());
}

#[tokio::test]
async fn test_reassign_unknown_old_user() {
    let mut state = MemState::default();
    seed_team(&mut state, "backend", &[("a1", true), ("b1", true)]);
    seed_pr(&mut state, "pr1", "a1", &["b1"], PrStatus::Open);
    let service = service_with(state);

    let err = service
        .reassign_pull_request(ReassignPullRequestInput {
            pull_request_id: "pr1".to_string(),
            old_user_id:     "ghost".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err, AppError::not_found("resource not found"));
}

#[tokio::test]
async fn test_create_team_then_get_team_round_trip() {
    let service = service_with(MemState::default());

    let team = Team {
        name:    "backend".to_string(),
        members: vec![
            TeamMember {
                user_id:   "a1".to_string(),
                username:  "alice".to_string(),
                is_active: true,
            },
            TeamMember {
                user_id:   "b1".to_string(),
                username:  "bob".to_string(),
                is_active: false,
            },
        ],
    };

    let created = service.create_team(team.clone()).await.unwrap();
    assert_eq!(created.name, "backend");

    let fetched = service.get_team("backend".to_string()).await.unwrap();
    assert_eq!(fetched.name, team.name);
    let expected: HashSet<TeamMember> = team.members.into_iter().collect();
    let actual: HashSet<TeamMember> = fetched.members.into_iter().collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_create_team_duplicate_name() {
    let mut state = MemState::default();
    seed_team(&mut state, "backend", &[("a1", true)]);
    let service = service_with(state);

    let err = service
        .create_team(Team {
            name:    "backend".to_string(),
            members: vec![],
        })
        .await
        .unwrap_err();

    assert_eq!(err, AppError::team_exists());
}

#[tokio::test]
async fn test_create_team_rolls_back_on_member_write_failure() {
    let state = MemState {
        fail_user_upsert: true,
        ..Default::default()
    };
    let service = service_with(state);

    let err = service
        .create_team(Team {
            name:    "backend".to_string(),
            members: vec![TeamMember {
                user_id:   "a1".to_string(),
                username:  "alice".to_string(),
                is_active: true,
            }],
        })
        .await
        .unwrap_err();

    assert_eq!(err, AppError::internal("internal server error"));

    // The team insert preceded the failing member write; the rollback must
    // discard it.
    let fetch = service.get_team("backend".to_string()).await.unwrap_err();
    assert_eq!(fetch, AppError::not_found("resource not found"));
}

#[tokio::test]
async fn test_get_team_unknown() {
    let service = service_with(MemState::default());

    let err = service.get_team("ghost".to_string()).await.unwrap_err();
    assert_eq!(err, AppError::not_found("resource not found"));
}

#[tokio::test]
async fn test_reviewer_assignments_unknown_user() {
    let service = service_with(MemState::default());

    let err = service
        .get_reviewer_assignments("ghost".to_string())
        .await
        .unwrap_err();
    assert_eq!(err, AppError::not_found("resource not found"));
}

#[tokio::test]
async fn test_reviewer_assignments_empty_for_known_user() {
    let mut state = MemState::default();
    seed_team(&mut state, "backend", &[("a1", true)]);
    let service = service_with(state);

    let result = service.get_reviewer_assignments("a1".to_string()).await.unwrap();
    assert_eq!(result.user_id, "a1");
    assert!(result.pull_requests.is_empty());
}

#[tokio::test]
async fn test_reviewer_assignments_track_status_across_merge() {
    let mut state = MemState::default();
    seed_team(&mut state, "backend", &[("a1", true), ("b1", true), ("c1", true)]);
    seed_pr(&mut state, "pr4", "a1", &["b1", "c1"], PrStatus::Open);
    let service = service_with(state);

    let before = service.get_reviewer_assignments("b1".to_string()).await.unwrap();
    assert_eq!(before.pull_requests.len(), 1);
    assert_eq!(before.pull_requests[0].id, "pr4");
    assert_eq!(before.pull_requests[0].status, PrStatus::Open);

    service
        .merge_pull_request(MergePullRequestInput {
            pull_request_id: "pr4".to_string(),
        })
        .await
        .unwrap();

    let after = service.get_reviewer_assignments("b1".to_string()).await.unwrap();
    assert_eq!(after.pull_requests.len(), 1);
    assert_eq!(after.pull_requests[0].status, PrStatus::Merged);
}

#[tokio::test]
async fn test_set_user_is_active_persists() {
    let mut state = MemState::default();
    seed_team(&mut state, "backend", &[("a1", true)]);
    let service = service_with(state);

    let updated = service
        .set_user_is_active(SetUserIsActiveInput {
            user_id:   "a1".to_string(),
            is_active: false,
        })
        .await
        .unwrap();
    assert!(!updated.is_active);

    let team = service.get_team("backend".to_string()).await.unwrap();
    assert!(!team.members[0].is_active);
}

#[tokio::test]
async fn test_set_user_is_active_unknown_user() {
    let service = service_with(MemState::default());

    let err = service
        .set_user_is_active(SetUserIsActiveInput {
            user_id:   "ghost".to_string(),
            is_active: true,
        })
        .await
        .unwrap_err();
    assert_eq!(err, AppError::not_found("resource not found"));
}

#[tokio::test]
async fn test_deactivate_team_counts_members() {
    let mut state = MemState::default();
    seed_team(&mut state, "backend", &[("a1", true), ("b1", true), ("c1", false)]);
    let service = service_with(state);

    let count = service.deactivate_team("backend".to_string()).await.unwrap();
    assert_eq!(count, 3);

    let team = service.get_team("backend".to_string()).await.unwrap();
    assert!(team.members.iter().all(|m| !m.is_active));
}

#[tokio::test]
async fn test_deactivate_team_unknown() {
    let service = service_with(MemState::default());

    let err = service.deactivate_team("ghost".to_string()).await.unwrap_err();
    assert_eq!(err, AppError::not_found("resource not found"));
}

#[tokio::test]
async fn test_safe_reassign_replaces_inactive_reviewer() {
    let mut state = MemState::default();
    seed_team(
        &mut state,
        "t2",
        &[("a1", true), ("b1", false), ("c1", true), ("e1", true)],
    );
    seed_pr(&mut state, "pr2", "a1", &["b1", "c1"], PrStatus::Open);
    let service = service_with(state);

    let pr = service.safe_reassign_pr("pr2".to_string()).await.unwrap();

    assert_eq!(pr.assigned_reviewers.len(), 2);
    let roster: HashSet<&str> = pr.assigned_reviewers.iter().map(String::as_str).collect();
    assert_eq!(roster, HashSet::from(["c1", "e1"]));
}

#[tokio::test]
async fn test_safe_reassign_is_a_closure() {
    let mut state = MemState::default();
    seed_team(
        &mut state,
        "t2",
        &[("a1", true), ("b1", false), ("c1", true), ("e1", true)],
    );
    seed_pr(&mut state, "pr2", "a1", &["b1", "c1"], PrStatus::Open);
    let service = service_with(state);

    let first = service.safe_reassign_pr("pr2".to_string()).await.unwrap();
    let second = service.safe_reassign_pr("pr2".to_string()).await.unwrap();

    assert_eq!(first.assigned_reviewers, second.assigned_reviewers);
}

#[tokio::test]
async fn test_safe_reassign_drops_vanished_reviewer() {
    let mut state = MemState::default();
    seed_team(&mut state, "backend", &[("a1", true), ("c1", true)]);
    seed_pr(&mut state, "pr1", "a1", &["ghost", "c1"], PrStatus::Open);
    let service = service_with(state);

    let pr = service.safe_reassign_pr("pr1".to_string()).await.unwrap();
    assert_eq!(pr.assigned_reviewers, vec!["c1"]);
}

#[tokio::test]
async fn test_safe_reassign_slot_stays_dropped_without_candidate() {
    let mut state = MemState::default();
    seed_team(&mut state, "trio", &[("a1", true), ("b1", false), ("c1", true)]);
    seed_pr(&mut state, "pr1", "a1", &["b1", "c1"], PrStatus::Open);
    let service = service_with(state);

    let pr = service.safe_reassign_pr("pr1".to_string()).await.unwrap();
    assert_eq!(pr.assigned_reviewers, vec!["c1"]);
}

#[tokio::test]
async fn test_safe_reassign_excludes_prior_replacements() {
    // Both reviewers are stale but only one candidate exists; the second
    // slot must not reuse the replacement picked for the first.
    let mut state = MemState::default();
    seed_team(
        &mut state,
        "backend",
        &[("a1", true), ("b1", false), ("c1", false), ("e1", true)],
    );
    seed_pr(&mut state, "pr1", "a1", &["b1", "c1"], PrStatus::Open);
    let service = service_with(state);

    let pr = service.safe_reassign_pr("pr1".to_string()).await.unwrap();
    assert_eq!(pr.assigned_reviewers, vec!["e1"]);
}

#[tokio::test]
async fn test_safe_reassign_leaves_merged_pr_untouched() {
    let mut state = MemState::default();
    seed_team(&mut state, "backend", &[("a1", true), ("b1", false), ("c1", true)]);
    seed_pr(&mut state, "pr1", "a1", &["b1", "c1"], PrStatus::Merged);
    let service = service_with(state);

    let pr = service.safe_reassign_pr("pr1".to_string()).await.unwrap();
    assert_eq!(pr.status, PrStatus::Merged);
    assert_eq!(pr.assigned_reviewers, vec!["b1", "c1"]);
}

#[tokio::test]
async fn test_safe_reassign_unknown_pr() {
    let service = service_with(MemState::default());

    let err = service.safe_reassign_pr("ghost".to_string()).await.unwrap_err();
    assert_eq!(err, AppError::not_found("resource not found"));
}

#[tokio::test]
async fn test_get_stats_reflects_one_snapshot() {
    let mut state = MemState::default();
    seed_team(&mut state, "backend", &[("a1", true), ("b1", true), ("c1", false)]);
    seed_team(&mut state, "frontend", &[("f1", true)]);
    seed_pr(&mut state, "pr1", "a1", &["b1", "c1"], PrStatus::Open);
    seed_pr(&mut state, "pr2", "a1", &["b1"], PrStatus::Merged);
    seed_pr(&mut state, "pr3", "f1", &[], PrStatus::Open);
    let service = service_with(state);

    let stats = service.get_stats().await.unwrap();

    assert_eq!(stats.users.total, 4);
    assert_eq!(stats.users.active, 3);
    assert_eq!(stats.users.inactive, 1);
    let b1 = stats
        .users
        .by_user
        .iter()
        .find(|entry| entry.user_id == "b1")
        .unwrap();
    assert_eq!(b1.assigned_reviews_total, 2);
    assert_eq!(b1.open_reviews, 1);
    assert_eq!(b1.merged_reviews, 1);

    assert_eq!(stats.prs.total, 3);
    assert_eq!(stats.prs.open, 2);
    assert_eq!(stats.prs.merged, 1);
    assert_eq!(stats.prs.with_0_reviewers, 1);
    assert_eq!(stats.prs.with_1_reviewer, 1);
    assert_eq!(stats.prs.with_2_reviewers, 1);

    assert_eq!(stats.teams.total, 2);
    let backend = stats
        .teams
        .by_team
        .iter()
        .find(|entry| entry.team_name == "backend")
        .unwrap();
    assert_eq!(backend.members_total, 3);
    assert_eq!(backend.members_active, 2);
    assert_eq!(backend.prs_created_total, 2);
    assert_eq!(backend.prs_open, 1);
}

#[tokio::test]
async fn test_failed_operation_does_not_commit() {
    let mut state = MemState::default();
    seed_team(&mut state, "backend", &[("a1", true), ("b1", true)]);
    let service = service_with(state);

    service.create_pull_request(create_input("pr1", "a1")).await.unwrap();
    let before = service.txm.snapshot();

    let err = service
        .create_pull_request(create_input("pr1", "a1"))
        .await
        .unwrap_err();
    assert_eq!(err, AppError::pr_exists());

    let after = service.txm.snapshot();
    assert_eq!(before.prs.len(), after.prs.len());
}
