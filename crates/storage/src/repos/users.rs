//! # User Repository
//!
//! Writes go through a batched upsert so team creation and team-wide
//! deactivation are single round trips per member set.

use async_trait::async_trait;
use chrono::Utc;
use domain::{User, UserStats, UserStatsEntry};
use entity::users::{self, Entity as Users};
use sea_orm::{
    sea_query::OnConflict,
    ActiveModelTrait,
    DatabaseTransaction,
    DbBackend,
    EntityTrait,
    FromQueryResult,
    Set,
    Statement,
};

use crate::{traits::UserRepo, StorageError};

pub(crate) struct PgUserRepo<'t> {
    conn: &'t DatabaseTransaction,
}

impl<'t> PgUserRepo<'t> {
    pub(crate) fn new(conn: &'t DatabaseTransaction) -> Self {
        Self {
            conn,
        }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo<'_> {
    async fn get_by_id(&self, user_id: &str) -> Result<User, StorageError> {
        let model = Users::find_by_id(user_id)
            .one(self.conn)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(User {
            user_id:   model.user_id,
            username:  model.username,
            team_name: model.team_name,
            is_active: model.is_active,
        })
    }

    async fn update(&self, user: &User) -> Result<(), StorageError> {
        let model = users::ActiveModel {
            user_id: Set(user.user_id.clone()),
            username: Set(user.username.clone()),
            team_name: Set(user.team_name.clone()),
            is_active: Set(user.is_active),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        model
            .update(self.conn)
            .await
            .map_err(StorageError::from_update)?;
        Ok(())
    }

    async fn upsert_batch(&self, batch: &[User]) -> Result<(), StorageError> {
        if batch.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let models: Vec<users::ActiveModel> = batch
            .iter()
            .map(|user| {
                users::ActiveModel {
                    user_id:    Set(user.user_id.clone()),
                    username:   Set(user.username.clone()),
                    team_name:  Set(user.team_name.clone()),
                    is_active:  Set(user.is_active),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
            })
            .collect();

        Users::insert_many(models)
            .on_conflict(
                OnConflict::column(users::Column::UserId)
                    .update_columns([
                        users::Column::Username,
                        users::Column::TeamName,
                        users::Column::IsActive,
                        users::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.conn)
            .await
            .map_err(StorageError::from_write)?;
        Ok(())
    }

    async fn stats(&self) -> Result<UserStats, StorageError> {
        let stmt = Statement::from_string(DbBackend::Postgres, USER_STATS_SQL);
        let rows = UserStatsRow::find_by_statement(stmt).all(self.conn).await?;

        let mut stats = UserStats {
            total: rows.len() as i64,
            ..Default::default()
        };

        for row in rows {
            if row.is_active {
                stats.active += 1;
            }
            else {
                stats.inactive += 1;
            }
            stats.by_user.push(UserStatsEntry {
                user_id:                row.user_id,
                username:               row.username,
                team:                   row.team,
                is_active:              row.is_active,
                assigned_reviews_total: row.assigned_reviews_total,
                open_reviews:           row.open_reviews,
                merged_reviews:         row.merged_reviews,
            });
        }

        Ok(stats)
    }
}

const USER_STATS_SQL: &str = r#"
SELECT u.user_id,
       u.username,
       COALESCE(u.team_name, '')                                 AS team,
       u.is_active,
       COUNT(p.id)                                               AS assigned_reviews_total,
       COUNT(p.id) FILTER (WHERE p.status = 'OPEN')              AS open_reviews,
       COUNT(p.id) FILTER (WHERE p.status = 'MERGED')            AS merged_reviews
FROM users u
LEFT JOIN pull_requests p ON u.user_id = ANY(p.assigned_reviewers)
GROUP BY u.user_id, u.username, u.team_name, u.is_active
ORDER BY u.user_id
"#;

#[derive(Debug, FromQueryResult)]
struct UserStatsRow {
    user_id:                String,
    username:               String,
    team:                   String,
    is_active:              bool,
    assigned_reviews_total: i64,
    open_reviews:           i64,
    merged_reviews:         i64,
}
