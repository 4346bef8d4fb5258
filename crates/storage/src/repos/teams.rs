//! # Team Repository
//!
//! The team row itself only carries the name; the member roster is read
//! from the user store, which is the canonical source for activity flags.

use async_trait::async_trait;
use chrono::Utc;
use domain::{Team, TeamMember, TeamStats, TeamStatsEntry};
use entity::{
    teams::{self, Entity as Teams},
    users::{self, Entity as Users},
};
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    DatabaseTransaction,
    DbBackend,
    EntityTrait,
    FromQueryResult,
    QueryFilter,
    QueryOrder,
    Set,
    Statement,
};

use crate::{traits::TeamRepo, StorageError};

pub(crate) struct PgTeamRepo<'t> {
    conn: &'t DatabaseTransaction,
}

impl<'t> PgTeamRepo<'t> {
    pub(crate) fn new(conn: &'t DatabaseTransaction) -> Self {
        Self {
            conn,
        }
    }
}

#[async_trait]
impl TeamRepo for PgTeamRepo<'_> {
    async fn create(&self, team: &Team) -> Result<(), StorageError> {
        let model = teams::ActiveModel {
            name:       Set(team.name.clone()),
            created_at: Set(Utc::now()),
        };

        model
            .insert(self.conn)
            .await
            .map_err(StorageError::from_write)?;
        Ok(())
    }

    async fn get_by_name(&self, name: &str) -> Result<Team, StorageError> {
        let team = Teams::find_by_id(name)
            .one(self.conn)
            .await?
            .ok_or(StorageError::NotFound)?;

        let members = Users::find()
            .filter(users::Column::TeamName.eq(&team.name))
            .order_by_asc(users::Column::CreatedAt)
            .order_by_asc(users::Column::UserId)
            .all(self.conn)
            .await?
            .into_iter()
            .map(|u| {
                TeamMember {
                    user_id:   u.user_id,
                    username:  u.username,
                    is_active: u.is_active,
                }
            })
            .collect();

        Ok(Team {
            name: team.name,
            members,
        })
    }

    async fn stats(&self) -> Result<TeamStats, StorageError> {
        let stmt = Statement::from_string(DbBackend::Postgres, TEAM_STATS_SQL);
        let rows = TeamStatsRow::find_by_statement(stmt).all(self.conn).await?;

        let by_team: Vec<TeamStatsEntry> = rows
            .into_iter()
            .map(|row| {
                TeamStatsEntry {
                    team_name:         row.team_name,
                    members_total:     row.members_total,
                    members_active:    row.members_active,
                    prs_created_total: row.prs_created_total,
                    prs_open:          row.prs_open,
                }
            })
            .collect();

        Ok(TeamStats {
            total: by_team.len() as i64,
            by_team,
        })
    }
}

const TEAM_STATS_SQL: &str = r#"
SELECT t.name AS team_name,
       (SELECT COUNT(*) FROM users u
         WHERE u.team_name = t.name)                                  AS members_total,
       (SELECT COUNT(*) FROM users u
         WHERE u.team_name = t.name AND u.is_active)                  AS members_active,
       (SELECT COUNT(*) FROM pull_requests p
         JOIN users a ON a.user_id = p.author_id
         WHERE a.team_name = t.name)                                  AS prs_created_total,
       (SELECT COUNT(*) FROM pull_requests p
         JOIN users a ON a.user_id = p.author_id
         WHERE a.team_name = t.name AND p.status = 'OPEN')            AS prs_open
FROM teams t
ORDER BY t.name
"#;

#[derive(Debug, FromQueryResult)]
struct TeamStatsRow {
    team_name:         String,
    members_total:     i64,
    members_active:    i64,
    prs_created_total: i64,
    prs_open:          i64,
}
