//! Pull Requests Entity
//!
//! Reviewer ids are stored denormalized as a Postgres `text[]`; the
//! assignment engine guarantees the roster never exceeds two entries.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "pull_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                 String,
    pub name:               String,
    pub author_id:          String,
    pub status:             PrStatus,
    pub assigned_reviewers: Vec<String>,
    pub created_at:         chrono::DateTime<chrono::Utc>,
    pub merged_at:          Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::UserId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Author,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Author.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Pull request lifecycle status enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "pr_status")]
pub enum PrStatus {
    /// Open for review; the roster may still change
    #[sea_orm(string_value = "OPEN")]
    #[serde(rename = "OPEN")]
    Open,
    /// Merged; roster and timestamps are frozen
    #[sea_orm(string_value = "MERGED")]
    #[serde(rename = "MERGED")]
    Merged,
}
