use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_teams_table::Teams;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(string(Users::UserId).not_null().primary_key())
                    .col(string(Users::Username).not_null())
                    .col(string_null(Users::TeamName))
                    .col(boolean(Users::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(Users::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Users::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_team_name")
                            .from(Users::Table, Users::TeamName)
                            .to(Teams::Table, Teams::Name)
                            .on_update(ForeignKeyAction::NoAction)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Team membership lookups drive team reads and stats
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_team_name")
                    .table(Users::Table)
                    .col(Users::TeamName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    UserId,
    Username,
    TeamName,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
