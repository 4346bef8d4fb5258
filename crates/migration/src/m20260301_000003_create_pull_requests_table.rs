use sea_orm_migration::{prelude::*, schema::*, sea_query::extension::postgres::Type};

use crate::m20260301_000002_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create enum type first
        manager
            .create_type(
                Type::create()
                    .as_enum(PrStatus::Table)
                    .values(vec![PrStatus::Open, PrStatus::Merged])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PullRequests::Table)
                    .if_not_exists()
                    .col(string(PullRequests::Id).not_null().primary_key())
                    .col(string(PullRequests::Name).not_null())
                    .col(string(PullRequests::AuthorId).not_null())
                    .col(enumeration(
                        PullRequests::Status,
                        PrStatus::Table,
                        vec![PrStatus::Open, PrStatus::Merged],
                    ))
                    .col(
                        ColumnDef::new(PullRequests::AssignedReviewers)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(PullRequests::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(PullRequests::MergedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pull_requests_author_id")
                            .from(PullRequests::Table, PullRequests::AuthorId)
                            .to(Users::Table, Users::UserId)
                            .on_update(ForeignKeyAction::NoAction)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pull_requests_status")
                    .table(PullRequests::Table)
                    .col(PullRequests::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pull_requests_author_id")
                    .table(PullRequests::Table)
                    .col(PullRequests::AuthorId)
                    .to_owned(),
            )
            .await?;

        // GIN index for reviewer containment queries (sea-query has no
        // builder support for USING GIN)
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_pull_requests_assigned_reviewers \
                 ON pull_requests USING GIN (assigned_reviewers)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PullRequests::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PrStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PullRequests {
    Table,
    Id,
    Name,
    AuthorId,
    Status,
    AssignedReviewers,
    CreatedAt,
    MergedAt,
}

#[derive(DeriveIden)]
pub enum PrStatus {
    #[sea_orm(iden = "pr_status")]
    Table,
    #[sea_orm(iden = "OPEN")]
    Open,
    #[sea_orm(iden = "MERGED")]
    Merged,
}
