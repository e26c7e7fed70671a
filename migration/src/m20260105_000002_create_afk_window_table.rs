use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AfkWindow::Table)
                    .if_not_exists()
                    .col(pk_auto(AfkWindow::Id))
                    .col(string(AfkWindow::UserId))
                    .col(timestamp(AfkWindow::StartAt))
                    .col(timestamp(AfkWindow::EndAt))
                    .col(text_null(AfkWindow::Reason))
                    .col(boolean(AfkWindow::IsActive))
                    .col(boolean(AfkWindow::IsDeleted).default(false))
                    .col(timestamp_null(AfkWindow::EndedEarlyAt))
                    .col(
                        timestamp(AfkWindow::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_afk_window_user_id")
                            .from(AfkWindow::Table, AfkWindow::UserId)
                            .to(User::Table, User::DiscordId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_afk_window_user_active")
                            .col(AfkWindow::UserId)
                            .col(AfkWindow::IsActive),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AfkWindow::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AfkWindow {
    Table,
    Id,
    UserId,
    StartAt,
    EndAt,
    Reason,
    IsActive,
    IsDeleted,
    EndedEarlyAt,
    CreatedAt,
}
