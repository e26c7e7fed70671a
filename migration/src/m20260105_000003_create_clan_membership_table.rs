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
                    .table(ClanMembership::Table)
                    .if_not_exists()
                    .col(pk_auto(ClanMembership::Id))
                    .col(string(ClanMembership::UserId))
                    .col(string(ClanMembership::ClanRoleId))
                    .col(timestamp(ClanMembership::JoinedAt))
                    .col(timestamp_null(ClanMembership::LeftAt))
                    .col(boolean(ClanMembership::IsActive))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clan_membership_user_id")
                            .from(ClanMembership::Table, ClanMembership::UserId)
                            .to(User::Table, User::DiscordId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_clan_membership_clan_active")
                            .col(ClanMembership::ClanRoleId)
                            .col(ClanMembership::IsActive),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClanMembership::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ClanMembership {
    Table,
    Id,
    UserId,
    ClanRoleId,
    JoinedAt,
    LeftAt,
    IsActive,
}
