use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub discord_id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub clan_role_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::afk_window::Entity")]
    AfkWindow,
    #[sea_orm(has_many = "super::clan_membership::Entity")]
    ClanMembership,
}

impl Related<super::afk_window::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AfkWindow.def()
    }
}

impl Related<super::clan_membership::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClanMembership.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
