//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! Users are created lazily on first reference ("get or create") and refreshed whenever
//! their name or clan tag changes upstream; rows are never deleted. Entity models are
//! converted to domain models at the repository boundary.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ConnectionTrait, EntityTrait};

use crate::{
    error::AppError,
    model::user::{UpsertUserParam, User},
};

/// Repository providing database operations for user management.
///
/// This struct holds a reference to a database connection or transaction and
/// provides methods for creating, reading and updating user records.
pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to a database connection or open transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Upserts a user from parameter model.
    ///
    /// Inserts a new user or refreshes an existing user's username, display name
    /// and clan tag. The parameter values are authoritative: callers pass the
    /// freshest identity they observed upstream.
    ///
    /// # Arguments
    /// - `param` - User upsert parameters
    ///
    /// # Returns
    /// - `Ok(User)` - The created or updated user
    /// - `Err(AppError)` - Database error during insert or update
    pub async fn upsert(&self, param: UpsertUserParam) -> Result<User, AppError> {
        let now = Utc::now();

        let entity = entity::prelude::User::insert(entity::user::ActiveModel {
            discord_id: ActiveValue::Set(param.discord_id.to_string()),
            username: ActiveValue::Set(param.username),
            display_name: ActiveValue::Set(param.display_name),
            clan_role_id: ActiveValue::Set(param.clan_role_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        .on_conflict(
            OnConflict::column(entity::user::Column::DiscordId)
                .update_columns([
                    entity::user::Column::Username,
                    entity::user::Column::DisplayName,
                    entity::user::Column::ClanRoleId,
                    entity::user::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by their Discord ID.
    ///
    /// # Arguments
    /// - `discord_id` - Discord user ID as u64
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found with full data
    /// - `Ok(None)` - No user found with that Discord ID
    /// - `Err(AppError)` - Database error during query
    pub async fn find_by_discord_id(&self, discord_id: u64) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?;

        entity.map(User::from_entity).transpose()
    }
}
