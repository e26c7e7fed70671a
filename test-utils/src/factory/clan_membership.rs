//! Clan membership factory for creating test membership interval entities.
//!
//! Provides factory methods for creating clan membership intervals with
//! sensible defaults. The default interval is open (active, no `left_at`).

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test clan membership intervals with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::clan_membership::ClanMembershipFactory;
///
/// let membership = ClanMembershipFactory::new(&db)
///     .user_id(&user.discord_id)
///     .clan_role_id("111222333")
///     .build()
///     .await?;
/// ```
pub struct ClanMembershipFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: String,
    clan_role_id: String,
    joined_at: DateTime<Utc>,
    left_at: Option<DateTime<Utc>>,
    is_active: bool,
}

impl<'a> ClanMembershipFactory<'a> {
    /// Creates a new ClanMembershipFactory with default values.
    ///
    /// Defaults:
    /// - user_id: `"1"`
    /// - clan_role_id: `"100"`
    /// - joined_at: now
    /// - left_at: `None`
    /// - is_active: `true`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `ClanMembershipFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            user_id: "1".to_string(),
            clan_role_id: "100".to_string(),
            joined_at: Utc::now(),
            left_at: None,
            is_active: true,
        }
    }

    /// Sets the owning user's Discord ID.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the clan role id the interval belongs to.
    pub fn clan_role_id(mut self, clan_role_id: impl Into<String>) -> Self {
        self.clan_role_id = clan_role_id.into();
        self
    }

    /// Sets the join instant.
    pub fn joined_at(mut self, joined_at: DateTime<Utc>) -> Self {
        self.joined_at = joined_at;
        self
    }

    /// Sets the leave instant (pairs with `is_active(false)` for closed intervals).
    pub fn left_at(mut self, left_at: Option<DateTime<Utc>>) -> Self {
        self.left_at = left_at;
        self
    }

    /// Sets the active flag.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the clan membership entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::clan_membership::Model)` - Created membership entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::clan_membership::Model, DbErr> {
        entity::clan_membership::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            clan_role_id: ActiveValue::Set(self.clan_role_id),
            joined_at: ActiveValue::Set(self.joined_at),
            left_at: ActiveValue::Set(self.left_at),
            is_active: ActiveValue::Set(self.is_active),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active membership interval for the given user and clan.
///
/// Shorthand for
/// `ClanMembershipFactory::new(db).user_id(user_id).clan_role_id(clan).build().await`.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Discord ID of the owning user
/// - `clan_role_id` - Clan role id
///
/// # Returns
/// - `Ok(entity::clan_membership::Model)` - Created membership entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_membership(
    db: &DatabaseConnection,
    user_id: impl Into<String>,
    clan_role_id: impl Into<String>,
) -> Result<entity::clan_membership::Model, DbErr> {
    ClanMembershipFactory::new(db)
        .user_id(user_id)
        .clan_role_id(clan_role_id)
        .build()
        .await
}
