//! User factory for creating test user entities.
//!
//! This module provides factory methods for creating user entities with sensible
//! defaults, reducing boilerplate in tests. The factory supports customization
//! through a builder pattern.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// Provides a builder pattern for creating user entities with default values
/// that can be overridden as needed for specific test scenarios.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .discord_id("123456789")
///     .username("CustomUser")
///     .clan_role_id(Some("111".to_string()))
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    username: String,
    display_name: Option<String>,
    clan_role_id: Option<String>,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - discord_id: auto-incremented numeric string
    /// - username: `"user{id}"`
    /// - display_name: `"User {id}"`
    /// - clan_role_id: `None`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `UserFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            discord_id: id.to_string(),
            username: format!("user{}", id),
            display_name: Some(format!("User {}", id)),
            clan_role_id: None,
        }
    }

    /// Sets the Discord ID for the user.
    ///
    /// # Arguments
    /// - `discord_id` - Discord user ID as string
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = discord_id.into();
        self
    }

    /// Sets the username for the user.
    ///
    /// # Arguments
    /// - `username` - Discord username
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the display name for the user.
    ///
    /// # Arguments
    /// - `display_name` - Optional guild display name
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = display_name;
        self
    }

    /// Sets the current clan role tag for the user.
    ///
    /// # Arguments
    /// - `clan_role_id` - Optional clan role id string
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn clan_role_id(mut self, clan_role_id: Option<String>) -> Self {
        self.clan_role_id = clan_role_id;
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            username: ActiveValue::Set(self.username),
            display_name: ActiveValue::Set(self.display_name),
            clan_role_id: ActiveValue::Set(self.clan_role_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(entity::user::Model)` - Created user entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a user with a specific Discord ID.
///
/// Shorthand for `UserFactory::new(db).discord_id(discord_id).build().await`.
///
/// # Arguments
/// - `db` - Database connection
/// - `discord_id` - Discord ID as string or number
///
/// # Returns
/// - `Ok(entity::user::Model)` - Created user entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_user_with_id(
    db: &DatabaseConnection,
    discord_id: impl Into<String>,
) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).discord_id(discord_id).build().await
}
