//! AFK window factory for creating test AFK window entities.
//!
//! Provides factory methods for creating AFK window entities with sensible
//! defaults. The default window is currently in progress (started an hour ago,
//! ends in an hour) and live (not deleted, not ended early).

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test AFK windows with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::afk_window::AfkWindowFactory;
///
/// let window = AfkWindowFactory::new(&db)
///     .user_id(&user.discord_id)
///     .start_at(Utc::now() + Duration::hours(1))
///     .end_at(Utc::now() + Duration::hours(3))
///     .is_active(false)
///     .build()
///     .await?;
/// ```
pub struct AfkWindowFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: String,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    reason: Option<String>,
    is_active: bool,
    is_deleted: bool,
    ended_early_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl<'a> AfkWindowFactory<'a> {
    /// Creates a new AfkWindowFactory with default values.
    ///
    /// Defaults:
    /// - user_id: `"1"` (override with a real user's discord_id when the
    ///   user table is part of the test schema)
    /// - start_at: one hour in the past
    /// - end_at: one hour in the future
    /// - reason: `"vacation"`
    /// - is_active: `true`
    /// - is_deleted: `false`
    /// - ended_early_at: `None`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `AfkWindowFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let now = Utc::now();
        Self {
            db,
            user_id: "1".to_string(),
            start_at: now - Duration::hours(1),
            end_at: now + Duration::hours(1),
            reason: Some("vacation".to_string()),
            is_active: true,
            is_deleted: false,
            ended_early_at: None,
            created_at: now,
        }
    }

    /// Sets the owning user's Discord ID.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the window start instant.
    pub fn start_at(mut self, start_at: DateTime<Utc>) -> Self {
        self.start_at = start_at;
        self
    }

    /// Sets the window end instant.
    pub fn end_at(mut self, end_at: DateTime<Utc>) -> Self {
        self.end_at = end_at;
        self
    }

    /// Sets the AFK reason text.
    pub fn reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    /// Sets the cached activity flag.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets the soft-delete flag.
    pub fn is_deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }

    /// Sets the early-termination marker.
    pub fn ended_early_at(mut self, ended_early_at: Option<DateTime<Utc>>) -> Self {
        self.ended_early_at = ended_early_at;
        self
    }

    /// Sets the creation instant (useful for deterministic history ordering).
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the AFK window entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::afk_window::Model)` - Created AFK window entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::afk_window::Model, DbErr> {
        entity::afk_window::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            start_at: ActiveValue::Set(self.start_at),
            end_at: ActiveValue::Set(self.end_at),
            reason: ActiveValue::Set(self.reason),
            is_active: ActiveValue::Set(self.is_active),
            is_deleted: ActiveValue::Set(self.is_deleted),
            ended_early_at: ActiveValue::Set(self.ended_early_at),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an AFK window for the given user with default values.
///
/// Shorthand for `AfkWindowFactory::new(db).user_id(user_id).build().await`.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Discord ID of the owning user
///
/// # Returns
/// - `Ok(entity::afk_window::Model)` - Created AFK window entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_afk_window(
    db: &DatabaseConnection,
    user_id: impl Into<String>,
) -> Result<entity::afk_window::Model, DbErr> {
    AfkWindowFactory::new(db).user_id(user_id).build().await
}
