//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

use crate::factory::{afk_window::AfkWindowFactory, clan_membership::ClanMembershipFactory, user};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// This function provides monotonically increasing values for use in
/// generating unique test identifiers across all factories.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user together with a default AFK window owned by that user.
///
/// Convenience method for tests that need a window and don't care about the
/// owning user's details.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((user, window))` - The created user and AFK window entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_afk_with_user(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::afk_window::Model), DbErr> {
    let user = user::create_user(db).await?;
    let window = AfkWindowFactory::new(db)
        .user_id(&user.discord_id)
        .build()
        .await?;

    Ok((user, window))
}

/// Creates a user together with an active clan membership interval.
///
/// # Arguments
/// - `db` - Database connection
/// - `clan_role_id` - Clan the membership interval belongs to
///
/// # Returns
/// - `Ok((user, membership))` - The created user and membership entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_membership_with_user(
    db: &DatabaseConnection,
    clan_role_id: impl Into<String>,
) -> Result<(entity::user::Model, entity::clan_membership::Model), DbErr> {
    let user = user::create_user(db).await?;
    let membership = ClanMembershipFactory::new(db)
        .user_id(&user.discord_id)
        .clan_role_id(clan_role_id)
        .build()
        .await?;

    Ok((user, membership))
}
