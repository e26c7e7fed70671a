//! User domain models and parameters.
//!
//! Provides domain models for community members identified by their Discord ID.
//! Users are created lazily on first reference and refreshed whenever their
//! name or clan tag changes upstream; they are never deleted.

use chrono::{DateTime, Utc};

use crate::{error::AppError, model::api::UserDto, util::parse::parse_u64_from_string};

/// Community member with Discord identity and current clan tag.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Discord ID of the user
    pub discord_id: u64,
    /// Discord username of the user.
    pub username: String,
    /// Guild-specific display name, if any.
    pub display_name: Option<String>,
    /// Role id of the clan the user currently belongs to, if any.
    pub clan_role_id: Option<String>,
    /// When the user row was first created.
    pub created_at: DateTime<Utc>,
    /// When the user row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Failed to convert stored user
    ///   Discord ID from String to u64
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let discord_id = parse_u64_from_string(entity.discord_id)?;

        Ok(Self {
            discord_id,
            username: entity.username,
            display_name: entity.display_name,
            clan_role_id: entity.clan_role_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            discord_id: self.discord_id,
            username: self.username,
            display_name: self.display_name,
            clan_role_id: self.clan_role_id,
        }
    }
}

/// Parameters for upserting a user on first reference or upstream change.
///
/// The upsert is authoritative: the username, display name, and clan tag in
/// the parameter replace whatever is stored. Callers are expected to pass the
/// freshest values they have (gateway events and roster snapshots carry all
/// three).
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    /// Discord ID of the user
    pub discord_id: u64,
    /// Discord username of the user.
    pub username: String,
    /// Guild-specific display name, if any.
    pub display_name: Option<String>,
    /// Role id of the clan the user currently belongs to, if any.
    pub clan_role_id: Option<String>,
}
