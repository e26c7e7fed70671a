//! Clan membership domain models and parameters.
//!
//! A membership interval is one contiguous span of a user's membership in one
//! clan. A member who leaves and rejoins produces two distinct intervals, not
//! a mutated single row; that is what makes the join/leave audit trail
//! meaningful.

use chrono::{DateTime, Utc};

use crate::{error::AppError, model::api::ClanMembershipDto, util::parse::parse_u64_from_string};

/// One contiguous span of a user's membership in a clan.
#[derive(Debug, Clone, PartialEq)]
pub struct ClanMembership {
    /// Surrogate id of the interval.
    pub id: i32,
    /// Discord ID of the member.
    pub user_id: u64,
    /// Role id of the clan.
    pub clan_role_id: String,
    /// When the interval opened.
    pub joined_at: DateTime<Utc>,
    /// When the interval closed; set exactly when `is_active` went false.
    pub left_at: Option<DateTime<Utc>>,
    /// Whether this is the user's current interval for the clan. At most one
    /// interval per (user, clan) pair may be active at a time.
    pub is_active: bool,
}

impl ClanMembership {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(ClanMembership)` - The converted domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Failed to convert the stored
    ///   member Discord ID from String to u64
    pub fn from_entity(entity: entity::clan_membership::Model) -> Result<Self, AppError> {
        let user_id = parse_u64_from_string(entity.user_id)?;

        Ok(Self {
            id: entity.id,
            user_id,
            clan_role_id: entity.clan_role_id,
            joined_at: entity.joined_at,
            left_at: entity.left_at,
            is_active: entity.is_active,
        })
    }

    /// Converts the domain model to a DTO for API responses.
    pub fn into_dto(self) -> ClanMembershipDto {
        ClanMembershipDto {
            id: self.id,
            discord_id: self.user_id,
            clan_role_id: self.clan_role_id,
            joined_at: self.joined_at,
            left_at: self.left_at,
            is_active: self.is_active,
        }
    }
}

/// One member as observed in an external roster snapshot.
///
/// The id drives the reconciliation diff; the names feed the implicit user
/// upsert for members seen for the first time.
#[derive(Debug, Clone)]
pub struct RosterMember {
    /// Discord ID of the member.
    pub discord_id: u64,
    /// Discord username of the member.
    pub username: String,
    /// Guild display name, if any.
    pub display_name: Option<String>,
}

/// Result of one reconciliation pass: who joined and who left.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterDiff {
    /// Discord IDs for which a new interval was opened.
    pub joined: Vec<u64>,
    /// Discord IDs whose active interval was closed.
    pub left: Vec<u64>,
}

impl RosterDiff {
    /// True when the pass changed nothing.
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty() && self.left.is_empty()
    }
}

/// Parameters for explicitly adding a member to a clan.
#[derive(Debug, Clone)]
pub struct AddMemberParam {
    /// Discord ID of the user to add.
    pub discord_id: u64,
    /// Discord username, for the implicit user upsert.
    pub username: String,
    /// Guild display name, for the implicit user upsert.
    pub display_name: Option<String>,
    /// Role id of the clan to add the user to.
    pub clan_role_id: String,
}

/// Filters for membership history queries.
///
/// When a date range is given, intervals qualify if their `joined_at` or
/// `left_at` falls inside it.
#[derive(Debug, Clone, Default)]
pub struct MembershipHistoryFilter {
    /// Restrict to one user.
    pub discord_id: Option<u64>,
    /// Restrict to one clan.
    pub clan_role_id: Option<String>,
    /// Lower bound of the date range.
    pub since: Option<DateTime<Utc>>,
    /// Upper bound of the date range.
    pub until: Option<DateTime<Utc>>,
    /// Include closed intervals. When false only active intervals are returned.
    pub include_inactive: bool,
}
