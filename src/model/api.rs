//! Serde DTOs for the REST API.
//!
//! These are the wire shapes returned to and accepted from API clients. Domain
//! models convert into them via `into_dto`; request DTOs are converted into
//! operation parameters in the controllers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error payload returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    /// Human-readable error message.
    pub error: String,
}

/// A community member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    /// Discord ID of the user.
    pub discord_id: u64,
    /// Discord username.
    pub username: String,
    /// Guild display name, if any.
    pub display_name: Option<String>,
    /// Current clan role id, if any.
    pub clan_role_id: Option<String>,
}

/// A single AFK window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AfkWindowDto {
    /// Surrogate id of the window.
    pub id: i32,
    /// Discord ID of the owning user.
    pub discord_id: u64,
    /// Window start.
    pub start_at: DateTime<Utc>,
    /// Window end.
    pub end_at: DateTime<Utc>,
    /// Free-text reason, if any.
    pub reason: Option<String>,
    /// Cached activity flag.
    pub is_active: bool,
    /// Early-return instant, if the user came back before the end.
    pub ended_early_at: Option<DateTime<Utc>>,
    /// When the window was declared.
    pub created_at: DateTime<Utc>,
    /// Lifecycle state at response time: scheduled, active, expired,
    /// ended_early or deleted.
    pub status: String,
}

/// An active AFK listing entry: the window together with its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveAfkDto {
    /// The user who is away.
    pub user: UserDto,
    /// The window covering the current instant.
    pub window: AfkWindowDto,
}

/// Request body for declaring an AFK window from compact date/time strings.
///
/// Dates use `DDMM` (separators `.` and `/` allowed), times use `HHMM`
/// (separator `:` allowed), exactly as the slash-command layer collects them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclareAfkDto {
    /// Discord ID of the declaring user.
    pub discord_id: u64,
    /// Discord username.
    pub username: String,
    /// Guild display name, if known.
    pub display_name: Option<String>,
    /// Current clan role id, if known.
    pub clan_role_id: Option<String>,
    /// Start date, e.g. `"0512"` or `"05.12"`.
    pub start_date: String,
    /// Start time, e.g. `"1830"` or `"18:30"`.
    pub start_time: String,
    /// End date.
    pub end_date: String,
    /// End time.
    pub end_time: String,
    /// Free-text reason.
    pub reason: Option<String>,
}

/// Request body for the quick-AFK shortcut.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickAfkDto {
    /// Discord ID of the declaring user.
    pub discord_id: u64,
    /// Discord username.
    pub username: String,
    /// Guild display name, if known.
    pub display_name: Option<String>,
    /// Current clan role id, if known.
    pub clan_role_id: Option<String>,
    /// Days ahead the window should end; omitted means end of today.
    pub days: Option<i64>,
    /// Free-text reason.
    pub reason: Option<String>,
}

/// Request body for extending a window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendAfkDto {
    /// Id of the window to extend.
    pub window_id: i32,
    /// Hours to add to the window's end. Must be positive.
    pub hours: i64,
}

/// Count of rows affected by a mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffectedDto {
    /// Number of rows changed.
    pub affected: u64,
}

/// Answer to the "was this user AFK at instant T" point query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAfkDto {
    /// Whether a live window covers the queried instant.
    pub afk: bool,
    /// The covering window, when one exists.
    pub window: Option<AfkWindowDto>,
}

/// Aggregate AFK statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AfkStatisticsDto {
    /// Number of non-deleted windows.
    pub total: u64,
    /// Number of distinct users with at least one non-deleted window.
    pub unique_users: u64,
    /// Number of windows active right now.
    pub active_now: u64,
    /// Number of live windows that have not started yet.
    pub scheduled_future: u64,
    /// Human-readable mean window duration, if any windows exist.
    pub average_duration: Option<String>,
}

/// A clan membership interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClanMembershipDto {
    /// Surrogate id of the interval.
    pub id: i32,
    /// Discord ID of the member.
    pub discord_id: u64,
    /// Role id of the clan.
    pub clan_role_id: String,
    /// When the interval opened.
    pub joined_at: DateTime<Utc>,
    /// When the interval closed, if it has.
    pub left_at: Option<DateTime<Utc>>,
    /// Whether this is the user's current interval for the clan.
    pub is_active: bool,
}

/// A clan member listing entry: the user together with their active interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClanMemberDto {
    /// The member.
    pub user: UserDto,
    /// The member's active interval.
    pub membership: ClanMembershipDto,
}

/// Request body for explicitly adding a clan member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMemberDto {
    /// Discord ID of the user to add.
    pub discord_id: u64,
    /// Discord username.
    pub username: String,
    /// Guild display name, if known.
    pub display_name: Option<String>,
}
