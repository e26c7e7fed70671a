//! AFK window domain models and parameters.
//!
//! An AFK window is one instance of a user declaring unavailability. Each
//! window moves through `Scheduled -> Active -> Expired`, with side exits to
//! `EndedEarly` (manual return) and `Deleted` (administrative soft-delete).
//! Neither side exit can be left again.

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::AppError,
    model::api::{AfkStatisticsDto, AfkWindowDto},
    util::parse::{format_duration, parse_u64_from_string},
};

/// A single AFK window with its cached activity state and audit markers.
#[derive(Debug, Clone, PartialEq)]
pub struct AfkWindow {
    /// Surrogate id of the window.
    pub id: i32,
    /// Discord ID of the owning user.
    pub user_id: u64,
    /// When the unavailability starts.
    pub start_at: DateTime<Utc>,
    /// When the unavailability ends. Always strictly after `start_at`.
    pub end_at: DateTime<Utc>,
    /// Free-text reason, if the user gave one.
    pub reason: Option<String>,
    /// Cached current-status flag, maintained by the activation sweep.
    pub is_active: bool,
    /// Soft-delete flag. Deleted windows stay in storage for audit.
    pub is_deleted: bool,
    /// Set once when the user returns before `end_at`; never cleared.
    pub ended_early_at: Option<DateTime<Utc>>,
    /// When the window was declared.
    pub created_at: DateTime<Utc>,
}

impl AfkWindow {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(AfkWindow)` - The converted domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Failed to convert the stored
    ///   owner Discord ID from String to u64
    pub fn from_entity(entity: entity::afk_window::Model) -> Result<Self, AppError> {
        let user_id = parse_u64_from_string(entity.user_id)?;

        Ok(Self {
            id: entity.id,
            user_id,
            start_at: entity.start_at,
            end_at: entity.end_at,
            reason: entity.reason,
            is_active: entity.is_active,
            is_deleted: entity.is_deleted,
            ended_early_at: entity.ended_early_at,
            created_at: entity.created_at,
        })
    }

    /// Whether the window is live: neither soft-deleted nor ended early.
    ///
    /// Only live windows participate in overlap checks and active/future
    /// listings.
    pub fn is_live(&self) -> bool {
        !self.is_deleted && self.ended_early_at.is_none()
    }

    /// Whether the window's interval contains the given instant (inclusive bounds).
    pub fn covers(&self, instant: DateTime<Utc>) -> bool {
        self.start_at <= instant && instant <= self.end_at
    }

    /// The window's lifecycle state at the given instant, derived from the
    /// stored fields rather than the cached `is_active` flag.
    pub fn status_at(&self, now: DateTime<Utc>) -> AfkStatus {
        if self.is_deleted {
            AfkStatus::Deleted
        } else if self.ended_early_at.is_some() {
            AfkStatus::EndedEarly
        } else if self.covers(now) {
            AfkStatus::Active
        } else if now < self.start_at {
            AfkStatus::Scheduled
        } else {
            AfkStatus::Expired
        }
    }

    /// Converts the domain model to a DTO for API responses.
    pub fn into_dto(self) -> AfkWindowDto {
        let status = self.status_at(Utc::now());

        AfkWindowDto {
            id: self.id,
            discord_id: self.user_id,
            start_at: self.start_at,
            end_at: self.end_at,
            reason: self.reason,
            is_active: self.is_active,
            ended_early_at: self.ended_early_at,
            created_at: self.created_at,
            status: status.as_str().to_string(),
        }
    }
}

/// Lifecycle state of an AFK window at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfkStatus {
    /// The window has not started yet.
    Scheduled,
    /// The current time lies inside the window.
    Active,
    /// The window's end has passed.
    Expired,
    /// The user returned before the window's end.
    EndedEarly,
    /// The window was soft-deleted.
    Deleted,
}

impl AfkStatus {
    /// Lowercase identifier used in API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Active => "active",
            Self::Expired => "expired",
            Self::EndedEarly => "ended_early",
            Self::Deleted => "deleted",
        }
    }
}

/// Parameters for declaring a new AFK window.
#[derive(Debug, Clone)]
pub struct DeclareAfkParam {
    /// Discord ID of the declaring user.
    pub discord_id: u64,
    /// Discord username, for the implicit user upsert.
    pub username: String,
    /// Guild display name, for the implicit user upsert.
    pub display_name: Option<String>,
    /// Current clan tag, for the implicit user upsert.
    pub clan_role_id: Option<String>,
    /// Window start.
    pub start_at: DateTime<Utc>,
    /// Window end. Must be strictly after `start_at`.
    pub end_at: DateTime<Utc>,
    /// Free-text reason.
    pub reason: Option<String>,
}

/// Parameters for the quick-AFK shortcut: start now, end at the end of a day.
#[derive(Debug, Clone)]
pub struct QuickAfkParam {
    /// Discord ID of the declaring user.
    pub discord_id: u64,
    /// Discord username, for the implicit user upsert.
    pub username: String,
    /// Guild display name, for the implicit user upsert.
    pub display_name: Option<String>,
    /// Current clan tag, for the implicit user upsert.
    pub clan_role_id: Option<String>,
    /// Number of days ahead the window should end; `None` means the end of
    /// the current day. Must be positive when given.
    pub days: Option<i64>,
    /// Free-text reason.
    pub reason: Option<String>,
}

/// Which of a user's windows an administrative soft-delete targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfkDeleteSelector {
    /// Every non-deleted window of the user.
    All,
    /// Only windows whose cached activity flag is set.
    ActiveOnly,
    /// A single window by id.
    Window(i32),
}

/// Optional filters for "who is AFK right now" listings.
#[derive(Debug, Clone, Default)]
pub struct AfkFilter {
    /// Restrict to users whose current clan tag matches.
    pub clan_role_id: Option<String>,
    /// Restrict to a single user.
    pub discord_id: Option<u64>,
}

/// Aggregate AFK statistics, optionally scoped to one clan.
#[derive(Debug, Clone, PartialEq)]
pub struct AfkStatistics {
    /// Number of non-deleted windows.
    pub total: u64,
    /// Number of distinct users with at least one non-deleted window.
    pub unique_users: u64,
    /// Number of windows active right now.
    pub active_now: u64,
    /// Number of live windows that have not started yet.
    pub scheduled_future: u64,
    /// Mean window duration, using the early-return instant as the end where
    /// one is set. `None` when there are no windows.
    pub mean_duration: Option<Duration>,
}

impl AfkStatistics {
    /// Converts the statistics to a DTO for API responses.
    pub fn into_dto(self) -> AfkStatisticsDto {
        AfkStatisticsDto {
            total: self.total,
            unique_users: self.unique_users,
            active_now: self.active_now,
            scheduled_future: self.scheduled_future,
            average_duration: self.mean_duration.map(format_duration),
        }
    }
}
