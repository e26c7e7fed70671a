//! AFK window repository for database operations.
//!
//! This module provides the `AfkWindowRepository` for managing AFK window rows:
//! creation, the overlap probe backing declaration, the activation sweep updates,
//! early returns, extensions, hard and soft deletes, and the time-windowed
//! queries (active, future, history, statistics, point lookups).
//!
//! All methods return domain models at the repository boundary, converting SeaORM
//! entity models internally to prevent database-specific structures from leaking
//! into service and controller layers.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    error::{afk::AfkError, internal::InternalError, AppError},
    model::{
        afk::{AfkFilter, AfkStatistics, AfkWindow},
        user::User,
    },
};

/// Repository for AFK window database operations.
pub struct AfkWindowRepository<'a, C> {
    /// Database connection or open transaction for executing queries.
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AfkWindowRepository<'a, C> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to a database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new AFK window row.
    ///
    /// Performs no validation; the service layer has already checked the range
    /// and probed for overlap inside the same transaction.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the owning user
    /// - `start_at` - Window start
    /// - `end_at` - Window end
    /// - `reason` - Free-text reason
    /// - `is_active` - Initial activity flag (true iff the window covers now)
    ///
    /// # Returns
    /// - `Ok(AfkWindow)` - The created window
    /// - `Err(AppError)` - Database error during insert
    pub async fn insert(
        &self,
        user_id: u64,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        reason: Option<String>,
        is_active: bool,
    ) -> Result<AfkWindow, AppError> {
        let entity = entity::prelude::AfkWindow::insert(entity::afk_window::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            start_at: ActiveValue::Set(start_at),
            end_at: ActiveValue::Set(end_at),
            reason: ActiveValue::Set(reason),
            is_active: ActiveValue::Set(is_active),
            is_deleted: ActiveValue::Set(false),
            ended_early_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await?;

        AfkWindow::from_entity(entity)
    }

    /// Finds a window by id, including soft-deleted rows.
    ///
    /// # Arguments
    /// - `id` - Surrogate id of the window
    ///
    /// # Returns
    /// - `Ok(Some(AfkWindow))` - Window found
    /// - `Ok(None)` - No window with that id
    /// - `Err(AppError)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<AfkWindow>, AppError> {
        let entity = entity::prelude::AfkWindow::find_by_id(id).one(self.db).await?;

        entity.map(AfkWindow::from_entity).transpose()
    }

    /// Finds a live window of the user whose interval intersects `[start, end]`.
    ///
    /// Boundaries are inclusive: touching endpoints count as overlap. Soft-deleted
    /// and ended-early windows never conflict. Returns the earliest-starting
    /// conflict so the caller can report it.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    /// - `start` - Start of the candidate interval
    /// - `end` - End of the candidate interval
    ///
    /// # Returns
    /// - `Ok(Some(AfkWindow))` - A live window intersects the interval
    /// - `Ok(None)` - No conflict
    /// - `Err(AppError)` - Database error during query
    pub async fn find_live_overlapping(
        &self,
        user_id: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<AfkWindow>, AppError> {
        let entity = entity::prelude::AfkWindow::find()
            .filter(entity::afk_window::Column::UserId.eq(user_id.to_string()))
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .filter(entity::afk_window::Column::EndedEarlyAt.is_null())
            .filter(entity::afk_window::Column::StartAt.lte(end))
            .filter(entity::afk_window::Column::EndAt.gte(start))
            .order_by_asc(entity::afk_window::Column::StartAt)
            .one(self.db)
            .await?;

        entity.map(AfkWindow::from_entity).transpose()
    }

    /// Recomputes the cached `is_active` flag for every non-deleted window.
    ///
    /// Three batched updates, each touching only rows whose cached value is
    /// wrong at `now`:
    /// 1. ended-early rows still flagged active are forced inactive;
    /// 2. rows flagged active outside their interval are switched off;
    /// 3. rows not flagged active inside their interval are switched on.
    ///
    /// Callers run this inside one transaction so a crash mid-sweep cannot
    /// leave the table updated against two different reference instants.
    ///
    /// # Arguments
    /// - `now` - Reference instant for the sweep
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows whose flag changed
    /// - `Err(AppError)` - Database error during the updates
    pub async fn refresh_activation(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut changed = 0;

        let ended = entity::prelude::AfkWindow::update_many()
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .filter(entity::afk_window::Column::IsActive.eq(true))
            .filter(entity::afk_window::Column::EndedEarlyAt.is_not_null())
            .col_expr(entity::afk_window::Column::IsActive, Expr::value(false))
            .exec(self.db)
            .await?;
        changed += ended.rows_affected;

        let outside = entity::prelude::AfkWindow::update_many()
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .filter(entity::afk_window::Column::IsActive.eq(true))
            .filter(entity::afk_window::Column::EndedEarlyAt.is_null())
            .filter(
                Condition::any()
                    .add(entity::afk_window::Column::StartAt.gt(now))
                    .add(entity::afk_window::Column::EndAt.lt(now)),
            )
            .col_expr(entity::afk_window::Column::IsActive, Expr::value(false))
            .exec(self.db)
            .await?;
        changed += outside.rows_affected;

        let inside = entity::prelude::AfkWindow::update_many()
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .filter(entity::afk_window::Column::IsActive.eq(false))
            .filter(entity::afk_window::Column::EndedEarlyAt.is_null())
            .filter(entity::afk_window::Column::StartAt.lte(now))
            .filter(entity::afk_window::Column::EndAt.gte(now))
            .col_expr(entity::afk_window::Column::IsActive, Expr::value(true))
            .exec(self.db)
            .await?;
        changed += inside.rows_affected;

        Ok(changed)
    }

    /// Marks all of a user's live windows as ended early.
    ///
    /// Sets `ended_early_at = now` and clears the activity flag. Windows that
    /// are soft-deleted or already ended are untouched, so a second call is a
    /// no-op returning 0.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    /// - `now` - Early-return instant to stamp
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of windows ended
    /// - `Err(AppError)` - Database error during the update
    pub async fn end_live(&self, user_id: u64, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = entity::prelude::AfkWindow::update_many()
            .filter(entity::afk_window::Column::UserId.eq(user_id.to_string()))
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .filter(entity::afk_window::Column::EndedEarlyAt.is_null())
            .col_expr(entity::afk_window::Column::IsActive, Expr::value(false))
            .col_expr(entity::afk_window::Column::EndedEarlyAt, Expr::value(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Marks a single window as ended early.
    ///
    /// No-op returning 0 when the window is soft-deleted or already ended.
    ///
    /// # Arguments
    /// - `id` - Surrogate id of the window
    /// - `now` - Early-return instant to stamp
    ///
    /// # Returns
    /// - `Ok(u64)` - 1 when the window was ended, 0 otherwise
    /// - `Err(AppError)` - Database error during the update
    pub async fn end_window(&self, id: i32, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = entity::prelude::AfkWindow::update_many()
            .filter(entity::afk_window::Column::Id.eq(id))
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .filter(entity::afk_window::Column::EndedEarlyAt.is_null())
            .col_expr(entity::afk_window::Column::IsActive, Expr::value(false))
            .col_expr(entity::afk_window::Column::EndedEarlyAt, Expr::value(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Replaces a window's end instant.
    ///
    /// # Arguments
    /// - `id` - Surrogate id of the window
    /// - `end_at` - New end instant
    ///
    /// # Returns
    /// - `Ok(AfkWindow)` - The updated window
    /// - `Err(AppError::AfkErr(NotFound))` - No window with that id
    /// - `Err(AppError)` - Database error during the update
    pub async fn set_end(&self, id: i32, end_at: DateTime<Utc>) -> Result<AfkWindow, AppError> {
        let Some(existing) = entity::prelude::AfkWindow::find_by_id(id).one(self.db).await? else {
            return Err(AfkError::NotFound(id).into());
        };

        let mut active: entity::afk_window::ActiveModel = existing.into();
        active.end_at = ActiveValue::Set(end_at);
        let updated = active.update(self.db).await?;

        AfkWindow::from_entity(updated)
    }

    /// Hard-deletes a window row.
    ///
    /// Used only for withdrawing strictly-future windows, which carry no audit
    /// value before taking effect.
    ///
    /// # Arguments
    /// - `id` - Surrogate id of the window
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows removed (0 or 1)
    /// - `Err(AppError)` - Database error during deletion
    pub async fn delete_by_id(&self, id: i32) -> Result<u64, AppError> {
        let result = entity::prelude::AfkWindow::delete_many()
            .filter(entity::afk_window::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Soft-deletes a user's windows.
    ///
    /// Marks matching rows deleted and inactive, stamping `ended_early_at` on
    /// rows that never got one. Deleted rows stay in storage for audit but are
    /// excluded from overlap checks, listings and statistics.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    /// - `only_active` - Restrict to rows whose cached activity flag is set
    /// - `now` - Instant to stamp on rows without an early-return marker
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of windows soft-deleted
    /// - `Err(AppError)` - Database error during the updates
    pub async fn soft_delete_by_user(
        &self,
        user_id: u64,
        only_active: bool,
        now: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let mut stamp = entity::prelude::AfkWindow::update_many()
            .filter(entity::afk_window::Column::UserId.eq(user_id.to_string()))
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .filter(entity::afk_window::Column::EndedEarlyAt.is_null());
        if only_active {
            stamp = stamp.filter(entity::afk_window::Column::IsActive.eq(true));
        }
        stamp
            .col_expr(entity::afk_window::Column::EndedEarlyAt, Expr::value(now))
            .exec(self.db)
            .await?;

        let mut flags = entity::prelude::AfkWindow::update_many()
            .filter(entity::afk_window::Column::UserId.eq(user_id.to_string()))
            .filter(entity::afk_window::Column::IsDeleted.eq(false));
        if only_active {
            flags = flags.filter(entity::afk_window::Column::IsActive.eq(true));
        }
        let result = flags
            .col_expr(entity::afk_window::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::afk_window::Column::IsActive, Expr::value(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Soft-deletes a single window.
    ///
    /// # Arguments
    /// - `id` - Surrogate id of the window
    /// - `now` - Instant to stamp if no early-return marker is set
    ///
    /// # Returns
    /// - `Ok(u64)` - 1 when the window was soft-deleted, 0 if it already was
    /// - `Err(AppError)` - Database error during the updates
    pub async fn soft_delete_by_id(&self, id: i32, now: DateTime<Utc>) -> Result<u64, AppError> {
        entity::prelude::AfkWindow::update_many()
            .filter(entity::afk_window::Column::Id.eq(id))
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .filter(entity::afk_window::Column::EndedEarlyAt.is_null())
            .col_expr(entity::afk_window::Column::EndedEarlyAt, Expr::value(now))
            .exec(self.db)
            .await?;

        let result = entity::prelude::AfkWindow::update_many()
            .filter(entity::afk_window::Column::Id.eq(id))
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .col_expr(entity::afk_window::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::afk_window::Column::IsActive, Expr::value(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Lists windows active at `now`, joined with their owners.
    ///
    /// A window qualifies when its cached flag is set, its interval covers
    /// `now`, and its early-return marker is absent or still ahead of `now`.
    /// The time predicates double-guard against sweep latency: a row the sweep
    /// has not caught up with yet can be hidden by them but never resurrected.
    ///
    /// # Arguments
    /// - `filter` - Optional clan and user restrictions
    /// - `now` - Reference instant
    ///
    /// # Returns
    /// - `Ok(Vec<(User, AfkWindow)>)` - Active windows with their owners, by start
    /// - `Err(AppError)` - Database error during the query
    pub async fn active_now(
        &self,
        filter: &AfkFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<(User, AfkWindow)>, AppError> {
        let mut query = entity::prelude::AfkWindow::find()
            .find_also_related(entity::prelude::User)
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .filter(entity::afk_window::Column::IsActive.eq(true))
            .filter(entity::afk_window::Column::StartAt.lte(now))
            .filter(entity::afk_window::Column::EndAt.gte(now))
            .filter(
                Condition::any()
                    .add(entity::afk_window::Column::EndedEarlyAt.is_null())
                    .add(entity::afk_window::Column::EndedEarlyAt.gte(now)),
            );

        if let Some(clan_role_id) = &filter.clan_role_id {
            query = query.filter(entity::user::Column::ClanRoleId.eq(clan_role_id));
        }
        if let Some(discord_id) = filter.discord_id {
            query = query.filter(entity::afk_window::Column::UserId.eq(discord_id.to_string()));
        }

        let rows = query
            .order_by_asc(entity::afk_window::Column::StartAt)
            .all(self.db)
            .await?;

        rows.into_iter().map(pair_from_entities).collect()
    }

    /// Lists a user's live windows that are active or still ahead.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    /// - `now` - Reference instant
    ///
    /// # Returns
    /// - `Ok(Vec<AfkWindow>)` - Live windows ending at or after `now`, by start
    /// - `Err(AppError)` - Database error during the query
    pub async fn active_and_future_for_user(
        &self,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Vec<AfkWindow>, AppError> {
        let rows = entity::prelude::AfkWindow::find()
            .filter(entity::afk_window::Column::UserId.eq(user_id.to_string()))
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .filter(entity::afk_window::Column::EndedEarlyAt.is_null())
            .filter(entity::afk_window::Column::EndAt.gte(now))
            .order_by_asc(entity::afk_window::Column::StartAt)
            .all(self.db)
            .await?;

        rows.into_iter().map(AfkWindow::from_entity).collect()
    }

    /// Lists live active-or-future windows of all users in a clan.
    ///
    /// # Arguments
    /// - `clan_role_id` - Clan role id to restrict to
    /// - `now` - Reference instant
    ///
    /// # Returns
    /// - `Ok(Vec<(User, AfkWindow)>)` - Matching windows with their owners, by start
    /// - `Err(AppError)` - Database error during the query
    pub async fn active_and_future_for_clan(
        &self,
        clan_role_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<(User, AfkWindow)>, AppError> {
        let rows = entity::prelude::AfkWindow::find()
            .find_also_related(entity::prelude::User)
            .filter(entity::user::Column::ClanRoleId.eq(clan_role_id))
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .filter(entity::afk_window::Column::EndedEarlyAt.is_null())
            .filter(entity::afk_window::Column::EndAt.gte(now))
            .order_by_asc(entity::afk_window::Column::StartAt)
            .all(self.db)
            .await?;

        rows.into_iter().map(pair_from_entities).collect()
    }

    /// Gets a user's most recent windows, newest first.
    ///
    /// This is the audit view: soft-deleted windows are included.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    /// - `limit` - Maximum number of windows to return
    ///
    /// # Returns
    /// - `Ok(Vec<AfkWindow>)` - Windows ordered by creation, newest first
    /// - `Err(AppError)` - Database error during the query
    pub async fn history_for_user(
        &self,
        user_id: u64,
        limit: u64,
    ) -> Result<Vec<AfkWindow>, AppError> {
        let rows = entity::prelude::AfkWindow::find()
            .filter(entity::afk_window::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(entity::afk_window::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?;

        rows.into_iter().map(AfkWindow::from_entity).collect()
    }

    /// Finds the live window of a user covering the given instant, if any.
    ///
    /// Point query for the exporter: "was this user AFK at instant T". A window
    /// qualifies when its interval contains the instant and it was not deleted
    /// or already ended at that point.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    /// - `instant` - The instant to probe
    ///
    /// # Returns
    /// - `Ok(Some(AfkWindow))` - A window covered the instant
    /// - `Ok(None)` - The user was not AFK at that instant
    /// - `Err(AppError)` - Database error during the query
    pub async fn covering_window(
        &self,
        user_id: u64,
        instant: DateTime<Utc>,
    ) -> Result<Option<AfkWindow>, AppError> {
        let entity = entity::prelude::AfkWindow::find()
            .filter(entity::afk_window::Column::UserId.eq(user_id.to_string()))
            .filter(entity::afk_window::Column::IsDeleted.eq(false))
            .filter(entity::afk_window::Column::StartAt.lte(instant))
            .filter(entity::afk_window::Column::EndAt.gte(instant))
            .filter(
                Condition::any()
                    .add(entity::afk_window::Column::EndedEarlyAt.is_null())
                    .add(entity::afk_window::Column::EndedEarlyAt.gte(instant)),
            )
            .one(self.db)
            .await?;

        entity.map(AfkWindow::from_entity).transpose()
    }

    /// Computes aggregate statistics over non-deleted windows.
    ///
    /// The mean duration uses the early-return instant as the effective end
    /// where one is set.
    ///
    /// # Arguments
    /// - `clan_role_id` - Restrict to users whose current clan tag matches
    /// - `now` - Reference instant for the "currently active" count
    ///
    /// # Returns
    /// - `Ok(AfkStatistics)` - Aggregated counts and mean duration
    /// - `Err(AppError)` - Database error during the query
    pub async fn statistics(
        &self,
        clan_role_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AfkStatistics, AppError> {
        let mut query = entity::prelude::AfkWindow::find()
            .find_also_related(entity::prelude::User)
            .filter(entity::afk_window::Column::IsDeleted.eq(false));

        if let Some(clan_role_id) = clan_role_id {
            query = query.filter(entity::user::Column::ClanRoleId.eq(clan_role_id));
        }

        let rows = query.all(self.db).await?;

        let total = rows.len() as u64;
        let mut unique_users = HashSet::new();
        let mut active_now = 0;
        let mut scheduled_future = 0;
        let mut total_duration = Duration::zero();

        for (window, _user) in &rows {
            unique_users.insert(window.user_id.clone());

            let not_yet_ended = window.ended_early_at.map_or(true, |t| t >= now);
            if window.is_active && window.start_at <= now && now <= window.end_at && not_yet_ended
            {
                active_now += 1;
            }
            if window.ended_early_at.is_none() && window.start_at > now {
                scheduled_future += 1;
            }

            let effective_end = window.ended_early_at.unwrap_or(window.end_at);
            total_duration = total_duration + (effective_end - window.start_at);
        }

        let mean_duration = if total > 0 {
            Some(total_duration / total as i32)
        } else {
            None
        };

        Ok(AfkStatistics {
            total,
            unique_users: unique_users.len() as u64,
            active_now,
            scheduled_future,
            mean_duration,
        })
    }
}

/// Converts a joined (window, owner) row into domain models.
///
/// The owner is guaranteed by the foreign key; a missing row indicates schema
/// breakage and surfaces as an internal error.
fn pair_from_entities(
    (window, user): (entity::afk_window::Model, Option<entity::user::Model>),
) -> Result<(User, AfkWindow), AppError> {
    let Some(user) = user else {
        return Err(InternalError::MissingJoinedUser {
            user_id: window.user_id.clone(),
        }
        .into());
    };

    Ok((User::from_entity(user)?, AfkWindow::from_entity(window)?))
}
