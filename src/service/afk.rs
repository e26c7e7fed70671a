//! AFK scheduling engine.
//!
//! State machine per window: `Scheduled -> Active -> Expired`, with side
//! transitions `Active -> EndedEarly` and `{Scheduled, Active} -> Deleted`.
//! No transition leaves `Deleted` or `EndedEarly`.
//!
//! Declarations are serialized per user (keyed lock) and executed inside one
//! transaction, so two concurrent declarations cannot both pass the overlap
//! check against the same snapshot. The cached `is_active` flag is maintained
//! by [`AfkService::refresh_activation`], run periodically and once at process
//! start; every "currently AFK" read additionally applies the live time
//! predicate, so sweep latency can hide a window but never resurrect one.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::{afk_window::AfkWindowRepository, user::UserRepository},
    error::{afk::AfkError, AppError},
    model::{
        afk::{AfkDeleteSelector, AfkFilter, AfkStatistics, AfkWindow, DeclareAfkParam, QuickAfkParam},
        user::{UpsertUserParam, User},
    },
    util::{lock::KeyedLocks, parse::end_of_day},
};

/// Service implementing the AFK scheduling rules.
pub struct AfkService<'a> {
    db: &'a DatabaseConnection,
    locks: KeyedLocks,
}

impl<'a> AfkService<'a> {
    /// Creates a new service instance.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `locks` - Shared per-user lock registry serializing declarations
    pub fn new(db: &'a DatabaseConnection, locks: KeyedLocks) -> Self {
        Self { db, locks }
    }

    /// Declares a new AFK window for a user.
    ///
    /// Creates the user row on first reference, rejects windows whose end is
    /// not after their start, and rejects any window intersecting one of the
    /// user's live windows (inclusive boundaries - touching endpoints count).
    /// The overlap probe and insert run inside one transaction under the
    /// user's lock; overlap is rejected, never auto-split or merged.
    ///
    /// # Arguments
    /// - `param` - Declaration parameters
    ///
    /// # Returns
    /// - `Ok(AfkWindow)` - The created window, active iff it covers now
    /// - `Err(AppError::AfkErr(InvalidRange))` - End not after start
    /// - `Err(AppError::AfkErr(OverlappingWindow))` - Collision with a live window,
    ///   carrying the conflicting bounds and reason
    /// - `Err(AppError)` - Database error
    pub async fn declare(&self, param: DeclareAfkParam) -> Result<AfkWindow, AppError> {
        if param.end_at <= param.start_at {
            return Err(AfkError::InvalidRange {
                start: param.start_at,
                end: param.end_at,
            }
            .into());
        }

        let lock = self.locks.get(&param.discord_id.to_string());
        let _guard = lock.lock().await;

        let txn = self.db.begin().await?;

        UserRepository::new(&txn)
            .upsert(UpsertUserParam {
                discord_id: param.discord_id,
                username: param.username,
                display_name: param.display_name,
                clan_role_id: param.clan_role_id,
            })
            .await?;

        let repo = AfkWindowRepository::new(&txn);

        if let Some(conflict) = repo
            .find_live_overlapping(param.discord_id, param.start_at, param.end_at)
            .await?
        {
            return Err(AfkError::OverlappingWindow {
                start: conflict.start_at,
                end: conflict.end_at,
                reason: conflict.reason,
            }
            .into());
        }

        let now = Utc::now();
        let is_active = param.start_at <= now && now <= param.end_at;

        let window = repo
            .insert(
                param.discord_id,
                param.start_at,
                param.end_at,
                param.reason,
                is_active,
            )
            .await?;

        txn.commit().await?;

        Ok(window)
    }

    /// Declares a window starting now and ending at the end of a day.
    ///
    /// Without `days` the window ends at 23:59:59 today; with `days` it ends
    /// at 23:59:59 that many days ahead. Runs through [`AfkService::declare`],
    /// so overlap checking applies as usual.
    ///
    /// # Arguments
    /// - `param` - Quick-declaration parameters
    ///
    /// # Returns
    /// - `Ok(AfkWindow)` - The created window
    /// - `Err(AppError::AfkErr(InvalidDuration))` - `days` was zero or negative
    /// - `Err(AppError)` - Any declaration failure
    pub async fn quick(&self, param: QuickAfkParam) -> Result<AfkWindow, AppError> {
        let now = Utc::now();

        let end_at = match param.days {
            None => end_of_day(now),
            Some(days) if days <= 0 => return Err(AfkError::InvalidDuration(days).into()),
            Some(days) => end_of_day(now + Duration::days(days)),
        };

        self.declare(DeclareAfkParam {
            discord_id: param.discord_id,
            username: param.username,
            display_name: param.display_name,
            clan_role_id: param.clan_role_id,
            start_at: now,
            end_at,
            reason: param.reason,
        })
        .await
    }

    /// Recomputes the cached activity flag across all windows.
    ///
    /// Runs inside one transaction so a crash mid-sweep cannot leave half the
    /// rows updated against a different reference instant. This sweep is the
    /// sole mechanism keeping `is_active` correct as time passes; it runs
    /// every scheduler cycle and once at process start.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows whose flag changed
    /// - `Err(AppError)` - Database error; the caller logs and retries next cycle
    pub async fn refresh_activation(&self) -> Result<u64, AppError> {
        let txn = self.db.begin().await?;

        let changed = AfkWindowRepository::new(&txn)
            .refresh_activation(Utc::now())
            .await?;

        txn.commit().await?;

        Ok(changed)
    }

    /// Ends AFK early for a user.
    ///
    /// With a window id, ends that specific window after ownership checks.
    /// Without one, ends all of the user's live windows. Having nothing to end
    /// is not an error - the returned count is simply 0.
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the returning user
    /// - `window_id` - Specific window to end, or `None` for all live windows
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of windows ended (0 when there was nothing to end)
    /// - `Err(AppError::AfkErr(NotFound | WrongOwner))` - Bad window reference
    /// - `Err(AppError)` - Database error
    pub async fn return_early(
        &self,
        discord_id: u64,
        window_id: Option<i32>,
    ) -> Result<u64, AppError> {
        let now = Utc::now();
        let repo = AfkWindowRepository::new(self.db);

        match window_id {
            None => repo.end_live(discord_id, now).await,
            Some(id) => {
                let Some(window) = repo.find_by_id(id).await? else {
                    return Err(AfkError::NotFound(id).into());
                };
                if window.is_deleted {
                    return Err(AfkError::NotFound(id).into());
                }
                if window.user_id != discord_id {
                    return Err(AfkError::WrongOwner(id).into());
                }
                if !window.is_live() {
                    // Already ended; nothing to mark
                    return Ok(0);
                }

                repo.end_window(id, now).await
            }
        }
    }

    /// Extends a window's end by a number of hours.
    ///
    /// Extension does not re-run overlap checking against the user's other
    /// windows; the operation is trusted to its admin-gated callers. An
    /// extended window can therefore sit closer to a later one than a fresh
    /// declaration could.
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the owner
    /// - `window_id` - Window to extend
    /// - `hours` - Hours to add; must be positive
    ///
    /// # Returns
    /// - `Ok(AfkWindow)` - The window with its end moved out by exactly `hours`
    /// - `Err(AppError::AfkErr(InvalidDuration))` - `hours` was zero or negative
    /// - `Err(AppError::AfkErr(NotFound | WrongOwner))` - Bad window reference
    /// - `Err(AppError::AfkErr(AlreadyEnded))` - Window ended early or is not active
    /// - `Err(AppError)` - Database error
    pub async fn extend(
        &self,
        discord_id: u64,
        window_id: i32,
        hours: i64,
    ) -> Result<AfkWindow, AppError> {
        if hours <= 0 {
            return Err(AfkError::InvalidDuration(hours).into());
        }

        let repo = AfkWindowRepository::new(self.db);

        let Some(window) = repo.find_by_id(window_id).await? else {
            return Err(AfkError::NotFound(window_id).into());
        };
        if window.is_deleted {
            return Err(AfkError::NotFound(window_id).into());
        }
        if window.user_id != discord_id {
            return Err(AfkError::WrongOwner(window_id).into());
        }
        if window.ended_early_at.is_some() || !window.is_active {
            return Err(AfkError::AlreadyEnded(window_id).into());
        }

        repo.set_end(window_id, window.end_at + Duration::hours(hours))
            .await
    }

    /// Withdraws a strictly-future window.
    ///
    /// The row is hard-deleted: a window withdrawn before taking effect
    /// carries no audit value. Active or past windows must go through
    /// [`AfkService::soft_delete`] instead.
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the owner
    /// - `window_id` - Window to withdraw
    ///
    /// # Returns
    /// - `Ok(())` - The row is gone
    /// - `Err(AppError::AfkErr(NotFound | WrongOwner))` - Bad window reference
    /// - `Err(AppError::AfkErr(NotFuture))` - The window has already started
    /// - `Err(AppError)` - Database error
    pub async fn remove_future(&self, discord_id: u64, window_id: i32) -> Result<(), AppError> {
        let repo = AfkWindowRepository::new(self.db);

        let Some(window) = repo.find_by_id(window_id).await? else {
            return Err(AfkError::NotFound(window_id).into());
        };
        if window.is_deleted {
            return Err(AfkError::NotFound(window_id).into());
        }
        if window.user_id != discord_id {
            return Err(AfkError::WrongOwner(window_id).into());
        }
        if window.start_at <= Utc::now() {
            return Err(AfkError::NotFuture(window_id).into());
        }

        repo.delete_by_id(window_id).await?;

        Ok(())
    }

    /// Soft-deletes a user's windows for administrative cleanup.
    ///
    /// Marks the selected rows deleted and inactive, stamping the early-return
    /// marker where unset. Unlike [`AfkService::remove_future`] the rows stay
    /// in storage for audit. Both updates run inside one transaction.
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the targeted user
    /// - `selector` - All windows, only active ones, or a single id
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of windows soft-deleted
    /// - `Err(AppError::AfkErr(NotFound | WrongOwner))` - Bad window reference
    ///   (single-id selector only)
    /// - `Err(AppError)` - Database error
    pub async fn soft_delete(
        &self,
        discord_id: u64,
        selector: AfkDeleteSelector,
    ) -> Result<u64, AppError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;
        let repo = AfkWindowRepository::new(&txn);

        let affected = match selector {
            AfkDeleteSelector::All => repo.soft_delete_by_user(discord_id, false, now).await?,
            AfkDeleteSelector::ActiveOnly => {
                repo.soft_delete_by_user(discord_id, true, now).await?
            }
            AfkDeleteSelector::Window(id) => {
                let Some(window) = repo.find_by_id(id).await? else {
                    return Err(AfkError::NotFound(id).into());
                };
                if window.user_id != discord_id {
                    return Err(AfkError::WrongOwner(id).into());
                }

                repo.soft_delete_by_id(id, now).await?
            }
        };

        txn.commit().await?;

        Ok(affected)
    }

    /// Lists windows active right now, with their owners.
    ///
    /// # Arguments
    /// - `filter` - Optional clan and user restrictions
    ///
    /// # Returns
    /// - `Ok(Vec<(User, AfkWindow)>)` - Currently-AFK users and their windows
    /// - `Err(AppError)` - Database error
    pub async fn active_now(&self, filter: &AfkFilter) -> Result<Vec<(User, AfkWindow)>, AppError> {
        AfkWindowRepository::new(self.db)
            .active_now(filter, Utc::now())
            .await
    }

    /// Lists a user's live windows that are active or still ahead.
    pub async fn active_and_future_for_user(
        &self,
        discord_id: u64,
    ) -> Result<Vec<AfkWindow>, AppError> {
        AfkWindowRepository::new(self.db)
            .active_and_future_for_user(discord_id, Utc::now())
            .await
    }

    /// Lists live active-or-future windows across a clan, with their owners.
    pub async fn active_and_future_for_clan(
        &self,
        clan_role_id: &str,
    ) -> Result<Vec<(User, AfkWindow)>, AppError> {
        AfkWindowRepository::new(self.db)
            .active_and_future_for_clan(clan_role_id, Utc::now())
            .await
    }

    /// Gets a user's most recent windows, newest first, including soft-deleted
    /// ones (this is the audit view).
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the user
    /// - `limit` - Maximum number of windows to return
    pub async fn history(&self, discord_id: u64, limit: u64) -> Result<Vec<AfkWindow>, AppError> {
        AfkWindowRepository::new(self.db)
            .history_for_user(discord_id, limit)
            .await
    }

    /// Finds the live window covering the given instant for a user, if any.
    ///
    /// Point query for the exporter: "was this user AFK at instant T".
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the user
    /// - `instant` - The instant to probe
    pub async fn covering_window(
        &self,
        discord_id: u64,
        instant: DateTime<Utc>,
    ) -> Result<Option<AfkWindow>, AppError> {
        AfkWindowRepository::new(self.db)
            .covering_window(discord_id, instant)
            .await
    }

    /// Computes aggregate statistics, optionally scoped to one clan.
    pub async fn statistics(&self, clan_role_id: Option<&str>) -> Result<AfkStatistics, AppError> {
        AfkWindowRepository::new(self.db)
            .statistics(clan_role_id, Utc::now())
            .await
    }
}
