//! AFK endpoints: declarations, early returns, extensions, deletions, and the
//! active/history/statistics/point queries.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::AppError,
    model::{
        afk::{AfkDeleteSelector, AfkFilter, DeclareAfkParam, QuickAfkParam},
        api::{
            ActiveAfkDto, AffectedDto, AfkWindowDto, CurrentAfkDto, DeclareAfkDto, ExtendAfkDto,
            QuickAfkDto,
        },
    },
    service::afk::AfkService,
    state::AppState,
    util::parse::parse_datetime,
};

use super::resolve_clan;

/// Query parameters for the active-AFK listing.
#[derive(Debug, Deserialize)]
pub struct ActiveAfkQuery {
    /// Clan reference (role id, name, or alias) to restrict to.
    pub clan: Option<String>,
    /// Discord ID to restrict to.
    pub discord_id: Option<u64>,
}

/// Query parameters for the user history listing.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum entries to return, default 10.
    pub limit: Option<u64>,
}

/// Query parameters for the point query.
#[derive(Debug, Deserialize)]
pub struct CurrentQuery {
    /// Instant to probe (RFC 3339); defaults to now.
    pub at: Option<DateTime<Utc>>,
}

/// Query parameters for statistics.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Clan reference (role id, name, or alias) to restrict to.
    pub clan: Option<String>,
}

/// Query parameters for the early return.
#[derive(Debug, Deserialize)]
pub struct ReturnQuery {
    /// Specific window to end; omitted ends all of the user's live windows.
    pub window_id: Option<i32>,
}

/// Query parameters for administrative soft-deletes.
#[derive(Debug, Deserialize)]
pub struct SoftDeleteQuery {
    /// Single window to delete; takes precedence over `only_active`.
    pub window_id: Option<i32>,
    /// Restrict to windows whose cached activity flag is set.
    pub only_active: Option<bool>,
}

/// GET /api/afk - List windows active right now.
///
/// # Query Parameters
/// - `clan`: optional clan reference (role id, name, or alias)
/// - `discord_id`: optional user restriction
///
/// # Returns
/// - `200 OK`: JSON array of ActiveAfkDto
/// - `404 Not Found`: Unknown clan reference
pub async fn list_active(
    State(state): State<AppState>,
    Query(query): Query<ActiveAfkQuery>,
) -> Result<impl IntoResponse, AppError> {
    let clan_role_id = query
        .clan
        .map(|key| resolve_clan(&state.config, &key))
        .transpose()?;

    let filter = AfkFilter {
        clan_role_id,
        discord_id: query.discord_id,
    };

    let service = AfkService::new(&state.db, state.afk_locks.clone());
    let entries = service.active_now(&filter).await?;

    let dtos: Vec<ActiveAfkDto> = entries
        .into_iter()
        .map(|(user, window)| ActiveAfkDto {
            user: user.into_dto(),
            window: window.into_dto(),
        })
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// POST /api/afk - Declare an AFK window from compact date/time strings.
///
/// Dates and times use the same `DDMM`/`HHMM` shapes the slash-command layer
/// collects; the year is inferred with the 14-day look-ahead rule.
///
/// # Returns
/// - `201 Created`: The created AfkWindowDto
/// - `400 Bad Request`: Malformed date/time input or invalid range
/// - `409 Conflict`: Overlap with an existing live window
pub async fn declare(
    State(state): State<AppState>,
    Json(dto): Json<DeclareAfkDto>,
) -> Result<impl IntoResponse, AppError> {
    let start_at = parse_datetime(&dto.start_date, &dto.start_time)?;
    let end_at = parse_datetime(&dto.end_date, &dto.end_time)?;

    let service = AfkService::new(&state.db, state.afk_locks.clone());
    let window = service
        .declare(DeclareAfkParam {
            discord_id: dto.discord_id,
            username: dto.username,
            display_name: dto.display_name,
            clan_role_id: dto.clan_role_id,
            start_at,
            end_at,
            reason: dto.reason,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(window.into_dto())))
}

/// POST /api/afk/quick - Declare a window from now until the end of a day.
///
/// # Returns
/// - `201 Created`: The created AfkWindowDto
/// - `400 Bad Request`: Non-positive `days`
/// - `409 Conflict`: Overlap with an existing live window
pub async fn declare_quick(
    State(state): State<AppState>,
    Json(dto): Json<QuickAfkDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AfkService::new(&state.db, state.afk_locks.clone());
    let window = service
        .quick(QuickAfkParam {
            discord_id: dto.discord_id,
            username: dto.username,
            display_name: dto.display_name,
            clan_role_id: dto.clan_role_id,
            days: dto.days,
            reason: dto.reason,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(window.into_dto())))
}

/// GET /api/afk/stats - Aggregate statistics, optionally scoped to one clan.
///
/// # Returns
/// - `200 OK`: AfkStatisticsDto
/// - `404 Not Found`: Unknown clan reference
pub async fn statistics(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let clan_role_id = query
        .clan
        .map(|key| resolve_clan(&state.config, &key))
        .transpose()?;

    let service = AfkService::new(&state.db, state.afk_locks.clone());
    let stats = service.statistics(clan_role_id.as_deref()).await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

/// GET /api/afk/{discord_id} - A user's recent windows, newest first.
///
/// Includes soft-deleted windows; this is the audit view.
///
/// # Returns
/// - `200 OK`: JSON array of AfkWindowDto
pub async fn user_history(
    State(state): State<AppState>,
    Path(discord_id): Path<u64>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = AfkService::new(&state.db, state.afk_locks.clone());
    let windows = service
        .history(discord_id, query.limit.unwrap_or(10))
        .await?;

    let dtos: Vec<AfkWindowDto> = windows.into_iter().map(|w| w.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// GET /api/afk/{discord_id}/upcoming - A user's live active-or-future windows.
///
/// # Returns
/// - `200 OK`: JSON array of AfkWindowDto, ordered by start
pub async fn upcoming(
    State(state): State<AppState>,
    Path(discord_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let service = AfkService::new(&state.db, state.afk_locks.clone());
    let windows = service.active_and_future_for_user(discord_id).await?;

    let dtos: Vec<AfkWindowDto> = windows.into_iter().map(|w| w.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// GET /api/afk/{discord_id}/current - Was the user AFK at an instant?
///
/// The exporter's point query. Defaults to now when `at` is omitted.
///
/// # Returns
/// - `200 OK`: CurrentAfkDto with the covering window, if any
pub async fn current_window(
    State(state): State<AppState>,
    Path(discord_id): Path<u64>,
    Query(query): Query<CurrentQuery>,
) -> Result<impl IntoResponse, AppError> {
    let instant = query.at.unwrap_or_else(Utc::now);

    let service = AfkService::new(&state.db, state.afk_locks.clone());
    let window = service.covering_window(discord_id, instant).await?;

    let dto = CurrentAfkDto {
        afk: window.is_some(),
        window: window.map(|w| w.into_dto()),
    };

    Ok((StatusCode::OK, Json(dto)))
}

/// POST /api/afk/{discord_id}/return - Return early from AFK.
///
/// Ends the window named by `window_id`, or all of the user's live windows
/// when it is omitted. Having nothing to end is not an error.
///
/// # Returns
/// - `200 OK`: AffectedDto with the number of windows ended
/// - `404 Not Found`: Window id does not exist or belongs to someone else
pub async fn return_early(
    State(state): State<AppState>,
    Path(discord_id): Path<u64>,
    Query(query): Query<ReturnQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = AfkService::new(&state.db, state.afk_locks.clone());
    let affected = service.return_early(discord_id, query.window_id).await?;

    Ok((StatusCode::OK, Json(AffectedDto { affected })))
}

/// POST /api/afk/{discord_id}/extend - Extend a window's end.
///
/// # Returns
/// - `200 OK`: The updated AfkWindowDto
/// - `400 Bad Request`: Non-positive hours
/// - `404 Not Found`: Window id does not exist or belongs to someone else
/// - `409 Conflict`: Window has already ended
pub async fn extend_window(
    State(state): State<AppState>,
    Path(discord_id): Path<u64>,
    Json(dto): Json<ExtendAfkDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AfkService::new(&state.db, state.afk_locks.clone());
    let window = service.extend(discord_id, dto.window_id, dto.hours).await?;

    Ok((StatusCode::OK, Json(window.into_dto())))
}

/// DELETE /api/afk/{discord_id}/windows/{window_id} - Withdraw a future window.
///
/// Hard-deletes the row; only strictly-future windows qualify.
///
/// # Returns
/// - `204 No Content`: The row is gone
/// - `404 Not Found`: Window id does not exist or belongs to someone else
/// - `409 Conflict`: The window has already started
pub async fn remove_future_window(
    State(state): State<AppState>,
    Path((discord_id, window_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let service = AfkService::new(&state.db, state.afk_locks.clone());
    service.remove_future(discord_id, window_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/afk/{discord_id}/windows - Soft-delete a user's windows.
///
/// Administrative cleanup that preserves history. Targets a single window via
/// `window_id`, only active windows via `only_active=true`, or everything.
///
/// # Returns
/// - `200 OK`: AffectedDto with the number of windows soft-deleted
/// - `404 Not Found`: Window id does not exist or belongs to someone else
pub async fn soft_delete_windows(
    State(state): State<AppState>,
    Path(discord_id): Path<u64>,
    Query(query): Query<SoftDeleteQuery>,
) -> Result<impl IntoResponse, AppError> {
    let selector = match query.window_id {
        Some(id) => AfkDeleteSelector::Window(id),
        None if query.only_active.unwrap_or(false) => AfkDeleteSelector::ActiveOnly,
        None => AfkDeleteSelector::All,
    };

    let service = AfkService::new(&state.db, state.afk_locks.clone());
    let affected = service.soft_delete(discord_id, selector).await?;

    Ok((StatusCode::OK, Json(AffectedDto { affected })))
}
