//! Clan membership endpoints: rosters, explicit add/remove, and the
//! join/leave history views.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::{
    error::AppError,
    model::{
        api::{ActiveAfkDto, AddMemberDto, ClanMemberDto, ClanMembershipDto},
        membership::{AddMemberParam, MembershipHistoryFilter},
    },
    service::{afk::AfkService, membership::MembershipService},
    state::AppState,
};

use super::resolve_clan;

/// Query parameters for the clan history listing.
#[derive(Debug, Deserialize)]
pub struct ClanHistoryQuery {
    /// Restrict to intervals whose join or leave fell within the last N days.
    pub days: Option<i64>,
    /// Include closed intervals; defaults to true.
    pub include_inactive: Option<bool>,
}

/// GET /api/clan/{clan}/members - A clan's current members.
///
/// # Path Parameters
/// - `clan`: clan reference (role id, name, or alias)
///
/// # Returns
/// - `200 OK`: JSON array of ClanMemberDto, ordered by username
/// - `404 Not Found`: Unknown clan reference
pub async fn clan_members(
    State(state): State<AppState>,
    Path(clan): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let clan_role_id = resolve_clan(&state.config, &clan)?;

    let service = MembershipService::new(&state.db, state.clan_locks.clone());
    let members = service.members(&clan_role_id).await?;

    let dtos: Vec<ClanMemberDto> = members
        .into_iter()
        .map(|(user, membership)| ClanMemberDto {
            user: user.into_dto(),
            membership: membership.into_dto(),
        })
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// POST /api/clan/{clan}/members - Explicitly add a member.
///
/// # Returns
/// - `201 Created`: The opened ClanMembershipDto
/// - `404 Not Found`: Unknown clan reference
/// - `409 Conflict`: The user already has an active interval in the clan
pub async fn add_member(
    State(state): State<AppState>,
    Path(clan): Path<String>,
    Json(dto): Json<AddMemberDto>,
) -> Result<impl IntoResponse, AppError> {
    let clan_role_id = resolve_clan(&state.config, &clan)?;

    let service = MembershipService::new(&state.db, state.clan_locks.clone());
    let membership = service
        .add_member(AddMemberParam {
            discord_id: dto.discord_id,
            username: dto.username,
            display_name: dto.display_name,
            clan_role_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(membership.into_dto())))
}

/// DELETE /api/clan/{clan}/members/{discord_id} - Explicitly remove a member.
///
/// # Returns
/// - `200 OK`: The closed ClanMembershipDto with `left_at` stamped
/// - `404 Not Found`: Unknown clan reference, or no active interval
pub async fn remove_member(
    State(state): State<AppState>,
    Path((clan, discord_id)): Path<(String, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let clan_role_id = resolve_clan(&state.config, &clan)?;

    let service = MembershipService::new(&state.db, state.clan_locks.clone());
    let membership = service.remove_member(discord_id, &clan_role_id).await?;

    Ok((StatusCode::OK, Json(membership.into_dto())))
}

/// GET /api/clan/{clan}/history - Recent joins and leaves across a clan.
///
/// With `days`, restricts to intervals whose join or leave fell inside the
/// last N days.
///
/// # Returns
/// - `200 OK`: JSON array of ClanMembershipDto, newest join first
/// - `404 Not Found`: Unknown clan reference
pub async fn clan_history(
    State(state): State<AppState>,
    Path(clan): Path<String>,
    Query(query): Query<ClanHistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let clan_role_id = resolve_clan(&state.config, &clan)?;

    let filter = MembershipHistoryFilter {
        discord_id: None,
        clan_role_id: Some(clan_role_id),
        since: query.days.map(|days| Utc::now() - Duration::days(days)),
        until: None,
        include_inactive: query.include_inactive.unwrap_or(true),
    };

    let service = MembershipService::new(&state.db, state.clan_locks.clone());
    let history = service.history(&filter).await?;

    let dtos: Vec<ClanMembershipDto> = history.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// GET /api/users/{discord_id}/clans - A user's clan history across all clans.
///
/// # Returns
/// - `200 OK`: JSON array of ClanMembershipDto, newest join first
pub async fn user_clan_history(
    State(state): State<AppState>,
    Path(discord_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let filter = MembershipHistoryFilter {
        discord_id: Some(discord_id),
        clan_role_id: None,
        since: None,
        until: None,
        include_inactive: true,
    };

    let service = MembershipService::new(&state.db, state.clan_locks.clone());
    let history = service.history(&filter).await?;

    let dtos: Vec<ClanMembershipDto> = history.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// GET /api/clan/{clan}/afk - Live active-or-future windows across a clan.
///
/// # Returns
/// - `200 OK`: JSON array of ActiveAfkDto, ordered by start
/// - `404 Not Found`: Unknown clan reference
pub async fn clan_afk(
    State(state): State<AppState>,
    Path(clan): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let clan_role_id = resolve_clan(&state.config, &clan)?;

    let service = AfkService::new(&state.db, state.afk_locks.clone());
    let entries = service.active_and_future_for_clan(&clan_role_id).await?;

    let dtos: Vec<ActiveAfkDto> = entries
        .into_iter()
        .map(|(user, window)| ActiveAfkDto {
            user: user.into_dto(),
            window: window.into_dto(),
        })
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}
