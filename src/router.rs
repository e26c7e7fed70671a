use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    controller::{
        afk::{
            current_window, declare, declare_quick, extend_window, list_active,
            remove_future_window, return_early, soft_delete_windows, statistics, upcoming,
            user_history,
        },
        membership::{
            add_member, clan_afk, clan_history, clan_members, remove_member, user_clan_history,
        },
    },
    middleware::auth::require_bearer,
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/afk", get(list_active).post(declare))
        .route("/api/afk/quick", post(declare_quick))
        .route("/api/afk/stats", get(statistics))
        .route("/api/afk/{discord_id}", get(user_history))
        .route("/api/afk/{discord_id}/upcoming", get(upcoming))
        .route("/api/afk/{discord_id}/current", get(current_window))
        .route("/api/afk/{discord_id}/return", post(return_early))
        .route("/api/afk/{discord_id}/extend", post(extend_window))
        .route(
            "/api/afk/{discord_id}/windows",
            delete(soft_delete_windows),
        )
        .route(
            "/api/afk/{discord_id}/windows/{window_id}",
            delete(remove_future_window),
        )
        .route("/api/clan/{clan}/members", get(clan_members).post(add_member))
        .route(
            "/api/clan/{clan}/members/{discord_id}",
            delete(remove_member),
        )
        .route("/api/clan/{clan}/history", get(clan_history))
        .route("/api/clan/{clan}/afk", get(clan_afk))
        .route("/api/users/{discord_id}/clans", get(user_clan_history))
        .route_layer(from_fn_with_state(state.clone(), require_bearer))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
