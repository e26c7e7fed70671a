//! Clan membership error types and response mapping.

use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Expected failures of clan membership operations.
#[derive(Error, Debug)]
pub enum MembershipError {
    /// An active interval already exists for this (user, clan) pair.
    ///
    /// Explicit adds must not silently no-op: the strict rejection is what
    /// keeps at-least-once roster delivery from corrupting the audit trail.
    #[error("user {user_id} already has an active membership in clan {clan_role_id}")]
    AlreadyMember {
        /// Discord id of the user
        user_id: u64,
        /// Clan role id the user is already a member of
        clan_role_id: String,
    },

    /// No active interval exists for this (user, clan) pair.
    #[error("user {user_id} has no active membership in clan {clan_role_id}")]
    NotMember {
        /// Discord id of the user
        user_id: u64,
        /// Clan role id the user is not a member of
        clan_role_id: String,
    },

    /// The given clan identifier matches no configured clan.
    #[error("unknown clan '{0}'")]
    UnknownClan(String),
}

/// Maps membership errors to HTTP responses.
///
/// - 404 Not Found - `NotMember`, `UnknownClan`
/// - 409 Conflict - `AlreadyMember`
impl IntoResponse for MembershipError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::AlreadyMember { .. } => StatusCode::CONFLICT,
            Self::NotMember { .. } | Self::UnknownClan(_) => StatusCode::NOT_FOUND,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
