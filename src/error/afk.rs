//! AFK scheduling error types and response mapping.
//!
//! Covers every expected, user-facing failure of the AFK scheduling engine:
//! bad ranges, overlap collisions, ownership mismatches, and operations that
//! are invalid for a window's current temporal state. All variants are typed
//! so the presentation layer can render them without string matching.

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Expected failures of AFK scheduling operations.
#[derive(Error, Debug)]
pub enum AfkError {
    /// The end of the requested window is not after its start.
    #[error("the end date/time must be after the start date/time")]
    InvalidRange {
        /// Requested window start
        start: DateTime<Utc>,
        /// Requested window end
        end: DateTime<Utc>,
    },

    /// The requested window intersects an existing live window.
    ///
    /// Carries the conflicting window's bounds and reason so the caller can
    /// show the user what they collided with.
    #[error("the requested window overlaps an existing AFK from {} to {} (reason: {})", .start, .end, .reason.as_deref().unwrap_or("none"))]
    OverlappingWindow {
        /// Start of the conflicting window
        start: DateTime<Utc>,
        /// End of the conflicting window
        end: DateTime<Utc>,
        /// Reason text of the conflicting window
        reason: Option<String>,
    },

    /// No window exists with the given id.
    #[error("no AFK window found with id {0}")]
    NotFound(i32),

    /// The window exists but belongs to a different user.
    #[error("AFK window {0} belongs to a different user")]
    WrongOwner(i32),

    /// The window has already ended (early return or expired).
    #[error("AFK window {0} has already ended")]
    AlreadyEnded(i32),

    /// The window has already started; only strictly future windows qualify.
    #[error("AFK window {0} has already started")]
    NotFuture(i32),

    /// A non-positive duration was supplied.
    #[error("the duration must be positive, got {0}")]
    InvalidDuration(i64),
}

/// Maps AFK errors to HTTP responses.
///
/// - 400 Bad Request - `InvalidRange`, `InvalidDuration`
/// - 404 Not Found - `NotFound`, `WrongOwner`
/// - 409 Conflict - `OverlappingWindow`, `AlreadyEnded`, `NotFuture`
impl IntoResponse for AfkError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::InvalidRange { .. } | Self::InvalidDuration(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::WrongOwner(_) => StatusCode::NOT_FOUND,
            Self::OverlappingWindow { .. } | Self::AlreadyEnded(_) | Self::NotFuture(_) => {
                StatusCode::CONFLICT
            }
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
