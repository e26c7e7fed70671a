//! HTTP request handlers for the REST API.
//!
//! Controllers validate and convert request DTOs into operation parameters,
//! call into the service layer, and convert domain models back into response
//! DTOs. All formatting and permission gating beyond the bearer token lives
//! with the API's consumers.

pub mod afk;
pub mod membership;

use crate::{config::Config, error::AppError};

/// Resolves a user-supplied clan reference (role id, name, or alias) to the
/// clan's role id, or fails with `UnknownClan`.
pub(crate) fn resolve_clan(config: &Config, key: &str) -> Result<String, AppError> {
    config
        .clans
        .resolve(key)
        .map(|clan| clan.role_id.clone())
        .ok_or_else(|| {
            crate::error::membership::MembershipError::UnknownClan(key.to_string()).into()
        })
}
