use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, afk_window::AfkWindowFactory},
};

use crate::{
    data::user::UserRepository,
    error::{afk::AfkError, AppError},
    model::afk::{AfkDeleteSelector, AfkFilter, DeclareAfkParam, QuickAfkParam},
    service::afk::AfkService,
    util::lock::KeyedLocks,
};

mod declare;
mod quick;
mod refresh_activation;
mod return_early;
mod soft_delete;

/// Declaration parameters with throwaway identity fields.
fn declare_param(discord_id: u64, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> DeclareAfkParam {
    DeclareAfkParam {
        discord_id,
        username: format!("user{}", discord_id),
        display_name: None,
        clan_role_id: None,
        start_at,
        end_at,
        reason: Some("vacation".to_string()),
    }
}
