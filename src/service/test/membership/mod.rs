use chrono::{Duration, Utc};
use test_utils::builder::TestBuilder;

use crate::{
    data::user::UserRepository,
    error::{membership::MembershipError, AppError},
    model::membership::{AddMemberParam, MembershipHistoryFilter, RosterMember},
    service::membership::MembershipService,
    util::lock::KeyedLocks,
};

mod add_member;
mod remove_member;

/// Roster snapshot entry with throwaway identity fields.
fn roster_member(discord_id: u64) -> RosterMember {
    RosterMember {
        discord_id,
        username: format!("user{}", discord_id),
        display_name: None,
    }
}

/// Add-member parameters with throwaway identity fields.
fn add_param(discord_id: u64, clan_role_id: &str) -> AddMemberParam {
    AddMemberParam {
        discord_id,
        username: format!("user{}", discord_id),
        display_name: None,
        clan_role_id: clan_role_id.to_string(),
    }
}
