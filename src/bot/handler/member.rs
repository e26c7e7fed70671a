use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::Member;

use crate::config::Config;
use crate::data::user::UserRepository;
use crate::model::user::UpsertUserParam;

/// Handles the guild_member_update event when a member is updated in a guild
///
/// Refreshes the stored user identity: username, guild display name, and the
/// clan tag derived from the member's current roles. This keeps user rows
/// fresh between roster sync cycles; opening and closing membership intervals
/// stays with the snapshot-driven reconciliation.
pub async fn handle_guild_member_update(
    db: &DatabaseConnection,
    config: &Arc<Config>,
    new: Option<Member>,
) {
    let Some(member) = new else {
        return;
    };

    let clan_role_id = config
        .clans
        .iter()
        .find(|clan| {
            member
                .roles
                .iter()
                .any(|role| role.get().to_string() == clan.role_id)
        })
        .map(|clan| clan.role_id.clone());

    let user_repo = UserRepository::new(db);

    if let Err(e) = user_repo
        .upsert(UpsertUserParam {
            discord_id: member.user.id.get(),
            username: member.user.name.clone(),
            display_name: member.nick.clone(),
            clan_role_id,
        })
        .await
    {
        tracing::error!("Failed to refresh user {}: {}", member.user.id, e);
    } else {
        tracing::debug!("Refreshed user {} from member update", member.user.id);
    }
}
