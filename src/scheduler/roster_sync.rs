use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::http::Http;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    config::Config, error::AppError, model::membership::RosterMember,
    service::membership::MembershipService, util::lock::KeyedLocks,
};

/// Starts the clan roster sync scheduler
///
/// This scheduler runs every minute, fetches the guild's member list from
/// Discord once per cycle, and reconciles each configured clan's membership
/// ledger against the members carrying that clan's role. The roster provider
/// owns the source of truth for "current members"; this job just delivers
/// snapshots.
///
/// # Arguments
/// - `db`: Database connection
/// - `discord_http`: Discord HTTP client for fetching guild members
/// - `config`: Application configuration with the guild id and clan registry
/// - `locks`: Shared per-clan lock registry
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
    config: Arc<Config>,
    locks: KeyedLocks,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    // Clone resources for the job
    let job_db = db.clone();
    let job_http = discord_http.clone();
    let job_config = config.clone();
    let job_locks = locks.clone();

    // Schedule job to run every minute, offset from the activation sweep
    let job = Job::new_async("30 * * * * *", move |_uuid, _lock| {
        let db = job_db.clone();
        let http = job_http.clone();
        let config = job_config.clone();
        let locks = job_locks.clone();

        Box::pin(async move {
            if let Err(e) = sync_clan_rosters(&db, &http, &config, locks).await {
                tracing::error!("Error syncing clan rosters: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Clan roster sync scheduler started");

    Ok(())
}

/// Fetches the guild members and reconciles every configured clan.
///
/// A failure for one clan is logged and does not stop the others; the next
/// cycle retries with a fresh snapshot.
async fn sync_clan_rosters(
    db: &DatabaseConnection,
    http: &Arc<Http>,
    config: &Arc<Config>,
    locks: KeyedLocks,
) -> Result<(), AppError> {
    let members = http
        .get_guild_members(config.discord_guild_id.into(), None, None)
        .await?;

    for clan in config.clans.iter() {
        let roster: Vec<RosterMember> = members
            .iter()
            .filter(|member| {
                member
                    .roles
                    .iter()
                    .any(|role| role.get().to_string() == clan.role_id)
            })
            .map(|member| RosterMember {
                discord_id: member.user.id.get(),
                username: member.user.name.clone(),
                display_name: member.nick.clone(),
            })
            .collect();

        let service = MembershipService::new(db, locks.clone());
        match service.reconcile(&clan.role_id, &roster).await {
            Ok(diff) if diff.is_empty() => {}
            Ok(diff) => {
                tracing::info!(
                    "Roster sync for {}: joined {:?}, left {:?}",
                    clan.name,
                    diff.joined,
                    diff.left
                );
            }
            Err(e) => {
                tracing::error!("Failed to reconcile clan {}: {}", clan.name, e);
            }
        }
    }

    Ok(())
}
