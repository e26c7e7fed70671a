use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, service::afk::AfkService, util::lock::KeyedLocks};

/// Starts the AFK activation sweep scheduler
///
/// This scheduler runs every minute and recomputes the cached `is_active`
/// flag across all AFK windows. The sweep is the sole mechanism keeping the
/// flag correct as time passes; it also runs once during startup so listings
/// are correct before the first cycle fires.
///
/// # Arguments
/// - `db`: Database connection
/// - `locks`: Shared per-user lock registry
pub async fn start_scheduler(db: DatabaseConnection, locks: KeyedLocks) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    // Clone resources for the job
    let job_db = db.clone();
    let job_locks = locks.clone();

    // Schedule job to run every minute
    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = job_db.clone();
        let locks = job_locks.clone();

        Box::pin(async move {
            match AfkService::new(&db, locks).refresh_activation().await {
                Ok(0) => {}
                Ok(changed) => {
                    tracing::info!("Activation sweep updated {} AFK windows", changed);
                }
                Err(e) => {
                    tracing::error!("Error running AFK activation sweep: {}", e);
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("AFK activation sweep scheduler started");

    Ok(())
}
