//! Periodic maintenance jobs

use anyhow::Result;
use auth::AuthService;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::info;

/// Start the expired-session sweep on `schedule`.
///
/// The returned scheduler keeps running while it is held.
pub async fn start_session_sweep(auth: AuthService, schedule: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_, _| {
        let auth = auth.clone();
        Box::pin(async move {
            info!("Session sweep job executed");
            auth.clean_expired_sessions().await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Started session sweep with schedule: {}", schedule);
    Ok(scheduler)
}
