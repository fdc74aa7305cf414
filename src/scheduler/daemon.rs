//! Scheduler loop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;

use crate::dispatch::Dispatcher;

use super::jobs::JobRegistry;

/// Poll granularity; the reference schedule has minute resolution.
const TICK: Duration = Duration::from_secs(5);

/// Run the scheduler until the process exits.
///
/// Each due job is spawned as its own task, so a slow handler can overlap a
/// later firing of the same job and never blocks another job's trigger.
pub async fn run_scheduler(dispatcher: Arc<Dispatcher>, mut registry: JobRegistry) {
    tracing::info!("Scheduler started with {} jobs", registry.len());

    loop {
        let now = Utc::now();
        for job in registry.take_due(now) {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                tracing::debug!("Firing scheduled job '{}'", job.id());
                guard(job.id(), || dispatcher.run_job(job)).await;
            });
        }
        sleep(TICK).await;
    }
}

/// The firing boundary: a handler failure is logged and goes no further, so
/// the job's future occurrences and every other job stay unaffected.
pub(crate) async fn guard<F, Fut>(id: &str, handler: F)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = crate::error::Result<()>>,
{
    if let Err(e) = handler().await {
        tracing::error!("Scheduled job '{}' failed: {}", id, e);
    }
}
