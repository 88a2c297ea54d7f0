//! Cleanup Worker
//!
//! Background task that periodically evicts notifications older than the
//! configured cool-off duration. The first sweep runs one interval after
//! start. The task runs until its cancellation token fires.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::application::config::NotifyConfig;
use crate::domain::entities::EvictionReport;
use crate::domain::repository::NotificationRepository;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Periodic eviction of expired notifications
pub struct CleanupWorker<R>
where
    R: NotificationRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    cool_off: Duration,
    interval: Duration,
}

impl<R> CleanupWorker<R>
where
    R: NotificationRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: &NotifyConfig) -> Self {
        Self {
            repo,
            cool_off: config.cool_off,
            interval: config.cleanup_interval.max(MIN_INTERVAL),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_INTERVAL);
        self
    }

    /// Run a single eviction sweep
    pub async fn sweep(&self) -> EvictionReport {
        let report = self.repo.evict_older_than(self.cool_off).await;

        if report.evicted > 0 || report.skipped > 0 {
            tracing::info!(
                endpoints = report.endpoints,
                evicted = report.evicted,
                skipped = report.skipped,
                retained = report.retained,
                "Notification cleanup completed"
            );
        } else {
            tracing::debug!(
                endpoints = report.endpoints,
                retained = report.retained,
                "Notification cleanup found nothing to evict"
            );
        }

        report
    }

    /// Sweep on every tick until `shutdown` is cancelled
    pub async fn run(self, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            cool_off_secs = self.cool_off.as_secs(),
            "Notification cleanup worker started"
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    self.sweep().await;
                }
            }
        }

        tracing::info!("Notification cleanup worker stopped");
    }

    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
