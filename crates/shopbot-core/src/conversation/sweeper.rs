//! Background expiry sweep for stale conversations.
//!
//! Replaces request-coupled cleanup with a fixed-interval tokio task. An
//! atomic flag skips a tick while a previous sweep is still in flight, so
//! overlapping sweeps cannot double-delete.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::conversation::repository::ConversationRepository;
use crate::conversation::service::ConversationService;

/// Periodic deleter of conversations past their retention window.
pub struct ExpirySweeper<R: ConversationRepository> {
    service: Arc<ConversationService<R>>,
    interval: Duration,
    retention_days: i64,
    running: AtomicBool,
}

impl<R: ConversationRepository + 'static> ExpirySweeper<R> {
    pub fn new(
        service: Arc<ConversationService<R>>,
        interval: Duration,
        retention_days: i64,
    ) -> Self {
        Self {
            service,
            interval,
            retention_days,
            running: AtomicBool::new(false),
        }
    }

    /// Run one sweep unless another is already in flight.
    ///
    /// Returns `None` when skipped, otherwise the number of conversations
    /// deleted (zero on a sweep that found nothing, and on storage errors,
    /// which are logged and absorbed -- the next tick retries).
    pub async fn try_sweep(&self) -> Option<u64> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Expiry sweep already running, skipping tick");
            return None;
        }

        let result = self
            .service
            .expire_older_than(Some(self.retention_days))
            .await;
        self.running.store(false, Ordering::Release);

        match result {
            Ok(deleted) => Some(deleted),
            Err(e) => {
                error!(error = %e, "Expiry sweep failed");
                Some(0)
            }
        }
    }

    /// Spawn the sweep loop on the runtime. Ticks forever; drop the handle's
    /// task (or abort it) to stop.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            retention_days = self.retention_days,
            "Expiry sweeper started"
        );
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick fires immediately; sweep on startup is harmless.
            loop {
                ticker.tick().await;
                self.try_sweep().await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatbot::test_support::CountingConversations;

    fn sweeper(repo: CountingConversations) -> ExpirySweeper<CountingConversations> {
        ExpirySweeper::new(
            Arc::new(ConversationService::new(repo)),
            Duration::from_secs(3600),
            1,
        )
    }

    #[tokio::test]
    async fn test_sweep_reports_deleted_count() {
        let sweeper = sweeper(CountingConversations::deleting(3));
        assert_eq!(sweeper.try_sweep().await, Some(3));
    }

    #[tokio::test]
    async fn test_overlapping_sweep_is_skipped() {
        let sweeper = sweeper(CountingConversations::deleting(0));
        sweeper.running.store(true, Ordering::Release);
        assert_eq!(sweeper.try_sweep().await, None);

        // Once the in-flight sweep clears the flag, ticks resume.
        sweeper.running.store(false, Ordering::Release);
        assert_eq!(sweeper.try_sweep().await, Some(0));
    }

    #[tokio::test]
    async fn test_sweep_absorbs_storage_errors() {
        let sweeper = sweeper(CountingConversations::failing());
        assert_eq!(sweeper.try_sweep().await, Some(0));
        // The guard is released even after a failure.
        assert_eq!(sweeper.try_sweep().await, Some(0));
    }
}
