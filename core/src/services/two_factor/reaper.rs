//! Background reaper for expired verification state
//!
//! Inline sweeps already keep reads correct; the reaper only bounds memory
//! held by codes and rate-limit entries nobody touches again.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::errors::DomainResult;

use super::types::SweepReport;

/// Anything that can purge its own expired state
pub trait Sweeper: Send + Sync + 'static {
    fn sweep(&self) -> DomainResult<SweepReport>;
}

/// Periodic sweep task
pub struct ExpiryReaper;

impl ExpiryReaper {
    /// Spawns the sweep loop; the first sweep runs immediately
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S: Sweeper>(sweeper: Arc<S>, interval: Duration) -> ReaperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!(
                interval_seconds = interval.as_secs(),
                "Verification code reaper started"
            );

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match sweeper.sweep() {
                            Ok(report) if report.total_removed() > 0 => {
                                info!(
                                    codes_removed = report.codes_removed,
                                    rate_limits_removed = report.rate_limits_removed,
                                    idle_locks_pruned = report.idle_locks_pruned,
                                    event = "sweep_completed",
                                    "Swept expired verification state"
                                );
                            }
                            Ok(_) => debug!("Sweep found nothing to remove"),
                            Err(e) => error!(error = %e, "Verification code sweep failed"),
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Verification code reaper stopped");
        });

        ReaperHandle {
            shutdown_tx,
            task: Some(task),
        }
    }
}

/// Owner of a running reaper; dropping it also stops the loop
pub struct ReaperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl ReaperHandle {
    /// Signals the loop to stop and waits for it to finish
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!(error = %e, "Reaper task ended abnormally");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for ReaperHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}
