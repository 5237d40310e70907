//! Background refresh worker.
//!
//! The worker:
//! - Runs every registered job once on startup (if configured)
//! - Sleeps until the next daily occurrence and runs them again
//! - Stops when its cancellation token fires
//!
//! Jobs run sequentially in registration order, so a job registered after
//! the price job always sees the fresh price.

use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::schedule::DailySchedule;

/// A unit of work the worker can trigger.
///
/// Implementations absorb their own failures; the return value only says
/// whether the run succeeded, for logging.
#[async_trait]
pub trait Refreshable: Send + Sync {
    /// Job name for logs
    fn name(&self) -> &str;

    /// Run once
    async fn run(&self) -> bool;
}

/// When the worker fires
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    /// Whether the daily schedule is active
    pub enabled: bool,
    /// Run every job immediately on start
    pub run_on_startup: bool,
    /// Local time of the daily run
    pub schedule: DailySchedule,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            run_on_startup: true,
            schedule: DailySchedule::default(),
        }
    }
}

/// Runs [`Refreshable`] jobs on startup and daily
pub struct RefreshWorker {
    jobs: Vec<Arc<dyn Refreshable>>,
    settings: WorkerSettings,
}

impl RefreshWorker {
    pub fn new(settings: WorkerSettings) -> Self {
        Self {
            jobs: Vec::new(),
            settings,
        }
    }

    /// Append a job; jobs run in the order they were added
    pub fn with_job(mut self, job: Arc<dyn Refreshable>) -> Self {
        self.jobs.push(job);
        self
    }

    pub fn settings(&self) -> &WorkerSettings {
        &self.settings
    }

    pub fn job_names(&self) -> Vec<&str> {
        self.jobs.iter().map(|j| j.name()).collect()
    }

    /// Run every job once, in order. Returns the number that succeeded.
    pub async fn run_once(&self) -> usize {
        let mut succeeded = 0;
        for job in &self.jobs {
            debug!(job = job.name(), "Running refresh job");
            if job.run().await {
                succeeded += 1;
            } else {
                warn!(job = job.name(), "Refresh job reported failure");
            }
        }
        info!(succeeded, total = self.jobs.len(), "Refresh cycle complete");
        succeeded
    }

    /// Run until `shutdown` is cancelled
    pub async fn run(&self, shutdown: CancellationToken) {
        info!(
            jobs = ?self.job_names(),
            enabled = self.settings.enabled,
            run_on_startup = self.settings.run_on_startup,
            daily_at = %self.settings.schedule,
            "Starting refresh worker"
        );

        if self.settings.run_on_startup {
            info!("Running initial refresh cycle...");
            tokio::select! {
                _ = self.run_once() => {}
                _ = shutdown.cancelled() => {
                    info!("Refresh worker cancelled during startup cycle");
                    return;
                }
            }
        }

        if !self.settings.enabled {
            info!("Daily refresh disabled - worker stopping after startup cycle");
            return;
        }

        loop {
            let now = Local::now();
            let next = self.settings.schedule.next_occurrence(&now);
            let wait = self.settings.schedule.duration_until(&now);
            info!(next_run = %next.to_rfc3339(), "Next scheduled refresh");

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    self.run_once().await;
                }
                _ = shutdown.cancelled() => {
                    info!("Refresh worker shutting down");
                    return;
                }
            }
        }
    }

    /// Spawn [`run`](Self::run) onto the runtime
    pub fn spawn(self, shutdown: CancellationToken) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }
}
