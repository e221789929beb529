//! Periodic refresh scheduling
//!
//! A [`RefreshScheduler`] runs an async tick on a tokio task: once after an
//! initial delay, then every period. Ticks never overlap: a tick that runs
//! longer than the period causes the missed ticks to be skipped rather than
//! fired back to back.
//!
//! ```text
//! spawn ──initial_delay──▶ tick ──period──▶ tick ──period──▶ tick ...
//!                                                   │
//!                                    handle.cancel() / drop(handle)
//!                                                   ▼
//!                                                 stopped
//! ```
//!
//! Each tick is independent; the scheduler never looks at what a tick did.

use std::future::Future;
use std::time::Duration;

use predix_core::constants::time::{DEFAULT_REFRESH_INTERVAL_MS, INITIAL_REFRESH_DELAY_MS};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::ConnectorError;

/// Scheduler timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Time between ticks
    pub period: Duration,
    /// Time before the first tick
    pub initial_delay: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(DEFAULT_REFRESH_INTERVAL_MS),
            initial_delay: Duration::from_millis(INITIAL_REFRESH_DELAY_MS),
        }
    }
}

impl SchedulerConfig {
    /// Create a config with the given period and the default initial delay
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    /// Set the delay before the first tick
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }
}

/// Spawns the refresh loop
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshScheduler {
    config: SchedulerConfig,
}

impl RefreshScheduler {
    /// Create a scheduler
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Timing in use
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Start the loop on the current tokio runtime
    ///
    /// `tick` is called once per period and its future awaited before the
    /// next tick is considered.
    pub fn spawn<F, Fut>(&self, mut tick: F) -> Result<RefreshHandle, ConnectorError>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.config.period.is_zero() {
            return Err(ConnectorError::ConfigError("refresh period must be non-zero".into()));
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| ConnectorError::NoRuntime(e.to_string()))?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let config = self.config;

        let task = runtime.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + config.initial_delay, config.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut ticks = 0u64;

            log::info!(
                "refresh scheduler started: first tick in {:?}, then every {:?}",
                config.initial_delay,
                config.period
            );

            loop {
                tokio::select! {
                    // A dropped handle closes the channel and stops the loop too
                    _ = &mut shutdown_rx => break,
                    _ = interval.tick() => {
                        ticks += 1;
                        log::debug!("refresh tick {}", ticks);
                        tick().await;
                    }
                }
            }

            log::info!("refresh scheduler stopped after {} ticks", ticks);
            ticks
        });

        Ok(RefreshHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }
}

/// Handle to a running refresh loop
///
/// Dropping the handle stops the loop at its next wake-up.
#[derive(Debug)]
pub struct RefreshHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<u64>>,
}

impl RefreshHandle {
    /// Stop the loop and wait for it to finish; returns the number of ticks run
    ///
    /// A tick already in progress completes first.
    pub async fn cancel(mut self) -> u64 {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        match self.task.take() {
            Some(task) => task.await.unwrap_or_else(|e| {
                log::warn!("refresh task ended abnormally: {}", e);
                0
            }),
            None => 0,
        }
    }

    /// Whether the loop has already exited
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}
