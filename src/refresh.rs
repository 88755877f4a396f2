//! Midnight refresh
//!
//! Spawns a background task that sleeps until the next local midnight,
//! re-resolves the day's quote, pushes it through the bridge, and schedules
//! itself for the following midnight.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::bridge::QuoteBridge;
use crate::clock::{duration_until_next_midnight, Clock};

/// Configuration for the midnight refresh
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Whether the refresh task runs at all
    pub enabled: bool,
    /// Lower bound on the wait between refreshes
    pub min_interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_interval: Duration::from_secs(1),
        }
    }
}

/// Handle for controlling the midnight refresh task
pub struct RefreshHandle {
    /// Flag to signal shutdown
    shutdown_tx: mpsc::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Spawns the refresh task
    ///
    /// # Arguments
    /// * `bridge` - Where refreshed quotes are published
    /// * `clock` - Source of local time used to find the next midnight
    /// * `config` - Refresh settings
    pub fn spawn(bridge: QuoteBridge, clock: Arc<dyn Clock>, config: RefreshConfig) -> Self {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let task = config.enabled.then(|| {
            tokio::spawn(async move {
                loop {
                    let wait = duration_until_next_midnight(clock.now()).max(config.min_interval);
                    info!("next quote refresh in {}s", wait.as_secs());

                    tokio::select! {
                        _ = tokio::time::sleep(wait) => {
                            let quote = bridge.show_today().await;
                            info!("midnight refresh: {}", quote);
                        }
                        _ = shutdown_rx.recv() => {
                            break;
                        }
                    }
                }
            })
        });

        Self { shutdown_tx, task }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the refresh task and waits for it to exit
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}
