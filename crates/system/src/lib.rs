pub mod sampler;
pub mod throttle;

pub use sampler::SystemMonitor;
pub use throttle::LogThrottle;

use std::path::PathBuf;
use std::time::Duration;
use sysmatrix_config::SamplerConfig;
use sysmatrix_core::SystemStats;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

/// How the background monitor samples.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub interval: Duration,
    pub disk_path: PathBuf,
    pub log_interval: Duration,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(200),
            disk_path: PathBuf::from("/"),
            log_interval: Duration::from_secs(5),
        }
    }
}

impl MonitorSettings {
    /// Settings for the `[sampler]` config table. A zero interval is raised to 1 ms.
    pub fn from_config(sampler: &SamplerConfig) -> Self {
        Self {
            interval:     Duration::from_millis(sampler.interval_ms.max(1)),
            disk_path:    sampler.disk_path.clone(),
            log_interval: Duration::from_secs(sampler.log_interval_secs),
        }
    }
}

/// Spawn a background Tokio task that samples system stats every
/// `settings.interval` and forwards [`SystemStats`] through the returned channel.
///
/// The task stops automatically when the receiver is dropped.
pub fn spawn_monitor(settings: MonitorSettings) -> mpsc::Receiver<SystemStats> {
    let (tx, rx) = mpsc::channel(4);

    tokio::spawn(async move {
        let mut monitor = SystemMonitor::new(settings.disk_path, settings.log_interval);
        let mut ticker = time::interval(settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let stats = monitor.sample();

            if tx.send(stats).await.is_err() {
                break; // all receivers dropped
            }
        }
    });

    rx
}
