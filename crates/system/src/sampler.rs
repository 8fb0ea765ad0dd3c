use crate::throttle::LogThrottle;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sysinfo::{Disks, System};
use sysmatrix_core::{MatrixError, Result, SystemStats};
use tracing::{error, info};

/// Reads CPU, memory and disk utilisation through `sysinfo`.
pub struct SystemMonitor {
    sys: System,
    disk_path: PathBuf,
    throttle: LogThrottle,
}

impl SystemMonitor {
    pub fn new(disk_path: impl Into<PathBuf>, log_interval: Duration) -> Self {
        Self {
            sys: System::new(),
            disk_path: disk_path.into(),
            throttle: LogThrottle::new(log_interval),
        }
    }

    /// Global CPU usage since the previous call (0 on the very first call).
    pub fn cpu_usage(&mut self) -> Result<f32> {
        self.sys.refresh_cpu_usage();
        if self.sys.cpus().is_empty() {
            return Err(MatrixError::System("no CPUs reported".into()));
        }
        Ok(self.sys.global_cpu_usage())
    }

    /// Used RAM as a percentage of total RAM.
    pub fn memory_usage(&mut self) -> Result<f32> {
        self.sys.refresh_memory();
        percent(self.sys.used_memory(), self.sys.total_memory())
            .ok_or_else(|| MatrixError::System("total memory reported as zero".into()))
    }

    /// Used space of the filesystem holding `disk_path`, as a percentage.
    pub fn disk_usage(&self) -> Result<f32> {
        let disks = Disks::new_with_refreshed_list();
        let mounts = disks
            .iter()
            .map(|d| (d.mount_point(), d.total_space(), d.available_space()));

        let (_, total, available) = best_mount(&self.disk_path, mounts).ok_or_else(|| {
            MatrixError::System(format!("no disk mounted at '{}'", self.disk_path.display()))
        })?;

        percent(total.saturating_sub(available), total).ok_or_else(|| {
            MatrixError::System(format!("disk at '{}' reports zero size", self.disk_path.display()))
        })
    }

    /// Sample every metric, rounded to one decimal.
    ///
    /// A metric that fails to read is logged and reported as 0.0 so the
    /// other metrics still go through.
    pub fn sample(&mut self) -> SystemStats {
        let cpu = self.cpu_usage();
        let memory = self.memory_usage();
        let disk = self.disk_usage();

        let stats = SystemStats {
            cpu: or_zero("CPU", cpu),
            memory: or_zero("memory", memory),
            disk: or_zero("disk", disk),
            network_rx: 0.0,
        };

        if self.throttle.should_log(Instant::now()) {
            info!(
                "[{}] CPU: {:.1}%, Memory: {:.1}%, Disk: {:.1}%",
                Local::now().format("%H:%M:%S"),
                stats.cpu,
                stats.memory,
                stats.disk,
            );
        }

        stats
    }
}

fn or_zero(label: &str, reading: Result<f32>) -> f32 {
    match reading {
        Ok(v) => round_tenth(v),
        Err(e) => {
            error!("Failed to get {label} usage: {e}");
            0.0
        }
    }
}

/// Round to one decimal place.
pub fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

fn percent(used: u64, total: u64) -> Option<f32> {
    (total > 0).then(|| (used as f64 / total as f64 * 100.0) as f32)
}

/// Pick the mount whose mount point is the longest prefix of `path`.
fn best_mount<'a, I>(path: &Path, mounts: I) -> Option<(&'a Path, u64, u64)>
where
    I: IntoIterator<Item = (&'a Path, u64, u64)>,
{
    mounts
        .into_iter()
        .filter(|(mount, _, _)| path.starts_with(mount))
        .max_by_key(|(mount, _, _)| mount.components().count())
}
