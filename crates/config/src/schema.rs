use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use sysmatrix_core::geometry::{HISTORY_LEN, MATRIX_HEIGHT, MATRIX_WIDTH, MAX_SHADE};
use sysmatrix_core::{MatrixGeometry, MetricType};

/// Root configuration structure parsed from `sysmatrix.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Matrix geometry, brightness and history sizing.
    pub display: DisplayConfig,
    /// Startup animation pacing.
    pub startup: StartupConfig,
    /// Which metric is graphed.
    pub metric: MetricConfig,
    /// Local system sampling.
    pub sampler: SamplerConfig,
    /// Stats link between agent and display.
    pub link: LinkConfig,
    /// Terminal matrix colours.
    pub theme: ThemeConfig,
}

/// Matrix hardware and rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u8,
    pub height: u8,
    /// Brightest shade the hardware shows.
    pub max_shade: u8,
    pub grayscale_bits: u8,
    /// Global brightness, clipped to `max_shade` when applied.
    pub brightness: u16,
    /// Percentage pre-filled into every history at startup.
    pub baseline: f32,
    /// Samples kept per metric.
    pub history_len: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: MATRIX_WIDTH,
            height: MATRIX_HEIGHT,
            max_shade: MAX_SHADE,
            grayscale_bits: 3,
            brightness: u16::from(MAX_SHADE),
            baseline: 5.0,
            history_len: HISTORY_LEN,
        }
    }
}

impl DisplayConfig {
    pub fn geometry(&self) -> MatrixGeometry {
        MatrixGeometry::new(self.width, self.height, self.max_shade)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Pause after clearing the hardware.
    pub settle_ms: u64,
    /// Pause after each animation frame.
    pub frame_delay_ms: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            settle_ms: 100,
            frame_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricConfig {
    /// Metric shown at startup.
    pub selected: MetricType,
    /// Seconds between switching to the next metric; `0` disables rotation.
    pub rotate_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Poll period in milliseconds.
    pub interval_ms: u64,
    /// Path whose filesystem is reported as disk usage.
    pub disk_path: PathBuf,
    /// Minimum seconds between stats summary log lines.
    pub log_interval_secs: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 200,
            disk_path: PathBuf::from("/"),
            log_interval_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Unix socket the display listens on. Unset = sample in-process.
    pub socket: Option<PathBuf>,
    /// Per-send timeout for the agent.
    pub timeout_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            socket: None,
            timeout_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Colour of a fully lit pixel (hex, e.g. `"#ff5f1f"`).
    pub accent: String,
    /// Colour of an unlit pixel.
    pub background: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent:     "#ff5f1f".to_string(),
            background: "#303030".to_string(),
        }
    }
}
