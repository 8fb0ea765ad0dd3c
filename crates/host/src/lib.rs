//! Desktop host for the metrics matrix.
//!
//! Owns the display loop and wires together its inputs:
//! - stats from the local sampler, or from an agent over the Unix-socket link
//! - config file watcher (live brightness / metric changes)
//! - rotation timer for cycling the graphed metric
//! - Ctrl-C for a clean shutdown

pub mod selector;
pub mod terminal;

pub use selector::MetricSelector;
pub use terminal::TerminalMatrix;

use std::io::Stdout;
use std::path::PathBuf;
use std::time::Duration;
use sysmatrix_config::{load as load_config, ConfigWatcher, MatrixConfig};
use sysmatrix_core::{Result, SystemStats};
use sysmatrix_link::StatsListener;
use sysmatrix_renderer::{DisplaySettings, DrawOutcome, StdDelay, SystemDisplay};
use sysmatrix_system::{spawn_monitor, MonitorSettings};
use sysmatrix_theme::Palette;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval};
use tracing::{debug, info, warn};

/// How often the rotation timer is advanced.
const ROTATION_TICK: Duration = Duration::from_secs(1);

pub type TerminalDisplay = SystemDisplay<TerminalMatrix<Stdout>, StdDelay>;

/// Translate the config file into façade settings.
pub fn display_settings(config: &MatrixConfig) -> DisplaySettings {
    DisplaySettings {
        geometry:       config.display.geometry(),
        history_len:    config.display.history_len,
        baseline:       config.display.baseline,
        grayscale_bits: config.display.grayscale_bits,
        settle_ms:      config.startup.settle_ms,
        frame_delay_ms: config.startup.frame_delay_ms,
    }
}

/// Rotation timer whose first tick lands one full [`ROTATION_TICK`] after
/// start, so every tick credited to the selector is real elapsed time.
fn rotation_timer() -> Interval {
    time::interval_at(Instant::now() + ROTATION_TICK, ROTATION_TICK)
}

/// Build a display drawing to stdout, with the configured brightness applied.
pub fn terminal_display(config: &MatrixConfig) -> TerminalDisplay {
    let settings = display_settings(config);
    let palette = Palette::from_config(&config.theme, settings.geometry.max_shade);
    let mut display =
        SystemDisplay::new(TerminalMatrix::new(std::io::stdout(), palette), StdDelay, settings);
    display.set_brightness(config.display.brightness);
    display
}

/// Run the display loop until Ctrl-C.
///
/// `display` should already be initialised; frames are dropped until it is.
pub async fn run(
    mut display: TerminalDisplay,
    config: MatrixConfig,
    config_path: PathBuf,
) -> Result<()> {
    let mut stats_rx = stats_source(&config)?;
    let (_watcher, mut reload_rx) = ConfigWatcher::spawn(&config_path);
    let mut selector = MetricSelector::new(config.metric.selected, config.metric.rotate_secs);
    let mut rotation = rotation_timer();
    let geometry = display.geometry();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(metric = selector.current().label(), "display loop started");

    loop {
        tokio::select! {
            stats = stats_rx.recv() => {
                let Some(stats) = stats else {
                    warn!("stats source closed; stopping");
                    break;
                };
                let outcome = display.apply_stats(&stats, selector.current());
                if outcome != DrawOutcome::Drawn {
                    debug!(?outcome, "frame not drawn");
                }
            }
            _ = rotation.tick() => {
                if selector.tick(ROTATION_TICK) {
                    info!(metric = selector.current().label(), "switching metric");
                    display.render_metric(selector.current());
                }
            }
            Some(()) = reload_rx.recv() => {
                match load_config(&config_path) {
                    Ok(cfg) => {
                        let applied = display.set_brightness(cfg.display.brightness);
                        selector.set(cfg.metric.selected);
                        selector.set_rotation(cfg.metric.rotate_secs);
                        if cfg.display.geometry() != geometry {
                            warn!("matrix geometry changed; restart to apply");
                        }
                        info!(brightness = applied, metric = selector.current().label(), "config reloaded");
                        display.render_metric(selector.current());
                    }
                    Err(e) => warn!("Config reload failed: {e}"),
                }
            }
            _ = &mut shutdown => {
                info!("shutting down");
                break;
            }
        }
    }

    display.driver_mut().finish();
    Ok(())
}

/// Agent link when a socket is configured, otherwise the in-process sampler.
fn stats_source(config: &MatrixConfig) -> Result<mpsc::Receiver<SystemStats>> {
    match &config.link.socket {
        Some(socket) => Ok(StatsListener::bind(socket)?.spawn()),
        None => {
            info!("sampling locally every {} ms", config.sampler.interval_ms);
            Ok(spawn_monitor(MonitorSettings::from_config(&config.sampler)))
        }
    }
}
