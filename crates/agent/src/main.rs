//! sysmatrix-agent — samples this machine and streams stats to a display.
//!
//! Run with:  `RUST_LOG=info sysmatrix-agent`

use anyhow::{bail, Result};
use std::time::{Duration, Instant};
use sysmatrix_core::MatrixError;
use sysmatrix_link::StatsSender;
use sysmatrix_system::{spawn_monitor, LogThrottle, MonitorSettings};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Minimum gap between repeated send-failure log lines.
const FAILURE_LOG_INTERVAL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("sysmatrix-agent v{} starting", env!("CARGO_PKG_VERSION"));

    let config = sysmatrix_config::load(sysmatrix_config::default_path())?;
    let Some(socket) = config.link.socket.clone() else {
        bail!("link.socket is not set; the agent has no display to send to");
    };

    let mut stats_rx = spawn_monitor(MonitorSettings::from_config(&config.sampler));
    let mut sender = StatsSender::new(&socket, Duration::from_millis(config.link.timeout_ms));
    let mut failures = LogThrottle::new(FAILURE_LOG_INTERVAL);

    info!("Sending stats to {}", socket.display());

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            stats = stats_rx.recv() => {
                let Some(stats) = stats else { break };
                let was_connected = sender.is_connected();

                match sender.send(stats).await {
                    Ok(()) if !was_connected => info!("Connected to display"),
                    Ok(()) => {}
                    Err(e) if !failures.should_log(Instant::now()) => debug!("send failed: {e}"),
                    // Display hung or busy; keep sampling.
                    Err(MatrixError::Timeout(what)) => {
                        warn!("Stats send timed out ({what}); display may be unresponsive");
                    }
                    Err(e) => error!("Stats send failed: {e}"),
                }
            }
            _ = &mut shutdown => {
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
