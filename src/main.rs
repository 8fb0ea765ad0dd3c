//! sysmatrix — scrolling CPU / memory / disk graphs on a small LED matrix.
//!
//! Run with:  `RUST_LOG=info sysmatrix`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Frames go to stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("sysmatrix v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = sysmatrix_config::default_path();
    let config = sysmatrix_config::load(&config_path)?;

    // The startup animation blocks, so it runs before the event loop exists.
    let mut display = sysmatrix_host::terminal_display(&config);
    display.init();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(sysmatrix_host::run(display, config, config_path))
        .map_err(Into::into)
}
