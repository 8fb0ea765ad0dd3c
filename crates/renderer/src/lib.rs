//! Frame construction and the display façade for the metrics matrix.
//!
//! - [`Frame`]: one width×height grid of brightness values
//! - [`FrameRenderer`]: brightness scaling and bar-graph drawing into a reused frame
//! - [`MatrixDriver`] / [`Delay`]: the hardware capabilities the façade is given
//! - [`SystemDisplay`]: per-metric history, readiness gating and rendering

pub mod display;
pub mod driver;
pub mod frame;
pub mod renderer;
pub mod startup;

pub use display::{DisplaySettings, DrawOutcome, SystemDisplay};
pub use driver::{Delay, MatrixDriver, NoDelay, StdDelay};
pub use frame::Frame;
pub use renderer::FrameRenderer;
