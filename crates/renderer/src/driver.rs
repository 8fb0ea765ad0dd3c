use crate::frame::Frame;
use std::time::Duration;

/// The LED matrix hardware as seen by the display façade.
///
/// Implementations handle their own transport; from the façade's side every
/// call succeeds.
pub trait MatrixDriver {
    /// Open a display session.
    fn begin(&mut self);

    /// Select the grayscale depth the hardware should use.
    fn set_grayscale_bits(&mut self, bits: u8);

    /// Blank the physical display.
    fn clear(&mut self);

    /// Show a complete frame.
    fn draw(&mut self, frame: &Frame);
}

/// Blocking delay used between startup animation frames.
pub trait Delay {
    fn delay_ms(&mut self, ms: u64);
}

/// Sleeps the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn delay_ms(&mut self, _ms: u64) {}
}
