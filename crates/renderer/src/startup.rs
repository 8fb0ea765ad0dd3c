use crate::driver::{Delay, MatrixDriver};
use crate::renderer::FrameRenderer;

/// Fill the matrix from the right edge, one more column per frame.
///
/// Draws `width` frames with `frame_delay_ms` after each; the last frame has
/// every pixel lit. Returns the number of frames drawn.
pub fn run_fill_animation<D, T>(
    renderer: &mut FrameRenderer,
    driver: &mut D,
    delay: &mut T,
    frame_delay_ms: u64,
) -> usize
where
    D: MatrixDriver + ?Sized,
    T: Delay + ?Sized,
{
    let width = renderer.geometry().width;
    for step in 0..width {
        driver.draw(renderer.fill_right_columns(step + 1));
        delay.delay_ms(frame_delay_ms);
    }
    usize::from(width)
}
