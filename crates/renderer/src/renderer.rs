use crate::frame::Frame;
use sysmatrix_core::{value_to_height, MatrixGeometry, MetricBuffer};

/// Builds brightness-scaled frames into a single reused [`Frame`].
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    geometry: MatrixGeometry,
    brightness: u8,
    frame: Frame,
}

impl FrameRenderer {
    /// Renderer at full brightness.
    pub fn new(geometry: MatrixGeometry) -> Self {
        Self {
            geometry,
            brightness: geometry.max_shade,
            frame: Frame::new(geometry),
        }
    }

    pub fn geometry(&self) -> MatrixGeometry {
        self.geometry
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Store a new global brightness, clipped to `max_shade`.
    ///
    /// Returns the level actually applied. Frames already drawn are unaffected.
    pub fn set_brightness(&mut self, level: u16) -> u8 {
        self.brightness = level.min(u16::from(self.geometry.max_shade)) as u8;
        self.brightness
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn clear_frame(&mut self) {
        self.frame.clear();
    }

    /// Write one brightness-scaled pixel.
    ///
    /// Out-of-bounds coordinates are ignored and return `false`.
    pub fn set_pixel(&mut self, x: u8, y: u8, shade: u8) -> bool {
        if !self.geometry.contains(x, y) {
            return false;
        }
        let value = scale_shade(shade, self.brightness, self.geometry.max_shade);
        self.frame.put(x, y, value)
    }

    /// Render one bar per column, growing up from the bottom row.
    ///
    /// Heights above the matrix height are clipped; columns past the matrix
    /// width are ignored and missing columns stay dark.
    pub fn draw_bar_graph(&mut self, heights: &[u8]) -> &Frame {
        self.clear_frame();
        let max_shade = self.geometry.max_shade;
        let rows = self.geometry.height;

        for (col, &h) in heights.iter().take(usize::from(self.geometry.width)).enumerate() {
            let col = col as u8;
            for row in 0..h.min(rows) {
                self.set_pixel(col, rows - 1 - row, max_shade);
            }
        }
        &self.frame
    }

    /// Light every pixel of the rightmost `columns` columns at full shade.
    pub fn fill_right_columns(&mut self, columns: u8) -> &Frame {
        self.clear_frame();
        let width = self.geometry.width;
        let max_shade = self.geometry.max_shade;

        for col in 0..columns.min(width) {
            let x = width - 1 - col;
            for y in 0..self.geometry.height {
                self.set_pixel(x, y, max_shade);
            }
        }
        &self.frame
    }

    /// Column heights for the matrix height, oldest sample leftmost.
    pub fn buffer_to_heights(&self, buffer: &MetricBuffer, width: usize) -> Vec<u8> {
        let mut heights = vec![0; width];
        buffer_to_heights_into(buffer, self.geometry.height, &mut heights);
        heights
    }
}

/// `round(shade * brightness / max_shade)` with `shade` clipped to `max_shade`.
#[must_use]
pub fn scale_shade(shade: u8, brightness: u8, max_shade: u8) -> u8 {
    let max_shade = u16::from(max_shade.max(1));
    let clipped = u16::from(shade).min(max_shade);
    let brightness = u16::from(brightness).min(max_shade);
    ((clipped * brightness + max_shade / 2) / max_shade) as u8
}

/// Fill `heights` so column `i` shows `buffer.get_recent(len - 1 - i)`.
///
/// The leftmost column is the oldest sample and the rightmost the newest,
/// which makes the graph scroll left as samples arrive.
pub fn buffer_to_heights_into(buffer: &MetricBuffer, display_height: u8, heights: &mut [u8]) {
    let width = heights.len();
    for (col, slot) in heights.iter_mut().enumerate() {
        *slot = value_to_height(buffer.get_recent(width - 1 - col), display_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn renderer() -> FrameRenderer {
        FrameRenderer::new(MatrixGeometry::default())
    }

    #[test]
    fn brightness_is_clipped() {
        let mut r = renderer();
        assert_eq!(r.set_brightness(999), 7);
        assert_eq!(r.set_brightness(u16::MAX), 7);
        assert_eq!(r.brightness(), 7);
        assert_eq!(r.set_brightness(3), 3);
    }

    #[test]
    fn set_pixel_out_of_bounds_is_ignored() {
        let mut r = renderer();
        assert!(!r.set_pixel(13, 0, 7));
        assert!(!r.set_pixel(0, 8, 7));
        assert_eq!(r.frame().lit_count(), 0);
    }

    #[test]
    fn set_pixel_scales_and_clips() {
        let mut r = renderer();
        r.set_brightness(4);
        assert!(r.set_pixel(0, 0, 7));
        assert_eq!(r.frame().get(0, 0), Some(4));
        // shade above max is clipped before scaling
        assert!(r.set_pixel(1, 0, 200));
        assert_eq!(r.frame().get(1, 0), Some(4));
        // 3 * 4 / 7 = 1.71 -> 2
        r.set_pixel(2, 0, 3);
        assert_eq!(r.frame().get(2, 0), Some(2));
    }

    #[test]
    fn bars_grow_from_bottom() {
        let mut r = renderer();
        let mut heights = [0u8; 13];
        heights[0] = 1;
        heights[1] = 3;
        heights[12] = 20;
        let frame = r.draw_bar_graph(&heights);

        assert_eq!(frame.get(0, 7), Some(7));
        assert_eq!(frame.get(0, 6), Some(0));
        assert_eq!(frame.get(1, 5), Some(7));
        assert_eq!(frame.get(1, 4), Some(0));
        assert!((0..8).all(|y| frame.get(12, y) == Some(7)));
        assert_eq!(frame.lit_count(), 1 + 3 + 8);
    }

    #[test]
    fn bar_graph_clears_previous_frame() {
        let mut r = renderer();
        r.draw_bar_graph(&[8; 13]);
        let frame = r.draw_bar_graph(&[1]);
        assert_eq!(frame.lit_count(), 1);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let mut r = renderer();
        let frame = r.draw_bar_graph(&[1; 20]);
        assert_eq!(frame.lit_count(), 13);
    }

    #[test]
    fn fill_right_columns_lights_from_the_right() {
        let mut r = renderer();
        let frame = r.fill_right_columns(2);
        assert_eq!(frame.lit_count(), 16);
        assert_eq!(frame.get(12, 0), Some(7));
        assert_eq!(frame.get(11, 7), Some(7));
        assert_eq!(frame.get(10, 0), Some(0));
        assert_eq!(r.fill_right_columns(99).lit_count(), 104);
    }

    #[test]
    fn heights_scroll_oldest_to_newest() {
        let r = renderer();
        let mut buf = MetricBuffer::new(13);
        for i in 1..=13 {
            buf.push(i as f32 * 7.5);
        }
        let heights = r.buffer_to_heights(&buf, 13);
        assert_eq!(heights.len(), 13);
        assert_eq!(heights[0], value_to_height(7.5, 8));
        assert_eq!(heights[12], value_to_height(97.5, 8));
        assert!(heights.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn saturated_buffer_fills_every_column() {
        let r = renderer();
        let mut buf = MetricBuffer::new(13);
        for _ in 0..13 {
            buf.push(100.0);
        }
        assert_eq!(r.buffer_to_heights(&buf, 13), vec![8; 13]);
    }

    #[test]
    fn short_history_repeats_oldest_on_the_left() {
        let r = renderer();
        let mut buf = MetricBuffer::new(60);
        buf.push(100.0);
        buf.push(50.0);
        let heights = r.buffer_to_heights(&buf, 13);
        assert_eq!(&heights[..12], &[8; 12]);
        assert_eq!(heights[12], 4);
    }

    proptest! {
        #[test]
        fn scaling_is_monotonic_in_brightness(shade in 0u8..=255, b in 0u8..7) {
            prop_assert!(scale_shade(shade, b, 7) <= scale_shade(shade, b + 1, 7));
        }

        #[test]
        fn scaling_endpoints(shade in 0u8..=255) {
            prop_assert_eq!(scale_shade(shade, 0, 7), 0);
            prop_assert_eq!(scale_shade(shade, 7, 7), shade.min(7));
        }
    }
}
