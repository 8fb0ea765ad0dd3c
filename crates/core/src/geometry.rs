/// Matrix width in pixels.
pub const MATRIX_WIDTH: u8 = 13;

/// Matrix height in pixels.
pub const MATRIX_HEIGHT: u8 = 8;

/// Highest per-pixel shade the matrix can show (3-bit grayscale).
pub const MAX_SHADE: u8 = 7;

/// Samples retained per metric.
pub const HISTORY_LEN: usize = 60;

/// Fixed resolution and grayscale depth of one LED matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixGeometry {
    pub width: u8,
    pub height: u8,
    /// Brightest shade; `0` is treated as `1` so scaling never divides by zero.
    pub max_shade: u8,
}

impl Default for MatrixGeometry {
    fn default() -> Self {
        Self {
            width: MATRIX_WIDTH,
            height: MATRIX_HEIGHT,
            max_shade: MAX_SHADE,
        }
    }
}

impl MatrixGeometry {
    pub fn new(width: u8, height: u8, max_shade: u8) -> Self {
        Self {
            width,
            height,
            max_shade: max_shade.max(1),
        }
    }

    /// Number of pixels in one frame.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    #[must_use]
    pub fn contains(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_thirteen_by_eight() {
        let g = MatrixGeometry::default();
        assert_eq!((g.width, g.height, g.max_shade), (13, 8, 7));
        assert_eq!(g.pixel_count(), 104);
    }

    #[test]
    fn zero_max_shade_is_raised() {
        assert_eq!(MatrixGeometry::new(4, 4, 0).max_shade, 1);
    }

    #[test]
    fn contains_checks_both_axes() {
        let g = MatrixGeometry::default();
        assert!(g.contains(12, 7));
        assert!(!g.contains(13, 0));
        assert!(!g.contains(0, 8));
    }
}
