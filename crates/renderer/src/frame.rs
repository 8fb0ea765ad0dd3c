use sysmatrix_core::MatrixGeometry;

/// Row-major grid of final per-pixel brightness values.
///
/// Row 0 is the top of the matrix; the bottom row is `height - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u8,
    height: u8,
    cells: Vec<u8>,
}

impl Frame {
    /// All-dark frame sized for `geometry`.
    pub fn new(geometry: MatrixGeometry) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
            cells: vec![0; geometry.pixel_count()],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Brightness at `(x, y)`, `None` outside the frame.
    pub fn get(&self, x: u8, y: u8) -> Option<u8> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Raw store without clipping or scaling. Returns `false` out of bounds.
    pub(crate) fn put(&mut self, x: u8, y: u8, value: u8) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// One row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(usize::from(self.width.max(1)))
    }

    /// Number of non-dark pixels.
    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c > 0).count()
    }

    fn index(&self, x: u8, y: u8) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_is_dark() {
        let frame = Frame::new(MatrixGeometry::default());
        assert_eq!(frame.as_slice().len(), 104);
        assert_eq!(frame.lit_count(), 0);
        assert_eq!(frame.rows().count(), 8);
    }

    #[test]
    fn put_is_bounds_checked() {
        let mut frame = Frame::new(MatrixGeometry::default());
        assert!(frame.put(12, 7, 3));
        assert!(!frame.put(13, 0, 3));
        assert_eq!(frame.get(12, 7), Some(3));
        assert_eq!(frame.get(0, 8), None);
        assert_eq!(frame.as_slice()[7 * 13 + 12], 3);
    }
}
