use std::io::Write;
use sysmatrix_renderer::{Frame, MatrixDriver};
use sysmatrix_theme::Palette;
use tracing::{debug, warn};

const CLEAR_SCREEN: &str = "\x1b[2J";
const CURSOR_HOME: &str = "\x1b[H";
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const RESET: &str = "\x1b[0m";

const LIT_CELL: &str = "██";
const UNLIT_CELL: &str = "· ";

/// Draws matrix frames as coloured blocks on an ANSI terminal.
///
/// Stands in for the LED hardware on a desktop host. Each frame is redrawn
/// in place from the top-left corner.
pub struct TerminalMatrix<W: Write> {
    out: W,
    palette: Palette,
    grayscale_bits: u8,
    started: bool,
}

impl<W: Write> TerminalMatrix<W> {
    pub fn new(out: W, palette: Palette) -> Self {
        Self {
            out,
            palette,
            grayscale_bits: 0,
            started: false,
        }
    }

    pub fn grayscale_bits(&self) -> u8 {
        self.grayscale_bits
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Escape sequence + glyphs for one frame.
    pub fn render(&self, frame: &Frame) -> String {
        let mut text = String::from(CURSOR_HOME);
        for row in frame.rows() {
            for &shade in row {
                let glyph = if shade == 0 { UNLIT_CELL } else { LIT_CELL };
                text.push_str(&self.palette.shade(shade).ansi_fg());
                text.push_str(glyph);
            }
            text.push_str(RESET);
            text.push('\n');
        }
        text
    }

    /// Restore the cursor. Call once on shutdown.
    pub fn finish(&mut self) {
        if self.started {
            self.emit(&format!("{RESET}{SHOW_CURSOR}\n"));
            self.started = false;
        }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            warn!("terminal write failed: {e}");
        }
    }
}

impl<W: Write> MatrixDriver for TerminalMatrix<W> {
    fn begin(&mut self) {
        self.started = true;
        self.emit(&format!("{CLEAR_SCREEN}{HIDE_CURSOR}"));
    }

    fn set_grayscale_bits(&mut self, bits: u8) {
        debug!(bits, "grayscale depth");
        self.grayscale_bits = bits;
    }

    fn clear(&mut self) {
        self.emit(&format!("{CLEAR_SCREEN}{CURSOR_HOME}"));
    }

    fn draw(&mut self, frame: &Frame) {
        let text = self.render(frame);
        self.emit(&text);
    }
}
