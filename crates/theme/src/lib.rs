pub mod colors;

pub use colors::Color;

use sysmatrix_config::ThemeConfig;

/// Maps matrix shades to terminal colours.
///
/// Invalid colour strings in the config fall back to the built-in defaults.
#[derive(Debug, Clone)]
pub struct Palette {
    pub lit:   Color,
    pub unlit: Color,
    max_shade: u8,
}

impl Palette {
    pub fn from_config(cfg: &ThemeConfig, max_shade: u8) -> Self {
        Self {
            lit:       Color::from_hex(&cfg.accent).unwrap_or(Color::ORANGE),
            unlit:     Color::from_hex(&cfg.background).unwrap_or(Color::GRAY),
            max_shade: max_shade.max(1),
        }
    }

    /// Colour of a pixel at `shade`; 0 is the unlit colour, `max_shade` the accent.
    pub fn shade(&self, shade: u8) -> Color {
        if shade == 0 {
            return self.unlit;
        }
        let t = f32::from(shade.min(self.max_shade)) / f32::from(self.max_shade);
        Color::BLACK.mix(self.lit, t)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default(), 7)
    }
}
