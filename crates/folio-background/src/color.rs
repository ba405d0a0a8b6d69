//! Color utilities for the point-cloud background.

use ratatui::style::Color;

/// Color capability of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    TrueColor,
    Ansi256,
}

impl ColorDepth {
    /// Detect from the value of `COLORTERM`.
    pub fn detect(colorterm: Option<&str>) -> Self {
        match colorterm.map(str::to_ascii_lowercase).as_deref() {
            Some("truecolor" | "24bit") => ColorDepth::TrueColor,
            _ => ColorDepth::Ansi256,
        }
    }
}

/// Scale `rgb` by `intensity`, saturating each channel (additive blending).
pub fn blend_additive(rgb: (u8, u8, u8), intensity: f32) -> (u8, u8, u8) {
    let scale = |c: u8| (f32::from(c) * intensity.max(0.0)).min(255.0) as u8;
    (scale(rgb.0), scale(rgb.1), scale(rgb.2))
}

/// Convert RGB to a terminal color for the given depth.
pub fn to_terminal_color(rgb: (u8, u8, u8), depth: ColorDepth) -> Color {
    match depth {
        ColorDepth::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
        ColorDepth::Ansi256 => Color::Indexed(ansi256_index(rgb)),
    }
}

/// Nearest entry of the 6x6x6 color cube in the 256-color palette.
fn ansi256_index(rgb: (u8, u8, u8)) -> u8 {
    let level = |c: u8| ((u16::from(c) * 5 + 127) / 255) as u8;
    16 + 36 * level(rgb.0) + 6 * level(rgb.1) + level(rgb.2)
}
