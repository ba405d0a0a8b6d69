//! Core types shared across the folio crates.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// The pages the view host can switch between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    About,
    Projects,
    Skill,
    Contact,
}

impl Page {
    /// All pages in navigation order.
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::About,
        Page::Projects,
        Page::Skill,
        Page::Contact,
    ];

    /// Label shown in the navigation bar.
    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Projects => "Projects",
            Page::Skill => "Skill",
            Page::Contact => "Contact",
        }
    }

    /// Lowercase identifier used in configuration and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Projects => "projects",
            Page::Skill => "skill",
            Page::Contact => "contact",
        }
    }

    /// Position of the page in [`Page::ALL`].
    pub fn index(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// Page for a 1-based navigation shortcut digit.
    pub fn from_shortcut(digit: char) -> Option<Self> {
        let n = digit.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Page::ALL.get(i).copied())
    }

    /// Next page, wrapping around.
    pub fn next(self) -> Self {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    /// Previous page, wrapping around.
    pub fn prev(self) -> Self {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when a page identifier is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page '{0}' (expected one of: home, about, projects, skill, contact)")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Page::ALL
            .into_iter()
            .find(|p| p.id() == wanted)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// Size of the drawable viewport in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a viewport; zero dimensions are raised to one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Viewport covering a terminal grid of `cols` x `rows` cells.
    pub fn from_cells(cols: u16, rows: u16, cell: CellSize) -> Self {
        Self::new(
            u32::from(cols) * u32::from(cell.width),
            u32::from(rows) * u32::from(cell.height),
        )
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Center point in pixels.
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// Pixel dimensions of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

impl CellSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Pixel position of the center of the cell at (`col`, `row`).
    pub fn cell_center(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (f32::from(col) + 0.5) * f32::from(self.width),
            (f32::from(row) + 0.5) * f32::from(self.height),
        )
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

/// Accent color used by the UI and the particle background.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentTheme {
    #[default]
    Purple,
    Indigo,
    Cyan,
    Rose,
    Emerald,
}

impl AccentTheme {
    /// RGB components of the accent.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            AccentTheme::Purple => (0x93, 0x33, 0xea),
            AccentTheme::Indigo => (0x63, 0x66, 0xf1),
            AccentTheme::Cyan => (0x06, 0xb6, 0xd4),
            AccentTheme::Rose => (0xf4, 0x3f, 0x5e),
            AccentTheme::Emerald => (0x10, 0xb9, 0x81),
        }
    }

    /// Accent as a ratatui color.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }

    /// Cycle to the next accent.
    pub fn next(self) -> Self {
        match self {
            AccentTheme::Purple => AccentTheme::Indigo,
            AccentTheme::Indigo => AccentTheme::Cyan,
            AccentTheme::Cyan => AccentTheme::Rose,
            AccentTheme::Rose => AccentTheme::Emerald,
            AccentTheme::Emerald => AccentTheme::Purple,
        }
    }
}
