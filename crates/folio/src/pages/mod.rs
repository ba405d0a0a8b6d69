//! Page views and their interactive state.

pub mod about;
pub mod contact;
pub mod home;
pub mod projects;
pub mod skill;

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Stylize},
    text::Line,
};

/// Centered heading line in the accent color.
fn heading(text: &str, accent: Color) -> Line<'_> {
    Line::from(text.bold().fg(accent)).centered()
}

/// Index of the first rect containing (`col`, `row`).
fn hit_index(rects: &[Rect], col: u16, row: u16) -> Option<usize> {
    let pos = Position::new(col, row);
    rects.iter().position(|r| r.contains(pos))
}

/// A rect of `percent_x` by `percent_y` of `area`, centered in it.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = percent_of(area.width, percent_x);
    let height = percent_of(area.height, percent_y);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// `percent` of `len`, capped at 100%.
fn percent_of(len: u16, percent: u16) -> u16 {
    (u32::from(len) * u32::from(percent.min(100)) / 100) as u16
}

/// Step `current` by one through `len` entries, wrapping around.
fn cycle(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(10, 5, 100, 40);
        assert_eq!(centered_rect(area, 50, 50), Rect::new(35, 15, 50, 20));
        assert_eq!(centered_rect(area, 150, 100), area);
    }

    #[test]
    fn test_centered_rect_in_large_area() {
        let area = Rect::new(0, 0, 1000, 800);
        assert_eq!(centered_rect(area, 70, 70), Rect::new(150, 120, 700, 560));

        let huge = Rect::new(0, 0, u16::MAX, u16::MAX);
        assert_eq!(centered_rect(huge, 100, 100), huge);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle(2, 3, true), 0);
        assert_eq!(cycle(0, 3, false), 2);
        assert_eq!(cycle(0, 0, true), 0);
    }

    #[test]
    fn test_hit_index() {
        let rects = [Rect::new(0, 0, 10, 3), Rect::new(12, 0, 10, 3)];
        assert_eq!(hit_index(&rects, 13, 2), Some(1));
        assert_eq!(hit_index(&rects, 11, 1), None);
    }
}
