//! Top navigation bar.

use folio_content::PROFILE;
use folio_core::Page;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Terminals narrower than this get the collapsed menu.
pub const NARROW_WIDTH: u16 = 80;

const MENU_TOGGLE: &str = "[≡]";

/// What a click on the bar landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavHit {
    Page(Page),
    MenuToggle,
}

#[derive(Debug, Default)]
pub struct NavBar {
    menu_open: bool,
}

impl NavBar {
    pub fn is_narrow(width: u16) -> bool {
        width < NARROW_WIDTH
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Rows the bar occupies at `width`.
    pub fn height(&self, width: u16) -> u16 {
        if Self::is_narrow(width) && self.menu_open {
            1 + Page::ALL.len() as u16
        } else {
            1
        }
    }

    /// Screen regions of the page items that are currently visible.
    pub fn item_rects(&self, area: Rect) -> Vec<(Page, Rect)> {
        if Self::is_narrow(area.width) {
            if !self.menu_open {
                return Vec::new();
            }
            return Page::ALL
                .iter()
                .enumerate()
                .map(|(i, page)| (*page, Rect::new(area.x, area.y + 1 + i as u16, area.width, 1)))
                .filter(|(_, rect)| rect.y < area.bottom())
                .collect();
        }

        let widths: Vec<u16> = Page::ALL
            .iter()
            .map(|p| p.label().len() as u16 + 2)
            .collect();
        let total = widths.iter().sum::<u16>() + widths.len() as u16 - 1;
        let mut x = area.right().saturating_sub(total + 1).max(area.x);

        Page::ALL
            .iter()
            .zip(widths)
            .map(|(page, w)| {
                let rect = Rect::new(x, area.y, w, 1).intersection(area);
                x = x.saturating_add(w + 1);
                (*page, rect)
            })
            .collect()
    }

    fn toggle_rect(area: Rect) -> Rect {
        let w = MENU_TOGGLE.chars().count() as u16;
        Rect::new(area.right().saturating_sub(w + 1), area.y, w, 1).intersection(area)
    }

    /// Find what lies under (`col`, `row`).
    pub fn hit(&self, area: Rect, col: u16, row: u16) -> Option<NavHit> {
        let pos = Position::new(col, row);
        if Self::is_narrow(area.width) && Self::toggle_rect(area).contains(pos) {
            return Some(NavHit::MenuToggle);
        }
        self.item_rects(area)
            .into_iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(page, _)| NavHit::Page(page))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, active: Page, accent: Color) {
        let brand = Line::from(Span::from(PROFILE.name).bold().fg(accent));
        frame.render_widget(Paragraph::new(brand), Rect { height: 1, ..area });

        if Self::is_narrow(area.width) {
            let toggle = if self.menu_open { "[×]" } else { MENU_TOGGLE };
            frame.render_widget(
                Paragraph::new(Span::from(toggle).fg(accent)),
                Self::toggle_rect(area),
            );
        }

        for (page, rect) in self.item_rects(area) {
            let style = if page == active {
                Style::new().fg(Color::Black).bg(accent).bold()
            } else {
                Style::new().fg(Color::Gray)
            };
            let label = format!(" {} ", page.label());
            frame.render_widget(Paragraph::new(Span::styled(label, style)), rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_bar_shows_all_items() {
        let nav = NavBar::default();
        let area = Rect::new(0, 0, 120, 1);
        let rects = nav.item_rects(area);

        assert_eq!(rects.len(), 5);
        assert_eq!(rects[0].0, Page::Home);
        assert!(rects.windows(2).all(|w| w[0].1.right() < w[1].1.x));
        assert!(rects[4].1.right() <= area.right());
    }

    #[test]
    fn test_click_on_item_hits_page() {
        let nav = NavBar::default();
        let area = Rect::new(0, 0, 120, 1);
        let (_, rect) = nav.item_rects(area)[2];

        assert_eq!(nav.hit(area, rect.x, 0), Some(NavHit::Page(Page::Projects)));
        assert_eq!(nav.hit(area, 0, 0), None);
    }

    #[test]
    fn test_narrow_bar_collapses_to_toggle() {
        let mut nav = NavBar::default();
        let area = Rect::new(0, 0, 60, 6);

        assert!(nav.item_rects(area).is_empty());
        assert_eq!(nav.height(60), 1);
        assert_eq!(nav.hit(area, 57, 0), Some(NavHit::MenuToggle));

        nav.toggle_menu();
        assert_eq!(nav.height(60), 6);
        assert_eq!(nav.hit(area, 3, 4), Some(NavHit::Page(Page::Skill)));

        nav.close_menu();
        assert!(!nav.is_menu_open());
    }

    #[test]
    fn test_menu_height_ignored_when_wide() {
        let mut nav = NavBar::default();
        nav.toggle_menu();
        assert_eq!(nav.height(100), 1);
    }
}
