//! "My Journey" timeline.

use folio_content::TIMELINE;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::heading;

#[derive(Debug, Default)]
pub struct AboutPage {
    scroll: u16,
}

impl AboutPage {
    /// Lines of timeline text before wrapping.
    pub fn line_count() -> u16 {
        2 + TIMELINE.len() as u16 * 4
    }

    #[cfg(test)]
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_down(&mut self) {
        self.scroll = (self.scroll + 1).min(Self::line_count().saturating_sub(1));
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, accent: Color) {
        let mut lines = vec![heading("My Journey", accent), Line::default()];

        for event in TIMELINE {
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", event.kind.marker()), Style::new().fg(accent)),
                Span::styled(
                    format!(" {} ", event.date),
                    Style::new().fg(Color::Black).bg(accent),
                ),
            ]));
            lines.push(Line::from(vec![
                "   │ ".fg(accent),
                event.title.bold(),
            ]));
            lines.push(Line::from(vec![
                "   │ ".fg(accent),
                event.description.gray(),
            ]));
            lines.push(Line::from("   │".fg(accent)));
        }

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_bounded() {
        let mut page = AboutPage::default();
        page.scroll_up();
        assert_eq!(page.scroll(), 0);

        for _ in 0..100 {
            page.scroll_down();
        }
        assert_eq!(page.scroll(), AboutPage::line_count() - 1);
    }
}
