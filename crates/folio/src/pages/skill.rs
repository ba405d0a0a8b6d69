//! Skills grouped by category with proficiency bars.

use folio_content::{SKILL_GROUPS, Skill, SkillGroup};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{cycle, heading, hit_index};

const BAR_WIDTH: usize = 20;

/// A bar of `width` cells filled in proportion to `level` percent.
pub fn proficiency_bar(level: u8, width: usize) -> String {
    let filled = (usize::from(level.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[derive(Debug, Default)]
pub struct SkillPage {
    category: usize,
    focused: Option<usize>,
    tab_rects: Vec<Rect>,
    skill_rects: Vec<Rect>,
}

impl SkillPage {
    pub fn group(&self) -> &'static SkillGroup {
        &SKILL_GROUPS[self.category.min(SKILL_GROUPS.len() - 1)]
    }

    #[cfg(test)]
    pub fn focused(&self) -> Option<&'static Skill> {
        self.focused.and_then(|i| self.group().skills.get(i))
    }

    pub fn select_category(&mut self, index: usize) {
        if index < SKILL_GROUPS.len() && index != self.category {
            self.category = index;
            self.focused = None;
        }
    }

    pub fn next_category(&mut self) {
        self.select_category(cycle(self.category, SKILL_GROUPS.len(), true));
    }

    pub fn prev_category(&mut self) {
        self.select_category(cycle(self.category, SKILL_GROUPS.len(), false));
    }

    pub fn focus_next(&mut self) {
        let len = self.group().skills.len();
        self.focused = Some(self.focused.map_or(0, |i| cycle(i, len, true)));
    }

    pub fn focus_prev(&mut self) {
        let len = self.group().skills.len();
        self.focused = Some(self.focused.map_or(len.saturating_sub(1), |i| cycle(i, len, false)));
    }

    /// Pointer moved over (`col`, `row`).
    pub fn hover(&mut self, col: u16, row: u16) {
        self.focused = hit_index(&self.skill_rects, col, row);
    }

    pub fn click(&mut self, col: u16, row: u16) {
        if let Some(i) = hit_index(&self.tab_rects, col, row) {
            self.select_category(i);
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, accent: Color) {
        let group = self.group();
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1), // Category tabs
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(area);
        frame.render_widget(heading("Skills", accent), chunks[0]);

        let tab_widths = SKILL_GROUPS
            .iter()
            .map(|g| Constraint::Length(g.category.chars().count() as u16 + 2));
        let tabs = Layout::horizontal(tab_widths)
            .spacing(2)
            .flex(Flex::Center)
            .split(chunks[2]);
        self.tab_rects = tabs.to_vec();
        for (i, (g, rect)) in SKILL_GROUPS.iter().zip(tabs.iter()).enumerate() {
            let style = if i == self.category {
                Style::new().fg(Color::Black).bg(accent).bold()
            } else {
                Style::new().fg(Color::Gray)
            };
            frame.render_widget(Span::styled(format!(" {} ", g.category), style), *rect);
        }

        let rows = Layout::vertical(group.skills.iter().map(|_| Constraint::Length(2)))
            .split(chunks[4]);
        self.skill_rects = rows.to_vec();
        for (i, (skill, rect)) in group.skills.iter().zip(rows.iter()).enumerate() {
            let focused = self.focused == Some(i);
            frame.render_widget(skill_lines(skill, focused, accent), *rect);
        }
    }
}

fn skill_lines(skill: &Skill, focused: bool, accent: Color) -> Paragraph<'static> {
    let name_style = if focused {
        Style::new().fg(accent).bold()
    } else {
        Style::new()
    };
    let mut spans = vec![
        Span::styled(format!(" {:>2} ", skill.badge()), Style::new().fg(Color::Black).bg(accent)),
        Span::raw(" "),
        Span::styled(format!("{:<14}", skill.name), name_style),
        Span::styled(proficiency_bar(skill.level, BAR_WIDTH), Style::new().fg(accent)),
    ];
    if focused {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{}% Proficiency", skill.level),
            Style::new().bold(),
        ));
    }
    Paragraph::new(Line::from(spans)).centered()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_category_is_frontend() {
        let page = SkillPage::default();
        assert_eq!(page.group().category, "Frontend");
        assert!(page.focused().is_none());
    }

    #[test]
    fn test_switching_category_clears_focus() {
        let mut page = SkillPage::default();
        page.focus_next();
        assert_eq!(page.focused().map(|s| s.name), Some("HTML"));

        page.next_category();
        assert_eq!(page.group().category, "Backend");
        assert!(page.focused().is_none());

        page.prev_category();
        page.prev_category();
        assert_eq!(page.group().category, "Tools & Platforms");
    }

    #[test]
    fn test_hover_focuses_skill() {
        let mut page = SkillPage {
            skill_rects: vec![Rect::new(0, 4, 80, 2), Rect::new(0, 6, 80, 2)],
            ..Default::default()
        };
        page.hover(10, 7);
        assert_eq!(page.focused().map(|s| s.level), Some(90));

        page.hover(10, 20);
        assert!(page.focused().is_none());
    }

    #[test]
    fn test_click_tab_selects_category() {
        let mut page = SkillPage {
            tab_rects: vec![
                Rect::new(0, 2, 10, 1),
                Rect::new(12, 2, 9, 1),
                Rect::new(23, 2, 19, 1),
                Rect::new(44, 2, 19, 1),
            ],
            ..Default::default()
        };
        page.click(30, 2);
        assert_eq!(page.group().category, "AI & Data Science");
    }

    #[test]
    fn test_proficiency_bar() {
        assert_eq!(proficiency_bar(50, 10), "█████░░░░░");
        assert_eq!(proficiency_bar(0, 4), "░░░░");
        assert_eq!(proficiency_bar(255, 4), "████");
        assert_eq!(proficiency_bar(85, 20).chars().count(), 20);
    }
}
