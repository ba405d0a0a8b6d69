use folio_content::{CALL_TO_ACTION, CONTACTS, ContactLink, PROFILE};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
};

use super::{cycle, heading, hit_index};

#[derive(Debug, Default)]
pub struct ContactPage {
    selected: Option<usize>,
    card_rects: Vec<Rect>,
}

impl ContactPage {
    pub fn selected(&self) -> Option<&'static ContactLink> {
        self.selected.and_then(|i| CONTACTS.get(i))
    }

    /// Link of the selected card, shown in the status line.
    pub fn selected_link(&self) -> Option<&'static str> {
        self.selected().map(|c| c.link)
    }

    pub fn select_next(&mut self) {
        self.selected = Some(self.selected.map_or(0, |i| cycle(i, CONTACTS.len(), true)));
    }

    pub fn select_prev(&mut self) {
        let last = CONTACTS.len().saturating_sub(1);
        self.selected = Some(self.selected.map_or(last, |i| cycle(i, CONTACTS.len(), false)));
    }

    /// Select the card under (`col`, `row`). Returns `true` on a hit.
    pub fn click(&mut self, col: u16, row: u16) -> bool {
        match hit_index(&self.card_rects, col, row) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, accent: Color) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(5), // Cards
            Constraint::Length(1),
            Constraint::Fill(1), // Call to action
        ])
        .split(area);
        frame.render_widget(heading("Get In Touch", accent), chunks[0]);

        let cards = Layout::horizontal(CONTACTS.iter().map(|_| Constraint::Fill(1)))
            .spacing(1)
            .split(chunks[2]);
        self.card_rects = cards.to_vec();

        for (i, (contact, rect)) in CONTACTS.iter().zip(cards.iter()).enumerate() {
            let border = if self.selected == Some(i) {
                Style::new().fg(accent)
            } else {
                Style::new().dark_gray()
            };
            let lines = vec![
                Line::from(contact.text.gray()),
                Line::from(contact.action_label().fg(accent).underlined()),
            ];
            let card = Paragraph::new(lines)
                .centered()
                .block(
                    Block::bordered()
                        .title(Line::from(contact.title.bold()).centered())
                        .border_style(border),
                );
            frame.render_widget(card, *rect);
        }

        let cta = Paragraph::new(vec![
            Line::from(CALL_TO_ACTION),
            Line::default(),
            Line::from(vec!["Hire Me: ".bold(), PROFILE.email.fg(accent)]),
        ])
        .centered()
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .title(Line::from("Let's Work Together".bold().fg(accent)).centered())
                .border_style(Style::new().fg(accent)),
        );
        frame.render_widget(cta, chunks[4]);
    }
}
