//! Project cards and the detail modal.

use folio_content::{PROJECTS, Project};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use super::{centered_rect, cycle, heading, hit_index};

/// Cards sit side by side from this width on.
const ROW_LAYOUT_WIDTH: u16 = 90;

#[derive(Debug, Default)]
pub struct ProjectsPage {
    selected: usize,
    open: Option<usize>,
    card_rects: Vec<Rect>,
    modal_rect: Option<Rect>,
}

impl ProjectsPage {
    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Project shown in the modal, if any.
    pub fn open_project(&self) -> Option<&'static Project> {
        self.open.and_then(|i| PROJECTS.get(i))
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn select_next(&mut self) {
        if !self.is_open() {
            self.selected = cycle(self.selected, PROJECTS.len(), true);
        }
    }

    pub fn select_prev(&mut self) {
        if !self.is_open() {
            self.selected = cycle(self.selected, PROJECTS.len(), false);
        }
    }

    /// Open the modal for the selected card. Replaces any open modal.
    pub fn open_selected(&mut self) {
        if self.selected < PROJECTS.len() {
            self.open = Some(self.selected);
        }
    }

    pub fn close(&mut self) {
        self.open = None;
        self.modal_rect = None;
    }

    /// Handle a click. Outside an open modal closes it; on a card opens it.
    pub fn click(&mut self, col: u16, row: u16) {
        if self.is_open() {
            let inside = self
                .modal_rect
                .is_some_and(|r| r.contains(Position::new(col, row)));
            if !inside {
                self.close();
            }
            return;
        }
        if let Some(i) = hit_index(&self.card_rects, col, row) {
            self.selected = i;
            self.open_selected();
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, accent: Color) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(area);
        frame.render_widget(heading("Projects", accent), chunks[0]);

        let constraints = PROJECTS.iter().map(|_| Constraint::Fill(1));
        let cards = if area.width >= ROW_LAYOUT_WIDTH {
            Layout::horizontal(constraints).spacing(1).split(chunks[2])
        } else {
            Layout::vertical(constraints).split(chunks[2])
        };
        self.card_rects = cards.to_vec();

        for (i, (project, rect)) in PROJECTS.iter().zip(cards.iter()).enumerate() {
            render_card(frame, *rect, project, i == self.selected, accent);
        }

        self.modal_rect = match self.open_project() {
            Some(project) => {
                let rect = centered_rect(frame.area(), 70, 70);
                render_modal(frame, rect, project, accent);
                Some(rect)
            }
            None => None,
        };
    }
}

fn tag_line(tags: &[&'static str], accent: Color) -> Line<'static> {
    let spans: Vec<Span> = tags
        .iter()
        .flat_map(|t| [Span::styled(format!("[{t}]"), Style::new().fg(accent)), Span::raw(" ")])
        .collect();
    Line::from(spans)
}

fn render_card(frame: &mut Frame, area: Rect, project: &Project, selected: bool, accent: Color) {
    let border = if selected {
        Style::new().fg(accent)
    } else {
        Style::new().dark_gray()
    };
    let block = Block::bordered()
        .title(Line::from(project.title.bold()))
        .border_style(border);

    let lines = vec![
        Line::from(project.description.gray()),
        Line::default(),
        tag_line(project.card_tags(), accent),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_modal(frame: &mut Frame, area: Rect, project: &Project, accent: Color) {
    frame.render_widget(Clear, area);
    let block = Block::bordered()
        .title(Line::from(project.title.bold().fg(accent)))
        .title_bottom(Line::from(" Esc to close ".dark_gray()).right_aligned())
        .border_style(Style::new().fg(accent));

    let lines = vec![
        Line::from(project.detailed_description),
        Line::default(),
        Line::from("Technologies".bold()),
        tag_line(project.tech, accent),
        Line::default(),
        Line::from(vec!["Repository: ".bold(), project.link.underlined()]),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
