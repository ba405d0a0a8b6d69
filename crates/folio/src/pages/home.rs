use folio_content::PROFILE;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Stylize},
    text::Line,
    widgets::{Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, area: Rect, accent: Color) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1), // Greeting
        Constraint::Length(1), // Name
        Constraint::Length(1),
        Constraint::Length(4), // Summary
        Constraint::Length(1),
        Constraint::Length(1), // Hint
        Constraint::Fill(1),
    ])
    .split(area);

    frame.render_widget(Line::from("Hi, I'm".gray()).centered(), chunks[1]);
    frame.render_widget(
        Line::from(PROFILE.name.bold().fg(accent)).centered(),
        chunks[2],
    );

    let [summary] = Layout::horizontal([Constraint::Max(72)])
        .flex(Flex::Center)
        .areas(chunks[4]);
    frame.render_widget(
        Paragraph::new(PROFILE.summary)
            .centered()
            .wrap(Wrap { trim: true }),
        summary,
    );

    frame.render_widget(
        Line::from(vec![
            "Explore ".dark_gray(),
            "2".bold().fg(accent),
            "-".dark_gray(),
            "5".bold().fg(accent),
            " or click the menu".dark_gray(),
        ])
        .centered(),
        chunks[6],
    );
}
