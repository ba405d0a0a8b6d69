use std::time::{Duration, Instant};

use chrono::{Datelike, Local};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use folio_config::Config;
use folio_content::PROFILE;
use folio_core::{AccentTheme, Page};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::Stylize,
    text::{Line, Span},
};
use tracing::info;

use crate::background::BackgroundHost;
use crate::nav::{NavBar, NavHit};
use crate::pages::{
    about::AboutPage, contact::ContactPage, home, projects::ProjectsPage, skill::SkillPage,
};

/// Footer text for the given year.
pub fn footer_text(year: i32) -> String {
    format!("© {year} {}. All rights reserved.", PROFILE.name)
}

/// Fixed-rate frame deadlines, independent of how often input arrives.
#[derive(Debug)]
struct FrameClock {
    interval: Duration,
    next: Duration,
}

impl FrameClock {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Duration::ZERO,
        }
    }

    /// Whether a frame is due at `now`. Moves the deadline on when it is.
    fn due(&mut self, now: Duration) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        // Frames missed while blocked are dropped, not replayed.
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }

    /// Time left until the next frame is due.
    fn remaining(&self, now: Duration) -> Duration {
        self.next.saturating_sub(now)
    }
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Page currently shown.
    page: Page,
    /// Accent color of the UI and the particles.
    accent: AccentTheme,
    /// When the background animates next.
    clock: FrameClock,
    nav: NavBar,
    /// Where the navigation bar was last drawn.
    nav_area: Rect,
    about: AboutPage,
    projects: ProjectsPage,
    skills: SkillPage,
    contact: ContactPage,
    background: BackgroundHost,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config, background: BackgroundHost) -> Self {
        Self {
            running: false,
            page: config.start_page,
            accent: config.accent,
            clock: FrameClock::new(Duration::from_millis(config.frame_interval_ms())),
            nav: NavBar::default(),
            nav_area: Rect::default(),
            about: AboutPage::default(),
            projects: ProjectsPage::default(),
            skills: SkillPage::default(),
            contact: ContactPage::default(),
            background,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.start(size.width, size.height);

        let started = Instant::now();
        while self.running {
            self.step(started.elapsed());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(self.clock.remaining(started.elapsed()))?;
        }
        self.background.unmount();
        Ok(())
    }

    /// Size the background to the terminal and mount the first page.
    fn start(&mut self, cols: u16, rows: u16) {
        self.running = true;
        self.background.resize(cols, rows);
        self.background.mount(self.page);
    }

    /// Animate the background if a frame is due at `now`.
    fn step(&mut self, now: Duration) -> bool {
        let due = self.clock.due(now);
        if due {
            self.background.tick(now);
        }
        due
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let accent = self.accent.color();

        self.background.draw(frame, area);

        let chunks = Layout::vertical([
            Constraint::Length(self.nav.height(area.width)), // Navigation
            Constraint::Length(1),                           // Spacing
            Constraint::Fill(1),                             // Page
            Constraint::Length(1),                           // Footer
            Constraint::Length(1),                           // Help text
        ])
        .split(area);

        self.nav_area = chunks[0];
        self.nav.render(frame, chunks[0], self.page, accent);

        let content = chunks[2].inner(Margin::new(2, 0));
        match self.page {
            Page::Home => home::render(frame, content, accent),
            Page::About => self.about.render(frame, content, accent),
            Page::Projects => self.projects.render(frame, content, accent),
            Page::Skill => self.skills.render(frame, content, accent),
            Page::Contact => self.contact.render(frame, content, accent),
        }

        let footer = Line::from(footer_text(Local::now().year()).dark_gray()).centered();
        frame.render_widget(footer, chunks[3]);
        frame.render_widget(self.help_line(), chunks[4]);
    }

    fn help_line(&self) -> Line<'static> {
        let color = self.accent.color();
        if let Some(link) = self.status() {
            return Line::from(vec!["→ ".fg(color), Span::from(link).underlined()]).centered();
        }
        Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "1-5".bold().fg(color),
            " pages  ".dark_gray(),
            "tab".bold().fg(color),
            " next  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color".dark_gray(),
        ])
        .centered()
    }

    /// Status line text, shown in place of the key help.
    fn status(&self) -> Option<&'static str> {
        match self.page {
            Page::Contact => self.contact.selected_link(),
            _ => None,
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout`, then drains whatever else is queued.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        self.on_event(event::read()?);
        while self.running && event::poll(Duration::ZERO)? {
            self.on_event(event::read()?);
        }
        Ok(())
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse),
            Event::Resize(cols, rows) => self.background.resize(cols, rows),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Esc) => self.on_escape(),
            (_, KeyCode::Char(digit @ '1'..='5')) => {
                if let Some(page) = Page::from_shortcut(digit) {
                    self.go_to(page);
                }
            }
            (_, KeyCode::Tab) => self.go_to(self.page.next()),
            (_, KeyCode::BackTab) => self.go_to(self.page.prev()),
            (_, KeyCode::Char('c')) => self.cycle_accent(),
            (_, KeyCode::Char('m')) => self.nav.toggle_menu(),
            (_, code) => self.on_page_key(code),
        }
    }

    /// Keys that only mean something on the current page.
    fn on_page_key(&mut self, code: KeyCode) {
        match (self.page, code) {
            (Page::About, KeyCode::Up | KeyCode::Char('k')) => self.about.scroll_up(),
            (Page::About, KeyCode::Down | KeyCode::Char('j')) => self.about.scroll_down(),

            (Page::Projects, KeyCode::Left | KeyCode::Up | KeyCode::Char('h' | 'k')) => {
                self.projects.select_prev()
            }
            (Page::Projects, KeyCode::Right | KeyCode::Down | KeyCode::Char('l' | 'j')) => {
                self.projects.select_next()
            }
            (Page::Projects, KeyCode::Enter) => self.projects.open_selected(),

            (Page::Skill, KeyCode::Left | KeyCode::Char('h')) => self.skills.prev_category(),
            (Page::Skill, KeyCode::Right | KeyCode::Char('l')) => self.skills.next_category(),
            (Page::Skill, KeyCode::Up | KeyCode::Char('k')) => self.skills.focus_prev(),
            (Page::Skill, KeyCode::Down | KeyCode::Char('j')) => self.skills.focus_next(),

            (Page::Contact, KeyCode::Left | KeyCode::Up | KeyCode::Char('h' | 'k')) => {
                self.contact.select_prev()
            }
            (Page::Contact, KeyCode::Right | KeyCode::Down | KeyCode::Char('l' | 'j')) => {
                self.contact.select_next()
            }
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let (col, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.background.pointer_at(col, row);
                if self.page == Page::Skill {
                    self.skills.hover(col, row);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => self.on_click(col, row),
            _ => {}
        }
    }

    fn on_click(&mut self, col: u16, row: u16) {
        if self.page == Page::Projects && self.projects.is_open() {
            self.projects.click(col, row);
            return;
        }

        if let Some(hit) = self.nav.hit(self.nav_area, col, row) {
            match hit {
                NavHit::Page(page) => self.go_to(page),
                NavHit::MenuToggle => self.nav.toggle_menu(),
            }
            return;
        }

        match self.page {
            Page::Projects => self.projects.click(col, row),
            Page::Skill => self.skills.click(col, row),
            Page::Contact => {
                self.contact.click(col, row);
            }
            Page::Home | Page::About => {}
        }
    }

    /// Esc closes the innermost overlay, and quits when there is none.
    fn on_escape(&mut self) {
        if self.page == Page::Projects && self.projects.is_open() {
            self.projects.close();
        } else if self.nav.is_menu_open() {
            self.nav.close_menu();
        } else {
            self.quit();
        }
    }

    /// Show `page`, replacing the previous page's background.
    fn go_to(&mut self, page: Page) {
        self.nav.close_menu();
        if page == self.page {
            return;
        }
        info!(from = %self.page, to = %page, "page switched");
        self.projects.close();
        self.page = page;
        self.background.mount(page);
    }

    /// Cycle through available accent colors.
    fn cycle_accent(&mut self) {
        self.accent = self.accent.next();
        self.background.set_accent(self.accent);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
