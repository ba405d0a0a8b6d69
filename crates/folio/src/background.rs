//! Hosting of the particle background behind the pages.
//!
//! Each visible page owns a [`MountTarget`]. Switching pages unmounts the old
//! target, detaches its session and attaches a fresh one to the new target.

use std::rc::Rc;
use std::time::Duration;

use folio_background::loader::Fetch;
use folio_background::{BackgroundOptions, BackgroundRuntime, MountTarget, SessionHandle};
use folio_core::{AccentTheme, CellSize, Page, Viewport};
use ratatui::{Frame, layout::Rect};
use tracing::debug;

pub struct BackgroundHost {
    runtime: Option<BackgroundRuntime>,
    target: Option<Rc<MountTarget>>,
    session: Option<SessionHandle>,
    page: Option<Page>,
    cell: CellSize,
    viewport: Viewport,
}

impl BackgroundHost {
    /// A host that drives sessions with `fetch`.
    pub fn new(fetch: impl Fetch + 'static, options: BackgroundOptions) -> Self {
        let cell = options.cell;
        Self {
            runtime: Some(BackgroundRuntime::new(fetch, options)),
            target: None,
            session: None,
            page: None,
            cell,
            viewport: Viewport::new(1, 1),
        }
    }

    /// A host that never draws anything.
    pub fn disabled(cell: CellSize) -> Self {
        Self {
            runtime: None,
            target: None,
            session: None,
            page: None,
            cell,
            viewport: Viewport::new(1, 1),
        }
    }

    #[cfg(test)]
    pub fn is_enabled(&self) -> bool {
        self.runtime.is_some()
    }

    #[cfg(test)]
    pub fn session(&self) -> Option<&SessionHandle> {
        self.session.as_ref()
    }

    #[cfg(test)]
    pub fn runtime(&self) -> Option<&BackgroundRuntime> {
        self.runtime.as_ref()
    }

    #[cfg(test)]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replace the current page's background with one for `page`.
    pub fn mount(&mut self, page: Page) {
        self.unmount();
        let Some(runtime) = self.runtime.as_mut() else {
            return;
        };
        let target = MountTarget::new(page.id());
        self.session = Some(runtime.attach(&Rc::downgrade(&target), self.viewport));
        self.target = Some(target);
        self.page = Some(page);
        debug!(page = page.id(), "background mounted");
    }

    /// Tear down the current page's background.
    pub fn unmount(&mut self) {
        self.page = None;
        if let Some(target) = self.target.take() {
            target.unmount();
        }
        if let (Some(runtime), Some(session)) = (self.runtime.as_mut(), self.session.take()) {
            runtime.detach(&session);
        }
    }

    /// Recolor the particles and restart the current page's background.
    pub fn set_accent(&mut self, accent: AccentTheme) {
        let Some(runtime) = self.runtime.as_mut() else {
            return;
        };
        runtime.set_color(accent.rgb());
        if let Some(page) = self.page {
            self.mount(page);
        }
    }

    /// The terminal is now `cols` x `rows` cells.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport = Viewport::from_cells(cols, rows, self.cell);
        if let Some(runtime) = self.runtime.as_mut() {
            runtime.resized(self.viewport);
        }
    }

    /// The pointer is over the cell at (`col`, `row`).
    pub fn pointer_at(&mut self, col: u16, row: u16) {
        if let Some(runtime) = self.runtime.as_mut() {
            let (x, y) = self.cell.cell_center(col, row);
            runtime.pointer_moved(x, y);
        }
    }

    /// Advance the background to host time `now`.
    pub fn tick(&mut self, now: Duration) {
        if let Some(runtime) = self.runtime.as_mut() {
            runtime.tick(now);
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if let Some(session) = &self.session {
            session.draw(frame, area);
        }
    }
}

impl Drop for BackgroundHost {
    fn drop(&mut self) {
        self.unmount();
    }
}
