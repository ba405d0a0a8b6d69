//! Mount targets: the regions of a view a background draws into.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identifier of a drawing surface inserted into a mount target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// A region of the view owned by the host.
///
/// The host creates one per visible page and calls [`MountTarget::unmount`]
/// when the page is replaced. Sessions hold only weak references, so a
/// dropped target reads as missing.
#[derive(Debug)]
pub struct MountTarget {
    label: String,
    attached: Cell<bool>,
    surfaces: RefCell<Vec<SurfaceId>>,
}

impl MountTarget {
    pub fn new(label: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            label: label.into(),
            attached: Cell::new(true),
            surfaces: RefCell::new(Vec::new()),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    /// Detach the target from the view, dropping any surfaces it holds.
    pub fn unmount(&self) {
        self.attached.set(false);
        self.surfaces.borrow_mut().clear();
    }

    /// Insert a surface. Returns `false` if the target is detached.
    pub fn insert_surface(&self, id: SurfaceId) -> bool {
        if !self.is_attached() {
            return false;
        }
        let mut surfaces = self.surfaces.borrow_mut();
        if !surfaces.contains(&id) {
            surfaces.push(id);
        }
        true
    }

    /// Remove a surface. Returns `false` if it was not present.
    pub fn remove_surface(&self, id: SurfaceId) -> bool {
        let mut surfaces = self.surfaces.borrow_mut();
        let before = surfaces.len();
        surfaces.retain(|s| *s != id);
        surfaces.len() != before
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.borrow().len()
    }
}
