//! Animated point-cloud background for the folio portfolio.
//!
//! A [`BackgroundRuntime`] attaches sessions to mount targets owned by the
//! host. Each session lazily obtains the shared graphics library, builds a
//! rotating cloud of particles and redraws it once per host frame, with the
//! camera drifting toward the pointer. Detaching a session cancels its frame
//! task, removes its input listeners and releases its drawing surface.

mod chars;
mod color;
pub mod events;
pub mod loader;
pub mod mount;
pub mod raster;
pub mod scene;
pub mod schedule;
pub mod session;

pub use color::ColorDepth;
pub use events::{EventHub, EventKind, HostEvent};
pub use loader::{GRAPHICS_LIBRARY, LoadError, ResourceLoader, TerminalFetch};
pub use mount::MountTarget;
pub use raster::{GraphicsLibrary, TerminalProbe};
pub use scene::PointsMaterial;
pub use session::{BackgroundOptions, BackgroundRuntime, SessionHandle, SessionPhase};
