//! Lazy, cached loading of the graphics library.
//!
//! The [`ResourceLoader`] keeps one cache entry per [`ResourceId`]. The first
//! request starts a fetch through the injected [`Fetch`]; later requests poll
//! that same fetch until it resolves, then share the loaded library.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, warn};

use crate::raster::{GraphicsLibrary, TerminalProbe};

/// Identity of a loadable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(pub &'static str);

/// The point rasterization library used by every background session.
pub const GRAPHICS_LIBRARY: ResourceId = ResourceId("folio.point-raster");

/// Why a library could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("terminal '{0}' cannot draw the background")]
    Unsupported(String),

    #[error("unknown resource '{0}'")]
    UnknownResource(&'static str),

    #[error("loader exited before delivering the library")]
    Abandoned,
}

pub type FetchResult = Result<GraphicsLibrary, LoadError>;

/// Starts an asynchronous fetch; the result arrives on the returned channel.
pub trait Fetch {
    fn fetch(&self, id: ResourceId) -> Receiver<FetchResult>;
}

/// Observable state of a load request.
#[derive(Debug, Clone)]
pub enum LoadState {
    Pending,
    Ready(Arc<GraphicsLibrary>),
    Failed,
}

enum Entry {
    InFlight(Receiver<FetchResult>),
    Loaded(Arc<GraphicsLibrary>),
}

/// Cache of loaded resources with at most one fetch in flight per id.
pub struct ResourceLoader {
    fetcher: Box<dyn Fetch>,
    entries: HashMap<ResourceId, Entry>,
    fetches_started: usize,
}

impl ResourceLoader {
    pub fn new(fetcher: impl Fetch + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            entries: HashMap::new(),
            fetches_started: 0,
        }
    }

    /// Return the library if cached, otherwise start or poll its fetch.
    pub fn ensure_loaded(&mut self, id: ResourceId) -> LoadState {
        if !self.entries.contains_key(&id) {
            debug!(resource = id.0, "starting library fetch");
            let rx = self.fetcher.fetch(id);
            self.fetches_started += 1;
            self.entries.insert(id, Entry::InFlight(rx));
        }
        self.poll(id)
    }

    /// Check an in-flight fetch without starting a new one.
    pub fn poll(&mut self, id: ResourceId) -> LoadState {
        let outcome = match self.entries.get(&id) {
            Some(Entry::Loaded(library)) => return LoadState::Ready(Arc::clone(library)),
            Some(Entry::InFlight(rx)) => rx.try_recv(),
            None => return LoadState::Failed,
        };

        match outcome {
            Ok(Ok(library)) => {
                debug!(resource = id.0, "library loaded");
                let library = Arc::new(library);
                self.entries.insert(id, Entry::Loaded(Arc::clone(&library)));
                LoadState::Ready(library)
            }
            Ok(Err(e)) => {
                warn!(resource = id.0, error = %e, "library fetch failed");
                self.entries.remove(&id);
                LoadState::Failed
            }
            Err(TryRecvError::Empty) => LoadState::Pending,
            Err(TryRecvError::Disconnected) => {
                warn!(resource = id.0, error = %LoadError::Abandoned, "library fetch failed");
                self.entries.remove(&id);
                LoadState::Failed
            }
        }
    }

    pub fn is_loaded(&self, id: ResourceId) -> bool {
        matches!(self.entries.get(&id), Some(Entry::Loaded(_)))
    }

    pub fn is_in_flight(&self, id: ResourceId) -> bool {
        matches!(self.entries.get(&id), Some(Entry::InFlight(_)))
    }

    /// Total fetches started over the loader's lifetime.
    pub fn fetches_started(&self) -> usize {
        self.fetches_started
    }
}

/// Builds the library for the current terminal on a worker thread.
#[derive(Debug, Clone)]
pub struct TerminalFetch {
    probe: TerminalProbe,
}

impl TerminalFetch {
    pub fn new(probe: TerminalProbe) -> Self {
        Self { probe }
    }

    pub fn from_env() -> Self {
        Self::new(TerminalProbe::from_env())
    }
}

impl Fetch for TerminalFetch {
    fn fetch(&self, id: ResourceId) -> Receiver<FetchResult> {
        let (tx, rx) = mpsc::channel();
        if id != GRAPHICS_LIBRARY {
            let _ = tx.send(Err(LoadError::UnknownResource(id.0)));
            return rx;
        }

        let probe = self.probe.clone();
        let spawned = thread::Builder::new()
            .name("folio-loader".to_string())
            .spawn(move || {
                let _ = tx.send(GraphicsLibrary::from_probe(&probe));
            });
        if let Err(e) = spawned {
            warn!(error = %e, "failed to spawn loader thread");
        }
        rx
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fetch doubles for lifecycle tests.

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc::Sender;

    use super::*;
    use crate::chars::POINT_GLYPHS;
    use crate::color::ColorDepth;

    pub fn test_library() -> GraphicsLibrary {
        GraphicsLibrary::new(ColorDepth::TrueColor, POINT_GLYPHS)
    }

    /// Resolves every fetch immediately.
    pub struct InstantFetch;

    impl Fetch for InstantFetch {
        fn fetch(&self, _id: ResourceId) -> Receiver<FetchResult> {
            let (tx, rx) = mpsc::channel();
            let _ = tx.send(Ok(test_library()));
            rx
        }
    }

    /// Fails every fetch immediately.
    pub struct FailingFetch;

    impl Fetch for FailingFetch {
        fn fetch(&self, _id: ResourceId) -> Receiver<FetchResult> {
            let (tx, rx) = mpsc::channel();
            let _ = tx.send(Err(LoadError::Unsupported("test".to_string())));
            rx
        }
    }

    /// Holds fetches open until the test completes them.
    #[derive(Clone, Default)]
    pub struct ManualFetch {
        senders: Rc<RefCell<Vec<Sender<FetchResult>>>>,
    }

    impl ManualFetch {
        pub fn complete(&self) {
            for tx in self.senders.borrow_mut().drain(..) {
                let _ = tx.send(Ok(test_library()));
            }
        }

        pub fn fail(&self) {
            for tx in self.senders.borrow_mut().drain(..) {
                let _ = tx.send(Err(LoadError::Unsupported("test".to_string())));
            }
        }

        /// Drop the senders without answering, like a crashed worker.
        pub fn abandon(&self) {
            self.senders.borrow_mut().clear();
        }

        pub fn open(&self) -> usize {
            self.senders.borrow().len()
        }
    }

    impl Fetch for ManualFetch {
        fn fetch(&self, _id: ResourceId) -> Receiver<FetchResult> {
            let (tx, rx) = mpsc::channel();
            self.senders.borrow_mut().push(tx);
            rx
        }
    }
}
