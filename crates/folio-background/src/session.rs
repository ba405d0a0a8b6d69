//! Background sessions and the runtime that hosts them.
//!
//! A session lives from [`BackgroundRuntime::attach`] to
//! [`BackgroundRuntime::detach`]. While the graphics library loads the
//! session waits; once it is available the session builds its scene,
//! registers its pointer and resize listeners and schedules its frame task.
//! Detaching cancels all of that synchronously.

use std::cell::RefCell;
use std::mem;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::time::Duration;

use folio_core::{CellSize, Viewport};
use glam::{Vec2, Vec3};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Frame, layout::Rect};
use tracing::debug;

use crate::events::{EventHub, EventKind, HostEvent, InputListener, ListenerId};
use crate::loader::{Fetch, GRAPHICS_LIBRARY, LoadState, ResourceId, ResourceLoader};
use crate::mount::{MountTarget, SurfaceId};
use crate::raster::GraphicsLibrary;
use crate::scene::{PointsMaterial, SceneHandle};
use crate::schedule::{FrameControl, FrameHandle, FrameScheduler, FrameTask};

/// Divisor applied to the pointer's offset from the viewport center.
pub const POINTER_SCALE: f32 = 100.0;

/// Pointer offset from the viewport center, scaled down for camera parallax.
pub fn pointer_delta(viewport: Viewport, x: f32, y: f32) -> Vec2 {
    let (cx, cy) = viewport.center();
    Vec2::new((x - cx) / POINTER_SCALE, (y - cy) / POINTER_SCALE)
}

/// Settings applied to every session a runtime creates.
#[derive(Debug, Clone)]
pub struct BackgroundOptions {
    pub material: PointsMaterial,
    pub cell: CellSize,
    pub library: ResourceId,
    /// Fixed RNG seed for the point cloud; random per session when unset.
    pub seed: Option<u64>,
}

impl Default for BackgroundOptions {
    fn default() -> Self {
        Self {
            material: PointsMaterial::default(),
            cell: CellSize::default(),
            library: GRAPHICS_LIBRARY,
            seed: None,
        }
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the graphics library.
    Loading,
    /// Scene built and frame task scheduled.
    Running,
    /// Never animates: library failed or the mount target was missing.
    Inert,
    /// Detached.
    TornDown,
}

struct SessionCore {
    id: u64,
    target: Weak<MountTarget>,
    viewport: Viewport,
    phase: SessionPhase,
    pointer: Vec2,
    scene: Option<SceneHandle>,
    started_at: Option<Duration>,
    frames: u64,
    frame: Option<FrameHandle>,
    listeners: Vec<ListenerId>,
}

impl SessionCore {
    fn new(id: u64, target: Weak<MountTarget>, viewport: Viewport) -> Self {
        Self {
            id,
            target,
            viewport,
            phase: SessionPhase::Loading,
            pointer: Vec2::ZERO,
            scene: None,
            started_at: None,
            frames: 0,
            frame: None,
            listeners: Vec::new(),
        }
    }

    fn is_active(&self) -> bool {
        matches!(self.phase, SessionPhase::Loading | SessionPhase::Running)
    }

    fn mounted_target(&self) -> Option<Rc<MountTarget>> {
        self.target.upgrade().filter(|t| t.is_attached())
    }

    fn teardown(&mut self, events: &mut EventHub) {
        if self.phase == SessionPhase::TornDown {
            return;
        }
        self.phase = SessionPhase::TornDown;

        if let Some(frame) = self.frame.take() {
            frame.cancel();
        }
        for id in self.listeners.drain(..) {
            events.remove_listener(id);
        }
        if let Some(scene) = self.scene.take()
            && let Some(target) = self.target.upgrade()
        {
            target.remove_surface(scene.surface());
        }
        debug!(session = self.id, "background detached");
    }
}

impl FrameTask for SessionCore {
    fn on_frame(&mut self, now: Duration) -> FrameControl {
        if self.phase != SessionPhase::Running || self.mounted_target().is_none() {
            return FrameControl::Stop;
        }
        let Some(scene) = self.scene.as_mut() else {
            return FrameControl::Stop;
        };

        let started = *self.started_at.get_or_insert(now);
        let elapsed_ms = now.saturating_sub(started).as_secs_f64() * 1000.0;
        scene.update(elapsed_ms, self.pointer);
        scene.render();
        self.frames += 1;
        FrameControl::Continue
    }
}

impl InputListener for SessionCore {
    fn on_event(&mut self, event: &HostEvent) {
        if self.phase != SessionPhase::Running {
            return;
        }
        match *event {
            HostEvent::PointerMoved { x, y } => {
                self.pointer = pointer_delta(self.viewport, x, y);
            }
            HostEvent::Resized(viewport) => {
                self.viewport = viewport;
                if let Some(scene) = self.scene.as_mut() {
                    scene.resize(viewport);
                }
            }
        }
    }
}

/// The host's handle to one session.
#[derive(Clone)]
pub struct SessionHandle {
    core: Rc<RefCell<SessionCore>>,
}

impl SessionHandle {
    pub fn phase(&self) -> SessionPhase {
        self.core.borrow().phase
    }

    /// True between attach and detach, unless the session went inert.
    pub fn is_active(&self) -> bool {
        self.core.borrow().is_active()
    }

    /// Latest pointer delta.
    pub fn pointer_delta(&self) -> Vec2 {
        self.core.borrow().pointer
    }

    /// Whether the scene has been built.
    pub fn has_scene(&self) -> bool {
        self.core.borrow().scene.is_some()
    }

    /// Run `f` against the scene if it exists.
    pub fn with_scene<R>(&self, f: impl FnOnce(&SceneHandle) -> R) -> Option<R> {
        self.core.borrow().scene.as_ref().map(f)
    }

    pub fn camera_aspect(&self) -> Option<f32> {
        self.with_scene(|s| s.camera().aspect())
    }

    pub fn camera_position(&self) -> Option<Vec3> {
        self.with_scene(|s| s.camera().position)
    }

    /// Frames rendered over the session's whole life, including after detach.
    pub fn frames_rendered(&self) -> u64 {
        self.core.borrow().frames
    }

    /// Paint the latest rendered frame into `area`. Draws nothing unless running.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let core = self.core.borrow();
        if core.phase != SessionPhase::Running {
            return;
        }
        if let Some(scene) = core.scene.as_ref() {
            scene.renderer().draw(frame, area, scene.points().material());
        }
    }
}

/// Owns the loader, frame queue and listener registry shared by sessions.
pub struct BackgroundRuntime {
    loader: ResourceLoader,
    frames: FrameScheduler,
    events: EventHub,
    options: BackgroundOptions,
    viewport: Option<Viewport>,
    waiting: Vec<Weak<RefCell<SessionCore>>>,
    next_session: u64,
    next_surface: u64,
}

impl BackgroundRuntime {
    pub fn new(fetcher: impl Fetch + 'static, options: BackgroundOptions) -> Self {
        Self::with_loader(ResourceLoader::new(fetcher), options)
    }

    pub fn with_loader(loader: ResourceLoader, options: BackgroundOptions) -> Self {
        Self {
            loader,
            frames: FrameScheduler::new(),
            events: EventHub::new(),
            options,
            viewport: None,
            waiting: Vec::new(),
            next_session: 0,
            next_surface: 0,
        }
    }

    /// Tint for sessions attached from now on.
    pub fn set_color(&mut self, color: (u8, u8, u8)) {
        self.options.material.color = color;
    }

    /// Start a session drawing into `target`.
    ///
    /// A missing or detached target yields an inert session. If the library
    /// is already cached the scene is built before this returns.
    pub fn attach(&mut self, target: &Weak<MountTarget>, viewport: Viewport) -> SessionHandle {
        self.viewport = Some(viewport);
        self.next_session += 1;
        let core = Rc::new(RefCell::new(SessionCore::new(
            self.next_session,
            target.clone(),
            viewport,
        )));
        let handle = SessionHandle {
            core: Rc::clone(&core),
        };

        if core.borrow().mounted_target().is_none() {
            debug!(session = self.next_session, "mount target missing, background inert");
            core.borrow_mut().phase = SessionPhase::Inert;
            return handle;
        }

        match self.loader.ensure_loaded(self.options.library) {
            LoadState::Ready(library) => self.activate(&core, &library),
            LoadState::Pending => {
                debug!(session = self.next_session, "waiting for graphics library");
                self.waiting.push(Rc::downgrade(&core));
            }
            LoadState::Failed => core.borrow_mut().phase = SessionPhase::Inert,
        }
        handle
    }

    /// End a session. Safe to repeat.
    pub fn detach(&mut self, session: &SessionHandle) {
        session.core.borrow_mut().teardown(&mut self.events);
        let ptr = Rc::as_ptr(&session.core);
        self.waiting.retain(|w| !std::ptr::eq(w.as_ptr(), ptr));
    }

    /// Deliver a pointer position in viewport pixels.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> usize {
        self.events.dispatch(&HostEvent::PointerMoved { x, y })
    }

    /// Deliver a viewport resize. Sessions still loading pick it up when
    /// their scene is built.
    pub fn resized(&mut self, viewport: Viewport) -> usize {
        self.viewport = Some(viewport);
        self.events.dispatch(&HostEvent::Resized(viewport))
    }

    /// Advance one host frame: finish pending loads, then run frame tasks.
    pub fn tick(&mut self, now: Duration) -> usize {
        self.poll_library();
        self.frames.run_frame(now)
    }

    pub fn loader(&self) -> &ResourceLoader {
        &self.loader
    }

    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    pub fn events(&self) -> &EventHub {
        &self.events
    }

    /// Sessions still waiting for the library.
    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    fn poll_library(&mut self) {
        self.waiting.retain(|w| {
            w.upgrade()
                .map(|core| core.borrow().phase == SessionPhase::Loading)
                .unwrap_or(false)
        });
        if self.waiting.is_empty() {
            return;
        }

        match self.loader.ensure_loaded(self.options.library) {
            LoadState::Pending => {}
            LoadState::Ready(library) => {
                for waiting in mem::take(&mut self.waiting) {
                    if let Some(core) = waiting.upgrade() {
                        self.activate(&core, &library);
                    }
                }
            }
            LoadState::Failed => {
                for waiting in mem::take(&mut self.waiting) {
                    if let Some(core) = waiting.upgrade() {
                        debug!(session = core.borrow().id, "graphics library unavailable");
                        core.borrow_mut().phase = SessionPhase::Inert;
                    }
                }
            }
        }
    }

    fn activate(&mut self, core: &Rc<RefCell<SessionCore>>, library: &Arc<GraphicsLibrary>) {
        let mut session = core.borrow_mut();
        if session.phase != SessionPhase::Loading {
            return;
        }
        let Some(target) = session.mounted_target() else {
            session.phase = SessionPhase::Inert;
            return;
        };

        if let Some(viewport) = self.viewport {
            session.viewport = viewport;
        }
        self.next_surface += 1;
        let surface = SurfaceId(self.next_surface);
        target.insert_surface(surface);

        let mut rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        session.scene = Some(SceneHandle::build(
            library,
            session.viewport,
            self.options.cell,
            self.options.material.clone(),
            surface,
            &mut rng,
        ));

        let weak = Rc::downgrade(core);
        let listener: Weak<RefCell<dyn InputListener>> = weak.clone();
        let task: Weak<RefCell<dyn FrameTask>> = weak;
        session.listeners = vec![
            self.events.add_listener(EventKind::PointerMove, listener.clone()),
            self.events.add_listener(EventKind::Resize, listener),
        ];
        session.frame = Some(self.frames.schedule(task));
        session.phase = SessionPhase::Running;

        debug!(
            session = session.id,
            target = target.label(),
            width = session.viewport.width,
            height = session.viewport.height,
            "background attached"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::testing::{FailingFetch, InstantFetch, ManualFetch};
    use crate::scene::POINT_COUNT;

    fn options() -> BackgroundOptions {
        BackgroundOptions {
            seed: Some(11),
            ..Default::default()
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_end_to_end_session() {
        let mut runtime = BackgroundRuntime::new(InstantFetch, options());
        let target = MountTarget::new("home");
        let session = runtime.attach(&Rc::downgrade(&target), Viewport::new(1024, 768));

        assert_eq!(session.phase(), SessionPhase::Running);
        let aspect = session.camera_aspect().unwrap();
        assert!((aspect - 1.333).abs() < 0.001);

        runtime.pointer_moved(512.0, 384.0);
        let delta = session.pointer_delta();
        assert!(delta.x.abs() < 1e-6 && delta.y.abs() < 1e-6);

        runtime.pointer_moved(612.0, 384.0);
        assert!((session.pointer_delta().x - 1.0).abs() < 1e-6);

        runtime.tick(ms(0));
        runtime.tick(ms(16));
        assert_eq!(session.frames_rendered(), 2);

        runtime.detach(&session);
        for t in 2..10 {
            runtime.tick(ms(t * 16));
        }
        assert_eq!(session.frames_rendered(), 2);
        assert_eq!(runtime.frames().pending(), 0);
        assert_eq!(runtime.events().listener_count(), 0);
        assert_eq!(target.surface_count(), 0);
    }

    #[test]
    fn test_scene_has_full_point_cloud() {
        let mut runtime = BackgroundRuntime::new(InstantFetch, options());
        let target = MountTarget::new("about");
        let session = runtime.attach(&Rc::downgrade(&target), Viewport::new(800, 600));

        let positions = session
            .with_scene(|s| s.points().positions().to_vec())
            .unwrap();
        assert_eq!(positions.len(), 3 * POINT_COUNT);
        assert!(positions.iter().all(|c| (-400.0..400.0).contains(c)));
        assert_eq!(target.surface_count(), 1);
    }

    #[test]
    fn test_detach_before_load_has_no_side_effects() {
        let fetch = ManualFetch::default();
        let mut runtime = BackgroundRuntime::new(fetch.clone(), options());
        let target = MountTarget::new("projects");
        let session = runtime.attach(&Rc::downgrade(&target), Viewport::new(800, 600));

        assert_eq!(session.phase(), SessionPhase::Loading);
        runtime.detach(&session);
        fetch.complete();
        runtime.tick(ms(0));
        runtime.tick(ms(16));

        assert!(!session.has_scene());
        assert_eq!(session.phase(), SessionPhase::TornDown);
        assert_eq!(target.surface_count(), 0);
        assert_eq!(runtime.events().listener_count(), 0);
        assert_eq!(runtime.frames().pending(), 0);
        assert_eq!(runtime.waiting(), 0);
    }

    #[test]
    fn test_pending_session_activates_when_load_completes() {
        let fetch = ManualFetch::default();
        let mut runtime = BackgroundRuntime::new(fetch.clone(), options());
        let target = MountTarget::new("skill");
        let session = runtime.attach(&Rc::downgrade(&target), Viewport::new(800, 600));

        runtime.tick(ms(0));
        assert_eq!(session.phase(), SessionPhase::Loading);
        assert_eq!(session.frames_rendered(), 0);

        fetch.complete();
        runtime.tick(ms(16));
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.frames_rendered(), 1);
        assert_eq!(runtime.events().count_of(EventKind::PointerMove), 1);
        assert_eq!(runtime.events().count_of(EventKind::Resize), 1);
    }

    #[test]
    fn test_resize_while_loading_applies_on_activation() {
        let fetch = ManualFetch::default();
        let mut runtime = BackgroundRuntime::new(fetch.clone(), options());
        let target = MountTarget::new("home");
        let session = runtime.attach(&Rc::downgrade(&target), Viewport::new(800, 600));

        assert_eq!(runtime.resized(Viewport::new(1920, 1080)), 0);
        fetch.complete();
        runtime.tick(ms(0));

        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.camera_aspect(), Some(1920.0 / 1080.0));
        let size = session.with_scene(|s| s.renderer().size()).unwrap();
        assert_eq!(size, Viewport::new(1920, 1080));

        runtime.pointer_moved(960.0, 540.0);
        let delta = session.pointer_delta();
        assert!(delta.x.abs() < 1e-6 && delta.y.abs() < 1e-6);
    }

    #[test]
    fn test_concurrent_sessions_share_one_fetch() {
        let fetch = ManualFetch::default();
        let mut runtime = BackgroundRuntime::new(fetch.clone(), options());
        let first = MountTarget::new("home");
        let second = MountTarget::new("contact");
        let a = runtime.attach(&Rc::downgrade(&first), Viewport::new(800, 600));
        let b = runtime.attach(&Rc::downgrade(&second), Viewport::new(800, 600));

        assert_eq!(fetch.open(), 1);
        fetch.complete();
        runtime.tick(ms(0));

        assert_eq!(a.phase(), SessionPhase::Running);
        assert_eq!(b.phase(), SessionPhase::Running);
        assert_eq!(runtime.loader().fetches_started(), 1);
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut runtime = BackgroundRuntime::new(InstantFetch, options());
        let target = MountTarget::new("home");
        let session = runtime.attach(&Rc::downgrade(&target), Viewport::new(800, 600));

        runtime.detach(&session);
        let phase = session.phase();
        let listeners = runtime.events().listener_count();
        let surfaces = target.surface_count();

        runtime.detach(&session);
        assert_eq!(session.phase(), phase);
        assert_eq!(runtime.events().listener_count(), listeners);
        assert_eq!(target.surface_count(), surfaces);
    }

    #[test]
    fn test_sequential_sessions_load_once() {
        let mut runtime = BackgroundRuntime::new(InstantFetch, options());

        let home = MountTarget::new("home");
        let first = runtime.attach(&Rc::downgrade(&home), Viewport::new(800, 600));
        runtime.tick(ms(0));
        home.unmount();
        runtime.detach(&first);

        let about = MountTarget::new("about");
        let second = runtime.attach(&Rc::downgrade(&about), Viewport::new(800, 600));

        assert_eq!(second.phase(), SessionPhase::Running);
        assert_eq!(runtime.loader().fetches_started(), 1);
    }

    #[test]
    fn test_resize_sequence_sets_exact_aspect() {
        let mut runtime = BackgroundRuntime::new(InstantFetch, options());
        let target = MountTarget::new("home");
        let session = runtime.attach(&Rc::downgrade(&target), Viewport::new(800, 600));

        let sizes = [(1024, 768), (1920, 1080), (333, 777), (640, 640)];
        for (i, (w, h)) in sizes.into_iter().enumerate() {
            let before = session.frames_rendered();
            runtime.resized(Viewport::new(w, h));
            assert_eq!(session.camera_aspect(), Some(w as f32 / h as f32));

            runtime.tick(ms(i as u64 * 16));
            assert_eq!(session.frames_rendered(), before + 1);
        }
        let size = session.with_scene(|s| s.renderer().size()).unwrap();
        assert_eq!(size, Viewport::new(640, 640));
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut runtime = BackgroundRuntime::new(InstantFetch, options());
        let target = MountTarget::new("gone");
        let weak = Rc::downgrade(&target);
        drop(target);

        let session = runtime.attach(&weak, Viewport::new(800, 600));
        assert_eq!(session.phase(), SessionPhase::Inert);
        assert_eq!(runtime.loader().fetches_started(), 0);
        assert_eq!(runtime.events().listener_count(), 0);
        assert_eq!(runtime.tick(ms(0)), 0);

        runtime.detach(&session);
        assert_eq!(session.phase(), SessionPhase::TornDown);
    }

    #[test]
    fn test_failed_load_leaves_background_inert() {
        let mut runtime = BackgroundRuntime::new(FailingFetch, options());
        let target = MountTarget::new("home");
        let session = runtime.attach(&Rc::downgrade(&target), Viewport::new(800, 600));

        assert_eq!(session.phase(), SessionPhase::Inert);
        assert!(!session.has_scene());
        assert_eq!(runtime.tick(ms(0)), 0);
        runtime.detach(&session);
    }

    #[test]
    fn test_pending_load_failure_leaves_background_inert() {
        let fetch = ManualFetch::default();
        let mut runtime = BackgroundRuntime::new(fetch.clone(), options());
        let target = MountTarget::new("home");
        let session = runtime.attach(&Rc::downgrade(&target), Viewport::new(800, 600));

        fetch.fail();
        runtime.tick(ms(0));
        assert_eq!(session.phase(), SessionPhase::Inert);
        assert_eq!(runtime.waiting(), 0);
    }

    #[test]
    fn test_unmounted_target_stops_loop() {
        let mut runtime = BackgroundRuntime::new(InstantFetch, options());
        let target = MountTarget::new("home");
        let session = runtime.attach(&Rc::downgrade(&target), Viewport::new(800, 600));

        runtime.tick(ms(0));
        target.unmount();
        runtime.tick(ms(16));
        runtime.tick(ms(33));

        assert_eq!(session.frames_rendered(), 1);
        assert_eq!(runtime.frames().pending(), 0);

        runtime.detach(&session);
        assert_eq!(runtime.events().listener_count(), 0);
    }

    #[test]
    fn test_detached_session_ignores_input() {
        let mut runtime = BackgroundRuntime::new(InstantFetch, options());
        let target = MountTarget::new("home");
        let session = runtime.attach(&Rc::downgrade(&target), Viewport::new(800, 600));

        runtime.detach(&session);
        assert_eq!(runtime.pointer_moved(0.0, 0.0), 0);
        assert_eq!(session.pointer_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_elapsed_time_measured_from_loop_start() {
        let mut runtime = BackgroundRuntime::new(InstantFetch, options());
        let target = MountTarget::new("home");
        let session = runtime.attach(&Rc::downgrade(&target), Viewport::new(800, 600));

        runtime.tick(ms(50_000));
        let rotation = session.with_scene(|s| s.points().rotation).unwrap();
        assert_eq!(rotation, Vec2::ZERO);

        runtime.tick(ms(60_000));
        let rotation = session.with_scene(|s| s.points().rotation).unwrap();
        assert!((rotation.x - 0.2).abs() < 1e-6);
        assert!((rotation.y - 0.4).abs() < 1e-6);
    }
}
