//! Viewport-wide input listeners.

use std::cell::RefCell;
use std::rc::Weak;

use folio_core::Viewport;

/// Input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer position in viewport pixels.
    PointerMoved { x: f32, y: f32 },
    /// New viewport size.
    Resized(Viewport),
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::PointerMoved { .. } => EventKind::PointerMove,
            HostEvent::Resized(_) => EventKind::Resize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PointerMove,
    Resize,
}

/// Receiver of host input.
pub trait InputListener {
    fn on_event(&mut self, event: &HostEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration {
    id: ListenerId,
    kind: EventKind,
    listener: Weak<RefCell<dyn InputListener>>,
}

/// Registry of listeners bound to the whole viewport.
#[derive(Default)]
pub struct EventHub {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(
        &mut self,
        kind: EventKind,
        listener: Weak<RefCell<dyn InputListener>>,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.registrations.push(Registration { id, kind, listener });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    /// Deliver `event` to every listener of its kind. Returns the number reached.
    pub fn dispatch(&mut self, event: &HostEvent) -> usize {
        self.registrations.retain(|r| r.listener.strong_count() > 0);

        let kind = event.kind();
        let mut delivered = 0;
        for registration in self.registrations.iter().filter(|r| r.kind == kind) {
            if let Some(listener) = registration.listener.upgrade() {
                listener.borrow_mut().on_event(event);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.registrations.len()
    }

    pub fn count_of(&self, kind: EventKind) -> usize {
        self.registrations.iter().filter(|r| r.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<HostEvent>,
    }

    impl InputListener for Recorder {
        fn on_event(&mut self, event: &HostEvent) {
            self.seen.push(*event);
        }
    }

    #[test]
    fn test_dispatch_by_kind() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut hub = EventHub::new();
        let weak = Rc::downgrade(&recorder);
        let listener: Weak<RefCell<dyn InputListener>> = weak;
        hub.add_listener(EventKind::Resize, listener);

        assert_eq!(hub.dispatch(&HostEvent::PointerMoved { x: 1.0, y: 2.0 }), 0);
        assert_eq!(hub.dispatch(&HostEvent::Resized(Viewport::new(10, 10))), 1);
        assert_eq!(
            recorder.borrow().seen,
            vec![HostEvent::Resized(Viewport::new(10, 10))]
        );
    }

    #[test]
    fn test_removed_listener_gets_nothing() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut hub = EventHub::new();
        let weak = Rc::downgrade(&recorder);
        let listener: Weak<RefCell<dyn InputListener>> = weak;
        let id = hub.add_listener(EventKind::PointerMove, listener);

        assert!(hub.remove_listener(id));
        assert!(!hub.remove_listener(id));
        assert_eq!(hub.dispatch(&HostEvent::PointerMoved { x: 0.0, y: 0.0 }), 0);
        assert!(recorder.borrow().seen.is_empty());
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_dropped_listener_is_pruned() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut hub = EventHub::new();
        let weak = Rc::downgrade(&recorder);
        let listener: Weak<RefCell<dyn InputListener>> = weak;
        hub.add_listener(EventKind::PointerMove, listener);

        drop(recorder);
        hub.dispatch(&HostEvent::PointerMoved { x: 0.0, y: 0.0 });
        assert_eq!(hub.listener_count(), 0);
    }
}
