//! Cooperative frame scheduling.
//!
//! A [`FrameScheduler`] plays the role of the host's animation-frame queue:
//! tasks are queued with [`FrameScheduler::schedule`] and invoked once per
//! [`FrameScheduler::run_frame`]. A task keeps running while it returns
//! [`FrameControl::Continue`] and its [`FrameHandle`] is active.

use std::cell::{Cell, RefCell};
use std::mem;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Whether a task wants another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Work performed once per frame.
pub trait FrameTask {
    /// Run one frame at host time `now`.
    fn on_frame(&mut self, now: Duration) -> FrameControl;
}

/// Cancellable handle to a scheduled task.
#[derive(Debug, Clone)]
pub struct FrameHandle {
    live: Rc<Cell<bool>>,
}

impl FrameHandle {
    pub fn is_active(&self) -> bool {
        self.live.get()
    }

    /// Stop the task. Safe to call more than once.
    pub fn cancel(&self) {
        self.live.set(false);
    }
}

struct Scheduled {
    handle: FrameHandle,
    task: Weak<RefCell<dyn FrameTask>>,
}

/// Queue of frame tasks driven by the host.
#[derive(Default)]
pub struct FrameScheduler {
    queued: Vec<Scheduled>,
    frames_run: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` for the next frame and every frame after it.
    pub fn schedule(&mut self, task: Weak<RefCell<dyn FrameTask>>) -> FrameHandle {
        let handle = FrameHandle {
            live: Rc::new(Cell::new(true)),
        };
        self.queued.push(Scheduled {
            handle: handle.clone(),
            task,
        });
        handle
    }

    /// Run every queued task once. Returns the number of tasks invoked.
    pub fn run_frame(&mut self, now: Duration) -> usize {
        self.frames_run += 1;
        let due = mem::take(&mut self.queued);
        let mut invoked = 0;

        for scheduled in due {
            if !scheduled.handle.is_active() {
                continue;
            }
            let Some(task) = scheduled.task.upgrade() else {
                scheduled.handle.cancel();
                continue;
            };

            invoked += 1;
            let control = task.borrow_mut().on_frame(now);
            match control {
                FrameControl::Continue if scheduled.handle.is_active() => {
                    self.queued.push(scheduled)
                }
                _ => scheduled.handle.cancel(),
            }
        }

        invoked
    }

    /// Number of tasks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queued.iter().filter(|s| s.handle.is_active()).count()
    }

    /// Number of frames the host has run.
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        calls: Vec<Duration>,
        stop_after: Option<usize>,
    }

    impl FrameTask for Counter {
        fn on_frame(&mut self, now: Duration) -> FrameControl {
            self.calls.push(now);
            match self.stop_after {
                Some(n) if self.calls.len() >= n => FrameControl::Stop,
                _ => FrameControl::Continue,
            }
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_task_runs_once_per_frame() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut frames = FrameScheduler::new();
        let weak = Rc::downgrade(&counter);
        let task: Weak<RefCell<dyn FrameTask>> = weak;
        let handle = frames.schedule(task);

        for t in [0, 16, 33] {
            assert_eq!(frames.run_frame(ms(t)), 1);
        }

        assert_eq!(counter.borrow().calls, vec![ms(0), ms(16), ms(33)]);
        assert!(handle.is_active());
        assert_eq!(frames.pending(), 1);
    }

    #[test]
    fn test_cancelled_task_never_runs_again() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut frames = FrameScheduler::new();
        let weak = Rc::downgrade(&counter);
        let task: Weak<RefCell<dyn FrameTask>> = weak;
        let handle = frames.schedule(task);

        frames.run_frame(ms(0));
        handle.cancel();
        handle.cancel();

        assert_eq!(frames.run_frame(ms(16)), 0);
        assert_eq!(frames.pending(), 0);
        assert_eq!(counter.borrow().calls.len(), 1);
    }

    #[test]
    fn test_task_can_stop_itself() {
        let counter = Rc::new(RefCell::new(Counter {
            stop_after: Some(2),
            ..Default::default()
        }));
        let mut frames = FrameScheduler::new();
        let weak = Rc::downgrade(&counter);
        let task: Weak<RefCell<dyn FrameTask>> = weak;
        let handle = frames.schedule(task);

        frames.run_frame(ms(0));
        frames.run_frame(ms(16));
        frames.run_frame(ms(33));

        assert_eq!(counter.borrow().calls.len(), 2);
        assert!(!handle.is_active());
    }

    #[test]
    fn test_dropped_task_is_released() {
        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut frames = FrameScheduler::new();
        let weak = Rc::downgrade(&counter);
        let task: Weak<RefCell<dyn FrameTask>> = weak;
        let handle = frames.schedule(task);

        drop(counter);

        assert_eq!(frames.run_frame(ms(0)), 0);
        assert!(!handle.is_active());
        assert_eq!(frames.frames_run(), 1);
    }
}
