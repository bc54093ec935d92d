//! Timer scheduling.
//!
//! The loader only ever needs fixed-delay, one-shot timers. [`Scheduler`]
//! abstracts where they come from so the same controller runs on the
//! browser's `setTimeout` and on [`ManualScheduler`], a simulated clock.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A scheduled one-shot timer.
///
/// Implementations may cancel the timer when the handle is dropped, so
/// callers keep handles alive until the timer has fired.
pub trait TimerHandle {
    /// Stop the timer if it has not fired yet. Cancelling a fired timer is a no-op.
    fn cancel(self);
}

pub trait Scheduler {
    type Handle: TimerHandle;

    /// Run `task` once, `delay_ms` milliseconds from now.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

struct PendingTimer {
    id: u64,
    due_ms: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
///
/// Timers fire in deadline order; timers sharing a deadline fire in the
/// order they were scheduled.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<TimerQueue>>,
}

pub struct ManualTimer {
    id: u64,
    queue: Weak<RefCell<TimerQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed on the simulated clock.
    pub fn now_ms(&self) -> u64 {
        self.queue.borrow().now_ms
    }

    /// Number of timers that have neither fired nor been cancelled.
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Move the clock forward by `ms`, firing every timer that comes due,
    /// including timers scheduled by callbacks within the window.
    pub fn advance(&self, ms: u64) {
        let target = self.queue.borrow().now_ms + ms;

        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let index = queue
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due_ms <= target)
                    .min_by_key(|(_, timer)| (timer.due_ms, timer.id))
                    .map(|(index, _)| index);

                match index {
                    Some(index) => {
                        let timer = queue.pending.remove(index);
                        queue.now_ms = timer.due_ms;
                        Some(timer.task)
                    }
                    None => None,
                }
            };

            // The queue borrow is released before running so tasks can
            // schedule or cancel timers.
            match next {
                Some(task) => task(),
                None => break,
            }
        }

        self.queue.borrow_mut().now_ms = target;
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualTimer {
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        let due_ms = queue.now_ms + u64::from(delay_ms);
        queue.pending.push(PendingTimer { id, due_ms, task });

        ManualTimer {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }
}

impl TimerHandle for ManualTimer {
    fn cancel(self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().pending.retain(|timer| timer.id != self.id);
        }
    }
}
