//! Deferred work on the single event-processing thread.
//!
//! Tasks are plain data. Whoever runs them must re-check that the state they
//! were scheduled for still holds; nothing is ever cancelled.

use std::time::{Duration, Instant};

use crate::ownership::SurfaceKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Activate a freshly attached window if it is still the front child.
    ActivateIfFront(SurfaceKey),
    /// Second half of a delayed activation: raise, select, focus.
    FinishActivation {
        window: SurfaceKey,
        target: Option<SurfaceKey>,
    },
    /// Raise an already active window that was clicked through a child.
    RaiseActive {
        window: SurfaceKey,
        target: Option<SurfaceKey>,
    },
    /// Delayed clearing of the owned-raise flag of a deactivated window.
    DropOwnedRaise(SurfaceKey),
    /// Switcher commit: restore if minimized, then activate.
    SwitchTo(SurfaceKey),
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: Instant,
    seq: u64,
    task: DeferredTask,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: Vec<Scheduled>,
    seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Duration, task: DeferredTask) {
        self.schedule_at(Instant::now() + delay, task);
    }

    pub fn schedule_at(&mut self, due: Instant, task: DeferredTask) {
        let seq = self.seq;
        self.seq = self.seq.wrapping_add(1);
        tracing::trace!(?task, seq, "scheduled deferred task");
        self.queue.push(Scheduled { due, seq, task });
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.iter().map(|s| s.due).min()
    }

    /// Remove and return every task due at `now`, in due order then
    /// scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<DeferredTask> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|s| s.due <= now);
        self.queue = rest;
        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.task).collect()
    }

    /// Remove and return the earliest task regardless of its due time.
    pub fn take_next(&mut self) -> Option<DeferredTask> {
        let idx = self
            .queue
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.due.cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;
        Some(self.queue.remove(idx).task)
    }
}
