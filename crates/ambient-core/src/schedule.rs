//! Timer and frame scheduling seam between the simulation and its host.
//!
//! The core never owns callbacks. It asks a [`Scheduler`] to fire a [`Task`]
//! later and keeps the returned [`TaskHandle`] in a [`TaskSlot`] so the
//! activity can be cancelled. The host routes fired tasks back through
//! [`crate::AmbientFx::run`].

use std::time::Duration;

/// Recurring or one-shot activities the host can be asked to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    /// Fixed-cadence star field step.
    FieldTick,
    /// Display-synchronized trail update and redraw.
    TrailFrame,
    /// Pointer quiet period elapsed.
    QuietElapsed,
}

/// Opaque cancellation token issued by a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

pub trait Scheduler {
    /// Monotonic time since the scheduler was created.
    fn now(&self) -> Duration;
    /// Fire `task` every `period` until cancelled.
    fn every(&mut self, period: Duration, task: Task) -> TaskHandle;
    /// Fire `task` once after `delay`.
    fn after(&mut self, delay: Duration, task: Task) -> TaskHandle;
    /// Fire `task` once on the next display frame.
    fn next_frame(&mut self, task: Task) -> TaskHandle;
    /// Cancel a pending activity. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TaskHandle);
}

/// Holds the handle of at most one armed activity.
#[derive(Debug, Default)]
pub struct TaskSlot(Option<TaskHandle>);

impl TaskSlot {
    pub const fn empty() -> Self {
        Self(None)
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.0.is_some()
    }

    pub fn handle(&self) -> Option<TaskHandle> {
        self.0
    }

    /// Store a new handle, cancelling whatever was armed before.
    pub fn arm<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, handle: TaskHandle) {
        if let Some(old) = self.0.replace(handle) {
            scheduler.cancel(old);
        }
    }

    /// Cancel the armed activity if any. Safe to call repeatedly.
    pub fn disarm<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.0.take() {
            Some(h) => {
                scheduler.cancel(h);
                true
            }
            None => false,
        }
    }

    /// Forget a handle whose one-shot activity has just fired.
    pub fn fired(&mut self) -> Option<TaskHandle> {
        self.0.take()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Kind {
    Once,
    Every(Duration),
}

#[derive(Clone, Debug)]
struct Timer {
    handle: TaskHandle,
    task: Task,
    due: Duration,
    kind: Kind,
}

/// Virtual-time scheduler stepped by hand.
///
/// Timers fire from [`ManualScheduler::pop_due`] in due order after
/// [`ManualScheduler::advance`]; frame requests are released one at a time by
/// [`ManualScheduler::take_frame`]. Used by the tests and the headless driver.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    horizon: Duration,
    next_id: u64,
    timers: Vec<Timer>,
    frames: Vec<(TaskHandle, Task)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self) -> TaskHandle {
        self.next_id += 1;
        TaskHandle::new(self.next_id)
    }

    /// Move the time horizon forward. Timers due before it are released by
    /// [`ManualScheduler::pop_due`].
    pub fn advance(&mut self, dt: Duration) {
        self.horizon = self.horizon.max(self.now) + dt;
    }

    /// Next timer due at or before the horizon, in due order. Returns `None`
    /// once nothing else is due, leaving the clock at the horizon.
    pub fn pop_due(&mut self) -> Option<Task> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= self.horizon)
            .min_by_key(|(_, t)| (t.due, t.handle.id()))
            .map(|(i, _)| i);
        let Some(idx) = idx else {
            self.now = self.now.max(self.horizon);
            return None;
        };
        let Timer { task, due, kind, .. } = self.timers[idx].clone();
        self.now = due;
        match kind {
            Kind::Every(period) => self.timers[idx].due += period,
            Kind::Once => {
                self.timers.swap_remove(idx);
            }
        }
        Some(task)
    }

    /// Release the oldest outstanding frame request.
    pub fn take_frame(&mut self) -> Option<Task> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0).1)
        }
    }

    /// Armed timers plus outstanding frame requests.
    pub fn pending(&self) -> usize {
        self.timers.len() + self.frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
            || self.frames.iter().any(|(h, _)| *h == handle)
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn every(&mut self, period: Duration, task: Task) -> TaskHandle {
        // a zero period would never let pop_due drain
        let period = period.max(Duration::from_nanos(1));
        let handle = self.issue();
        self.timers.push(Timer {
            handle,
            task,
            due: self.now + period,
            kind: Kind::Every(period),
        });
        handle
    }

    fn after(&mut self, delay: Duration, task: Task) -> TaskHandle {
        let handle = self.issue();
        self.timers.push(Timer {
            handle,
            task,
            due: self.now + delay,
            kind: Kind::Once,
        });
        handle
    }

    fn next_frame(&mut self, task: Task) -> TaskHandle {
        let handle = self.issue();
        self.frames.push((handle, task));
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.timers.retain(|t| t.handle != handle);
        self.frames.retain(|(h, _)| *h != handle);
    }
}
