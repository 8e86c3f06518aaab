use crate::config::SamplerParams;
use crate::schedule::{Scheduler, Task, TaskSlot};
use glam::Vec2;
use std::time::Duration;

/// Latest pointer reading in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub is_moving: bool,
}

/// Single writer of the shared [`PointerSample`].
///
/// Each move overwrites the position with no smoothing and restarts the quiet
/// timer; when the timer fires the moving flag drops.
#[derive(Debug)]
pub struct PointerSampler {
    sample: PointerSample,
    seen: bool,
    quiet_period: Duration,
    quiet: TaskSlot,
}

impl PointerSampler {
    pub fn new(params: &SamplerParams) -> Self {
        Self {
            sample: PointerSample::default(),
            seen: false,
            quiet_period: params.quiet_period,
            quiet: TaskSlot::empty(),
        }
    }

    #[inline]
    pub fn sample(&self) -> &PointerSample {
        &self.sample
    }

    /// Whether any move has been observed since creation.
    pub fn has_sample(&self) -> bool {
        self.seen
    }

    pub fn quiet_pending(&self) -> bool {
        self.quiet.is_armed()
    }

    pub fn on_pointer_move<S: Scheduler + ?Sized>(&mut self, position: Vec2, scheduler: &mut S) {
        self.sample.position = position;
        self.sample.is_moving = true;
        self.seen = true;
        let handle = scheduler.after(self.quiet_period, Task::QuietElapsed);
        self.quiet.arm(scheduler, handle);
    }

    /// Quiet timer fired. Returns true when the moving flag actually dropped;
    /// a stale delivery after [`PointerSampler::stop`] changes nothing.
    pub fn on_quiet_elapsed(&mut self) -> bool {
        if self.quiet.fired().is_none() {
            return false;
        }
        let was_moving = self.sample.is_moving;
        self.sample.is_moving = false;
        was_moving
    }

    /// Cancel the pending quiet timer. The moving flag is cleared so a
    /// restarted subsystem does not inherit a flag nobody will reset.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.quiet.disarm(scheduler);
        self.sample.is_moving = false;
    }
}
