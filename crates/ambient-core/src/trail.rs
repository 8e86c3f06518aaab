//! Goo cursor trail: a zero-lag leader dot and a blob that chases it.
//!
//! The blob moves a fixed fraction of the remaining distance every frame, a
//! discrete exponential follower with time constant of roughly
//! `1 / (refresh_rate * lerp_factor)`. Lag distance stretches the blob along
//! the direction of travel and thins it across.

use crate::config::TrailParams;
use crate::pointer::PointerSample;
use crate::schedule::{Scheduler, Task, TaskSlot};
use glam::Vec2;
use std::time::Duration;

/// Ellipse radii for a given lag `distance`: `(major, minor)`.
///
/// Only the first `stretch_cap` pixels of lag deform the blob, so the major
/// radius is bounded and the minor radius never drops below `min_radius`.
#[inline]
pub fn deform(distance: f32, params: &TrailParams) -> (f32, f32) {
    let stretch = distance.max(0.0).min(params.stretch_cap);
    let major = params.base_radius + stretch * params.elongation_gain;
    let minor = (params.base_radius - stretch * params.thinning_gain).max(params.min_radius);
    (major, minor)
}

/// Everything the renderer needs to draw the trail for one frame.
///
/// Draw order: the leader dot and the rotated blob together through the goo
/// filter, then the hole at the leader at `hole_opacity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailShape {
    pub leader: Vec2,
    pub blob: Vec2,
    pub angle_deg: f32,
    pub distance: f32,
    pub major_radius: f32,
    pub minor_radius: f32,
    pub leader_radius: f32,
    pub hole_radius: f32,
    pub hole_visible: bool,
    pub hole_opacity: f32,
}

impl TrailShape {
    pub fn angle_rad(&self) -> f32 {
        self.angle_deg.to_radians()
    }
}

pub struct CursorTrail {
    params: TrailParams,
    leader: Vec2,
    blob: Vec2,
    hole_opacity: f32,
    hole_visible: bool,
    frame: TaskSlot,
    frames: u64,
}

impl CursorTrail {
    /// Leader and blob both start at `origin`; the hole starts shown.
    pub fn new(params: TrailParams, origin: Vec2) -> Self {
        Self {
            params,
            leader: origin,
            blob: origin,
            hole_opacity: 1.0,
            hole_visible: true,
            frame: TaskSlot::empty(),
            frames: 0,
        }
    }

    pub fn params(&self) -> &TrailParams {
        &self.params
    }

    pub fn leader(&self) -> Vec2 {
        self.leader
    }

    pub fn blob(&self) -> Vec2 {
        self.blob
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_armed()
    }

    /// Advance one display frame toward `pointer`.
    pub fn on_frame(&mut self, pointer: &PointerSample, dt: Duration) {
        self.leader = pointer.position;
        self.blob += (self.leader - self.blob) * self.params.lerp_factor;

        self.hole_visible = !pointer.is_moving;
        let target = if self.hole_visible { 1.0 } else { 0.0 };
        let fade = self.params.hole_fade.as_secs_f32();
        self.hole_opacity = if fade <= 0.0 {
            target
        } else {
            let step = dt.as_secs_f32() / fade;
            if target > self.hole_opacity {
                (self.hole_opacity + step).min(target)
            } else {
                (self.hole_opacity - step).max(target)
            }
        };
        self.frames += 1;
    }

    pub fn shape(&self) -> TrailShape {
        let delta = self.leader - self.blob;
        let distance = delta.length();
        let (major_radius, minor_radius) = deform(distance, &self.params);
        TrailShape {
            leader: self.leader,
            blob: self.blob,
            angle_deg: delta.y.atan2(delta.x).to_degrees(),
            distance,
            major_radius,
            minor_radius,
            leader_radius: self.params.leader_radius,
            hole_radius: self.params.hole_radius,
            hole_visible: self.hole_visible,
            hole_opacity: self.hole_opacity,
        }
    }

    /// Request the first frame of the chain.
    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.request_frame(scheduler);
    }

    /// Mark the outstanding request as consumed. Returns false for a frame
    /// that fired after the chain was cancelled.
    pub fn frame_fired(&mut self) -> bool {
        self.frame.fired().is_some()
    }

    pub fn request_frame<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        let handle = scheduler.next_frame(Task::TrailFrame);
        self.frame.arm(scheduler, handle);
    }

    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.frame.disarm(scheduler) {
            log::debug!("[trail] frame chain cancelled after {} frames", self.frames);
        }
    }
}
