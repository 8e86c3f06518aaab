use crate::config::FxConfig;
use crate::error::ConfigError;
use crate::pointer::{PointerSample, PointerSampler};
use crate::schedule::{ManualScheduler, Scheduler, Task};
use crate::starfield::{StarField, StarSprite};
use crate::trail::{CursorTrail, TrailShape};
use glam::Vec2;
use rand::Rng;
use std::time::Duration;

/// Viewport size in CSS pixels, read on demand.
pub trait Viewport {
    fn size(&self) -> Vec2;
}

impl Viewport for Vec2 {
    fn size(&self) -> Vec2 {
        *self
    }
}

/// One display frame worth of draw primitives.
#[derive(Clone, Copy, Debug)]
pub struct FrameDraw<'a> {
    pub viewport: Vec2,
    pub stars: &'a [StarSprite],
    /// `None` until the pointer has been seen.
    pub trail: Option<TrailShape>,
}

/// Sink for draw primitives. Never read back by the simulation.
pub trait Renderer {
    fn draw(&mut self, frame: &FrameDraw<'_>);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FxStats {
    pub ticks: u64,
    pub frames: u64,
    pub respawns: u64,
    pub pointer_moves: u64,
}

/// Composes the pointer sampler, star field and cursor trail over one
/// scheduler, and routes fired [`Task`]s to them.
pub struct AmbientFx<S, R, V, D> {
    scheduler: S,
    rng: R,
    viewport: V,
    renderer: D,
    pointer: PointerSampler,
    field: StarField,
    trail: CursorTrail,
    sprites: Vec<StarSprite>,
    last_frame: Option<Duration>,
    pointer_moves: u64,
    running: bool,
}

impl<S, R, V, D> AmbientFx<S, R, V, D>
where
    S: Scheduler,
    R: Rng,
    V: Viewport,
    D: Renderer,
{
    pub fn new(
        config: FxConfig,
        scheduler: S,
        mut rng: R,
        viewport: V,
        renderer: D,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let FxConfig {
            sampler,
            field,
            trail,
        } = config;
        let pointer = PointerSampler::new(&sampler);
        let origin = pointer.sample().position;
        let field = StarField::new(field, &mut rng);
        Ok(Self {
            scheduler,
            rng,
            viewport,
            renderer,
            sprites: Vec::with_capacity(field.len()),
            pointer,
            field,
            trail: CursorTrail::new(trail, origin),
            last_frame: None,
            pointer_moves: 0,
            running: false,
        })
    }

    /// Arm the field ticker and the frame chain. Restarting a running
    /// subsystem cancels everything first.
    pub fn start(&mut self) {
        if self.running {
            self.stop();
        }
        self.field.start(&mut self.scheduler);
        self.trail.start(&mut self.scheduler);
        self.last_frame = None;
        self.running = true;
        log::info!("[fx] started: {} stars", self.field.len());
    }

    /// Cancel the ticker, the frame chain and the quiet timer. Idempotent.
    pub fn stop(&mut self) {
        self.field.stop(&mut self.scheduler);
        self.trail.stop(&mut self.scheduler);
        self.pointer.stop(&mut self.scheduler);
        if std::mem::replace(&mut self.running, false) {
            let s = self.stats();
            log::info!(
                "[fx] stopped after {} ticks, {} frames, {} respawns",
                s.ticks,
                s.frames,
                s.respawns
            );
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed a raw pointer position. Ignored while stopped so no quiet timer
    /// can be armed after teardown.
    pub fn pointer_move(&mut self, position: Vec2) {
        if !self.running {
            return;
        }
        self.pointer.on_pointer_move(position, &mut self.scheduler);
        self.pointer_moves += 1;
    }

    /// Handle a task fired by the scheduler. Tasks whose activity was
    /// cancelled in the meantime are dropped.
    pub fn run(&mut self, task: Task) {
        match task {
            Task::FieldTick => {
                if self.field.is_running() {
                    let n = self.field.tick(&mut self.rng);
                    if n > 0 {
                        log::trace!("[field] {} stars respawned", n);
                    }
                }
            }
            Task::TrailFrame => {
                if self.trail.frame_fired() {
                    self.frame();
                    self.trail.request_frame(&mut self.scheduler);
                }
            }
            Task::QuietElapsed => {
                self.pointer.on_quiet_elapsed();
            }
        }
    }

    fn frame(&mut self) {
        let now = self.scheduler.now();
        let dt = self
            .last_frame
            .map(|prev| now.saturating_sub(prev))
            .unwrap_or_default();
        self.last_frame = Some(now);

        let sample = *self.pointer.sample();
        self.trail.on_frame(&sample, dt);

        let viewport = self.viewport.size();
        self.field
            .sprites_into(sample.position, viewport, &mut self.sprites);
        let trail = self.pointer.has_sample().then(|| self.trail.shape());
        self.renderer.draw(&FrameDraw {
            viewport,
            stars: &self.sprites,
            trail,
        });
    }

    pub fn stats(&self) -> FxStats {
        FxStats {
            ticks: self.field.ticks(),
            frames: self.trail.frames(),
            respawns: self.field.respawns(),
            pointer_moves: self.pointer_moves,
        }
    }

    pub fn pointer(&self) -> &PointerSample {
        self.pointer.sample()
    }

    pub fn field(&self) -> &StarField {
        &self.field
    }

    pub fn trail(&self) -> &CursorTrail {
        &self.trail
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn renderer(&self) -> &D {
        &self.renderer
    }
}

impl<R, V, D> AmbientFx<ManualScheduler, R, V, D>
where
    R: Rng,
    V: Viewport,
    D: Renderer,
{
    /// Advance virtual time by `dt`, running every timer that falls due.
    pub fn advance(&mut self, dt: Duration) {
        self.scheduler.advance(dt);
        while let Some(task) = self.scheduler.pop_due() {
            self.run(task);
        }
    }

    /// Run the outstanding display frame, if one was requested.
    pub fn step_frame(&mut self) -> bool {
        match self.scheduler.take_frame() {
            Some(task) => {
                self.run(task);
                true
            }
            None => false,
        }
    }

    /// Advance by `dt` and then run one display frame.
    pub fn advance_frame(&mut self, dt: Duration) -> bool {
        self.advance(dt);
        self.step_frame()
    }
}
