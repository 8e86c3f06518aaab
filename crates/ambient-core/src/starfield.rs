//! Drifting background stars.
//!
//! Star positions live in field space: percentages of the viewport on each
//! axis. Motion is advanced on a fixed tick and never depends on the pointer;
//! parallax is applied only when building [`StarSprite`]s for drawing.

use crate::config::StarFieldParams;
use crate::schedule::{Scheduler, Task, TaskSlot};
use glam::Vec2;
use rand::Rng;

/// One of the eight compass headings. Screen coordinates: `Up` decreases y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Heading {
    pub const ALL: [Heading; 8] = [
        Heading::Up,
        Heading::Down,
        Heading::Left,
        Heading::Right,
        Heading::UpLeft,
        Heading::UpRight,
        Heading::DownLeft,
        Heading::DownRight,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Unit-ish direction; diagonals use `diagonal` on each axis.
    pub fn direction(self, diagonal: f32) -> Vec2 {
        match self {
            Heading::Up => Vec2::new(0.0, -1.0),
            Heading::Down => Vec2::new(0.0, 1.0),
            Heading::Left => Vec2::new(-1.0, 0.0),
            Heading::Right => Vec2::new(1.0, 0.0),
            Heading::UpLeft => Vec2::new(-diagonal, -diagonal),
            Heading::UpRight => Vec2::new(diagonal, -diagonal),
            Heading::DownLeft => Vec2::new(-diagonal, diagonal),
            Heading::DownRight => Vec2::new(diagonal, diagonal),
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Heading::UpLeft | Heading::UpRight | Heading::DownLeft | Heading::DownRight
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub speed: f32,
    pub heading: Heading,
    pub parallax_factor: f32,
}

impl Star {
    /// Fresh star with every attribute drawn independently from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, params: &StarFieldParams) -> Self {
        let x = params.spawn.sample(rng);
        let y = params.spawn.sample(rng);
        Self {
            position: Vec2::new(x, y),
            size: params.size.sample(rng),
            opacity: params.opacity.sample(rng),
            speed: params.speed.sample(rng),
            heading: Heading::random(rng),
            parallax_factor: params.parallax.sample(rng),
        }
    }

    #[inline]
    pub fn step(&self, diagonal: f32) -> Vec2 {
        self.heading.direction(diagonal) * self.speed
    }
}

/// Render-only displacement of a star away from its logical position.
#[inline]
pub fn render_offset(star: &Star, pointer: Vec2, viewport_center: Vec2) -> Vec2 {
    (pointer - viewport_center) * star.parallax_factor
}

/// Draw primitive for one star, in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarSprite {
    pub center: Vec2,
    pub size: f32,
    pub opacity: f32,
}

pub struct StarField {
    params: StarFieldParams,
    stars: Vec<Star>,
    ticker: TaskSlot,
    ticks: u64,
    respawns: u64,
}

impl StarField {
    pub fn new<R: Rng + ?Sized>(params: StarFieldParams, rng: &mut R) -> Self {
        let stars = (0..params.count)
            .map(|_| Star::random(rng, &params))
            .collect();
        Self::with_stars(params, stars)
    }

    /// Field seeded with explicit stars; the count is fixed from here on.
    pub fn with_stars(params: StarFieldParams, stars: Vec<Star>) -> Self {
        Self {
            params,
            stars,
            ticker: TaskSlot::empty(),
            ticks: 0,
            respawns: 0,
        }
    }

    pub fn params(&self) -> &StarFieldParams {
        &self.params
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn respawns(&self) -> u64 {
        self.respawns
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_armed()
    }

    #[inline]
    pub fn in_bounds(&self, p: Vec2) -> bool {
        self.params.bounds.contains(p.x) && self.params.bounds.contains(p.y)
    }

    /// Advance every star one step. Stars that leave the bounds are replaced
    /// in place by a freshly generated star. Returns how many respawned.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let diagonal = self.params.diagonal_step;
        let mut respawned = 0;
        for i in 0..self.stars.len() {
            let next = self.stars[i].position + self.stars[i].step(diagonal);
            if self.in_bounds(next) {
                self.stars[i].position = next;
            } else {
                self.stars[i] = Star::random(rng, &self.params);
                respawned += 1;
            }
        }
        self.ticks += 1;
        self.respawns += respawned as u64;
        respawned
    }

    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        let handle = scheduler.every(self.params.tick_interval, Task::FieldTick);
        self.ticker.arm(scheduler, handle);
        log::debug!(
            "[field] ticking {} stars every {:?}",
            self.stars.len(),
            self.params.tick_interval
        );
    }

    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.ticker.disarm(scheduler) {
            log::debug!("[field] ticker cancelled after {} ticks", self.ticks);
        }
    }

    /// Fill `out` with draw primitives, applying parallax for `pointer`.
    pub fn sprites_into(&self, pointer: Vec2, viewport: Vec2, out: &mut Vec<StarSprite>) {
        let center = viewport * 0.5;
        out.clear();
        out.extend(self.stars.iter().map(|s| StarSprite {
            center: s.position / 100.0 * viewport + render_offset(s, pointer, center),
            size: s.size,
            opacity: s.opacity,
        }));
    }
}
