use std::time::Duration;

use ambient_core::constants::STAR_COUNT;
use ambient_core::{AmbientFx, FrameDraw, FxConfig, ManualScheduler, Renderer};
use anyhow::{bail, Context};
use clap::Parser;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Run the star field and cursor trail on a virtual clock with a scripted
/// pointer, logging what the renderer would have received.
#[derive(Parser, Debug)]
#[command(name = "ambient-native", version)]
struct Args {
    /// Virtual seconds to simulate
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,
    /// RNG seed for star generation
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Number of stars in the field
    #[arg(long, default_value_t = STAR_COUNT)]
    stars: usize,
    /// Simulated display refresh rate
    #[arg(long, default_value_t = 60)]
    fps: u32,
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    #[arg(long, default_value_t = 720.0)]
    height: f32,
}

// Pointer script: sweep a lissajous curve for 3s, then rest for 1s.
const SWEEP_SEC: f64 = 3.0;
const REST_SEC: f64 = 1.0;
const MOVE_EVERY_FRAMES: u64 = 2;

#[derive(Default)]
struct StatsRenderer {
    frames: u64,
    stars_drawn: u64,
    stars_off_screen: u64,
    trail_frames: u64,
    hole_frames: u64,
    max_major: f32,
    min_minor: f32,
    max_lag: f32,
}

impl Renderer for StatsRenderer {
    fn draw(&mut self, frame: &FrameDraw<'_>) {
        self.frames += 1;
        self.stars_drawn += frame.stars.len() as u64;
        self.stars_off_screen += frame
            .stars
            .iter()
            .filter(|s| {
                s.center.x < 0.0
                    || s.center.y < 0.0
                    || s.center.x > frame.viewport.x
                    || s.center.y > frame.viewport.y
            })
            .count() as u64;
        if let Some(t) = frame.trail {
            if self.trail_frames == 0 {
                self.min_minor = t.minor_radius;
            }
            self.trail_frames += 1;
            if t.hole_visible {
                self.hole_frames += 1;
            }
            self.max_major = self.max_major.max(t.major_radius);
            self.min_minor = self.min_minor.min(t.minor_radius);
            self.max_lag = self.max_lag.max(t.distance);
        }
    }
}

fn scripted_pointer(t: f64, viewport: Vec2) -> Option<Vec2> {
    let phase = t % (SWEEP_SEC + REST_SEC);
    if phase >= SWEEP_SEC {
        return None;
    }
    let c = viewport * 0.5;
    let x = c.x + c.x * 0.8 * (t * 1.3).sin() as f32;
    let y = c.y + c.y * 0.8 * (t * 2.1).cos() as f32;
    Some(Vec2::new(x, y))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.fps == 0 {
        bail!("--fps must be at least 1");
    }
    if !(args.seconds.is_finite() && args.seconds >= 0.0) {
        bail!("--seconds must be a non-negative number");
    }

    let viewport = Vec2::new(args.width, args.height);
    let mut config = FxConfig::default();
    config.field.count = args.stars;
    let mut fx = AmbientFx::new(
        config,
        ManualScheduler::new(),
        StdRng::seed_from_u64(args.seed),
        viewport,
        StatsRenderer::default(),
    )
    .context("building ambient effects")?;

    log::info!(
        "[native] simulating {:.1}s at {} fps, {} stars, seed {}",
        args.seconds,
        args.fps,
        args.stars,
        args.seed
    );
    fx.start();

    let frame_dt = Duration::from_secs_f64(1.0 / args.fps as f64);
    let total_frames = (args.seconds * args.fps as f64).round() as u64;
    for frame in 0..total_frames {
        let t = frame as f64 / args.fps as f64;
        if frame % MOVE_EVERY_FRAMES == 0 {
            if let Some(p) = scripted_pointer(t, viewport) {
                fx.pointer_move(p);
            }
        }
        fx.advance_frame(frame_dt);

        if (frame + 1) % args.fps as u64 == 0 {
            let s = fx.stats();
            let blob = fx.trail().blob();
            log::info!(
                "[native] t={:>4.0}s ticks={} frames={} respawns={} moving={} blob=({:.1},{:.1}) pending={}",
                (frame + 1) as f64 / args.fps as f64,
                s.ticks,
                s.frames,
                s.respawns,
                fx.pointer().is_moving,
                blob.x,
                blob.y,
                fx.scheduler().pending()
            );
        }
    }

    fx.stop();
    let leaked = fx.scheduler().pending();
    let r = fx.renderer();
    log::info!(
        "[native] drew {} frames: {} stars ({} off-screen), trail in {} frames, hole shown in {}",
        r.frames,
        r.stars_drawn,
        r.stars_off_screen,
        r.trail_frames,
        r.hole_frames
    );
    log::info!(
        "[native] trail extremes: major {:.1}px, minor {:.1}px, lag {:.1}px",
        r.max_major,
        r.min_minor,
        r.max_lag
    );
    if leaked != 0 {
        bail!("{leaked} scheduled activities still pending after stop");
    }
    Ok(())
}
