// Host-side tests for the cursor trail follower and its deformation rules.

use ambient_core::*;
use glam::Vec2;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn moving_at(x: f32, y: f32) -> PointerSample {
    PointerSample {
        position: Vec2::new(x, y),
        is_moving: true,
    }
}

fn resting_at(x: f32, y: f32) -> PointerSample {
    PointerSample {
        position: Vec2::new(x, y),
        is_moving: false,
    }
}

#[test]
fn leader_tracks_pointer_without_lag() {
    let mut trail = CursorTrail::new(TrailParams::default(), Vec2::ZERO);
    trail.on_frame(&moving_at(123.0, -45.0), FRAME);
    assert_eq!(trail.leader(), Vec2::new(123.0, -45.0));
    trail.on_frame(&moving_at(7.0, 8.0), FRAME);
    assert_eq!(trail.leader(), Vec2::new(7.0, 8.0));
}

#[test]
fn pointer_jump_scenario_matches_closed_form() {
    let mut trail = CursorTrail::new(TrailParams::default(), Vec2::ZERO);
    let p = moving_at(300.0, 0.0);

    trail.on_frame(&p, FRAME);
    assert!((trail.blob().x - 15.0).abs() < 1e-4, "blob x {}", trail.blob().x);
    assert_eq!(trail.blob().y, 0.0);

    for _ in 0..14 {
        trail.on_frame(&p, FRAME);
    }
    let expected = 300.0 * (1.0 - 0.95_f32.powi(15));
    assert!((trail.blob().x - expected).abs() < 1e-3);
    assert!((trail.blob().x - 161.01).abs() < 0.01, "blob x {}", trail.blob().x);
}

#[test]
fn blob_converges_geometrically_to_fixed_leader() {
    let params = TrailParams::default();
    let lerp = params.lerp_factor;
    let b0 = Vec2::new(10.0, -20.0);
    let leader = Vec2::new(250.0, 80.0);
    let d0 = (b0 - leader).length();
    let mut trail = CursorTrail::new(params, b0);

    for n in 1..=60 {
        trail.on_frame(&resting_at(leader.x, leader.y), FRAME);
        let got = (trail.blob() - leader).length();
        let want = d0 * (1.0 - lerp).powi(n);
        assert!(
            (got - want).abs() <= 1e-4 * d0,
            "frame {n}: distance {got} expected {want}"
        );
    }
}

#[test]
fn deform_respects_radius_bounds_and_monotonicity() {
    let params = TrailParams::default();
    let max_major = params.base_radius + params.stretch_cap * params.elongation_gain;
    let (mut prev_major, mut prev_minor) = deform(0.0, &params);
    assert_eq!(prev_major, params.base_radius);
    assert_eq!(prev_minor, params.base_radius);

    let mut d = 0.0;
    while d <= 400.0 {
        let (major, minor) = deform(d, &params);
        assert!(minor >= params.min_radius, "minor {minor} at distance {d}");
        assert!(minor <= prev_minor, "minor grew at distance {d}");
        assert!(major >= prev_major, "major shrank at distance {d}");
        assert!(major <= max_major + 1e-4, "major {major} at distance {d}");
        prev_major = major;
        prev_minor = minor;
        d += 0.5;
    }
}

#[test]
fn deform_saturates_at_stretch_cap() {
    let params = TrailParams::default();
    let at_cap = deform(params.stretch_cap, &params);
    assert_eq!(at_cap, deform(10_000.0, &params));
    // 16 + 150 * 0.5 and the 8px floor
    assert!((at_cap.0 - 91.0).abs() < 1e-4);
    assert!((at_cap.1 - 8.0).abs() < 1e-4);
}

#[test]
fn shape_angle_follows_direction_of_lag() {
    let mut trail = CursorTrail::new(TrailParams::default(), Vec2::ZERO);
    trail.on_frame(&moving_at(0.0, 100.0), FRAME);
    let s = trail.shape();
    assert!((s.angle_deg - 90.0).abs() < 1e-3);
    assert!((s.distance - 95.0).abs() < 1e-3);
    assert!((s.angle_rad() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);

    let mut trail = CursorTrail::new(TrailParams::default(), Vec2::ZERO);
    trail.on_frame(&moving_at(-100.0, 0.0), FRAME);
    assert!((trail.shape().angle_deg.abs() - 180.0).abs() < 1e-3);
}

#[test]
fn shape_is_pure() {
    let mut trail = CursorTrail::new(TrailParams::default(), Vec2::ZERO);
    trail.on_frame(&moving_at(40.0, 30.0), FRAME);
    let a = trail.shape();
    let b = trail.shape();
    assert_eq!(a, b);
    assert_eq!(trail.blob(), a.blob);
}

#[test]
fn hole_fades_out_while_moving_and_back_in_when_idle() {
    let params = TrailParams::default();
    let mut trail = CursorTrail::new(params, Vec2::ZERO);
    assert!(trail.shape().hole_visible);
    assert_eq!(trail.shape().hole_opacity, 1.0);

    trail.on_frame(&moving_at(10.0, 10.0), Duration::from_millis(100));
    let s = trail.shape();
    assert!(!s.hole_visible);
    assert!((s.hole_opacity - 0.5).abs() < 1e-4);

    trail.on_frame(&moving_at(10.0, 10.0), Duration::from_millis(150));
    assert_eq!(trail.shape().hole_opacity, 0.0);

    trail.on_frame(&resting_at(10.0, 10.0), Duration::from_millis(50));
    let s = trail.shape();
    assert!(s.hole_visible);
    assert!((s.hole_opacity - 0.25).abs() < 1e-4);

    for _ in 0..20 {
        trail.on_frame(&resting_at(10.0, 10.0), FRAME);
    }
    assert_eq!(trail.shape().hole_opacity, 1.0);
}

#[test]
fn zero_fade_snaps_hole_opacity() {
    let params = TrailParams {
        hole_fade: Duration::ZERO,
        ..TrailParams::default()
    };
    let mut trail = CursorTrail::new(params, Vec2::ZERO);
    trail.on_frame(&moving_at(1.0, 1.0), FRAME);
    assert_eq!(trail.shape().hole_opacity, 0.0);
    trail.on_frame(&resting_at(1.0, 1.0), FRAME);
    assert_eq!(trail.shape().hole_opacity, 1.0);
}

#[test]
fn frame_chain_start_and_stop() {
    let mut sched = ManualScheduler::new();
    let mut trail = CursorTrail::new(TrailParams::default(), Vec2::ZERO);
    trail.start(&mut sched);
    assert!(trail.is_running());
    assert_eq!(sched.pending_frames(), 1);

    trail.stop(&mut sched);
    trail.stop(&mut sched);
    assert!(!trail.is_running());
    assert_eq!(sched.pending(), 0);
    assert!(!trail.frame_fired());
}

#[test]
fn goo_threshold_hardens_blurred_edge() {
    let goo = GooFilter::default();
    assert_eq!(goo.threshold(0.0), 0.0);
    assert_eq!(goo.threshold(0.25), 0.0);
    assert_eq!(goo.threshold(0.35), 1.0);
    assert_eq!(goo.threshold(1.0), 1.0);
    let mid = goo.threshold(0.3);
    assert!(mid > 0.0 && mid < 1.0);
}
