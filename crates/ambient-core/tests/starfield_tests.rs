// Host-side tests for the star field simulator.

use ambient_core::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn lone_star(x: f32, y: f32, heading: Heading, speed: f32) -> Star {
    // attributes deliberately outside every configured range
    Star {
        position: Vec2::new(x, y),
        size: 99.0,
        opacity: 9.0,
        speed,
        heading,
        parallax_factor: 7.0,
    }
}

fn assert_fresh(star: &Star, params: &StarFieldParams) {
    assert!(params.spawn.contains(star.position.x), "x {}", star.position.x);
    assert!(params.spawn.contains(star.position.y), "y {}", star.position.y);
    assert!(params.size.contains(star.size), "size {}", star.size);
    assert!(params.opacity.contains(star.opacity), "opacity {}", star.opacity);
    assert!(params.speed.contains(star.speed), "speed {}", star.speed);
    assert!(
        params.parallax.contains(star.parallax_factor),
        "parallax {}",
        star.parallax_factor
    );
}

#[test]
fn initialize_samples_every_attribute_in_range() {
    let params = StarFieldParams::default();
    let field = StarField::new(params.clone(), &mut rng());
    assert_eq!(field.len(), 80);
    for star in field.stars() {
        assert_fresh(star, &params);
    }
}

#[test]
fn initialize_uses_independent_draws() {
    let field = StarField::new(StarFieldParams::default(), &mut rng());
    let stars = field.stars();
    let first = &stars[0];
    assert!(stars.iter().any(|s| s.size != first.size));
    assert!(stars.iter().any(|s| s.speed != first.speed));
    assert!(stars.iter().any(|s| s.opacity != first.opacity));
    assert!(stars.iter().any(|s| s.parallax_factor != first.parallax_factor));
    assert!(stars.iter().any(|s| s.position.x != s.position.y));
    let mut headings: Vec<Heading> = stars.iter().map(|s| s.heading).collect();
    headings.sort_by_key(|h| Heading::ALL.iter().position(|a| a == h));
    headings.dedup();
    assert!(headings.len() >= 6, "only {} headings drawn", headings.len());
}

#[test]
fn positions_stay_in_bounds_and_population_is_constant() {
    let params = StarFieldParams::default();
    let mut r = rng();
    let mut field = StarField::new(params.clone(), &mut r);
    for _ in 0..5_000 {
        field.tick(&mut r);
        assert_eq!(field.len(), params.count);
        for star in field.stars() {
            assert!(field.in_bounds(star.position), "{:?}", star.position);
        }
    }
    assert_eq!(field.ticks(), 5_000);
    assert!(field.respawns() > 0, "5000 ticks should push some star out");
}

#[test]
fn star_crossing_right_edge_is_fully_replaced() {
    let params = StarFieldParams::default();
    let mut field = StarField::with_stars(
        params.clone(),
        vec![lone_star(104.99, 50.0, Heading::Right, 0.03)],
    );
    let respawned = field.tick(&mut rng());
    assert_eq!(respawned, 1);
    assert_eq!(field.len(), 1);
    let star = &field.stars()[0];
    assert_fresh(star, &params);
    assert!((star.position.x - 105.02).abs() > 1e-3);
    assert_eq!(field.respawns(), 1);
}

#[test]
fn star_inside_extended_bounds_keeps_moving() {
    let mut field = StarField::with_stars(
        StarFieldParams::default(),
        vec![lone_star(103.0, 50.0, Heading::Right, 0.03)],
    );
    assert_eq!(field.tick(&mut rng()), 0);
    let star = &field.stars()[0];
    assert!((star.position.x - 103.03).abs() < 1e-4);
    assert_eq!(star.position.y, 50.0);
    assert_eq!(star.size, 99.0);
}

#[test]
fn stars_crossing_each_edge_respawn() {
    let params = StarFieldParams::default();
    let mut field = StarField::with_stars(
        params.clone(),
        vec![
            lone_star(-4.99, 50.0, Heading::Left, 0.05),
            lone_star(50.0, -4.99, Heading::Up, 0.05),
            lone_star(50.0, 104.99, Heading::Down, 0.05),
            lone_star(104.99, 104.99, Heading::DownRight, 0.05),
        ],
    );
    assert_eq!(field.tick(&mut rng()), 4);
    for star in field.stars() {
        assert_fresh(star, &params);
    }
}

#[test]
fn diagonal_step_uses_point_seven_per_axis() {
    let mut field = StarField::with_stars(
        StarFieldParams::default(),
        vec![
            lone_star(50.0, 50.0, Heading::DownRight, 0.04),
            lone_star(50.0, 50.0, Heading::UpLeft, 0.04),
        ],
    );
    field.tick(&mut rng());
    let a = field.stars()[0].position;
    let b = field.stars()[1].position;
    assert!((a.x - 50.028).abs() < 1e-4 && (a.y - 50.028).abs() < 1e-4);
    assert!((b.x - 49.972).abs() < 1e-4 && (b.y - 49.972).abs() < 1e-4);
}

#[test]
fn up_decreases_y_in_screen_space() {
    assert_eq!(Heading::Up.direction(0.7), Vec2::new(0.0, -1.0));
    assert_eq!(Heading::Down.direction(0.7), Vec2::new(0.0, 1.0));
    assert_eq!(Heading::UpRight.direction(0.7), Vec2::new(0.7, -0.7));
    assert!(Heading::DownLeft.is_diagonal());
    assert!(!Heading::Left.is_diagonal());
}

#[test]
fn render_offset_scales_pointer_displacement() {
    let star = Star {
        parallax_factor: 0.01,
        ..lone_star(10.0, 20.0, Heading::Up, 0.02)
    };
    let before = star.clone();
    let off = render_offset(&star, Vec2::new(800.0, 600.0), Vec2::new(500.0, 300.0));
    assert!((off - Vec2::new(3.0, 3.0)).length() < 1e-5);
    let centered = render_offset(&star, Vec2::new(500.0, 300.0), Vec2::new(500.0, 300.0));
    assert_eq!(centered, Vec2::ZERO);
    assert_eq!(star, before);
}

#[test]
fn sprites_map_percent_to_pixels_plus_parallax() {
    let field = StarField::with_stars(
        StarFieldParams::default(),
        vec![Star {
            size: 2.0,
            opacity: 0.5,
            parallax_factor: 0.01,
            ..lone_star(50.0, 50.0, Heading::Up, 0.02)
        }],
    );
    let viewport = Vec2::new(1000.0, 500.0);
    let mut out = Vec::new();

    field.sprites_into(Vec2::new(500.0, 250.0), viewport, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].center, Vec2::new(500.0, 250.0));
    assert_eq!(out[0].size, 2.0);
    assert_eq!(out[0].opacity, 0.5);

    field.sprites_into(Vec2::new(1000.0, 500.0), viewport, &mut out);
    assert_eq!(out.len(), 1, "buffer is refilled, not appended");
    assert!((out[0].center - Vec2::new(505.0, 252.5)).length() < 1e-4);
    assert_eq!(field.stars()[0].position, Vec2::new(50.0, 50.0));
}

#[test]
fn ticker_start_and_idempotent_stop() {
    let mut sched = ManualScheduler::new();
    let mut field = StarField::new(StarFieldParams::default(), &mut rng());
    field.start(&mut sched);
    field.start(&mut sched);
    assert!(field.is_running());
    assert_eq!(sched.pending_timers(), 1, "restart replaces the ticker");

    field.stop(&mut sched);
    field.stop(&mut sched);
    assert!(!field.is_running());
    assert_eq!(sched.pending(), 0);
}

#[test]
fn same_seed_gives_same_field() {
    let a = StarField::new(StarFieldParams::default(), &mut rng());
    let b = StarField::new(StarFieldParams::default(), &mut rng());
    assert_eq!(a.stars(), b.stars());
}
