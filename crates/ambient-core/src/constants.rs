// Shared tuning constants for the ambient effects, used by both web and native frontends.

// Pointer sampler
pub const POINTER_QUIET_MS: u64 = 50; // idle time before `is_moving` drops

// Star field population and cadence
pub const STAR_COUNT: usize = 80;
pub const FIELD_TICK_MS: u64 = 50; // ~20 Hz, independent of display refresh

// Star field coordinates are percentages of the viewport
pub const FIELD_SPAWN_MIN: f32 = 0.0;
pub const FIELD_SPAWN_MAX: f32 = 100.0;
pub const FIELD_BOUND_MIN: f32 = -5.0; // stars past this edge respawn
pub const FIELD_BOUND_MAX: f32 = 105.0;

// Per-star attribute ranges
pub const STAR_SIZE_RANGE: [f32; 2] = [1.5, 3.0]; // px
pub const STAR_OPACITY_RANGE: [f32; 2] = [0.3, 0.7];
pub const STAR_SPEED_RANGE: [f32; 2] = [0.02, 0.05]; // field units per tick
pub const STAR_PARALLAX_RANGE: [f32; 2] = [0.005, 0.015];

// Per-axis step multiplier for diagonal headings (kept at 0.7, not 1/sqrt(2))
pub const DIAGONAL_STEP: f32 = 0.7;

// Cursor trail follower
pub const TRAIL_LERP: f32 = 0.05; // fraction of remaining distance per frame
pub const TRAIL_STRETCH_CAP: f32 = 150.0; // px of lag that still deforms the blob
pub const TRAIL_BASE_RADIUS: f32 = 16.0;
pub const TRAIL_MIN_RADIUS: f32 = 8.0;
pub const TRAIL_ELONGATION_GAIN: f32 = 0.5;
pub const TRAIL_THINNING_GAIN: f32 = 0.1;
pub const TRAIL_LEADER_RADIUS: f32 = 6.0;
pub const TRAIL_HOLE_RADIUS: f32 = 4.0;
pub const TRAIL_HOLE_FADE_MS: u64 = 200;

// Goo compositing: gaussian blur followed by an alpha colour-matrix threshold
pub const GOO_BLUR_STD_DEV: f32 = 5.0;
pub const GOO_ALPHA_GAIN: f32 = 35.0;
pub const GOO_ALPHA_OFFSET: f32 = -10.0;
