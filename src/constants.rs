// Page integration constants used by the web frontend.

// DOM ids; canvases are created on demand when the page does not provide them
pub const STARS_CANVAS_ID: &str = "ambient-stars";
pub const TRAIL_CANVAS_ID: &str = "ambient-trail";
pub const GOO_FILTER_ID: &str = "ambient-goo";

// Stacking: stars sit behind page content, the trail above everything
pub const STARS_Z_INDEX: i32 = 0;
pub const TRAIL_Z_INDEX: i32 = 9999;

// The trail inverts whatever is underneath it
pub const TRAIL_BLEND_MODE: &str = "difference";

// Colors
pub const STAR_COLOR: &str = "#ffffff";
pub const TRAIL_COLOR: &str = "#ffffff";
pub const HOLE_COLOR: &str = "#000000";

// Backing store scale is capped so 4K/retina screens stay cheap
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Renderer stats are logged at debug level this often (~10s at 60 Hz)
pub const STATS_LOG_EVERY_FRAMES: u64 = 600;
