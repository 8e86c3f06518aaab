use thiserror::Error;

/// Rejected tuning parameters. Runtime operations never fail; only a bad
/// configuration can stop the effects from being built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{name} must be a non-zero duration")]
    ZeroPeriod { name: &'static str },

    #[error("lerp factor must be in (0, 1], got {0}")]
    LerpOutOfRange(f32),

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("min radius {min} exceeds base radius {base}")]
    RadiusOrder { min: f32, base: f32 },

    #[error("spawn area [{spawn_min}, {spawn_max}] lies outside bounds [{bound_min}, {bound_max}]")]
    SpawnOutsideBounds {
        spawn_min: f32,
        spawn_max: f32,
        bound_min: f32,
        bound_max: f32,
    },
}
