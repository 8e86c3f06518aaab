//! Tuning parameters for the ambient effects.
//!
//! Every struct defaults to the values in [`crate::constants`]; front ends
//! usually take [`FxConfig::default`] and override a field or two.

use crate::constants::*;
use crate::error::ConfigError;
use rand::Rng;
use std::time::Duration;

/// Closed numeric interval used for randomized attributes and bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    const fn from_pair(pair: [f32; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }

    /// Uniform draw from the span. A degenerate span always yields `min`.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.gen::<f32>() * (self.max - self.min)
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        finite(name, self.min)?;
        finite(name, self.max)?;
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SamplerParams {
    pub quiet_period: Duration,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(POINTER_QUIET_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StarFieldParams {
    pub count: usize,
    pub tick_interval: Duration,
    /// Area fresh stars are placed in, on both axes.
    pub spawn: Span,
    /// Stars leaving this area on either axis are respawned.
    pub bounds: Span,
    pub size: Span,
    pub opacity: Span,
    pub speed: Span,
    pub parallax: Span,
    pub diagonal_step: f32,
}

impl Default for StarFieldParams {
    fn default() -> Self {
        Self {
            count: STAR_COUNT,
            tick_interval: Duration::from_millis(FIELD_TICK_MS),
            spawn: Span::new(FIELD_SPAWN_MIN, FIELD_SPAWN_MAX),
            bounds: Span::new(FIELD_BOUND_MIN, FIELD_BOUND_MAX),
            size: Span::from_pair(STAR_SIZE_RANGE),
            opacity: Span::from_pair(STAR_OPACITY_RANGE),
            speed: Span::from_pair(STAR_SPEED_RANGE),
            parallax: Span::from_pair(STAR_PARALLAX_RANGE),
            diagonal_step: DIAGONAL_STEP,
        }
    }
}

impl StarFieldParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroPeriod {
                name: "tick_interval",
            });
        }
        self.spawn.check("spawn")?;
        self.bounds.check("bounds")?;
        self.size.check("size")?;
        self.opacity.check("opacity")?;
        self.speed.check("speed")?;
        self.parallax.check("parallax")?;
        finite("diagonal_step", self.diagonal_step)?;
        non_negative("size", self.size.min)?;
        non_negative("speed", self.speed.min)?;
        if !(self.bounds.contains(self.spawn.min) && self.bounds.contains(self.spawn.max)) {
            return Err(ConfigError::SpawnOutsideBounds {
                spawn_min: self.spawn.min,
                spawn_max: self.spawn.max,
                bound_min: self.bounds.min,
                bound_max: self.bounds.max,
            });
        }
        Ok(())
    }
}

/// Parameters of the blur-then-threshold pass that fuses the leader and blob.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GooFilter {
    pub blur_std_dev: f32,
    pub alpha_gain: f32,
    pub alpha_offset: f32,
}

impl Default for GooFilter {
    fn default() -> Self {
        Self {
            blur_std_dev: GOO_BLUR_STD_DEV,
            alpha_gain: GOO_ALPHA_GAIN,
            alpha_offset: GOO_ALPHA_OFFSET,
        }
    }
}

impl GooFilter {
    /// Alpha after the threshold stage for a blurred coverage `alpha`.
    ///
    /// With the defaults, coverage below ~0.29 vanishes and coverage above
    /// ~0.31 becomes opaque, which is what gives the merged outline its
    /// hard edge.
    #[inline]
    pub fn threshold(&self, alpha: f32) -> f32 {
        (alpha * self.alpha_gain + self.alpha_offset).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrailParams {
    pub lerp_factor: f32,
    pub stretch_cap: f32,
    pub base_radius: f32,
    pub min_radius: f32,
    pub elongation_gain: f32,
    pub thinning_gain: f32,
    pub leader_radius: f32,
    pub hole_radius: f32,
    pub hole_fade: Duration,
    pub goo: GooFilter,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            lerp_factor: TRAIL_LERP,
            stretch_cap: TRAIL_STRETCH_CAP,
            base_radius: TRAIL_BASE_RADIUS,
            min_radius: TRAIL_MIN_RADIUS,
            elongation_gain: TRAIL_ELONGATION_GAIN,
            thinning_gain: TRAIL_THINNING_GAIN,
            leader_radius: TRAIL_LEADER_RADIUS,
            hole_radius: TRAIL_HOLE_RADIUS,
            hole_fade: Duration::from_millis(TRAIL_HOLE_FADE_MS),
            goo: GooFilter::default(),
        }
    }
}

impl TrailParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("lerp_factor", self.lerp_factor)?;
        if !(self.lerp_factor > 0.0 && self.lerp_factor <= 1.0) {
            return Err(ConfigError::LerpOutOfRange(self.lerp_factor));
        }
        for (name, v) in [
            ("stretch_cap", self.stretch_cap),
            ("base_radius", self.base_radius),
            ("min_radius", self.min_radius),
            ("elongation_gain", self.elongation_gain),
            ("thinning_gain", self.thinning_gain),
            ("leader_radius", self.leader_radius),
            ("hole_radius", self.hole_radius),
            ("goo.blur_std_dev", self.goo.blur_std_dev),
        ] {
            finite(name, v)?;
            non_negative(name, v)?;
        }
        finite("goo.alpha_gain", self.goo.alpha_gain)?;
        finite("goo.alpha_offset", self.goo.alpha_offset)?;
        if self.min_radius > self.base_radius {
            return Err(ConfigError::RadiusOrder {
                min: self.min_radius,
                base: self.base_radius,
            });
        }
        Ok(())
    }
}

/// Complete configuration for [`crate::AmbientFx`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FxConfig {
    pub sampler: SamplerParams,
    pub field: StarFieldParams,
    pub trail: TrailParams,
}

impl FxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sampler.quiet_period.is_zero() {
            return Err(ConfigError::ZeroPeriod {
                name: "quiet_period",
            });
        }
        self.field.validate()?;
        self.trail.validate()
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value < 0.0 {
        Err(ConfigError::Negative { name, value })
    } else {
        Ok(())
    }
}
