//! Declarative emission options
//!
//! One `EmitOptions` value describes a whole burst: how many particles, how
//! they move, how they look, and how their look evolves over their lifetime.
//! Every field has a usable default, so malformed or partial presets degrade
//! instead of failing. Range-typed fields are re-sampled independently for
//! each particle in the burst.
//!
//! Options round-trip through serde (`Computed` colors excepted), which is
//! how hosts keep explosion/trail/smoke presets as JSON data.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::ColorSpec;

use super::range::Range;

/// Which primitive a particle draws as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleShape {
    #[default]
    Circle,
    Square,
    Triangle,
    Line,
    /// Textured quad; the handle is owned by the host's asset layer
    Sprite(u32),
}

/// Region each particle's initial position is drawn from, centered on
/// `EmitOptions::position`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnShape {
    #[default]
    Point,
    /// Uniform over a disc
    Circle { radius: f32 },
    /// Uniform over a centered rectangle
    Rect { width: f32, height: f32 },
}

/// A declarative burst description; see module docs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Burst origin (perturbed per particle by `spawn`)
    pub position: Vec2,
    /// Particles to materialize immediately
    pub count: usize,
    /// Lifetime in seconds
    pub life: Range,
    /// Initial speed, combined with `angle` into a velocity vector
    pub speed: Range,
    /// Launch direction in degrees
    pub angle: Range,
    /// Render size at birth
    pub size: Range,
    /// Render size at end of life (`None` = no size interpolation)
    pub size_end: Option<Range>,
    /// Opacity at birth, 0..=1
    pub opacity: Range,
    /// Opacity at end of life (`None` = no fade)
    pub opacity_end: Option<Range>,
    /// Initial rotation in radians
    pub rotation: Range,
    /// Rotation speed in radians/sec
    pub angular_velocity: Range,
    /// Color over normalized age
    pub color: ColorSpec,
    /// Draw primitive
    pub shape: ParticleShape,
    /// Constant acceleration applied to every particle
    pub gravity: Vec2,
    /// Per-frame multiplicative damping, 0..=1 (`vel *= 1 - drag`)
    pub drag: f32,
    /// Initial position distribution
    pub spawn: SpawnShape,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            count: 1,
            life: Range::Fixed(1.0),
            speed: Range::Fixed(0.0),
            angle: Range::Fixed(0.0),
            size: Range::Fixed(4.0),
            size_end: None,
            opacity: Range::Fixed(1.0),
            opacity_end: None,
            rotation: Range::Fixed(0.0),
            angular_velocity: Range::Fixed(0.0),
            color: ColorSpec::default(),
            shape: ParticleShape::Circle,
            gravity: Vec2::ZERO,
            drag: 0.0,
            spawn: SpawnShape::Point,
        }
    }
}

impl EmitOptions {
    /// Parse a preset from JSON; the only fallible operation in the kernel
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize back to JSON (fails for `Computed` colors, which are
    /// runtime-only)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = EmitOptions::default();
        assert_eq!(opts.count, 1);
        assert_eq!(opts.life, Range::Fixed(1.0));
        assert_eq!(opts.shape, ParticleShape::Circle);
        assert_eq!(opts.spawn, SpawnShape::Point);
        assert!(opts.size_end.is_none());
    }

    #[test]
    fn test_partial_preset_defaults_rest() {
        let opts = EmitOptions::from_json(
            r##"{
                "count": 24,
                "speed": {"min": 40.0, "max": 90.0},
                "color": {"start": "#ffcc00", "end": "#ff220000"},
                "spawn": {"circle": {"radius": 6.0}}
            }"##,
        )
        .unwrap();
        assert_eq!(opts.count, 24);
        assert_eq!(opts.speed, Range::between(40.0, 90.0));
        assert_eq!(opts.spawn, SpawnShape::Circle { radius: 6.0 });
        // Untouched fields fall back to defaults
        assert_eq!(opts.life, Range::Fixed(1.0));
        assert_eq!(opts.drag, 0.0);
    }

    #[test]
    fn test_round_trip() {
        let mut opts = EmitOptions::default();
        opts.count = 5;
        opts.size = Range::between(2.0, 8.0);
        opts.shape = ParticleShape::Line;
        let json = opts.to_json().unwrap();
        let back = EmitOptions::from_json(&json).unwrap();
        assert_eq!(back.count, 5);
        assert_eq!(back.size, Range::between(2.0, 8.0));
        assert_eq!(back.shape, ParticleShape::Line);
    }

    #[test]
    fn test_garbage_json_is_an_error_not_a_panic() {
        assert!(EmitOptions::from_json("{not json").is_err());
    }
}
