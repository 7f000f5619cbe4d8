//! Particle simulation for visual effects
//!
//! A self-contained pool of short-lived particles with interpolated visual
//! parameters. Callers describe a burst declaratively through [`EmitOptions`]
//! and never touch individual particle state:
//!
//! - `range`: fixed-or-uniform sampled parameter values
//! - `options`: the declarative emission request (serde-able preset data)
//! - `system`: the pool itself - emit / update / render
//! - `emitter`: continuous emission at a fixed rate, optionally following a
//!   moving anchor
//!
//! Particles never participate in gameplay collision; the system is an
//! ordinary [`Entity`](crate::entity::Entity) with no collider.

pub mod emitter;
pub mod options;
pub mod range;
pub mod system;

pub use emitter::ParticleEmitter;
pub use options::{EmitOptions, ParticleShape, SpawnShape};
pub use range::Range;
pub use system::{ParticleSystem, ParticleSystemHandle, SharedParticleSystem};
