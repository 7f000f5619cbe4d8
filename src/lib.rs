//! Rubble - a 2D arcade simulation kernel
//!
//! The reusable core under an arcade game: frame-stepped entity lifecycle,
//! pairwise collision among tagged shapes, and a data-driven particle system.
//!
//! Core modules:
//! - `entity`: the `Entity` contract and world bounds
//! - `collision`: tagged collider shapes and overlap tests
//! - `manager`: `EntityManager` - the per-frame update/collide/reap pipeline
//! - `particles`: `ParticleSystem` / `ParticleEmitter` visual effects
//! - `surface`: render target abstraction + headless `DrawList`
//! - `color`: hex color parsing and interpolation
//!
//! The kernel is single-threaded and frame-stepped: the host loop calls
//! `EntityManager::update(dt, bounds)` then `EntityManager::render(surface)`
//! once per animation frame. Nothing in here blocks, suspends, or spawns
//! threads.

pub mod collision;
pub mod color;
pub mod entity;
pub mod manager;
pub mod particles;
pub mod surface;

pub use collision::{Collider, reflect};
pub use color::ColorSpec;
pub use entity::{Bounds, Entity};
pub use manager::{EntityId, EntityManager};
pub use particles::{
    EmitOptions, ParticleEmitter, ParticleShape, ParticleSystem, ParticleSystemHandle, Range,
    SpawnShape,
};
pub use surface::{DrawCmd, DrawList, Surface};

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
