//! The particle pool
//!
//! `ParticleSystem` owns every particle it emits; nothing outside this module
//! sees individual particle state. The system is itself an `Entity` with no
//! collider, so it registers with the `EntityManager` like anything else and
//! gets ticked and drawn by the same pipeline.
//!
//! Randomness comes from a per-system `Pcg32`. `new()` seeds from entropy
//! (ambient randomness - two runs will not match); tests and
//! determinism-minded hosts use `with_seed`.

use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::color::ColorSpec;
use crate::entity::{Bounds, Entity};
use crate::lerp;
use crate::surface::Surface;

use super::options::{EmitOptions, ParticleShape, SpawnShape};

/// Default particle capacity; emitting past it drops the oldest particles
pub const DEFAULT_MAX_PARTICLES: usize = 2048;

/// One live particle. Private to the system; every field is a concrete value
/// resolved at emit time.
struct Particle {
    pos: Vec2,
    vel: Vec2,
    age: f32,
    life: f32,
    size: f32,
    size_end: f32,
    opacity: f32,
    opacity_end: f32,
    rotation: f32,
    angular_velocity: f32,
    color: ColorSpec,
    shape: ParticleShape,
    gravity: Vec2,
    drag: f32,
}

/// A pool of short-lived visual particles
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    max_particles: usize,
    position: Vec2,
    alive: bool,
}

impl ParticleSystem {
    /// Entropy-seeded system with the default capacity
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Deterministic system for reproducible tests/replays
    pub fn with_seed(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            max_particles: DEFAULT_MAX_PARTICLES,
            position: Vec2::ZERO,
            alive: true,
        }
    }

    /// Override the particle capacity (oldest are dropped past it)
    pub fn with_capacity(mut self, max_particles: usize) -> Self {
        self.max_particles = max_particles;
        self
    }

    /// Live particle count
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drop all particles (scene reset)
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Wrap in `Rc<RefCell<_>>` so emitters and the manager can share it
    pub fn shared(self) -> SharedParticleSystem {
        Rc::new(RefCell::new(self))
    }

    /// Materialize `opts.count` particles immediately.
    ///
    /// Pure append: never blocks, never fails. Every range-typed option is
    /// resolved independently per particle, so a burst gets spread, not
    /// clones.
    pub fn emit(&mut self, opts: &EmitOptions) {
        for _ in 0..opts.count {
            if self.particles.len() >= self.max_particles {
                log::debug!("particle capacity {} hit, dropping oldest", self.max_particles);
                self.particles.remove(0);
            }
            let particle = self.spawn_one(opts);
            self.particles.push(particle);
        }
    }

    fn spawn_one(&mut self, opts: &EmitOptions) -> Particle {
        let rng = &mut self.rng;

        let pos = opts.position
            + match opts.spawn {
                SpawnShape::Point => Vec2::ZERO,
                SpawnShape::Circle { radius } => {
                    // sqrt keeps the distribution uniform over the disc area
                    let r = radius * rng.random::<f32>().sqrt();
                    let theta = rng.random::<f32>() * 2.0 * PI;
                    Vec2::new(theta.cos(), theta.sin()) * r
                }
                SpawnShape::Rect { width, height } => Vec2::new(
                    (rng.random::<f32>() - 0.5) * width,
                    (rng.random::<f32>() - 0.5) * height,
                ),
            };

        let angle = opts.angle.resolve(rng).to_radians();
        let speed = opts.speed.resolve(rng);
        let size = opts.size.resolve(rng);
        let opacity = opts.opacity.resolve(rng);

        Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            age: 0.0,
            life: opts.life.resolve(rng),
            size,
            size_end: opts.size_end.map_or(size, |r| r.resolve(rng)),
            opacity,
            opacity_end: opts.opacity_end.map_or(opacity, |r| r.resolve(rng)),
            rotation: opts.rotation.resolve(rng),
            angular_velocity: opts.angular_velocity.resolve(rng),
            color: opts.color.clone(),
            shape: opts.shape,
            gravity: opts.gravity,
            drag: opts.drag,
        }
    }

    /// Advance all particles by `dt` and reap the expired
    pub fn step(&mut self, dt: f32) {
        for p in self.particles.iter_mut() {
            p.age += dt;
            if p.age >= p.life {
                // Expired this tick: filtered below, no final integration
                continue;
            }
            p.vel += p.gravity * dt;
            // Per-frame damping, deliberately not dt-scaled
            p.vel *= 1.0 - p.drag;
            p.pos += p.vel * dt;
            p.rotation += p.angular_velocity * dt;
        }
        self.particles.retain(|p| p.age < p.life);
    }

    /// Draw all particles; size/opacity/color interpolate over normalized age
    pub fn draw(&self, surface: &mut dyn Surface) {
        for p in &self.particles {
            let t = (p.age / p.life).clamp(0.0, 1.0);
            let size = lerp(p.size, p.size_end, t);
            let opacity = lerp(p.opacity, p.opacity_end, t);
            if size <= 0.0 || opacity <= 0.0 {
                continue;
            }
            let color = p.color.resolve(t);
            match p.shape {
                ParticleShape::Circle => {
                    surface.draw_circle(p.pos, size / 2.0, &color, opacity);
                }
                ParticleShape::Square => {
                    surface.draw_square(p.pos, size, p.rotation, &color, opacity);
                }
                ParticleShape::Triangle => {
                    surface.draw_triangle(p.pos, size, p.rotation, &color, opacity);
                }
                ParticleShape::Line => {
                    // Oriented segment of length `size` through the center
                    let dir = Vec2::new(p.rotation.cos(), p.rotation.sin());
                    let half = dir * size / 2.0;
                    surface.draw_line(p.pos - half, p.pos + half, 1.0, &color, opacity);
                }
                ParticleShape::Sprite(handle) => {
                    surface.draw_sprite(handle, p.pos, size, p.rotation, opacity);
                }
            }
        }
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for ParticleSystem {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, pos: Vec2) {
        self.position = pos;
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    fn update(&mut self, dt: f32, _bounds: Bounds) {
        self.step(dt);
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.draw(surface);
    }
}

/// A particle system shared between the manager and one or more emitters
pub type SharedParticleSystem = Rc<RefCell<ParticleSystem>>;

/// Entity wrapper over a shared system, so the same pool can sit in the
/// `EntityManager` while emitters hold their own handle to it
pub struct ParticleSystemHandle(pub SharedParticleSystem);

impl Entity for ParticleSystemHandle {
    fn position(&self) -> Vec2 {
        self.0.borrow().position
    }

    fn set_position(&mut self, pos: Vec2) {
        self.0.borrow_mut().position = pos;
    }

    fn is_alive(&self) -> bool {
        self.0.borrow().alive
    }

    fn set_alive(&mut self, alive: bool) {
        self.0.borrow_mut().alive = alive;
    }

    fn update(&mut self, dt: f32, _bounds: Bounds) {
        self.0.borrow_mut().step(dt);
    }

    fn render(&self, surface: &mut dyn Surface) {
        self.0.borrow().draw(surface);
    }
}
