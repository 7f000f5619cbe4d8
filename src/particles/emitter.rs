//! Continuous emission at a fixed rate
//!
//! `ParticleEmitter` is a thin entity that accumulates frame time and asks
//! its shared [`ParticleSystem`] for one particle every `1/rate` seconds.
//! Large frames catch up (several emissions in one update) rather than skip.
//! An optional anchor closure re-targets every emission at a moving object;
//! an optional duration lets the manager reap the emitter when it runs dry.

use glam::Vec2;

use crate::entity::{Bounds, Entity};
use crate::surface::Surface;

use super::options::EmitOptions;
use super::system::SharedParticleSystem;

/// Emits single particles into a shared system at `rate` per second
pub struct ParticleEmitter {
    system: SharedParticleSystem,
    options: EmitOptions,
    rate: f32,
    accumulator: f32,
    duration: Option<f32>,
    follow: Option<Box<dyn Fn() -> Vec2>>,
    alive: bool,
}

impl ParticleEmitter {
    /// New emitter; `options.count` is ignored, every emission is one
    /// particle. A non-positive `rate` emits nothing.
    pub fn new(system: SharedParticleSystem, mut options: EmitOptions, rate: f32) -> Self {
        options.count = 1;
        Self {
            system,
            options,
            rate,
            accumulator: 0.0,
            duration: None,
            follow: None,
            alive: true,
        }
    }

    /// Stop (and get reaped) after `seconds` of emission
    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Re-read the emission position from `anchor` before every particle,
    /// instead of the fixed `options.position`
    pub fn with_follow(mut self, anchor: impl Fn() -> Vec2 + 'static) -> Self {
        self.follow = Some(Box::new(anchor));
        self
    }
}

impl Entity for ParticleEmitter {
    fn position(&self) -> Vec2 {
        self.options.position
    }

    fn set_position(&mut self, pos: Vec2) {
        self.options.position = pos;
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    fn update(&mut self, dt: f32, _bounds: Bounds) {
        if self.rate > 0.0 {
            let interval = 1.0 / self.rate;
            self.accumulator += dt;
            while self.accumulator >= interval {
                self.accumulator -= interval;
                if let Some(anchor) = &self.follow {
                    self.options.position = anchor();
                }
                self.system.borrow_mut().emit(&self.options);
            }
        }

        // Emissions first, so a finishing emitter still produces its last
        // frame's worth of particles
        if let Some(duration) = &mut self.duration {
            *duration -= dt;
            if *duration <= 0.0 {
                self.alive = false;
            }
        }
    }

    fn render(&self, _surface: &mut dyn Surface) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::system::ParticleSystem;
    use std::cell::Cell;
    use std::rc::Rc;

    const BOUNDS: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    fn shared() -> SharedParticleSystem {
        ParticleSystem::with_seed(7).shared()
    }

    #[test]
    fn test_rate_accumulation() {
        let sys = shared();
        let mut emitter = ParticleEmitter::new(sys.clone(), EmitOptions::default(), 10.0);

        emitter.update(0.35, BOUNDS); // 3 intervals of 0.1, remainder 0.05
        assert_eq!(sys.borrow().len(), 3);

        emitter.update(0.05, BOUNDS); // remainder reaches 0.10
        assert_eq!(sys.borrow().len(), 4);
    }

    #[test]
    fn test_large_dt_catches_up() {
        let sys = shared();
        let mut emitter = ParticleEmitter::new(sys.clone(), EmitOptions::default(), 10.0);
        emitter.update(1.0, BOUNDS);
        assert_eq!(sys.borrow().len(), 10);
    }

    #[test]
    fn test_zero_rate_emits_nothing() {
        let sys = shared();
        let mut emitter = ParticleEmitter::new(sys.clone(), EmitOptions::default(), 0.0);
        emitter.update(5.0, BOUNDS);
        assert!(sys.borrow().is_empty());
    }

    #[test]
    fn test_duration_expiry() {
        let sys = shared();
        let mut emitter =
            ParticleEmitter::new(sys.clone(), EmitOptions::default(), 10.0).with_duration(0.5);

        emitter.update(0.3, BOUNDS);
        assert!(emitter.is_alive());
        emitter.update(0.3, BOUNDS);
        assert!(!emitter.is_alive());
        // Final frame still emitted before expiring
        assert_eq!(sys.borrow().len(), 6);
    }

    #[test]
    fn test_follow_reads_anchor_each_emission() {
        let sys = shared();
        let anchor = Rc::new(Cell::new(Vec2::new(10.0, 0.0)));
        let anchor_ref = anchor.clone();
        let mut emitter = ParticleEmitter::new(sys.clone(), EmitOptions::default(), 10.0)
            .with_follow(move || anchor_ref.get());

        emitter.update(0.1, BOUNDS);
        anchor.set(Vec2::new(20.0, 0.0));
        emitter.update(0.1, BOUNDS);

        assert_eq!(sys.borrow().len(), 2);
        assert_eq!(emitter.position(), Vec2::new(20.0, 0.0));
    }
}
