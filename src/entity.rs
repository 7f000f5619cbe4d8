//! The entity contract and world bounds
//!
//! Everything the kernel simulates implements [`Entity`]. The trait carries
//! two optional capabilities with default no-op implementations:
//! - collision: [`Entity::collider`] + [`Entity::on_collision`]
//! - self-replication: [`Entity::split`], harvested the frame the entity dies
//!
//! The kernel never inspects concrete entity types; collision geometry is
//! dispatched on the [`Collider`] tag alone.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::Collider;
use crate::surface::Surface;

/// World bounds passed to every entity update, for screen wrap/clamp behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Wrap a position toroidally into [0, width) x [0, height)
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    /// Clamp a position into the bounds
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }

    /// Whether a position lies inside the bounds
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x < self.width && pos.y >= 0.0 && pos.y < self.height
    }
}

/// A simulated object: position, liveness, per-frame update and render.
///
/// Entities are owned by the [`EntityManager`](crate::manager::EntityManager)
/// as boxed trait objects. Setting `alive` to false requests removal; the
/// manager reaps dead entities at the end of the frame, after harvesting
/// [`Entity::split`] offspring.
///
/// `update` and `on_collision` may freely mutate the entity's own state, and
/// `on_collision` may mutate the *other* entity through the setters here
/// (typically killing it, or pushing it apart). Neither may reach back into
/// the manager; spawning goes through `split` or the manager's deferred
/// `add` between frames.
pub trait Entity {
    /// Current position (center, world space)
    fn position(&self) -> Vec2;

    /// Move the entity (used by collision responses on the other party)
    fn set_position(&mut self, pos: Vec2);

    /// Whether the entity should stay in the simulation
    fn is_alive(&self) -> bool;

    /// Request removal (`false`) at the end of the current frame
    fn set_alive(&mut self, alive: bool);

    /// Advance by `dt` seconds; `bounds` supports screen-wrap behavior
    fn update(&mut self, dt: f32, bounds: Bounds);

    /// Draw onto the surface; called every frame, no culling by the kernel
    fn render(&self, surface: &mut dyn Surface);

    /// Collision capability: return a shape to participate in the collision
    /// phase. Entities returning `None` are filtered out, not errored on.
    fn collider(&self) -> Option<Collider> {
        None
    }

    /// Reaction callback, fired once per overlapping pair per frame for as
    /// long as the overlap persists (level-triggered, not edge-triggered).
    fn on_collision(&mut self, _other: &mut dyn Entity) {}

    /// Replacement entities for the frame this entity died. Called by the
    /// manager only when `is_alive()` turned false this frame. Offspring are
    /// rendered the same frame and first updated the next.
    fn split(&mut self) -> Vec<Box<dyn Entity>> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_toroidal() {
        let bounds = Bounds::new(800.0, 600.0);
        assert_eq!(bounds.wrap(Vec2::new(810.0, 300.0)), Vec2::new(10.0, 300.0));
        assert_eq!(bounds.wrap(Vec2::new(-10.0, 300.0)), Vec2::new(790.0, 300.0));
        assert_eq!(bounds.wrap(Vec2::new(400.0, -5.0)), Vec2::new(400.0, 595.0));
    }

    #[test]
    fn test_clamp_and_contains() {
        let bounds = Bounds::new(100.0, 100.0);
        assert_eq!(
            bounds.clamp(Vec2::new(150.0, -20.0)),
            Vec2::new(100.0, 0.0)
        );
        assert!(bounds.contains(Vec2::new(50.0, 50.0)));
        assert!(!bounds.contains(Vec2::new(100.0, 50.0)));
    }
}
