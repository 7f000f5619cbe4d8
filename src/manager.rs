//! The per-frame entity pipeline
//!
//! `EntityManager` owns the live set and drives each frame in four phases:
//! update every entity in insertion order, run the pairwise collision pass,
//! harvest `split()` offspring from entities that died this frame, then
//! compact the live set. Hosts call `update(dt, bounds)` then
//! `render(surface)` once per animation frame.
//!
//! Adds are deferred: `add` queues the entity and the queue flushes at the
//! start of the next `update`, so nothing can mutate the live set while the
//! manager iterates it. Removal from inside the loop is always by setting
//! `alive = false`; `remove(id)` is for host code between frames.
//!
//! The collision pass is O(n²) over entities exposing a collider. That is
//! deliberate: entity counts in this domain are tens, not thousands, and a
//! broad phase would buy complexity, not frames.

use glam::Vec2;

use crate::collision::Collider;
use crate::entity::{Bounds, Entity};
use crate::surface::Surface;

/// Stable handle for an entity in the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

struct Slot {
    id: EntityId,
    entity: Box<dyn Entity>,
}

/// Owns the live entity set and runs the update/collide/split/render pipeline
pub struct EntityManager {
    entities: Vec<Slot>,
    pending: Vec<Slot>,
    next_id: u64,
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityManager {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
        }
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Queue an entity for insertion at the start of the next `update`.
    ///
    /// Flush order follows call order, and insertion order determines both
    /// update and render order. No uniqueness check.
    pub fn add(&mut self, entity: Box<dyn Entity>) -> EntityId {
        let id = self.alloc_id();
        self.pending.push(Slot { id, entity });
        id
    }

    /// Remove an entity immediately by id (host code between frames; inside
    /// the loop entities remove themselves via `set_alive(false)`)
    pub fn remove(&mut self, id: EntityId) {
        self.entities.retain(|slot| slot.id != id);
        self.pending.retain(|slot| slot.id != id);
    }

    /// Drop every entity, live and pending (game reset)
    pub fn clear(&mut self) {
        let dropped = self.entities.len() + self.pending.len();
        self.entities.clear();
        self.pending.clear();
        log::debug!("cleared {dropped} entities");
    }

    /// Number of live entities (pending adds not included)
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&dyn Entity> {
        self.entities
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| slot.entity.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut dyn Entity> {
        self.entities
            .iter_mut()
            .find(|slot| slot.id == id)
            .map(|slot| &mut *slot.entity as &mut dyn Entity)
    }

    /// Live entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &dyn Entity)> {
        self.entities
            .iter()
            .map(|slot| (slot.id, slot.entity.as_ref()))
    }

    /// Advance the simulation one frame.
    ///
    /// Phases: flush pending adds, update every entity in insertion order,
    /// collide, harvest splits from entities that died this frame, compact.
    /// Split offspring render this frame and first update next frame.
    pub fn update(&mut self, dt: f32, bounds: Bounds) {
        self.entities.append(&mut self.pending);

        for slot in &mut self.entities {
            slot.entity.update(dt, bounds);
        }

        self.collide();

        // Harvest split offspring from entities that died this frame
        let mut spawned: Vec<Box<dyn Entity>> = Vec::new();
        for slot in &mut self.entities {
            if !slot.entity.is_alive() {
                spawned.append(&mut slot.entity.split());
            }
        }
        if !spawned.is_empty() {
            log::debug!("harvested {} split entities", spawned.len());
        }

        self.entities.retain(|slot| slot.entity.is_alive());
        for entity in spawned {
            let id = self.alloc_id();
            self.entities.push(Slot { id, entity });
        }
    }

    /// Pairwise collision pass over a post-update snapshot.
    ///
    /// Level-triggered: an overlapping pair fires both callbacks every frame
    /// the overlap persists. For each pair the lower-index entity's callback
    /// fires first; callers must not depend on that ordering.
    fn collide(&mut self) {
        // Snapshot (index, shape, position) so callback position mutations
        // cannot affect later overlap tests this frame
        let snapshot: Vec<(usize, Collider, Vec2)> = self
            .entities
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                slot.entity
                    .collider()
                    .map(|collider| (i, collider, slot.entity.position()))
            })
            .collect();
        log::trace!("collision pass over {} collidable entities", snapshot.len());

        for (n, &(i, ca, pa)) in snapshot.iter().enumerate() {
            for &(j, cb, pb) in &snapshot[n + 1..] {
                if ca.overlaps(pa, &cb, pb) {
                    // i < j always holds, so split_at_mut can hand out both
                    let (left, right) = self.entities.split_at_mut(j);
                    let a = left[i].entity.as_mut();
                    let b = right[0].entity.as_mut();
                    a.on_collision(b);
                    b.on_collision(a);
                }
            }
        }
    }

    /// Draw every live entity in insertion order; culling is the entity's
    /// (or the renderer's) concern, not the kernel's
    pub fn render(&self, surface: &mut dyn Surface) {
        for slot in &self.entities {
            slot.entity.render(surface);
        }
    }
}
