//! Headless kernel demo: a rock field, an explosion burst, and a trailing
//! emitter, stepped for a few seconds and summarized via log output.
//!
//! Run with `RUST_LOG=debug cargo run --example burst`.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use rubble::{
    Bounds, Collider, ColorSpec, DrawList, EmitOptions, Entity, EntityManager, ParticleEmitter,
    ParticleShape, ParticleSystem, ParticleSystemHandle, Range, SpawnShape, Surface,
};

struct Rock {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    alive: bool,
}

impl Entity for Rock {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }
    fn is_alive(&self) -> bool {
        self.alive
    }
    fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }
    fn update(&mut self, dt: f32, bounds: Bounds) {
        self.pos = bounds.wrap(self.pos + self.vel * dt);
    }
    fn render(&self, surface: &mut dyn Surface) {
        surface.draw_circle(self.pos, self.radius, "#aaaaaa", 1.0);
    }
    fn collider(&self) -> Option<Collider> {
        Some(Collider::Circle {
            radius: self.radius,
        })
    }
    fn on_collision(&mut self, _other: &mut dyn Entity) {
        self.alive = false;
    }
    fn split(&mut self) -> Vec<Box<dyn Entity>> {
        if self.radius < 8.0 {
            return Vec::new();
        }
        let half = self.radius / 2.0;
        [-1.0f32, 1.0]
            .into_iter()
            .map(|side| {
                Box::new(Rock {
                    pos: self.pos + Vec2::new(side * half, 0.0),
                    vel: Vec2::new(side * 30.0, self.vel.y),
                    radius: half,
                    alive: true,
                }) as Box<dyn Entity>
            })
            .collect()
    }
}

fn main() {
    env_logger::init();

    let bounds = Bounds::new(800.0, 600.0);
    let mut mgr = EntityManager::new();

    // Two rocks on a collision course
    mgr.add(Box::new(Rock {
        pos: Vec2::new(300.0, 300.0),
        vel: Vec2::new(40.0, 0.0),
        radius: 24.0,
        alive: true,
    }));
    mgr.add(Box::new(Rock {
        pos: Vec2::new(500.0, 300.0),
        vel: Vec2::new(-40.0, 0.0),
        radius: 24.0,
        alive: true,
    }));

    // One shared particle system: a big burst now, plus a moving trail
    let sys = ParticleSystem::new().shared();
    mgr.add(Box::new(ParticleSystemHandle(sys.clone())));

    sys.borrow_mut().emit(&EmitOptions {
        position: Vec2::new(400.0, 300.0),
        count: 40,
        life: Range::between(0.4, 1.2),
        speed: Range::between(30.0, 120.0),
        angle: Range::between(0.0, 360.0),
        size: Range::between(2.0, 6.0),
        size_end: Some(Range::Fixed(0.0)),
        color: ColorSpec::gradient("#ffcc33", "#ff330000"),
        shape: ParticleShape::Circle,
        drag: 0.02,
        spawn: SpawnShape::Circle { radius: 4.0 },
        ..Default::default()
    });

    let anchor = Rc::new(Cell::new(Vec2::new(100.0, 500.0)));
    let anchor_ref = anchor.clone();
    mgr.add(Box::new(
        ParticleEmitter::new(
            sys.clone(),
            EmitOptions {
                life: Range::Fixed(0.6),
                size: Range::Fixed(3.0),
                opacity_end: Some(Range::Fixed(0.0)),
                color: ColorSpec::solid("#66aaff"),
                ..Default::default()
            },
            30.0,
        )
        .with_duration(2.0)
        .with_follow(move || anchor_ref.get()),
    ));

    let dt = 1.0 / 60.0;
    for frame in 0..240 {
        anchor.set(anchor.get() + Vec2::new(120.0 * dt, -60.0 * dt));
        mgr.update(dt, bounds);

        if frame % 60 == 0 {
            let mut list = DrawList::new();
            mgr.render(&mut list);
            log::info!(
                "t={:>4.1}s entities={} particles={} draws={}",
                frame as f32 * dt,
                mgr.len(),
                sys.borrow().len(),
                list.len()
            );
        }
    }

    let mut list = DrawList::new();
    mgr.render(&mut list);
    println!(
        "after 4s: {} entities, {} live particles, {} draw commands",
        mgr.len(),
        sys.borrow().len(),
        list.len()
    );
}
