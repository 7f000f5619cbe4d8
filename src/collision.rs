//! Collision shapes and pairwise overlap tests
//!
//! Shapes are a tagged sum, never concrete entity types: the manager's
//! collision phase dispatches on the [`Collider`] discriminant alone. All
//! tests use strict inequality, so shapes that exactly touch do not overlap.
//!
//! Only two shapes exist by design: circles and axis-aligned boxes. Rotated
//! boxes, polygons, and swept tests are out of scope.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A collision shape, centered on the owning entity's position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Collider {
    Circle { radius: f32 },
    Box { width: f32, height: f32 },
}

impl Collider {
    /// Test overlap between two positioned colliders.
    ///
    /// Symmetric: `a.overlaps(pa, &b, pb) == b.overlaps(pb, &a, pa)`.
    pub fn overlaps(&self, pos: Vec2, other: &Collider, other_pos: Vec2) -> bool {
        match (*self, *other) {
            (Collider::Circle { radius: ra }, Collider::Circle { radius: rb }) => {
                circle_circle(pos, ra, other_pos, rb)
            }
            (
                Collider::Box {
                    width: wa,
                    height: ha,
                },
                Collider::Box {
                    width: wb,
                    height: hb,
                },
            ) => box_box(pos, wa, ha, other_pos, wb, hb),
            (Collider::Circle { radius }, Collider::Box { width, height }) => {
                circle_box(pos, radius, other_pos, width, height)
            }
            (Collider::Box { width, height }, Collider::Circle { radius }) => {
                circle_box(other_pos, radius, pos, width, height)
            }
        }
    }
}

/// Circle-circle: centers closer than the sum of radii
#[inline]
pub fn circle_circle(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let radius_sum = ra + rb;
    a.distance_squared(b) < radius_sum * radius_sum
}

/// Axis-aligned box-box: projections overlap on both axes
#[inline]
pub fn box_box(a: Vec2, wa: f32, ha: f32, b: Vec2, wb: f32, hb: f32) -> bool {
    (a.x - b.x).abs() * 2.0 < wa + wb && (a.y - b.y).abs() * 2.0 < ha + hb
}

/// Circle-box: clamp the circle center onto the box, then a point-circle test
#[inline]
pub fn circle_box(center: Vec2, radius: f32, box_pos: Vec2, width: f32, height: f32) -> bool {
    let half = Vec2::new(width / 2.0, height / 2.0);
    let closest = center.clamp(box_pos - half, box_pos + half);
    center.distance_squared(closest) < radius * radius
}

/// Reflect a velocity off a surface normal: v' = v - 2(v.n)n
///
/// Convenience for entity authors writing bounce-style collision responses.
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
