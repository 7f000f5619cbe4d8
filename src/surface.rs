//! Render target abstraction
//!
//! The kernel draws through the [`Surface`] trait so it stays renderer
//! agnostic: a host binds it to a canvas/GPU pipeline, tests and headless
//! hosts use [`DrawList`], which records commands instead of drawing.
//!
//! Colors are CSS-style strings (`"#22ccff"`, `"rgba(255, 80, 0, 0.5)"`),
//! matching what the color interpolation in [`crate::color`] produces.
//! Sprites are referenced by opaque `u32` handles owned by the host's asset
//! layer.

use glam::Vec2;

/// Draw primitives the kernel needs; one method per particle shape
pub trait Surface {
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: &str, opacity: f32);
    fn draw_square(&mut self, center: Vec2, size: f32, rotation: f32, color: &str, opacity: f32);
    fn draw_triangle(&mut self, center: Vec2, size: f32, rotation: f32, color: &str, opacity: f32);
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: &str, opacity: f32);
    fn draw_sprite(&mut self, sprite: u32, center: Vec2, size: f32, rotation: f32, opacity: f32);
}

/// A recorded draw command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle {
        center: Vec2,
        radius: f32,
        color: String,
        opacity: f32,
    },
    Square {
        center: Vec2,
        size: f32,
        rotation: f32,
        color: String,
        opacity: f32,
    },
    Triangle {
        center: Vec2,
        size: f32,
        rotation: f32,
        color: String,
        opacity: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: String,
        opacity: f32,
    },
    Sprite {
        sprite: u32,
        center: Vec2,
        size: f32,
        rotation: f32,
        opacity: f32,
    },
}

/// A surface that records commands for headless hosts and tests
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DrawList {
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: &str, opacity: f32) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color: color.to_string(),
            opacity,
        });
    }

    fn draw_square(&mut self, center: Vec2, size: f32, rotation: f32, color: &str, opacity: f32) {
        self.commands.push(DrawCmd::Square {
            center,
            size,
            rotation,
            color: color.to_string(),
            opacity,
        });
    }

    fn draw_triangle(&mut self, center: Vec2, size: f32, rotation: f32, color: &str, opacity: f32) {
        self.commands.push(DrawCmd::Triangle {
            center,
            size,
            rotation,
            color: color.to_string(),
            opacity,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: &str, opacity: f32) {
        self.commands.push(DrawCmd::Line {
            from,
            to,
            width,
            color: color.to_string(),
            opacity,
        });
    }

    fn draw_sprite(&mut self, sprite: u32, center: Vec2, size: f32, rotation: f32, opacity: f32) {
        self.commands.push(DrawCmd::Sprite {
            sprite,
            center,
            size,
            rotation,
            opacity,
        });
    }
}
