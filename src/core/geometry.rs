//! Plain 2D geometry: vectors, sizes, axis-aligned boxes and lane viewports.
//!
//! Screen coordinates: x grows to the right, y grows downward.

use serde::{Deserialize, Serialize};

/// A 2D vector used for positions and velocities.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `self + other * scale`, used for `position += velocity * dt`.
    pub fn add_scaled(self, other: Vec2, scale: f64) -> Vec2 {
        Vec2::new(self.x + other.x * scale, self.y + other.y * scale)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of a visual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }

    pub fn half_height(&self) -> f64 {
        self.height * 0.5
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Box of `size` centred on `center`.
    pub fn centered(center: Vec2, size: Size) -> Self {
        Self::new(
            center.x - size.half_width(),
            center.y - size.half_height(),
            size.width,
            size.height,
        )
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// Strict overlap test: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Overlapping region of two boxes, if any.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        if !self.intersects(other) {
            return None;
        }
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Aabb::new(left, top, right - left, bottom - top))
    }
}

/// Collision box sized as a fraction of its owner's visual and kept centred
/// on the owner's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    bounds: Aabb,
}

impl Collider {
    /// Collider for a visual of `visual` size scaled by the given ratios.
    pub fn new(center: Vec2, visual: Size, width_ratio: f64, height_ratio: f64) -> Self {
        let size = Size::new(visual.width * width_ratio, visual.height * height_ratio);
        Self {
            bounds: Aabb::centered(center, size),
        }
    }

    /// Re-centre the box on the owner's new position.
    pub fn move_centered(&mut self, center: Vec2) {
        self.bounds.left = center.x - self.bounds.width * 0.5;
        self.bounds.top = center.y - self.bounds.height * 0.5;
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn collides_with(&self, other: &Aabb) -> bool {
        self.bounds.intersects(other)
    }
}

/// One player's lane on screen. Immutable for a session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub origin: Vec2,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(origin: Vec2, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Lane at the origin with the given size.
    pub const fn sized(width: f64, height: f64) -> Self {
        Self::new(Vec2::ZERO, width, height)
    }

    pub fn left(&self) -> f64 {
        self.origin.x
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.origin.y
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.height
    }

    /// Ground level for a floor strip `floor_height` tall at the bottom.
    pub fn floor_line(&self, floor_height: f64) -> f64 {
        self.bottom() - floor_height
    }

    /// Split the area into a top and a bottom lane separated by `gap`.
    pub fn split_lanes(width: f64, height: f64, gap: f64) -> [Viewport; 2] {
        let lane_height = (height - gap) * 0.5;
        [
            Viewport::new(Vec2::ZERO, width, lane_height),
            Viewport::new(Vec2::new(0.0, lane_height + gap), width, lane_height),
        ]
    }
}
