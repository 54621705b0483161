//! A single scrolling hazard.

use crate::core::geometry::{Aabb, Collider, Size, Vec2};
use crate::core::host::{ObstacleStyle, Visual, VisualKind};

/// An obstacle moving left at the speed it was spawned with.
///
/// `position` is the sprite centre; the collider stays centred on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    position: Vec2,
    size: Size,
    collider: Collider,
    speed: f64,
    style: ObstacleStyle,
}

impl Obstacle {
    pub fn new(
        position: Vec2,
        size: Size,
        speed: f64,
        style: ObstacleStyle,
        collider_ratios: (f64, f64),
    ) -> Self {
        Self {
            position,
            size,
            collider: Collider::new(position, size, collider_ratios.0, collider_ratios.1),
            speed,
            style,
        }
    }

    /// Scroll left by `speed * dt`.
    pub fn update(&mut self, dt: f64) {
        self.position.x -= self.speed * dt;
        self.collider.move_centered(self.position);
    }

    /// Entirely past the lane's left boundary.
    pub fn should_remove(&self, viewport_left: f64) -> bool {
        self.position.x + self.size.width < viewport_left
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn style(&self) -> ObstacleStyle {
        self.style
    }

    pub fn bounds(&self) -> &Aabb {
        self.collider.bounds()
    }

    /// Any part of the sprite lies inside `[left, right)`.
    pub fn is_visible(&self, left: f64, right: f64) -> bool {
        let half = self.size.half_width();
        self.position.x + half > left && self.position.x - half < right
    }

    pub fn visual(&self) -> Visual {
        Visual {
            kind: VisualKind::Obstacle(self.style),
            size: self.size,
            frame: 0,
        }
    }
}
