//! Engine-independent building blocks: geometry, configuration, input and
//! the host collaborator traits.

pub mod config;
pub mod constants;
pub mod geometry;
pub mod host;
pub mod input;

pub use config::{CollisionPolicy, ConfigError, GameConfig, MatchRule};
pub use constants::*;
pub use geometry::{Aabb, Collider, Size, Vec2, Viewport};
pub use host::{
    Audio, DinoPose, ObstacleStyle, PlayerSlot, Renderer, Silence, SoundCue, Visual, VisualKind,
};
pub use input::{ControlState, InputQuery, JumpInput};
