//! The endless-runner simulation: jump physics, obstacles, per-player
//! sessions and the two-player match that drives them.

pub mod body;
pub mod duel;
pub mod obstacle;
pub mod player;
pub mod session;
pub mod spawner;

pub use body::{Integration, JumpState, KinematicBody};
pub use duel::{decide, dispatch_sounds, Match, MatchOutcome, MatchUpdate, Standing};
pub use obstacle::Obstacle;
pub use player::{Player, PlayerEvent, PlayerState};
pub use session::{clamp_tick, Session, SessionEvent, SessionState};
pub use spawner::{obstacle_speed, ObstacleSpawner, SpawnContext};
