//! Player state machine: run-in, jump physics, push-back and death.

use super::body::{JumpState, KinematicBody};
use crate::core::config::GameConfig;
use crate::core::geometry::{Aabb, Collider, Size, Vec2, Viewport};
use crate::core::host::{DinoPose, PlayerSlot, Visual, VisualKind};
use crate::core::input::JumpInput;

/// Walk/jump animation rate (frames per second).
const ANIMATION_FPS: f64 = 10.0;

/// Where a player is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Parked off-screen until the countdown ends.
    Waiting,
    /// Running in to the start position; jump input is ignored.
    EnteringRun,
    OnFloor,
    Jumping,
    Falling,
    Dead,
}

/// Notable things that happened during a player update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Jumped,
    Landed,
    ReachedRunPosition,
}

/// A dinosaur in one lane.
///
/// `position` is the sprite centre. The collider is sized from the visual
/// and follows the position after every move.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    body: KinematicBody,
    jump: JumpState,
    collider: Collider,
    state: PlayerState,
    size: Size,
    ground_y: f64,
    start_x: f64,
    run_in_target_x: f64,
    anim_time: f64,
}

impl Player {
    pub fn new(viewport: &Viewport, config: &GameConfig) -> Self {
        let size = config.player_size;
        let ground_y = viewport.floor_line(config.floor_height) - size.half_height();
        let start_x = viewport.left() - size.width;
        let start = Vec2::new(start_x, ground_y);
        Self {
            body: KinematicBody::new(start),
            jump: JumpState::default(),
            collider: Collider::new(
                start,
                size,
                config.collider_width_ratio,
                config.collider_height_ratio,
            ),
            state: PlayerState::Waiting,
            size,
            ground_y,
            start_x,
            run_in_target_x: viewport.left() + viewport.width * config.run_in_target_ratio,
            anim_time: 0.0,
        }
    }

    /// Back to `Waiting`, parked off-screen on the ground.
    pub fn reset(&mut self) {
        self.body = KinematicBody::new(Vec2::new(self.start_x, self.ground_y));
        self.jump = JumpState::default();
        self.state = PlayerState::Waiting;
        self.anim_time = 0.0;
        self.sync_collider();
    }

    /// Begin the run-in. Only valid from `Waiting`.
    pub fn start_run(&mut self) -> bool {
        if self.state != PlayerState::Waiting {
            return false;
        }
        self.state = PlayerState::EnteringRun;
        true
    }

    /// Advance by `dt` seconds with this step's jump input.
    pub fn update(&mut self, dt: f64, input: JumpInput, config: &GameConfig) -> Option<PlayerEvent> {
        self.anim_time += dt;

        match self.state {
            PlayerState::Waiting | PlayerState::Dead => None,
            PlayerState::EnteringRun => {
                self.body.position.x += config.run_in_speed * dt;
                let reached = self.body.position.x >= self.run_in_target_x;
                if reached {
                    self.body.position.x = self.run_in_target_x;
                    self.state = PlayerState::OnFloor;
                }
                self.sync_collider();
                reached.then_some(PlayerEvent::ReachedRunPosition)
            }
            PlayerState::OnFloor | PlayerState::Jumping | PlayerState::Falling => {
                let step = self.body.integrate(
                    dt,
                    input,
                    self.state == PlayerState::OnFloor,
                    self.ground_y,
                    &mut self.jump,
                    config,
                );
                self.state = if step.on_floor {
                    PlayerState::OnFloor
                } else if self.body.velocity.y > 0.0 {
                    PlayerState::Falling
                } else {
                    PlayerState::Jumping
                };
                self.sync_collider();

                if step.jumped {
                    Some(PlayerEvent::Jumped)
                } else if step.landed {
                    Some(PlayerEvent::Landed)
                } else {
                    None
                }
            }
        }
    }

    /// Transition to `Dead`. Returns false if already dead.
    pub fn kill(&mut self) -> bool {
        if self.state == PlayerState::Dead {
            return false;
        }
        self.state = PlayerState::Dead;
        self.body.velocity = Vec2::ZERO;
        self.jump = JumpState::default();
        true
    }

    pub fn collides_with(&self, other: &Aabb) -> bool {
        self.collider.collides_with(other)
    }

    /// Shove the player left at `speed` for `dt` seconds.
    pub fn push_back(&mut self, speed: f64, dt: f64) {
        if self.state == PlayerState::Dead {
            return;
        }
        self.body.position.x -= speed * dt;
        self.sync_collider();
    }

    /// The left edge of the sprite has crossed `left`.
    pub fn at_edge(&self, left: f64) -> bool {
        self.body.position.x - self.size.half_width() < left
    }

    fn sync_collider(&mut self) {
        self.collider.move_centered(self.body.position);
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    /// Past the run-in and under player control (alive).
    pub fn is_running(&self) -> bool {
        matches!(
            self.state,
            PlayerState::OnFloor | PlayerState::Jumping | PlayerState::Falling
        )
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn ground_y(&self) -> f64 {
        self.ground_y
    }

    pub fn run_in_target_x(&self) -> f64 {
        self.run_in_target_x
    }

    pub fn bounds(&self) -> &Aabb {
        self.collider.bounds()
    }

    pub fn jump_state(&self) -> &JumpState {
        &self.jump
    }

    pub fn pose(&self) -> DinoPose {
        match self.state {
            PlayerState::Dead => DinoPose::Dead,
            PlayerState::Jumping | PlayerState::Falling => DinoPose::Jump,
            PlayerState::Waiting | PlayerState::EnteringRun | PlayerState::OnFloor => {
                DinoPose::Walk
            }
        }
    }

    pub fn visual(&self, slot: PlayerSlot) -> Visual {
        Visual {
            kind: VisualKind::Dino {
                slot,
                pose: self.pose(),
            },
            size: self.size,
            frame: (self.anim_time * ANIMATION_FPS) as u32,
        }
    }
}
