//! Jump physics: velocity/gravity integration with a variable-height jump.
//!
//! Every term is scaled by `dt` (seconds). A jump sets the vertical velocity
//! to `jump_force`; while the key stays held an extra upward acceleration
//! (`jump_hold_impulse`) applies until `max_jump_hold_duration` has elapsed.
//! Releasing the key ends the boost for the rest of that jump.

use crate::core::config::GameConfig;
use crate::core::geometry::Vec2;
use crate::core::input::JumpInput;

/// Position and velocity of a body. y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Variable-height jump bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpState {
    jumping: bool,
    holding: bool,
    hold_time: f64,
}

impl JumpState {
    fn start(&mut self) {
        self.jumping = true;
        self.holding = true;
        self.hold_time = 0.0;
    }

    fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// The hold boost is still active.
    pub fn is_holding(&self) -> bool {
        self.holding
    }

    /// Seconds the key has been held during this jump.
    pub fn hold_time(&self) -> f64 {
        self.hold_time
    }
}

/// Result of one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Integration {
    pub on_floor: bool,
    /// A jump started this step.
    pub jumped: bool,
    /// The body touched down this step after being airborne.
    pub landed: bool,
}

impl KinematicBody {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Advance the body by `dt` seconds.
    ///
    /// `ground_y` is the y the body rests at when standing. Order: jump
    /// start, hold boost, gravity and fall-speed clamp, position, floor snap.
    pub fn integrate(
        &mut self,
        dt: f64,
        input: JumpInput,
        on_floor: bool,
        ground_y: f64,
        jump: &mut JumpState,
        config: &GameConfig,
    ) -> Integration {
        let mut result = Integration {
            on_floor,
            ..Integration::default()
        };

        // 1. Jump start (edge-triggered)
        if on_floor && input.just_pressed {
            self.velocity.y = config.jump_force;
            jump.start();
            result.on_floor = false;
            result.jumped = true;
        }

        // 2-3. Hold boost until release or the time cap
        if jump.jumping {
            if input.just_released || !input.held {
                jump.holding = false;
            }
            if jump.holding {
                let remaining = (config.max_jump_hold_duration - jump.hold_time).max(0.0);
                self.velocity.y += config.jump_hold_impulse * dt.min(remaining);
                jump.hold_time += dt;
                if jump.hold_time >= config.max_jump_hold_duration {
                    jump.holding = false;
                }
            }
        }

        // 4. Gravity, clamped to terminal velocity
        self.velocity.y = (self.velocity.y + config.gravity * dt).min(config.max_fall_speed);

        // 5. Move
        self.position = self.position.add_scaled(self.velocity, dt);

        // 6. Floor
        if self.position.y >= ground_y {
            self.position.y = ground_y;
            self.velocity.y = 0.0;
            result.landed = !result.on_floor;
            result.on_floor = true;
            jump.cancel();
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;
    const GROUND: f64 = 300.0;

    fn grounded() -> (KinematicBody, JumpState, bool) {
        (
            KinematicBody::new(Vec2::new(100.0, GROUND)),
            JumpState::default(),
            true,
        )
    }

    /// Jump, hold for `hold_ticks`, then release; returns (peak height, air ticks).
    fn jump_profile(config: &GameConfig, hold_ticks: usize) -> (f64, usize) {
        let (mut body, mut jump, mut on_floor) = grounded();
        let mut peak = 0.0_f64;
        let mut air_ticks = 0;
        for tick in 0..1000 {
            let input = match tick {
                0 => JumpInput::PRESS,
                t if t < hold_ticks => JumpInput::HOLD,
                t if t == hold_ticks => JumpInput::RELEASE,
                _ => JumpInput::IDLE,
            };
            let step = body.integrate(DT, input, on_floor, GROUND, &mut jump, config);
            on_floor = step.on_floor;
            peak = peak.max(GROUND - body.position.y);
            if on_floor {
                break;
            }
            air_ticks += 1;
        }
        (peak, air_ticks)
    }

    #[test]
    fn test_grounded_body_stays_on_floor() {
        let config = GameConfig::default();
        let (mut body, mut jump, mut on_floor) = grounded();
        for dt in [DT, 0.001, 0.05, DT, 0.1] {
            let step = body.integrate(dt, JumpInput::IDLE, on_floor, GROUND, &mut jump, &config);
            on_floor = step.on_floor;
            assert!(on_floor);
            assert!(!step.landed);
            assert_eq!(body.velocity.y, 0.0);
            assert_eq!(body.position.y, GROUND);
        }
    }

    #[test]
    fn test_jump_sets_upward_velocity() {
        let config = GameConfig::default();
        let (mut body, mut jump, on_floor) = grounded();
        let step = body.integrate(DT, JumpInput::PRESS, on_floor, GROUND, &mut jump, &config);

        assert!(step.jumped);
        assert!(!step.on_floor);
        assert!(body.velocity.y < 0.0);
        assert!(body.position.y < GROUND);
        assert!(jump.is_jumping());
    }

    #[test]
    fn test_holding_without_fresh_press_does_not_jump() {
        let config = GameConfig::default();
        let (mut body, mut jump, on_floor) = grounded();
        let step = body.integrate(DT, JumpInput::HOLD, on_floor, GROUND, &mut jump, &config);
        assert!(!step.jumped);
        assert!(step.on_floor);
        assert_eq!(body.position.y, GROUND);
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let config = GameConfig::default();
        let (mut body, mut jump, on_floor) = grounded();
        let first = body.integrate(DT, JumpInput::PRESS, on_floor, GROUND, &mut jump, &config);
        let second = body.integrate(DT, JumpInput::RELEASE, first.on_floor, GROUND, &mut jump, &config);
        let velocity_before = body.velocity.y;

        let third = body.integrate(DT, JumpInput::PRESS, second.on_floor, GROUND, &mut jump, &config);
        assert!(!third.jumped);
        assert!(
            body.velocity.y > velocity_before,
            "gravity should act, not a new jump"
        );
    }

    #[test]
    fn test_tap_jump_rises_and_lands_cleanly() {
        let config = GameConfig::default();
        let (mut body, mut jump, mut on_floor) = grounded();
        let mut peak = 0.0_f64;
        let mut landed = false;

        let first = body.integrate(DT, JumpInput::PRESS, on_floor, GROUND, &mut jump, &config);
        on_floor = first.on_floor;
        for tick in 0..500 {
            let input = if tick == 0 {
                JumpInput::RELEASE
            } else {
                JumpInput::IDLE
            };
            let step = body.integrate(DT, input, on_floor, GROUND, &mut jump, &config);
            on_floor = step.on_floor;
            peak = peak.max(GROUND - body.position.y);
            if step.landed {
                landed = true;
                break;
            }
        }

        assert!(landed, "a tap jump must come back down");
        assert!(peak >= config.jump_force.abs() * DT);
        assert_eq!(body.velocity.y, 0.0);
        assert_eq!(body.position.y, GROUND);

        for _ in 0..30 {
            let step = body.integrate(DT, JumpInput::IDLE, on_floor, GROUND, &mut jump, &config);
            on_floor = step.on_floor;
            assert_eq!(body.position.y, GROUND);
            assert_eq!(body.velocity.y, 0.0);
        }
    }

    #[test]
    fn test_holding_jumps_higher_than_tapping() {
        let config = GameConfig::default();
        let (tap_peak, tap_air) = jump_profile(&config, 1);
        let (held_peak, held_air) = jump_profile(&config, 15);
        assert!(held_peak > tap_peak);
        assert!(held_air > tap_air);
    }

    #[test]
    fn test_hold_boost_stops_exactly_at_cap() {
        // 0.25 s cap = 15 ticks at 60 FPS.
        let config = GameConfig::default();
        let cap_ticks = (config.max_jump_hold_duration / DT).round() as usize;

        let (below_peak, _) = jump_profile(&config, cap_ticks - 1);
        let (at_peak, at_air) = jump_profile(&config, cap_ticks);
        let (above_peak, above_air) = jump_profile(&config, cap_ticks + 1);
        let (long_peak, long_air) = jump_profile(&config, cap_ticks + 30);

        assert!(below_peak < at_peak - 1e-6);
        assert!((above_peak - at_peak).abs() < 1e-6);
        assert!((long_peak - at_peak).abs() < 1e-6);
        assert_eq!(above_air, at_air);
        assert_eq!(long_air, at_air);
    }

    #[test]
    fn test_hold_state_ends_at_cap() {
        let config = GameConfig::default();
        let (mut body, mut jump, mut on_floor) = grounded();
        let step = body.integrate(DT, JumpInput::PRESS, on_floor, GROUND, &mut jump, &config);
        on_floor = step.on_floor;
        assert!(jump.is_holding());

        for _ in 0..20 {
            let step = body.integrate(DT, JumpInput::HOLD, on_floor, GROUND, &mut jump, &config);
            on_floor = step.on_floor;
        }
        assert!(jump.is_jumping());
        assert!(!jump.is_holding());
        assert!(jump.hold_time() >= config.max_jump_hold_duration);
    }

    #[test]
    fn test_fall_speed_clamped() {
        let config = GameConfig::default();
        let mut body = KinematicBody::new(Vec2::new(0.0, -10_000.0));
        let mut jump = JumpState::default();
        for _ in 0..200 {
            body.integrate(DT, JumpInput::IDLE, false, GROUND, &mut jump, &config);
            assert!(body.velocity.y <= config.max_fall_speed);
        }
        assert_eq!(body.velocity.y, config.max_fall_speed);
    }

    #[test]
    fn test_landing_snaps_and_reports() {
        let config = GameConfig::default();
        let mut body = KinematicBody::new(Vec2::new(0.0, GROUND - 1.0));
        body.velocity.y = 300.0;
        let mut jump = JumpState::default();

        let step = body.integrate(DT, JumpInput::IDLE, false, GROUND, &mut jump, &config);
        assert!(step.landed);
        assert!(step.on_floor);
        assert_eq!(body.position.y, GROUND);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_physics_is_frame_rate_independent() {
        let config = GameConfig::default();
        let peak_at = |dt: f64| {
            let mut body = KinematicBody::new(Vec2::new(0.0, GROUND));
            let mut jump = JumpState::default();
            let mut on_floor = true;
            let mut peak = 0.0_f64;
            let ticks = (1.5 / dt) as usize;
            for tick in 0..ticks {
                let input = if tick == 0 {
                    JumpInput::PRESS
                } else {
                    JumpInput::RELEASE
                };
                on_floor = body
                    .integrate(dt, input, on_floor, GROUND, &mut jump, &config)
                    .on_floor;
                peak = peak.max(GROUND - body.position.y);
            }
            peak
        };

        let at_60 = peak_at(1.0 / 60.0);
        let at_120 = peak_at(1.0 / 120.0);
        assert!(
            (at_60 - at_120).abs() / at_120 < 0.05,
            "peak heights should agree across frame rates: {} vs {}",
            at_60,
            at_120
        );
    }
}
