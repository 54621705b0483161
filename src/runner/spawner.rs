//! Obstacle spawning policy and the difficulty ramp.
//!
//! An empty lane gets an obstacle right away. Otherwise the spawner waits
//! for the newest obstacle to scroll into the lane, then arms a one-shot
//! random delay; when it runs out the next obstacle appears at the lane's
//! right edge with the speed current at that moment.

use super::obstacle::Obstacle;
use crate::core::config::GameConfig;
use crate::core::geometry::{Vec2, Viewport};
use crate::core::host::ObstacleStyle;
use rand::Rng;

/// Current obstacle speed for a run `elapsed` seconds long at `score`.
///
/// `base + time_ramp * elapsed + score_factor * ln(1 + score)`, capped at
/// `max_obstacle_speed`.
pub fn obstacle_speed(config: &GameConfig, elapsed: f64, score: f64) -> f64 {
    let ramped = config.base_obstacle_speed
        + config.obstacle_speed_time_ramp * elapsed.max(0.0)
        + config.obstacle_speed_score_factor * score.max(0.0).ln_1p();
    ramped.min(config.max_obstacle_speed)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SpawnTimer {
    /// Waiting for the newest obstacle to enter the lane.
    AwaitingEntry,
    /// Delay armed; spawn when it reaches zero.
    Delaying { remaining: f64 },
}

/// Lane and difficulty inputs for one spawner step.
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    pub viewport: &'a Viewport,
    pub config: &'a GameConfig,
    /// Current ramped obstacle speed.
    pub speed: f64,
    /// Current displayed score; picks the cosmetic style.
    pub score: u32,
}

/// Decides when a new obstacle appears.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleSpawner {
    timer: SpawnTimer,
}

impl Default for ObstacleSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleSpawner {
    pub fn new() -> Self {
        Self {
            timer: SpawnTimer::AwaitingEntry,
        }
    }

    /// Drop any armed delay.
    pub fn reset(&mut self) {
        self.timer = SpawnTimer::AwaitingEntry;
    }

    /// Seconds left on the armed delay, if one is running.
    pub fn pending_delay(&self) -> Option<f64> {
        match self.timer {
            SpawnTimer::AwaitingEntry => None,
            SpawnTimer::Delaying { remaining } => Some(remaining),
        }
    }

    /// Advance the policy by `dt`. Returns the obstacle to add, if any.
    ///
    /// `obstacles` is the lane's live set in spawn order.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f64,
        obstacles: &[Obstacle],
        ctx: SpawnContext<'_>,
        rng: &mut R,
    ) -> Option<Obstacle> {
        let Some(newest) = obstacles.last() else {
            self.timer = SpawnTimer::AwaitingEntry;
            return Some(Self::spawn(ctx));
        };

        match self.timer {
            SpawnTimer::AwaitingEntry => {
                if newest.position().x < ctx.viewport.right() {
                    let remaining = sample_delay(ctx.config, rng);
                    log::trace!("next obstacle in {:.2}s", remaining);
                    self.timer = SpawnTimer::Delaying { remaining };
                }
                None
            }
            SpawnTimer::Delaying { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.timer = SpawnTimer::AwaitingEntry;
                    Some(Self::spawn(ctx))
                } else {
                    self.timer = SpawnTimer::Delaying { remaining };
                    None
                }
            }
        }
    }

    /// Obstacle at the right edge, resting on the floor line.
    fn spawn(ctx: SpawnContext<'_>) -> Obstacle {
        let SpawnContext {
            viewport,
            config,
            speed,
            score,
        } = ctx;
        let size = config.obstacle_size;
        let y = viewport.floor_line(config.floor_height)
            - size.half_height()
            - config.obstacle_spawn_y_offset;
        let style = ObstacleStyle::for_score(score, config.style_score_step);
        log::trace!(
            "spawning {:?} at x={:.1} speed={:.1}",
            style,
            viewport.right(),
            speed
        );
        Obstacle::new(
            Vec2::new(viewport.right(), y),
            size,
            speed,
            style,
            (config.collider_width_ratio, config.collider_height_ratio),
        )
    }
}

fn sample_delay<R: Rng>(config: &GameConfig, rng: &mut R) -> f64 {
    let (min, max) = (
        config.obstacle_spawn_min_delay,
        config.obstacle_spawn_max_delay,
    );
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    const LANE: Viewport = Viewport::sized(1280.0, 352.0);

    fn ctx(config: &GameConfig, speed: f64, score: u32) -> SpawnContext<'_> {
        SpawnContext {
            viewport: &LANE,
            config,
            speed,
            score,
        }
    }

    #[test]
    fn test_speed_starts_at_base() {
        let config = GameConfig::default();
        assert_eq!(obstacle_speed(&config, 0.0, 0.0), config.base_obstacle_speed);
    }

    #[test]
    fn test_speed_ramps_with_time_and_score() {
        let config = GameConfig::default();
        let base = obstacle_speed(&config, 0.0, 0.0);
        let later = obstacle_speed(&config, 10.0, 0.0);
        let scored = obstacle_speed(&config, 10.0, 100.0);
        assert!(later > base);
        assert!(scored > later);
        let expected = config.base_obstacle_speed
            + config.obstacle_speed_time_ramp * 10.0
            + config.obstacle_speed_score_factor * 101.0_f64.ln();
        assert!((scored - expected).abs() < 1e-9);
    }

    #[test]
    fn test_speed_capped() {
        let config = GameConfig::default();
        assert_eq!(
            obstacle_speed(&config, 1.0e6, 1.0e6),
            config.max_obstacle_speed
        );
    }

    #[test]
    fn test_empty_lane_spawns_immediately() {
        let config = GameConfig::default();
        let mut spawner = ObstacleSpawner::new();
        let mut rng = create_test_rng();

        let obstacle = spawner
            .tick(0.016, &[], ctx(&config, 250.0, 0), &mut rng)
            .expect("empty lane spawns");
        assert_eq!(obstacle.position().x, 1280.0);
        assert_eq!(obstacle.speed(), 250.0);
        let floor = LANE.floor_line(config.floor_height);
        let bottom = obstacle.position().y + config.obstacle_size.half_height();
        assert!((bottom - (floor - config.obstacle_spawn_y_offset)).abs() < 1e-9);
    }

    #[test]
    fn test_waits_until_newest_obstacle_enters_lane() {
        let config = GameConfig::default();
        let mut spawner = ObstacleSpawner::new();
        let mut rng = create_test_rng();
        let first = spawner
            .tick(0.016, &[], ctx(&config, 250.0, 0), &mut rng)
            .expect("first spawn");

        // Still sitting on the right edge: nothing armed.
        let live = vec![first];
        assert!(spawner
            .tick(0.016, &live, ctx(&config, 250.0, 0), &mut rng)
            .is_none());
        assert!(spawner.pending_delay().is_none());
    }

    #[test]
    fn test_delay_armed_within_range_then_spawns() {
        let config = GameConfig::default();
        let mut spawner = ObstacleSpawner::new();
        let mut rng = create_test_rng();
        let mut first = spawner
            .tick(0.016, &[], ctx(&config, 250.0, 0), &mut rng)
            .expect("first spawn");
        first.update(0.016);
        let live = vec![first];

        assert!(spawner
            .tick(0.016, &live, ctx(&config, 250.0, 0), &mut rng)
            .is_none());
        let delay = spawner.pending_delay().expect("delay armed");
        assert!(delay >= config.obstacle_spawn_min_delay);
        assert!(delay <= config.obstacle_spawn_max_delay);

        let dt = 0.01;
        let mut elapsed = 0.0;
        let spawned = loop {
            elapsed += dt;
            if let Some(obstacle) = spawner.tick(dt, &live, ctx(&config, 400.0, 0), &mut rng) {
                break obstacle;
            }
            assert!(elapsed < 5.0, "spawn never happened");
        };
        assert!(elapsed + 1e-9 >= delay);
        assert_eq!(spawned.speed(), 400.0, "speed captured at spawn time");
        assert!(spawner.pending_delay().is_none());
    }

    #[test]
    fn test_fixed_delay_when_range_collapses() {
        let config = GameConfig {
            obstacle_spawn_min_delay: 0.75,
            obstacle_spawn_max_delay: 0.75,
            ..GameConfig::default()
        };
        let mut spawner = ObstacleSpawner::new();
        let mut rng = create_test_rng();
        let mut first = spawner
            .tick(0.0, &[], ctx(&config, 250.0, 0), &mut rng)
            .expect("first spawn");
        first.update(0.1);
        spawner.tick(0.0, &[first], ctx(&config, 250.0, 0), &mut rng);
        assert_eq!(spawner.pending_delay(), Some(0.75));
    }

    #[test]
    fn test_reset_clears_pending_delay() {
        let config = GameConfig::default();
        let mut spawner = ObstacleSpawner::new();
        let mut rng = create_test_rng();
        let mut first = spawner
            .tick(0.0, &[], ctx(&config, 250.0, 0), &mut rng)
            .expect("first spawn");
        first.update(0.1);
        spawner.tick(0.0, &[first], ctx(&config, 250.0, 0), &mut rng);
        assert!(spawner.pending_delay().is_some());

        spawner.reset();
        assert!(spawner.pending_delay().is_none());
    }

    #[test]
    fn test_style_follows_score() {
        let config = GameConfig::default();
        let mut spawner = ObstacleSpawner::new();
        let mut rng = create_test_rng();
        let obstacle = spawner
            .tick(0.0, &[], ctx(&config, 250.0, config.style_score_step), &mut rng)
            .expect("spawn");
        assert_eq!(obstacle.style(), ObstacleStyle::TallCactus);
    }

    #[test]
    fn test_seeded_delays_are_reproducible() {
        let config = GameConfig::default();
        let delays = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..5).map(|_| sample_delay(&config, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(delays(7), delays(7));
    }
}
