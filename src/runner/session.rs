//! One player's run: ready-up, countdown, run-in, play and game over.
//!
//! A session owns its player, obstacles, spawner and score. Each state has
//! its own transition function that returns the next state and pushes
//! [`SessionEvent`]s; sounds and score changes are reported as events rather
//! than performed inline.

use super::obstacle::Obstacle;
use super::player::{Player, PlayerEvent};
use super::spawner::{obstacle_speed, ObstacleSpawner, SpawnContext};
use crate::core::config::{CollisionPolicy, ConfigError, GameConfig};
use crate::core::constants::MAX_TICK_SECONDS;
use crate::core::geometry::Viewport;
use crate::core::host::{PlayerSlot, Renderer, SoundCue};
use crate::core::input::{InputQuery, JumpInput};
use rand::Rng;

/// Clamp a host frame time to `[0, MAX_TICK_SECONDS]`. NaN and infinities
/// count as no time at all.
pub fn clamp_tick(dt: f64) -> f64 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_TICK_SECONDS)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    /// Waiting for the player to press their key.
    Waiting,
    /// Ready; held here until the match starts the countdown.
    ReadyToStart,
    Counting { remaining: f64 },
    /// Countdown done, the dinosaur is running in.
    Starting,
    Playing,
    GameOver,
    Winner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Ready,
    /// The displayed countdown second changed.
    CountdownBeat(u32),
    RunStarted,
    Playing,
    Jumped,
    Landed,
    /// An obstacle started shoving the player.
    Pushed,
    /// The displayed score changed.
    Scored(u32),
    Died { score: u32 },
    Won,
    RematchRequested,
}

impl SessionEvent {
    /// Sound to play for this event, if any.
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            Self::Ready | Self::Jumped | Self::RematchRequested => Some(SoundCue::Jump),
            Self::CountdownBeat(_) | Self::Pushed => Some(SoundCue::Push),
            Self::Died { .. } => Some(SoundCue::Fall),
            Self::Won => Some(SoundCue::Victory),
            Self::RunStarted | Self::Playing | Self::Landed | Self::Scored(_) => None,
        }
    }
}

/// A single player's game in its own lane.
#[derive(Debug, Clone)]
pub struct Session {
    slot: PlayerSlot,
    viewport: Viewport,
    config: GameConfig,
    state: SessionState,
    player: Player,
    obstacles: Vec<Obstacle>,
    spawner: ObstacleSpawner,
    score: f64,
    elapsed: f64,
    speed: f64,
    floor_offset: f64,
    background_offset: f64,
    last_beat: Option<u32>,
    pushed: bool,
    wants_rematch: bool,
}

impl Session {
    /// Build a session for `slot` in `viewport`. Fails on an invalid config
    /// or a lane too small to hold the player.
    pub fn new(
        slot: PlayerSlot,
        viewport: Viewport,
        config: &GameConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        config.validate_viewport(&viewport)?;
        Ok(Self {
            slot,
            viewport,
            config: config.clone(),
            state: SessionState::Waiting,
            player: Player::new(&viewport, config),
            obstacles: Vec::new(),
            spawner: ObstacleSpawner::new(),
            score: 0.0,
            elapsed: 0.0,
            speed: config.base_obstacle_speed,
            floor_offset: 0.0,
            background_offset: 0.0,
            last_beat: None,
            pushed: false,
            wants_rematch: false,
        })
    }

    /// Advance the session by `dt` seconds and return what happened.
    pub fn update<Q, R>(&mut self, dt: f64, input: &Q, rng: &mut R) -> Vec<SessionEvent>
    where
        Q: InputQuery + ?Sized,
        R: Rng,
    {
        let dt = clamp_tick(dt);
        let input = JumpInput::from_query(input);
        let mut events = Vec::new();

        let next = match self.state {
            SessionState::Waiting => self.tick_waiting(dt, input, &mut events),
            SessionState::ReadyToStart => self.tick_ready(dt),
            SessionState::Counting { remaining } => self.tick_counting(dt, remaining, &mut events),
            SessionState::Starting => self.tick_starting(dt, &mut events),
            SessionState::Playing => self.tick_playing(dt, input, rng, &mut events),
            SessionState::GameOver | SessionState::Winner => {
                self.tick_finished(dt, input, &mut events)
            }
        };
        self.transition(next);
        events
    }

    fn transition(&mut self, next: SessionState) {
        let changed = std::mem::discriminant(&self.state) != std::mem::discriminant(&next);
        if changed {
            log::debug!("{}: {:?} -> {:?}", self.slot.name(), self.state, next);
        }
        self.state = next;
    }

    fn tick_waiting(
        &mut self,
        dt: f64,
        input: JumpInput,
        events: &mut Vec<SessionEvent>,
    ) -> SessionState {
        self.player.update(dt, JumpInput::IDLE, &self.config);
        if input.just_pressed {
            events.push(SessionEvent::Ready);
            SessionState::ReadyToStart
        } else {
            SessionState::Waiting
        }
    }

    fn tick_ready(&mut self, dt: f64) -> SessionState {
        self.player.update(dt, JumpInput::IDLE, &self.config);
        SessionState::ReadyToStart
    }

    fn tick_counting(
        &mut self,
        dt: f64,
        remaining: f64,
        events: &mut Vec<SessionEvent>,
    ) -> SessionState {
        self.player.update(dt, JumpInput::IDLE, &self.config);
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            self.last_beat = None;
            self.player.start_run();
            events.push(SessionEvent::RunStarted);
            return SessionState::Starting;
        }

        let beat = remaining.ceil() as u32;
        if self.last_beat != Some(beat) {
            self.last_beat = Some(beat);
            events.push(SessionEvent::CountdownBeat(beat));
        }
        SessionState::Counting { remaining }
    }

    fn tick_starting(&mut self, dt: f64, events: &mut Vec<SessionEvent>) -> SessionState {
        self.scroll(dt);
        match self.player.update(dt, JumpInput::IDLE, &self.config) {
            Some(PlayerEvent::ReachedRunPosition) => {
                events.push(SessionEvent::Playing);
                SessionState::Playing
            }
            _ => SessionState::Starting,
        }
    }

    fn tick_playing<R: Rng>(
        &mut self,
        dt: f64,
        input: JumpInput,
        rng: &mut R,
        events: &mut Vec<SessionEvent>,
    ) -> SessionState {
        // Player physics
        match self.player.update(dt, input, &self.config) {
            Some(PlayerEvent::Jumped) => events.push(SessionEvent::Jumped),
            Some(PlayerEvent::Landed) => events.push(SessionEvent::Landed),
            _ => {}
        }

        // Spawn, move and cull obstacles
        let ctx = SpawnContext {
            viewport: &self.viewport,
            config: &self.config,
            speed: self.speed,
            score: self.score(),
        };
        if let Some(obstacle) = self.spawner.tick(dt, &self.obstacles, ctx, rng) {
            self.obstacles.push(obstacle);
        }
        for obstacle in &mut self.obstacles {
            obstacle.update(dt);
        }
        let left = self.viewport.left();
        self.obstacles.retain(|obstacle| !obstacle.should_remove(left));

        self.resolve_collisions(dt, events);
        if self.player.is_dead() {
            let score = self.score();
            log::debug!("{} fell at score {}", self.slot.name(), score);
            events.push(SessionEvent::Died { score });
            return SessionState::GameOver;
        }

        // Score and difficulty
        let shown = self.score();
        self.score += self.config.score_rate_per_second
            * dt
            * (1.0 + self.config.score_position_weight * self.progress());
        if self.score() != shown {
            events.push(SessionEvent::Scored(self.score()));
        }
        self.elapsed += dt;
        self.speed = obstacle_speed(&self.config, self.elapsed, self.score);
        self.scroll(dt);
        SessionState::Playing
    }

    fn tick_finished(
        &mut self,
        dt: f64,
        input: JumpInput,
        events: &mut Vec<SessionEvent>,
    ) -> SessionState {
        self.player.update(dt, JumpInput::IDLE, &self.config);
        if input.just_pressed && !self.wants_rematch {
            self.wants_rematch = true;
            events.push(SessionEvent::RematchRequested);
        }
        self.state
    }

    fn resolve_collisions(&mut self, dt: f64, events: &mut Vec<SessionEvent>) {
        let mut pushed = false;
        for obstacle in &self.obstacles {
            if !self.player.collides_with(obstacle.bounds()) {
                continue;
            }
            match self.config.collision_policy {
                CollisionPolicy::ImmediateKill => {
                    self.player.kill();
                    break;
                }
                CollisionPolicy::PushBack => {
                    let Some(overlap) = self.player.bounds().intersection(obstacle.bounds())
                    else {
                        continue;
                    };
                    // Only an obstacle ahead can block; shallow vertical grazes don't push
                    let ahead = obstacle.position().x >= self.player.position().x;
                    if ahead && overlap.width <= overlap.height {
                        self.player.push_back(obstacle.speed(), dt);
                        pushed = true;
                    }
                }
            }
        }

        if pushed && !self.pushed {
            events.push(SessionEvent::Pushed);
        }
        self.pushed = pushed;

        if self.player.at_edge(self.viewport.left()) {
            self.player.kill();
        }
    }

    fn scroll(&mut self, dt: f64) {
        self.floor_offset += self.speed * dt;
        self.background_offset += self.speed * self.config.background_speed_factor * dt;
    }

    /// Player x across the lane, in `[0, 1]`.
    fn progress(&self) -> f64 {
        ((self.player.position().x - self.viewport.left()) / self.viewport.width).clamp(0.0, 1.0)
    }

    /// Start the countdown. Only accepted from `ReadyToStart`; returns
    /// false (and changes nothing) otherwise, including while counting.
    pub fn begin_countdown(&mut self, duration: f64) -> bool {
        if self.state != SessionState::ReadyToStart {
            return false;
        }
        let remaining = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        self.last_beat = None;
        self.transition(SessionState::Counting { remaining });
        true
    }

    /// Mark this session as the match winner.
    pub fn declare_winner(&mut self) -> bool {
        if !matches!(self.state, SessionState::Playing | SessionState::GameOver) {
            return false;
        }
        self.transition(SessionState::Winner);
        true
    }

    /// Back to `Waiting` with a fresh run. Keeps allocations.
    pub fn reset(&mut self) {
        self.transition(SessionState::Waiting);
        self.player.reset();
        self.obstacles.clear();
        self.spawner.reset();
        self.score = 0.0;
        self.elapsed = 0.0;
        self.speed = self.config.base_obstacle_speed;
        self.floor_offset = 0.0;
        self.background_offset = 0.0;
        self.last_beat = None;
        self.pushed = false;
        self.wants_rematch = false;
    }

    /// Draw the dinosaur and every obstacle that is on screen.
    pub fn draw<D: Renderer + ?Sized>(&self, renderer: &mut D) {
        let (left, right) = (self.viewport.left(), self.viewport.right());
        let dino = self.player.position();
        let half = self.player.size().half_width();
        if dino.x + half > left && dino.x - half < right {
            renderer.draw_sprite(self.player.visual(self.slot), dino);
        }
        for obstacle in self.obstacles.iter().filter(|o| o.is_visible(left, right)) {
            renderer.draw_sprite(obstacle.visual(), obstacle.position());
        }
    }

    pub fn slot(&self) -> PlayerSlot {
        self.slot
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Displayed score.
    pub fn score(&self) -> u32 {
        self.score as u32
    }

    /// Exact score accumulator.
    pub fn score_value(&self) -> f64 {
        self.score
    }

    /// Seconds spent in `Playing`.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Current obstacle speed.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn floor_offset(&self) -> f64 {
        self.floor_offset
    }

    pub fn background_offset(&self) -> f64 {
        self.background_offset
    }

    /// Position in the day/night cycle, in `[0, 1)`. Night is the second half.
    pub fn day_phase(&self) -> f64 {
        (self.elapsed / self.config.day_night_cycle_seconds).fract()
    }

    pub fn is_night(&self) -> bool {
        self.day_phase() >= 0.5
    }

    /// Whole seconds left on the countdown, while counting.
    pub fn countdown(&self) -> Option<u32> {
        match self.state {
            SessionState::Counting { remaining } => Some(remaining.ceil().max(1.0) as u32),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state == SessionState::ReadyToStart
    }

    /// Countdown finished and the player is still alive.
    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Starting | SessionState::Playing)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::GameOver | SessionState::Winner)
    }

    pub fn wants_rematch(&self) -> bool {
        self.wants_rematch
    }
}
