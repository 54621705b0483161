//! Two-player match: ready sync, shared countdown, winner and rematch.
//!
//! The match ticks player one then player two, then looks at both sessions
//! together. Sessions never talk to each other directly.

use super::session::{clamp_tick, Session, SessionEvent, SessionState};
use crate::core::config::{ConfigError, GameConfig, MatchRule};
use crate::core::geometry::Viewport;
use crate::core::host::{Audio, PlayerSlot};
use crate::core::input::InputQuery;
use rand::Rng;

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(PlayerSlot),
    Draw,
}

/// What the match needs to know about one session to settle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    pub fallen: bool,
    pub score: u32,
}

impl Standing {
    fn of(session: &Session) -> Self {
        Self {
            fallen: session.state() == SessionState::GameOver,
            score: session.score(),
        }
    }
}

/// Settle a match from both players' standings, or `None` if it is still on.
///
/// Score comparisons use the displayed score; an exact tie is a draw.
pub fn decide(rule: MatchRule, standings: [Standing; 2]) -> Option<MatchOutcome> {
    let [one, two] = standings;
    match (rule, one.fallen, two.fallen) {
        (_, true, true) => Some(compare_scores(one.score, two.score)),
        (MatchRule::LastStanding, true, false) => Some(MatchOutcome::Winner(PlayerSlot::Two)),
        (MatchRule::LastStanding, false, true) => Some(MatchOutcome::Winner(PlayerSlot::One)),
        _ => None,
    }
}

fn compare_scores(one: u32, two: u32) -> MatchOutcome {
    use std::cmp::Ordering;
    match one.cmp(&two) {
        Ordering::Greater => MatchOutcome::Winner(PlayerSlot::One),
        Ordering::Less => MatchOutcome::Winner(PlayerSlot::Two),
        Ordering::Equal => MatchOutcome::Draw,
    }
}

/// Forward each event's sound cue to `audio`.
pub fn dispatch_sounds<A: Audio + ?Sized>(events: &[SessionEvent], audio: &mut A) {
    for cue in events.iter().filter_map(SessionEvent::sound_cue) {
        audio.play_one_shot(cue);
    }
}

/// Everything that happened during one match tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchUpdate {
    /// Session events, indexed by [`PlayerSlot::index`].
    pub events: [Vec<SessionEvent>; 2],
    /// Set on the tick the match was decided.
    pub outcome: Option<MatchOutcome>,
    /// Both players asked for a rematch and the match was reset.
    pub rematch: bool,
}

impl MatchUpdate {
    pub fn events_for(&self, slot: PlayerSlot) -> &[SessionEvent] {
        &self.events[slot.index()]
    }

    pub fn dispatch_sounds<A: Audio + ?Sized>(&self, audio: &mut A) {
        for events in &self.events {
            dispatch_sounds(events, audio);
        }
    }
}

/// Two sessions side by side plus the shared RNG.
#[derive(Debug)]
pub struct Match<R: Rng> {
    sessions: [Session; 2],
    config: GameConfig,
    rng: R,
    ready_timer: f64,
    outcome: Option<MatchOutcome>,
}

impl<R: Rng> Match<R> {
    /// `lanes[0]` belongs to player one, `lanes[1]` to player two.
    pub fn new(lanes: [Viewport; 2], config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        let [one, two] = lanes;
        let sessions = [
            Session::new(PlayerSlot::One, one, &config)?,
            Session::new(PlayerSlot::Two, two, &config)?,
        ];
        Ok(Self {
            sessions,
            config,
            rng,
            ready_timer: 0.0,
            outcome: None,
        })
    }

    /// Advance both sessions by `dt` with each player's input.
    pub fn update<Q: InputQuery>(&mut self, dt: f64, inputs: &[Q; 2]) -> MatchUpdate {
        let dt = clamp_tick(dt);
        let mut update = MatchUpdate::default();

        for slot in PlayerSlot::ALL {
            let i = slot.index();
            update.events[i] = self.sessions[i].update(dt, &inputs[i], &mut self.rng);
        }

        self.sync_countdown(dt);

        if self.outcome.is_none() {
            update.outcome = self.settle(&mut update.events);
        } else if self.sessions.iter().all(Session::wants_rematch) {
            log::info!("rematch");
            self.reset();
            update.rematch = true;
        }
        update
    }

    fn sync_countdown(&mut self, dt: f64) {
        if !self.sessions.iter().all(Session::is_ready) {
            self.ready_timer = 0.0;
            return;
        }
        self.ready_timer += dt;
        if self.ready_timer >= self.config.ready_delay {
            self.ready_timer = 0.0;
            log::debug!("both ready, countdown {}s", self.config.countdown_seconds);
            for session in &mut self.sessions {
                session.begin_countdown(self.config.countdown_seconds);
            }
        }
    }

    fn settle(&mut self, events: &mut [Vec<SessionEvent>; 2]) -> Option<MatchOutcome> {
        let standings = [
            Standing::of(&self.sessions[0]),
            Standing::of(&self.sessions[1]),
        ];
        let outcome = decide(self.config.match_rule, standings)?;

        match outcome {
            MatchOutcome::Winner(slot) => {
                let i = slot.index();
                if self.sessions[i].declare_winner() {
                    events[i].push(SessionEvent::Won);
                }
                log::info!(
                    "{} wins ({} to {})",
                    slot.name(),
                    self.sessions[i].score(),
                    self.sessions[slot.opponent().index()].score()
                );
            }
            MatchOutcome::Draw => {
                log::info!("draw at {}", self.sessions[0].score());
            }
        }
        self.outcome = Some(outcome);
        Some(outcome)
    }

    /// Fresh match in place: both sessions waiting, no outcome.
    pub fn reset(&mut self) {
        for session in &mut self.sessions {
            session.reset();
        }
        self.ready_timer = 0.0;
        self.outcome = None;
    }

    pub fn session(&self, slot: PlayerSlot) -> &Session {
        &self.sessions[slot.index()]
    }

    pub fn sessions(&self) -> &[Session; 2] {
        &self.sessions
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    /// Seconds both players have been ready.
    pub fn ready_timer(&self) -> f64 {
        self.ready_timer
    }
}
