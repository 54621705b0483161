//! Collaborator contracts implemented by the host: drawing and sound.
//!
//! The core never renders or plays audio itself. Sessions describe what is
//! visible through [`Renderer::draw_sprite`] and report cues as events; the
//! host forwards those to an [`Audio`] implementation.

use super::geometry::{Size, Vec2};

/// Which side of the split screen a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(&self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::One => "Player 1",
            Self::Two => "Player 2",
        }
    }

    pub fn opponent(&self) -> PlayerSlot {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

/// Animation a dinosaur is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DinoPose {
    Walk,
    Jump,
    Dead,
}

/// Cosmetic obstacle look, cycled as the score grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleStyle {
    Cactus,
    TallCactus,
    CactusCluster,
}

impl ObstacleStyle {
    pub const ALL: [ObstacleStyle; 3] = [
        ObstacleStyle::Cactus,
        ObstacleStyle::TallCactus,
        ObstacleStyle::CactusCluster,
    ];

    /// Style for a score, changing every `step` points.
    pub fn for_score(score: u32, step: u32) -> Self {
        let index = (score / step.max(1)) as usize % Self::ALL.len();
        Self::ALL[index]
    }
}

/// What to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    Dino { slot: PlayerSlot, pose: DinoPose },
    Obstacle(ObstacleStyle),
}

/// Handle passed to the renderer: the kind of sprite, its size and the
/// animation frame to show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub kind: VisualKind,
    pub size: Size,
    pub frame: u32,
}

/// Sprite drawing, fire-and-forget. `position` is the sprite centre.
pub trait Renderer {
    fn draw_sprite(&mut self, visual: Visual, position: Vec2);
}

/// One-shot sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Jump start, and the ready confirmation.
    Jump,
    /// Countdown beat, and an obstacle shoving the player.
    Push,
    /// The player went down.
    Fall,
    /// Match decided in this player's favour.
    Victory,
}

/// Sound playback, fire-and-forget.
pub trait Audio {
    fn play_one_shot(&mut self, cue: SoundCue);
}

/// Audio sink that drops every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silence;

impl Audio for Silence {
    fn play_one_shot(&mut self, _cue: SoundCue) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_opponent_and_index() {
        assert_eq!(PlayerSlot::One.opponent(), PlayerSlot::Two);
        assert_eq!(PlayerSlot::Two.opponent(), PlayerSlot::One);
        assert_eq!(PlayerSlot::One.index(), 0);
        assert_eq!(PlayerSlot::Two.index(), 1);
    }

    #[test]
    fn test_obstacle_style_cycles_with_score() {
        assert_eq!(ObstacleStyle::for_score(0, 100), ObstacleStyle::Cactus);
        assert_eq!(ObstacleStyle::for_score(99, 100), ObstacleStyle::Cactus);
        assert_eq!(ObstacleStyle::for_score(100, 100), ObstacleStyle::TallCactus);
        assert_eq!(ObstacleStyle::for_score(250, 100), ObstacleStyle::CactusCluster);
        assert_eq!(ObstacleStyle::for_score(300, 100), ObstacleStyle::Cactus);
    }

    #[test]
    fn test_obstacle_style_zero_step_does_not_panic() {
        assert_eq!(ObstacleStyle::for_score(5, 0), ObstacleStyle::CactusCluster);
    }
}
