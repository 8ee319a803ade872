use engine::graphics::Color;
use engine::history::History;
use engine::playback::Playback;
use serde::{Deserialize, Serialize};

use crate::geometry::Position;

/// Frames between successive rewind steps.
pub const REPLAY_CADENCE: u32 = 3;

/// Distinct consecutive positions the actor has visited, oldest first.
pub type PositionHistory = History<Position>;

/// Rewinds the actor through a snapshot of its history.
pub type PlaybackController = Playback<Position>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorTint {
    #[default]
    Neutral,
    Red,
    Green,
    Blue,
}

impl ActorTint {
    pub fn color(self) -> Color {
        match self {
            ActorTint::Neutral => [70, 70, 84, 255],
            ActorTint::Red => [255, 0, 0, 255],
            ActorTint::Green => [0, 200, 0, 255],
            ActorTint::Blue => [0, 100, 255, 255],
        }
    }
}
