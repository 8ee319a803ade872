use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::state::ActorTint;

/// Everything a frame can ask the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Relative movement in pixels for this frame.
    MoveIntent { dx: f32, dy: f32 },
    TeleportRequest { x: f32, y: f32 },
    StartReplay,
    ClearHistory,
    SetTint(ActorTint),
    Quit,
}

/// Movement keys currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveKeys {
    pub const NONE: MoveKeys = MoveKeys {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    /// Per-frame displacement at `speed` px/s. Opposite keys cancel; `None` when nothing moves.
    pub fn intent(self, speed: f32, dt: Duration) -> Option<SessionEvent> {
        let step = speed * dt.as_secs_f32();
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -step,
            (false, true) => step,
            _ => 0.0,
        };
        let dx = axis(self.left, self.right);
        let dy = axis(self.up, self.down);
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(SessionEvent::MoveIntent { dx, dy })
    }
}

/// One frame's worth of sampled input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub held: MoveKeys,
    /// One-shot events in the order they arrived.
    pub events: Vec<SessionEvent>,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn holding(held: MoveKeys) -> Self {
        Self {
            held,
            events: Vec::new(),
        }
    }

    pub fn with_events(events: impl IntoIterator<Item = SessionEvent>) -> Self {
        Self {
            held: MoveKeys::NONE,
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: SessionEvent) {
        self.events.push(event);
    }
}
