use std::time::Duration;

use engine::FrameLogic;
use engine::render::RenderCommand;

use crate::actor::BoundedActor;
use crate::event::{FrameInput, SessionEvent};
use crate::settings::SessionSettings;
use crate::state::{ActorTint, PlaybackController, PositionHistory};
use crate::view::{FrameView, build_frame};

/// One play session: the actor, the path it has walked and the rewind controller.
///
/// Created once at startup and owned by whatever drives the frames.
#[derive(Debug, Clone)]
pub struct Session {
    actor: BoundedActor,
    history: PositionHistory,
    playback: PlaybackController,
    tint: ActorTint,
    speed: f32,
    width: u32,
    height: u32,
    frame: u64,
    quit_requested: bool,
}

impl Session {
    pub fn new(settings: &SessionSettings) -> Self {
        let actor = BoundedActor::new(settings.bounds(), settings.actor_extent());
        let history = PositionHistory::seeded(actor.position());
        Self {
            actor,
            history,
            playback: PlaybackController::new(settings.replay_cadence),
            tint: ActorTint::default(),
            speed: settings.speed,
            width: settings.width,
            height: settings.height,
            frame: 0,
            quit_requested: false,
        }
    }

    pub fn actor(&self) -> &BoundedActor {
        &self.actor
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn tint(&self) -> ActorTint {
        self.tint
    }

    pub fn is_replaying(&self) -> bool {
        self.playback.is_active()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Runs one frame: input, then the rewind step, then the draw list.
    pub fn tick(&mut self, dt: Duration, input: &FrameInput) -> Vec<RenderCommand> {
        self.frame += 1;

        let held = input.held.intent(self.speed, dt);
        for event in held.iter().chain(input.events.iter()) {
            self.apply(*event);
        }

        if let Some(target) = self.playback.tick() {
            self.actor.teleport(target.x, target.y);
            if !self.playback.is_active() {
                tracing::debug!(frame = self.frame, "replay finished");
            }
        }

        self.render()
    }

    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::MoveIntent { dx, dy } => {
                if self.is_replaying() || (dx == 0.0 && dy == 0.0) {
                    return;
                }
                self.actor.move_by(dx, dy);
                self.history.push(self.actor.position());
            }
            SessionEvent::TeleportRequest { x, y } => {
                if self.is_replaying() {
                    return;
                }
                self.actor.teleport(x, y);
                self.history.push(self.actor.position());
            }
            SessionEvent::StartReplay => {
                if self.playback.start(self.history.snapshot()) {
                    tracing::debug!(
                        frame = self.frame,
                        steps = self.playback.pending_len(),
                        "replay started"
                    );
                }
            }
            SessionEvent::ClearHistory => {
                self.history.clear();
                self.history.push(self.actor.position());
                tracing::debug!(frame = self.frame, "history cleared");
            }
            SessionEvent::SetTint(tint) => self.tint = tint,
            SessionEvent::Quit => {
                self.quit_requested = true;
                tracing::debug!(frame = self.frame, "quit requested");
            }
        }
    }

    pub fn render(&self) -> Vec<RenderCommand> {
        build_frame(&FrameView {
            width: self.width,
            height: self.height,
            path: self.history.entries(),
            actor: &self.actor,
            tint: self.tint,
            replaying: self.is_replaying(),
        })
    }
}

impl FrameLogic for Session {
    type Input = FrameInput;

    fn tick(&mut self, dt: Duration, input: &FrameInput) -> Vec<RenderCommand> {
        Session::tick(self, dt, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;

    fn point_session() -> Session {
        Session::new(&SessionSettings {
            actor_size: 0,
            ..SessionSettings::default()
        })
    }

    #[test]
    fn new_session_seeds_history_with_start_position() {
        let s = point_session();
        assert_eq!(s.actor().position(), Position::new(400.0, 300.0));
        assert_eq!(s.history().entries(), &[Position::new(400.0, 300.0)]);
        assert!(!s.is_replaying());
    }

    #[test]
    fn blocked_move_at_edge_adds_nothing() {
        let mut s = point_session();
        s.apply(SessionEvent::TeleportRequest { x: 800.0, y: 300.0 });
        s.apply(SessionEvent::MoveIntent { dx: 10.0, dy: 0.0 });
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn clear_keeps_current_position() {
        let mut s = point_session();
        s.apply(SessionEvent::MoveIntent { dx: 5.0, dy: 5.0 });
        s.apply(SessionEvent::ClearHistory);
        assert_eq!(s.history().entries(), &[Position::new(405.0, 305.0)]);
    }

    #[test]
    fn tint_and_quit_do_not_touch_history() {
        let mut s = point_session();
        s.apply(SessionEvent::SetTint(ActorTint::Green));
        s.apply(SessionEvent::Quit);
        assert_eq!(s.tint(), ActorTint::Green);
        assert!(s.quit_requested());
        assert_eq!(s.history().len(), 1);
    }
}
