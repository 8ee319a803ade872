use engine::app::{InputFrame, Press};
use winit::event::VirtualKeyCode;

use crate::event::{FrameInput, MoveKeys, SessionEvent};
use crate::state::ActorTint;

/// Key toggling the frame-timing overlay. Handled by the window app, not the session.
pub const DEBUG_TOGGLE_KEY: VirtualKeyCode = VirtualKeyCode::F3;

pub fn held_move_keys(input: &InputFrame) -> MoveKeys {
    MoveKeys {
        left: input.is_down(VirtualKeyCode::Left),
        right: input.is_down(VirtualKeyCode::Right),
        up: input.is_down(VirtualKeyCode::Up),
        down: input.is_down(VirtualKeyCode::Down),
    }
}

pub fn map_key_to_event(key: VirtualKeyCode) -> Option<SessionEvent> {
    match key {
        VirtualKeyCode::Space => Some(SessionEvent::StartReplay),
        VirtualKeyCode::C => Some(SessionEvent::ClearHistory),
        VirtualKeyCode::R => Some(SessionEvent::SetTint(ActorTint::Red)),
        VirtualKeyCode::G => Some(SessionEvent::SetTint(ActorTint::Green)),
        VirtualKeyCode::B => Some(SessionEvent::SetTint(ActorTint::Blue)),
        VirtualKeyCode::Escape => Some(SessionEvent::Quit),
        _ => None,
    }
}

/// Translates one sampled window frame into session input, keeping key and click order.
pub fn frame_input(input: &InputFrame) -> FrameInput {
    let mut frame = FrameInput::holding(held_move_keys(input));
    for press in &input.presses {
        let event = match *press {
            Press::Key(key) => map_key_to_event(key),
            Press::Click(x, y) => Some(SessionEvent::TeleportRequest {
                x: x as f32,
                y: y as f32,
            }),
        };
        if let Some(event) = event {
            frame.push(event);
        }
    }
    frame
}
