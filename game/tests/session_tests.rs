use std::time::Duration;

use winit::event::{ElementState, VirtualKeyCode};

use engine::HeadlessRunner;
use engine::app::InputFrame;
use engine::render::text_lines;

use rewind::event::{FrameInput, MoveKeys, SessionEvent};
use rewind::geometry::Position;
use rewind::headful::input_adapter::frame_input;
use rewind::session::Session;
use rewind::settings::SessionSettings;

const DT: Duration = Duration::from_millis(16);

fn session() -> Session {
    Session::new(&SessionSettings::default())
}

fn move_right(dx: f32) -> FrameInput {
    FrameInput::with_events([SessionEvent::MoveIntent { dx, dy: 0.0 }])
}

fn p(x: f32, y: f32) -> Position {
    Position::new(x, y)
}

#[test]
fn replay_walks_history_backwards_every_third_tick() {
    let mut s = session();
    for _ in 0..3 {
        s.tick(DT, &move_right(50.0));
    }
    assert_eq!(
        s.history().entries(),
        &[p(400.0, 300.0), p(450.0, 300.0), p(500.0, 300.0), p(550.0, 300.0)]
    );

    // The frame that starts the replay is also its first tick.
    s.tick(DT, &FrameInput::with_events([SessionEvent::StartReplay]));
    assert!(s.is_replaying());

    let mut visited = Vec::new();
    let mut last = s.actor().position();
    for tick in 2..=12 {
        s.tick(DT, &FrameInput::idle());
        if tick % 3 == 0 {
            visited.push(s.actor().position());
        } else {
            assert_eq!(s.actor().position(), last, "tick {tick} must not move the actor");
        }
        last = s.actor().position();
    }

    assert_eq!(
        visited,
        vec![p(550.0, 300.0), p(500.0, 300.0), p(450.0, 300.0), p(400.0, 300.0)]
    );
    assert!(!s.is_replaying());
    assert_eq!(s.history().len(), 4, "replay leaves the live history intact");
}

#[test]
fn teleport_past_the_edge_is_clamped_to_the_actor_footprint() {
    let mut s = session();
    s.tick(
        DT,
        &FrameInput::with_events([SessionEvent::TeleportRequest { x: 900.0, y: 300.0 }]),
    );
    assert_eq!(s.actor().position(), p(788.0, 300.0));

    let mut point = Session::new(&SessionSettings {
        actor_size: 0,
        ..SessionSettings::default()
    });
    point.tick(
        DT,
        &FrameInput::with_events([SessionEvent::TeleportRequest { x: 900.0, y: -20.0 }]),
    );
    assert_eq!(point.actor().position(), p(800.0, 0.0));
}

#[test]
fn moving_and_starting_replay_in_one_frame_snapshots_the_moved_position() {
    let mut s = session();
    s.tick(
        DT,
        &FrameInput::with_events([
            SessionEvent::MoveIntent { dx: 10.0, dy: 0.0 },
            SessionEvent::StartReplay,
        ]),
    );

    assert!(s.is_replaying());
    assert_eq!(s.playback().pending(), &[p(400.0, 300.0), p(410.0, 300.0)]);
}

#[test]
fn click_then_space_in_one_frame_replays_from_the_click() {
    let mut window = InputFrame::default();
    window.mouse_pos = Some((100, 100));
    window.on_click(ElementState::Pressed);
    window.on_key(VirtualKeyCode::Space, ElementState::Pressed);

    let mut s = session();
    s.tick(DT, &frame_input(&window));

    assert_eq!(s.actor().position(), p(100.0, 100.0));
    assert_eq!(s.history().entries(), &[p(400.0, 300.0), p(100.0, 100.0)]);
    assert_eq!(s.playback().pending(), &[p(400.0, 300.0), p(100.0, 100.0)]);
}

#[test]
fn non_finite_teleport_is_ignored() {
    let mut s = session();
    s.tick(
        DT,
        &FrameInput::with_events([
            SessionEvent::TeleportRequest { x: f32::NAN, y: 10.0 },
            SessionEvent::MoveIntent { dx: f32::INFINITY, dy: 0.0 },
        ]),
    );
    assert_eq!(s.actor().position(), p(400.0, 300.0));
    assert_eq!(s.history().len(), 1);
}

#[test]
fn held_keys_move_before_one_shot_events() {
    let mut s = session();
    let mut input = FrameInput::holding(MoveKeys {
        right: true,
        ..MoveKeys::NONE
    });
    input.push(SessionEvent::StartReplay);

    // 200 px/s for a quarter second.
    s.tick(Duration::from_millis(250), &input);
    assert_eq!(s.playback().pending().last(), Some(&p(450.0, 300.0)));
}

#[test]
fn input_is_ignored_while_replaying() {
    let mut s = session();
    s.tick(DT, &move_right(30.0));
    s.tick(DT, &FrameInput::with_events([SessionEvent::StartReplay]));

    s.tick(
        DT,
        &FrameInput::with_events([
            SessionEvent::MoveIntent { dx: -100.0, dy: 0.0 },
            SessionEvent::TeleportRequest { x: 10.0, y: 10.0 },
        ]),
    );
    assert_eq!(s.actor().position(), p(430.0, 300.0));
    assert_eq!(s.history().len(), 2);
}

#[test]
fn start_while_replaying_does_not_restart() {
    let mut s = session();
    s.tick(DT, &move_right(30.0));
    s.tick(DT, &FrameInput::with_events([SessionEvent::StartReplay]));
    s.tick(DT, &FrameInput::idle());
    s.tick(DT, &FrameInput::with_events([SessionEvent::StartReplay]));

    // The third tick popped the tail; a restart would have refilled it.
    assert_eq!(s.playback().pending_len(), 1);
}

#[test]
fn clearing_during_replay_keeps_the_replay_running() {
    let mut s = session();
    for _ in 0..2 {
        s.tick(DT, &move_right(20.0));
    }
    s.tick(DT, &FrameInput::with_events([SessionEvent::StartReplay]));
    s.tick(DT, &FrameInput::with_events([SessionEvent::ClearHistory]));

    assert_eq!(s.history().entries(), &[p(440.0, 300.0)]);
    assert_eq!(s.playback().pending_len(), 3);

    for _ in 0..7 {
        s.tick(DT, &FrameInput::idle());
    }
    assert!(!s.is_replaying());
    assert_eq!(s.actor().position(), p(400.0, 300.0));
    assert_eq!(s.history().entries(), &[p(440.0, 300.0)]);
}

#[test]
fn repeated_teleport_to_same_spot_records_once() {
    let mut s = session();
    let teleport = FrameInput::with_events([SessionEvent::TeleportRequest { x: 100.0, y: 100.0 }]);
    s.tick(DT, &teleport);
    s.tick(DT, &teleport);
    assert_eq!(s.history().len(), 2);
}

#[test]
fn replay_of_single_position_ends_on_its_third_tick() {
    let mut s = session();
    s.tick(DT, &FrameInput::with_events([SessionEvent::StartReplay]));
    s.tick(DT, &FrameInput::idle());
    assert!(s.is_replaying());
    s.tick(DT, &FrameInput::idle());
    assert!(!s.is_replaying());
    assert_eq!(s.actor().position(), p(400.0, 300.0));
}

#[test]
fn hud_reports_history_length_and_replay_state() {
    let mut runner = HeadlessRunner::new(session());
    runner.step(DT, &move_right(10.0));
    let frame = runner.step(DT, &FrameInput::with_events([SessionEvent::StartReplay]));

    let hud = text_lines(&frame).join("\n");
    assert!(hud.contains("POSITIONS: 2"), "{hud}");
    assert!(hud.contains("REPLAY: ON"), "{hud}");
    assert_eq!(runner.frame(), 2);
    assert_eq!(runner.logic().frame(), 2);
}

#[test]
fn quit_event_is_surfaced_to_the_driver() {
    let mut runner = HeadlessRunner::new(session());
    runner.run(
        DT,
        [
            FrameInput::idle(),
            FrameInput::with_events([SessionEvent::Quit]),
        ],
    );
    assert!(runner.logic().quit_requested());
}
