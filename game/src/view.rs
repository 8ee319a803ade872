use engine::graphics::{Color, DEFAULT_TEXT_SCALE, text_size};
use engine::render::RenderCommand;
use engine::ui::{Anchor, Insets, Rect, Size};

use crate::actor::BoundedActor;
use crate::geometry::Position;
use crate::state::ActorTint;

pub const COLOR_BACKGROUND: Color = [255, 255, 255, 255];
pub const COLOR_PATH: Color = [200, 200, 200, 255];
pub const COLOR_TEXT: Color = [0, 0, 0, 255];
pub const COLOR_ACTOR_OUTLINE: Color = [20, 20, 28, 255];
const COLOR_HUD_PANEL: Color = [245, 245, 250, 255];
const HUD_PANEL_ALPHA: u8 = 200;

const PATH_THICKNESS: u32 = 2;
const PATH_DOT_RADIUS: u32 = 3;
const HUD_MARGIN: u32 = 5;
const HUD_PADDING: u32 = 4;
const POINT_ACTOR_SIDE: u32 = 6;

pub const HELP_LINES: [&str; 2] = [
    "ARROWS: MOVE | CLICK: TELEPORT | SPACE: REPLAY",
    "R/G/B: COLOR | C: CLEAR PATH | ESC: QUIT",
];

/// What one frame shows, borrowed from the session.
pub struct FrameView<'a> {
    pub width: u32,
    pub height: u32,
    pub path: &'a [Position],
    pub actor: &'a BoundedActor,
    pub tint: ActorTint,
    pub replaying: bool,
}

pub fn status_lines(path_len: usize, replaying: bool) -> [String; 2] {
    [
        format!("POSITIONS: {path_len}"),
        format!("REPLAY: {}", if replaying { "ON" } else { "OFF" }),
    ]
}

pub fn build_frame(view: &FrameView<'_>) -> Vec<RenderCommand> {
    let mut out = vec![RenderCommand::Clear {
        color: COLOR_BACKGROUND,
    }];
    push_path(&mut out, view.path);
    push_actor(&mut out, view.actor, view.tint);

    let mut lines: Vec<String> = HELP_LINES.iter().map(|s| s.to_string()).collect();
    lines.extend(status_lines(view.path.len(), view.replaying));
    push_text_panel(&mut out, view.width, view.height, &lines, Anchor::TopLeft);
    out
}

/// Diagnostics text pinned to the bottom-left corner.
pub fn debug_overlay(width: u32, height: u32, text: &str) -> Vec<RenderCommand> {
    let mut out = Vec::new();
    push_text_panel(&mut out, width, height, &[text.to_string()], Anchor::BottomLeft);
    out
}

fn push_path(out: &mut Vec<RenderCommand>, path: &[Position]) {
    let points: Vec<(i32, i32)> = path.iter().map(|p| p.to_pixel()).collect();
    if points.len() >= 2 {
        out.push(RenderCommand::Polyline {
            points: points.clone(),
            thickness: PATH_THICKNESS,
            color: COLOR_PATH,
        });
    }
    out.extend(points.into_iter().map(|center| RenderCommand::Dot {
        center,
        radius: PATH_DOT_RADIUS,
        color: COLOR_PATH,
    }));
}

fn push_actor(out: &mut Vec<RenderCommand>, actor: &BoundedActor, tint: ActorTint) {
    let (cx, cy) = actor.position().to_pixel();
    let extent = actor.extent();
    let w = (extent.width.round() as u32).max(POINT_ACTOR_SIDE);
    let h = (extent.height.round() as u32).max(POINT_ACTOR_SIDE);
    let rect = Rect::centered_on(cx, cy, w, h);

    out.push(RenderCommand::FillRect {
        rect,
        color: tint.color(),
    });
    out.push(RenderCommand::Outline {
        rect,
        color: COLOR_ACTOR_OUTLINE,
    });
}

fn push_text_panel(
    out: &mut Vec<RenderCommand>,
    width: u32,
    height: u32,
    lines: &[String],
    anchor: Anchor,
) {
    let text = lines.join("\n");
    let (tw, th) = text_size(&text, DEFAULT_TEXT_SCALE);
    let area = Rect::from_size(width, height).inset(Insets::all(HUD_MARGIN));
    let panel = area.place(
        Size::new(tw + 2 * HUD_PADDING, th + 2 * HUD_PADDING),
        anchor,
    );
    let content = panel.inset(Insets::all(HUD_PADDING));

    out.push(RenderCommand::BlendRect {
        rect: panel,
        color: COLOR_HUD_PANEL,
        alpha: HUD_PANEL_ALPHA,
    });
    out.push(RenderCommand::Text {
        pos: (content.x, content.y),
        text,
        color: COLOR_TEXT,
        scale: DEFAULT_TEXT_SCALE,
    });
}
