use serde::{Deserialize, Serialize};

use crate::graphics::{Color, Renderer2d};
use crate::ui::Rect;

/// One drawing instruction produced by a frame tick.
///
/// Frames are described as plain data so headless runs can inspect exactly what a window
/// would have drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderCommand {
    Clear {
        color: Color,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    BlendRect {
        rect: Rect,
        color: Color,
        alpha: u8,
    },
    Outline {
        rect: Rect,
        color: Color,
    },
    Polyline {
        points: Vec<(i32, i32)>,
        thickness: u32,
        color: Color,
    },
    Dot {
        center: (i32, i32),
        radius: u32,
        color: Color,
    },
    Text {
        pos: (u32, u32),
        text: String,
        color: Color,
        scale: u32,
    },
}

/// Replays `commands` in order onto `gfx`.
pub fn draw_commands(gfx: &mut dyn Renderer2d, commands: &[RenderCommand]) {
    for command in commands {
        match command {
            RenderCommand::Clear { color } => gfx.clear(*color),
            RenderCommand::FillRect { rect, color } => gfx.fill_rect(*rect, *color),
            RenderCommand::BlendRect { rect, color, alpha } => {
                gfx.blend_rect(*rect, *color, *alpha)
            }
            RenderCommand::Outline { rect, color } => gfx.rect_outline(*rect, *color),
            RenderCommand::Polyline {
                points,
                thickness,
                color,
            } => {
                for pair in points.windows(2) {
                    gfx.draw_line(pair[0], pair[1], *thickness, *color);
                }
            }
            RenderCommand::Dot {
                center,
                radius,
                color,
            } => gfx.fill_circle(*center, *radius, *color),
            RenderCommand::Text {
                pos,
                text,
                color,
                scale,
            } => gfx.draw_text_scaled(pos.0, pos.1, text, *color, *scale),
        }
    }
}

/// Text content of every `Text` command, in draw order.
pub fn text_lines(commands: &[RenderCommand]) -> Vec<&str> {
    commands
        .iter()
        .filter_map(|c| match c {
            RenderCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
