use crate::{surface::SurfaceSize, ui::Rect};

pub type Color = [u8; 4];

pub const DEFAULT_TEXT_SCALE: u32 = 2;

// 3x5 block font, one row per byte, most significant of the low three bits is the left column.
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;
const GLYPH_UNKNOWN: [u8; 5] = [0b111, 0b001, 0b010, 0b000, 0b010];

fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Pixel size of `text` drawn at `scale` (multi-line aware).
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let lines = text.split('\n');
    let mut widest = 0u32;
    let mut count = 0u32;
    for line in lines {
        count += 1;
        let chars = line.chars().count() as u32;
        let w = (chars * glyph_advance_x(scale)).saturating_sub(scale.max(1));
        widest = widest.max(w);
    }
    let h = (count * line_advance_y(scale)).saturating_sub(scale.max(1));
    (widest, h)
}

/// Drawing interface the game talks to; it never touches pixel buffers directly.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blended fill over existing content (`alpha` replaces `color`'s own alpha).
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn rect_outline(&mut self, rect: Rect, color: Color);

    /// Straight segment with square pen of `thickness` pixels. Endpoints may lie off-surface.
    fn draw_line(&mut self, start: (i32, i32), end: (i32, i32), thickness: u32, color: Color);

    fn fill_circle(&mut self, center: (i32, i32), radius: u32, color: Color);

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, color, DEFAULT_TEXT_SCALE);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    fn buffer_fits(&self) -> bool {
        !self.size.is_empty() && self.frame.len() >= self.size.rgba_len()
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x > u32::MAX as i64 || y > u32::MAX as i64 {
            return;
        }
        let Some(idx) = self.size.rgba_index(x as u32, y as u32) else {
            return;
        };
        if let Some(px) = self.frame.get_mut(idx..idx + 4) {
            px.copy_from_slice(&color);
        }
    }

    /// Visits every in-bounds pixel row segment of `rect` as a mutable byte slice.
    fn for_each_row(&mut self, rect: Rect, mut f: impl FnMut(&mut [u8])) {
        if !self.buffer_fits() {
            return;
        }
        let max_x = rect.right().min(self.size.width);
        let max_y = rect.bottom().min(self.size.height);
        if rect.x >= max_x || rect.y >= max_y {
            return;
        }

        let stride = self.size.width as usize * 4;
        let row_bytes = (max_x - rect.x) as usize * 4;
        for y in rect.y..max_y {
            let start = y as usize * stride + rect.x as usize * 4;
            f(&mut self.frame[start..start + row_bytes]);
        }
    }

    fn stamp(&mut self, x: i64, y: i64, thickness: u32, color: Color) {
        let t = thickness.max(1) as i64;
        let half = (t - 1) / 2;
        for dy in 0..t {
            for dx in 0..t {
                self.put(x - half + dx, y - half + dy, color);
            }
        }
    }

    fn draw_glyph(&mut self, x: u32, y: u32, ch: char, color: Color, scale: u32) {
        for (row, bits) in glyph_rows(ch).into_iter().enumerate() {
            let py = y.saturating_add(row as u32 * scale);
            for col in 0..GLYPH_W {
                if bits & (1u8 << (GLYPH_W - 1 - col)) == 0 {
                    continue;
                }
                let px = x.saturating_add(col * scale);
                self.fill_rect(Rect::new(px, py, scale, scale), color);
            }
        }
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.for_each_row(rect, |row| {
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        });
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        match alpha {
            0 => return,
            255 => return self.fill_rect(rect, color),
            _ => {}
        }

        let a = alpha as u32;
        let inv = 255 - a;
        self.for_each_row(rect, |row| {
            for px in row.chunks_exact_mut(4) {
                for c in 0..3 {
                    px[c] = ((px[c] as u32 * inv + color[c] as u32 * a + 127) / 255) as u8;
                }
                px[3] = 255;
            }
        });
    }

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        let last_x = rect.right() - 1;
        let last_y = rect.bottom() - 1;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, last_y, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1, rect.h), color);
        self.fill_rect(Rect::new(last_x, rect.y, 1, rect.h), color);
    }

    fn draw_line(&mut self, start: (i32, i32), end: (i32, i32), thickness: u32, color: Color) {
        let (mut x, mut y) = (start.0 as i64, start.1 as i64);
        let (x1, y1) = (end.0 as i64, end.1 as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp(x, y, thickness, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_circle(&mut self, center: (i32, i32), radius: u32, color: Color) {
        let r = radius as i64;
        let (cx, cy) = (center.0 as i64, center.1 as i64);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let adv_x = glyph_advance_x(scale);
        let adv_y = line_advance_y(scale);
        let (width, height) = (self.size.width, self.size.height);

        let mut cursor_x = x;
        let mut cursor_y = y;
        for ch in text.chars() {
            if cursor_y >= height {
                break;
            }
            match ch {
                '\n' => {
                    cursor_x = x;
                    cursor_y = cursor_y.saturating_add(adv_y);
                }
                ' ' => cursor_x = cursor_x.saturating_add(adv_x),
                _ => {
                    if cursor_x < width {
                        self.draw_glyph(cursor_x, cursor_y, ch, color, scale);
                    }
                    cursor_x = cursor_x.saturating_add(adv_x);
                }
            }
        }
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '|' => [0b010, 0b010, 0b010, 0b010, 0b010],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],

        _ => GLYPH_UNKNOWN,
    }
}
