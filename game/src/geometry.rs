use serde::{Deserialize, Serialize};

/// A continuous point in session space. Equality is exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Pixel the position falls into (truncating toward negative infinity).
    pub fn to_pixel(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

/// The actor's rectangular footprint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub const POINT: Extent = Extent {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: f32) -> Self {
        Self::new(side, side)
    }
}

/// Fixed session area spanning `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, p: Position) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Moves `p` the least distance needed for a body of `extent` centered on it to fit.
    ///
    /// A body wider (or taller) than the bounds is centered on that axis.
    pub fn clamp(&self, p: Position, extent: Extent) -> Position {
        Position::new(
            clamp_axis(p.x, extent.width, self.width),
            clamp_axis(p.y, extent.height, self.height),
        )
    }
}

fn clamp_axis(v: f32, body: f32, span: f32) -> f32 {
    if body >= span {
        return span / 2.0;
    }
    let half = body / 2.0;
    v.clamp(half, span - half)
}
