//! Integer layout primitives for screen-space drawing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    /// A `w`x`h` rect whose center sits at (`cx`, `cy`).
    ///
    /// Parts that would land at negative coordinates are cut off, so the result may be smaller
    /// than requested near the top/left edges.
    pub fn centered_on(cx: i32, cy: i32, w: u32, h: u32) -> Self {
        let left = cx as i64 - (w / 2) as i64;
        let top = cy as i64 - (h / 2) as i64;
        let cut_x = (-left).max(0) as u32;
        let cut_y = (-top).max(0) as u32;
        Self {
            x: left.max(0) as u32,
            y: top.max(0) as u32,
            w: w.saturating_sub(cut_x),
            h: h.saturating_sub(cut_y),
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// The inner content area after removing `insets`; saturates to an empty rect.
    pub fn inset(&self, insets: Insets) -> Self {
        let w = self
            .w
            .saturating_sub(insets.left.saturating_add(insets.right));
        let h = self
            .h
            .saturating_sub(insets.top.saturating_add(insets.bottom));
        Self {
            x: self.x.saturating_add(insets.left),
            y: self.y.saturating_add(insets.top),
            w,
            h,
        }
    }

    /// Places a child of `size` inside this rect at `anchor`, shrinking it to fit if needed.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);
        let y = match anchor {
            Anchor::TopLeft => self.y,
            Anchor::BottomLeft => self.y.saturating_add(self.h - h),
        };
        Self { x: self.x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    pub fn all(v: u32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    BottomLeft,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_shrinks_rect_and_moves_origin() {
        let r = Rect::from_size(100, 80);
        assert_eq!(r.inset(Insets::all(10)), Rect::new(10, 10, 80, 60));
    }

    #[test]
    fn place_anchors_child_in_parent() {
        let parent = Rect::new(5, 5, 100, 100);
        assert_eq!(
            parent.place(Size::new(20, 10), Anchor::TopLeft),
            Rect::new(5, 5, 20, 10)
        );
        assert_eq!(
            parent.place(Size::new(20, 10), Anchor::BottomLeft),
            Rect::new(5, 95, 20, 10)
        );
        assert_eq!(
            parent.place(Size::new(999, 999), Anchor::BottomLeft),
            Rect::new(5, 5, 100, 100)
        );
    }

    #[test]
    fn centered_on_clips_at_origin() {
        assert_eq!(Rect::centered_on(50, 40, 10, 6), Rect::new(45, 37, 10, 6));
        assert_eq!(Rect::centered_on(2, 1, 10, 6), Rect::new(0, 0, 7, 4));
        assert_eq!(Rect::centered_on(-20, -20, 10, 10), Rect::new(0, 0, 0, 0));
    }
}
