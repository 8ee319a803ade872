use crate::geometry::{Bounds, Extent, Position};

/// The steerable body. Its position is always inside `bounds`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedActor {
    position: Position,
    bounds: Bounds,
    extent: Extent,
}

impl BoundedActor {
    /// Spawns at the center of `bounds`.
    pub fn new(bounds: Bounds, extent: Extent) -> Self {
        Self {
            position: bounds.clamp(bounds.center(), extent),
            bounds,
            extent,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Non-finite offsets are ignored.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        let target = Position::new(self.position.x + dx, self.position.y + dy);
        self.position = self.bounds.clamp(target, self.extent);
    }

    /// Non-finite targets are ignored.
    pub fn teleport(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.position = self.bounds.clamp(Position::new(x, y), self.extent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_actor() -> BoundedActor {
        BoundedActor::new(Bounds::new(800.0, 600.0), Extent::POINT)
    }

    #[test]
    fn spawns_at_bounds_center() {
        assert_eq!(point_actor().position(), Position::new(400.0, 300.0));
    }

    #[test]
    fn move_by_accumulates_sub_pixel_deltas() {
        let mut a = point_actor();
        a.move_by(0.25, -0.5);
        a.move_by(0.25, -0.5);
        assert_eq!(a.position(), Position::new(400.5, 299.0));
    }

    #[test]
    fn teleport_past_edge_clamps_instead_of_rejecting() {
        let mut a = point_actor();
        a.teleport(900.0, 300.0);
        assert_eq!(a.position(), Position::new(800.0, 300.0));

        let mut sized = BoundedActor::new(Bounds::new(800.0, 600.0), Extent::square(24.0));
        sized.teleport(900.0, 300.0);
        assert_eq!(sized.position(), Position::new(788.0, 300.0));
    }

    #[test]
    fn zero_delta_is_a_no_op() {
        let mut a = point_actor();
        a.move_by(0.0, 0.0);
        assert_eq!(a.position(), Position::new(400.0, 300.0));
    }

    #[test]
    fn any_move_sequence_stays_in_bounds() {
        let mut a = BoundedActor::new(Bounds::new(320.0, 240.0), Extent::square(10.0));
        let deltas = [
            (1000.0, 0.0),
            (0.0, 1000.0),
            (-37.5, 12.25),
            (-5000.0, -5000.0),
            (3.0, 4.0),
            (160.0, 120.0),
        ];
        for (i, (dx, dy)) in deltas.into_iter().enumerate() {
            a.move_by(dx, dy);
            let p = a.position();
            assert!(a.bounds().contains(p), "step {i}: {p:?} escaped");
            assert!((5.0..=315.0).contains(&p.x) && (5.0..=235.0).contains(&p.y));

            a.teleport(dy * 3.0, dx * -2.0);
            assert!(a.bounds().contains(a.position()), "teleport {i} escaped");
        }
    }

    #[test]
    fn non_finite_input_leaves_position_unchanged() {
        let mut a = point_actor();
        a.teleport(f32::NAN, 10.0);
        a.move_by(0.0, f32::NEG_INFINITY);
        assert_eq!(a.position(), Position::new(400.0, 300.0));
    }
}
