use crate::rings::RingBounds;
use std::f64::consts::FRAC_PI_4;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// All placement lives in the quadrant extending up and left of the center:
/// angle 0 points left, a quarter turn points up.
pub fn point_at(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x - radius * angle.cos(),
        center.y - radius * angle.sin(),
    )
}

/// Quarter-annulus sector for one ring. An inner radius of 0 degenerates to a
/// pie slice from the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub center: Point,
    pub inner: f64,
    pub outer: f64,
}

impl Sector {
    pub fn from_bounds(center: Point, bounds: RingBounds) -> Self {
        Self {
            center,
            inner: bounds.inner,
            outer: bounds.outer,
        }
    }

    /// SVG path data: outer arc swept top-to-left (sweep flag 0), then back
    /// along the inner arc when there is one.
    pub fn svg_path(&self) -> String {
        let Point { x: cx, y: cy } = self.center;
        let r = self.outer;
        if self.inner <= 0.0 {
            format!(
                "M {cx:.3} {cy:.3} L {cx:.3} {:.3} A {r:.3} {r:.3} 0 0 0 {:.3} {cy:.3} Z",
                cy - r,
                cx - r,
            )
        } else {
            let ri = self.inner;
            format!(
                "M {cx:.3} {:.3} A {r:.3} {r:.3} 0 0 0 {:.3} {cy:.3} L {:.3} {cy:.3} A {ri:.3} {ri:.3} 0 0 1 {cx:.3} {:.3} Z",
                cy - r,
                cx - r,
                cx - ri,
                cy - ri,
            )
        }
    }
}

/// Quarter-circle outline from the top point to the left point of a ring.
pub fn arc_path(center: Point, radius: f64) -> String {
    let Point { x: cx, y: cy } = center;
    format!(
        "M {cx:.3} {:.3} A {radius:.3} {radius:.3} 0 0 0 {:.3} {cy:.3}",
        cy - radius,
        cx - radius,
    )
}

/// Anchor point for a ring's label, 45 degrees into the quadrant. Rings sit
/// at their radial midpoint; the open outermost ring instead sits 40% of the
/// way from its inner edge to the edge of the available area.
pub fn label_anchor(center: Point, bounds: RingBounds, open_outer: bool, available: f64) -> Point {
    let radius = if open_outer {
        bounds.inner + 0.4 * (available - bounds.inner)
    } else {
        bounds.midpoint()
    };
    point_at(center, radius, FRAC_PI_4)
}
