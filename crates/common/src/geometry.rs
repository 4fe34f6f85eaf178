use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// The window rectangle `[0, width) × [0, height)` with toroidal edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Wrap a point back into the window: leaving one edge re-enters the opposite one.
    pub fn wrap(&self, p: Point) -> Point {
        Point::new(wrap_axis(p.x, self.width), wrap_axis(p.y, self.height))
    }

    pub fn contains(&self, p: Point) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }
}

fn wrap_axis(v: f64, extent: f64) -> f64 {
    let r = v.rem_euclid(extent);
    // A tiny negative input rounds up to exactly `extent`.
    if r >= extent { 0.0 } else { r }
}

/// Normalize an angle in radians into `(-π, π]`.
pub fn normalize_angle(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let r = (PI - angle).rem_euclid(TAU);
    if r >= TAU { PI } else { PI - r }
}

/// Signed angle to turn from `from` to face `to`, in `(-π, π]`.
pub fn angle_between(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}
