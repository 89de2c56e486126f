//! 2D geometry utilities for the Monge drawing plane.
//!
//! Both reference planes are folded into one drawing: x runs along the
//! ground line, y is height above it (frontal view) or depth below it
//! (horizontal view).

use std::f64::consts::{FRAC_PI_2, PI};

use super::{ApproxEq, Vector2, EPSILON};

// =============================================================================
// Point Operations
// =============================================================================

/// Midpoint between two 2D points.
#[inline]
pub fn midpoint(p1: &Vector2, p2: &Vector2) -> Vector2 {
    (p1 + p2) / 2.0
}

// =============================================================================
// Vector Operations
// =============================================================================

/// A vector perpendicular to `v` (`v.x * x2 + v.y * y2 == 0`).
///
/// The result is not normalized. A zero vector yields a zero vector.
pub fn perpendicular(v: &Vector2) -> Vector2 {
    if v.x.abs() < EPSILON && v.y.abs() < EPSILON {
        Vector2::zeros()
    } else if v.y.abs() < EPSILON {
        Vector2::new(-(v.y / v.x), 1.0)
    } else {
        Vector2::new(1.0, -(v.x / v.y))
    }
}

/// Counter-clockwise angle of `v` from the +x axis, in `[0, 2π)`.
pub fn heading(v: &Vector2) -> f64 {
    let angle = v.y.atan2(v.x);
    if angle < 0.0 {
        angle + 2.0 * PI
    } else {
        angle
    }
}

/// Drawing angle of the segment `p1`-`p2`, in `(0, π]`.
///
/// The segment is oriented from its lower endpoint to its upper endpoint so
/// the angle does not depend on input order. Segments parallel to the ground
/// line always report `π`.
pub fn segment_angle(p1: &Vector2, p2: &Vector2) -> f64 {
    if p1.y.approx_eq(&p2.y) {
        return PI;
    }
    let (lower, upper) = if p1.y < p2.y { (p1, p2) } else { (p2, p1) };
    heading(&(upper - lower))
}

/// Unit direction for a drawing angle.
///
/// `π/2` maps to exactly `(0, 1)` so that perpendicularity tests against the
/// ground line are exact.
pub fn direction_from_angle(angle: f64) -> Vector2 {
    if angle.approx_eq(&FRAC_PI_2) {
        Vector2::new(0.0, 1.0)
    } else {
        Vector2::new(angle.cos(), angle.sin())
    }
}

/// Whether a drawing angle runs parallel to the ground line.
#[inline]
pub fn is_ground_parallel(angle: f64) -> bool {
    angle.approx_eq(&0.0) || angle.approx_eq(&PI)
}

/// Whether a drawing angle runs perpendicular to the ground line.
#[inline]
pub fn is_ground_perpendicular(angle: f64) -> bool {
    angle.approx_eq(&FRAC_PI_2)
}

// =============================================================================
// Drawing Window
// =============================================================================

/// Extend the line through `first` and `second` to the edges of the drawing
/// window `[-limit_x, limit_x] x [-limit_y, limit_y]`.
///
/// The first returned point is the upper (or left, for lines parallel to the
/// ground line) window crossing, the second the lower (or right) one.
pub fn window_endpoints(first: &Vector2, second: &Vector2, limit_x: f64, limit_y: f64) -> [Vector2; 2] {
    let direction = second - first;
    if direction.y.abs() < EPSILON {
        return [
            Vector2::new(-limit_x, first.y),
            Vector2::new(limit_x, first.y),
        ];
    }
    [
        window_crossing(first, &direction, limit_x, limit_y),
        window_crossing(first, &direction, limit_x, -limit_y),
    ]
}

/// Where the line leaves the window heading for the horizontal edge `y = edge_y`.
fn window_crossing(position: &Vector2, direction: &Vector2, limit_x: f64, edge_y: f64) -> Vector2 {
    let k = (edge_y - position.y) / direction.y;
    let px = position.x + k * direction.x;
    if px < -limit_x || px > limit_x {
        let side = if px < -limit_x { -limit_x } else { limit_x };
        let k = (side - position.x) / direction.x;
        Vector2::new(side, position.y + k * direction.y)
    } else {
        Vector2::new(px, edge_y)
    }
}

/// Point where the line crosses the ground line, if it does so strictly
/// inside `(-limit_x, limit_x)`.
pub fn ground_crossing(position: &Vector2, direction: &Vector2, limit_x: f64) -> Option<Vector2> {
    if direction.y.abs() < EPSILON {
        return None;
    }
    let k = -position.y / direction.y;
    let px = position.x + k * direction.x;
    if px > -limit_x && px < limit_x {
        Some(Vector2::new(px, 0.0))
    } else {
        None
    }
}

// =============================================================================
// Tests
// =============================================================================
