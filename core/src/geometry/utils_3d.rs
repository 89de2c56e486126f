//! 3D geometry utilities for the bounded scene.
//!
//! The scene is an axis-aligned cube centred on the origin. Infinite lines
//! and plane traces are turned into finite, renderable segments by clipping
//! them against that cube.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{round_to, Vector3, EPSILON};

/// Decimal places kept on boundary crossings before they are compared.
pub const CLIP_DECIMALS: i32 = 2;

// =============================================================================
// Vector Operations
// =============================================================================

/// Angle between two vectors, in `[0, π]`.
///
/// Zero-length inputs must be ruled out by the caller.
#[inline]
pub fn angle_between(u: &Vector3, v: &Vector3) -> f64 {
    u.angle(v)
}

/// Cross product `a x b`.
#[inline]
pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
    a.cross(b)
}

/// Midpoint between two 3D points.
#[inline]
pub fn midpoint3(p1: &Vector3, p2: &Vector3) -> Vector3 {
    (p1 + p2) / 2.0
}

/// Distance between two 3D points.
#[inline]
pub fn distance3(p1: &Vector3, p2: &Vector3) -> f64 {
    (p2 - p1).norm()
}

// =============================================================================
// Axes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two remaining axes, in X, Y, Z order.
    pub fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}

// =============================================================================
// Box Clipping
// =============================================================================

/// Clipping produced fewer than two distinct boundary points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("degenerate clip: {found} distinct boundary point(s) inside the scene bounds")]
pub struct ClipError {
    pub found: usize,
}

/// Clip the line `anchor + k * direction`, lying in the plane
/// `fixed_axis = fixed_value`, against the box `[-h, h]` on the two free axes.
///
/// Crossings are taken in the order `+a, +b, -a, -b` for free axes `a, b`.
/// Each crossing is kept only if its other free coordinate is within bounds
/// after rounding to [`CLIP_DECIMALS`]; coincident crossings (a line through
/// a corner) collapse into one.
pub fn clip_segment_to_box(
    anchor: &Vector3,
    direction: &Vector3,
    half_extents: &Vector3,
    fixed_axis: Axis,
    fixed_value: f64,
) -> Result<[Vector3; 2], ClipError> {
    let free = fixed_axis.others();
    let crossings = boundary_crossings(anchor, direction, half_extents, &free)
        .into_iter()
        .map(|mut point| {
            point[fixed_axis.index()] = fixed_value;
            point
        });
    first_two_distinct(crossings)
}

/// Clip an unconstrained 3D line against the box `[-h, h]` on all three axes.
///
/// Crossings are taken in the order `+x, +y, +z, -x, -y, -z`.
pub fn clip_line_to_box(
    anchor: &Vector3,
    direction: &Vector3,
    half_extents: &Vector3,
) -> Result<[Vector3; 2], ClipError> {
    first_two_distinct(boundary_crossings(anchor, direction, half_extents, &Axis::ALL))
}

/// Intersections of the line with the faces `axis = ±h` for each axis in
/// `axes`, filtered to those inside the bounds of every other axis in `axes`.
fn boundary_crossings(
    anchor: &Vector3,
    direction: &Vector3,
    half_extents: &Vector3,
    axes: &[Axis],
) -> Vec<Vector3> {
    let mut crossings = Vec::with_capacity(axes.len() * 2);
    for sign in [1.0, -1.0] {
        for &axis in axes {
            let i = axis.index();
            if direction[i].abs() < EPSILON {
                continue;
            }
            let bound = sign * half_extents[i];
            let k = (bound - anchor[i]) / direction[i];
            let mut point = anchor + direction * k;
            for &other in axes {
                let j = other.index();
                point[j] = if j == i { bound } else { round_to(point[j], CLIP_DECIMALS) };
            }
            let inside = axes.iter().all(|other| {
                let j = other.index();
                point[j] <= half_extents[j] && point[j] >= -half_extents[j]
            });
            if inside {
                crossings.push(point);
            }
        }
    }
    crossings
}

fn first_two_distinct(points: impl IntoIterator<Item = Vector3>) -> Result<[Vector3; 2], ClipError> {
    let mut unique: Vec<Vector3> = Vec::with_capacity(2);
    for point in points {
        if !unique.contains(&point) {
            unique.push(point);
        }
    }
    match unique.as_slice() {
        [first, second, ..] => Ok([*first, *second]),
        _ => Err(ClipError { found: unique.len() }),
    }
}

// =============================================================================
// Tests
// =============================================================================
