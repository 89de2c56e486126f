use serde::{Deserialize, Serialize};

use super::Role;
use crate::geometry::{
    direction_from_angle, is_ground_parallel, is_ground_perpendicular, midpoint, round_to, segment_angle, ApproxEq,
    Vector2, EPSILON,
};
use crate::naming::{EntityId, Label, View};

/// Decimal places kept on a trace's ground-line intercept.
pub const INTERCEPT_DECIMALS: i32 = 1;

/// A point drawn in one Monge view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointProjection2D {
    pub id: EntityId,
    pub labels: Vec<Label>,
    pub coords: Vector2,
    pub view: View,
}

impl PointProjection2D {
    pub fn new(id: EntityId, label: Label, coords: Vector2, view: View) -> Self {
        Self {
            id,
            labels: vec![label],
            coords,
            view,
        }
    }

    /// Positional identity: same view, same coordinates.
    pub fn same_position(&self, coords: &Vector2, view: View) -> bool {
        self.view == view && self.coords.approx_eq(coords)
    }
}

/// A line drawn in one Monge view, stored as its midpoint and drawing angle.
///
/// `angle` lies in `(0, π]`: the segment is oriented from its lower to its
/// upper endpoint, and lines parallel to the ground line report `π`. The
/// ground line itself is the only record with angle `0` and no view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineProjection2D {
    pub id: EntityId,
    pub labels: Vec<Label>,
    pub anchor: Vector2,
    pub angle: f64,
    pub direction: Vector2,
    pub role: Role,
    pub view: Option<View>,
}

impl LineProjection2D {
    /// Build from a drawn segment. The caller rules out `p1 == p2`.
    pub fn from_segment(id: EntityId, label: Label, p1: &Vector2, p2: &Vector2, view: View, role: Role) -> Self {
        let angle = segment_angle(p1, p2);
        Self {
            id,
            labels: vec![label],
            anchor: midpoint(p1, p2),
            angle,
            direction: direction_from_angle(angle),
            role,
            view: Some(view),
        }
    }

    /// The ground line `x`, spanning `[-half_length, half_length]` on `y = 0`.
    pub fn ground(id: EntityId, half_length: f64) -> Self {
        let start = Vector2::new(-half_length, 0.0);
        let end = Vector2::new(half_length, 0.0);
        Self {
            id,
            labels: vec![Label::ground()],
            anchor: midpoint(&start, &end),
            angle: 0.0,
            direction: Vector2::new(1.0, 0.0),
            role: Role::PlaneTrace,
            view: None,
        }
    }

    /// Positional identity: same view, midpoint and angle.
    pub fn same_position(&self, anchor: &Vector2, angle: f64, view: Option<View>) -> bool {
        self.view == view && self.anchor.approx_eq(anchor) && self.angle.approx_eq(&angle)
    }

    pub fn is_parallel_to_ground(&self) -> bool {
        is_ground_parallel(self.angle)
    }

    pub fn is_perpendicular_to_ground(&self) -> bool {
        is_ground_perpendicular(self.angle)
    }

    /// Whether `v` is perpendicular to this line.
    pub fn is_perpendicular(&self, v: &Vector2) -> bool {
        let n = self.direction.normalize();
        (n.x * v.x + n.y * v.y).abs() < EPSILON
    }

    /// Whether `v` runs along this line, in either sense.
    pub fn same_orientation(&self, v: &Vector2) -> bool {
        if v.norm() < EPSILON {
            return false;
        }
        let n = self.direction.normalize();
        let other = v.normalize();
        n.approx_eq(&other) || n.approx_eq(&-other)
    }

    pub fn contains_point(&self, p: &Vector2) -> bool {
        let n = self.direction.normalize();
        if n.x.abs() < EPSILON {
            self.anchor.x.approx_eq(&p.x)
        } else if n.y.abs() < EPSILON {
            self.anchor.y.approx_eq(&p.y)
        } else {
            let k = (p.x - self.anchor.x) / n.x;
            (self.anchor.y + k * n.y).approx_eq(&p.y)
        }
    }

    /// Abscissa where the line meets the ground line, rounded to
    /// [`INTERCEPT_DECIMALS`]. `None` for lines parallel to it.
    pub fn ground_intercept(&self) -> Option<f64> {
        if self.direction.y.abs() < EPSILON {
            return None;
        }
        let k = -self.anchor.y / self.direction.y;
        Some(round_to(self.anchor.x + k * self.direction.x, INTERCEPT_DECIMALS))
    }
}

/// Ground-line intercept of the segment `p1`-`p2`, rounded like
/// [`LineProjection2D::ground_intercept`].
pub fn segment_ground_intercept(p1: &Vector2, p2: &Vector2) -> Option<f64> {
    let v = p2 - p1;
    if v.y.abs() < EPSILON {
        return None;
    }
    let k = -p1.y / v.y;
    Some(round_to(p1.x + k * v.x, INTERCEPT_DECIMALS))
}
