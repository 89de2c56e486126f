use serde::{Deserialize, Serialize};

use super::{LineKind, PlaneKind, ProjectionKind};
use crate::geometry::{ApproxEq, Vector3};
use crate::naming::{EntityId, Label, View};

/// A point projection embedded in the 3D scene, on the `y = 0` plane for
/// the horizontal view and on `x = 0` for the frontal one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point3DProjection {
    pub view: View,
    pub position: Vector3,
}

/// A line projection embedded in the 3D scene and clipped to its bounds.
///
/// `angle` is measured against `+z` and equals the drawing angle of the 2D
/// projection it was made from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line3DProjection {
    pub view: View,
    pub endpoints: [Vector3; 2],
    pub position: Vector3,
    pub angle: f64,
    pub direction: Vector3,
}

impl Line3DProjection {
    pub fn length(&self) -> f64 {
        (self.endpoints[1] - self.endpoints[0]).norm()
    }
}

pub type EmbeddedProjection = ProjectionKind<Point3DProjection, Line3DProjection>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub id: EntityId,
    pub labels: Vec<Label>,
    pub position: Vector3,
    pub horizontal: Point3DProjection,
    pub frontal: Point3DProjection,
}

impl Point3D {
    pub fn same_position(&self, position: &Vector3) -> bool {
        self.position.approx_eq(position)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line3D {
    pub id: EntityId,
    pub labels: Vec<Label>,
    /// Midpoint of the visible segment.
    pub position: Vector3,
    /// Unit direction.
    pub direction: Vector3,
    pub endpoints: [Vector3; 2],
    pub length: f64,
    pub kind: LineKind,
    pub horizontal: EmbeddedProjection,
    pub frontal: EmbeddedProjection,
}

impl Line3D {
    pub fn same_position(&self, position: &Vector3, direction: &Vector3) -> bool {
        self.position.approx_eq(position) && self.direction.approx_eq(direction)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane3D {
    pub id: EntityId,
    pub labels: Vec<Label>,
    pub position: Vector3,
    /// Not normalized; only the direction is meaningful.
    pub normal: Vector3,
    pub kind: PlaneKind,
    /// Clipped segment whose midpoint is `position`, for planes placed
    /// along one of their traces.
    pub anchor_segment: Option<[Vector3; 2]>,
}

impl Plane3D {
    pub fn same_position(&self, position: &Vector3, normal: &Vector3) -> bool {
        self.position.approx_eq(position) && self.normal.approx_eq(normal)
    }
}
