//! 3D reconstruction from pairs of Monge projections.
//!
//! Axis convention: the horizontal view drops `y` and the frontal view drops
//! `x`. A horizontal projection `(x, y)` sits at `(-y, 0, -x)` in the scene,
//! a frontal one at `(0, y, -x)`, so a point with projections `h` and `f`
//! is `(-h.y, f.y, -h.x)`.

use serde::{Deserialize, Serialize};

use crate::geometry::{clip_segment_to_box, midpoint3, Axis, ClipError, Vector2, Vector3};
use crate::model::{Line3DProjection, LineKind, LineProjection2D, PlaneKind};
use crate::naming::{EntityId, View};
use crate::registry::Submission;

pub mod point;
pub use point::{map_projections, PointBuilder};

pub mod line;
pub use line::LineBuilder;

pub mod plane;
pub use plane::PlaneBuilder;

#[cfg(test)]
mod tests_line;

/// A subtype recognised but deliberately not built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity", content = "kind", rename_all = "snake_case")]
pub enum Subtype {
    Line(LineKind),
    Plane(PlaneKind),
}

/// Outcome of a 3D build attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "record", rename_all = "snake_case")]
pub enum Construction<T> {
    Created(T),
    /// Same position as an existing entity; the label was added to it.
    Merged { into: EntityId },
    /// Not every projection the entity needs exists yet.
    Incomplete,
    /// Known subtype without a 3D rendition (profile lines, passerby planes).
    Unsupported(Subtype),
}

impl<T> Construction<T> {
    pub fn created(&self) -> Option<&T> {
        match self {
            Construction::Created(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn into_created(self) -> Option<T> {
        match self {
            Construction::Created(entity) => Some(entity),
            _ => None,
        }
    }
}

impl<T> From<Submission<T>> for Construction<T> {
    fn from(submission: Submission<T>) -> Self {
        match submission {
            Submission::Created(entity) => Construction::Created(entity),
            Submission::Merged { into } => Construction::Merged { into },
        }
    }
}

/// Reference plane a view's projections are embedded in.
pub fn view_plane(view: View) -> Axis {
    match view {
        View::Horizontal => Axis::Y,
        View::Frontal => Axis::X,
    }
}

/// Scene position of a 2D projection drawn in `view`.
pub fn embed_point(coords: &Vector2, view: View) -> Vector3 {
    match view {
        View::Horizontal => Vector3::new(-coords.y, 0.0, -coords.x),
        View::Frontal => Vector3::new(0.0, coords.y, -coords.x),
    }
}

/// Monge projection of a scene position onto `view`; inverse of
/// [`embed_point`] on the reference plane.
pub fn project_point(position: &Vector3, view: View) -> Vector2 {
    match view {
        View::Horizontal => Vector2::new(-position.z, -position.x),
        View::Frontal => Vector2::new(-position.z, position.y),
    }
}

/// Unit scene direction of a projection with drawing angle `angle`.
///
/// Oriented so that its angle to `+z` equals `angle`: `(sin, 0, cos)` in
/// the horizontal view and `(0, -sin, cos)` in the frontal one.
pub fn embed_direction(angle: f64, view: View) -> Vector3 {
    let d = crate::geometry::direction_from_angle(angle);
    match view {
        View::Horizontal => Vector3::new(d.y, 0.0, d.x),
        View::Frontal => Vector3::new(0.0, -d.y, d.x),
    }
}

/// Embed a 2D line projection and clip it to the scene bounds.
pub fn embed_line(
    projection: &LineProjection2D,
    view: View,
    half_extents: &Vector3,
) -> Result<Line3DProjection, ClipError> {
    let anchor = embed_point(&projection.anchor, view);
    let direction = embed_direction(projection.angle, view);
    let endpoints = clip_segment_to_box(&anchor, &direction, half_extents, view_plane(view), 0.0)?;
    Ok(Line3DProjection {
        view,
        position: midpoint3(&endpoints[0], &endpoints[1]),
        endpoints,
        angle: projection.angle,
        direction,
    })
}
