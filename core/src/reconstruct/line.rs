use tracing::debug;

use super::{embed_line, embed_point, Construction, Subtype};
use crate::error::ClassificationError;
use crate::geometry::{clip_line_to_box, clip_segment_to_box, distance3, midpoint3, ApproxEq, Axis, Vector3};
use crate::model::{
    EmbeddedProjection, Line3D, LineKind, LineProjection2D, Point3DProjection, PointProjection2D,
    ProjectionKind,
};
use crate::naming::{Label, View};
use crate::registry::Repository;

type Result<T> = std::result::Result<T, ClassificationError>;

/// Visible segment of a line with its embedded projections, before it is
/// stored.
struct Draft {
    kind: LineKind,
    direction: Vector3,
    endpoints: [Vector3; 2],
    horizontal: EmbeddedProjection,
    frontal: EmbeddedProjection,
}

/// Classifies a line from its projections and builds its visible segment.
pub struct LineBuilder<'a> {
    repo: &'a mut Repository,
    half_extents: Vector3,
}

impl<'a> LineBuilder<'a> {
    pub fn new(repo: &'a mut Repository, half_extents: Vector3) -> Self {
        Self { repo, half_extents }
    }

    /// Build the line `base` from whichever projection pair exists:
    /// `base1` + `base2`, `(base1)` + `base2` (vertical) or
    /// `base1` + `(base2)` (top).
    pub fn build(&mut self, base: &Label) -> Result<Construction<Line3D>> {
        let h_label = base.in_view(View::Horizontal);
        let f_label = base.in_view(View::Frontal);
        let h_line = self.repo.line_projection(&h_label).cloned();
        let f_line = self.repo.line_projection(&f_label).cloned();
        let h_point = self.repo.point_projection(&h_label.into_bracketed()).cloned();
        let f_point = self.repo.point_projection(&f_label.into_bracketed()).cloned();

        let draft = match (h_line, f_line, h_point, f_point) {
            (Some(h), Some(f), _, _) => {
                let kind = LineKind::from_angles(h.angle, f.angle).ok_or_else(|| invalid_pair(base, &h, &f))?;
                if kind == LineKind::Profile {
                    debug!(label = %base, "profile lines are not built");
                    return Ok(Construction::Unsupported(Subtype::Line(kind)));
                }
                self.from_pair(base, kind, &h, &f)?
            }
            (None, Some(f), Some(h), _) => self.vertical(base, &h, &f)?,
            (Some(h), None, _, Some(f)) => self.top(base, &h, &f)?,
            _ => return Ok(Construction::Incomplete),
        };

        let [p1, p2] = draft.endpoints;
        let position = midpoint3(&p1, &p2);
        let length = distance3(&p1, &p2);
        debug!(label = %base, kind = %draft.kind, length, "line classified");
        Ok(self
            .repo
            .submit_line(base.clone(), position, draft.direction, |id, label| Line3D {
                id,
                labels: vec![label],
                position,
                direction: draft.direction,
                endpoints: draft.endpoints,
                length,
                kind: draft.kind,
                horizontal: draft.horizontal,
                frontal: draft.frontal,
            })
            .into())
    }

    fn from_pair(&self, base: &Label, kind: LineKind, h: &LineProjection2D, f: &LineProjection2D) -> Result<Draft> {
        let hp = embed_line(h, View::Horizontal, &self.half_extents)?;
        let fp = embed_line(f, View::Frontal, &self.half_extents)?;
        let (hpos, fpos) = (hp.position, fp.position);

        let (direction, endpoints) = match kind {
            LineKind::FrontalHorizontal => {
                let half = self.half_extents.z;
                let endpoints = [
                    Vector3::new(hpos.x, fpos.y, -half),
                    Vector3::new(hpos.x, fpos.y, half),
                ];
                (Vector3::z(), endpoints)
            }
            LineKind::Frontal => {
                let point = Vector3::new(hpos.x, fpos.y, fpos.z);
                let direction = Vector3::new(0.0, -f.angle.tan(), 1.0).normalize();
                let endpoints = clip_segment_to_box(&point, &direction, &self.half_extents, Axis::X, point.x)?;
                (direction, endpoints)
            }
            LineKind::Horizontal => {
                let point = Vector3::new(hpos.x, fpos.y, hpos.z);
                let direction = Vector3::new(h.angle.tan(), 0.0, 1.0).normalize();
                let endpoints = clip_segment_to_box(&point, &direction, &self.half_extents, Axis::Y, point.y)?;
                (direction, endpoints)
            }
            LineKind::Oblique => {
                let (tan_h, tan_f) = (h.angle.tan(), f.angle.tan());
                // Where the line pierces the horizontal reference plane
                let z = fpos.z + fpos.y / tan_f;
                let x = hpos.x + (z - hpos.z) * tan_h;
                let pierce = Vector3::new(x, 0.0, z);
                let direction = Vector3::new(tan_h, -tan_f, 1.0).normalize();
                let endpoints = clip_line_to_box(&pierce, &direction, &self.half_extents)?;
                (direction, endpoints)
            }
            LineKind::Profile | LineKind::Vertical | LineKind::Top => return Err(invalid_pair(base, h, f)),
        };

        Ok(Draft {
            kind,
            direction,
            endpoints,
            horizontal: ProjectionKind::Line(hp),
            frontal: ProjectionKind::Line(fp),
        })
    }

    /// Seen end-on from above: a point in the horizontal view.
    fn vertical(&self, base: &Label, h: &PointProjection2D, f: &LineProjection2D) -> Result<Draft> {
        require_same_depth(base, h, f)?;
        let fp = embed_line(f, View::Frontal, &self.half_extents)?;
        let foot = embed_point(&h.coords, View::Horizontal);
        let direction = -Vector3::y();
        // Fails when the foot lies outside the scene
        let endpoints = clip_line_to_box(&foot, &direction, &self.half_extents)?;
        Ok(Draft {
            kind: LineKind::Vertical,
            direction,
            endpoints,
            horizontal: ProjectionKind::Point(Point3DProjection {
                view: View::Horizontal,
                position: foot,
            }),
            frontal: ProjectionKind::Line(fp),
        })
    }

    /// Seen end-on from the front: a point in the frontal view.
    fn top(&self, base: &Label, h: &LineProjection2D, f: &PointProjection2D) -> Result<Draft> {
        require_same_depth(base, f, h)?;
        let hp = embed_line(h, View::Horizontal, &self.half_extents)?;
        let foot = embed_point(&f.coords, View::Frontal);
        let direction = -Vector3::x();
        let endpoints = clip_line_to_box(&foot, &direction, &self.half_extents)?;
        Ok(Draft {
            kind: LineKind::Top,
            direction,
            endpoints,
            horizontal: ProjectionKind::Line(hp),
            frontal: ProjectionKind::Point(Point3DProjection {
                view: View::Frontal,
                position: foot,
            }),
        })
    }
}

fn invalid_pair(base: &Label, h: &LineProjection2D, f: &LineProjection2D) -> ClassificationError {
    ClassificationError::InvalidCombination {
        label: base.clone(),
        horizontal: h.angle,
        frontal: f.angle,
    }
}

/// The end-on point and the opposite line must sit at the same depth, i.e.
/// share their abscissa with the line perpendicular to the ground line.
fn require_same_depth(base: &Label, point: &PointProjection2D, line: &LineProjection2D) -> Result<()> {
    if line.is_perpendicular_to_ground() && line.anchor.x.approx_eq(&point.coords.x) {
        Ok(())
    } else {
        Err(ClassificationError::DepthMismatch { label: base.clone() })
    }
}
