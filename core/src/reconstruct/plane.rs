use tracing::debug;

use super::{embed_line, embed_point, Construction, Subtype};
use crate::error::ClassificationError;
use crate::geometry::{clip_segment_to_box, cross, midpoint3, round_to, ApproxEq, Axis, Vector3};
use crate::model::{LineProjection2D, Plane3D, PlaneKind, INTERCEPT_DECIMALS};
use crate::naming::{Label, View};
use crate::registry::Repository;

type Result<T> = std::result::Result<T, ClassificationError>;

struct Draft {
    kind: PlaneKind,
    position: Vector3,
    normal: Vector3,
    anchor_segment: Option<[Vector3; 2]>,
}

/// Classifies a plane from its traces and places it in the scene.
pub struct PlaneBuilder<'a> {
    repo: &'a mut Repository,
    half_extents: Vector3,
}

impl<'a> PlaneBuilder<'a> {
    pub fn new(repo: &'a mut Repository, half_extents: Vector3) -> Self {
        Self { repo, half_extents }
    }

    /// Build the plane `base` from `hα` + `fα`, or, with `single_trace`,
    /// from the lone bracketed trace `(hα)` or `(fα)`.
    pub fn build(&mut self, base: &Label, single_trace: bool) -> Result<Construction<Plane3D>> {
        let mut h_label = base.in_view(View::Horizontal);
        let mut f_label = base.in_view(View::Frontal);
        if single_trace {
            h_label = h_label.into_bracketed();
            f_label = f_label.into_bracketed();
        }
        let h = self.repo.line_projection(&h_label).cloned();
        let f = self.repo.line_projection(&f_label).cloned();

        let draft = if single_trace {
            match (h, f) {
                (Some(h), None) => self.parallel_to_reference(&h, View::Horizontal)?,
                (None, Some(f)) => self.parallel_to_reference(&f, View::Frontal)?,
                (None, None) => return Ok(Construction::Incomplete),
                (Some(_), Some(_)) => return Err(ClassificationError::InvalidTraces { label: base.clone() }),
            }
        } else {
            let (Some(h), Some(f)) = (h, f) else {
                return Ok(Construction::Incomplete);
            };
            let same_depth = h.anchor.x.approx_eq(&f.anchor.x);
            let both_on_ground = h.anchor.y.approx_eq(&0.0) && f.anchor.y.approx_eq(&0.0);
            let kind = PlaneKind::from_traces(h.angle, f.angle, same_depth, both_on_ground)
                .ok_or_else(|| ClassificationError::InvalidTraces { label: base.clone() })?;
            if kind == PlaneKind::Passerby {
                debug!(label = %base, "passerby planes are not built");
                return Ok(Construction::Unsupported(Subtype::Plane(kind)));
            }
            self.from_traces(base, kind, &h, &f)?
        };

        debug!(label = %base, kind = %draft.kind, "plane classified");
        Ok(self
            .repo
            .submit_plane(base.clone(), draft.position, draft.normal, |id, label| Plane3D {
                id,
                labels: vec![label],
                position: draft.position,
                normal: draft.normal,
                kind: draft.kind,
                anchor_segment: draft.anchor_segment,
            })
            .into())
    }

    /// A plane given by one trace, parallel to the other reference plane.
    fn parallel_to_reference(&self, trace: &LineProjection2D, view: View) -> Result<Draft> {
        let embedded = embed_line(trace, view, &self.half_extents)?;
        let on_reference = embed_point(&trace.anchor, view);
        let (position, normal) = match view {
            View::Horizontal => (Vector3::new(on_reference.x, 0.0, 0.0), Vector3::x()),
            View::Frontal => (Vector3::new(0.0, on_reference.y, 0.0), Vector3::y()),
        };
        Ok(Draft {
            kind: PlaneKind::from_single_trace(view),
            position,
            normal,
            anchor_segment: Some(embedded.endpoints),
        })
    }

    fn from_traces(&self, base: &Label, kind: PlaneKind, h: &LineProjection2D, f: &LineProjection2D) -> Result<Draft> {
        let hp = embed_line(h, View::Horizontal, &self.half_extents)?;
        let fp = embed_line(f, View::Frontal, &self.half_extents)?;
        let (hpos, fpos) = (hp.position, fp.position);

        let (normal, segment) = match kind {
            PlaneKind::Profile => {
                let depth = embed_point(&h.anchor, View::Horizontal).z;
                return Ok(Draft {
                    kind,
                    position: Vector3::new(0.0, 0.0, depth),
                    normal: Vector3::z(),
                    anchor_segment: None,
                });
            }
            PlaneKind::Ramp => {
                let across = fpos - hpos;
                let normal = cross(&across, &Vector3::z());
                let segment = clip_segment_to_box(&hpos, &across, &self.half_extents, Axis::Z, hpos.z)?;
                (normal, segment)
            }
            PlaneKind::Top => {
                let point = Vector3::new(hpos.x, fpos.y, fpos.z);
                let along = Vector3::new(0.0, -f.angle.tan(), 1.0);
                let normal = cross(&along, &Vector3::x());
                let segment = clip_segment_to_box(&point, &along, &self.half_extents, Axis::X, point.x)?;
                (normal, segment)
            }
            PlaneKind::Vertical => {
                let point = Vector3::new(hpos.x, fpos.y, hpos.z);
                let along = Vector3::new(h.angle.tan(), 0.0, 1.0);
                let normal = cross(&along, &Vector3::y());
                let segment = clip_segment_to_box(&point, &along, &self.half_extents, Axis::Y, point.y)?;
                (normal, segment)
            }
            PlaneKind::Oblique => {
                let (tan_h, tan_f) = (h.angle.tan(), f.angle.tan());
                let normal = cross(&Vector3::new(tan_h, 0.0, 1.0), &Vector3::new(0.0, -tan_f, 1.0));
                // Frontal trace from where it meets the ground line
                let meet = Vector3::new(0.0, 0.0, round_to(fpos.z + fpos.y / tan_f, INTERCEPT_DECIMALS));
                let frontal = clip_segment_to_box(&meet, &fp.direction, &self.half_extents, Axis::X, 0.0)?;
                let center = midpoint3(&frontal[0], &frontal[1]);
                // A horizontal line of the plane through the frontal trace's centre
                let segment = clip_segment_to_box(&center, &hp.direction, &self.half_extents, Axis::Y, center.y)?;
                (normal, segment)
            }
            PlaneKind::Horizontal | PlaneKind::Frontal | PlaneKind::Passerby => {
                return Err(ClassificationError::InvalidTraces { label: base.clone() })
            }
        };

        Ok(Draft {
            kind,
            position: midpoint3(&segment[0], &segment[1]),
            normal,
            anchor_segment: Some(segment),
        })
    }
}
