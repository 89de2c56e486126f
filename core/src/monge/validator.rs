use tracing::trace;

use crate::error::ValidationError;
use crate::geometry::{ApproxEq, Vector2};
use crate::model::{segment_ground_intercept, LineProjection2D, PointProjection2D, Role};
use crate::naming::{Label, LabelBase, View};
use crate::registry::{Repository, Submission};

type Result<T> = std::result::Result<T, ValidationError>;

/// Checks a newly drawn projection against the complementary projection
/// already declared in the other view, then stores it.
///
/// Every check runs before anything is written: a rejected projection
/// leaves the repository untouched.
pub struct ProjectionValidator<'a> {
    repo: &'a mut Repository,
}

impl<'a> ProjectionValidator<'a> {
    pub fn new(repo: &'a mut Repository) -> Self {
        Self { repo }
    }

    /// Validate one view of the line named `base` (stored as `base1`/`base2`).
    pub fn validate_line(
        &mut self,
        base: &Label,
        p1: Vector2,
        p2: Vector2,
        view: View,
    ) -> Result<Submission<LineProjection2D>> {
        require_latin(base)?;
        let label = base.in_view(view);
        require_segment(&label, &p1, &p2)?;
        if self.repo.has_projection(&label) {
            return Err(ValidationError::AlreadyExists { label });
        }
        let end_on = label.clone().into_bracketed();
        if self.repo.point_projection(&end_on).is_some() {
            return Err(ValidationError::AlreadyExists { label: end_on });
        }

        let opposite = base.in_view(view.opposite());
        let opposite_end_on = opposite.clone().into_bracketed();
        let ground = self.repo.ground();
        let drawn = p2 - p1;

        if let Some(existing) = self.repo.line_projection(&opposite) {
            if existing.is_perpendicular(&ground.direction) {
                // the opposite view is a profile projection: this one must be too
                let x = existing.anchor.x;
                if !(p1.x.approx_eq(&x) && p2.x.approx_eq(&x)) {
                    return Err(ValidationError::NotAlignedWithProfile { label, opposite });
                }
            } else if ground.is_perpendicular(&drawn) {
                return Err(ValidationError::PerpendicularToGroundLine { label, opposite });
            }
        } else if let Some(point) = self.repo.point_projection(&opposite_end_on) {
            if !(ground.is_perpendicular(&drawn) && p2.x.approx_eq(&point.coords.x)) {
                return Err(ValidationError::EndOnMismatch {
                    label,
                    opposite: opposite_end_on,
                });
            }
        }

        trace!(%label, "line projection accepted");
        Ok(self.repo.submit_line_projection(label, &p1, &p2, view, Role::Line))
    }

    /// Validate one trace of the plane named `base` (stored as `hα`/`fα`).
    ///
    /// With `single_trace` the plane is parallel to a reference plane and is
    /// given by this trace alone; it is stored bracketed (`(hα)`), and the
    /// trace must run parallel to the ground line.
    pub fn validate_plane_trace(
        &mut self,
        base: &Label,
        p1: Vector2,
        p2: Vector2,
        view: View,
        single_trace: bool,
    ) -> Result<Submission<LineProjection2D>> {
        require_greek(base)?;
        let trace = base.in_view(view);
        let alternative = trace.clone().into_bracketed();
        require_segment(&trace, &p1, &p2)?;
        for existing in [&trace, &alternative] {
            if self.repo.line_projection(existing).is_some() {
                return Err(ValidationError::AlreadyExists { label: existing.clone() });
            }
        }

        let opposite = base.in_view(view.opposite());
        let opposite_alternative = opposite.clone().into_bracketed();

        if let Some(existing) = self.repo.line_projection(&opposite) {
            if single_trace {
                return Err(ValidationError::FamilyConflict {
                    label: alternative,
                    opposite,
                });
            }
            if existing.is_parallel_to_ground() {
                if !p1.y.approx_eq(&p2.y) {
                    return Err(ValidationError::TraceNotParallel { label: trace });
                }
            } else {
                match (segment_ground_intercept(&p1, &p2), existing.ground_intercept()) {
                    (Some(found), Some(expected)) if found.approx_eq(&expected) => {}
                    (Some(found), Some(expected)) => {
                        return Err(ValidationError::InterceptMismatch {
                            label: trace,
                            expected,
                            found,
                        })
                    }
                    _ => return Err(ValidationError::MissingIntercept { label: trace, opposite }),
                }
            }
        } else if self.repo.line_projection(&opposite_alternative).is_some() {
            return Err(ValidationError::FamilyConflict {
                label: trace,
                opposite: opposite_alternative,
            });
        } else if single_trace && !p1.y.approx_eq(&p2.y) {
            return Err(ValidationError::TraceNotParallel { label: alternative });
        }

        let label = if single_trace { alternative } else { trace };
        trace!(%label, "plane trace accepted");
        Ok(self.repo.submit_line_projection(label, &p1, &p2, view, Role::PlaneTrace))
    }

    /// Validate one view of the point named `base` (stored as `A1`/`A2`).
    pub fn create_point_projection(
        &mut self,
        base: &Label,
        coords: Vector2,
        view: View,
    ) -> Result<Submission<PointProjection2D>> {
        require_latin(base)?;
        let label = base.in_view(view);
        if self.repo.has_projection(&label) {
            return Err(ValidationError::AlreadyExists { label });
        }
        let opposite = base.in_view(view.opposite());
        if let Some(existing) = self.repo.point_projection(&opposite) {
            if !existing.coords.x.approx_eq(&coords.x) {
                return Err(ValidationError::AbscissaMismatch { label, opposite });
            }
        }
        trace!(%label, "point projection accepted");
        Ok(self.repo.submit_point_projection(label, coords, view))
    }

    /// Validate the projection of the line `base` seen end-on in `view`,
    /// stored bracketed (`(r1)`).
    pub fn create_line_point_projection(
        &mut self,
        base: &Label,
        coords: Vector2,
        view: View,
    ) -> Result<Submission<PointProjection2D>> {
        require_latin(base)?;
        let line_label = base.in_view(view);
        let label = line_label.clone().into_bracketed();
        if self.repo.point_projection(&label).is_some() {
            return Err(ValidationError::AlreadyExists { label });
        }
        if self.repo.line_projection(&line_label).is_some() {
            return Err(ValidationError::AlreadyExists { label: line_label });
        }

        let opposite = base.in_view(view.opposite());
        let opposite_end_on = opposite.clone().into_bracketed();
        if self.repo.point_projection(&opposite_end_on).is_some() {
            return Err(ValidationError::ConflictingPointProjection {
                label,
                opposite: opposite_end_on,
            });
        }
        if let Some(existing) = self.repo.line_projection(&opposite) {
            if !(existing.is_perpendicular_to_ground() && existing.contains_point(&coords)) {
                return Err(ValidationError::NotOnOppositeProjection { label, opposite });
            }
        }
        trace!(%label, "line point projection accepted");
        Ok(self.repo.submit_point_projection(label, coords, view))
    }
}

fn require_segment(label: &Label, p1: &Vector2, p2: &Vector2) -> Result<()> {
    if p1.approx_eq(p2) {
        return Err(ValidationError::DegenerateSegment { label: label.clone() });
    }
    Ok(())
}

fn require_base(base: &Label) -> Result<()> {
    if base.view.is_some() || base.bracketed {
        return Err(ValidationError::InvalidLabel {
            label: base.clone(),
            reason: "expected a bare name without view suffix or brackets",
        });
    }
    if base.is_ground() {
        return Err(ValidationError::InvalidLabel {
            label: base.clone(),
            reason: "x is reserved for the ground line",
        });
    }
    // Empty names, other characters, trailing view digits and Greek names
    // would not parse back to the same label
    if base.to_string().parse::<Label>().ok().as_ref() != Some(base) {
        return Err(ValidationError::InvalidLabel {
            label: base.clone(),
            reason: "name does not read back as the same label",
        });
    }
    Ok(())
}

fn require_latin(base: &Label) -> Result<()> {
    require_base(base)?;
    match base.base {
        LabelBase::Latin(_) => Ok(()),
        LabelBase::Greek(_) => Err(ValidationError::InvalidLabel {
            label: base.clone(),
            reason: "points and lines take Latin names",
        }),
    }
}

fn require_greek(base: &Label) -> Result<()> {
    require_base(base)?;
    match base.base {
        LabelBase::Greek(_) => Ok(()),
        LabelBase::Latin(_) => Err(ValidationError::InvalidLabel {
            label: base.clone(),
            reason: "planes take Greek names",
        }),
    }
}
