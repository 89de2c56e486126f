use serde::Serialize;
use tracing::debug;

use super::{Removal, Store, Submission};
use crate::geometry::{midpoint, segment_angle, Vector2, Vector3};
use crate::model::{Labeled, Line3D, LineProjection2D, Plane3D, Point3D, PointProjection2D, ProjectionKind, Role};
use crate::naming::{EntityId, IdGenerator, Label, View};

/// A projection found by label in the Monge drawing.
pub type ProjectionRef<'a> = ProjectionKind<&'a PointProjection2D, &'a LineProjection2D>;

/// Every projection and 3D entity of a session, plus the ground line.
///
/// The ground line `x` is created with the repository and cannot be removed.
#[derive(Debug, Clone, Serialize)]
pub struct Repository {
    #[serde(skip)]
    ids: IdGenerator,
    ground: LineProjection2D,
    pub point_projections: Store<PointProjection2D>,
    pub line_projections: Store<LineProjection2D>,
    pub points: Store<Point3D>,
    pub lines: Store<Line3D>,
    pub planes: Store<Plane3D>,
}

impl Repository {
    pub fn new(seed: &str, ground_half_length: f64) -> Self {
        let mut ids = IdGenerator::new(seed);
        let ground = LineProjection2D::ground(ids.next_id(), ground_half_length);
        Self {
            ids,
            ground,
            point_projections: Store::new(),
            line_projections: Store::new(),
            points: Store::new(),
            lines: Store::new(),
            planes: Store::new(),
        }
    }

    pub fn next_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    pub fn ground(&self) -> &LineProjection2D {
        &self.ground
    }

    // =========================================================================
    // Label lookups
    // =========================================================================

    pub fn point_projection(&self, label: &Label) -> Option<&PointProjection2D> {
        self.point_projections.by_label(label)
    }

    /// Resolves `x` to the ground line.
    pub fn line_projection(&self, label: &Label) -> Option<&LineProjection2D> {
        if label.is_ground() {
            return Some(&self.ground);
        }
        self.line_projections.by_label(label)
    }

    /// Either kind of projection stored under `label`.
    pub fn projection(&self, label: &Label) -> Option<ProjectionRef<'_>> {
        self.line_projection(label)
            .map(ProjectionKind::Line)
            .or_else(|| self.point_projection(label).map(ProjectionKind::Point))
    }

    /// Whether `label` names any projection, point or line.
    pub fn has_projection(&self, label: &Label) -> bool {
        self.projection(label).is_some()
    }

    pub fn point(&self, label: &Label) -> Option<&Point3D> {
        self.points.by_label(label)
    }

    pub fn line(&self, label: &Label) -> Option<&Line3D> {
        self.lines.by_label(label)
    }

    pub fn plane(&self, label: &Label) -> Option<&Plane3D> {
        self.planes.by_label(label)
    }

    // =========================================================================
    // Positional lookups
    // =========================================================================

    pub fn point_projection_at(&self, coords: &Vector2, view: View) -> Option<&PointProjection2D> {
        self.point_projections.find(|p| p.same_position(coords, view))
    }

    pub fn line_projection_at(&self, anchor: &Vector2, angle: f64, view: View) -> Option<&LineProjection2D> {
        self.line_projections.find(|l| l.same_position(anchor, angle, Some(view)))
    }

    pub fn point_at(&self, position: &Vector3) -> Option<&Point3D> {
        self.points.find(|p| p.same_position(position))
    }

    pub fn line_at(&self, position: &Vector3, direction: &Vector3) -> Option<&Line3D> {
        self.lines.find(|l| l.same_position(position, direction))
    }

    pub fn plane_at(&self, position: &Vector3, normal: &Vector3) -> Option<&Plane3D> {
        self.planes.find(|p| p.same_position(position, normal))
    }

    // =========================================================================
    // Submission
    // =========================================================================

    pub fn submit_point_projection(&mut self, label: Label, coords: Vector2, view: View) -> Submission<PointProjection2D> {
        let submission = submit(
            &mut self.ids,
            &mut self.point_projections,
            label.clone(),
            |p| p.same_position(&coords, view),
            |id, label| PointProjection2D::new(id, label, coords, view),
        );
        log_submission("point projection", &label, &submission);
        submission
    }

    /// Stores the segment `p1`-`p2`, which the caller has checked is not
    /// degenerate.
    pub fn submit_line_projection(
        &mut self,
        label: Label,
        p1: &Vector2,
        p2: &Vector2,
        view: View,
        role: Role,
    ) -> Submission<LineProjection2D> {
        let (anchor, angle) = (midpoint(p1, p2), segment_angle(p1, p2));
        let submission = submit(
            &mut self.ids,
            &mut self.line_projections,
            label.clone(),
            |existing| existing.same_position(&anchor, angle, Some(view)),
            |id, label| LineProjection2D::from_segment(id, label, p1, p2, view, role),
        );
        log_submission("line projection", &label, &submission);
        submission
    }

    pub fn submit_point(
        &mut self,
        label: Label,
        position: Vector3,
        make: impl FnOnce(EntityId, Label) -> Point3D,
    ) -> Submission<Point3D> {
        let submission = submit(&mut self.ids, &mut self.points, label.clone(), |p| p.same_position(&position), make);
        log_submission("point", &label, &submission);
        submission
    }

    pub fn submit_line(
        &mut self,
        label: Label,
        position: Vector3,
        direction: Vector3,
        make: impl FnOnce(EntityId, Label) -> Line3D,
    ) -> Submission<Line3D> {
        let submission = submit(
            &mut self.ids,
            &mut self.lines,
            label.clone(),
            |l| l.same_position(&position, &direction),
            make,
        );
        log_submission("line", &label, &submission);
        submission
    }

    pub fn submit_plane(
        &mut self,
        label: Label,
        position: Vector3,
        normal: Vector3,
        make: impl FnOnce(EntityId, Label) -> Plane3D,
    ) -> Submission<Plane3D> {
        let submission = submit(
            &mut self.ids,
            &mut self.planes,
            label.clone(),
            |p| p.same_position(&position, &normal),
            make,
        );
        log_submission("plane", &label, &submission);
        submission
    }

    // =========================================================================
    // Removal
    // =========================================================================

    pub fn remove_point_projection(&mut self, label: &Label) -> Removal<PointProjection2D> {
        let removal = self.point_projections.remove_label(label);
        log_removal("point projection", label, &removal);
        removal
    }

    /// The ground line is never removed.
    pub fn remove_line_projection(&mut self, label: &Label) -> Removal<LineProjection2D> {
        if label.is_ground() {
            return Removal::NotFound;
        }
        let removal = self.line_projections.remove_label(label);
        log_removal("line projection", label, &removal);
        removal
    }

    /// Removes whichever kind of projection carries `label`.
    pub fn remove_projection(&mut self, label: &Label) -> Removal<ProjectionKind<PointProjection2D, LineProjection2D>> {
        match self.remove_line_projection(label) {
            Removal::Deleted(line) => Removal::Deleted(ProjectionKind::Line(line)),
            Removal::Detached => Removal::Detached,
            Removal::NotFound => match self.remove_point_projection(label) {
                Removal::Deleted(point) => Removal::Deleted(ProjectionKind::Point(point)),
                Removal::Detached => Removal::Detached,
                Removal::NotFound => Removal::NotFound,
            },
        }
    }

    pub fn remove_point(&mut self, label: &Label) -> Removal<Point3D> {
        let removal = self.points.remove_label(label);
        log_removal("point", label, &removal);
        removal
    }

    pub fn remove_line(&mut self, label: &Label) -> Removal<Line3D> {
        let removal = self.lines.remove_label(label);
        log_removal("line", label, &removal);
        removal
    }

    pub fn remove_plane(&mut self, label: &Label) -> Removal<Plane3D> {
        let removal = self.planes.remove_label(label);
        log_removal("plane", label, &removal);
        removal
    }
}

fn submit<T: Labeled + Clone>(
    ids: &mut IdGenerator,
    store: &mut Store<T>,
    label: Label,
    same_position: impl Fn(&T) -> bool,
    make: impl FnOnce(EntityId, Label) -> T,
) -> Submission<T> {
    store.merge_or_insert(label, same_position, |label| make(ids.next_id(), label))
}

fn log_submission<T>(what: &str, label: &Label, submission: &Submission<T>) {
    match submission {
        Submission::Created(_) => debug!(%label, "created {}", what),
        Submission::Merged { into } => debug!(%label, %into, "merged label into existing {}", what),
    }
}

fn log_removal<T>(what: &str, label: &Label, removal: &Removal<T>) {
    match removal {
        Removal::Deleted(_) => debug!(%label, "deleted {}", what),
        Removal::Detached => debug!(%label, "detached label from {}", what),
        Removal::NotFound => {}
    }
}
