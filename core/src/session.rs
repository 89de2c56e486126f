//! Entry point for the interaction layer.
//!
//! A [`Session`] owns the repository and scene configuration and exposes every
//! validation, construction and removal operation. The `draw_*` operations run
//! the validator and then attempt the 3D build the new projection may complete.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::SceneConfig;
use crate::error::{ClassificationError, MongeError, ValidationError};
use crate::geometry::{Vector2, Vector3};
use crate::model::{Line3D, LineProjection2D, Plane3D, Point3D, PointProjection2D, ProjectionKind};
use crate::monge::ProjectionValidator;
use crate::naming::{Label, View};
use crate::reconstruct::{map_projections, Construction, LineBuilder, PlaneBuilder, PointBuilder};
use crate::registry::{Removal, Repository, Submission};

/// A drawn projection and whatever 3D entity it completed.
///
/// The projection stays stored even when the build afterwards fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawn<P, E> {
    pub projection: Submission<P>,
    pub entity: Construction<E>,
}

/// Serialisable view of the whole scene.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub config: &'a SceneConfig,
    pub ground: &'a LineProjection2D,
    pub point_projections: Vec<&'a PointProjection2D>,
    pub line_projections: Vec<&'a LineProjection2D>,
    pub points: Vec<&'a Point3D>,
    pub lines: Vec<&'a Line3D>,
    pub planes: Vec<&'a Plane3D>,
}

#[derive(Debug, Clone)]
pub struct Session {
    repo: Repository,
    config: SceneConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new("Session", SceneConfig::default())
    }
}

impl Session {
    pub fn new(seed: &str, config: SceneConfig) -> Self {
        info!(
            half_extents = ?config.half_extents,
            ground = config.ground_line_half_length,
            "scene initialised"
        );
        Self {
            repo: Repository::new(seed, config.ground_line_half_length),
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            config: &self.config,
            ground: self.repo.ground(),
            point_projections: self.repo.point_projections.iter().collect(),
            line_projections: self.repo.line_projections.iter().collect(),
            points: self.repo.points.iter().collect(),
            lines: self.repo.lines.iter().collect(),
            planes: self.repo.planes.iter().collect(),
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    pub fn validate_line(
        &mut self,
        base: &Label,
        p1: Vector2,
        p2: Vector2,
        view: View,
    ) -> Result<Submission<LineProjection2D>, ValidationError> {
        ProjectionValidator::new(&mut self.repo).validate_line(base, p1, p2, view)
    }

    /// `single_trace` marks a horizontal or frontal plane, given by one
    /// bracketed trace.
    pub fn validate_plane_trace(
        &mut self,
        base: &Label,
        p1: Vector2,
        p2: Vector2,
        view: View,
        single_trace: bool,
    ) -> Result<Submission<LineProjection2D>, ValidationError> {
        ProjectionValidator::new(&mut self.repo).validate_plane_trace(base, p1, p2, view, single_trace)
    }

    pub fn create_point_projection(
        &mut self,
        base: &Label,
        coords: Vector2,
        view: View,
    ) -> Result<Submission<PointProjection2D>, ValidationError> {
        ProjectionValidator::new(&mut self.repo).create_point_projection(base, coords, view)
    }

    /// Projection of the line `base` seen end-on in `view`.
    pub fn create_line_point_projection(
        &mut self,
        base: &Label,
        coords: Vector2,
        view: View,
    ) -> Result<Submission<PointProjection2D>, ValidationError> {
        ProjectionValidator::new(&mut self.repo).create_line_point_projection(base, coords, view)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    pub fn build_point(&mut self, base: &Label) -> Construction<Point3D> {
        PointBuilder::new(&mut self.repo).build(base)
    }

    pub fn build_line(&mut self, base: &Label) -> Result<Construction<Line3D>, ClassificationError> {
        let half_extents = self.config.half_extents();
        LineBuilder::new(&mut self.repo, half_extents).build(base)
    }

    pub fn build_plane(&mut self, base: &Label, single_trace: bool) -> Result<Construction<Plane3D>, ClassificationError> {
        let half_extents = self.config.half_extents();
        PlaneBuilder::new(&mut self.repo, half_extents).build(base, single_trace)
    }

    /// 3D position of the point `base`, without storing anything.
    pub fn map_projections(&self, base: &Label) -> Option<Vector3> {
        map_projections(&self.repo, base)
    }

    // =========================================================================
    // Validate, then build
    // =========================================================================

    pub fn draw_point(
        &mut self,
        base: &Label,
        coords: Vector2,
        view: View,
    ) -> Result<Drawn<PointProjection2D, Point3D>, MongeError> {
        let projection = self.create_point_projection(base, coords, view)?;
        let entity = self.build_point(base);
        Ok(Drawn { projection, entity })
    }

    pub fn draw_line(
        &mut self,
        base: &Label,
        p1: Vector2,
        p2: Vector2,
        view: View,
    ) -> Result<Drawn<LineProjection2D, Line3D>, MongeError> {
        let projection = self.validate_line(base, p1, p2, view)?;
        let entity = self.build_line(base)?;
        Ok(Drawn { projection, entity })
    }

    pub fn draw_line_point(
        &mut self,
        base: &Label,
        coords: Vector2,
        view: View,
    ) -> Result<Drawn<PointProjection2D, Line3D>, MongeError> {
        let projection = self.create_line_point_projection(base, coords, view)?;
        let entity = self.build_line(base)?;
        Ok(Drawn { projection, entity })
    }

    pub fn draw_plane_trace(
        &mut self,
        base: &Label,
        p1: Vector2,
        p2: Vector2,
        view: View,
        single_trace: bool,
    ) -> Result<Drawn<LineProjection2D, Plane3D>, MongeError> {
        let projection = self.validate_plane_trace(base, p1, p2, view, single_trace)?;
        let entity = self.build_plane(base, single_trace)?;
        Ok(Drawn { projection, entity })
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removes a point or line projection by its full label (`A1`, `(r2)`,
    /// `hα`). The 3D entities built from it are left in place.
    pub fn remove_projection(&mut self, label: &Label) -> Removal<ProjectionKind<PointProjection2D, LineProjection2D>> {
        debug!(%label, "removing projection");
        self.repo.remove_projection(label)
    }

    pub fn remove_point_projection(&mut self, label: &Label) -> Removal<PointProjection2D> {
        self.repo.remove_point_projection(label)
    }

    pub fn remove_line_projection(&mut self, label: &Label) -> Removal<LineProjection2D> {
        self.repo.remove_line_projection(label)
    }

    pub fn remove_point(&mut self, label: &Label) -> Removal<Point3D> {
        self.repo.remove_point(label)
    }

    pub fn remove_line(&mut self, label: &Label) -> Removal<Line3D> {
        self.repo.remove_line(label)
    }

    pub fn remove_plane(&mut self, label: &Label) -> Removal<Plane3D> {
        self.repo.remove_plane(label)
    }
}
