use tracing::debug;

use super::{embed_point, Construction};
use crate::geometry::Vector3;
use crate::model::{Point3D, Point3DProjection};
use crate::naming::{Label, View};
use crate::registry::Repository;

/// 3D position of the point `base` from its `base1`/`base2` projections.
pub fn map_projections(repo: &Repository, base: &Label) -> Option<Vector3> {
    let h = repo.point_projection(&base.in_view(View::Horizontal))?;
    let f = repo.point_projection(&base.in_view(View::Frontal))?;
    Some(Vector3::new(-h.coords.y, f.coords.y, -h.coords.x))
}

pub struct PointBuilder<'a> {
    repo: &'a mut Repository,
}

impl<'a> PointBuilder<'a> {
    pub fn new(repo: &'a mut Repository) -> Self {
        Self { repo }
    }

    pub fn build(&mut self, base: &Label) -> Construction<Point3D> {
        let (Some(h), Some(f)) = (
            self.repo.point_projection(&base.in_view(View::Horizontal)),
            self.repo.point_projection(&base.in_view(View::Frontal)),
        ) else {
            return Construction::Incomplete;
        };
        let position = Vector3::new(-h.coords.y, f.coords.y, -h.coords.x);
        let horizontal = Point3DProjection {
            view: View::Horizontal,
            position: embed_point(&h.coords, View::Horizontal),
        };
        let frontal = Point3DProjection {
            view: View::Frontal,
            position: embed_point(&f.coords, View::Frontal),
        };
        debug!(label = %base, x = position.x, y = position.y, z = position.z, "point mapped");
        self.repo
            .submit_point(base.clone(), position, |id, label| Point3D {
                id,
                labels: vec![label],
                position,
                horizontal,
                frontal,
            })
            .into()
    }
}
