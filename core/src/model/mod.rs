//! Domain records: 2D Monge projections, 3D entities and their subtypes.

use serde::{Deserialize, Serialize};

use crate::naming::{EntityId, Label};

pub mod projection;
pub use projection::*;

pub mod kind;
pub use kind::*;

pub mod entity;
pub use entity::*;

/// A stored record reachable under one or more labels.
///
/// Labels keep insertion order; the first one is the display name.
pub trait Labeled {
    fn id(&self) -> EntityId;
    fn labels(&self) -> &[Label];
    fn labels_mut(&mut self) -> &mut Vec<Label>;

    fn has_label(&self, label: &Label) -> bool {
        self.labels().contains(label)
    }

    /// Returns false if the label was already present.
    fn add_label(&mut self, label: Label) -> bool {
        if self.has_label(&label) {
            return false;
        }
        self.labels_mut().push(label);
        true
    }

    fn remove_label(&mut self, label: &Label) -> bool {
        let labels = self.labels_mut();
        match labels.iter().position(|l| l == label) {
            Some(index) => {
                labels.remove(index);
                true
            }
            None => false,
        }
    }
}

macro_rules! impl_labeled {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Labeled for $ty {
                fn id(&self) -> EntityId {
                    self.id
                }
                fn labels(&self) -> &[Label] {
                    &self.labels
                }
                fn labels_mut(&mut self) -> &mut Vec<Label> {
                    &mut self.labels
                }
            }
        )*
    };
}

impl_labeled!(PointProjection2D, LineProjection2D, Point3D, Line3D, Plane3D);

/// What a drawn 2D line stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Line,
    PlaneTrace,
}

/// A projection that is either a point or a line.
///
/// Used both for lookups by label in the Monge drawing and for the embedded
/// projections of a 3D line, where vertical and top lines project to points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionKind<P, L> {
    Point(P),
    Line(L),
}

impl<P, L> ProjectionKind<P, L> {
    pub fn as_point(&self) -> Option<&P> {
        match self {
            ProjectionKind::Point(p) => Some(p),
            ProjectionKind::Line(_) => None,
        }
    }

    pub fn as_line(&self) -> Option<&L> {
        match self {
            ProjectionKind::Line(l) => Some(l),
            ProjectionKind::Point(_) => None,
        }
    }
}
