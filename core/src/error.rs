use thiserror::Error;

use crate::geometry::ClipError;
use crate::naming::Label;

/// A drawn projection contradicts the projections already declared.
///
/// Raised before anything is stored; the repository is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("projection {label} already exists")]
    AlreadyExists { label: Label },

    #[error("the two points of {label} coincide")]
    DegenerateSegment { label: Label },

    #[error("{label} must keep the abscissa of {opposite}, which is perpendicular to the ground line")]
    NotAlignedWithProfile { label: Label, opposite: Label },

    #[error("{label} cannot be perpendicular to the ground line while {opposite} is not")]
    PerpendicularToGroundLine { label: Label, opposite: Label },

    #[error("{label} must be perpendicular to the ground line and end on {opposite}")]
    EndOnMismatch { label: Label, opposite: Label },

    #[error("projections {label} and {opposite} do not share the same abscissa")]
    AbscissaMismatch { label: Label, opposite: Label },

    #[error("{label} does not lie on {opposite}, or {opposite} is not perpendicular to the ground line")]
    NotOnOppositeProjection { label: Label, opposite: Label },

    #[error("{label} conflicts with the existing point projection {opposite}")]
    ConflictingPointProjection { label: Label, opposite: Label },

    #[error("trace {label} must be parallel to the ground line")]
    TraceNotParallel { label: Label },

    #[error("trace {label} meets the ground line at {found}, expected {expected}")]
    InterceptMismatch { label: Label, expected: f64, found: f64 },

    #[error("trace {label} and {opposite} cannot meet on the ground line")]
    MissingIntercept { label: Label, opposite: Label },

    #[error("trace {label} conflicts with the single-trace plane {opposite}")]
    FamilyConflict { label: Label, opposite: Label },

    #[error("invalid label {label}: {reason}")]
    InvalidLabel { label: Label, reason: &'static str },
}

/// The projections of an entity do not describe a known subtype.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassificationError {
    #[error("line {label} has no valid projection pair (horizontal angle {horizontal:.4}, frontal angle {frontal:.4})")]
    InvalidCombination { label: Label, horizontal: f64, frontal: f64 },

    #[error("projections of {label} do not share the same depth")]
    DepthMismatch { label: Label },

    #[error("traces of plane {label} are invalid")]
    InvalidTraces { label: Label },

    #[error(transparent)]
    Clip(#[from] ClipError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MongeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

impl MongeError {
    /// Stable machine-readable code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            MongeError::Validation(_) => "VALIDATION_ERROR",
            MongeError::Classification(_) => "CLASSIFICATION_ERROR",
        }
    }
}
