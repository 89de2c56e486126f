//! Canonical subtypes of 3D lines and planes.
//!
//! A subtype is never stored independently of its projections: both tables
//! below are pure functions of the projection angles.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{is_ground_parallel, is_ground_perpendicular};
use crate::naming::View;

fn is_general(angle: f64) -> bool {
    !is_ground_parallel(angle) && !is_ground_perpendicular(angle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Frontal,
    Horizontal,
    Profile,
    Vertical,
    Top,
    FrontalHorizontal,
    Oblique,
}

impl LineKind {
    /// Classify a line from the drawing angles of its horizontal and frontal
    /// projections. `None` is an invalid combination.
    pub fn from_angles(horizontal: f64, frontal: f64) -> Option<LineKind> {
        let h_parallel = is_ground_parallel(horizontal);
        let f_parallel = is_ground_parallel(frontal);
        if h_parallel && f_parallel {
            Some(LineKind::FrontalHorizontal)
        } else if h_parallel && is_general(frontal) {
            Some(LineKind::Frontal)
        } else if f_parallel && is_general(horizontal) {
            Some(LineKind::Horizontal)
        } else if is_ground_perpendicular(horizontal) && is_ground_perpendicular(frontal) {
            Some(LineKind::Profile)
        } else if is_general(horizontal) && is_general(frontal) {
            Some(LineKind::Oblique)
        } else {
            None
        }
    }

    /// Subtype of a line seen end-on in `view`.
    pub fn end_on(view: View) -> LineKind {
        match view {
            View::Horizontal => LineKind::Vertical,
            View::Frontal => LineKind::Top,
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineKind::Frontal => "frontal",
            LineKind::Horizontal => "horizontal",
            LineKind::Profile => "profile",
            LineKind::Vertical => "vertical",
            LineKind::Top => "top",
            LineKind::FrontalHorizontal => "frontal-horizontal",
            LineKind::Oblique => "oblique",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneKind {
    Horizontal,
    Frontal,
    Profile,
    Ramp,
    Top,
    Vertical,
    Oblique,
    Passerby,
}

impl PlaneKind {
    /// Subtype of a plane given by a single trace drawn in `view`.
    ///
    /// A lone horizontal trace belongs to a plane parallel to the frontal
    /// reference plane, and vice versa.
    pub fn from_single_trace(view: View) -> PlaneKind {
        match view {
            View::Horizontal => PlaneKind::Frontal,
            View::Frontal => PlaneKind::Horizontal,
        }
    }

    /// Classify a plane from the drawing angles of both traces.
    ///
    /// `same_depth` tells whether the traces share their abscissa, and
    /// `both_on_ground` whether both lie on the ground line; they only matter
    /// for profile and passerby planes respectively. `None` is an invalid
    /// combination.
    pub fn from_traces(horizontal: f64, frontal: f64, same_depth: bool, both_on_ground: bool) -> Option<PlaneKind> {
        let h_perpendicular = is_ground_perpendicular(horizontal);
        let f_perpendicular = is_ground_perpendicular(frontal);
        if h_perpendicular && f_perpendicular {
            same_depth.then_some(PlaneKind::Profile)
        } else if is_ground_parallel(horizontal) && is_ground_parallel(frontal) {
            if both_on_ground {
                Some(PlaneKind::Passerby)
            } else {
                Some(PlaneKind::Ramp)
            }
        } else if h_perpendicular && is_general(frontal) {
            Some(PlaneKind::Top)
        } else if f_perpendicular && is_general(horizontal) {
            Some(PlaneKind::Vertical)
        } else if is_general(horizontal) && is_general(frontal) {
            Some(PlaneKind::Oblique)
        } else {
            None
        }
    }
}

impl fmt::Display for PlaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaneKind::Horizontal => "horizontal",
            PlaneKind::Frontal => "frontal",
            PlaneKind::Profile => "profile",
            PlaneKind::Ramp => "ramp",
            PlaneKind::Top => "top",
            PlaneKind::Vertical => "vertical",
            PlaneKind::Oblique => "oblique",
            PlaneKind::Passerby => "passerby",
        };
        write!(f, "{}", name)
    }
}
