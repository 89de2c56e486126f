use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub mod generator;
pub use generator::IdGenerator;

pub mod label;
pub use label::{GreekLetter, Label, LabelBase, LabelError};

#[cfg(test)]
mod tests_label;

/// Identifier of a stored record (projection, point, line or plane).
///
/// Records are identified by geometry, not by label; the id only lets a
/// caller refer back to the record a merge landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two Monge reference planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Horizontal,
    Frontal,
}

impl View {
    pub fn opposite(self) -> View {
        match self {
            View::Horizontal => View::Frontal,
            View::Frontal => View::Horizontal,
        }
    }

    /// Suffix used on point and line labels (`A1`, `r2`).
    pub fn suffix(self) -> char {
        match self {
            View::Horizontal => '1',
            View::Frontal => '2',
        }
    }

    /// Prefix used on plane trace labels (`hα`, `fα`).
    pub fn trace_prefix(self) -> char {
        match self {
            View::Horizontal => 'h',
            View::Frontal => 'f',
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Horizontal => write!(f, "horizontal"),
            View::Frontal => write!(f, "frontal"),
        }
    }
}
