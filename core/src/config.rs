use serde::{Deserialize, Serialize};

use crate::geometry::Vector3;

/// Scene dimensions shared by every builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Half-extents of the bounding cube on x, y and z.
    pub half_extents: [f64; 3],
    /// Half length of the ground line `x` in the Monge drawing.
    pub ground_line_half_length: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            half_extents: [10.0, 10.0, 10.0],
            ground_line_half_length: 10.0,
        }
    }
}

impl SceneConfig {
    pub fn cube(half_extent: f64) -> Self {
        Self {
            half_extents: [half_extent; 3],
            ground_line_half_length: half_extent,
        }
    }

    pub fn half_extents(&self) -> Vector3 {
        Vector3::from(self.half_extents)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
