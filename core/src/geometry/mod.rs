use nalgebra as na;

pub type Vector2 = na::Vector2<f64>;
pub type Vector3 = na::Vector3<f64>;

pub const EPSILON: f64 = 1e-6;

pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() < EPSILON
    }
}

impl ApproxEq for Vector2 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).norm_squared() < EPSILON * EPSILON
    }
}

impl ApproxEq for Vector3 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).norm_squared() < EPSILON * EPSILON
    }
}

pub mod utils_2d;
pub use utils_2d::*;

pub mod utils_3d;
pub use utils_3d::*;

/// Round to a fixed number of decimal places.
///
/// Boundary crossings are compared after rounding to two places and ground
/// intercepts after rounding to one; both roundings decide which candidate
/// points count as coincident.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
