use serde::{Deserialize, Serialize};

pub const CM_PER_M: f64 = 100.0;

/// Theater position in centimetres. `z_cm` is altitude and never takes part in
/// link range checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GeoPos {
    pub x_cm: f64,
    pub y_cm: f64,
    #[serde(default)]
    pub z_cm: f64,
}

impl GeoPos {
    pub fn new(x_cm: f64, y_cm: f64, z_cm: f64) -> Self {
        Self { x_cm, y_cm, z_cm }
    }

    pub fn from_meters(x_m: f64, y_m: f64) -> Self {
        Self::new(x_m * CM_PER_M, y_m * CM_PER_M, 0.0)
    }

    pub fn planar_distance_m(&self, other: GeoPos) -> f64 {
        planar_distance_m(*self, other)
    }
}

pub fn planar_distance_m(a: GeoPos, b: GeoPos) -> f64 {
    let dx_m = (a.x_cm - b.x_cm) / CM_PER_M;
    let dy_m = (a.y_cm - b.y_cm) / CM_PER_M;
    ((dx_m * dx_m) + (dy_m * dy_m)).sqrt()
}
