use serde::{Deserialize, Serialize};

use crate::spatial::Location;

/// 点光源
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLight {
    pub location: Location,
    /// RGB (0.0..=1.0)
    pub color: [f32; 3],
    pub intensity: f32,
    /// 減衰係数（二次・一次・定数）
    pub quadratic: f32,
    pub linear: f32,
    pub constant: f32,
}

impl PointLight {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    /// 距離による減衰率
    pub fn attenuation(&self, distance: f32) -> f32 {
        let denominator = self.constant + self.linear * distance + self.quadratic * distance * distance;
        if denominator > 0.0 {
            1.0 / denominator
        } else {
            1.0
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            location: Location::ORIGIN,
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            quadratic: 1.0,
            linear: 0.0,
            constant: 0.0,
        }
    }
}
