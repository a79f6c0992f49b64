use serde::{Deserialize, Serialize};

use crate::spatial::{Dimensions, Location};

/// ローカル頂点位置の供給元
/// 位置はワールド座標系の向き（X左右、Y前後、Z上下）で返す
pub trait VertexSource {
    fn vertex_positions(&self) -> Vec<Location>;
}

/// 任意の頂点列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Points(pub Vec<Location>);

impl VertexSource for Points {
    fn vertex_positions(&self) -> Vec<Location> {
        self.0.clone()
    }
}

impl<F> VertexSource for F
where
    F: Fn() -> Vec<Location>,
{
    fn vertex_positions(&self) -> Vec<Location> {
        self()
    }
}

/// 直方体（原点中心）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cuboid {
    pub size: Dimensions,
}

impl Cuboid {
    pub fn new(size: Dimensions) -> Self {
        Self { size }
    }
}

impl Default for Cuboid {
    fn default() -> Self {
        Self::new(Dimensions::cube(2.0))
    }
}

impl VertexSource for Cuboid {
    /// 各面4頂点、計24頂点
    fn vertex_positions(&self) -> Vec<Location> {
        let h = self.size.to_vec3() * 0.5;
        let corner = |sx: f32, sy: f32, sz: f32| Location::new(sx * h.x, sy * h.y, sz * h.z);
        vec![
            // +X
            corner(1.0, -1.0, -1.0), corner(1.0, 1.0, -1.0), corner(1.0, 1.0, 1.0), corner(1.0, -1.0, 1.0),
            // -X
            corner(-1.0, 1.0, -1.0), corner(-1.0, -1.0, -1.0), corner(-1.0, -1.0, 1.0), corner(-1.0, 1.0, 1.0),
            // +Y
            corner(1.0, 1.0, -1.0), corner(-1.0, 1.0, -1.0), corner(-1.0, 1.0, 1.0), corner(1.0, 1.0, 1.0),
            // -Y
            corner(-1.0, -1.0, -1.0), corner(1.0, -1.0, -1.0), corner(1.0, -1.0, 1.0), corner(-1.0, -1.0, 1.0),
            // +Z
            corner(-1.0, -1.0, 1.0), corner(1.0, -1.0, 1.0), corner(1.0, 1.0, 1.0), corner(-1.0, 1.0, 1.0),
            // -Z
            corner(-1.0, 1.0, -1.0), corner(1.0, 1.0, -1.0), corner(1.0, -1.0, -1.0), corner(-1.0, -1.0, -1.0),
        ]
    }
}

/// Z=0平面上のグリッド線
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid {
    /// 一辺の長さ
    pub size: f32,
    /// 線の間隔
    pub line_interval: f32,
}

impl Grid {
    pub fn new(size: f32, line_interval: f32) -> Self {
        Self { size, line_interval }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(4.0, 1.0)
    }
}

/// 原点から片側に引く線の上限
const MAX_GRID_LINES_PER_SIDE: usize = 10_000;

impl VertexSource for Grid {
    /// 線ごとに始点と終点の2頂点
    /// 線は原点を中心に対称に並び、端は間隔の整数倍に揃える
    fn vertex_positions(&self) -> Vec<Location> {
        if !self.size.is_finite() || !self.line_interval.is_finite() {
            log::warn!("grid with non-finite size {} or interval {}", self.size, self.line_interval);
            return Vec::new();
        }
        if self.size <= 0.0 || self.line_interval <= 0.0 {
            return Vec::new();
        }

        let per_side = (self.size * 0.5 / self.line_interval).floor();
        let per_side = if per_side > MAX_GRID_LINES_PER_SIDE as f32 {
            log::warn!("grid capped at {MAX_GRID_LINES_PER_SIDE} lines per side");
            MAX_GRID_LINES_PER_SIDE
        } else {
            per_side as usize
        };
        let half = per_side as f32 * self.line_interval;

        let mut positions = Vec::with_capacity((2 * per_side + 1) * 4);
        for i in -(per_side as i64)..=per_side as i64 {
            let offset = i as f32 * self.line_interval;
            // Y方向の線
            positions.push(Location::new(offset, -half, 0.0));
            positions.push(Location::new(offset, half, 0.0));
            // X方向の線
            positions.push(Location::new(-half, offset, 0.0));
            positions.push(Location::new(half, offset, 0.0));
        }
        positions
    }
}
