mod bounds;
mod geometry;

pub use bounds::world_bounds;
pub use geometry::{Cuboid, Grid, Points, VertexSource};

use std::fmt;

use crate::components::Transform;
use crate::math::Mat4;
use crate::spatial::{Location, AABB};

/// シーン内のメッシュ
/// 頂点供給元と配置を持ち、ワールド空間のAABBをキャッシュする
pub struct Mesh {
    pub name: String,
    /// クリック判定の対象か
    pub clickable: bool,
    /// 半透明（不透明メッシュの後に奥から描画）
    pub translucent: bool,
    transform: Transform,
    source: Box<dyn VertexSource>,
    positions: Vec<Location>,
    bounds: AABB,
}

impl Mesh {
    /// 新しいメッシュを作成（原点、クリック不可）
    pub fn new(name: impl Into<String>, source: impl VertexSource + 'static) -> Self {
        let mut mesh = Self {
            name: name.into(),
            clickable: false,
            translucent: false,
            transform: Transform::identity(),
            source: Box::new(source),
            positions: Vec::new(),
            bounds: AABB::EMPTY,
        };
        mesh.rebuild_geometry();
        mesh
    }

    /// 配置を指定して作成
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.set_transform(transform);
        self
    }

    /// クリック可否を指定して作成
    pub fn with_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    /// 半透明フラグを指定して作成
    pub fn with_translucent(mut self, translucent: bool) -> Self {
        self.translucent = translucent;
        self
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// 配置を変更（AABBも再計算）
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.update_bounds();
    }

    /// 頂点供給元を差し替え
    pub fn set_source(&mut self, source: impl VertexSource + 'static) {
        self.source = Box::new(source);
        self.rebuild_geometry();
    }

    /// 頂点を供給元から取り直し、AABBを再計算
    pub fn rebuild_geometry(&mut self) {
        self.positions = self.source.vertex_positions();
        self.update_bounds();
    }

    /// ローカル頂点位置
    pub fn positions(&self) -> &[Location] {
        &self.positions
    }

    /// レンダー空間のモデル行列
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// キャッシュ済みのワールド空間AABB
    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    /// 指定位置からメッシュ位置までの距離
    pub fn distance_from(&self, location: Location) -> f32 {
        self.transform.location.distance(location)
    }

    fn update_bounds(&mut self) {
        self.bounds = world_bounds(&self.positions, &self.model_matrix());
        if self.bounds.is_empty() {
            log::debug!("mesh '{}' has no vertices, bounds left empty", self.name);
        }
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("name", &self.name)
            .field("clickable", &self.clickable)
            .field("translucent", &self.translucent)
            .field("transform", &self.transform)
            .field("vertices", &self.positions.len())
            .field("bounds", &self.bounds)
            .finish()
    }
}
