use std::cmp::Ordering;

use bytemuck::{Pod, Zeroable};
use viewer_core::coords;
use viewer_core::math::Mat4;
use viewer_core::{Location, Mesh, MeshId, ModelUniform, Scene};

use crate::camera::{Camera, CameraControl};
use crate::error::ViewerError;
use crate::viewport::ViewportSize;

/// GPU用カメラUniform
/// View-Projection行列とレンダー空間のカメラ位置
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _padding: f32,
}

impl CameraUniform {
    pub fn new(projection: Mat4, view: Mat4, location: Location) -> Self {
        Self {
            view_proj: (projection * view).to_cols_array_2d(),
            position: coords::location_to_render(location).to_array(),
            _padding: 0.0,
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Location::ORIGIN)
    }
}

/// 1メッシュ分の描画要求
#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    pub mesh: MeshId,
    pub model: ModelUniform,
    pub translucent: bool,
}

/// 1フレーム分の描画データ
#[derive(Debug, Clone)]
pub struct Frame {
    pub projection: Mat4,
    pub view: Mat4,
    /// ワールド空間のカメラ位置
    pub camera_location: Location,
    pub camera: CameraUniform,
    /// 不透明メッシュ（追加順）の後に半透明メッシュ（遠い順）
    pub draws: Vec<DrawCall>,
}

/// カメラとシーンから描画データを組み立てる
pub fn build_frame(camera: Option<&Camera>, scene: &Scene, size: ViewportSize) -> Result<Frame, ViewerError> {
    let camera = camera.ok_or(ViewerError::CameraNotSet)?;

    let projection = camera.projection_matrix(size);
    let view = camera.view_matrix(size);
    let camera_location = camera.location(size);

    let mut draws: Vec<DrawCall> = scene
        .meshes()
        .filter(|(_, mesh)| !mesh.translucent)
        .map(|(id, mesh)| draw_call(id, mesh))
        .collect();

    let mut translucent: Vec<(f32, DrawCall)> = scene
        .meshes()
        .filter(|(_, mesh)| mesh.translucent)
        .map(|(id, mesh)| (mesh.distance_from(camera_location), draw_call(id, mesh)))
        .collect();
    translucent.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    draws.extend(translucent.into_iter().map(|(_, call)| call));

    Ok(Frame {
        projection,
        view,
        camera_location,
        camera: CameraUniform::new(projection, view, camera_location),
        draws,
    })
}

fn draw_call(id: MeshId, mesh: &Mesh) -> DrawCall {
    DrawCall {
        mesh: id,
        model: ModelUniform::from_transform(mesh.transform()),
        translucent: mesh.translucent,
    }
}
