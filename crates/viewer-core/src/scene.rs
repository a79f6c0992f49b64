use crate::light::PointLight;
use crate::mesh::Mesh;

/// メッシュの識別子（シーンへの追加順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u32);

impl MeshId {
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// ライトの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightId(u32);

impl LightId {
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// 描画対象のシーン
/// メッシュとライトを追加順に保持する（カメラは持たない）
#[derive(Debug)]
pub struct Scene {
    meshes: Vec<Mesh>,
    lights: Vec<PointLight>,
    /// 環境光の色
    pub ambient_color: [f32; 3],
    /// 環境光の強さ
    pub ambient_intensity: f32,
}

impl Scene {
    /// 空のシーンを作成
    pub fn new() -> Self {
        Self {
            meshes: Vec::new(),
            lights: Vec::new(),
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.0,
        }
    }

    /// メッシュを追加
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        log::trace!("scene: added mesh '{}' as {:?}", mesh.name, id);
        self.meshes.push(mesh);
        id
    }

    /// ライトを追加
    pub fn add_light(&mut self, light: PointLight) -> LightId {
        let id = LightId(self.lights.len() as u32);
        self.lights.push(light);
        id
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0 as usize)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id.0 as usize)
    }

    pub fn light(&self, id: LightId) -> Option<&PointLight> {
        self.lights.get(id.0 as usize)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut PointLight> {
        self.lights.get_mut(id.0 as usize)
    }

    /// 追加順にメッシュを列挙
    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &Mesh)> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, mesh)| (MeshId(i as u32), mesh))
    }

    /// 追加順にライトを列挙
    pub fn lights(&self) -> impl Iterator<Item = (LightId, &PointLight)> {
        self.lights
            .iter()
            .enumerate()
            .map(|(i, light)| (LightId(i as u32), light))
    }

    /// 名前でメッシュを検索（最初に一致したもの）
    pub fn find_mesh(&self, name: &str) -> Option<MeshId> {
        self.meshes().find(|(_, mesh)| mesh.name == name).map(|(id, _)| id)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
