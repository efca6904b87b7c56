//! Software reference backend.
//!
//! Implements the core's capability trait without a GPU: textures are
//! decoded from disk with the `image` crate (dimensions are all the
//! composition layer needs), meshes are plain records, and the draw
//! container is a sorted id list. Useful for harnesses, golden tests, and
//! as a template for a real renderer integration.

use std::collections::HashMap;
use std::sync::Arc;

use penumbra_scene::RenderBackend;
use penumbra_scene::SceneError;
use penumbra_scene::geometry::QuadGeometry;
use penumbra_scene::mesh::{MeshInit, UniformSet, UniformValue};

/// Cheap-to-clone texture handle; the decoded info is shared.
#[derive(Debug, Clone)]
pub struct SoftTexture(Arc<TextureData>);

#[derive(Debug)]
struct TextureData {
    label: String,
    width: u32,
    height: u32,
}

impl SoftTexture {
    pub fn label(&self) -> &str {
        &self.0.label
    }
}

#[derive(Debug)]
pub struct SoftMesh {
    pub id: u32,
    pub geometry: QuadGeometry,
    pub uniforms: UniformSet<SoftTexture>,
    pub z_order: i32,
    pub visible: bool,
}

/// Headless backend: a texture cache plus a draw-order list of mesh ids.
#[derive(Default)]
pub struct SoftBackend {
    cache: HashMap<String, SoftTexture>,
    next_texture: u32,
    next_mesh: u32,
    /// Draw container: (mesh id, z-order), kept in draw order.
    draw_order: Vec<(u32, i32)>,
    sort_count: u32,
}

impl SoftBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the container was asked to re-sort.
    pub fn sort_count(&self) -> u32 {
        self.sort_count
    }

    /// Mesh ids in current draw order.
    pub fn draw_order(&self) -> impl Iterator<Item = u32> + '_ {
        self.draw_order.iter().map(|(id, _)| *id)
    }
}

impl RenderBackend for SoftBackend {
    type Texture = SoftTexture;
    type Mesh = SoftMesh;

    async fn load_texture(&mut self, path: &str) -> Result<SoftTexture, SceneError> {
        if let Some(texture) = self.cache.get(path) {
            return Ok(texture.clone());
        }

        let decoded = image::open(path).map_err(|err| SceneError::TextureLoad {
            path: path.to_owned(),
            message: err.to_string(),
        })?;

        self.next_texture += 1;
        let texture = SoftTexture(Arc::new(TextureData {
            label: path.to_owned(),
            width: decoded.width(),
            height: decoded.height(),
        }));
        log::debug!(
            "texture '{path}' decoded ({}x{})",
            decoded.width(),
            decoded.height()
        );
        self.cache.insert(path.to_owned(), texture.clone());
        Ok(texture)
    }

    fn solid_texture(&mut self, rgba: [u8; 4]) -> SoftTexture {
        self.next_texture += 1;
        SoftTexture(Arc::new(TextureData {
            label: format!("solid#{:02x}{:02x}{:02x}{:02x}", rgba[0], rgba[1], rgba[2], rgba[3]),
            width: 1,
            height: 1,
        }))
    }

    fn texture_size(&self, texture: &SoftTexture) -> (u32, u32) {
        (texture.0.width, texture.0.height)
    }

    fn create_mesh(&mut self, init: MeshInit<'_, SoftTexture>) -> SoftMesh {
        self.next_mesh += 1;
        // The container is depth-ordered at all times: a new drawable goes
        // in at its z slot, after any drawable of equal depth.
        let at = self.draw_order.partition_point(|&(_, z)| z <= init.z_order);
        self.draw_order.insert(at, (self.next_mesh, init.z_order));
        SoftMesh {
            id: self.next_mesh,
            geometry: init.geometry.clone(),
            uniforms: init.uniforms,
            z_order: init.z_order,
            visible: init.visible,
        }
    }

    fn destroy_mesh(&mut self, mesh: SoftMesh) {
        self.draw_order.retain(|(id, _)| *id != mesh.id);
    }

    fn set_geometry(&mut self, mesh: &mut SoftMesh, geometry: &QuadGeometry) {
        mesh.geometry = geometry.clone();
    }

    fn set_uniform(&mut self, mesh: &mut SoftMesh, name: &str, value: UniformValue<SoftTexture>) {
        mesh.uniforms.set(name, value);
    }

    fn set_z_order(&mut self, mesh: &mut SoftMesh, z_order: i32) {
        mesh.z_order = z_order;
        if let Some(entry) = self.draw_order.iter_mut().find(|(id, _)| *id == mesh.id) {
            entry.1 = z_order;
        }
    }

    fn set_visible(&mut self, mesh: &mut SoftMesh, visible: bool) {
        mesh.visible = visible;
    }

    fn sort_draw_order(&mut self) {
        self.draw_order.sort_by_key(|(_, z)| *z);
        self.sort_count += 1;
        log::debug!("draw container re-sorted ({} meshes)", self.draw_order.len());
    }
}
