//! Recording backend used by the scene tests.
//!
//! Textures resolve from a registered path → dimensions table; meshes are
//! plain structs carrying the state the backend was asked to write, plus a
//! numeric identity so tests can prove a mesh was patched rather than
//! recreated. A shared gate lets a test hold texture loads pending to
//! exercise cancellation.

use std::cell::Cell;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use crate::backend::RenderBackend;
use crate::config::SpriteConfig;
use crate::error::SceneError;
use crate::geometry::QuadGeometry;
use crate::mesh::{MeshInit, ShaderProgram, UniformSet, UniformValue};
use crate::scene::SceneManager;

#[derive(Debug, Clone, PartialEq)]
pub enum TestTexture {
    File { id: u32, path: String, width: u32, height: u32 },
    Solid { id: u32, rgba: [u8; 4] },
}

#[derive(Debug)]
pub struct TestMesh {
    pub id: u32,
    pub geometry: QuadGeometry,
    pub uniforms: UniformSet<TestTexture>,
    pub z_order: i32,
    pub visible: bool,
}

/// Resolves ready when the shared flag is open, otherwise stays pending.
struct Gate {
    open: Rc<Cell<bool>>,
}

impl Future for Gate {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.open.get() { Poll::Ready(()) } else { Poll::Pending }
    }
}

#[derive(Default)]
pub struct TestBackend {
    sizes: HashMap<String, (u32, u32)>,
    next_texture: u32,
    next_mesh: u32,
    /// Every `load_texture` call, in order, including retries.
    pub loads: Vec<String>,
    pub meshes_created: u32,
    pub meshes_destroyed: u32,
    pub geometry_writes: u32,
    pub uniform_writes: u32,
    pub sort_calls: u32,
    /// Closed gate holds every texture load pending.
    pub gate: Rc<Cell<bool>>,
}

impl TestBackend {
    pub fn with_textures(entries: &[(&str, (u32, u32))]) -> Self {
        Self {
            sizes: entries
                .iter()
                .map(|(path, size)| ((*path).to_owned(), *size))
                .collect(),
            gate: Rc::new(Cell::new(true)),
            ..Self::default()
        }
    }
}

impl RenderBackend for TestBackend {
    type Texture = TestTexture;
    type Mesh = TestMesh;

    async fn load_texture(&mut self, path: &str) -> Result<TestTexture, SceneError> {
        self.loads.push(path.to_owned());
        Gate { open: self.gate.clone() }.await;

        let Some(&(width, height)) = self.sizes.get(path) else {
            return Err(SceneError::TextureLoad {
                path: path.to_owned(),
                message: "no such texture".to_owned(),
            });
        };
        self.next_texture += 1;
        Ok(TestTexture::File { id: self.next_texture, path: path.to_owned(), width, height })
    }

    fn solid_texture(&mut self, rgba: [u8; 4]) -> TestTexture {
        self.next_texture += 1;
        TestTexture::Solid { id: self.next_texture, rgba }
    }

    fn texture_size(&self, texture: &TestTexture) -> (u32, u32) {
        match texture {
            TestTexture::File { width, height, .. } => (*width, *height),
            TestTexture::Solid { .. } => (1, 1),
        }
    }

    fn create_mesh(&mut self, init: MeshInit<'_, TestTexture>) -> TestMesh {
        self.meshes_created += 1;
        self.next_mesh += 1;
        TestMesh {
            id: self.next_mesh,
            geometry: init.geometry.clone(),
            uniforms: init.uniforms,
            z_order: init.z_order,
            visible: init.visible,
        }
    }

    fn destroy_mesh(&mut self, _mesh: TestMesh) {
        self.meshes_destroyed += 1;
    }

    fn set_geometry(&mut self, mesh: &mut TestMesh, geometry: &QuadGeometry) {
        mesh.geometry = geometry.clone();
        self.geometry_writes += 1;
    }

    fn set_uniform(&mut self, mesh: &mut TestMesh, name: &str, value: UniformValue<TestTexture>) {
        mesh.uniforms.set(name, value);
        self.uniform_writes += 1;
    }

    fn set_z_order(&mut self, mesh: &mut TestMesh, z_order: i32) {
        mesh.z_order = z_order;
    }

    fn set_visible(&mut self, mesh: &mut TestMesh, visible: bool) {
        mesh.visible = visible;
    }

    fn sort_draw_order(&mut self) {
        self.sort_calls += 1;
    }
}

/// Registered test textures: `x.png` 32×16, `y.png` 8×8, `n.png` 32×16.
pub fn manager_with_textures() -> SceneManager<TestBackend> {
    let backend = TestBackend::with_textures(&[
        ("x.png", (32, 16)),
        ("y.png", (8, 8)),
        ("n.png", (32, 16)),
    ]);
    SceneManager::new(backend, test_shader())
}

pub fn test_shader() -> ShaderProgram<TestTexture> {
    ShaderProgram::new("// vertex", "// fragment")
}

/// Minimal declaration against the registered `x.png`.
pub fn sprite_config() -> SpriteConfig {
    SpriteConfig::new("x.png")
}
