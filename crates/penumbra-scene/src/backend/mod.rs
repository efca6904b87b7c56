//! The capability surface a host rendering engine must provide.
//!
//! The composition core never talks to a graphics API. Everything it needs
//! is expressed here: resolve a texture by path, synthesize a solid
//! texture, compose geometry + shader + uniforms into a drawable, patch
//! that drawable in place, and re-sort the draw container.

use crate::error::SceneError;
use crate::geometry::QuadGeometry;
use crate::mesh::{MeshInit, UniformValue};

/// Host rendering capabilities.
///
/// Texture loading is the only asynchronous operation in the system; the
/// scheduling model is a single cooperative timeline, so the futures carry
/// no `Send` requirement.
#[allow(async_fn_in_trait)]
pub trait RenderBackend {
    /// Opaque texture handle. Clones are cheap references to the same
    /// resource; the texture itself is owned by the host's cache and is
    /// never destroyed by this core.
    type Texture: Clone;
    /// Opaque drawable handle, exclusively owned by one sprite.
    type Mesh;

    /// Resolves `path` to a texture, completing once the texture reports
    /// loaded. Already-cached textures may resolve immediately.
    async fn load_texture(&mut self, path: &str) -> Result<Self::Texture, SceneError>;

    /// Creates a 1×1 texture of a single RGBA color.
    fn solid_texture(&mut self, rgba: [u8; 4]) -> Self::Texture;

    /// Pixel dimensions of a loaded texture.
    fn texture_size(&self, texture: &Self::Texture) -> (u32, u32);

    /// Composes geometry, shader, and uniforms into one drawable and
    /// registers it with the draw container at the given depth.
    fn create_mesh(&mut self, init: MeshInit<'_, Self::Texture>) -> Self::Mesh;

    /// Frees a drawable's geometry and shader. Textures are not touched.
    fn destroy_mesh(&mut self, mesh: Self::Mesh);

    /// Replaces a drawable's vertex data in place.
    fn set_geometry(&mut self, mesh: &mut Self::Mesh, geometry: &QuadGeometry);

    /// Writes one uniform slot on a live drawable.
    fn set_uniform(&mut self, mesh: &mut Self::Mesh, name: &str, value: UniformValue<Self::Texture>);

    /// Writes a drawable's depth/order field. Takes effect at the next
    /// [`sort_draw_order`](Self::sort_draw_order).
    fn set_z_order(&mut self, mesh: &mut Self::Mesh, z_order: i32);

    /// Writes a drawable's visibility flag.
    fn set_visible(&mut self, mesh: &mut Self::Mesh, visible: bool);

    /// Re-sorts the host's draw container by depth. The reconciler batches
    /// this to at most one call per pass.
    fn sort_draw_order(&mut self);
}
