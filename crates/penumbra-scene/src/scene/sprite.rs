use crate::config::SpriteSpec;
use crate::error::SceneError;
use crate::geometry::QuadGeometry;
use crate::texture::NormalSource;

use super::SortKey;

/// One live sprite: its normalized definition plus the render resources it
/// owns.
///
/// Lifecycle: created when a scene load or an incremental update first
/// references its key; textures attach once they finish loading; the mesh
/// is created once textures are ready and the sprite is visible; the mesh
/// (geometry and shader, never the textures) is destroyed when the sprite
/// is removed or the scene torn down. The definition mutates in place on
/// updates and is only replaced at creation.
#[derive(Debug)]
pub struct Sprite<T, M> {
    key: String,
    spec: SpriteSpec,
    diffuse: Option<T>,
    diffuse_size: Option<(u32, u32)>,
    normal: Option<T>,
    normal_source: Option<NormalSource>,
    geometry: Option<QuadGeometry>,
    mesh: Option<M>,
    /// Mesh construction owed, deferred until textures are confirmed ready.
    needs_mesh: bool,
    /// Load generation. Bumped whenever the texture-affecting parts of the
    /// spec change; completions carrying a stale epoch are discarded.
    epoch: u64,
    /// Registration index, the tiebreaker for equal z-order.
    order: u32,
}

impl<T, M> Sprite<T, M> {
    pub(crate) fn new(key: String, spec: SpriteSpec, order: u32) -> Self {
        let needs_mesh = spec.visible;
        Self {
            key,
            spec,
            diffuse: None,
            diffuse_size: None,
            normal: None,
            normal_source: None,
            geometry: None,
            mesh: None,
            needs_mesh,
            epoch: 0,
            order,
        }
    }

    // ── public surface ────────────────────────────────────────────────────

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn spec(&self) -> &SpriteSpec {
        &self.spec
    }

    /// Drawable handle, present once textures loaded and the sprite became
    /// visible. Hosts use this to place the drawable in their container.
    #[inline]
    pub fn mesh(&self) -> Option<&M> {
        self.mesh.as_ref()
    }

    /// Current world-space geometry, if built.
    #[inline]
    pub fn geometry(&self) -> Option<&QuadGeometry> {
        self.geometry.as_ref()
    }

    /// Whether both textures have finished loading.
    #[inline]
    pub fn textures_ready(&self) -> bool {
        self.diffuse.is_some() && self.normal.is_some()
    }

    /// Participates in shadow volumes: flagged as a caster AND visible.
    #[inline]
    pub fn is_shadow_caster(&self) -> bool {
        self.spec.casts_shadows && self.spec.visible
    }

    #[inline]
    pub fn sort_key(&self) -> SortKey {
        SortKey::new(self.spec.z_order, self.order)
    }

    // ── manager plumbing ──────────────────────────────────────────────────

    pub(crate) fn spec_mut(&mut self) -> &mut SpriteSpec {
        &mut self.spec
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn bump_epoch(&mut self) {
        self.epoch += 1;
    }

    pub(crate) fn needs_mesh(&self) -> bool {
        self.needs_mesh
    }

    pub(crate) fn set_needs_mesh(&mut self, value: bool) {
        self.needs_mesh = value;
    }

    pub(crate) fn diffuse(&self) -> Option<&T> {
        self.diffuse.as_ref()
    }

    pub(crate) fn normal(&self) -> Option<&T> {
        self.normal.as_ref()
    }

    pub(crate) fn normal_source(&self) -> Option<&NormalSource> {
        self.normal_source.as_ref()
    }

    pub(crate) fn attach_textures(
        &mut self,
        diffuse: T,
        diffuse_size: (u32, u32),
        normal: T,
        normal_source: NormalSource,
    ) {
        self.diffuse = Some(diffuse);
        self.diffuse_size = Some(diffuse_size);
        self.normal = Some(normal);
        self.normal_source = Some(normal_source);
    }

    pub(crate) fn attach_normal(&mut self, normal: T, source: NormalSource) {
        self.normal = Some(normal);
        self.normal_source = Some(source);
    }

    /// Drops texture handles so the next flush re-provisions from the
    /// current spec. The underlying textures stay alive in the host cache.
    pub(crate) fn clear_textures(&mut self) {
        self.diffuse = None;
        self.diffuse_size = None;
        self.normal = None;
        self.normal_source = None;
        self.geometry = None;
    }

    pub(crate) fn mesh_mut(&mut self) -> Option<&mut M> {
        self.mesh.as_mut()
    }

    pub(crate) fn set_mesh(&mut self, mesh: M) {
        self.mesh = Some(mesh);
        self.needs_mesh = false;
    }

    pub(crate) fn take_mesh(&mut self) -> Option<M> {
        self.mesh.take()
    }

    /// Recomputes the quad from the current spec and texture dimensions.
    ///
    /// Precondition: the diffuse texture must already be loaded, since the
    /// quad size derives from its dimensions.
    pub(crate) fn rebuild_geometry(&mut self) -> Result<&QuadGeometry, SceneError> {
        let Some(size) = self.diffuse_size else {
            return Err(SceneError::TexturesNotReady { sprite: self.key.clone() });
        };

        let geometry = QuadGeometry::build(
            self.spec.world_size(size),
            self.spec.position,
            self.spec.rotation,
            self.spec.pivot,
        );
        Ok(self.geometry.insert(geometry))
    }

    /// World size in pixels; requires the diffuse texture to be loaded.
    pub(crate) fn world_size(&self) -> Result<[f32; 2], SceneError> {
        let Some(size) = self.diffuse_size else {
            return Err(SceneError::TexturesNotReady { sprite: self.key.clone() });
        };
        let size = self.spec.world_size(size);
        Ok([size.x, size.y])
    }
}
