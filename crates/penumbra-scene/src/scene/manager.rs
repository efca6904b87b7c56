use std::collections::BTreeMap;

use crate::backend::RenderBackend;
use crate::config::{SceneConfig, SpriteSpec};
use crate::error::SceneError;
use crate::mesh::{
    MeshInit, ShaderProgram, U_NORMAL, U_WORLD_POSITION, U_WORLD_SIZE, UniformValue,
    assemble_uniforms,
};
use crate::texture::{NormalSource, resolve_normal};

use super::hooks::{NoHooks, SceneHooks};
use super::sprite::Sprite;

/// Owner of the live sprite set.
///
/// Bulk loads flow one direction (config → sprites → textures → meshes);
/// live edits are reconciled incrementally against the already-rendered
/// scene, patching meshes in place instead of rebuilding them.
///
/// The backend and the lighting shader program are injected at
/// construction. The sprite mapping is exclusively owned and mutated here;
/// meshes belong to their sprite, textures belong to the host's cache.
pub struct SceneManager<B: RenderBackend, H: SceneHooks = NoHooks> {
    backend: B,
    shader: ShaderProgram<B::Texture>,
    hooks: H,
    sprites: BTreeMap<String, Sprite<B::Texture, B::Mesh>>,
    next_order: u32,
}

impl<B: RenderBackend> SceneManager<B, NoHooks> {
    pub fn new(backend: B, shader: ShaderProgram<B::Texture>) -> Self {
        Self::with_hooks(backend, shader, NoHooks)
    }
}

impl<B: RenderBackend, H: SceneHooks> SceneManager<B, H> {
    /// Like [`new`](Self::new), with an explicit hook receiver for
    /// latency-sensitive change notifications.
    pub fn with_hooks(backend: B, shader: ShaderProgram<B::Texture>, hooks: H) -> Self {
        Self {
            backend,
            shader,
            hooks,
            sprites: BTreeMap::new(),
            next_order: 0,
        }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Host access to the backend, e.g. to pump its frame loop.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[inline]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Sprite<B::Texture, B::Mesh>> {
        self.sprites.get(key)
    }

    /// All live sprites, in key order.
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite<B::Texture, B::Mesh>> {
        self.sprites.values()
    }

    // ── bulk load ─────────────────────────────────────────────────────────

    /// Replaces the whole scene: existing sprites are torn down (meshes and
    /// geometry freed, textures left to the host cache), then every config
    /// entry is registered and driven through texture loading and mesh
    /// creation.
    pub async fn load_scene(&mut self, config: &SceneConfig) -> Result<(), SceneError> {
        log::info!("loading scene: {} sprites", config.sprites.len());
        self.clear();
        for (key, sprite_config) in &config.sprites {
            self.register(key.clone(), SpriteSpec::from_config(sprite_config));
        }
        self.flush_pending().await
    }

    /// Tears down every sprite. Meshes are destroyed; textures are not.
    pub fn clear(&mut self) {
        for (_, mut sprite) in std::mem::take(&mut self.sprites) {
            if let Some(mesh) = sprite.take_mesh() {
                self.backend.destroy_mesh(mesh);
            }
        }
    }

    fn register(&mut self, key: String, spec: SpriteSpec) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.sprites.insert(key.clone(), Sprite::new(key, spec, order));
    }

    // ── incremental reconciliation ────────────────────────────────────────

    /// Brings live sprites in line with `config` using the minimum
    /// necessary mutation.
    ///
    /// Per key present on both sides: the definition is shallow-merged, and
    /// a live mesh is patched in place — geometry recomputed for transform
    /// edits, the normal uniform slot rewritten for normal-map edits, depth
    /// and visibility flags written directly. Keys new to `config` are
    /// created through the bulk-load path. Keys that disappeared from
    /// `config` are deliberately kept; removal is an explicit, separate
    /// concern ([`remove`](Self::remove), [`prune_missing`](Self::prune_missing)).
    ///
    /// If any live mesh changed depth, the draw container is re-sorted
    /// exactly once, after all per-sprite mutations.
    pub async fn update_from_config(&mut self, config: &SceneConfig) -> Result<(), SceneError> {
        let mut z_dirty = false;

        for (key, sprite_config) in &config.sprites {
            if !self.sprites.contains_key(key) {
                log::debug!("sprite '{key}': new key, creating");
                self.register(key.clone(), SpriteSpec::from_config(sprite_config));
                continue;
            }
            let Some(sprite) = self.sprites.get_mut(key) else {
                continue;
            };

            let was_visible = sprite.spec().visible;
            let delta = sprite.spec_mut().merge(sprite_config);
            if !delta.any() {
                continue;
            }

            if delta.image {
                // Diffuse path changed: the provisioning chain restarts from
                // scratch. Any in-flight load for the old image is stale now.
                log::debug!("sprite '{key}': image changed, re-provisioning");
                sprite.clear_textures();
                sprite.bump_epoch();
                sprite.set_needs_mesh(sprite.spec().visible);
                if let Some(mesh) = sprite.take_mesh() {
                    self.backend.destroy_mesh(mesh);
                }
                // The recreated mesh picks the merged spec up wholesale,
                // but hook receivers still get told what else changed.
                if delta.transform {
                    self.hooks.transform_changed(key);
                }
                if delta.normal_map {
                    self.hooks.normal_map_changed(key);
                }
                if delta.z_order {
                    self.hooks.z_order_changed(key, sprite.spec().z_order);
                }
                if delta.visibility {
                    self.hooks.visibility_changed(key, sprite.spec().visible);
                }
                continue;
            }

            if !was_visible && sprite.spec().visible && sprite.mesh().is_none() {
                // Mesh construction is deferred to the flush pass, once
                // textures are confirmed ready.
                sprite.set_needs_mesh(true);
            }

            if delta.transform {
                if sprite.mesh().is_some() {
                    let geometry = sprite.rebuild_geometry()?.clone();
                    let position = sprite.spec().position;
                    let world_size = sprite.world_size()?;
                    if let Some(mesh) = sprite.mesh_mut() {
                        self.backend.set_geometry(mesh, &geometry);
                        self.backend.set_uniform(
                            mesh,
                            U_WORLD_POSITION,
                            UniformValue::Vec2([position.x, position.y]),
                        );
                        self.backend
                            .set_uniform(mesh, U_WORLD_SIZE, UniformValue::Vec2(world_size));
                    }
                }
                self.hooks.transform_changed(key);
            }

            if delta.normal_map {
                // Re-resolved in the flush pass; a load already in flight
                // for the previous source must lose to this edit.
                sprite.bump_epoch();
                self.hooks.normal_map_changed(key);
            }

            if delta.z_order {
                let z_order = sprite.spec().z_order;
                if let Some(mesh) = sprite.mesh_mut() {
                    self.backend.set_z_order(mesh, z_order);
                    z_dirty = true;
                }
                self.hooks.z_order_changed(key, z_order);
            }

            if delta.visibility {
                let visible = sprite.spec().visible;
                if let Some(mesh) = sprite.mesh_mut() {
                    self.backend.set_visible(mesh, visible);
                }
                self.hooks.visibility_changed(key, visible);
            }
        }

        if z_dirty {
            log::debug!("depth changed, re-sorting draw container");
            self.backend.sort_draw_order();
        }

        self.flush_pending().await
    }

    // ── deferred provisioning ─────────────────────────────────────────────

    /// Drives every sprite's deferred work: texture provisioning, normal
    /// re-resolution, and owed mesh creation.
    ///
    /// Each await is guarded by the sprite's load epoch; completions for a
    /// sprite that was removed or re-targeted mid-load are discarded. A
    /// live pass holds `&mut self`, so no edit can currently interleave
    /// with an await: the discard branches are the contract for any future
    /// surface that drives provisioning outside the exclusive borrow. The
    /// pass is restartable: if it is cancelled or fails partway, the flags
    /// it works from survive and the next call picks the work back up.
    pub async fn flush_pending(&mut self) -> Result<(), SceneError> {
        let keys: Vec<String> = self.sprites.keys().cloned().collect();
        for key in keys {
            self.flush_sprite(&key).await?;
        }
        Ok(())
    }

    async fn flush_sprite(&mut self, key: &str) -> Result<(), SceneError> {
        // Provision missing textures. The await runs without holding a
        // sprite borrow; the epoch decides whether the result still applies.
        let pending = match self.sprites.get(key) {
            Some(sprite) if !sprite.textures_ready() => Some((
                sprite.epoch(),
                sprite.spec().image.clone(),
                NormalSource::for_spec(sprite.spec()),
            )),
            Some(_) => None,
            None => return Ok(()),
        };
        if let Some((epoch, image, source)) = pending {
            let diffuse = self.backend.load_texture(&image).await?;
            let size = self.backend.texture_size(&diffuse);
            let normal = resolve_normal(&mut self.backend, &source).await?;

            let Some(sprite) = self.sprites.get_mut(key) else {
                log::debug!("sprite '{key}': removed mid-load, discarding textures");
                return Ok(());
            };
            if sprite.epoch() != epoch {
                log::debug!("sprite '{key}': stale texture load, discarding");
                return Ok(());
            }
            sprite.attach_textures(diffuse, size, normal, source);
        }

        // Refresh the normal texture if the spec now calls for a different
        // source. Only the uniform slot is rewritten; the mesh survives.
        let refresh = match self.sprites.get(key) {
            Some(sprite) if sprite.textures_ready() => {
                let wanted = NormalSource::for_spec(sprite.spec());
                (sprite.normal_source() != Some(&wanted)).then(|| (sprite.epoch(), wanted))
            }
            _ => None,
        };
        if let Some((epoch, source)) = refresh {
            let normal = resolve_normal(&mut self.backend, &source).await?;

            let Some(sprite) = self.sprites.get_mut(key) else {
                return Ok(());
            };
            if sprite.epoch() != epoch {
                log::debug!("sprite '{key}': stale normal load, discarding");
                return Ok(());
            }
            sprite.attach_normal(normal.clone(), source);
            if let Some(mesh) = sprite.mesh_mut() {
                self.backend.set_uniform(mesh, U_NORMAL, UniformValue::Texture(normal));
            }
        }

        // Create the mesh if one is owed and the sprite is ready for it.
        let Some(sprite) = self.sprites.get_mut(key) else {
            return Ok(());
        };
        if sprite.needs_mesh()
            && sprite.spec().visible
            && sprite.textures_ready()
            && sprite.mesh().is_none()
        {
            sprite.rebuild_geometry()?;
            let world_size = sprite.world_size()?;
            let position = sprite.spec().position;
            let (Some(diffuse), Some(normal)) = (sprite.diffuse(), sprite.normal()) else {
                return Ok(());
            };
            let uniforms = assemble_uniforms(
                diffuse,
                normal,
                [position.x, position.y],
                world_size,
                &self.shader.extra_uniforms,
            );
            let Some(geometry) = sprite.geometry() else {
                return Ok(());
            };
            let mesh = self.backend.create_mesh(MeshInit {
                geometry,
                vertex_src: &self.shader.vertex_src,
                fragment_src: &self.shader.fragment_src,
                uniforms,
                z_order: sprite.spec().z_order,
                visible: sprite.spec().visible,
            });
            sprite.set_mesh(mesh);
            log::debug!("sprite '{key}': mesh created");
        }

        Ok(())
    }

    // ── removal (explicit; never implied by an update) ────────────────────

    /// Destroys the sprite's mesh (not its textures) and forgets the key.
    /// Returns whether the key was present.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.sprites.remove(key) {
            Some(mut sprite) => {
                if let Some(mesh) = sprite.take_mesh() {
                    self.backend.destroy_mesh(mesh);
                }
                log::debug!("sprite '{key}': removed");
                true
            }
            None => false,
        }
    }

    /// Removes every live sprite whose key is absent from `config`.
    /// The opt-in bulk counterpart of [`remove`](Self::remove); returns the
    /// number of sprites dropped.
    pub fn prune_missing(&mut self, config: &SceneConfig) -> usize {
        let stale: Vec<String> = self
            .sprites
            .keys()
            .filter(|key| !config.contains(key))
            .cloned()
            .collect();
        for key in &stale {
            self.remove(key);
        }
        stale.len()
    }

    // ── persistence ───────────────────────────────────────────────────────

    /// Exports the live specs as a fully-populated configuration, for the
    /// persistence collaborator to serialize.
    pub fn export_config(&self) -> SceneConfig {
        let mut config = SceneConfig::new();
        for sprite in self.sprites.values() {
            config
                .sprites
                .insert(sprite.key().to_owned(), sprite.spec().to_config());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::task::{Context, Waker};

    use pollster::block_on;

    use crate::backend::RenderBackend;
    use crate::config::{SceneConfig, SpriteConfig};
    use crate::coords::Vec2;
    use crate::error::SceneError;
    use crate::mesh::{U_DIFFUSE, U_NORMAL, UniformValue};
    use crate::scene::testutil::{
        TestTexture, manager_with_textures, sprite_config, test_shader,
    };
    use crate::scene::{SceneHooks, SceneManager};
    use crate::texture::FLAT_NORMAL_RGBA;

    fn single_sprite_scene() -> SceneConfig {
        SceneConfig::new().with(
            "a",
            SpriteConfig {
                position: Some(Vec2::new(10.0, 20.0)),
                rotation: Some(0.0),
                ..sprite_config()
            },
        )
    }

    // ── bulk load ─────────────────────────────────────────────────────────

    #[test]
    fn load_scene_places_quad_at_position() {
        let mut manager = manager_with_textures();
        block_on(manager.load_scene(&single_sprite_scene())).unwrap();

        let sprite = manager.get("a").unwrap();
        let mesh = sprite.mesh().unwrap();
        // x.png is 32x16 at scale 1; the unrotated top-left vertex sits on
        // the configured position.
        assert_eq!(mesh.geometry.vertices[0].pos, [10.0, 20.0]);
        assert_eq!(mesh.geometry.vertices[2].pos, [42.0, 36.0]);
        assert!(matches!(
            mesh.uniforms.get(U_DIFFUSE),
            Some(UniformValue::Texture(TestTexture::File { path, .. })) if path == "x.png"
        ));
    }

    #[test]
    fn flat_normal_is_synthesized_when_no_map_given() {
        let mut manager = manager_with_textures();
        block_on(manager.load_scene(&single_sprite_scene())).unwrap();

        let mesh = manager.get("a").unwrap().mesh().unwrap();
        let Some(UniformValue::Texture(normal)) = mesh.uniforms.get(U_NORMAL) else {
            panic!("normal uniform missing");
        };
        assert!(matches!(normal, TestTexture::Solid { rgba, .. } if *rgba == FLAT_NORMAL_RGBA));
        assert_eq!(manager.backend().texture_size(normal), (1, 1));
    }

    #[test]
    fn load_failure_propagates() {
        let mut manager = manager_with_textures();
        let config = SceneConfig::new().with("a", SpriteConfig::new("missing.png"));
        let err = block_on(manager.load_scene(&config)).unwrap_err();
        assert!(matches!(err, SceneError::TextureLoad { path, .. } if path == "missing.png"));
    }

    #[test]
    fn reload_tears_down_previous_scene() {
        let mut manager = manager_with_textures();
        block_on(manager.load_scene(&single_sprite_scene())).unwrap();
        block_on(manager.load_scene(
            &SceneConfig::new().with("b", sprite_config()),
        ))
        .unwrap();

        assert_eq!(manager.len(), 1);
        assert!(manager.get("a").is_none());
        assert_eq!(manager.backend().meshes_destroyed, 1);
    }

    // ── incremental reconciliation ────────────────────────────────────────

    #[test]
    fn rotation_update_patches_mesh_in_place() {
        let mut manager = manager_with_textures();
        block_on(manager.load_scene(&single_sprite_scene())).unwrap();

        let (id_before, geometry_before) = {
            let mesh = manager.get("a").unwrap().mesh().unwrap();
            (mesh.id, mesh.geometry.clone())
        };

        let edit = SceneConfig::new().with(
            "a",
            SpriteConfig {
                position: Some(Vec2::new(10.0, 20.0)),
                rotation: Some(1.5708),
                ..sprite_config()
            },
        );
        block_on(manager.update_from_config(&edit)).unwrap();

        let mesh = manager.get("a").unwrap().mesh().unwrap();
        assert_eq!(mesh.id, id_before, "mesh must be patched, not recreated");
        assert_ne!(mesh.geometry, geometry_before);
        assert_eq!(manager.backend().meshes_created, 1);
        assert_eq!(manager.backend().geometry_writes, 1);
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let mut manager = manager_with_textures();
        block_on(manager.load_scene(&single_sprite_scene())).unwrap();

        let edit = SceneConfig::new().with(
            "a",
            SpriteConfig {
                position: Some(Vec2::new(5.0, 5.0)),
                rotation: Some(0.7),
                z_order: Some(4),
                normal: Some("n.png".to_owned()),
                ..sprite_config()
            },
        );
        block_on(manager.update_from_config(&edit)).unwrap();

        let backend = manager.backend();
        let counters = (
            backend.sort_calls,
            backend.geometry_writes,
            backend.uniform_writes,
            backend.loads.len(),
            backend.meshes_created,
        );

        // Same configuration again: nothing may move.
        block_on(manager.update_from_config(&edit)).unwrap();
        let backend = manager.backend();
        assert_eq!(
            counters,
            (
                backend.sort_calls,
                backend.geometry_writes,
                backend.uniform_writes,
                backend.loads.len(),
                backend.meshes_created,
            )
        );
    }

    #[test]
    fn z_edits_batch_exactly_one_sort() {
        let mut manager = manager_with_textures();
        let scene = SceneConfig::new()
            .with("a", sprite_config())
            .with("b", sprite_config())
            .with("c", sprite_config());
        block_on(manager.load_scene(&scene)).unwrap();
        assert_eq!(manager.backend().sort_calls, 0);

        let edit = SceneConfig::new()
            .with("a", SpriteConfig { z_order: Some(3), ..sprite_config() })
            .with("b", SpriteConfig { z_order: Some(2), ..sprite_config() })
            .with("c", SpriteConfig { z_order: Some(1), ..sprite_config() });
        block_on(manager.update_from_config(&edit)).unwrap();

        assert_eq!(manager.backend().sort_calls, 1);
        assert_eq!(manager.get("b").unwrap().mesh().unwrap().z_order, 2);
    }

    #[test]
    fn invisible_sprite_defers_mesh_until_visible() {
        let mut manager = manager_with_textures();
        let scene = SceneConfig::new()
            .with("a", SpriteConfig { visible: Some(false), ..sprite_config() });
        block_on(manager.load_scene(&scene)).unwrap();

        // Textures are provisioned eagerly, the mesh is not.
        let sprite = manager.get("a").unwrap();
        assert!(sprite.textures_ready());
        assert!(sprite.mesh().is_none());
        let loads_before = manager.backend().loads.len();

        let edit = SceneConfig::new()
            .with("a", SpriteConfig { visible: Some(true), ..sprite_config() });
        block_on(manager.update_from_config(&edit)).unwrap();

        let sprite = manager.get("a").unwrap();
        assert!(sprite.mesh().is_some());
        // Mesh creation reused the already-loaded textures.
        assert_eq!(manager.backend().loads.len(), loads_before);
    }

    #[test]
    fn hiding_a_sprite_keeps_its_mesh() {
        let mut manager = manager_with_textures();
        block_on(manager.load_scene(&single_sprite_scene())).unwrap();

        let edit = SceneConfig::new()
            .with("a", SpriteConfig { visible: Some(false), ..sprite_config() });
        block_on(manager.update_from_config(&edit)).unwrap();

        let mesh = manager.get("a").unwrap().mesh().unwrap();
        assert!(!mesh.visible);
        assert_eq!(manager.backend().meshes_destroyed, 0);
    }

    #[test]
    fn normal_toggle_rewrites_uniform_without_mesh_recreation() {
        let mut manager = manager_with_textures();
        let scene = SceneConfig::new().with(
            "a",
            SpriteConfig { normal: Some("n.png".to_owned()), ..sprite_config() },
        );
        block_on(manager.load_scene(&scene)).unwrap();
        assert!(matches!(
            manager.get("a").unwrap().mesh().unwrap().uniforms.get(U_NORMAL),
            Some(UniformValue::Texture(TestTexture::File { path, .. })) if path == "n.png"
        ));

        let edit = SceneConfig::new().with(
            "a",
            SpriteConfig {
                normal: Some("n.png".to_owned()),
                use_normal_map: Some(false),
                ..sprite_config()
            },
        );
        block_on(manager.update_from_config(&edit)).unwrap();

        let mesh = manager.get("a").unwrap().mesh().unwrap();
        assert!(matches!(
            mesh.uniforms.get(U_NORMAL),
            Some(UniformValue::Texture(TestTexture::Solid { rgba, .. }))
                if *rgba == FLAT_NORMAL_RGBA
        ));
        assert_eq!(manager.backend().meshes_created, 1);
    }

    #[test]
    fn image_change_reprovisions_the_sprite() {
        let mut manager = manager_with_textures();
        block_on(manager.load_scene(&single_sprite_scene())).unwrap();

        let edit = SceneConfig::new().with(
            "a",
            SpriteConfig {
                position: Some(Vec2::new(10.0, 20.0)),
                ..SpriteConfig::new("y.png")
            },
        );
        block_on(manager.update_from_config(&edit)).unwrap();

        let backend = manager.backend();
        assert_eq!(backend.meshes_destroyed, 1);
        assert_eq!(backend.meshes_created, 2);

        // y.png is 8x8: the rebuilt quad reflects the new dimensions.
        let mesh = manager.get("a").unwrap().mesh().unwrap();
        assert_eq!(mesh.geometry.vertices[2].pos, [18.0, 28.0]);
    }

    #[test]
    fn new_keys_are_created_by_update() {
        let mut manager = manager_with_textures();
        block_on(manager.load_scene(&single_sprite_scene())).unwrap();

        let edit = single_sprite_scene().with("b", sprite_config());
        block_on(manager.update_from_config(&edit)).unwrap();

        assert_eq!(manager.len(), 2);
        assert!(manager.get("b").unwrap().mesh().is_some());
    }

    // ── removal policy ────────────────────────────────────────────────────

    #[test]
    fn stale_keys_survive_updates() {
        let mut manager = manager_with_textures();
        let scene = SceneConfig::new()
            .with("a", sprite_config())
            .with("b", sprite_config());
        block_on(manager.load_scene(&scene)).unwrap();

        // "b" disappeared from the edited config; it must stay live.
        let edit = SceneConfig::new()
            .with("a", SpriteConfig { z_order: Some(1), ..sprite_config() });
        block_on(manager.update_from_config(&edit)).unwrap();
        assert_eq!(manager.len(), 2);
        assert!(manager.get("b").is_some());

        // Removal only on explicit request.
        assert_eq!(manager.prune_missing(&edit), 1);
        assert_eq!(manager.len(), 1);
        assert!(manager.get("b").is_none());
        assert_eq!(manager.backend().meshes_destroyed, 1);
    }

    #[test]
    fn clear_destroys_every_mesh() {
        let mut manager = manager_with_textures();
        let scene = SceneConfig::new()
            .with("a", sprite_config())
            .with("b", sprite_config());
        block_on(manager.load_scene(&scene)).unwrap();

        manager.clear();
        assert!(manager.is_empty());
        assert_eq!(manager.backend().meshes_destroyed, 2);
    }

    // ── cancellation ──────────────────────────────────────────────────────

    #[test]
    fn dropped_load_is_picked_up_by_the_next_flush() {
        let mut manager = manager_with_textures();
        let gate = manager.backend().gate.clone();
        gate.set(false);

        let config = SceneConfig::new().with("a", sprite_config());
        {
            let mut load = Box::pin(manager.load_scene(&config));
            let mut cx = Context::from_waker(Waker::noop());
            assert!(load.as_mut().poll(&mut cx).is_pending());
        }

        // The key is registered, provisioning is still owed.
        assert_eq!(manager.len(), 1);
        assert!(manager.get("a").unwrap().mesh().is_none());

        gate.set(true);
        block_on(manager.flush_pending()).unwrap();
        assert!(manager.get("a").unwrap().mesh().is_some());
        // One attempt before the drop, one on retry.
        assert_eq!(manager.backend().loads, ["x.png", "x.png"]);
    }

    // ── hooks ─────────────────────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingHooks {
        transforms: Vec<String>,
        z_orders: Vec<(String, i32)>,
        visibility: Vec<(String, bool)>,
        normals: Vec<String>,
    }

    impl SceneHooks for RecordingHooks {
        fn transform_changed(&mut self, key: &str) {
            self.transforms.push(key.to_owned());
        }
        fn z_order_changed(&mut self, key: &str, z_order: i32) {
            self.z_orders.push((key.to_owned(), z_order));
        }
        fn visibility_changed(&mut self, key: &str, visible: bool) {
            self.visibility.push((key.to_owned(), visible));
        }
        fn normal_map_changed(&mut self, key: &str) {
            self.normals.push(key.to_owned());
        }
    }

    #[test]
    fn hooks_fire_synchronously_per_changed_field() {
        let backend = crate::scene::testutil::TestBackend::with_textures(&[("x.png", (4, 4))]);
        let mut manager =
            SceneManager::with_hooks(backend, test_shader(), RecordingHooks::default());
        block_on(manager.load_scene(&SceneConfig::new().with("a", sprite_config()))).unwrap();

        let edit = SceneConfig::new().with(
            "a",
            SpriteConfig {
                position: Some(Vec2::new(1.0, 1.0)),
                z_order: Some(9),
                visible: Some(false),
                use_normal_map: Some(false),
                ..sprite_config()
            },
        );
        block_on(manager.update_from_config(&edit)).unwrap();

        let hooks = manager.hooks();
        assert_eq!(hooks.transforms, ["a"]);
        assert_eq!(hooks.z_orders, [("a".to_owned(), 9)]);
        assert_eq!(hooks.visibility, [("a".to_owned(), false)]);
        assert_eq!(hooks.normals, ["a"]);
    }

    #[test]
    fn image_change_still_reports_other_edits_to_hooks() {
        let backend = crate::scene::testutil::TestBackend::with_textures(&[
            ("x.png", (4, 4)),
            ("y.png", (2, 2)),
        ]);
        let mut manager =
            SceneManager::with_hooks(backend, test_shader(), RecordingHooks::default());
        block_on(manager.load_scene(&SceneConfig::new().with("a", sprite_config()))).unwrap();

        // One edit swaps the image AND moves/re-depths the sprite; the
        // re-provisioning path must not swallow the field notifications.
        let edit = SceneConfig::new().with(
            "a",
            SpriteConfig {
                position: Some(Vec2::new(2.0, 2.0)),
                z_order: Some(7),
                visible: Some(false),
                ..SpriteConfig::new("y.png")
            },
        );
        block_on(manager.update_from_config(&edit)).unwrap();

        let hooks = manager.hooks();
        assert_eq!(hooks.transforms, ["a"]);
        assert_eq!(hooks.z_orders, [("a".to_owned(), 7)]);
        assert_eq!(hooks.visibility, [("a".to_owned(), false)]);
    }

    // ── persistence ───────────────────────────────────────────────────────

    #[test]
    fn exported_config_reapplies_as_a_no_op() {
        let mut manager = manager_with_textures();
        block_on(manager.load_scene(&single_sprite_scene())).unwrap();

        let exported = manager.export_config();
        let sprite = exported.get("a").unwrap();
        assert_eq!(sprite.image, "x.png");
        assert_eq!(sprite.position, Some(Vec2::new(10.0, 20.0)));
        assert_eq!(sprite.visible, Some(true));

        let counters = (
            manager.backend().geometry_writes,
            manager.backend().uniform_writes,
            manager.backend().sort_calls,
        );
        block_on(manager.update_from_config(&exported)).unwrap();
        assert_eq!(
            counters,
            (
                manager.backend().geometry_writes,
                manager.backend().uniform_writes,
                manager.backend().sort_calls,
            )
        );
    }
}
