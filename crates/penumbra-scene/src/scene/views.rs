//! Derived read-only views over the live sprite set.
//!
//! Both views are evaluated fresh on every call; nothing is cached, so
//! callers must re-query after mutating the scene.

use crate::backend::RenderBackend;

use super::hooks::SceneHooks;
use super::manager::SceneManager;
use super::sprite::Sprite;

impl<B: RenderBackend, H: SceneHooks> SceneManager<B, H> {
    /// Sprites that participate in shadow volumes: flagged as casters AND
    /// currently visible.
    pub fn shadow_casters(&self) -> impl Iterator<Item = &Sprite<B::Texture, B::Mesh>> {
        self.sprites().filter(|sprite| sprite.is_shadow_caster())
    }

    /// All sprites, back-to-front: ascending z-order, registration order
    /// breaking ties.
    pub fn sprites_by_z_order(&self) -> Vec<&Sprite<B::Texture, B::Mesh>> {
        let mut sorted: Vec<_> = self.sprites().collect();
        sorted.sort_by_key(|sprite| sprite.sort_key());
        sorted
    }
}
