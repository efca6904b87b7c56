//! Texture and normal-map provisioning.
//!
//! Diffuse textures always come from the backend by path. Normal textures
//! come from a path only when the sprite both supplies one and has normal
//! mapping enabled; in every other case a 1×1 flat-normal texture is
//! synthesized so the lighting shader can sample unconditionally.

use crate::backend::RenderBackend;
use crate::config::SpriteSpec;
use crate::error::SceneError;

/// RGBA encoding of the unit +Z normal (0,0,1): each component mapped from
/// [-1,1] to 8-bit, alpha opaque.
pub const FLAT_NORMAL_RGBA: [u8; 4] = [128, 128, 255, 255];

/// Where a sprite's normal texture comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalSource {
    /// A real normal map resolved from this path.
    Path(String),
    /// Synthesized 1×1 flat normal: no map supplied, or mapping disabled.
    Flat,
}

impl NormalSource {
    /// Derives the source a spec currently calls for.
    pub fn for_spec(spec: &SpriteSpec) -> Self {
        if spec.use_normal_map && !spec.normal.is_empty() {
            NormalSource::Path(spec.normal.clone())
        } else {
            NormalSource::Flat
        }
    }
}

/// Resolves a normal texture from its source.
///
/// Path resolution waits on the backend and propagates its failure; the
/// flat fallback is synchronous and infallible.
pub async fn resolve_normal<B: RenderBackend>(
    backend: &mut B,
    source: &NormalSource,
) -> Result<B::Texture, SceneError> {
    match source {
        NormalSource::Path(path) => backend.load_texture(path).await,
        NormalSource::Flat => Ok(backend.solid_texture(FLAT_NORMAL_RGBA)),
    }
}
