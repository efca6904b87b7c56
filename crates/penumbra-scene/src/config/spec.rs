use crate::coords::Vec2;
use crate::geometry::Pivot;

use super::SpriteConfig;

/// Fully normalized sprite definition: every field present.
///
/// `normal` is either a valid path or the empty string (empty means
/// "synthesize a flat normal"). `scale > 0` is expected but not enforced
/// here; upstream validation owns that.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSpec {
    pub image: String,
    pub normal: String,
    pub position: Vec2,
    pub rotation: f32,
    pub scale: f32,
    pub z_order: i32,
    pub casts_shadows: bool,
    pub visible: bool,
    pub use_normal_map: bool,
    pub pivot: Pivot,
}

/// Which aspects of a spec a merge actually changed.
///
/// Flags are value-compared: writing a field back to its current value
/// reports no change, which is what makes reconciliation idempotent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecDelta {
    /// Position, rotation, scale, or pivot changed: geometry must rebuild.
    pub transform: bool,
    /// Normal path or the `use_normal_map` switch changed: the normal
    /// texture must be re-resolved.
    pub normal_map: bool,
    /// Draw depth changed: the container owes a re-sort.
    pub z_order: bool,
    pub visibility: bool,
    /// Diffuse path changed: textures and mesh must be re-provisioned.
    pub image: bool,
    /// Shadow participation changed. Query views read this fresh, so no
    /// render-state patch is needed.
    pub shadows: bool,
}

impl SpecDelta {
    pub fn any(self) -> bool {
        self.transform
            || self.normal_map
            || self.z_order
            || self.visibility
            || self.image
            || self.shadows
    }
}

impl SpriteSpec {
    /// Normalizes a raw declaration, filling defaults for absent fields.
    ///
    /// Pure transform; malformed numeric values pass through uninspected.
    pub fn from_config(config: &SpriteConfig) -> Self {
        Self {
            image: config.image.clone(),
            normal: config.normal.clone().unwrap_or_default(),
            position: config.position.unwrap_or(Vec2::zero()),
            rotation: config.rotation.unwrap_or(0.0),
            scale: config.scale.unwrap_or(1.0),
            z_order: config.z_order.unwrap_or(0),
            casts_shadows: config.casts_shadows.unwrap_or(true),
            visible: config.visible.unwrap_or(true),
            use_normal_map: config.use_normal_map.unwrap_or(true),
            pivot: config.pivot.unwrap_or_default(),
        }
    }

    /// Shallow per-field merge: fields present in `config` overwrite, absent
    /// fields keep their current values. Returns what actually changed.
    pub fn merge(&mut self, config: &SpriteConfig) -> SpecDelta {
        let mut delta = SpecDelta::default();

        if config.image != self.image {
            self.image = config.image.clone();
            delta.image = true;
        }
        if let Some(normal) = &config.normal
            && *normal != self.normal
        {
            self.normal = normal.clone();
            delta.normal_map = true;
        }
        if let Some(use_normal_map) = config.use_normal_map
            && use_normal_map != self.use_normal_map
        {
            self.use_normal_map = use_normal_map;
            delta.normal_map = true;
        }
        if let Some(position) = config.position
            && position != self.position
        {
            self.position = position;
            delta.transform = true;
        }
        if let Some(rotation) = config.rotation
            && rotation != self.rotation
        {
            self.rotation = rotation;
            delta.transform = true;
        }
        if let Some(scale) = config.scale
            && scale != self.scale
        {
            self.scale = scale;
            delta.transform = true;
        }
        if let Some(pivot) = config.pivot
            && pivot != self.pivot
        {
            self.pivot = pivot;
            delta.transform = true;
        }
        if let Some(z_order) = config.z_order
            && z_order != self.z_order
        {
            self.z_order = z_order;
            delta.z_order = true;
        }
        if let Some(visible) = config.visible
            && visible != self.visible
        {
            self.visible = visible;
            delta.visibility = true;
        }
        if let Some(casts_shadows) = config.casts_shadows
            && casts_shadows != self.casts_shadows
        {
            self.casts_shadows = casts_shadows;
            delta.shadows = true;
        }

        delta
    }

    /// Exports the spec as a fully-populated declaration, for persistence.
    pub fn to_config(&self) -> SpriteConfig {
        SpriteConfig {
            image: self.image.clone(),
            normal: if self.normal.is_empty() {
                None
            } else {
                Some(self.normal.clone())
            },
            position: Some(self.position),
            rotation: Some(self.rotation),
            scale: Some(self.scale),
            z_order: Some(self.z_order),
            casts_shadows: Some(self.casts_shadows),
            visible: Some(self.visible),
            use_normal_map: Some(self.use_normal_map),
            pivot: Some(self.pivot),
        }
    }

    /// Quad size in world pixels for a diffuse texture of the given
    /// dimensions.
    pub fn world_size(&self, texture_size: (u32, u32)) -> Vec2 {
        Vec2::new(
            texture_size.0 as f32 * self.scale,
            texture_size.1 as f32 * self.scale,
        )
    }
}
