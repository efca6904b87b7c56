use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coords::Vec2;
use crate::geometry::Pivot;

/// Raw, possibly-partial sprite declaration as edited and persisted.
///
/// Only `image` is required; any other field may be absent, in which case
/// normalization supplies the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteConfig {
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casts_shadows: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_normal_map: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<Pivot>,
}

impl SpriteConfig {
    /// Declaration with only the diffuse path set.
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            normal: None,
            position: None,
            rotation: None,
            scale: None,
            z_order: None,
            casts_shadows: None,
            visible: None,
            use_normal_map: None,
            pivot: None,
        }
    }
}

/// A full scene: sprite key → declaration.
///
/// Iteration order is deterministic (sorted by key); sprites are loaded and
/// reconciled in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneConfig {
    pub sprites: BTreeMap<String, SpriteConfig>,
}

impl SceneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a sprite declaration. Returns `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, sprite: SpriteConfig) -> Self {
        self.sprites.insert(key.into(), sprite);
        self
    }

    pub fn get(&self, key: &str) -> Option<&SpriteConfig> {
        self.sprites.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sprites.contains_key(key)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
