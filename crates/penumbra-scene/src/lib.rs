//! Penumbra scene crate.
//!
//! This crate owns the sprite composition core: turning a live-editable
//! scene configuration into textured, normal-mapped, depth-ordered quads,
//! and keeping an already-rendered scene in sync with edits without tearing
//! it down.
//!
//! The graphics API itself is a collaborator, not a dependency: hosts
//! implement [`backend::RenderBackend`] ("load a texture", "build a
//! drawable", "re-sort the draw order") and the core never touches GPU
//! state directly.

pub mod backend;
pub mod config;
pub mod coords;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod mesh;
pub mod scene;
pub mod texture;

pub use backend::RenderBackend;
pub use config::{SceneConfig, SpriteConfig, SpriteSpec};
pub use error::SceneError;
pub use scene::{NoHooks, SceneHooks, SceneManager, Sprite};
