//! Live scene state.
//!
//! Responsibilities:
//! - own the key → sprite mapping and every sprite's render resources
//! - load a configuration wholesale and reconcile edits incrementally
//! - provide deterministic draw ordering (z-order + insertion order)
//! - expose the derived read-only views (shadow casters, z-sorted sequence)

mod hooks;
mod key;
mod manager;
mod sprite;
#[cfg(test)]
pub(crate) mod testutil;
mod views;

pub use hooks::{NoHooks, SceneHooks};
pub use key::SortKey;
pub use manager::SceneManager;
pub use sprite::Sprite;
