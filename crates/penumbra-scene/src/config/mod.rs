//! Scene configuration schema and normalization.
//!
//! The wire shape (JSON, camelCase) is what the editor panels and the
//! persistence layer exchange; it is deliberately partial. Normalization
//! fills every gap with a default, producing the [`SpriteSpec`] the rest of
//! the core operates on. Validation of field *values* is a collaborator's
//! job — this layer assumes well-formed input.

mod sprite;
mod spec;

pub use sprite::{SceneConfig, SpriteConfig};
pub use spec::{SpecDelta, SpriteSpec};
