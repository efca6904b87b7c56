//! Mesh and shader assembly.
//!
//! The lighting/shadow program is opaque to this crate: callers hand over
//! vertex/fragment source plus whatever extra uniforms the program needs,
//! and the assembler merges in the sprite-intrinsic uniforms before the
//! backend composes everything into one drawable.

mod uniforms;

pub use uniforms::{
    U_DIFFUSE, U_NORMAL, U_WORLD_POSITION, U_WORLD_SIZE, UniformSet, UniformValue,
    assemble_uniforms,
};

use crate::geometry::QuadGeometry;

/// Opaque shader program injected at scene-manager construction.
///
/// Generic over the backend's texture handle so `extra_uniforms` can carry
/// texture-valued entries (e.g. a shared shadow map).
#[derive(Debug, Clone)]
pub struct ShaderProgram<T> {
    pub vertex_src: String,
    pub fragment_src: String,
    pub extra_uniforms: UniformSet<T>,
}

impl<T> ShaderProgram<T> {
    pub fn new(vertex_src: impl Into<String>, fragment_src: impl Into<String>) -> Self {
        Self {
            vertex_src: vertex_src.into(),
            fragment_src: fragment_src.into(),
            extra_uniforms: UniformSet::new(),
        }
    }

    /// Adds a caller-supplied uniform. Returns `self` for chaining.
    pub fn with_uniform(mut self, name: impl Into<String>, value: UniformValue<T>) -> Self {
        self.extra_uniforms.set(name, value);
        self
    }
}

/// Everything the backend needs to compose one drawable.
///
/// The drawable sits at the graphics-layer origin: the sprite's own offset
/// already lives inside the geometry, not in a separate transform.
pub struct MeshInit<'a, T> {
    pub geometry: &'a QuadGeometry,
    pub vertex_src: &'a str,
    pub fragment_src: &'a str,
    pub uniforms: UniformSet<T>,
    pub z_order: i32,
    pub visible: bool,
}
