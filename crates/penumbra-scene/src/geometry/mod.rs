//! Sprite quad geometry.
//!
//! Responsibilities:
//! - map a sprite transform (position, rotation, scale, pivot) to four
//!   world-space vertices
//! - keep the vertex layout GPU-uploadable (`bytemuck::Pod`)
//! - resolve pivot presets and explicit offsets into local coordinates
//!
//! Geometry is always rebuilt wholesale on a transform change; there is no
//! incremental vertex patching.

mod pivot;
mod quad;

pub use pivot::{Pivot, PivotAnchor};
pub use quad::{QUAD_INDICES, QuadGeometry, QuadVertex};
