use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;

use super::Pivot;

/// Triangle indices shared by every sprite quad: (0,1,2) and (0,2,3).
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// UV corners in vertex order (top-left, top-right, bottom-right,
/// bottom-left), spanning [0,1]×[0,1].
const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// One sprite vertex: world position + texture coordinate.
///
/// `Pod` so hosts can hand the vertex array straight to a GPU buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

/// World-space quad for one sprite.
///
/// Vertex order is fixed: top-left, top-right, bottom-right, bottom-left.
/// Index with [`QUAD_INDICES`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuadGeometry {
    pub vertices: [QuadVertex; 4],
}

impl QuadGeometry {
    /// Builds the quad for a sprite of `size` world pixels.
    ///
    /// Each corner is shifted so the pivot sits at the origin, rotated by
    /// `rotation` radians (x' = x·cosθ − y·sinθ, y' = x·sinθ + y·cosθ),
    /// then translated by `position + pivot`. Rotation therefore happens
    /// about the configured pivot, not the top-left corner; at zero
    /// rotation the top-left vertex lands exactly on `position`.
    pub fn build(size: Vec2, position: Vec2, rotation: f32, pivot: Pivot) -> Self {
        let pivot_local = pivot.local_point(size);
        let corners = [
            Vec2::zero(),
            Vec2::new(size.x, 0.0),
            Vec2::new(size.x, size.y),
            Vec2::new(0.0, size.y),
        ];

        let mut vertices = [QuadVertex { pos: [0.0; 2], uv: [0.0; 2] }; 4];
        for (i, corner) in corners.into_iter().enumerate() {
            let world = (corner - pivot_local).rotated(rotation) + position + pivot_local;
            vertices[i] = QuadVertex {
                pos: [world.x, world.y],
                uv: QUAD_UVS[i],
            };
        }

        Self { vertices }
    }

    /// World position of the top-left vertex.
    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.vertices[0].pos[0], self.vertices[0].pos[1])
    }
}
