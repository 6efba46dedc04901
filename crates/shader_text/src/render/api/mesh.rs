//! Mesh consumer abstraction for glyph quads
//!
//! The layout engine only produces [`QuadGeometry`]; turning it into
//! vertices and triangles belongs to whoever owns the mesh. [`QuadMesh`] is
//! the stock consumer producing an indexed triangle list ready for upload.

use crate::foundation::math::{Vec3, Vec4};
use crate::render::text::QuadGeometry;

/// Corner triplets of the two triangles making up a quad
pub const QUAD_TRIANGLES: [[u32; 3]; 2] = [[0, 1, 2], [0, 2, 3]];

/// Vertex data for glyph quads
///
/// `uv.xy` is the glyph-local coordinate, `uv.z` the slot index the shader
/// uses to read the glyph index buffer. All four vertices of a quad share
/// the same slot.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    /// Position in local space
    pub position: [f32; 3],
    /// Vertex colour (RGBA)
    pub color: [f32; 4],
    /// Glyph-local UV in xy, slot index in z, w unused
    pub uv: [f32; 4],
}

// Safe to implement Pod and Zeroable for QuadVertex since it only contains f32 arrays
unsafe impl bytemuck::Pod for QuadVertex {}
unsafe impl bytemuck::Zeroable for QuadVertex {}

impl QuadVertex {
    /// Expand a quad into its four vertices, in corner order
    pub fn from_quad(quad: &QuadGeometry, color: Vec4) -> [Self; 4] {
        let color: [f32; 4] = color.into();
        let slot = quad.slot as f32;
        std::array::from_fn(|corner| {
            let corner_position = quad.corners[corner];
            let position = Vec3::new(corner_position.x, corner_position.y, 0.0);
            let [u, v] = quad.local_uvs[corner];
            Self {
                position: position.into(),
                color,
                uv: [u, v, slot, 0.0],
            }
        })
    }

    /// Slot index carried by this vertex
    pub fn slot(&self) -> u32 {
        self.uv[2] as u32
    }
}

/// Receiver of laid-out glyph quads
pub trait MeshConsumer {
    /// Drop any previously received geometry
    fn clear(&mut self);

    /// Append one quad
    fn push_quad(&mut self, quad: &QuadGeometry, color: Vec4);
}

/// Indexed triangle mesh built from glyph quads
#[derive(Debug, Clone, Default)]
pub struct QuadMesh {
    vertices: Vec<QuadVertex>,
    indices: Vec<u32>,
}

impl QuadMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices, four per quad
    pub fn vertices(&self) -> &[QuadVertex] {
        &self.vertices
    }

    /// Triangle indices, six per quad
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of quads in the mesh
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Vertex data as bytes for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as bytes for GPU upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl MeshConsumer for QuadMesh {
    fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    fn push_quad(&mut self, quad: &QuadGeometry, color: Vec4) {
        let base_index = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&QuadVertex::from_quad(quad, color));
        for triangle in QUAD_TRIANGLES {
            self.indices.extend(triangle.iter().map(|corner| base_index + corner));
        }
    }
}
