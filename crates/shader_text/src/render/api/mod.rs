//! Collaborator interfaces of the text core
//!
//! Narrow traits the host injects: where glyph indices are uploaded and who
//! receives the quad geometry.

pub mod device_buffer;
pub mod mesh;

pub use device_buffer::{DeviceBuffer, DeviceBufferError, DeviceResult, HostBuffer};
pub use mesh::{MeshConsumer, QuadMesh, QuadVertex, QUAD_TRIANGLES};
