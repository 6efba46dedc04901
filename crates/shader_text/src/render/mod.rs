//! Rendering module
//!
//! Text core plus the collaborator interfaces it renders through.

pub mod api;
pub mod text;

pub use api::{DeviceBuffer, HostBuffer, MeshConsumer, QuadMesh, QuadVertex};
pub use text::{
    LayoutParams, LayoutRect, QuadGeometry, QuadLayoutEngine, ShaderTextRenderer, SlotBuffer,
    TextAnchor, TextFormatter,
};
