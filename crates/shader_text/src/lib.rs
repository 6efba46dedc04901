//! # Shader Text
//!
//! Allocation-free HUD text for GPU renderers. Text is encoded into a small
//! buffer of glyph indices that a fragment shader reads per quad, so a label
//! that changes every frame costs one tiny upload and no mesh rebuild.
//!
//! ## Features
//!
//! - **Glyph Alphabet**: 40 glyphs (`0-9 A-Z SPACE : . -`) with a blank sentinel
//! - **Slot Buffer**: dirty-tracked glyph slots flushed to a device buffer
//! - **Formatter**: integers, floats and strings written without allocating
//! - **Quad Layout**: one quad per slot, anchored in a rectangle
//! - **Configuration**: TOML and RON via serde
//!
//! ## Quick Start
//!
//! ```rust
//! use shader_text::prelude::*;
//!
//! let config = ShaderTextConfig::default().with_text("SCORE:0");
//! let mut label: ShaderTextRenderer<HostBuffer> = ShaderTextRenderer::new(&config);
//!
//! label.formatter_at(6).int(1250).clear_rest();
//! label.apply_pending_writes();
//! assert_eq!(label.slots().to_string().trim_end(), "SCORE:1250");
//!
//! let mut mesh = QuadMesh::new();
//! label.populate_mesh(LayoutRect::new(0.0, 0.0, 320.0, 32.0), &mut mesh);
//! assert_eq!(mesh.quad_count(), 16);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod render;
pub mod ui;

/// Common imports for shader text users
pub mod prelude {
    pub use crate::{
        core::{Config, ConfigError, HudConfig, PerformanceCounterConfig, ShaderTextConfig},
        foundation::{
            math::{Vec2, Vec3, Vec4},
            time::Timer,
        },
        render::{
            api::{DeviceBuffer, DeviceBufferError, HostBuffer, MeshConsumer, QuadMesh, QuadVertex},
            text::{
                GlyphIndex, LayoutParams, LayoutRect, QuadGeometry, QuadLayoutEngine, ShaderTextRenderer,
                SlotBuffer, TextAnchor, TextFormatter, BLANK,
            },
        },
        ui::PerformanceCounter,
    };
}
