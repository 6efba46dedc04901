//! Shader text system
//!
//! Glyph alphabet, slot buffer, allocation-free formatting, quad layout and
//! the renderer tying them together.

pub mod alphabet;
pub mod slot_buffer;
pub mod formatter;
pub mod text_layout;
pub mod text_renderer;

#[cfg(test)]
mod tests;

pub use alphabet::{GlyphIndex, BLANK, GLYPH_COUNT};
pub use slot_buffer::*;
pub use formatter::*;
pub use text_layout::*;
pub use text_renderer::*;
