//! Quad layout for glyph slots
//!
//! Lays out one fixed-size quad per slot inside a bounding rectangle. Quads
//! do not depend on the text: slot `i` always gets the `i`-th quad and the
//! shader picks the glyph by reading slot `i` of the index buffer.
//!
//! # Layout Coordinate System
//!
//! - Origin is wherever the host's rectangle puts it
//! - +X axis points right
//! - +Y axis points up

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Quads may overhang the right edge by this much before being dropped
///
/// Absorbs float rounding when the content fits the rectangle exactly.
pub const OVERFLOW_TOLERANCE: f32 = 0.5;

/// Smallest character width or height accepted by [`LayoutParams::clamped`]
pub const MIN_CHARACTER_SIZE: f32 = 1.0;

/// Glyph-local UV of each quad corner, in corner order
pub const QUAD_LOCAL_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlign {
    /// Content starts at the left edge
    Left,
    /// Content is centred
    Center,
    /// Content ends at the right edge
    Right,
}

/// Vertical text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlign {
    /// Glyphs sit on the bottom edge
    Lower,
    /// Glyphs are centred vertically
    Middle,
    /// Glyphs hang from the top edge
    Upper,
}

/// Anchor of the text block inside its rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAnchor {
    /// Top-left corner
    #[default]
    UpperLeft,
    /// Top edge, centred
    UpperCenter,
    /// Top-right corner
    UpperRight,
    /// Left edge, centred
    MiddleLeft,
    /// Centre of the rectangle
    MiddleCenter,
    /// Right edge, centred
    MiddleRight,
    /// Bottom-left corner
    LowerLeft,
    /// Bottom edge, centred
    LowerCenter,
    /// Bottom-right corner
    LowerRight,
}

impl TextAnchor {
    /// Horizontal component of the anchor
    pub const fn horizontal(self) -> HorizontalAlign {
        match self {
            Self::UpperLeft | Self::MiddleLeft | Self::LowerLeft => HorizontalAlign::Left,
            Self::UpperCenter | Self::MiddleCenter | Self::LowerCenter => HorizontalAlign::Center,
            Self::UpperRight | Self::MiddleRight | Self::LowerRight => HorizontalAlign::Right,
        }
    }

    /// Vertical component of the anchor
    pub const fn vertical(self) -> VerticalAlign {
        match self {
            Self::UpperLeft | Self::UpperCenter | Self::UpperRight => VerticalAlign::Upper,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => VerticalAlign::Middle,
            Self::LowerLeft | Self::LowerCenter | Self::LowerRight => VerticalAlign::Lower,
        }
    }

    /// Anchor from its two components
    pub const fn from_parts(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        match (vertical, horizontal) {
            (VerticalAlign::Upper, HorizontalAlign::Left) => Self::UpperLeft,
            (VerticalAlign::Upper, HorizontalAlign::Center) => Self::UpperCenter,
            (VerticalAlign::Upper, HorizontalAlign::Right) => Self::UpperRight,
            (VerticalAlign::Middle, HorizontalAlign::Left) => Self::MiddleLeft,
            (VerticalAlign::Middle, HorizontalAlign::Center) => Self::MiddleCenter,
            (VerticalAlign::Middle, HorizontalAlign::Right) => Self::MiddleRight,
            (VerticalAlign::Lower, HorizontalAlign::Left) => Self::LowerLeft,
            (VerticalAlign::Lower, HorizontalAlign::Center) => Self::LowerCenter,
            (VerticalAlign::Lower, HorizontalAlign::Right) => Self::LowerRight,
        }
    }
}

/// Axis-aligned rectangle available for glyph placement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutRect {
    /// Minimum X coordinate
    pub left: f32,
    /// Minimum Y coordinate
    pub bottom: f32,
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl LayoutRect {
    /// Create a rectangle from its bottom-left corner and size
    pub const fn new(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self { left, bottom, width, height }
    }

    /// Create a rectangle of `size` centred on `center`
    ///
    /// Matches how UI rect transforms with a centred pivot report their rect.
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x * 0.5, center.y - size.y * 0.5, size.x, size.y)
    }

    /// Maximum X coordinate
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Maximum Y coordinate
    pub fn top(&self) -> f32 {
        self.bottom + self.height
    }
}

/// Per-glyph metrics, alignment and slot count driving the layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Width of one glyph quad
    pub character_width: f32,
    /// Height of one glyph quad
    pub character_height: f32,
    /// Gap between adjacent quads
    pub character_spacing: f32,
    /// Where the text block sits inside the rectangle
    pub alignment: TextAnchor,
    /// Number of slots to lay out
    pub capacity: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            character_width: 14.0,
            character_height: 24.0,
            character_spacing: 2.0,
            alignment: TextAnchor::default(),
            capacity: 16,
        }
    }
}

impl LayoutParams {
    /// Distance from one quad's left edge to the next
    pub fn advance(&self) -> f32 {
        self.character_width + self.character_spacing
    }

    /// Width of all `capacity` quads, without trailing spacing
    pub fn content_width(&self) -> f32 {
        self.capacity as f32 * self.advance() - self.character_spacing
    }

    /// Copy with sizes and capacity forced into their valid ranges
    ///
    /// Width and height are at least [`MIN_CHARACTER_SIZE`], spacing is
    /// non-negative and capacity is at least one. NaN is treated as the
    /// minimum.
    pub fn clamped(self) -> Self {
        Self {
            character_width: self.character_width.max(MIN_CHARACTER_SIZE),
            character_height: self.character_height.max(MIN_CHARACTER_SIZE),
            character_spacing: self.character_spacing.max(0.0),
            alignment: self.alignment,
            capacity: self.capacity.max(1),
        }
    }
}

/// Geometry of one glyph quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadGeometry {
    /// Corners: bottom-left, top-left, top-right, bottom-right
    pub corners: [Vec2; 4],
    /// Glyph-local UV per corner, (0,0) bottom-left to (1,1) top-right
    pub local_uvs: [[f32; 2]; 4],
    /// Slot of the index buffer this quad samples
    pub slot: u32,
}

impl QuadGeometry {
    fn new(x0: f32, y0: f32, x1: f32, y1: f32, slot: u32) -> Self {
        Self {
            corners: [
                Vec2::new(x0, y0),
                Vec2::new(x0, y1),
                Vec2::new(x1, y1),
                Vec2::new(x1, y0),
            ],
            local_uvs: QUAD_LOCAL_UVS,
            slot,
        }
    }

    /// Bottom-left corner
    pub fn min(&self) -> Vec2 {
        self.corners[0]
    }

    /// Top-right corner
    pub fn max(&self) -> Vec2 {
        self.corners[2]
    }
}

/// Stateless slot-quad layout
pub struct QuadLayoutEngine;

impl QuadLayoutEngine {
    /// Lay out quads for `params` inside `rect`
    pub fn layout(rect: &LayoutRect, params: &LayoutParams) -> Vec<QuadGeometry> {
        let mut quads = Vec::with_capacity(params.capacity);
        Self::layout_into(rect, params, &mut quads);
        quads
    }

    /// Lay out into an existing vector, replacing its contents
    ///
    /// Returns the number of quads emitted. Emission stops at the first quad
    /// whose right edge passes `rect.right() + OVERFLOW_TOLERANCE`; every
    /// later slot would overflow too.
    pub fn layout_into(rect: &LayoutRect, params: &LayoutParams, quads: &mut Vec<QuadGeometry>) -> usize {
        quads.clear();

        let advance = params.advance();
        let offset = Self::anchor_offset(rect, params);
        let limit = rect.right() + OVERFLOW_TOLERANCE;

        let y0 = rect.bottom + offset.y;
        let y1 = y0 + params.character_height;

        for slot in 0..params.capacity {
            let x0 = rect.left + offset.x + slot as f32 * advance;
            let x1 = x0 + params.character_width;
            if x1 > limit {
                break;
            }

            quads.push(QuadGeometry::new(x0, y0, x1, y1, slot as u32));
        }

        quads.len()
    }

    /// Offset of the first quad's bottom-left corner from the rect's bottom-left
    pub fn anchor_offset(rect: &LayoutRect, params: &LayoutParams) -> Vec2 {
        let x = match params.alignment.horizontal() {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => (rect.width - params.content_width()) * 0.5,
            HorizontalAlign::Right => rect.width - params.content_width(),
        };
        let y = match params.alignment.vertical() {
            VerticalAlign::Lower => 0.0,
            VerticalAlign::Middle => (rect.height - params.character_height) * 0.5,
            VerticalAlign::Upper => rect.height - params.character_height,
        };
        Vec2::new(x, y)
    }
}
