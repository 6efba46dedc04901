//! Shader text renderer
//!
//! Host-side owner of one text label: keeps the glyph slots, the device
//! buffer they upload to and the cached quad layout in sync.
//!
//! Two ways to change the label:
//!
//! - [`set_text`](ShaderTextRenderer::set_text) re-encodes a whole string
//!   and uploads right away.
//! - The slot writes (`set_slot`, `write_int`, `formatter`, ...) only touch
//!   the CPU copy; call
//!   [`apply_pending_writes`](ShaderTextRenderer::apply_pending_writes) once
//!   the label is complete.
//!
//! # Example
//!
//! ```
//! use shader_text::core::ShaderTextConfig;
//! use shader_text::render::{HostBuffer, LayoutRect, QuadMesh, ShaderTextRenderer};
//!
//! let mut label: ShaderTextRenderer<HostBuffer> = ShaderTextRenderer::new(&ShaderTextConfig::default());
//! label.formatter().string("HP:").int(100).clear_rest();
//! label.apply_pending_writes();
//!
//! let mut mesh = QuadMesh::new();
//! let quads = label.populate_mesh(LayoutRect::new(0.0, 0.0, 400.0, 40.0), &mut mesh);
//! assert_eq!(quads, 16);
//! ```

use approx::relative_eq;

use super::alphabet::GlyphIndex;
use super::{LayoutParams, LayoutRect, QuadGeometry, QuadLayoutEngine, SlotBuffer, TextAnchor, TextFormatter};
use super::text_layout::MIN_CHARACTER_SIZE;
use crate::core::ShaderTextConfig;
use crate::foundation::math::Vec4;
use crate::render::api::{DeviceBuffer, HostBuffer, MeshConsumer};

/// A single line of glyph-indexed GPU text
pub struct ShaderTextRenderer<B: DeviceBuffer = HostBuffer> {
    /// Full assigned text, even when longer than the slot count
    text: String,
    slots: SlotBuffer,
    /// Absent when creation failed; uploads are skipped until recreated
    device: Option<B>,
    params: LayoutParams,
    color: Vec4,
    quads: Vec<QuadGeometry>,
    /// Inputs the cached `quads` were computed from
    layout_key: Option<(LayoutRect, LayoutParams)>,
}

impl<B: DeviceBuffer> ShaderTextRenderer<B> {
    /// Create a renderer and its device buffer from `config`
    ///
    /// Out-of-range configuration values are clamped. If the device buffer
    /// cannot be created the error is logged and the renderer keeps working
    /// without uploads.
    pub fn new(config: &ShaderTextConfig) -> Self {
        let params = config.layout_params();
        let device = create_device(params.capacity);
        Self::with_device(config, device)
    }

    /// Create a renderer around an existing device buffer
    ///
    /// The device must hold `max_characters` elements (after clamping) for
    /// uploads to succeed.
    pub fn with_device(config: &ShaderTextConfig, device: Option<B>) -> Self {
        let config = config.clone().validated();
        let params = config.layout_params();

        let mut renderer = Self {
            text: config.text,
            slots: SlotBuffer::with_min_capacity(params.capacity),
            device,
            params,
            color: Vec4::from(config.color),
            quads: Vec::with_capacity(params.capacity),
            layout_key: None,
        };
        renderer.apply_text_data();
        renderer
    }

    // === Text ===

    /// Currently assigned text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Assign the whole label and upload it
    ///
    /// Characters beyond the slot count are kept in [`text`](Self::text) but
    /// not drawn. Re-assigning the current text is a no-op unless slot writes
    /// happened since, in which case the slots are re-encoded.
    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
        }
        self.apply_text_data();
    }

    fn apply_text_data(&mut self) {
        self.slots.apply_text(&self.text);
        self.flush();
    }

    // === Slot writes ===

    /// Encode `c` into slot `index`; out-of-range indices are ignored
    pub fn set_slot(&mut self, index: isize, c: char) {
        self.slots.set_slot(index, c);
    }

    /// Store a raw glyph index into slot `index`
    pub fn set_glyph(&mut self, index: isize, glyph: GlyphIndex) {
        self.slots.set_glyph(index, glyph);
    }

    /// Blank the slots from `start` to the end
    pub fn clear_from(&mut self, start: isize) {
        self.slots.clear_from(start);
    }

    /// Write an integer at `offset`, returning its character count
    pub fn write_int(&mut self, value: i32, offset: isize) -> usize {
        self.slots.write_int(value, offset)
    }

    /// Write a float at `offset`, returning its character count
    pub fn write_float(&mut self, value: f32, decimals: u32, offset: isize) -> usize {
        self.slots.write_float(value, decimals, offset)
    }

    /// Write a string at `offset`, returning its character count
    pub fn write_string(&mut self, text: &str, offset: isize) -> usize {
        self.slots.write_string(text, offset)
    }

    /// Chained writer starting at slot 0
    pub fn formatter(&mut self) -> TextFormatter<'_> {
        TextFormatter::new(&mut self.slots)
    }

    /// Chained writer starting at `offset`
    pub fn formatter_at(&mut self, offset: isize) -> TextFormatter<'_> {
        TextFormatter::at(&mut self.slots, offset)
    }

    /// Upload pending slot writes
    ///
    /// Returns whether an upload happened. Upload failures are logged and
    /// leave the writes pending.
    pub fn apply_pending_writes(&mut self) -> bool {
        self.flush()
    }

    fn flush(&mut self) -> bool {
        match self.slots.flush(self.device.as_mut()) {
            Ok(uploaded) => uploaded,
            Err(e) => {
                log::error!("[ShaderText] Failed to upload glyph indices: {}", e);
                false
            }
        }
    }

    /// Glyph slots as last written
    pub fn slots(&self) -> &SlotBuffer {
        &self.slots
    }

    /// Whether slot writes are waiting for an upload
    pub fn has_pending_writes(&self) -> bool {
        self.slots.is_dirty()
    }

    /// Device buffer, if one exists
    pub fn device(&self) -> Option<&B> {
        self.device.as_ref()
    }

    // === Capacity ===

    /// Number of glyph slots
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Change the slot count, clamped to at least one
    ///
    /// Rebuilds the slot buffer and device buffer, then re-encodes the
    /// current text. Unflushed slot writes are lost.
    pub fn set_capacity(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        if capacity == self.slots.capacity() {
            return;
        }

        log::debug!("[ShaderText] Rebuilding glyph buffer for {} slots", capacity);
        if let Err(e) = self.slots.resize(capacity) {
            log::error!("[ShaderText] Failed to resize glyph slots: {}", e);
            return;
        }
        self.params.capacity = capacity;

        self.release();
        self.device = create_device(capacity);
        self.apply_text_data();
    }

    // === Layout parameters ===

    /// Width of one glyph quad
    pub fn character_width(&self) -> f32 {
        self.params.character_width
    }

    /// Set the glyph width, clamped to at least [`MIN_CHARACTER_SIZE`]
    pub fn set_character_width(&mut self, width: f32) {
        let width = width.max(MIN_CHARACTER_SIZE);
        if !relative_eq!(self.params.character_width, width) {
            self.params.character_width = width;
        }
    }

    /// Height of one glyph quad
    pub fn character_height(&self) -> f32 {
        self.params.character_height
    }

    /// Set the glyph height, clamped to at least [`MIN_CHARACTER_SIZE`]
    pub fn set_character_height(&mut self, height: f32) {
        let height = height.max(MIN_CHARACTER_SIZE);
        if !relative_eq!(self.params.character_height, height) {
            self.params.character_height = height;
        }
    }

    /// Gap between glyph quads
    pub fn character_spacing(&self) -> f32 {
        self.params.character_spacing
    }

    /// Set the gap between glyph quads, clamped to be non-negative
    pub fn set_character_spacing(&mut self, spacing: f32) {
        let spacing = spacing.max(0.0);
        if !relative_eq!(self.params.character_spacing, spacing) {
            self.params.character_spacing = spacing;
        }
    }

    /// Anchor of the text inside its rectangle
    pub fn alignment(&self) -> TextAnchor {
        self.params.alignment
    }

    /// Set the anchor of the text inside its rectangle
    pub fn set_alignment(&mut self, alignment: TextAnchor) {
        self.params.alignment = alignment;
    }

    /// Vertex colour
    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// Set the vertex colour used by [`populate_mesh`](Self::populate_mesh)
    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    /// Current layout parameters
    pub fn layout_params(&self) -> LayoutParams {
        self.params
    }

    // === Geometry ===

    /// Quads for `rect`, recomputed only when the rect or parameters changed
    pub fn recompute_layout(&mut self, rect: LayoutRect) -> &[QuadGeometry] {
        let key = (rect, self.params);
        if self.layout_key != Some(key) {
            let count = QuadLayoutEngine::layout_into(&rect, &self.params, &mut self.quads);
            log::debug!(
                "[ShaderText] Laid out {}/{} slots in {}x{} rect",
                count,
                self.params.capacity,
                rect.width,
                rect.height
            );
            self.layout_key = Some(key);
        }
        &self.quads
    }

    /// Feed the quads for `rect` to `consumer`, replacing its contents
    ///
    /// Returns the number of quads emitted.
    pub fn populate_mesh(&mut self, rect: LayoutRect, consumer: &mut dyn MeshConsumer) -> usize {
        let color = self.color;
        consumer.clear();
        let quads = self.recompute_layout(rect);
        for quad in quads {
            consumer.push_quad(quad, color);
        }
        quads.len()
    }

    /// Number of slots that fit in `rect`
    pub fn visible_slot_count(&mut self, rect: LayoutRect) -> usize {
        self.recompute_layout(rect).len()
    }

    // === Lifecycle ===

    /// Release the device buffer
    ///
    /// Slot writes keep working but nothing is uploaded until the capacity
    /// changes or a new device is attached.
    pub fn release(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.release();
        }
    }

    /// Attach a device buffer and upload the current slots to it
    pub fn attach_device(&mut self, device: B) {
        self.release();
        self.device = Some(device);
        self.slots.mark_dirty();
        self.flush();
    }
}

impl<B: DeviceBuffer> Drop for ShaderTextRenderer<B> {
    fn drop(&mut self) {
        self.release();
    }
}

fn create_device<B: DeviceBuffer>(capacity: usize) -> Option<B> {
    match B::create(capacity, std::mem::size_of::<GlyphIndex>()) {
        Ok(device) => Some(device),
        Err(e) => {
            log::error!("[ShaderText] Failed to create glyph index buffer: {}", e);
            None
        }
    }
}
