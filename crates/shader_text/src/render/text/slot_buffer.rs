//! Fixed-capacity glyph slot buffer
//!
//! CPU-side copy of the glyph indices the shader samples per quad. Tracks
//! whether the copy differs from what was last uploaded so the upload only
//! happens when something changed.

use std::fmt;

use super::alphabet::{self, GlyphIndex, BLANK};
use crate::render::api::{DeviceBuffer, DeviceResult};

/// Result type for slot buffer operations
pub type SlotResult<T> = Result<T, SlotBufferError>;

/// Errors that can occur when sizing a slot buffer
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SlotBufferError {
    /// Requested capacity was below one slot
    #[error("Invalid slot capacity {0}: at least one slot is required")]
    InvalidCapacity(usize),
}

/// Fixed-length sequence of glyph indices with dirty tracking
///
/// Every stored value is either a glyph in `0..40` or [`BLANK`]. Writes
/// outside the buffer are dropped without error so per-frame callers never
/// have to bounds-check.
#[derive(Debug, Clone)]
pub struct SlotBuffer {
    slots: Vec<GlyphIndex>,
    dirty: bool,
    /// Last string passed to `apply_text`, cleared by any other write
    last_applied: Option<String>,
}

impl SlotBuffer {
    /// Create a buffer of `capacity` blank slots
    ///
    /// The new buffer is dirty: it has never been uploaded.
    pub fn new(capacity: usize) -> SlotResult<Self> {
        if capacity == 0 {
            return Err(SlotBufferError::InvalidCapacity(capacity));
        }

        Ok(Self {
            slots: vec![BLANK; capacity],
            dirty: true,
            last_applied: None,
        })
    }

    /// Create a buffer, raising `capacity` to one slot if needed
    pub fn with_min_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![BLANK; capacity.max(1)],
            dirty: true,
            last_applied: None,
        }
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Current glyph indices
    pub fn slots(&self) -> &[GlyphIndex] {
        &self.slots
    }

    /// Glyph index at `index`, `None` when out of range
    pub fn get(&self, index: usize) -> Option<GlyphIndex> {
        self.slots.get(index).copied()
    }

    /// Whether the contents changed since the last flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the contents as needing an upload
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Last string applied with [`apply_text`](Self::apply_text), if still current
    pub fn last_applied(&self) -> Option<&str> {
        self.last_applied.as_deref()
    }

    /// Replace the buffer with `new_capacity` blank slots
    ///
    /// Previous contents, including unflushed writes, are discarded.
    pub fn resize(&mut self, new_capacity: usize) -> SlotResult<()> {
        if new_capacity == 0 {
            return Err(SlotBufferError::InvalidCapacity(new_capacity));
        }

        log::debug!("Resizing slot buffer {} -> {}", self.slots.len(), new_capacity);
        self.slots.clear();
        self.slots.resize(new_capacity, BLANK);
        self.last_applied = None;
        self.dirty = true;
        Ok(())
    }

    /// Encode `text` into the slots
    ///
    /// Characters past capacity are truncated, slots past the text are
    /// blanked. Applying the same string twice in a row is a no-op.
    pub fn apply_text(&mut self, text: &str) {
        if self.last_applied.as_deref() == Some(text) {
            return;
        }

        let mut chars = text.chars();
        for slot in &mut self.slots {
            *slot = chars.next().map_or(BLANK, alphabet::to_index);
        }

        match &mut self.last_applied {
            Some(previous) => {
                previous.clear();
                previous.push_str(text);
            }
            None => self.last_applied = Some(text.to_owned()),
        }
        self.dirty = true;
    }

    /// Encode a single character at `index`
    ///
    /// Out-of-range indices (including negative ones) are ignored.
    pub fn set_slot(&mut self, index: isize, c: char) {
        self.set_glyph(index, alphabet::to_index(c));
    }

    /// Store a raw glyph index at `index`
    ///
    /// Values outside the alphabet are stored as [`BLANK`]. Out-of-range
    /// indices are ignored.
    pub fn set_glyph(&mut self, index: isize, glyph: GlyphIndex) {
        let Some(slot) = usize::try_from(index).ok().and_then(|i| self.slots.get_mut(i)) else {
            return;
        };

        *slot = if alphabet::is_valid(glyph) { glyph } else { BLANK };
        self.last_applied = None;
        self.dirty = true;
    }

    /// Blank every slot from `start` (clamped to 0) to the end
    pub fn clear_from(&mut self, start: isize) {
        let start = usize::try_from(start).unwrap_or(0);
        if let Some(tail) = self.slots.get_mut(start..) {
            tail.fill(BLANK);
        }
        self.last_applied = None;
        self.dirty = true;
    }

    /// Blank every slot
    pub fn clear(&mut self) {
        self.clear_from(0);
    }

    /// Upload the slots if they changed since the last flush
    ///
    /// Returns `Ok(true)` when an upload happened. A missing device buffer
    /// is not an error: the buffer stays dirty until one is available. A
    /// failed upload also leaves the buffer dirty.
    pub fn flush<B>(&mut self, device: Option<&mut B>) -> DeviceResult<bool>
    where
        B: DeviceBuffer + ?Sized,
    {
        if !self.dirty {
            return Ok(false);
        }
        let Some(device) = device else {
            return Ok(false);
        };

        device.write(&self.slots)?;
        self.dirty = false;
        Ok(true)
    }
}

impl fmt::Display for SlotBuffer {
    /// Decoded contents, blanks rendered as spaces
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        for &glyph in &self.slots {
            f.write_char(alphabet::to_char(glyph).unwrap_or(' '))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::api::HostBuffer;

    fn flushed(capacity: usize) -> (SlotBuffer, HostBuffer) {
        let mut slots = SlotBuffer::new(capacity).unwrap();
        let mut device = HostBuffer::create(capacity, 1).unwrap();
        slots.flush(Some(&mut device)).unwrap();
        (slots, device)
    }

    #[test]
    fn test_new_buffer_is_blank_and_dirty() {
        let slots = SlotBuffer::new(4).unwrap();
        assert_eq!(slots.capacity(), 4);
        assert_eq!(slots.slots(), &[BLANK; 4]);
        assert!(slots.is_dirty());
        assert_eq!(slots.last_applied(), None);
    }

    #[test]
    fn test_min_capacity_clamps_to_one() {
        assert_eq!(SlotBuffer::with_min_capacity(0).capacity(), 1);
        assert_eq!(SlotBuffer::with_min_capacity(5).capacity(), 5);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(SlotBuffer::new(0).unwrap_err(), SlotBufferError::InvalidCapacity(0));
        let mut slots = SlotBuffer::new(2).unwrap();
        assert_eq!(slots.resize(0), Err(SlotBufferError::InvalidCapacity(0)));
        assert_eq!(slots.capacity(), 2);
    }

    #[test]
    fn test_apply_text_truncates() {
        let mut slots = SlotBuffer::new(4).unwrap();
        slots.apply_text("ABCDEFGH");
        assert_eq!(slots.slots(), &[10, 11, 12, 13]);
    }

    #[test]
    fn test_apply_text_pads_with_blank() {
        let mut slots = SlotBuffer::new(8).unwrap();
        slots.apply_text("AB");
        assert_eq!(slots.slots(), &[10, 11, BLANK, BLANK, BLANK, BLANK, BLANK, BLANK]);
    }

    #[test]
    fn test_apply_empty_text_is_all_blank() {
        let mut slots = SlotBuffer::new(4).unwrap();
        slots.apply_text("ABCD");
        slots.apply_text("");
        assert_eq!(slots.slots(), &[BLANK; 4]);
    }

    #[test]
    fn test_apply_mixed_content() {
        let mut slots = SlotBuffer::new(16).unwrap();
        slots.apply_text("HP:100 A-Z.");
        assert_eq!(&slots.slots()[..11], &[17, 25, 37, 1, 0, 0, 36, 10, 39, 35, 38]);
        assert_eq!(&slots.slots()[11..], &[BLANK; 5]);
    }

    #[test]
    fn test_apply_same_text_twice_keeps_clean_state() {
        let (mut slots, mut device) = flushed(4);
        slots.apply_text("ABC");
        assert!(slots.is_dirty());
        slots.flush(Some(&mut device)).unwrap();
        assert!(!slots.is_dirty());

        slots.apply_text("ABC");
        assert!(!slots.is_dirty(), "identical text must not re-dirty the buffer");
        assert_eq!(slots.last_applied(), Some("ABC"));
    }

    #[test]
    fn test_changed_text_updates_second_slot() {
        let mut slots = SlotBuffer::new(2).unwrap();
        slots.apply_text("AA");
        assert_eq!(slots.slots(), &[10, 10]);
        slots.apply_text("A0");
        assert_eq!(slots.slots(), &[10, 0]);
    }

    #[test]
    fn test_set_slot_writes_index() {
        let mut slots = SlotBuffer::new(4).unwrap();
        slots.set_slot(0, 'A');
        slots.set_slot(1, '5');
        slots.set_slot(2, '-');
        assert_eq!(slots.slots(), &[10, 5, 39, BLANK]);
    }

    #[test]
    fn test_set_slot_out_of_range_is_ignored() {
        let (mut slots, _device) = flushed(4);
        slots.apply_text("WXYZ");
        let before = slots.slots().to_vec();

        slots.set_slot(-1, 'A');
        slots.set_slot(4, 'A');
        slots.set_slot(54, 'A');
        slots.set_slot(isize::MIN, 'A');

        assert_eq!(slots.slots(), before.as_slice());
    }

    #[test]
    fn test_set_slot_invalidates_text_dedup() {
        let mut slots = SlotBuffer::new(2).unwrap();
        slots.apply_text("AB");
        slots.set_slot(0, 'X');
        slots.apply_text("AB");
        assert_eq!(slots.slots(), &[10, 11]);
    }

    #[test]
    fn test_set_glyph_coerces_invalid_values() {
        let mut slots = SlotBuffer::new(2).unwrap();
        slots.set_glyph(0, 7);
        slots.set_glyph(1, 200);
        assert_eq!(slots.slots(), &[7, BLANK]);
    }

    #[test]
    fn test_clear_from() {
        let mut slots = SlotBuffer::new(8).unwrap();
        slots.set_slot(0, 'A');
        slots.set_slot(1, 'B');
        slots.set_slot(2, 'C');
        slots.clear_from(1);

        assert_eq!(slots.get(0), Some(10));
        assert!(slots.slots()[1..].iter().all(|&g| g == BLANK));
    }

    #[test]
    fn test_clear_from_negative_and_past_end() {
        let mut slots = SlotBuffer::new(3).unwrap();
        slots.apply_text("ABC");
        slots.clear_from(10);
        assert_eq!(slots.slots(), &[10, 11, 12]);
        slots.clear_from(-5);
        assert_eq!(slots.slots(), &[BLANK; 3]);
    }

    #[test]
    fn test_resize_resets_contents() {
        let (mut slots, _device) = flushed(8);
        slots.apply_text("ABCD");
        slots.resize(16).unwrap();

        assert_eq!(slots.capacity(), 16);
        assert_eq!(slots.slots(), &[BLANK; 16]);
        assert_eq!(slots.last_applied(), None);
        assert!(slots.is_dirty());

        slots.apply_text("ABCD");
        assert_eq!(&slots.slots()[..4], &[10, 11, 12, 13]);
    }

    #[test]
    fn test_flush_uploads_once() {
        let mut slots = SlotBuffer::new(4).unwrap();
        let mut device = HostBuffer::create(4, 1).unwrap();
        slots.set_slot(0, 'B');

        assert_eq!(slots.flush(Some(&mut device)), Ok(true));
        assert!(!slots.is_dirty());
        assert_eq!(device.elements(), &[11, BLANK, BLANK, BLANK]);

        assert_eq!(slots.flush(Some(&mut device)), Ok(false));
        assert_eq!(device.write_count(), 1);
    }

    #[test]
    fn test_flush_without_device_stays_dirty() {
        let mut slots = SlotBuffer::new(4).unwrap();
        slots.set_slot(0, 'B');
        assert_eq!(slots.flush::<HostBuffer>(None), Ok(false));
        assert!(slots.is_dirty());
    }

    #[test]
    fn test_failed_flush_stays_dirty() {
        let mut slots = SlotBuffer::new(4).unwrap();
        let mut device = HostBuffer::create(2, 1).unwrap();
        assert!(slots.flush(Some(&mut device)).is_err());
        assert!(slots.is_dirty());
    }

    #[test]
    fn test_display_decodes_slots() {
        let mut slots = SlotBuffer::new(8).unwrap();
        slots.apply_text("fps:60!");
        assert_eq!(slots.to_string(), "FPS:60  ");
    }
}
