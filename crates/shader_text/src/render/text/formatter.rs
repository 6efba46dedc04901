//! Allocation-free number and string formatting into a slot buffer
//!
//! Each write starts at a slot offset and returns how many characters it
//! logically produced. Characters that land outside the buffer are dropped,
//! but still counted, so chained writes keep their positions and callers can
//! detect overflow by comparing the end position with the capacity.
//!
//! ```
//! use shader_text::render::text::{SlotBuffer, TextFormatter};
//!
//! let mut slots = SlotBuffer::new(16).unwrap();
//! TextFormatter::new(&mut slots)
//!     .string("FPS:")
//!     .int(120)
//!     .char(' ')
//!     .float(8.33, 1)
//!     .string("MS")
//!     .clear_rest();
//! assert_eq!(slots.to_string(), "FPS:120 8.3MS   ");
//! ```

use super::alphabet::{self, MINUS, PERIOD};
use super::SlotBuffer;
use crate::foundation::math::{decimal_digit_count, pow10};

/// Largest supported number of fractional digits
///
/// Requests above this are clamped. Keeps the scaled fraction well inside
/// `u64` and within the precision of an `f64`.
pub const MAX_DECIMALS: u32 = 9;

/// Slot position `count` characters after `offset`
fn advance(offset: isize, count: usize) -> isize {
    offset.saturating_add_unsigned(count)
}

/// Magnitude of `value` as integer digits and `decimals` rounded fraction digits
fn split_decimal(value: f32, decimals: u32) -> (u64, u64) {
    let magnitude = f64::from(value.abs());
    if magnitude.is_nan() {
        return (0, 0);
    }
    let whole = magnitude.trunc();
    if whole >= u64::MAX as f64 {
        return (u64::MAX, 0);
    }

    let scale = pow10(decimals);
    let integer_part = whole as u64;
    let fraction_part = ((magnitude - whole) * scale as f64 + 0.5).floor() as u64;
    if fraction_part >= scale {
        (integer_part.saturating_add(1), 0)
    } else {
        (integer_part, fraction_part)
    }
}

impl SlotBuffer {
    /// Write a signed integer at `offset`
    ///
    /// Negative values get a leading `-`. Returns the character count
    /// (sign plus digits), whether or not everything fit.
    pub fn write_int(&mut self, value: i32, offset: isize) -> usize {
        let mut written = 0;
        if value < 0 {
            self.set_glyph(offset, MINUS);
            written += 1;
        }

        // Widen before taking the magnitude so i32::MIN does not overflow
        let magnitude = i64::from(value).unsigned_abs();
        written += self.write_unsigned(magnitude, advance(offset, written));
        self.mark_dirty();
        written
    }

    /// Write a float with exactly `decimals` fractional digits at `offset`
    ///
    /// The fraction is scaled by `10^decimals` and rounded half-up, carrying
    /// into the integer part when it rounds to a whole. `decimals == 0` omits
    /// the decimal point. The integer part saturates at `u64::MAX` (huge
    /// values and infinities print `18446744073709551615` with a zero
    /// fraction). NaN prints as zero.
    pub fn write_float(&mut self, value: f32, decimals: u32, offset: isize) -> usize {
        let decimals = decimals.min(MAX_DECIMALS);
        let mut written = 0;
        if value < 0.0 {
            self.set_glyph(offset, MINUS);
            written += 1;
        }

        let (integer_part, fraction_part) = split_decimal(value, decimals);

        written += self.write_unsigned(integer_part, advance(offset, written));

        if decimals > 0 {
            self.set_glyph(advance(offset, written), PERIOD);
            written += 1;
            written += self.write_zero_padded(fraction_part, decimals as usize, advance(offset, written));
        }

        self.mark_dirty();
        written
    }

    /// Write `text` character by character at `offset`
    ///
    /// Returns the number of characters in `text`, even if some were
    /// truncated.
    pub fn write_string(&mut self, text: &str, offset: isize) -> usize {
        let mut written = 0;
        for c in text.chars() {
            self.set_slot(advance(offset, written), c);
            written += 1;
        }
        self.mark_dirty();
        written
    }

    /// Decimal digits of `value`, most significant first, no leading zeros
    fn write_unsigned(&mut self, value: u64, offset: isize) -> usize {
        let digits = decimal_digit_count(value);
        self.write_zero_padded(value, digits, offset)
    }

    /// Lowest `width` decimal digits of `value`, left-padded with zeros
    fn write_zero_padded(&mut self, mut value: u64, width: usize, offset: isize) -> usize {
        for position in (0..width).rev() {
            self.set_glyph(advance(offset, position), alphabet::digit(value % 10));
            value /= 10;
        }
        width
    }
}

/// Cursor over a slot buffer for building a label in one chained expression
pub struct TextFormatter<'a> {
    buffer: &'a mut SlotBuffer,
    start: isize,
    cursor: isize,
}

impl<'a> TextFormatter<'a> {
    /// Start writing at slot 0
    pub fn new(buffer: &'a mut SlotBuffer) -> Self {
        Self::at(buffer, 0)
    }

    /// Start writing at `offset`
    pub fn at(buffer: &'a mut SlotBuffer, offset: isize) -> Self {
        Self {
            buffer,
            start: offset,
            cursor: offset,
        }
    }

    /// Append a string
    pub fn string(&mut self, text: &str) -> &mut Self {
        let written = self.buffer.write_string(text, self.cursor);
        self.cursor = advance(self.cursor, written);
        self
    }

    /// Append a signed integer
    pub fn int(&mut self, value: i32) -> &mut Self {
        let written = self.buffer.write_int(value, self.cursor);
        self.cursor = advance(self.cursor, written);
        self
    }

    /// Append a float with `decimals` fractional digits
    pub fn float(&mut self, value: f32, decimals: u32) -> &mut Self {
        let written = self.buffer.write_float(value, decimals, self.cursor);
        self.cursor = advance(self.cursor, written);
        self
    }

    /// Append a single character
    pub fn char(&mut self, c: char) -> &mut Self {
        self.buffer.set_slot(self.cursor, c);
        self.buffer.mark_dirty();
        self.cursor = advance(self.cursor, 1);
        self
    }

    /// Move the cursor forward without touching the skipped slots
    pub fn skip(&mut self, count: usize) -> &mut Self {
        self.cursor = advance(self.cursor, count);
        self
    }

    /// Blank every slot from the cursor to the end of the buffer
    pub fn clear_rest(&mut self) -> &mut Self {
        self.buffer.clear_from(self.cursor);
        self
    }

    /// Logical position after the last write
    pub fn cursor(&self) -> isize {
        self.cursor
    }

    /// Characters written since the formatter was created
    pub fn written(&self) -> usize {
        self.cursor.abs_diff(self.start)
    }

    /// Whether the logical output ran past the end of the buffer
    pub fn overflowed(&self) -> bool {
        usize::try_from(self.cursor).map_or(false, |end| end > self.buffer.capacity())
    }
}
