//! Fixed 40-symbol glyph alphabet
//!
//! Maps characters to the glyph indices the fragment shader looks up in its
//! glyph sheet. Layout of the sheet:
//!
//! | Index   | Glyphs      |
//! |---------|-------------|
//! | 0-9     | `0`-`9`     |
//! | 10-35   | `A`-`Z`     |
//! | 36      | space       |
//! | 37      | `:`         |
//! | 38      | `.`         |
//! | 39      | `-`         |
//!
//! Anything else maps to [`BLANK`], which the shader draws as nothing.

/// Index of a glyph in the shader's glyph sheet, or [`BLANK`]
pub type GlyphIndex = u8;

/// Sentinel index meaning "no glyph"
pub const BLANK: GlyphIndex = 255;

/// Number of printable glyphs in the alphabet
pub const GLYPH_COUNT: usize = 40;

/// Human-readable summary of the supported characters
pub const SUPPORTED_CHARACTERS: &str = "0-9  A-Z  SPACE  :  .  -";

/// Glyph index of `' '`
pub const SPACE: GlyphIndex = 36;
/// Glyph index of `':'`
pub const COLON: GlyphIndex = 37;
/// Glyph index of `'.'`
pub const PERIOD: GlyphIndex = 38;
/// Glyph index of `'-'`
pub const MINUS: GlyphIndex = 39;

const LETTER_OFFSET: u8 = 10;

/// Map a character to its glyph index
///
/// Lowercase letters alias their uppercase glyph. Unsupported characters
/// degrade to [`BLANK`] rather than failing.
pub const fn to_index(c: char) -> GlyphIndex {
    match c {
        '0'..='9' => c as u8 - b'0',
        'A'..='Z' => c as u8 - b'A' + LETTER_OFFSET,
        'a'..='z' => c as u8 - b'a' + LETTER_OFFSET,
        ' ' => SPACE,
        ':' => COLON,
        '.' => PERIOD,
        '-' => MINUS,
        _ => BLANK,
    }
}

/// Map a glyph index back to its canonical character
///
/// Letters decode as uppercase. Returns `None` for [`BLANK`] and for any
/// value outside the alphabet.
pub const fn to_char(index: GlyphIndex) -> Option<char> {
    match index {
        0..=9 => Some((b'0' + index) as char),
        10..=35 => Some((b'A' + index - LETTER_OFFSET) as char),
        SPACE => Some(' '),
        COLON => Some(':'),
        PERIOD => Some('.'),
        MINUS => Some('-'),
        _ => None,
    }
}

/// Whether `c` has a glyph of its own
pub const fn is_supported(c: char) -> bool {
    to_index(c) != BLANK
}

/// Whether `index` is a valid stored value (a glyph or [`BLANK`])
pub const fn is_valid(index: GlyphIndex) -> bool {
    (index as usize) < GLYPH_COUNT || index == BLANK
}

/// Glyph index of a single decimal digit
///
/// Digits occupy indices 0-9, so this is the identity for `digit < 10`.
pub(crate) const fn digit(digit: u64) -> GlyphIndex {
    (digit % 10) as GlyphIndex
}
