//! Math utilities and types
//!
//! Thin aliases over `nalgebra` used by the quad layout code.

pub use nalgebra::{Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type (vertex positions)
pub type Vec3 = Vector3<f32>;

/// 4D vector type (RGBA colours, packed UVs)
pub type Vec4 = Vector4<f32>;

/// Number of decimal digits needed to print `value`
///
/// Zero still takes one digit.
pub fn decimal_digit_count(mut value: u64) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

/// `10^exponent` as an unsigned integer, saturating at `u64::MAX`
pub fn pow10(exponent: u32) -> u64 {
    10u64.saturating_pow(exponent)
}
