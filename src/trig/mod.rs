//! Fixed-point trigonometry.
//!
//! Angles are `i16` binary angles: a full turn is 65536, so the type wraps
//! exactly once around the circle and `i16::MIN` is `-π`. Sine and cosine
//! are scaled by [`AMPLITUDE`].
//!
//! Two backends are always available as [`lut`] and [`cordic`]. The free
//! functions here use the table backend unless the `cordic-trig` feature is
//! enabled.
//!
//! ```
//! use phy_kernels::trig::{self, QUARTER_TURN};
//!
//! assert_eq!(trig::cos_i16(0), 32767);
//! assert_eq!(trig::sin_i16(QUARTER_TURN), 32767);
//! assert_eq!(trig::atan2_i16(100, 0), QUARTER_TURN);
//! ```

pub mod cordic;
pub mod lut;

#[cfg(feature = "cordic-trig")]
use cordic as backend;
#[cfg(not(feature = "cordic-trig"))]
use lut as backend;

/// Peak value of [`sin_i16`] and [`cos_i16`].
pub const AMPLITUDE: i16 = i16::MAX;

/// Binary angle units per turn.
pub const FULL_TURN: i32 = 1 << 16;

/// `π/2` in binary angle units.
pub const QUARTER_TURN: i16 = 1 << 14;

/// Cosine of a binary angle, scaled by [`AMPLITUDE`].
#[inline]
pub fn cos_i16(angle: i16) -> i16 {
    backend::cos_i16(angle)
}

/// Sine of a binary angle, scaled by [`AMPLITUDE`].
#[inline]
pub fn sin_i16(angle: i16) -> i16 {
    backend::sin_i16(angle)
}

/// Angle of the vector `(x, y)`. `atan2_i16(0, 0)` is 0.
#[inline]
pub fn atan2_i16(y: i16, x: i16) -> i16 {
    backend::atan2_i16(y, x)
}

/// Angle of the vector `(x, y)` in binary angle units, within
/// `[-32768, 32767]`. `atan2_i32(0, 0)` is 0.
#[inline]
pub fn atan2_i32(y: i32, x: i32) -> i32 {
    backend::atan2_i32(y, x)
}

/// Folds an angle in `[-32768, 32768]` back into the `i16` range, so that
/// `+π` reads as `-π`.
#[inline(always)]
pub(crate) fn wrap_turn(angle: i32) -> i32 {
    angle as i16 as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_points() {
        assert_eq!(cos_i16(0), AMPLITUDE);
        assert_eq!(sin_i16(0), 0);
        assert_eq!(sin_i16(QUARTER_TURN), AMPLITUDE);
        assert_eq!(cos_i16(i16::MIN), -AMPLITUDE);
        assert_eq!(sin_i16(-QUARTER_TURN), -AMPLITUDE);
    }

    #[test]
    fn test_atan2_axes() {
        assert_eq!(atan2_i32(0, 0), 0);
        assert_eq!(atan2_i32(0, 5), 0);
        assert_eq!(atan2_i32(5, 0), 16384);
        assert_eq!(atan2_i32(-5, 0), -16384);
        assert_eq!(atan2_i32(0, -5), -32768);
        assert_eq!(atan2_i16(7, 7), 8192);
    }

    #[test]
    fn test_atan2_inverts_sin_cos() {
        for angle in (i16::MIN..=i16::MAX).step_by(97) {
            let recovered = atan2_i16(sin_i16(angle), cos_i16(angle));
            let error = recovered.wrapping_sub(angle);
            assert!(error.abs() <= 2, "angle {} came back as {}", angle, recovered);
        }
    }

    #[test]
    fn test_wrap_turn() {
        assert_eq!(wrap_turn(32768), -32768);
        assert_eq!(wrap_turn(-32768), -32768);
        assert_eq!(wrap_turn(12), 12);
    }
}
