//! Shift-add CORDIC backend.
//!
//! Angles are carried internally with 16 extra fraction bits (a full turn is
//! `2^32`). Rotation mode starts from the pre-scaled unit vector so no gain
//! correction is needed at the end; vectoring mode drives `y` to zero and
//! reads the accumulated angle.

use super::{wrap_turn, AMPLITUDE};

const ITERATIONS: usize = 24;

/// `atan(2^-i)` with a full turn of `2^32`.
const ATAN_TABLE: [i64; ITERATIONS] = [
    536870912, 316933406, 167458907, 85004756, 42667331, 21354465, 10679838, 5340245, 2670163,
    1335087, 667544, 333772, 166886, 83443, 41722, 20861, 10430, 5215, 2608, 1304, 652, 326, 163,
    81,
];

/// `1/K` of the 24-stage rotator in Q30.
const INVERSE_GAIN: i64 = 652032874;

const UNIT_BITS: u32 = 30;
const ANGLE_SHIFT: u32 = 16;
const HALF_TURN: i64 = 1 << 31;
const QUARTER: i32 = 1 << 14;

// Vectoring inputs are normalized to stay below this many bits
const VECTOR_BITS: u32 = 46;

fn to_amplitude(value: i64) -> i16 {
    let scaled = (value * AMPLITUDE as i64 + (1 << (UNIT_BITS - 1))) >> UNIT_BITS;
    scaled.clamp(-(AMPLITUDE as i64), AMPLITUDE as i64) as i16
}

/// `(sin, cos)` of `angle`.
pub fn sin_cos(angle: i16) -> (i16, i16) {
    // Fold into [-π/2, π/2], where the rotator converges
    let mut angle = angle as i32;
    let mut gain = INVERSE_GAIN;
    if angle > QUARTER {
        angle -= 2 * QUARTER;
        gain = -gain;
    } else if angle < -QUARTER {
        angle += 2 * QUARTER;
        gain = -gain;
    }

    let (mut x, mut y) = (gain, 0i64);
    let mut z = (angle as i64) << ANGLE_SHIFT;
    for (i, &step) in ATAN_TABLE.iter().enumerate() {
        let (dx, dy) = (y >> i, x >> i);
        if z >= 0 {
            x -= dx;
            y += dy;
            z -= step;
        } else {
            x += dx;
            y -= dy;
            z += step;
        }
    }
    (to_amplitude(y), to_amplitude(x))
}

pub fn sin_i16(angle: i16) -> i16 {
    sin_cos(angle).0
}

pub fn cos_i16(angle: i16) -> i16 {
    sin_cos(angle).1
}

pub fn atan2_i32(y: i32, x: i32) -> i32 {
    if x == 0 && y == 0 {
        return 0;
    }

    let (mut x, mut y) = (x as i64, y as i64);
    let mut z = 0i64;
    if x < 0 {
        z = if y >= 0 { HALF_TURN } else { -HALF_TURN };
        x = -x;
        y = -y;
    }

    let magnitude = x.unsigned_abs() | y.unsigned_abs();
    let shift = magnitude.leading_zeros().saturating_sub(u64::BITS - VECTOR_BITS);
    x <<= shift;
    y <<= shift;

    for (i, &step) in ATAN_TABLE.iter().enumerate() {
        let (dx, dy) = (y >> i, x >> i);
        if y > 0 {
            x += dx;
            y -= dy;
            z += step;
        } else {
            x -= dx;
            y += dy;
            z -= step;
        }
    }
    wrap_turn(((z + (1 << (ANGLE_SHIFT - 1))) >> ANGLE_SHIFT) as i32)
}

pub fn atan2_i16(y: i16, x: i16) -> i16 {
    atan2_i32(y as i32, x as i32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trig::lut;

    #[test]
    fn test_table_matches_arctangent() {
        let units = (1u64 << 32) as f64 / std::f64::consts::TAU;
        for (i, &step) in ATAN_TABLE.iter().enumerate() {
            let exact = (0.5f64.powi(i as i32)).atan() * units;
            assert!((step as f64 - exact).abs() <= 0.5, "stage {}", i);
        }
        // The stages must cover more than a quarter turn
        assert!(ATAN_TABLE.iter().sum::<i64>() > 1 << 30);
    }

    #[test]
    fn test_quadrants() {
        assert_eq!(sin_cos(0), (0, AMPLITUDE));
        assert_eq!(sin_cos(16384), (AMPLITUDE, 0));
        assert_eq!(sin_cos(-16384), (-AMPLITUDE, 0));
        assert_eq!(sin_cos(i16::MIN), (0, -AMPLITUDE));
    }

    #[test]
    fn test_agrees_with_table_backend() {
        for angle in i16::MIN..=i16::MAX {
            let (sin, cos) = sin_cos(angle);
            assert!((sin as i32 - lut::sin_i16(angle) as i32).abs() <= 2, "sin {}", angle);
            assert!((cos as i32 - lut::cos_i16(angle) as i32).abs() <= 2, "cos {}", angle);
        }
    }

    #[test]
    fn test_atan2_extreme_inputs() {
        assert_eq!(atan2_i32(i32::MIN, i32::MIN), -24576);
        assert_eq!(atan2_i32(i32::MAX, 1), 16384);
        assert_eq!(atan2_i32(1, -1), 24576);
        assert_eq!(atan2_i32(0, -1), -32768);
    }
}
