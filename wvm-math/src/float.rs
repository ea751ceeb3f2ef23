// WVM - wvm-math
// Module: Floating-Point Operations
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! IEEE-754 operations with canonical NaN results.
//!
//! Every arithmetic result that is NaN is replaced by the canonical NaN of
//! its width before it reaches the operand stack, so NaN bit patterns never
//! leak host-specific payloads. The sign-manipulation operations (`abs`,
//! `neg`, `copysign`) are pure bit operations and preserve their input
//! payload.

use wvm_types::{FloatBits32, FloatBits64};

fn canon32(val: f32) -> FloatBits32 {
    if val.is_nan() {
        FloatBits32::NAN
    } else {
        FloatBits32::from_float(val)
    }
}

fn canon64(val: f64) -> FloatBits64 {
    if val.is_nan() {
        FloatBits64::NAN
    } else {
        FloatBits64::from_float(val)
    }
}

/// `f32.add`
#[must_use]
pub fn f32_add(lhs: f32, rhs: f32) -> FloatBits32 {
    canon32(lhs + rhs)
}

/// `f32.sub`
#[must_use]
pub fn f32_sub(lhs: f32, rhs: f32) -> FloatBits32 {
    canon32(lhs - rhs)
}

/// `f32.mul`
#[must_use]
pub fn f32_mul(lhs: f32, rhs: f32) -> FloatBits32 {
    canon32(lhs * rhs)
}

/// `f32.div`
#[must_use]
pub fn f32_div(lhs: f32, rhs: f32) -> FloatBits32 {
    canon32(lhs / rhs)
}

/// `f32.min`. NaN-propagating, and `min(-0, +0)` is `-0`.
#[must_use]
pub fn f32_min(lhs: f32, rhs: f32) -> FloatBits32 {
    if lhs.is_nan() || rhs.is_nan() {
        return FloatBits32::NAN;
    }
    if lhs == rhs {
        // Equal comparisons ignore the sign of zero; pick the negative one.
        return FloatBits32::from_bits(lhs.to_bits() | rhs.to_bits());
    }
    canon32(if lhs < rhs { lhs } else { rhs })
}

/// `f32.max`. NaN-propagating, and `max(-0, +0)` is `+0`.
#[must_use]
pub fn f32_max(lhs: f32, rhs: f32) -> FloatBits32 {
    if lhs.is_nan() || rhs.is_nan() {
        return FloatBits32::NAN;
    }
    if lhs == rhs {
        return FloatBits32::from_bits(lhs.to_bits() & rhs.to_bits());
    }
    canon32(if lhs > rhs { lhs } else { rhs })
}

/// `f32.abs`. Clears the sign bit, payload preserved.
#[must_use]
pub fn f32_abs(val: f32) -> FloatBits32 {
    FloatBits32::from_bits(val.to_bits() & 0x7fff_ffff)
}

/// `f32.neg`. Flips the sign bit, payload preserved.
#[must_use]
pub fn f32_neg(val: f32) -> FloatBits32 {
    FloatBits32::from_bits(val.to_bits() ^ 0x8000_0000)
}

/// `f32.copysign`. Payload preserved.
#[must_use]
pub fn f32_copysign(lhs: f32, rhs: f32) -> FloatBits32 {
    let bits = (lhs.to_bits() & 0x7fff_ffff) | (rhs.to_bits() & 0x8000_0000);
    FloatBits32::from_bits(bits)
}

/// `f32.ceil`
#[must_use]
pub fn f32_ceil(val: f32) -> FloatBits32 {
    canon32(val.ceil())
}

/// `f32.floor`
#[must_use]
pub fn f32_floor(val: f32) -> FloatBits32 {
    canon32(val.floor())
}

/// `f32.trunc`
#[must_use]
pub fn f32_trunc(val: f32) -> FloatBits32 {
    canon32(val.trunc())
}

/// `f32.nearest`. Rounds to nearest, ties to even.
#[must_use]
pub fn f32_nearest(val: f32) -> FloatBits32 {
    canon32(val.round_ties_even())
}

/// `f32.sqrt`. The square root of a negative number is NaN.
#[must_use]
pub fn f32_sqrt(val: f32) -> FloatBits32 {
    canon32(val.sqrt())
}

/// `f64.add`
#[must_use]
pub fn f64_add(lhs: f64, rhs: f64) -> FloatBits64 {
    canon64(lhs + rhs)
}

/// `f64.sub`
#[must_use]
pub fn f64_sub(lhs: f64, rhs: f64) -> FloatBits64 {
    canon64(lhs - rhs)
}

/// `f64.mul`
#[must_use]
pub fn f64_mul(lhs: f64, rhs: f64) -> FloatBits64 {
    canon64(lhs * rhs)
}

/// `f64.div`
#[must_use]
pub fn f64_div(lhs: f64, rhs: f64) -> FloatBits64 {
    canon64(lhs / rhs)
}

/// `f64.min`. NaN-propagating, and `min(-0, +0)` is `-0`.
#[must_use]
pub fn f64_min(lhs: f64, rhs: f64) -> FloatBits64 {
    if lhs.is_nan() || rhs.is_nan() {
        return FloatBits64::NAN;
    }
    if lhs == rhs {
        return FloatBits64::from_bits(lhs.to_bits() | rhs.to_bits());
    }
    canon64(if lhs < rhs { lhs } else { rhs })
}

/// `f64.max`. NaN-propagating, and `max(-0, +0)` is `+0`.
#[must_use]
pub fn f64_max(lhs: f64, rhs: f64) -> FloatBits64 {
    if lhs.is_nan() || rhs.is_nan() {
        return FloatBits64::NAN;
    }
    if lhs == rhs {
        return FloatBits64::from_bits(lhs.to_bits() & rhs.to_bits());
    }
    canon64(if lhs > rhs { lhs } else { rhs })
}

/// `f64.abs`. Clears the sign bit, payload preserved.
#[must_use]
pub fn f64_abs(val: f64) -> FloatBits64 {
    FloatBits64::from_bits(val.to_bits() & 0x7fff_ffff_ffff_ffff)
}

/// `f64.neg`. Flips the sign bit, payload preserved.
#[must_use]
pub fn f64_neg(val: f64) -> FloatBits64 {
    FloatBits64::from_bits(val.to_bits() ^ 0x8000_0000_0000_0000)
}

/// `f64.copysign`. Payload preserved.
#[must_use]
pub fn f64_copysign(lhs: f64, rhs: f64) -> FloatBits64 {
    let bits =
        (lhs.to_bits() & 0x7fff_ffff_ffff_ffff) | (rhs.to_bits() & 0x8000_0000_0000_0000);
    FloatBits64::from_bits(bits)
}

/// `f64.ceil`
#[must_use]
pub fn f64_ceil(val: f64) -> FloatBits64 {
    canon64(val.ceil())
}

/// `f64.floor`
#[must_use]
pub fn f64_floor(val: f64) -> FloatBits64 {
    canon64(val.floor())
}

/// `f64.trunc`
#[must_use]
pub fn f64_trunc(val: f64) -> FloatBits64 {
    canon64(val.trunc())
}

/// `f64.nearest`. Rounds to nearest, ties to even.
#[must_use]
pub fn f64_nearest(val: f64) -> FloatBits64 {
    canon64(val.round_ties_even())
}

/// `f64.sqrt`. The square root of a negative number is NaN.
#[must_use]
pub fn f64_sqrt(val: f64) -> FloatBits64 {
    canon64(val.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_results_are_canonical() {
        // 0/0, inf - inf, sqrt(-1) all produce NaN.
        assert_eq!(f32_div(0.0, 0.0), FloatBits32::NAN);
        assert_eq!(f64_sub(f64::INFINITY, f64::INFINITY), FloatBits64::NAN);
        assert_eq!(f32_sqrt(-1.0), FloatBits32::NAN);

        // A NaN with a nonstandard payload is canonicalized by arithmetic.
        let odd_nan = f32::from_bits(0x7f80_0001 | 0x0040_0000 | 0x1234);
        assert_eq!(f32_add(odd_nan, 1.0), FloatBits32::NAN);
    }

    #[test]
    fn sign_ops_preserve_payload() {
        let odd_nan_bits = 0xffc1_2345u32;
        let odd_nan = f32::from_bits(odd_nan_bits);
        assert_eq!(f32_abs(odd_nan).to_bits(), odd_nan_bits & 0x7fff_ffff);
        assert_eq!(f32_neg(odd_nan).to_bits(), odd_nan_bits ^ 0x8000_0000);
        assert_eq!(
            f64_copysign(1.0, -2.0).value(),
            -1.0
        );
    }

    #[test]
    fn min_max_zero_signs() {
        assert_eq!(f32_min(0.0, -0.0).to_bits(), (-0.0f32).to_bits());
        assert_eq!(f32_max(-0.0, 0.0).to_bits(), 0.0f32.to_bits());
        assert_eq!(f64_min(-0.0, 0.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(f64_min(1.0, 2.0).value(), 1.0);
        assert_eq!(f64_max(1.0, 2.0).value(), 2.0);
    }

    #[test]
    fn min_max_nan() {
        assert_eq!(f32_min(f32::NAN, 1.0), FloatBits32::NAN);
        assert_eq!(f64_max(1.0, f64::NAN), FloatBits64::NAN);
    }

    #[test]
    fn nearest_ties_to_even() {
        assert_eq!(f32_nearest(2.5).value(), 2.0);
        assert_eq!(f32_nearest(3.5).value(), 4.0);
        assert_eq!(f64_nearest(-0.5).to_bits(), (-0.0f64).to_bits());
    }
}
