// WVM - wvm-math
// Module: Conversion Operations
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Numeric conversions: trap-checked truncation, widening, demotion, and
//! bit reinterpretation.
//!
//! Truncation range checks are performed on the f64-widened, truncated
//! operand. Every bound used below is exactly representable in f64, so the
//! comparisons are precise even for the 64-bit target types.

use wvm_error::{codes, Error, Result};
use wvm_types::{FloatBits32, FloatBits64};

const INVALID_CONVERSION: Error = Error::trap(
    codes::INVALID_CONVERSION_TO_INTEGER,
    "invalid conversion to integer",
);
const INTEGER_OVERFLOW: Error = Error::trap(codes::INTEGER_OVERFLOW, "integer overflow");

fn trunc_checked(val: f64, lo: f64, hi: f64) -> Result<f64> {
    if val.is_nan() {
        return Err(INVALID_CONVERSION);
    }
    let t = val.trunc();
    if t < lo || t > hi {
        return Err(INTEGER_OVERFLOW);
    }
    Ok(t)
}

/// `i32.wrap_i64`
#[must_use]
pub fn i32_wrap_i64(val: i64) -> i32 {
    val as i32
}

/// `i32.trunc_f32_s`. Traps on NaN and out-of-range input.
pub fn i32_trunc_f32_s(val: f32) -> Result<i32> {
    trunc_checked(f64::from(val), -2_147_483_648.0, 2_147_483_647.0).map(|t| t as i32)
}

/// `i32.trunc_f32_u`. Traps on NaN and out-of-range input.
pub fn i32_trunc_f32_u(val: f32) -> Result<i32> {
    trunc_checked(f64::from(val), 0.0, 4_294_967_295.0).map(|t| t as u32 as i32)
}

/// `i32.trunc_f64_s`. Traps on NaN and out-of-range input.
pub fn i32_trunc_f64_s(val: f64) -> Result<i32> {
    trunc_checked(val, -2_147_483_648.0, 2_147_483_647.0).map(|t| t as i32)
}

/// `i32.trunc_f64_u`. Traps on NaN and out-of-range input.
pub fn i32_trunc_f64_u(val: f64) -> Result<i32> {
    trunc_checked(val, 0.0, 4_294_967_295.0).map(|t| t as u32 as i32)
}

/// `i64.extend_i32_s`
#[must_use]
pub fn i64_extend_i32_s(val: i32) -> i64 {
    i64::from(val)
}

/// `i64.extend_i32_u`
#[must_use]
pub fn i64_extend_i32_u(val: i32) -> i64 {
    i64::from(val as u32)
}

/// `i64.trunc_f32_s`. Traps on NaN and out-of-range input.
pub fn i64_trunc_f32_s(val: f32) -> Result<i64> {
    // 2^63 is exact in f64; the truncated operand must lie strictly below it.
    let t = trunc_checked(f64::from(val), -9_223_372_036_854_775_808.0, f64::INFINITY)?;
    if t >= 9_223_372_036_854_775_808.0 {
        return Err(INTEGER_OVERFLOW);
    }
    Ok(t as i64)
}

/// `i64.trunc_f32_u`. Traps on NaN and out-of-range input.
pub fn i64_trunc_f32_u(val: f32) -> Result<i64> {
    let t = trunc_checked(f64::from(val), 0.0, f64::INFINITY)?;
    if t >= 18_446_744_073_709_551_616.0 {
        return Err(INTEGER_OVERFLOW);
    }
    Ok(t as u64 as i64)
}

/// `i64.trunc_f64_s`. Traps on NaN and out-of-range input.
pub fn i64_trunc_f64_s(val: f64) -> Result<i64> {
    let t = trunc_checked(val, -9_223_372_036_854_775_808.0, f64::INFINITY)?;
    if t >= 9_223_372_036_854_775_808.0 {
        return Err(INTEGER_OVERFLOW);
    }
    Ok(t as i64)
}

/// `i64.trunc_f64_u`. Traps on NaN and out-of-range input.
pub fn i64_trunc_f64_u(val: f64) -> Result<i64> {
    let t = trunc_checked(val, 0.0, f64::INFINITY)?;
    if t >= 18_446_744_073_709_551_616.0 {
        return Err(INTEGER_OVERFLOW);
    }
    Ok(t as u64 as i64)
}

/// `f32.convert_i32_s`
#[must_use]
pub fn f32_convert_i32_s(val: i32) -> FloatBits32 {
    FloatBits32::from_float(val as f32)
}

/// `f32.convert_i32_u`
#[must_use]
pub fn f32_convert_i32_u(val: i32) -> FloatBits32 {
    FloatBits32::from_float(val as u32 as f32)
}

/// `f32.convert_i64_s`
#[must_use]
pub fn f32_convert_i64_s(val: i64) -> FloatBits32 {
    FloatBits32::from_float(val as f32)
}

/// `f32.convert_i64_u`
#[must_use]
pub fn f32_convert_i64_u(val: i64) -> FloatBits32 {
    FloatBits32::from_float(val as u64 as f32)
}

/// `f32.demote_f64`. A NaN result is canonicalized.
#[must_use]
pub fn f32_demote_f64(val: f64) -> FloatBits32 {
    let demoted = val as f32;
    if demoted.is_nan() {
        FloatBits32::NAN
    } else {
        FloatBits32::from_float(demoted)
    }
}

/// `f64.convert_i32_s`
#[must_use]
pub fn f64_convert_i32_s(val: i32) -> FloatBits64 {
    FloatBits64::from_float(f64::from(val))
}

/// `f64.convert_i32_u`
#[must_use]
pub fn f64_convert_i32_u(val: i32) -> FloatBits64 {
    FloatBits64::from_float(f64::from(val as u32))
}

/// `f64.convert_i64_s`
#[must_use]
pub fn f64_convert_i64_s(val: i64) -> FloatBits64 {
    FloatBits64::from_float(val as f64)
}

/// `f64.convert_i64_u`
#[must_use]
pub fn f64_convert_i64_u(val: i64) -> FloatBits64 {
    FloatBits64::from_float(val as u64 as f64)
}

/// `f64.promote_f32`. A NaN result is canonicalized.
#[must_use]
pub fn f64_promote_f32(val: f32) -> FloatBits64 {
    let promoted = f64::from(val);
    if promoted.is_nan() {
        FloatBits64::NAN
    } else {
        FloatBits64::from_float(promoted)
    }
}

/// `i32.reinterpret_f32`
#[must_use]
pub fn i32_reinterpret_f32(val: FloatBits32) -> i32 {
    val.to_bits() as i32
}

/// `i64.reinterpret_f64`
#[must_use]
pub fn i64_reinterpret_f64(val: FloatBits64) -> i64 {
    val.to_bits() as i64
}

/// `f32.reinterpret_i32`
#[must_use]
pub fn f32_reinterpret_i32(val: i32) -> FloatBits32 {
    FloatBits32::from_bits(val as u32)
}

/// `f64.reinterpret_i64`
#[must_use]
pub fn f64_reinterpret_i64(val: i64) -> FloatBits64 {
    FloatBits64::from_bits(val as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wvm_error::codes;

    #[test]
    fn trunc_traps_on_nan() {
        assert_eq!(
            i32_trunc_f32_s(f32::NAN).unwrap_err().code,
            codes::INVALID_CONVERSION_TO_INTEGER
        );
        assert_eq!(
            i64_trunc_f64_u(f64::NAN).unwrap_err().code,
            codes::INVALID_CONVERSION_TO_INTEGER
        );
    }

    #[test]
    fn trunc_traps_out_of_range() {
        assert_eq!(
            i32_trunc_f32_s(2_147_483_648.0).unwrap_err().code,
            codes::INTEGER_OVERFLOW
        );
        assert_eq!(
            i32_trunc_f64_u(-1.0).unwrap_err().code,
            codes::INTEGER_OVERFLOW
        );
        assert_eq!(
            i64_trunc_f64_s(f64::INFINITY).unwrap_err().code,
            codes::INTEGER_OVERFLOW
        );
    }

    #[test]
    fn trunc_boundaries() {
        assert_eq!(i32_trunc_f64_s(2_147_483_647.9).unwrap(), i32::MAX);
        assert_eq!(i32_trunc_f64_s(-2_147_483_648.9).unwrap(), i32::MIN);
        assert_eq!(i32_trunc_f64_u(4_294_967_295.5).unwrap(), -1);
        assert_eq!(i64_trunc_f64_s(-3.7).unwrap(), -3);
        assert_eq!(
            i64_trunc_f64_u(18_446_744_073_709_549_568.0).unwrap() as u64,
            18_446_744_073_709_549_568
        );
    }

    #[test]
    fn extend_and_wrap() {
        assert_eq!(i64_extend_i32_s(-1), -1);
        assert_eq!(i64_extend_i32_u(-1), 0xffff_ffff);
        assert_eq!(i32_wrap_i64(0x1_0000_0001), 1);
    }

    #[test]
    fn reinterpret_round_trips_bits() {
        let bits = 0x7fc0_1234u32;
        assert_eq!(
            i32_reinterpret_f32(FloatBits32::from_bits(bits)),
            bits as i32
        );
        assert_eq!(f32_reinterpret_i32(bits as i32).to_bits(), bits);
    }

    #[test]
    fn demote_promote_canonicalize_nan() {
        assert_eq!(f32_demote_f64(f64::NAN), FloatBits32::NAN);
        assert_eq!(f64_promote_f32(f32::NAN), FloatBits64::NAN);
        assert_eq!(f64_promote_f32(1.5).value(), 1.5);
    }
}
