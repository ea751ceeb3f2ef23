// WVM - wvm-math
// Module: Integer Operations
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Trap-checked integer division, remainder, and shift/rotate semantics.
//!
//! Add, subtract, multiply, and the bitwise operations are plain wrapping
//! two's-complement arithmetic; the interpreter uses `wrapping_*` inline.
//! The operations here either trap or depend on the masked shift-count rule.

use wvm_error::{codes, Error, Result};

const DIVIDE_BY_ZERO: Error = Error::trap(codes::DIVIDE_BY_ZERO, "integer divide by zero");
const INTEGER_OVERFLOW: Error = Error::trap(codes::INTEGER_OVERFLOW, "integer overflow");

/// `i32.div_s`. Traps on division by zero and on `INT32_MIN / -1`.
pub fn i32_div_s(lhs: i32, rhs: i32) -> Result<i32> {
    if rhs == 0 {
        return Err(DIVIDE_BY_ZERO);
    }
    if lhs == i32::MIN && rhs == -1 {
        return Err(INTEGER_OVERFLOW);
    }
    Ok(lhs.wrapping_div(rhs))
}

/// `i32.div_u`. Traps on division by zero.
pub fn i32_div_u(lhs: u32, rhs: u32) -> Result<u32> {
    if rhs == 0 {
        return Err(DIVIDE_BY_ZERO);
    }
    Ok(lhs / rhs)
}

/// `i32.rem_s`. Traps on division by zero; `INT32_MIN rem -1` is 0.
pub fn i32_rem_s(lhs: i32, rhs: i32) -> Result<i32> {
    if rhs == 0 {
        return Err(DIVIDE_BY_ZERO);
    }
    Ok(lhs.wrapping_rem(rhs))
}

/// `i32.rem_u`. Traps on division by zero.
pub fn i32_rem_u(lhs: u32, rhs: u32) -> Result<u32> {
    if rhs == 0 {
        return Err(DIVIDE_BY_ZERO);
    }
    Ok(lhs % rhs)
}

/// `i64.div_s`. Traps on division by zero and on `INT64_MIN / -1`.
pub fn i64_div_s(lhs: i64, rhs: i64) -> Result<i64> {
    if rhs == 0 {
        return Err(DIVIDE_BY_ZERO);
    }
    if lhs == i64::MIN && rhs == -1 {
        return Err(INTEGER_OVERFLOW);
    }
    Ok(lhs.wrapping_div(rhs))
}

/// `i64.div_u`. Traps on division by zero.
pub fn i64_div_u(lhs: u64, rhs: u64) -> Result<u64> {
    if rhs == 0 {
        return Err(DIVIDE_BY_ZERO);
    }
    Ok(lhs / rhs)
}

/// `i64.rem_s`. Traps on division by zero; `INT64_MIN rem -1` is 0.
pub fn i64_rem_s(lhs: i64, rhs: i64) -> Result<i64> {
    if rhs == 0 {
        return Err(DIVIDE_BY_ZERO);
    }
    Ok(lhs.wrapping_rem(rhs))
}

/// `i64.rem_u`. Traps on division by zero.
pub fn i64_rem_u(lhs: u64, rhs: u64) -> Result<u64> {
    if rhs == 0 {
        return Err(DIVIDE_BY_ZERO);
    }
    Ok(lhs % rhs)
}

/// `i32.shl`. Shift count taken modulo 32.
#[must_use]
pub fn i32_shl(lhs: i32, rhs: i32) -> i32 {
    lhs.wrapping_shl(rhs as u32)
}

/// `i32.shr_s`. Shift count taken modulo 32.
#[must_use]
pub fn i32_shr_s(lhs: i32, rhs: i32) -> i32 {
    lhs.wrapping_shr(rhs as u32)
}

/// `i32.shr_u`. Shift count taken modulo 32.
#[must_use]
pub fn i32_shr_u(lhs: i32, rhs: i32) -> i32 {
    (lhs as u32).wrapping_shr(rhs as u32) as i32
}

/// `i32.rotl`. Rotate count taken modulo 32.
#[must_use]
pub fn i32_rotl(lhs: i32, rhs: i32) -> i32 {
    (lhs as u32).rotate_left(rhs as u32 % 32) as i32
}

/// `i32.rotr`. Rotate count taken modulo 32.
#[must_use]
pub fn i32_rotr(lhs: i32, rhs: i32) -> i32 {
    (lhs as u32).rotate_right(rhs as u32 % 32) as i32
}

/// `i64.shl`. Shift count taken modulo 64.
#[must_use]
pub fn i64_shl(lhs: i64, rhs: i64) -> i64 {
    lhs.wrapping_shl(rhs as u32)
}

/// `i64.shr_s`. Shift count taken modulo 64.
#[must_use]
pub fn i64_shr_s(lhs: i64, rhs: i64) -> i64 {
    lhs.wrapping_shr(rhs as u32)
}

/// `i64.shr_u`. Shift count taken modulo 64.
#[must_use]
pub fn i64_shr_u(lhs: i64, rhs: i64) -> i64 {
    (lhs as u64).wrapping_shr(rhs as u32) as i64
}

/// `i64.rotl`. Rotate count taken modulo 64.
#[must_use]
pub fn i64_rotl(lhs: i64, rhs: i64) -> i64 {
    (lhs as u64).rotate_left((rhs as u64 % 64) as u32) as i64
}

/// `i64.rotr`. Rotate count taken modulo 64.
#[must_use]
pub fn i64_rotr(lhs: i64, rhs: i64) -> i64 {
    (lhs as u64).rotate_right((rhs as u64 % 64) as u32) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use wvm_error::codes;

    #[test]
    fn div_s_traps() {
        assert_eq!(i32_div_s(10, 0).unwrap_err().code, codes::DIVIDE_BY_ZERO);
        assert_eq!(
            i32_div_s(i32::MIN, -1).unwrap_err().code,
            codes::INTEGER_OVERFLOW
        );
        assert_eq!(i32_div_s(-7, 2).unwrap(), -3);
        assert_eq!(i64_div_s(i64::MIN, -1).unwrap_err().code, codes::INTEGER_OVERFLOW);
    }

    #[test]
    fn rem_s_min_by_minus_one_is_zero() {
        assert_eq!(i32_rem_s(i32::MIN, -1).unwrap(), 0);
        assert_eq!(i64_rem_s(i64::MIN, -1).unwrap(), 0);
        assert_eq!(i32_rem_s(-7, 2).unwrap(), -1);
    }

    #[test]
    fn unsigned_division() {
        assert_eq!(i32_div_u(u32::MAX, 2).unwrap(), u32::MAX / 2);
        assert_eq!(i64_rem_u(10, 0).unwrap_err().code, codes::DIVIDE_BY_ZERO);
    }

    #[test]
    fn shifts_mask_their_count() {
        assert_eq!(i32_shl(1, 33), 2);
        assert_eq!(i32_shr_u(i32::MIN, 31), 1);
        assert_eq!(i32_shr_s(i32::MIN, 31), -1);
        assert_eq!(i64_shl(1, 65), 2);
    }

    #[test]
    fn rotates() {
        assert_eq!(i32_rotl(0x8000_0000u32 as i32, 1), 1);
        assert_eq!(i32_rotr(1, 1), 0x8000_0000u32 as i32);
        assert_eq!(i64_rotl(i64::MIN, 1), 1);
    }
}
