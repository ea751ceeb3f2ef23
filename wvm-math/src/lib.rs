// WVM - wvm-math
// Module: Numeric Semantics
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly numeric semantics.
//!
//! Free functions implementing the exact MVP semantics of integer and
//! floating-point instructions: trap-checked division and remainder,
//! trap-checked float-to-int truncation, and IEEE-754 operations with
//! canonical NaN results. The interpreter calls these from its dispatch loop
//! so that the trap conditions live in one place.
//!
//! Functions that cannot trap return plain values; trappable ones return
//! [`wvm_error::Result`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]

mod convert;
mod float;
mod integer;

pub use convert::{
    f32_convert_i32_s, f32_convert_i32_u, f32_convert_i64_s, f32_convert_i64_u, f32_demote_f64,
    f32_reinterpret_i32, f64_convert_i32_s, f64_convert_i32_u, f64_convert_i64_s,
    f64_convert_i64_u, f64_promote_f32, f64_reinterpret_i64, i32_reinterpret_f32,
    i32_trunc_f32_s, i32_trunc_f32_u, i32_trunc_f64_s, i32_trunc_f64_u, i32_wrap_i64,
    i64_extend_i32_s, i64_extend_i32_u, i64_reinterpret_f64, i64_trunc_f32_s, i64_trunc_f32_u,
    i64_trunc_f64_s, i64_trunc_f64_u,
};
pub use float::{
    f32_abs, f32_add, f32_ceil, f32_copysign, f32_div, f32_floor, f32_max, f32_min, f32_mul,
    f32_nearest, f32_neg, f32_sqrt, f32_sub, f32_trunc, f64_abs, f64_add, f64_ceil, f64_copysign,
    f64_div, f64_floor, f64_max, f64_min, f64_mul, f64_nearest, f64_neg, f64_sqrt, f64_sub,
    f64_trunc,
};
pub use integer::{
    i32_div_s, i32_div_u, i32_rem_s, i32_rem_u, i32_rotl, i32_rotr, i32_shl, i32_shr_s,
    i32_shr_u, i64_div_s, i64_div_u, i64_rem_s, i64_rem_u, i64_rotl, i64_rotr, i64_shl,
    i64_shr_s, i64_shr_u,
};
