// WVM - wvm-types
// Module: Core Types
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Core types shared across the WVM WebAssembly interpreter.
//!
//! This crate defines the value model ([`Value`], [`FloatBits32`],
//! [`FloatBits64`]) and the static type grammar of WebAssembly 1.0 modules
//! ([`ValueType`], [`FuncType`], [`Limits`], [`TableType`], [`MemoryType`],
//! [`GlobalType`]). Decoder, math, and runtime crates all build on these.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]

mod types;
mod values;

pub use types::{
    BlockType, ExternalKind, FuncType, GlobalType, Limits, MemoryType, RefType, TableType,
    ValueType, MAX_MEMORY_PAGES, PAGE_SIZE,
};
pub use values::{FloatBits32, FloatBits64, Value};
