// WVM - wvm-runtime
// Module: Prelude
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Common imports for the runtime crate.
//!
//! Modules in this crate pull their shared types from here so that error
//! handling and the core data model stay consistent across the crate.

pub use std::collections::HashMap;
pub use std::sync::Arc;

pub use wvm_decoder::{Instruction, Module};
pub use wvm_error::{codes, Error, ErrorCategory, Result};
pub use wvm_types::{
    BlockType, ExternalKind, FloatBits32, FloatBits64, FuncType, GlobalType, Limits, MemoryType,
    RefType, TableType, Value, ValueType, MAX_MEMORY_PAGES, PAGE_SIZE,
};

/// Dense store address of a runtime entity.
pub type Addr = u32;
