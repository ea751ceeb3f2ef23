// WVM - wvm
// Module: Prelude
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! One-stop imports for embedders.
//!
//! ```
//! use wvm::prelude::*;
//! ```

pub use crate::{LoadManager, Loader, Vm, VERSION};
pub use wvm_decoder::{decode, validate_module, Instruction, Module};
pub use wvm_error::{codes, Error, ErrorCategory, Result};
pub use wvm_runtime::{
    Addr, Engine, FunctionInstance, GlobalInstance, HostFunc, HostFunction, ImportObject,
    MemoryInstance, ModuleInstance, Store, TableInstance,
};
pub use wvm_types::{
    ExternalKind, FloatBits32, FloatBits64, FuncType, GlobalType, Limits, MemoryType, TableType,
    Value, ValueType, PAGE_SIZE,
};
