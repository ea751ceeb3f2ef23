// WVM - wvm
// Module: Facade
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WVM: a WebAssembly 1.0 interpreter.
//!
//! A pure-Rust runtime that loads, validates, instantiates, and executes
//! WebAssembly MVP modules. The workspace splits along the same seams as the
//! processing pipeline:
//!
//! - [`wvm_decoder`] turns bytes into a typed [`Module`] tree and performs
//!   static validation
//! - [`wvm_runtime`] owns the [`Store`] of runtime entities and the
//!   interpreter [`Engine`]
//! - [`wvm_math`] implements the numeric semantics, traps and NaN
//!   canonicalization included
//! - [`wvm_error`] carries the categorized error taxonomy end to end
//!
//! The [`Vm`] type bundles an engine and a store behind the conventional
//! embedding API:
//!
//! ```
//! use wvm::{Vm, Value};
//!
//! let bytes = wat::parse_str(
//!     r#"(module (func (export "add") (param i32 i32) (result i32)
//!            local.get 0
//!            local.get 1
//!            i32.add))"#,
//! )
//! .unwrap();
//!
//! let mut vm = Vm::new();
//! let module = wvm::Loader::parse_bytes(&bytes).unwrap();
//! vm.register_module("math", &module).unwrap();
//! let add = vm.find_exported_func("math", "add").unwrap();
//! let results = vm.invoke(add, &[Value::I32(3), Value::I32(4)]).unwrap();
//! assert_eq!(results, vec![Value::I32(7)]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]

mod loader;
pub mod prelude;
mod vm;

pub use loader::{LoadManager, Loader};
pub use vm::Vm;

pub use wvm_decoder::{decode, validate_module, Instruction, MemArg, Module};
pub use wvm_error::{codes, Error, ErrorCategory, Result};
pub use wvm_runtime::{
    Addr, Engine, FunctionInstance, GlobalInstance, HostFunc, HostFunction, ImportObject,
    MemoryInstance, ModuleInstance, Store, TableInstance,
};
pub use wvm_types::{
    BlockType, ExternalKind, FloatBits32, FloatBits64, FuncType, GlobalType, Limits, MemoryType,
    RefType, TableType, Value, ValueType, MAX_MEMORY_PAGES, PAGE_SIZE,
};

/// Runtime version, matched against the version string embedded in
/// pre-compiled shared-object modules.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
