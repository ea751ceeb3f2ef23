// WVM - wvm-decoder
// Module: Binary Decoder
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly 1.0 binary decoder and MVP validator.
//!
//! The decoder materializes a typed [`module::Module`] tree from raw bytes:
//! [`reader::BinaryReader`] handles byte-level framing (LEB128, IEEE-754,
//! length-prefixed vectors, bounded sub-readers), the section decoder in
//! [`module`] builds the tree, and [`validation`] performs the static checks
//! that need no execution. Malformed inputs fail at the framing boundary
//! with a precise error code and, where available, the byte offset.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]

pub mod binary;
pub mod instructions;
pub mod module;
pub mod reader;
pub mod validation;

pub use instructions::{Instruction, MemArg};
pub use module::{
    CustomSection, DataSegment, ElementSegment, Export, FuncBody, Global, Import, ImportDesc,
    Module,
};
pub use reader::BinaryReader;
pub use validation::validate_module;

use wvm_error::Result;

/// Decodes a module from binary bytes.
///
/// Equivalent to [`Module::decode`]; the free function is the conventional
/// entry point for embedders.
pub fn decode(bytes: &[u8]) -> Result<Module> {
    Module::decode(bytes)
}
