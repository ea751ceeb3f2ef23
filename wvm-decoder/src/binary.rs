// WVM - wvm-decoder
// Module: Binary Format Constants
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Byte-level constants of the WebAssembly 1.0 binary format.

/// WebAssembly magic bytes: `\0asm`
pub const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];

/// WebAssembly binary format version (1)
pub const WASM_VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

// Section IDs

/// Custom section, allowed anywhere
pub const CUSTOM_SECTION_ID: u8 = 0x00;
/// Type section
pub const TYPE_SECTION_ID: u8 = 0x01;
/// Import section
pub const IMPORT_SECTION_ID: u8 = 0x02;
/// Function section
pub const FUNCTION_SECTION_ID: u8 = 0x03;
/// Table section
pub const TABLE_SECTION_ID: u8 = 0x04;
/// Memory section
pub const MEMORY_SECTION_ID: u8 = 0x05;
/// Global section
pub const GLOBAL_SECTION_ID: u8 = 0x06;
/// Export section
pub const EXPORT_SECTION_ID: u8 = 0x07;
/// Start section
pub const START_SECTION_ID: u8 = 0x08;
/// Element section
pub const ELEMENT_SECTION_ID: u8 = 0x09;
/// Code section
pub const CODE_SECTION_ID: u8 = 0x0A;
/// Data section
pub const DATA_SECTION_ID: u8 = 0x0B;

/// Highest section id known to the MVP format
pub const MAX_SECTION_ID: u8 = DATA_SECTION_ID;

// Type encoding bytes

/// Function type constructor byte
pub const FUNC_TYPE: u8 = 0x60;

// Control opcodes

/// `unreachable`
pub const UNREACHABLE: u8 = 0x00;
/// `nop`
pub const NOP: u8 = 0x01;
/// `block`
pub const BLOCK: u8 = 0x02;
/// `loop`
pub const LOOP: u8 = 0x03;
/// `if`
pub const IF: u8 = 0x04;
/// `else`
pub const ELSE: u8 = 0x05;
/// `end`
pub const END: u8 = 0x0B;
/// `br`
pub const BR: u8 = 0x0C;
/// `br_if`
pub const BR_IF: u8 = 0x0D;
/// `br_table`
pub const BR_TABLE: u8 = 0x0E;
/// `return`
pub const RETURN: u8 = 0x0F;
/// `call`
pub const CALL: u8 = 0x10;
/// `call_indirect`
pub const CALL_INDIRECT: u8 = 0x11;

// Parametric opcodes

/// `drop`
pub const DROP: u8 = 0x1A;
/// `select`
pub const SELECT: u8 = 0x1B;

// Variable opcodes

/// `local.get`
pub const LOCAL_GET: u8 = 0x20;
/// `local.set`
pub const LOCAL_SET: u8 = 0x21;
/// `local.tee`
pub const LOCAL_TEE: u8 = 0x22;
/// `global.get`
pub const GLOBAL_GET: u8 = 0x23;
/// `global.set`
pub const GLOBAL_SET: u8 = 0x24;

// Memory opcodes

/// `i32.load`
pub const I32_LOAD: u8 = 0x28;
/// `i64.load`
pub const I64_LOAD: u8 = 0x29;
/// `f32.load`
pub const F32_LOAD: u8 = 0x2A;
/// `f64.load`
pub const F64_LOAD: u8 = 0x2B;
/// `i32.load8_s`
pub const I32_LOAD8_S: u8 = 0x2C;
/// `i32.load8_u`
pub const I32_LOAD8_U: u8 = 0x2D;
/// `i32.load16_s`
pub const I32_LOAD16_S: u8 = 0x2E;
/// `i32.load16_u`
pub const I32_LOAD16_U: u8 = 0x2F;
/// `i64.load8_s`
pub const I64_LOAD8_S: u8 = 0x30;
/// `i64.load8_u`
pub const I64_LOAD8_U: u8 = 0x31;
/// `i64.load16_s`
pub const I64_LOAD16_S: u8 = 0x32;
/// `i64.load16_u`
pub const I64_LOAD16_U: u8 = 0x33;
/// `i64.load32_s`
pub const I64_LOAD32_S: u8 = 0x34;
/// `i64.load32_u`
pub const I64_LOAD32_U: u8 = 0x35;
/// `i32.store`
pub const I32_STORE: u8 = 0x36;
/// `i64.store`
pub const I64_STORE: u8 = 0x37;
/// `f32.store`
pub const F32_STORE: u8 = 0x38;
/// `f64.store`
pub const F64_STORE: u8 = 0x39;
/// `i32.store8`
pub const I32_STORE8: u8 = 0x3A;
/// `i32.store16`
pub const I32_STORE16: u8 = 0x3B;
/// `i64.store8`
pub const I64_STORE8: u8 = 0x3C;
/// `i64.store16`
pub const I64_STORE16: u8 = 0x3D;
/// `i64.store32`
pub const I64_STORE32: u8 = 0x3E;
/// `memory.size`
pub const MEMORY_SIZE: u8 = 0x3F;
/// `memory.grow`
pub const MEMORY_GROW: u8 = 0x40;

// Const opcodes

/// `i32.const`
pub const I32_CONST: u8 = 0x41;
/// `i64.const`
pub const I64_CONST: u8 = 0x42;
/// `f32.const`
pub const F32_CONST: u8 = 0x43;
/// `f64.const`
pub const F64_CONST: u8 = 0x44;

// Numeric opcodes occupy the contiguous range 0x45..=0xBF; the decoder
// matches them individually, so only the range ends are named here.

/// First numeric opcode (`i32.eqz`)
pub const NUMERIC_FIRST: u8 = 0x45;
/// Last numeric opcode (`f64.reinterpret_i64`)
pub const NUMERIC_LAST: u8 = 0xBF;
