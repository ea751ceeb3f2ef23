// WVM - wvm-error
// Module: Error Codes
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for WVM.
//!
//! Codes are grouped by category in blocks of one hundred. A code identifies
//! an error kind uniquely; two [`crate::Error`] values compare equal when
//! their category and code match.

// I/O error codes (1000-1099)

/// File path does not exist or cannot be opened
pub const INVALID_PATH: u16 = 1000;
/// Read from an opened file failed
pub const READ_ERROR: u16 = 1001;
/// File ended before the expected number of bytes
pub const END_OF_FILE: u16 = 1002;

// Decode error codes (2000-2099)

/// Binary does not start with `\0asm`
pub const INVALID_MAGIC: u16 = 2000;
/// Binary version field is not 1, or a compiled module carries a foreign version string
pub const INVALID_VERSION: u16 = 2001;
/// Structurally malformed binary content
pub const MALFORMED_BINARY: u16 = 2002;
/// Stream ended inside an encoded item
pub const UNEXPECTED_END: u16 = 2003;
/// Section content shorter or longer than its declared size
pub const SECTION_SIZE_MISMATCH: u16 = 2004;
/// Non-custom section out of canonical order
pub const SECTION_ORDER: u16 = 2005;
/// Opcode byte outside the MVP instruction set
pub const UNKNOWN_OPCODE: u16 = 2006;
/// LEB128 integer exceeds its byte bound
pub const INTEGER_TOO_LONG: u16 = 2007;
/// Name bytes are not valid UTF-8
pub const INVALID_UTF8: u16 = 2008;

// Validation error codes (3000-3099)

/// Generic static validation failure
pub const VALIDATION_FAILED: u16 = 3000;
/// Static or link-time type mismatch
pub const TYPE_MISMATCH: u16 = 3001;
/// Import target module or entity not registered
pub const UNKNOWN_IMPORT: u16 = 3002;
/// Import resolved to an entity of a different kind
pub const IMPORT_TYPE_MISMATCH: u16 = 3003;
/// Import resolved to the right kind but an incompatible type
pub const INCOMPATIBLE_IMPORT_TYPE: u16 = 3004;
/// Module name already registered in the store
pub const MODULE_NAME_CONFLICT: u16 = 3005;

// Instantiation error codes (4000-4099)

/// Element segment does not fit in its target table
pub const ELEM_SEG_DOES_NOT_FIT: u16 = 4000;
/// Data segment does not fit in its target memory
pub const DATA_SEG_DOES_NOT_FIT: u16 = 4001;
/// Indirect call through a null table slot
pub const UNINITIALIZED_ELEMENT: u16 = 4002;
/// Initializer used an opcode outside the constant expression subset
pub const CONST_EXPR_REQUIRED: u16 = 4003;

// Runtime trap codes (5000-5099)

/// `unreachable` executed
pub const UNREACHABLE: u16 = 5000;
/// Integer division or remainder by zero
pub const DIVIDE_BY_ZERO: u16 = 5001;
/// Signed overflow in division or float-to-int conversion
pub const INTEGER_OVERFLOW: u16 = 5002;
/// Float-to-int conversion of NaN
pub const INVALID_CONVERSION_TO_INTEGER: u16 = 5003;
/// Linear memory access outside the current byte length
pub const MEMORY_OUT_OF_BOUNDS: u16 = 5004;
/// Indirect call target signature differs from the expected type
pub const INDIRECT_CALL_TYPE_MISMATCH: u16 = 5005;
/// Invocation arguments do not match the function signature
pub const FUNC_SIG_MISMATCH: u16 = 5006;
/// Indirect call index outside the table bounds
pub const UNDEFINED_ELEMENT: u16 = 5007;
/// Tick hook requested a trap
pub const INTERRUPTED: u16 = 5008;
/// Call depth limit exceeded
pub const CALL_STACK_EXHAUSTED: u16 = 5009;

// Runtime programming error codes (6000-6099)

/// Store lookup with a dead or out-of-range address
pub const WRONG_INSTANCE_ADDRESS: u16 = 6000;
/// Operand stack popped while empty
pub const STACK_UNDERFLOW: u16 = 6001;
/// Execution reached an instruction with no active call frame
pub const INVALID_FRAME: u16 = 6002;
