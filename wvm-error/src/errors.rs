// WVM - wvm-error
// Module: Error Types
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The categorized [`Error`] struct and its constructors.

use core::fmt;

use crate::codes;

/// Error categories for WVM operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// File loading errors
    Io = 1,
    /// Binary decoding errors
    Decode = 2,
    /// Static validation and import resolution errors
    Validation = 3,
    /// Instantiation-time errors (segments, constant expressions)
    Instantiation = 4,
    /// WebAssembly traps raised during execution
    RuntimeTrap = 5,
    /// Embedder programming errors
    Runtime = 6,
}

/// WVM error type.
///
/// A cheap `Copy` value pairing a category with a code from [`codes`] and a
/// static message. Decode and runtime errors additionally carry the byte
/// offset of the failing item when the caller has it at hand.
#[derive(Debug, Clone, Copy)]
pub struct Error {
    /// Error category
    pub category: ErrorCategory,
    /// Error code
    pub code: u16,
    /// Static human-readable message
    pub message: &'static str,
    /// Byte offset of the failing item, when cheaply available
    pub offset: Option<u64>,
}

impl Error {
    /// Creates a new error.
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message,
            offset: None,
        }
    }

    /// Attaches the byte offset where the error was detected.
    #[must_use]
    pub const fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Creates an I/O error.
    pub const fn io(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Io, code, message)
    }

    /// Creates a decode error.
    pub const fn decode(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Decode, code, message)
    }

    /// Creates a validation error.
    pub const fn validation(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Validation, code, message)
    }

    /// Creates an instantiation error.
    pub const fn instantiation(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Instantiation, code, message)
    }

    /// Creates a runtime trap.
    pub const fn trap(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::RuntimeTrap, code, message)
    }

    /// Creates an embedder programming error.
    pub const fn runtime(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Runtime, code, message)
    }

    /// Store lookup with a dead or out-of-range address.
    pub const fn wrong_instance_address() -> Self {
        Self::runtime(codes::WRONG_INSTANCE_ADDRESS, "wrong instance address")
    }

    /// Stream ended inside an encoded item.
    pub const fn unexpected_end() -> Self {
        Self::decode(codes::UNEXPECTED_END, "unexpected end of stream")
    }

    /// Returns true when this error is a WebAssembly trap.
    pub const fn is_trap(&self) -> bool {
        matches!(self.category, ErrorCategory::RuntimeTrap)
    }
}

// Equality ignores message text and offset; the (category, code) pair is the
// error's identity.
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.code == other.code
    }
}

impl Eq for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}:{}] {}", self.category, self.code, self.message)?;
        if let Some(offset) = self.offset {
            write!(f, " at offset 0x{offset:x}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_category_and_code() {
        let a = Error::trap(codes::DIVIDE_BY_ZERO, "integer divide by zero");
        let b = Error::trap(codes::DIVIDE_BY_ZERO, "div by zero").with_offset(42);
        let c = Error::trap(codes::INTEGER_OVERFLOW, "integer overflow");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_includes_offset() {
        let err = Error::decode(codes::UNKNOWN_OPCODE, "unknown opcode").with_offset(0x1f);
        let text = err.to_string();
        assert!(text.contains("unknown opcode"));
        assert!(text.contains("0x1f"));
    }

    #[test]
    fn trap_predicate() {
        assert!(Error::trap(codes::UNREACHABLE, "unreachable executed").is_trap());
        assert!(!Error::wrong_instance_address().is_trap());
    }
}
