// WVM - wvm-error
// Module: Error Handling
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error handling for the WVM WebAssembly interpreter.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! arm is the categorized [`Error`] struct defined here. Errors carry a
//! [`ErrorCategory`], a `u16` code from [`codes`], and a static message.
//! Nothing in the core recovers from an error; failures bubble up to the
//! embedder unchanged.
//!
//! # Error Categories
//!
//! - [`ErrorCategory::Io`]: file loading failures (codes 1000-1099)
//! - [`ErrorCategory::Decode`]: binary format violations (codes 2000-2099)
//! - [`ErrorCategory::Validation`]: static well-formedness and link-time
//!   type checks (codes 3000-3099)
//! - [`ErrorCategory::Instantiation`]: segment placement and constant
//!   expression failures (codes 4000-4099)
//! - [`ErrorCategory::RuntimeTrap`]: WebAssembly traps (codes 5000-5099)
//! - [`ErrorCategory::Runtime`]: embedder programming errors such as dead
//!   store addresses (codes 6000-6099)
//!
//! # Usage
//!
//! ```
//! use wvm_error::{codes, Error, ErrorCategory, Result};
//!
//! fn check(x: u32) -> Result<u32> {
//!     if x == 0 {
//!         return Err(Error::trap(codes::DIVIDE_BY_ZERO, "integer divide by zero"));
//!     }
//!     Ok(x)
//! }
//!
//! let err = check(0).unwrap_err();
//! assert_eq!(err.category, ErrorCategory::RuntimeTrap);
//! assert_eq!(err.code, codes::DIVIDE_BY_ZERO);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]

pub mod codes;
mod errors;

pub use errors::{Error, ErrorCategory};

/// Result alias used across the whole workspace.
pub type Result<T> = core::result::Result<T, Error>;
