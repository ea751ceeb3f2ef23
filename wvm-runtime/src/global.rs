// WVM - wvm-runtime
// Module: Global Instance
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly global variable instance.

use crate::prelude::*;

/// A WebAssembly global instance.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalInstance {
    ty: GlobalType,
    value: Value,
}

impl GlobalInstance {
    /// Creates a global holding its initial value.
    pub fn new(ty: GlobalType, value: Value) -> Result<Self> {
        if !value.matches_type(ty.value_type) {
            return Err(Error::validation(
                codes::TYPE_MISMATCH,
                "global initializer type does not match declaration",
            ));
        }
        Ok(Self { ty, value })
    }

    /// Declared global type.
    #[must_use]
    pub const fn ty(&self) -> &GlobalType {
        &self.ty
    }

    /// Current value.
    #[must_use]
    pub const fn get(&self) -> Value {
        self.value
    }

    /// Replaces the value. Writing an immutable global is rejected.
    pub fn set(&mut self, value: Value) -> Result<()> {
        if !self.ty.mutable {
            return Err(Error::validation(
                codes::VALIDATION_FAILED,
                "write to immutable global",
            ));
        }
        if !value.matches_type(self.ty.value_type) {
            return Err(Error::validation(
                codes::TYPE_MISMATCH,
                "global value type does not match declaration",
            ));
        }
        self.value = value;
        Ok(())
    }
}
