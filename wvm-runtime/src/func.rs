// WVM - wvm-runtime
// Module: Function Instance
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly function instances: module-defined bodies and host callables.

use core::fmt;

use crate::host::HostFunction;
use crate::prelude::*;

/// A function instance in the store.
///
/// Bodies are shared behind [`Arc`] so a call can hold the instructions
/// while the interpreter mutates other store entities.
#[derive(Clone)]
pub enum FunctionInstance {
    /// A module-defined function
    Wasm {
        /// Address of the owning module instance
        module_addr: Addr,
        /// Signature
        ty: FuncType,
        /// Declared locals, zero-initialized at call time
        locals: Vec<ValueType>,
        /// Instruction body
        body: Arc<Vec<Instruction>>,
    },
    /// A host-provided function
    Host {
        /// Signature
        ty: FuncType,
        /// The host callable
        callable: Arc<dyn HostFunction>,
    },
}

impl FunctionInstance {
    /// Signature of the function.
    #[must_use]
    pub fn ty(&self) -> &FuncType {
        match self {
            Self::Wasm { ty, .. } | Self::Host { ty, .. } => ty,
        }
    }

    /// True for host functions.
    #[must_use]
    pub const fn is_host(&self) -> bool {
        matches!(self, Self::Host { .. })
    }
}

impl fmt::Debug for FunctionInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wasm {
                module_addr,
                ty,
                locals,
                body,
            } => f
                .debug_struct("Wasm")
                .field("module_addr", module_addr)
                .field("ty", ty)
                .field("locals", locals)
                .field("body_len", &body.len())
                .finish(),
            Self::Host { ty, .. } => f
                .debug_struct("Host")
                .field("ty", ty)
                .field("callable", &"<function>")
                .finish(),
        }
    }
}
