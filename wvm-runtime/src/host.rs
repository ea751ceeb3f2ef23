// WVM - wvm-runtime
// Module: Host Interface
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Host module interface.
//!
//! An [`ImportObject`] bundles a module name with named host entities. The
//! engine registers one as a persistent store module, after which Wasm
//! modules resolve their imports against it by `(module, name)` pair.

use crate::memory::MemoryInstance;
use crate::prelude::*;
use crate::table::TableInstance;
use crate::global::GlobalInstance;

/// A callable provided by the embedder.
///
/// The interpreter passes the caller's linear memory (when the calling
/// module has one) and the popped argument values; the callable returns the
/// result values in declared order. A returned error propagates exactly like
/// an interpreter trap.
pub trait HostFunction: Send + Sync {
    /// Invokes the host function.
    fn call(&self, memory: Option<&mut MemoryInstance>, args: &[Value]) -> Result<Vec<Value>>;
}

impl<F> HostFunction for F
where
    F: Fn(Option<&mut MemoryInstance>, &[Value]) -> Result<Vec<Value>> + Send + Sync,
{
    fn call(&self, memory: Option<&mut MemoryInstance>, args: &[Value]) -> Result<Vec<Value>> {
        self(memory, args)
    }
}

/// A host function paired with its declared signature.
pub struct HostFunc {
    /// Signature visible to importing modules
    pub ty: FuncType,
    /// The callable
    pub callable: Arc<dyn HostFunction>,
}

impl HostFunc {
    /// Wraps a closure with its signature.
    pub fn new<F>(ty: FuncType, callable: F) -> Self
    where
        F: HostFunction + 'static,
    {
        Self {
            ty,
            callable: Arc::new(callable),
        }
    }
}

impl core::fmt::Debug for HostFunc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HostFunc")
            .field("ty", &self.ty)
            .field("callable", &"<function>")
            .finish()
    }
}

/// A named collection of host entities backing a module's imports.
#[derive(Debug, Default)]
pub struct ImportObject {
    /// Module name imports resolve against
    pub name: String,
    /// Named host functions
    pub funcs: Vec<(String, HostFunc)>,
    /// Named host tables
    pub tables: Vec<(String, TableInstance)>,
    /// Named host memories
    pub memories: Vec<(String, MemoryInstance)>,
    /// Named host globals
    pub globals: Vec<(String, GlobalInstance)>,
}

impl ImportObject {
    /// Creates an empty import object with the given module name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a host function.
    #[must_use]
    pub fn with_func<F>(mut self, name: impl Into<String>, ty: FuncType, callable: F) -> Self
    where
        F: HostFunction + 'static,
    {
        self.funcs.push((name.into(), HostFunc::new(ty, callable)));
        self
    }

    /// Adds a host table.
    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>, table: TableInstance) -> Self {
        self.tables.push((name.into(), table));
        self
    }

    /// Adds a host memory.
    #[must_use]
    pub fn with_memory(mut self, name: impl Into<String>, memory: MemoryInstance) -> Self {
        self.memories.push((name.into(), memory));
        self
    }

    /// Adds a host global.
    #[must_use]
    pub fn with_global(mut self, name: impl Into<String>, global: GlobalInstance) -> Self {
        self.globals.push((name.into(), global));
        self
    }
}
