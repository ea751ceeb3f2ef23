// WVM - wvm
// Module: Virtual Machine
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Convenience wrapper bundling an engine and a store.
//!
//! [`Vm`] validates modules before instantiating them and exposes the
//! embedding API in one place. Embedders that manage their own store
//! lifetimes use [`crate::Engine`] and [`crate::Store`] directly.

use wvm_decoder::{validate_module, Module};
use wvm_error::{codes, Error, Result};
use wvm_runtime::{Addr, Engine, ImportObject, Store};
use wvm_types::{ExternalKind, Value};

/// An engine and its store behind the conventional embedding API.
#[derive(Debug, Default)]
pub struct Vm {
    engine: Engine,
    store: Store,
}

impl Vm {
    /// Creates an empty virtual machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The interpreter engine, for tick hooks and call-depth settings.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// The store of runtime entities.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable access to the store.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Registers a host module; it persists across later requests.
    pub fn register_host_module(&mut self, import_object: ImportObject) -> Result<()> {
        self.engine
            .register_host_module(&mut self.store, import_object)
    }

    /// Validates and registers a named Wasm module.
    pub fn register_module(&mut self, name: &str, module: &Module) -> Result<Addr> {
        validate_module(module)?;
        self.engine.register_module(&mut self.store, name, module)
    }

    /// Validates and instantiates a module as this request's scratch
    /// instance.
    pub fn instantiate_module(&mut self, name: Option<&str>, module: &Module) -> Result<Addr> {
        validate_module(module)?;
        self.engine.instantiate_module(&mut self.store, name, module)
    }

    /// Invokes a function by store address.
    pub fn invoke(&mut self, func_addr: Addr, params: &[Value]) -> Result<Vec<Value>> {
        self.engine.invoke(&mut self.store, func_addr, params)
    }

    /// Resolves an exported function of a registered module to its address.
    pub fn find_exported_func(&self, module_name: &str, func_name: &str) -> Result<Addr> {
        let mod_addr = self
            .store
            .find_module(module_name)
            .ok_or(Error::validation(
                codes::UNKNOWN_IMPORT,
                "module not registered",
            ))?;
        self.store
            .get_module(mod_addr)?
            .find_export(func_name, ExternalKind::Function)
            .ok_or(Error::validation(
                codes::UNKNOWN_IMPORT,
                "no such exported function",
            ))
    }
}
