// WVM - wvm-runtime
// Module: Store
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The runtime world: dense-addressed arrays of runtime entities.
//!
//! Addresses are indices into per-kind slot arrays and are never reused.
//! [`Store::reset`] kills the entities of prior anonymous instantiations by
//! emptying their slots; persistent entities (host modules and named module
//! registrations, everything below the watermark) survive. A lookup through
//! a dead or out-of-range address is an embedder programming error and
//! reports `WrongInstanceAddress`.

use log::trace;

use crate::func::FunctionInstance;
use crate::global::GlobalInstance;
use crate::memory::MemoryInstance;
use crate::module_instance::ModuleInstance;
use crate::prelude::*;
use crate::table::TableInstance;

/// Entity-array lengths at a point in time, used for rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreSnapshot {
    funcs: usize,
    tables: usize,
    mems: usize,
    globals: usize,
    modules: usize,
}

/// The store of runtime entities.
#[derive(Debug, Default)]
pub struct Store {
    funcs: Vec<Option<FunctionInstance>>,
    tables: Vec<Option<TableInstance>>,
    mems: Vec<Option<MemoryInstance>>,
    globals: Vec<Option<GlobalInstance>>,
    modules: Vec<Option<ModuleInstance>>,
    persistent: StoreSnapshot,
}

fn get_slot<T>(slots: &[Option<T>], addr: Addr) -> Result<&T> {
    slots
        .get(addr as usize)
        .and_then(Option::as_ref)
        .ok_or_else(Error::wrong_instance_address)
}

fn get_slot_mut<T>(slots: &mut [Option<T>], addr: Addr) -> Result<&mut T> {
    slots
        .get_mut(addr as usize)
        .and_then(Option::as_mut)
        .ok_or_else(Error::wrong_instance_address)
}

fn kill_from<T>(slots: &mut [Option<T>], mark: usize) {
    for slot in slots.iter_mut().skip(mark) {
        *slot = None;
    }
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards entities of prior anonymous instantiations.
    ///
    /// Called at the start of each top-level engine operation. Entities
    /// below the persistence watermark (host modules, named registrations)
    /// survive; everything above dies and its addresses become permanently
    /// dead.
    pub fn reset(&mut self) {
        trace!("store reset: killing entities above watermark {:?}", self.persistent);
        kill_from(&mut self.funcs, self.persistent.funcs);
        kill_from(&mut self.tables, self.persistent.tables);
        kill_from(&mut self.mems, self.persistent.mems);
        kill_from(&mut self.globals, self.persistent.globals);
        kill_from(&mut self.modules, self.persistent.modules);
    }

    /// Marks every currently allocated entity as persistent.
    pub fn mark_persistent(&mut self) {
        self.persistent = self.snapshot();
    }

    /// Captures the current entity-array lengths.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            funcs: self.funcs.len(),
            tables: self.tables.len(),
            mems: self.mems.len(),
            globals: self.globals.len(),
            modules: self.modules.len(),
        }
    }

    /// Removes every entity allocated after `snapshot`.
    ///
    /// Used to undo a failed instantiation; the dropped addresses were never
    /// visible to the embedder.
    pub fn rollback(&mut self, snapshot: StoreSnapshot) {
        self.funcs.truncate(snapshot.funcs);
        self.tables.truncate(snapshot.tables);
        self.mems.truncate(snapshot.mems);
        self.globals.truncate(snapshot.globals);
        self.modules.truncate(snapshot.modules);
    }

    /// Number of live entities per kind, in declaration order of the store
    /// arrays. Exposed for rollback verification.
    #[must_use]
    pub fn live_counts(&self) -> [usize; 5] {
        [
            self.funcs.iter().flatten().count(),
            self.tables.iter().flatten().count(),
            self.mems.iter().flatten().count(),
            self.globals.iter().flatten().count(),
            self.modules.iter().flatten().count(),
        ]
    }

    /// Allocates a function and returns its address.
    pub fn alloc_function(&mut self, func: FunctionInstance) -> Addr {
        self.funcs.push(Some(func));
        (self.funcs.len() - 1) as Addr
    }

    /// Allocates a table and returns its address.
    pub fn alloc_table(&mut self, table: TableInstance) -> Addr {
        self.tables.push(Some(table));
        (self.tables.len() - 1) as Addr
    }

    /// Allocates a memory and returns its address.
    pub fn alloc_memory(&mut self, memory: MemoryInstance) -> Addr {
        self.mems.push(Some(memory));
        (self.mems.len() - 1) as Addr
    }

    /// Allocates a global and returns its address.
    pub fn alloc_global(&mut self, global: GlobalInstance) -> Addr {
        self.globals.push(Some(global));
        (self.globals.len() - 1) as Addr
    }

    /// Allocates a module instance and returns its address.
    pub fn import_module(&mut self, instance: ModuleInstance) -> Addr {
        self.modules.push(Some(instance));
        (self.modules.len() - 1) as Addr
    }

    /// Address the next module instance will receive.
    ///
    /// Instantiation allocates function instances before their module is
    /// pushed; the functions carry this address.
    #[must_use]
    pub fn next_module_addr(&self) -> Addr {
        self.modules.len() as Addr
    }

    /// Finds a registered module by name.
    #[must_use]
    pub fn find_module(&self, name: &str) -> Option<Addr> {
        self.modules.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|module| module.name.as_deref() == Some(name))
        }).map(|idx| idx as Addr)
    }

    /// Function at an address.
    pub fn get_function(&self, addr: Addr) -> Result<&FunctionInstance> {
        get_slot(&self.funcs, addr)
    }

    /// Table at an address.
    pub fn get_table(&self, addr: Addr) -> Result<&TableInstance> {
        get_slot(&self.tables, addr)
    }

    /// Mutable table at an address.
    pub fn get_table_mut(&mut self, addr: Addr) -> Result<&mut TableInstance> {
        get_slot_mut(&mut self.tables, addr)
    }

    /// Memory at an address.
    pub fn get_memory(&self, addr: Addr) -> Result<&MemoryInstance> {
        get_slot(&self.mems, addr)
    }

    /// Mutable memory at an address.
    pub fn get_memory_mut(&mut self, addr: Addr) -> Result<&mut MemoryInstance> {
        get_slot_mut(&mut self.mems, addr)
    }

    /// Global at an address.
    pub fn get_global(&self, addr: Addr) -> Result<&GlobalInstance> {
        get_slot(&self.globals, addr)
    }

    /// Mutable global at an address.
    pub fn get_global_mut(&mut self, addr: Addr) -> Result<&mut GlobalInstance> {
        get_slot_mut(&mut self.globals, addr)
    }

    /// Module instance at an address.
    pub fn get_module(&self, addr: Addr) -> Result<&ModuleInstance> {
        get_slot(&self.modules, addr)
    }

    /// Mutable module instance at an address.
    pub fn get_module_mut(&mut self, addr: Addr) -> Result<&mut ModuleInstance> {
        get_slot_mut(&mut self.modules, addr)
    }
}
