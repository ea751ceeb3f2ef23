// WVM - wvm-runtime
// Module: Module Instance
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Instantiated module: per-kind address vectors plus named export maps.
//!
//! A module instance holds only store addresses. Imports occupy the low
//! indices of each address vector, so a module-local index maps to a store
//! address by plain vector lookup regardless of whether the entity was
//! imported or defined by the module.

use crate::prelude::*;

/// A runtime module instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleInstance {
    /// Registered name; anonymous instantiations have none
    pub name: Option<String>,
    types: Vec<FuncType>,
    func_addrs: Vec<Addr>,
    table_addrs: Vec<Addr>,
    mem_addrs: Vec<Addr>,
    global_addrs: Vec<Addr>,
    exported_funcs: HashMap<String, Addr>,
    exported_tables: HashMap<String, Addr>,
    exported_mems: HashMap<String, Addr>,
    exported_globals: HashMap<String, Addr>,
}

impl ModuleInstance {
    /// Creates an empty instance, optionally named.
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_owned),
            ..Self::default()
        }
    }

    fn wrong_index() -> Error {
        Error::wrong_instance_address()
    }

    /// Records a function type from the module's type section.
    pub fn add_func_type(&mut self, ty: FuncType) {
        self.types.push(ty);
    }

    /// Function type by type-section index, used by `call_indirect`.
    pub fn func_type(&self, index: u32) -> Result<&FuncType> {
        self.types
            .get(index as usize)
            .ok_or_else(Self::wrong_index)
    }

    /// Appends a function address.
    pub fn add_func_addr(&mut self, addr: Addr) {
        self.func_addrs.push(addr);
    }

    /// Appends a table address.
    pub fn add_table_addr(&mut self, addr: Addr) {
        self.table_addrs.push(addr);
    }

    /// Appends a memory address.
    pub fn add_mem_addr(&mut self, addr: Addr) {
        self.mem_addrs.push(addr);
    }

    /// Appends a global address.
    pub fn add_global_addr(&mut self, addr: Addr) {
        self.global_addrs.push(addr);
    }

    /// Store address of a module-local function index.
    pub fn func_addr(&self, index: u32) -> Result<Addr> {
        self.func_addrs
            .get(index as usize)
            .copied()
            .ok_or_else(Self::wrong_index)
    }

    /// Store address of a module-local table index.
    pub fn table_addr(&self, index: u32) -> Result<Addr> {
        self.table_addrs
            .get(index as usize)
            .copied()
            .ok_or_else(Self::wrong_index)
    }

    /// Store address of a module-local memory index.
    pub fn mem_addr(&self, index: u32) -> Result<Addr> {
        self.mem_addrs
            .get(index as usize)
            .copied()
            .ok_or_else(Self::wrong_index)
    }

    /// Store address of a module-local global index.
    pub fn global_addr(&self, index: u32) -> Result<Addr> {
        self.global_addrs
            .get(index as usize)
            .copied()
            .ok_or_else(Self::wrong_index)
    }

    /// Address of the default memory, when the module has one.
    #[must_use]
    pub fn default_mem_addr(&self) -> Option<Addr> {
        self.mem_addrs.first().copied()
    }

    /// Number of function addresses.
    #[must_use]
    pub fn func_count(&self) -> u32 {
        self.func_addrs.len() as u32
    }

    /// Records an export of the given kind.
    ///
    /// Name-kind pairs must be unique; a duplicate is a validation failure.
    pub fn add_export(&mut self, name: &str, kind: ExternalKind, addr: Addr) -> Result<()> {
        let map = match kind {
            ExternalKind::Function => &mut self.exported_funcs,
            ExternalKind::Table => &mut self.exported_tables,
            ExternalKind::Memory => &mut self.exported_mems,
            ExternalKind::Global => &mut self.exported_globals,
        };
        if map.insert(name.to_owned(), addr).is_some() {
            return Err(Error::validation(
                codes::VALIDATION_FAILED,
                "duplicate export name",
            ));
        }
        Ok(())
    }

    /// Looks up an export by name and kind.
    #[must_use]
    pub fn find_export(&self, name: &str, kind: ExternalKind) -> Option<Addr> {
        let map = match kind {
            ExternalKind::Function => &self.exported_funcs,
            ExternalKind::Table => &self.exported_tables,
            ExternalKind::Memory => &self.exported_mems,
            ExternalKind::Global => &self.exported_globals,
        };
        map.get(name).copied()
    }

    /// True when an export with this name exists under any kind.
    #[must_use]
    pub fn has_export(&self, name: &str) -> bool {
        self.exported_funcs.contains_key(name)
            || self.exported_tables.contains_key(name)
            || self.exported_mems.contains_key(name)
            || self.exported_globals.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_resolve_in_order() {
        let mut instance = ModuleInstance::new(Some("m"));
        instance.add_func_addr(4);
        instance.add_func_addr(9);
        assert_eq!(instance.func_addr(0).unwrap(), 4);
        assert_eq!(instance.func_addr(1).unwrap(), 9);
        assert_eq!(
            instance.func_addr(2).unwrap_err().code,
            codes::WRONG_INSTANCE_ADDRESS
        );
    }

    #[test]
    fn export_lookup_is_per_kind() {
        let mut instance = ModuleInstance::new(None);
        instance
            .add_export("x", ExternalKind::Function, 1)
            .unwrap();
        instance.add_export("x", ExternalKind::Global, 2).unwrap();
        assert_eq!(instance.find_export("x", ExternalKind::Function), Some(1));
        assert_eq!(instance.find_export("x", ExternalKind::Global), Some(2));
        assert_eq!(instance.find_export("x", ExternalKind::Memory), None);
    }

    #[test]
    fn duplicate_export_is_rejected() {
        let mut instance = ModuleInstance::new(None);
        instance.add_export("f", ExternalKind::Function, 1).unwrap();
        let err = instance
            .add_export("f", ExternalKind::Function, 2)
            .unwrap_err();
        assert_eq!(err.code, codes::VALIDATION_FAILED);
    }
}
