// WVM - wvm-runtime
// Module: Instantiation
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The instantiation protocol.
//!
//! Imports resolve first and occupy the low indices of each per-module
//! index space; own entities allocate in declared order; exports build
//! next; element and data segments are bounds-checked across the board
//! before a single slot or byte is written; the start function runs last.
//! Any failure rolls the store back to its pre-instantiation entity set.

use log::debug;

use wvm_decoder::module::ImportDesc;

use crate::const_expr::eval_const_expr;
use crate::engine::Engine;
use crate::func::FunctionInstance;
use crate::global::GlobalInstance;
use crate::memory::MemoryInstance;
use crate::module_instance::ModuleInstance;
use crate::prelude::*;
use crate::store::Store;
use crate::table::TableInstance;

impl Engine {
    /// Instantiates `module`, returning the new module instance address.
    pub(crate) fn instantiate(
        &mut self,
        store: &mut Store,
        module: &Module,
        name: Option<&str>,
    ) -> Result<Addr> {
        if let Some(name) = name {
            if store.find_module(name).is_some() {
                return Err(Error::validation(
                    codes::MODULE_NAME_CONFLICT,
                    "module name already registered",
                ));
            }
        }

        let snapshot = store.snapshot();
        match self.instantiate_inner(store, module, name) {
            Ok(addr) => Ok(addr),
            Err(err) => {
                store.rollback(snapshot);
                Err(err)
            }
        }
    }

    fn instantiate_inner(
        &mut self,
        store: &mut Store,
        module: &Module,
        name: Option<&str>,
    ) -> Result<Addr> {
        let mod_addr = store.next_module_addr();
        let mut instance = ModuleInstance::new(name);
        for ty in &module.types {
            instance.add_func_type(ty.clone());
        }

        // Step 1: import resolution. Imported addresses land first in each
        // index space.
        resolve_imports(store, module, &mut instance)?;
        let num_imported_globals = module.num_imports_of(ExternalKind::Global);

        // Step 2: own entities, in declared order.
        for (type_idx, body) in module.functions.iter().zip(&module.code) {
            let ty = module
                .types
                .get(*type_idx as usize)
                .cloned()
                .ok_or_else(Error::wrong_instance_address)?;
            let addr = store.alloc_function(FunctionInstance::Wasm {
                module_addr: mod_addr,
                ty,
                locals: body.locals.clone(),
                body: Arc::new(body.body.clone()),
            });
            instance.add_func_addr(addr);
        }
        for table_type in &module.tables {
            let addr = store.alloc_table(TableInstance::new(*table_type)?);
            instance.add_table_addr(addr);
        }
        for memory_type in &module.memories {
            let addr = store.alloc_memory(MemoryInstance::new(*memory_type)?);
            instance.add_mem_addr(addr);
        }
        for global in &module.globals {
            let value =
                eval_const_expr(&global.init, store, &instance, num_imported_globals)?;
            let addr = store.alloc_global(GlobalInstance::new(global.ty, value)?);
            instance.add_global_addr(addr);
        }

        // Step 3: exports.
        for export in &module.exports {
            let addr = match export.kind {
                ExternalKind::Function => instance.func_addr(export.index)?,
                ExternalKind::Table => instance.table_addr(export.index)?,
                ExternalKind::Memory => instance.mem_addr(export.index)?,
                ExternalKind::Global => instance.global_addr(export.index)?,
            };
            instance.add_export(&export.name, export.kind, addr)?;
        }

        // Step 4: bounds-check every element and data segment before any
        // write, so a failing segment leaves tables and memories untouched.
        let element_offsets =
            check_element_segments(store, module, &instance, num_imported_globals)?;
        let data_offsets = check_data_segments(store, module, &instance, num_imported_globals)?;

        for (segment, offset) in module.elements.iter().zip(element_offsets) {
            let table_addr = instance.table_addr(segment.table_index)?;
            let funcs = segment
                .init
                .iter()
                .map(|func_idx| instance.func_addr(*func_idx))
                .collect::<Result<Vec<Addr>>>()?;
            store.get_table_mut(table_addr)?.init(offset, &funcs)?;
        }
        for (segment, offset) in module.data.iter().zip(data_offsets) {
            let mem_addr = instance.mem_addr(segment.memory_index)?;
            store.get_memory_mut(mem_addr)?.write_bytes(offset, &segment.data)?;
        }

        // Step 5: make the instance live, then run the start function.
        let start_addr = module
            .start
            .map(|start_idx| instance.func_addr(start_idx))
            .transpose()?;
        let addr = store.import_module(instance);
        debug_assert_eq!(addr, mod_addr);

        if let Some(func_addr) = start_addr {
            let ty = store.get_function(func_addr)?.ty();
            if !ty.params.is_empty() || !ty.results.is_empty() {
                return Err(Error::trap(
                    codes::FUNC_SIG_MISMATCH,
                    "start function must take and return nothing",
                ));
            }
            self.run_function(store, func_addr, Vec::new())?;
        }

        debug!(
            "instantiated module {:?} at address {mod_addr}",
            name.unwrap_or("<anonymous>")
        );
        Ok(addr)
    }
}

fn unknown_import() -> Error {
    Error::validation(codes::UNKNOWN_IMPORT, "unknown import")
}

fn incompatible_import() -> Error {
    Error::validation(
        codes::INCOMPATIBLE_IMPORT_TYPE,
        "import type is incompatible",
    )
}

fn resolve_imports(
    store: &Store,
    module: &Module,
    instance: &mut ModuleInstance,
) -> Result<()> {
    for import in &module.imports {
        let provider_addr = store.find_module(&import.module).ok_or_else(unknown_import)?;
        let provider = store.get_module(provider_addr)?;
        let kind = import.desc.kind();

        let addr = match provider.find_export(&import.name, kind) {
            Some(addr) => addr,
            None if provider.has_export(&import.name) => {
                return Err(Error::validation(
                    codes::IMPORT_TYPE_MISMATCH,
                    "import resolves to a different entity kind",
                ))
            }
            None => return Err(unknown_import()),
        };

        match &import.desc {
            ImportDesc::Function(type_idx) => {
                let declared = module
                    .types
                    .get(*type_idx as usize)
                    .ok_or_else(Error::wrong_instance_address)?;
                let provided = store.get_function(addr)?.ty();
                if provided != declared {
                    return Err(incompatible_import());
                }
                instance.add_func_addr(addr);
            }
            ImportDesc::Table(declared) => {
                let provided = store.get_table(addr)?.ty();
                if declared.element != provided.element
                    || !declared.limits.is_compatible_with(&provided.limits)
                {
                    return Err(incompatible_import());
                }
                instance.add_table_addr(addr);
            }
            ImportDesc::Memory(declared) => {
                let provided = store.get_memory(addr)?.ty();
                if !declared.limits.is_compatible_with(&provided.limits) {
                    return Err(incompatible_import());
                }
                instance.add_mem_addr(addr);
            }
            ImportDesc::Global(declared) => {
                let provided = store.get_global(addr)?.ty();
                if provided != declared {
                    return Err(incompatible_import());
                }
                instance.add_global_addr(addr);
            }
        }
    }
    Ok(())
}

fn eval_offset(
    offset_expr: &[Instruction],
    store: &Store,
    instance: &ModuleInstance,
    num_imported_globals: u32,
) -> Result<u32> {
    match eval_const_expr(offset_expr, store, instance, num_imported_globals)? {
        Value::I32(offset) => Ok(offset as u32),
        _ => Err(Error::validation(
            codes::TYPE_MISMATCH,
            "segment offset must be an i32",
        )),
    }
}

fn check_element_segments(
    store: &Store,
    module: &Module,
    instance: &ModuleInstance,
    num_imported_globals: u32,
) -> Result<Vec<u32>> {
    let mut offsets = Vec::with_capacity(module.elements.len());
    for segment in &module.elements {
        let offset = eval_offset(&segment.offset, store, instance, num_imported_globals)?;
        let table_addr = instance.table_addr(segment.table_index)?;
        let table = store.get_table(table_addr)?;
        if !table.check_fits(offset, segment.init.len()) {
            return Err(Error::instantiation(
                codes::ELEM_SEG_DOES_NOT_FIT,
                "element segment does not fit in table",
            ));
        }
        offsets.push(offset);
    }
    Ok(offsets)
}

fn check_data_segments(
    store: &Store,
    module: &Module,
    instance: &ModuleInstance,
    num_imported_globals: u32,
) -> Result<Vec<u32>> {
    let mut offsets = Vec::with_capacity(module.data.len());
    for segment in &module.data {
        let offset = eval_offset(&segment.offset, store, instance, num_imported_globals)?;
        let mem_addr = instance.mem_addr(segment.memory_index)?;
        let memory = store.get_memory(mem_addr)?;
        if !memory.check_fits(offset, segment.data.len()) {
            return Err(Error::instantiation(
                codes::DATA_SEG_DOES_NOT_FIT,
                "data segment does not fit in memory",
            ));
        }
        offsets.push(offset);
    }
    Ok(offsets)
}
