// WVM - wvm-decoder
// Module: Static Validation
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Static well-formedness checks that run without executing the module.
//!
//! This covers the checks that need no operand-stack typing: section count
//! agreement, limits form, call and indirect-call target ranges, and branch
//! label depths by structural walk. Full operand-stack type checking is not
//! performed; the interpreter's runtime type discipline catches what remains.

use wvm_error::{codes, Error, Result};
use wvm_types::{Limits, MAX_MEMORY_PAGES};

use crate::instructions::Instruction;
use crate::module::{ImportDesc, Module};

fn validation_failed(message: &'static str) -> Error {
    Error::validation(codes::VALIDATION_FAILED, message)
}

/// Validates a decoded module.
pub fn validate_module(module: &Module) -> Result<()> {
    if module.functions.len() != module.code.len() {
        return Err(validation_failed(
            "function and code section counts differ",
        ));
    }

    for table in module
        .tables
        .iter()
        .map(|t| &t.limits)
        .chain(module.imports.iter().filter_map(|i| match &i.desc {
            ImportDesc::Table(ty) => Some(&ty.limits),
            _ => None,
        }))
    {
        table.validate()?;
    }

    for memory in module
        .memories
        .iter()
        .map(|m| &m.limits)
        .chain(module.imports.iter().filter_map(|i| match &i.desc {
            ImportDesc::Memory(ty) => Some(&ty.limits),
            _ => None,
        }))
    {
        memory.validate()?;
        check_memory_pages(memory)?;
    }

    if module.table_space_len() > 1 {
        return Err(validation_failed("at most one table is supported"));
    }
    if module.memory_space_len() > 1 {
        return Err(validation_failed("at most one memory is supported"));
    }

    check_export_uniqueness(module)?;

    if let Some(start) = module.start {
        let type_idx = module
            .func_type_index(start)
            .ok_or_else(|| validation_failed("start function index out of range"))?;
        let ty = &module.types[type_idx as usize];
        if !ty.params.is_empty() || !ty.results.is_empty() {
            return Err(Error::validation(
                codes::TYPE_MISMATCH,
                "start function must have no parameters and no results",
            ));
        }
    }

    for body in &module.code {
        check_body(module, &body.body, 1)?;
    }

    Ok(())
}

fn check_memory_pages(limits: &Limits) -> Result<()> {
    if limits.min > MAX_MEMORY_PAGES {
        return Err(validation_failed("memory minimum exceeds 65536 pages"));
    }
    if let Some(max) = limits.max {
        if max > MAX_MEMORY_PAGES {
            return Err(validation_failed("memory maximum exceeds 65536 pages"));
        }
    }
    Ok(())
}

fn check_export_uniqueness(module: &Module) -> Result<()> {
    for (i, export) in module.exports.iter().enumerate() {
        for other in &module.exports[..i] {
            if export.kind == other.kind && export.name == other.name {
                return Err(validation_failed("duplicate export name"));
            }
        }
    }
    Ok(())
}

/// Walks a body checking branch depths and call targets.
///
/// `depth` counts the labels in scope, including the implicit function
/// label, so the function body starts at depth 1.
fn check_body(module: &Module, body: &[Instruction], depth: u32) -> Result<()> {
    for instruction in body {
        match instruction {
            Instruction::Block(_, inner) | Instruction::Loop(_, inner) => {
                check_body(module, inner, depth + 1)?;
            }
            Instruction::If(_, then_body, else_body) => {
                check_body(module, then_body, depth + 1)?;
                check_body(module, else_body, depth + 1)?;
            }
            Instruction::Br(label) | Instruction::BrIf(label) => {
                check_label(*label, depth)?;
            }
            Instruction::BrTable(labels, default) => {
                for label in labels {
                    check_label(*label, depth)?;
                }
                check_label(*default, depth)?;
            }
            Instruction::Call(func_idx) => {
                if *func_idx >= module.func_space_len() {
                    return Err(validation_failed("call target out of range"));
                }
            }
            Instruction::CallIndirect(type_idx) => {
                if *type_idx >= module.types.len() as u32 {
                    return Err(validation_failed(
                        "call_indirect type index out of range",
                    ));
                }
                if module.table_space_len() == 0 {
                    return Err(validation_failed("call_indirect requires a table"));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_label(label: u32, depth: u32) -> Result<()> {
    if label >= depth {
        return Err(validation_failed("branch label deeper than scope"));
    }
    Ok(())
}
