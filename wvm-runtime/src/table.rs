// WVM - wvm-runtime
// Module: Table Instance
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly table instance: a slot array of optional function addresses.

use crate::prelude::*;

/// A WebAssembly table instance.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInstance {
    ty: TableType,
    elements: Vec<Option<Addr>>,
}

impl TableInstance {
    /// Creates a table of `ty.limits.min` null slots.
    pub fn new(ty: TableType) -> Result<Self> {
        ty.limits.validate()?;
        Ok(Self {
            ty,
            elements: vec![None; ty.limits.min as usize],
        })
    }

    /// Declared table type.
    #[must_use]
    pub const fn ty(&self) -> &TableType {
        &self.ty
    }

    /// Current number of slots.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.elements.len() as u32
    }

    /// True when the table has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Function address in a slot.
    ///
    /// `None` for a null slot; an error for an index past the table end.
    pub fn get(&self, index: u32) -> Result<Option<Addr>> {
        self.elements
            .get(index as usize)
            .copied()
            .ok_or(Error::trap(
                codes::UNDEFINED_ELEMENT,
                "table index out of bounds",
            ))
    }

    /// Checks that a segment of `len` slots starting at `offset` fits.
    #[must_use]
    pub fn check_fits(&self, offset: u32, len: usize) -> bool {
        u64::from(offset) + len as u64 <= self.elements.len() as u64
    }

    /// Writes a run of function addresses starting at `offset`.
    ///
    /// The caller checks the bounds first; writing past the end is a
    /// programming error inside the runtime.
    pub fn init(&mut self, offset: u32, funcs: &[Addr]) -> Result<()> {
        if !self.check_fits(offset, funcs.len()) {
            return Err(Error::instantiation(
                codes::ELEM_SEG_DOES_NOT_FIT,
                "element segment does not fit in table",
            ));
        }
        for (i, func) in funcs.iter().enumerate() {
            self.elements[offset as usize + i] = Some(*func);
        }
        Ok(())
    }

    /// Snapshot of all slots, used by rollback tests.
    #[must_use]
    pub fn slots(&self) -> &[Option<Addr>] {
        &self.elements
    }
}
