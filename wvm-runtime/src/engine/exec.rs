// WVM - wvm-runtime
// Module: Execution
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Instruction dispatch.
//!
//! Bodies are walked in program order; the outcome of a sequence is either
//! fallthrough, a branch still unwinding toward its target label, or a
//! return. A structured instruction consumes a `Branch(0)` aimed at itself
//! by restoring the operand stack to its entry height plus the label arity,
//! and decrements deeper branches as they pass through. `return` unwinds to
//! the function boundary, where results are collected either way.

use wvm_decoder::MemArg;
use wvm_math as math;

use crate::engine::Engine;
use crate::func::FunctionInstance;
use crate::module_instance::ModuleInstance;
use crate::prelude::*;
use crate::stack::Frame;
use crate::store::Store;

/// How a body finished executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Ran off the end of the sequence
    Fall,
    /// Unwinding toward a label this many levels up
    Branch(u32),
    /// Unwinding to the function boundary
    Return,
}

const INVALID_FRAME: Error =
    Error::runtime(codes::INVALID_FRAME, "no active call frame");
const TYPE_MISMATCH: Error =
    Error::validation(codes::TYPE_MISMATCH, "operand has unexpected type");
const NO_MEMORY: Error = Error::trap(
    codes::MEMORY_OUT_OF_BOUNDS,
    "module has no linear memory",
);

impl Engine {
    fn tick_check(&mut self) -> Result<()> {
        if let Some(tick) = &mut self.tick {
            if tick() {
                return Err(Error::trap(codes::INTERRUPTED, "execution interrupted"));
            }
        }
        Ok(())
    }

    fn current_frame(&self) -> Result<&Frame> {
        self.frames.last().ok_or(INVALID_FRAME)
    }

    fn current_frame_mut(&mut self) -> Result<&mut Frame> {
        self.frames.last_mut().ok_or(INVALID_FRAME)
    }

    fn current_module<'s>(&self, store: &'s Store) -> Result<&'s ModuleInstance> {
        store.get_module(self.current_frame()?.module_addr)
    }

    fn current_mem_addr(&self, store: &Store) -> Result<Addr> {
        self.current_module(store)?
            .default_mem_addr()
            .ok_or(NO_MEMORY)
    }

    /// Runs a function to completion, args in, results out.
    ///
    /// Wasm functions get a fresh frame and execute their body; host
    /// functions trampoline to the embedder callable with the caller's
    /// memory.
    pub(crate) fn run_function(
        &mut self,
        store: &mut Store,
        func_addr: Addr,
        args: Vec<Value>,
    ) -> Result<Vec<Value>> {
        match store.get_function(func_addr)? {
            FunctionInstance::Host { ty, callable } => {
                let ty = ty.clone();
                let callable = Arc::clone(callable);
                let mem_addr = match self.frames.last() {
                    Some(frame) => store.get_module(frame.module_addr)?.default_mem_addr(),
                    None => None,
                };
                let results = match mem_addr {
                    Some(addr) => callable.call(Some(store.get_memory_mut(addr)?), &args)?,
                    None => callable.call(None, &args)?,
                };
                if results.len() != ty.results.len()
                    || ty
                        .results
                        .iter()
                        .zip(&results)
                        .any(|(expected, value)| !value.matches_type(*expected))
                {
                    return Err(Error::trap(
                        codes::FUNC_SIG_MISMATCH,
                        "host function returned a mismatched signature",
                    ));
                }
                Ok(results)
            }
            FunctionInstance::Wasm {
                module_addr,
                ty,
                locals,
                body,
            } => {
                if self.frames.len() >= self.max_call_depth {
                    return Err(Error::trap(
                        codes::CALL_STACK_EXHAUSTED,
                        "call depth limit exceeded",
                    ));
                }
                let module_addr = *module_addr;
                let arity = ty.results.len();
                let result_types = ty.results.clone();
                let body = Arc::clone(body);
                let mut local_values = args;
                local_values.reserve(locals.len());
                for local_ty in locals {
                    local_values.push(Value::default_for(*local_ty));
                }

                let height = self.stack.len();
                self.frames.push(Frame {
                    module_addr,
                    locals: local_values,
                    arity,
                });
                let outcome = self.exec_body(store, &body);
                self.frames.pop();

                match outcome {
                    Ok(_) => {
                        if self.stack.len() < height + arity {
                            self.stack.truncate(height);
                            return Err(Error::runtime(
                                codes::STACK_UNDERFLOW,
                                "function left too few results on the stack",
                            ));
                        }
                        let results = self.stack.pop_values(arity)?;
                        self.stack.truncate(height);
                        if result_types
                            .iter()
                            .zip(&results)
                            .any(|(expected, value)| !value.matches_type(*expected))
                        {
                            return Err(TYPE_MISMATCH);
                        }
                        Ok(results)
                    }
                    Err(err) => {
                        self.stack.truncate(height);
                        Err(err)
                    }
                }
            }
        }
    }

    fn exec_body(&mut self, store: &mut Store, body: &[Instruction]) -> Result<Outcome> {
        for instruction in body {
            self.tick_check()?;
            match self.exec_instr(store, instruction)? {
                Outcome::Fall => {}
                outcome => return Ok(outcome),
            }
        }
        Ok(Outcome::Fall)
    }

    /// Runs a structured body as a label of the given arity.
    fn exec_block(
        &mut self,
        store: &mut Store,
        body: &[Instruction],
        arity: usize,
    ) -> Result<Outcome> {
        let height = self.stack.len();
        match self.exec_body(store, body)? {
            Outcome::Branch(0) => {
                self.stack.unwind(height, arity)?;
                Ok(Outcome::Fall)
            }
            Outcome::Branch(depth) => Ok(Outcome::Branch(depth - 1)),
            outcome => Ok(outcome),
        }
    }

    fn call_by_addr(&mut self, store: &mut Store, func_addr: Addr) -> Result<()> {
        let ty = store.get_function(func_addr)?.ty();
        let num_params = ty.params.len();
        let param_types = ty.params.clone();
        let args = self.stack.pop_values(num_params)?;
        if param_types
            .iter()
            .zip(&args)
            .any(|(expected, value)| !value.matches_type(*expected))
        {
            return Err(TYPE_MISMATCH);
        }
        let results = self.run_function(store, func_addr, args)?;
        for value in results {
            self.stack.push(value);
        }
        Ok(())
    }

    fn mem_load<const N: usize>(&mut self, store: &Store, arg: &MemArg) -> Result<[u8; N]> {
        let base = self.stack.pop_i32()? as u32;
        let mem_addr = self.current_mem_addr(store)?;
        store.get_memory(mem_addr)?.read::<N>(base, arg.offset)
    }

    fn mem_store<const N: usize>(
        &mut self,
        store: &mut Store,
        arg: &MemArg,
        bytes: [u8; N],
    ) -> Result<()> {
        let base = self.stack.pop_i32()? as u32;
        let mem_addr = self.current_mem_addr(store)?;
        store
            .get_memory_mut(mem_addr)?
            .write::<N>(base, arg.offset, bytes)
    }

    fn binop_i32(&mut self, op: impl Fn(i32, i32) -> i32) -> Result<()> {
        let rhs = self.stack.pop_i32()?;
        let lhs = self.stack.pop_i32()?;
        self.stack.push(Value::I32(op(lhs, rhs)));
        Ok(())
    }

    fn binop_i32_trapping(&mut self, op: impl Fn(i32, i32) -> Result<i32>) -> Result<()> {
        let rhs = self.stack.pop_i32()?;
        let lhs = self.stack.pop_i32()?;
        self.stack.push(Value::I32(op(lhs, rhs)?));
        Ok(())
    }

    fn binop_i64(&mut self, op: impl Fn(i64, i64) -> i64) -> Result<()> {
        let rhs = self.stack.pop_i64()?;
        let lhs = self.stack.pop_i64()?;
        self.stack.push(Value::I64(op(lhs, rhs)));
        Ok(())
    }

    fn binop_i64_trapping(&mut self, op: impl Fn(i64, i64) -> Result<i64>) -> Result<()> {
        let rhs = self.stack.pop_i64()?;
        let lhs = self.stack.pop_i64()?;
        self.stack.push(Value::I64(op(lhs, rhs)?));
        Ok(())
    }

    fn binop_f32(&mut self, op: impl Fn(f32, f32) -> FloatBits32) -> Result<()> {
        let rhs = self.stack.pop_f32()?;
        let lhs = self.stack.pop_f32()?;
        self.stack.push(Value::F32(op(lhs, rhs)));
        Ok(())
    }

    fn binop_f64(&mut self, op: impl Fn(f64, f64) -> FloatBits64) -> Result<()> {
        let rhs = self.stack.pop_f64()?;
        let lhs = self.stack.pop_f64()?;
        self.stack.push(Value::F64(op(lhs, rhs)));
        Ok(())
    }

    fn unop_f32(&mut self, op: impl Fn(f32) -> FloatBits32) -> Result<()> {
        let value = self.stack.pop_f32()?;
        self.stack.push(Value::F32(op(value)));
        Ok(())
    }

    fn unop_f64(&mut self, op: impl Fn(f64) -> FloatBits64) -> Result<()> {
        let value = self.stack.pop_f64()?;
        self.stack.push(Value::F64(op(value)));
        Ok(())
    }

    fn cmp_i32(&mut self, op: impl Fn(i32, i32) -> bool) -> Result<()> {
        let rhs = self.stack.pop_i32()?;
        let lhs = self.stack.pop_i32()?;
        self.stack.push(Value::I32(i32::from(op(lhs, rhs))));
        Ok(())
    }

    fn cmp_u32(&mut self, op: impl Fn(u32, u32) -> bool) -> Result<()> {
        let rhs = self.stack.pop_i32()? as u32;
        let lhs = self.stack.pop_i32()? as u32;
        self.stack.push(Value::I32(i32::from(op(lhs, rhs))));
        Ok(())
    }

    fn cmp_i64(&mut self, op: impl Fn(i64, i64) -> bool) -> Result<()> {
        let rhs = self.stack.pop_i64()?;
        let lhs = self.stack.pop_i64()?;
        self.stack.push(Value::I32(i32::from(op(lhs, rhs))));
        Ok(())
    }

    fn cmp_u64(&mut self, op: impl Fn(u64, u64) -> bool) -> Result<()> {
        let rhs = self.stack.pop_i64()? as u64;
        let lhs = self.stack.pop_i64()? as u64;
        self.stack.push(Value::I32(i32::from(op(lhs, rhs))));
        Ok(())
    }

    fn cmp_f32(&mut self, op: impl Fn(f32, f32) -> bool) -> Result<()> {
        let rhs = self.stack.pop_f32()?;
        let lhs = self.stack.pop_f32()?;
        self.stack.push(Value::I32(i32::from(op(lhs, rhs))));
        Ok(())
    }

    fn cmp_f64(&mut self, op: impl Fn(f64, f64) -> bool) -> Result<()> {
        let rhs = self.stack.pop_f64()?;
        let lhs = self.stack.pop_f64()?;
        self.stack.push(Value::I32(i32::from(op(lhs, rhs))));
        Ok(())
    }

    #[allow(clippy::too_many_lines)]
    fn exec_instr(&mut self, store: &mut Store, instruction: &Instruction) -> Result<Outcome> {
        match instruction {
            // Control
            Instruction::Unreachable => {
                return Err(Error::trap(codes::UNREACHABLE, "unreachable executed"))
            }
            Instruction::Nop => {}
            Instruction::Block(block_type, body) => {
                return self.exec_block(store, body, block_type.arity());
            }
            Instruction::Loop(_, body) => {
                // A branch to a loop label restarts the body with an empty
                // label arity.
                let height = self.stack.len();
                loop {
                    match self.exec_body(store, body)? {
                        Outcome::Branch(0) => {
                            self.stack.unwind(height, 0)?;
                        }
                        Outcome::Branch(depth) => return Ok(Outcome::Branch(depth - 1)),
                        Outcome::Fall => return Ok(Outcome::Fall),
                        Outcome::Return => return Ok(Outcome::Return),
                    }
                }
            }
            Instruction::If(block_type, then_body, else_body) => {
                let condition = self.stack.pop_i32()?;
                let body = if condition != 0 { then_body } else { else_body };
                return self.exec_block(store, body, block_type.arity());
            }
            Instruction::Br(label) => return Ok(Outcome::Branch(*label)),
            Instruction::BrIf(label) => {
                if self.stack.pop_i32()? != 0 {
                    return Ok(Outcome::Branch(*label));
                }
            }
            Instruction::BrTable(labels, default) => {
                let index = self.stack.pop_i32()? as u32 as usize;
                let label = labels.get(index).copied().unwrap_or(*default);
                return Ok(Outcome::Branch(label));
            }
            Instruction::Return => return Ok(Outcome::Return),
            Instruction::Call(func_idx) => {
                let func_addr = self.current_module(store)?.func_addr(*func_idx)?;
                self.call_by_addr(store, func_addr)?;
            }
            Instruction::CallIndirect(type_idx) => {
                let module = self.current_module(store)?;
                let expected = module.func_type(*type_idx)?.clone();
                let table_addr = module.table_addr(0).map_err(|_| {
                    Error::trap(codes::UNDEFINED_ELEMENT, "module has no table")
                })?;
                let elem_idx = self.stack.pop_i32()? as u32;
                let entry = store.get_table(table_addr)?.get(elem_idx)?;
                let target = entry.ok_or(Error::trap(
                    codes::UNINITIALIZED_ELEMENT,
                    "uninitialized table element",
                ))?;
                if store.get_function(target)?.ty() != &expected {
                    return Err(Error::trap(
                        codes::INDIRECT_CALL_TYPE_MISMATCH,
                        "indirect call signature mismatch",
                    ));
                }
                self.call_by_addr(store, target)?;
            }

            // Parametric
            Instruction::Drop => {
                self.stack.pop()?;
            }
            Instruction::Select => {
                let condition = self.stack.pop_i32()?;
                let on_zero = self.stack.pop()?;
                let on_nonzero = self.stack.pop()?;
                if on_zero.value_type() != on_nonzero.value_type() {
                    return Err(TYPE_MISMATCH);
                }
                self.stack
                    .push(if condition != 0 { on_nonzero } else { on_zero });
            }

            // Variable
            Instruction::LocalGet(index) => {
                let frame = self.current_frame()?;
                let value = *frame.locals.get(*index as usize).ok_or(Error::validation(
                    codes::VALIDATION_FAILED,
                    "local index out of range",
                ))?;
                self.stack.push(value);
            }
            Instruction::LocalSet(index) => {
                let value = self.stack.pop()?;
                set_local(self.current_frame_mut()?, *index, value)?;
            }
            Instruction::LocalTee(index) => {
                let value = self.stack.pop()?;
                self.stack.push(value);
                set_local(self.current_frame_mut()?, *index, value)?;
            }
            Instruction::GlobalGet(index) => {
                let addr = self.current_module(store)?.global_addr(*index)?;
                self.stack.push(store.get_global(addr)?.get());
            }
            Instruction::GlobalSet(index) => {
                let addr = self.current_module(store)?.global_addr(*index)?;
                let value = self.stack.pop()?;
                store.get_global_mut(addr)?.set(value)?;
            }

            // Memory
            Instruction::I32Load(arg) => {
                let bytes = self.mem_load::<4>(store, arg)?;
                self.stack.push(Value::I32(i32::from_le_bytes(bytes)));
            }
            Instruction::I64Load(arg) => {
                let bytes = self.mem_load::<8>(store, arg)?;
                self.stack.push(Value::I64(i64::from_le_bytes(bytes)));
            }
            Instruction::F32Load(arg) => {
                let bytes = self.mem_load::<4>(store, arg)?;
                self.stack
                    .push(Value::F32(FloatBits32::from_bits(u32::from_le_bytes(bytes))));
            }
            Instruction::F64Load(arg) => {
                let bytes = self.mem_load::<8>(store, arg)?;
                self.stack
                    .push(Value::F64(FloatBits64::from_bits(u64::from_le_bytes(bytes))));
            }
            Instruction::I32Load8S(arg) => {
                let bytes = self.mem_load::<1>(store, arg)?;
                self.stack.push(Value::I32(i32::from(bytes[0] as i8)));
            }
            Instruction::I32Load8U(arg) => {
                let bytes = self.mem_load::<1>(store, arg)?;
                self.stack.push(Value::I32(i32::from(bytes[0])));
            }
            Instruction::I32Load16S(arg) => {
                let bytes = self.mem_load::<2>(store, arg)?;
                self.stack
                    .push(Value::I32(i32::from(i16::from_le_bytes(bytes))));
            }
            Instruction::I32Load16U(arg) => {
                let bytes = self.mem_load::<2>(store, arg)?;
                self.stack
                    .push(Value::I32(i32::from(u16::from_le_bytes(bytes))));
            }
            Instruction::I64Load8S(arg) => {
                let bytes = self.mem_load::<1>(store, arg)?;
                self.stack.push(Value::I64(i64::from(bytes[0] as i8)));
            }
            Instruction::I64Load8U(arg) => {
                let bytes = self.mem_load::<1>(store, arg)?;
                self.stack.push(Value::I64(i64::from(bytes[0])));
            }
            Instruction::I64Load16S(arg) => {
                let bytes = self.mem_load::<2>(store, arg)?;
                self.stack
                    .push(Value::I64(i64::from(i16::from_le_bytes(bytes))));
            }
            Instruction::I64Load16U(arg) => {
                let bytes = self.mem_load::<2>(store, arg)?;
                self.stack
                    .push(Value::I64(i64::from(u16::from_le_bytes(bytes))));
            }
            Instruction::I64Load32S(arg) => {
                let bytes = self.mem_load::<4>(store, arg)?;
                self.stack
                    .push(Value::I64(i64::from(i32::from_le_bytes(bytes))));
            }
            Instruction::I64Load32U(arg) => {
                let bytes = self.mem_load::<4>(store, arg)?;
                self.stack
                    .push(Value::I64(i64::from(u32::from_le_bytes(bytes))));
            }
            Instruction::I32Store(arg) => {
                let value = self.stack.pop_i32()?;
                self.mem_store::<4>(store, arg, value.to_le_bytes())?;
            }
            Instruction::I64Store(arg) => {
                let value = self.stack.pop_i64()?;
                self.mem_store::<8>(store, arg, value.to_le_bytes())?;
            }
            Instruction::F32Store(arg) => {
                let value = self.stack.pop_f32_bits()?;
                self.mem_store::<4>(store, arg, value.to_bits().to_le_bytes())?;
            }
            Instruction::F64Store(arg) => {
                let value = self.stack.pop_f64_bits()?;
                self.mem_store::<8>(store, arg, value.to_bits().to_le_bytes())?;
            }
            Instruction::I32Store8(arg) => {
                let value = self.stack.pop_i32()?;
                self.mem_store::<1>(store, arg, [value as u8])?;
            }
            Instruction::I32Store16(arg) => {
                let value = self.stack.pop_i32()?;
                self.mem_store::<2>(store, arg, (value as u16).to_le_bytes())?;
            }
            Instruction::I64Store8(arg) => {
                let value = self.stack.pop_i64()?;
                self.mem_store::<1>(store, arg, [value as u8])?;
            }
            Instruction::I64Store16(arg) => {
                let value = self.stack.pop_i64()?;
                self.mem_store::<2>(store, arg, (value as u16).to_le_bytes())?;
            }
            Instruction::I64Store32(arg) => {
                let value = self.stack.pop_i64()?;
                self.mem_store::<4>(store, arg, (value as u32).to_le_bytes())?;
            }
            Instruction::MemorySize => {
                let mem_addr = self.current_mem_addr(store)?;
                let pages = store.get_memory(mem_addr)?.pages();
                self.stack.push(Value::I32(pages as i32));
            }
            Instruction::MemoryGrow => {
                let delta = self.stack.pop_i32()? as u32;
                let mem_addr = self.current_mem_addr(store)?;
                let result = match store.get_memory_mut(mem_addr)?.grow(delta) {
                    Some(old_pages) => old_pages as i32,
                    None => -1,
                };
                self.stack.push(Value::I32(result));
            }

            // Const
            Instruction::I32Const(value) => self.stack.push(Value::I32(*value)),
            Instruction::I64Const(value) => self.stack.push(Value::I64(*value)),
            Instruction::F32Const(value) => self.stack.push(Value::F32(*value)),
            Instruction::F64Const(value) => self.stack.push(Value::F64(*value)),

            // i32 test and comparison
            Instruction::I32Eqz => {
                let value = self.stack.pop_i32()?;
                self.stack.push(Value::I32(i32::from(value == 0)));
            }
            Instruction::I32Eq => self.cmp_i32(|a, b| a == b)?,
            Instruction::I32Ne => self.cmp_i32(|a, b| a != b)?,
            Instruction::I32LtS => self.cmp_i32(|a, b| a < b)?,
            Instruction::I32LtU => self.cmp_u32(|a, b| a < b)?,
            Instruction::I32GtS => self.cmp_i32(|a, b| a > b)?,
            Instruction::I32GtU => self.cmp_u32(|a, b| a > b)?,
            Instruction::I32LeS => self.cmp_i32(|a, b| a <= b)?,
            Instruction::I32LeU => self.cmp_u32(|a, b| a <= b)?,
            Instruction::I32GeS => self.cmp_i32(|a, b| a >= b)?,
            Instruction::I32GeU => self.cmp_u32(|a, b| a >= b)?,

            // i64 test and comparison
            Instruction::I64Eqz => {
                let value = self.stack.pop_i64()?;
                self.stack.push(Value::I32(i32::from(value == 0)));
            }
            Instruction::I64Eq => self.cmp_i64(|a, b| a == b)?,
            Instruction::I64Ne => self.cmp_i64(|a, b| a != b)?,
            Instruction::I64LtS => self.cmp_i64(|a, b| a < b)?,
            Instruction::I64LtU => self.cmp_u64(|a, b| a < b)?,
            Instruction::I64GtS => self.cmp_i64(|a, b| a > b)?,
            Instruction::I64GtU => self.cmp_u64(|a, b| a > b)?,
            Instruction::I64LeS => self.cmp_i64(|a, b| a <= b)?,
            Instruction::I64LeU => self.cmp_u64(|a, b| a <= b)?,
            Instruction::I64GeS => self.cmp_i64(|a, b| a >= b)?,
            Instruction::I64GeU => self.cmp_u64(|a, b| a >= b)?,

            // Float comparison (IEEE semantics, NaN compares false except ne)
            Instruction::F32Eq => self.cmp_f32(|a, b| a == b)?,
            Instruction::F32Ne => self.cmp_f32(|a, b| a != b)?,
            Instruction::F32Lt => self.cmp_f32(|a, b| a < b)?,
            Instruction::F32Gt => self.cmp_f32(|a, b| a > b)?,
            Instruction::F32Le => self.cmp_f32(|a, b| a <= b)?,
            Instruction::F32Ge => self.cmp_f32(|a, b| a >= b)?,
            Instruction::F64Eq => self.cmp_f64(|a, b| a == b)?,
            Instruction::F64Ne => self.cmp_f64(|a, b| a != b)?,
            Instruction::F64Lt => self.cmp_f64(|a, b| a < b)?,
            Instruction::F64Gt => self.cmp_f64(|a, b| a > b)?,
            Instruction::F64Le => self.cmp_f64(|a, b| a <= b)?,
            Instruction::F64Ge => self.cmp_f64(|a, b| a >= b)?,

            // i32 arithmetic
            Instruction::I32Clz => {
                let value = self.stack.pop_i32()?;
                self.stack.push(Value::I32(value.leading_zeros() as i32));
            }
            Instruction::I32Ctz => {
                let value = self.stack.pop_i32()?;
                self.stack.push(Value::I32(value.trailing_zeros() as i32));
            }
            Instruction::I32Popcnt => {
                let value = self.stack.pop_i32()?;
                self.stack.push(Value::I32(value.count_ones() as i32));
            }
            Instruction::I32Add => self.binop_i32(i32::wrapping_add)?,
            Instruction::I32Sub => self.binop_i32(i32::wrapping_sub)?,
            Instruction::I32Mul => self.binop_i32(i32::wrapping_mul)?,
            Instruction::I32DivS => self.binop_i32_trapping(math::i32_div_s)?,
            Instruction::I32DivU => self.binop_i32_trapping(|a, b| {
                math::i32_div_u(a as u32, b as u32).map(|v| v as i32)
            })?,
            Instruction::I32RemS => self.binop_i32_trapping(math::i32_rem_s)?,
            Instruction::I32RemU => self.binop_i32_trapping(|a, b| {
                math::i32_rem_u(a as u32, b as u32).map(|v| v as i32)
            })?,
            Instruction::I32And => self.binop_i32(|a, b| a & b)?,
            Instruction::I32Or => self.binop_i32(|a, b| a | b)?,
            Instruction::I32Xor => self.binop_i32(|a, b| a ^ b)?,
            Instruction::I32Shl => self.binop_i32(math::i32_shl)?,
            Instruction::I32ShrS => self.binop_i32(math::i32_shr_s)?,
            Instruction::I32ShrU => self.binop_i32(math::i32_shr_u)?,
            Instruction::I32Rotl => self.binop_i32(math::i32_rotl)?,
            Instruction::I32Rotr => self.binop_i32(math::i32_rotr)?,

            // i64 arithmetic
            Instruction::I64Clz => {
                let value = self.stack.pop_i64()?;
                self.stack.push(Value::I64(i64::from(value.leading_zeros())));
            }
            Instruction::I64Ctz => {
                let value = self.stack.pop_i64()?;
                self.stack
                    .push(Value::I64(i64::from(value.trailing_zeros())));
            }
            Instruction::I64Popcnt => {
                let value = self.stack.pop_i64()?;
                self.stack.push(Value::I64(i64::from(value.count_ones())));
            }
            Instruction::I64Add => self.binop_i64(i64::wrapping_add)?,
            Instruction::I64Sub => self.binop_i64(i64::wrapping_sub)?,
            Instruction::I64Mul => self.binop_i64(i64::wrapping_mul)?,
            Instruction::I64DivS => self.binop_i64_trapping(math::i64_div_s)?,
            Instruction::I64DivU => self.binop_i64_trapping(|a, b| {
                math::i64_div_u(a as u64, b as u64).map(|v| v as i64)
            })?,
            Instruction::I64RemS => self.binop_i64_trapping(math::i64_rem_s)?,
            Instruction::I64RemU => self.binop_i64_trapping(|a, b| {
                math::i64_rem_u(a as u64, b as u64).map(|v| v as i64)
            })?,
            Instruction::I64And => self.binop_i64(|a, b| a & b)?,
            Instruction::I64Or => self.binop_i64(|a, b| a | b)?,
            Instruction::I64Xor => self.binop_i64(|a, b| a ^ b)?,
            Instruction::I64Shl => self.binop_i64(math::i64_shl)?,
            Instruction::I64ShrS => self.binop_i64(math::i64_shr_s)?,
            Instruction::I64ShrU => self.binop_i64(math::i64_shr_u)?,
            Instruction::I64Rotl => self.binop_i64(math::i64_rotl)?,
            Instruction::I64Rotr => self.binop_i64(math::i64_rotr)?,

            // f32 arithmetic
            Instruction::F32Abs => self.unop_f32(math::f32_abs)?,
            Instruction::F32Neg => self.unop_f32(math::f32_neg)?,
            Instruction::F32Ceil => self.unop_f32(math::f32_ceil)?,
            Instruction::F32Floor => self.unop_f32(math::f32_floor)?,
            Instruction::F32Trunc => self.unop_f32(math::f32_trunc)?,
            Instruction::F32Nearest => self.unop_f32(math::f32_nearest)?,
            Instruction::F32Sqrt => self.unop_f32(math::f32_sqrt)?,
            Instruction::F32Add => self.binop_f32(math::f32_add)?,
            Instruction::F32Sub => self.binop_f32(math::f32_sub)?,
            Instruction::F32Mul => self.binop_f32(math::f32_mul)?,
            Instruction::F32Div => self.binop_f32(math::f32_div)?,
            Instruction::F32Min => self.binop_f32(math::f32_min)?,
            Instruction::F32Max => self.binop_f32(math::f32_max)?,
            Instruction::F32Copysign => self.binop_f32(math::f32_copysign)?,

            // f64 arithmetic
            Instruction::F64Abs => self.unop_f64(math::f64_abs)?,
            Instruction::F64Neg => self.unop_f64(math::f64_neg)?,
            Instruction::F64Ceil => self.unop_f64(math::f64_ceil)?,
            Instruction::F64Floor => self.unop_f64(math::f64_floor)?,
            Instruction::F64Trunc => self.unop_f64(math::f64_trunc)?,
            Instruction::F64Nearest => self.unop_f64(math::f64_nearest)?,
            Instruction::F64Sqrt => self.unop_f64(math::f64_sqrt)?,
            Instruction::F64Add => self.binop_f64(math::f64_add)?,
            Instruction::F64Sub => self.binop_f64(math::f64_sub)?,
            Instruction::F64Mul => self.binop_f64(math::f64_mul)?,
            Instruction::F64Div => self.binop_f64(math::f64_div)?,
            Instruction::F64Min => self.binop_f64(math::f64_min)?,
            Instruction::F64Max => self.binop_f64(math::f64_max)?,
            Instruction::F64Copysign => self.binop_f64(math::f64_copysign)?,

            // Conversions
            Instruction::I32WrapI64 => {
                let value = self.stack.pop_i64()?;
                self.stack.push(Value::I32(math::i32_wrap_i64(value)));
            }
            Instruction::I32TruncF32S => {
                let value = self.stack.pop_f32()?;
                self.stack.push(Value::I32(math::i32_trunc_f32_s(value)?));
            }
            Instruction::I32TruncF32U => {
                let value = self.stack.pop_f32()?;
                self.stack.push(Value::I32(math::i32_trunc_f32_u(value)?));
            }
            Instruction::I32TruncF64S => {
                let value = self.stack.pop_f64()?;
                self.stack.push(Value::I32(math::i32_trunc_f64_s(value)?));
            }
            Instruction::I32TruncF64U => {
                let value = self.stack.pop_f64()?;
                self.stack.push(Value::I32(math::i32_trunc_f64_u(value)?));
            }
            Instruction::I64ExtendI32S => {
                let value = self.stack.pop_i32()?;
                self.stack.push(Value::I64(math::i64_extend_i32_s(value)));
            }
            Instruction::I64ExtendI32U => {
                let value = self.stack.pop_i32()?;
                self.stack.push(Value::I64(math::i64_extend_i32_u(value)));
            }
            Instruction::I64TruncF32S => {
                let value = self.stack.pop_f32()?;
                self.stack.push(Value::I64(math::i64_trunc_f32_s(value)?));
            }
            Instruction::I64TruncF32U => {
                let value = self.stack.pop_f32()?;
                self.stack.push(Value::I64(math::i64_trunc_f32_u(value)?));
            }
            Instruction::I64TruncF64S => {
                let value = self.stack.pop_f64()?;
                self.stack.push(Value::I64(math::i64_trunc_f64_s(value)?));
            }
            Instruction::I64TruncF64U => {
                let value = self.stack.pop_f64()?;
                self.stack.push(Value::I64(math::i64_trunc_f64_u(value)?));
            }
            Instruction::F32ConvertI32S => {
                let value = self.stack.pop_i32()?;
                self.stack.push(Value::F32(math::f32_convert_i32_s(value)));
            }
            Instruction::F32ConvertI32U => {
                let value = self.stack.pop_i32()?;
                self.stack.push(Value::F32(math::f32_convert_i32_u(value)));
            }
            Instruction::F32ConvertI64S => {
                let value = self.stack.pop_i64()?;
                self.stack.push(Value::F32(math::f32_convert_i64_s(value)));
            }
            Instruction::F32ConvertI64U => {
                let value = self.stack.pop_i64()?;
                self.stack.push(Value::F32(math::f32_convert_i64_u(value)));
            }
            Instruction::F32DemoteF64 => {
                let value = self.stack.pop_f64()?;
                self.stack.push(Value::F32(math::f32_demote_f64(value)));
            }
            Instruction::F64ConvertI32S => {
                let value = self.stack.pop_i32()?;
                self.stack.push(Value::F64(math::f64_convert_i32_s(value)));
            }
            Instruction::F64ConvertI32U => {
                let value = self.stack.pop_i32()?;
                self.stack.push(Value::F64(math::f64_convert_i32_u(value)));
            }
            Instruction::F64ConvertI64S => {
                let value = self.stack.pop_i64()?;
                self.stack.push(Value::F64(math::f64_convert_i64_s(value)));
            }
            Instruction::F64ConvertI64U => {
                let value = self.stack.pop_i64()?;
                self.stack.push(Value::F64(math::f64_convert_i64_u(value)));
            }
            Instruction::F64PromoteF32 => {
                let value = self.stack.pop_f32()?;
                self.stack.push(Value::F64(math::f64_promote_f32(value)));
            }
            Instruction::I32ReinterpretF32 => {
                let value = self.stack.pop_f32_bits()?;
                self.stack.push(Value::I32(math::i32_reinterpret_f32(value)));
            }
            Instruction::I64ReinterpretF64 => {
                let value = self.stack.pop_f64_bits()?;
                self.stack.push(Value::I64(math::i64_reinterpret_f64(value)));
            }
            Instruction::F32ReinterpretI32 => {
                let value = self.stack.pop_i32()?;
                self.stack.push(Value::F32(math::f32_reinterpret_i32(value)));
            }
            Instruction::F64ReinterpretI64 => {
                let value = self.stack.pop_i64()?;
                self.stack.push(Value::F64(math::f64_reinterpret_i64(value)));
            }
        }
        Ok(Outcome::Fall)
    }
}

fn set_local(frame: &mut Frame, index: u32, value: Value) -> Result<()> {
    let slot = frame.locals.get_mut(index as usize).ok_or(Error::validation(
        codes::VALIDATION_FAILED,
        "local index out of range",
    ))?;
    if slot.value_type() != value.value_type() {
        return Err(TYPE_MISMATCH);
    }
    *slot = value;
    Ok(())
}
