// WVM - wvm-runtime
// Module: Operand Stack and Frames
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Operand stack and call frames.
//!
//! The operand stack is one contiguous [`Value`] vector; a branch restores
//! it to the height captured at label entry while keeping the label's result
//! arity on top ([`Stack::unwind`]). Call frames carry the owning module
//! address, the locals vector (parameters first), and the return arity.

use crate::prelude::*;

/// A call frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Address of the module that owns the executing function
    pub module_addr: Addr,
    /// Parameters followed by zero-initialized declared locals
    pub locals: Vec<Value>,
    /// Number of results the function returns
    pub arity: usize,
}

/// The operand stack.
#[derive(Debug, Default)]
pub struct Stack {
    values: Vec<Value>,
}

impl Stack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current height.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no operands are on the stack.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pushes a value.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Pops a value.
    pub fn pop(&mut self) -> Result<Value> {
        self.values.pop().ok_or(Error::runtime(
            codes::STACK_UNDERFLOW,
            "operand stack underflow",
        ))
    }

    const TYPE_MISMATCH: Error =
        Error::validation(codes::TYPE_MISMATCH, "operand has unexpected type");

    /// Pops an i32.
    pub fn pop_i32(&mut self) -> Result<i32> {
        self.pop()?.as_i32().ok_or(Self::TYPE_MISMATCH)
    }

    /// Pops an i64.
    pub fn pop_i64(&mut self) -> Result<i64> {
        self.pop()?.as_i64().ok_or(Self::TYPE_MISMATCH)
    }

    /// Pops an f32.
    pub fn pop_f32(&mut self) -> Result<f32> {
        self.pop()?.as_f32().ok_or(Self::TYPE_MISMATCH)
    }

    /// Pops an f64.
    pub fn pop_f64(&mut self) -> Result<f64> {
        self.pop()?.as_f64().ok_or(Self::TYPE_MISMATCH)
    }

    /// Pops an f32 as its exact bit pattern.
    pub fn pop_f32_bits(&mut self) -> Result<FloatBits32> {
        match self.pop()? {
            Value::F32(bits) => Ok(bits),
            _ => Err(Self::TYPE_MISMATCH),
        }
    }

    /// Pops an f64 as its exact bit pattern.
    pub fn pop_f64_bits(&mut self) -> Result<FloatBits64> {
        match self.pop()? {
            Value::F64(bits) => Ok(bits),
            _ => Err(Self::TYPE_MISMATCH),
        }
    }

    /// Pops `arity` values, returning them in push order.
    pub fn pop_values(&mut self, arity: usize) -> Result<Vec<Value>> {
        if self.values.len() < arity {
            return Err(Error::runtime(
                codes::STACK_UNDERFLOW,
                "operand stack underflow",
            ));
        }
        Ok(self.values.split_off(self.values.len() - arity))
    }

    /// Truncates to `height`, dropping any excess values.
    pub fn truncate(&mut self, height: usize) {
        self.values.truncate(height);
    }

    /// Branch restore: truncate to `height` keeping the top `arity` values.
    pub fn unwind(&mut self, height: usize, arity: usize) -> Result<()> {
        let len = self.values.len();
        if len < height + arity {
            return Err(Error::runtime(
                codes::STACK_UNDERFLOW,
                "branch target arity exceeds stack height",
            ));
        }
        self.values.drain(height..len - arity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop() {
        let mut stack = Stack::new();
        stack.push(Value::I32(1));
        stack.push(Value::I64(2));
        assert_eq!(stack.pop_i64().unwrap(), 2);
        assert_eq!(stack.pop_i32().unwrap(), 1);
        assert_eq!(stack.pop().unwrap_err().code, codes::STACK_UNDERFLOW);
    }

    #[test]
    fn typed_pop_rejects_wrong_tag() {
        let mut stack = Stack::new();
        stack.push(Value::I32(1));
        assert_eq!(stack.pop_f64().unwrap_err().code, codes::TYPE_MISMATCH);
    }

    #[test]
    fn unwind_keeps_arity_values() {
        let mut stack = Stack::new();
        for i in 0..5 {
            stack.push(Value::I32(i));
        }
        // Unwind to height 1 keeping one result.
        stack.unwind(1, 1).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop_i32().unwrap(), 4);
        assert_eq!(stack.pop_i32().unwrap(), 0);
    }

    #[test]
    fn pop_values_preserves_order() {
        let mut stack = Stack::new();
        stack.push(Value::I32(1));
        stack.push(Value::I32(2));
        let values = stack.pop_values(2).unwrap();
        assert_eq!(values, vec![Value::I32(1), Value::I32(2)]);
    }
}
