// WVM - wvm-runtime
// Module: Constant Expressions
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Minimal evaluator for constant initializer expressions.
//!
//! Global initializers and segment offsets admit exactly one instruction:
//! a `*.const`, or `global.get` of an imported immutable global. This is a
//! separate evaluator, not the interpreter; it needs no stack.

use crate::module_instance::ModuleInstance;
use crate::prelude::*;
use crate::store::Store;

const CONST_EXPR_REQUIRED: Error = Error::instantiation(
    codes::CONST_EXPR_REQUIRED,
    "initializer is not a constant expression",
);

/// Evaluates a constant expression.
///
/// `instance` supplies the global address space resolved so far; only the
/// first `num_imported_globals` entries are visible to `global.get`.
pub fn eval_const_expr(
    expr: &[Instruction],
    store: &Store,
    instance: &ModuleInstance,
    num_imported_globals: u32,
) -> Result<Value> {
    let [instruction] = expr else {
        return Err(CONST_EXPR_REQUIRED);
    };
    match instruction {
        Instruction::I32Const(v) => Ok(Value::I32(*v)),
        Instruction::I64Const(v) => Ok(Value::I64(*v)),
        Instruction::F32Const(v) => Ok(Value::F32(*v)),
        Instruction::F64Const(v) => Ok(Value::F64(*v)),
        Instruction::GlobalGet(index) => {
            if *index >= num_imported_globals {
                return Err(CONST_EXPR_REQUIRED);
            }
            let addr = instance.global_addr(*index)?;
            let global = store.get_global(addr)?;
            if global.ty().mutable {
                return Err(CONST_EXPR_REQUIRED);
            }
            Ok(global.get())
        }
        _ => Err(CONST_EXPR_REQUIRED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global::GlobalInstance;

    fn setup() -> (Store, ModuleInstance) {
        let mut store = Store::new();
        let imm = store
            .alloc_global(
                GlobalInstance::new(
                    GlobalType {
                        value_type: ValueType::I32,
                        mutable: false,
                    },
                    Value::I32(11),
                )
                .unwrap(),
            );
        let mutable = store
            .alloc_global(
                GlobalInstance::new(
                    GlobalType {
                        value_type: ValueType::I32,
                        mutable: true,
                    },
                    Value::I32(22),
                )
                .unwrap(),
            );
        let mut instance = ModuleInstance::new(None);
        instance.add_global_addr(imm);
        instance.add_global_addr(mutable);
        (store, instance)
    }

    #[test]
    fn const_values_evaluate() {
        let (store, instance) = setup();
        let value =
            eval_const_expr(&[Instruction::I64Const(-5)], &store, &instance, 2).unwrap();
        assert_eq!(value, Value::I64(-5));
    }

    #[test]
    fn imported_immutable_global_get() {
        let (store, instance) = setup();
        let value =
            eval_const_expr(&[Instruction::GlobalGet(0)], &store, &instance, 2).unwrap();
        assert_eq!(value, Value::I32(11));
    }

    #[test]
    fn mutable_global_is_rejected() {
        let (store, instance) = setup();
        let err =
            eval_const_expr(&[Instruction::GlobalGet(1)], &store, &instance, 2).unwrap_err();
        assert_eq!(err.code, codes::CONST_EXPR_REQUIRED);
    }

    #[test]
    fn own_globals_are_not_visible() {
        let (store, instance) = setup();
        // Only the first global counts as imported here.
        let err =
            eval_const_expr(&[Instruction::GlobalGet(1)], &store, &instance, 1).unwrap_err();
        assert_eq!(err.code, codes::CONST_EXPR_REQUIRED);
    }

    #[test]
    fn non_const_instructions_are_rejected() {
        let (store, instance) = setup();
        for expr in [
            vec![Instruction::Nop],
            vec![Instruction::I32Const(1), Instruction::I32Const(2)],
            vec![],
        ] {
            let err = eval_const_expr(&expr, &store, &instance, 0).unwrap_err();
            assert_eq!(err.code, codes::CONST_EXPR_REQUIRED);
        }
    }
}
