//! Numeric instruction semantics exercised through exported functions.

use wvm::prelude::*;

fn vm_with(wat: &str) -> Vm {
    let module = Loader::parse_bytes(&wat::parse_str(wat).unwrap()).unwrap();
    let mut vm = Vm::new();
    vm.register_module("m", &module).unwrap();
    vm
}

fn call1(vm: &mut Vm, name: &str, arg: Value) -> Value {
    let func = vm.find_exported_func("m", name).unwrap();
    vm.invoke(func, &[arg]).unwrap()[0]
}

fn call2(vm: &mut Vm, name: &str, lhs: Value, rhs: Value) -> Value {
    let func = vm.find_exported_func("m", name).unwrap();
    vm.invoke(func, &[lhs, rhs]).unwrap()[0]
}

#[test]
fn integer_bit_ops() {
    let mut vm = vm_with(
        r#"
        (module
          (func (export "clz") (param i32) (result i32)
            local.get 0 i32.clz)
          (func (export "ctz") (param i32) (result i32)
            local.get 0 i32.ctz)
          (func (export "popcnt") (param i32) (result i32)
            local.get 0 i32.popcnt)
          (func (export "rotl") (param i32 i32) (result i32)
            local.get 0 local.get 1 i32.rotl)
          (func (export "shr_u") (param i32 i32) (result i32)
            local.get 0 local.get 1 i32.shr_u))
        "#,
    );
    assert_eq!(call1(&mut vm, "clz", Value::I32(1)), Value::I32(31));
    assert_eq!(call1(&mut vm, "clz", Value::I32(0)), Value::I32(32));
    assert_eq!(call1(&mut vm, "ctz", Value::I32(8)), Value::I32(3));
    assert_eq!(call1(&mut vm, "popcnt", Value::I32(-1)), Value::I32(32));
    assert_eq!(
        call2(&mut vm, "rotl", Value::I32(i32::MIN), Value::I32(1)),
        Value::I32(1)
    );
    // Shift counts are taken modulo 32.
    assert_eq!(
        call2(&mut vm, "shr_u", Value::I32(-1), Value::I32(33)),
        Value::I32(0x7fff_ffff)
    );
}

#[test]
fn unsigned_comparisons_differ_from_signed() {
    let mut vm = vm_with(
        r#"
        (module
          (func (export "lt_s") (param i32 i32) (result i32)
            local.get 0 local.get 1 i32.lt_s)
          (func (export "lt_u") (param i32 i32) (result i32)
            local.get 0 local.get 1 i32.lt_u))
        "#,
    );
    // -1 is the largest unsigned value.
    assert_eq!(
        call2(&mut vm, "lt_s", Value::I32(-1), Value::I32(0)),
        Value::I32(1)
    );
    assert_eq!(
        call2(&mut vm, "lt_u", Value::I32(-1), Value::I32(0)),
        Value::I32(0)
    );
}

#[test]
fn rem_s_edge_case_does_not_trap() {
    let mut vm = vm_with(
        r#"
        (module
          (func (export "rem") (param i32 i32) (result i32)
            local.get 0 local.get 1 i32.rem_s))
        "#,
    );
    assert_eq!(
        call2(&mut vm, "rem", Value::I32(i32::MIN), Value::I32(-1)),
        Value::I32(0)
    );
}

#[test]
fn wrap_extend_round_trip() {
    let mut vm = vm_with(
        r#"
        (module
          (func (export "wrap") (param i64) (result i32)
            local.get 0 i32.wrap_i64)
          (func (export "extend_u") (param i32) (result i64)
            local.get 0 i64.extend_i32_u)
          (func (export "extend_s") (param i32) (result i64)
            local.get 0 i64.extend_i32_s))
        "#,
    );
    assert_eq!(
        call1(&mut vm, "wrap", Value::I64(0x1_0000_0005)),
        Value::I32(5)
    );
    assert_eq!(
        call1(&mut vm, "extend_u", Value::I32(-1)),
        Value::I64(0xffff_ffff)
    );
    assert_eq!(call1(&mut vm, "extend_s", Value::I32(-1)), Value::I64(-1));
}

#[test]
fn truncation_traps_and_limits() {
    let mut vm = vm_with(
        r#"
        (module
          (func (export "trunc") (param f64) (result i32)
            local.get 0 i32.trunc_f64_s))
        "#,
    );
    let trunc = vm.find_exported_func("m", "trunc").unwrap();

    assert_eq!(
        vm.invoke(trunc, &[Value::from(-3.9_f64)]).unwrap(),
        vec![Value::I32(-3)]
    );
    let err = vm
        .invoke(trunc, &[Value::from(f64::NAN)])
        .unwrap_err();
    assert_eq!(err.code, codes::INVALID_CONVERSION_TO_INTEGER);
    let err = vm
        .invoke(trunc, &[Value::from(2_147_483_648.0_f64)])
        .unwrap_err();
    assert_eq!(err.code, codes::INTEGER_OVERFLOW);
}

#[test]
fn float_min_max_zero_signs() {
    let mut vm = vm_with(
        r#"
        (module
          (func (export "min_bits") (param f64 f64) (result i64)
            local.get 0 local.get 1 f64.min
            i64.reinterpret_f64)
          (func (export "max_bits") (param f64 f64) (result i64)
            local.get 0 local.get 1 f64.max
            i64.reinterpret_f64))
        "#,
    );
    let pos_zero = Value::from(0.0_f64);
    let neg_zero = Value::from(-0.0_f64);
    assert_eq!(
        call2(&mut vm, "min_bits", pos_zero, neg_zero),
        Value::I64((-0.0_f64).to_bits() as i64)
    );
    assert_eq!(
        call2(&mut vm, "max_bits", neg_zero, pos_zero),
        Value::I64(0)
    );
}

#[test]
fn copysign_and_nearest() {
    let mut vm = vm_with(
        r#"
        (module
          (func (export "copysign") (param f32 f32) (result f32)
            local.get 0 local.get 1 f32.copysign)
          (func (export "nearest") (param f32) (result f32)
            local.get 0 f32.nearest))
        "#,
    );
    assert_eq!(
        call2(
            &mut vm,
            "copysign",
            Value::from(3.5_f32),
            Value::from(-1.0_f32)
        ),
        Value::from(-3.5_f32)
    );
    // Ties round to even.
    assert_eq!(
        call1(&mut vm, "nearest", Value::from(2.5_f32)),
        Value::from(2.0_f32)
    );
    assert_eq!(
        call1(&mut vm, "nearest", Value::from(3.5_f32)),
        Value::from(4.0_f32)
    );
}

#[test]
fn reinterpret_preserves_bits() {
    let mut vm = vm_with(
        r#"
        (module
          (func (export "through_f32") (param i32) (result i32)
            local.get 0
            f32.reinterpret_i32
            i32.reinterpret_f32))
        "#,
    );
    // A NaN payload survives an f32 round trip because reinterpretation
    // never canonicalizes.
    let payload = 0x7f81_2345_u32 as i32;
    assert_eq!(
        call1(&mut vm, "through_f32", Value::I32(payload)),
        Value::I32(payload)
    );
}

#[test]
fn sixty_four_bit_arithmetic() {
    let mut vm = vm_with(
        r#"
        (module
          (func (export "mul") (param i64 i64) (result i64)
            local.get 0 local.get 1 i64.mul)
          (func (export "div_u") (param i64 i64) (result i64)
            local.get 0 local.get 1 i64.div_u))
        "#,
    );
    assert_eq!(
        call2(
            &mut vm,
            "mul",
            Value::I64(i64::MAX),
            Value::I64(2)
        ),
        Value::I64(-2)
    );
    assert_eq!(
        call2(&mut vm, "div_u", Value::I64(-2), Value::I64(2)),
        Value::I64((u64::MAX / 2) as i64)
    );
}
