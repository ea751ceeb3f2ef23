//! Integration tests decoding wat-authored modules through the public API.

use wvm_decoder::{decode, validate_module, Instruction};
use wvm_error::codes;
use wvm_types::{ExternalKind, ValueType};

fn build(wat: &str) -> Vec<u8> {
    wat::parse_str(wat).expect("valid wat")
}

#[test]
fn decode_full_module() {
    let bytes = build(
        r#"
        (module
          (import "env" "log" (func $log (param i32)))
          (memory (export "memory") 1 4)
          (global (export "g") (mut i32) (i32.const 42))
          (table 8 funcref)
          (func $id (param i32) (result i32) local.get 0)
          (elem (i32.const 0) $id)
          (func (export "run") (param i32) (result i32)
            local.get 0
            call $id
            i32.const 1
            i32.add)
          (data (i32.const 16) "payload"))
        "#,
    );
    let module = decode(&bytes).unwrap();

    assert_eq!(module.imports.len(), 1);
    assert_eq!(module.num_imports_of(ExternalKind::Function), 1);
    assert_eq!(module.functions.len(), 2);
    assert_eq!(module.code.len(), 2);
    assert_eq!(module.memories.len(), 1);
    assert_eq!(module.memories[0].limits.max, Some(4));
    assert_eq!(module.tables.len(), 1);
    assert_eq!(module.globals.len(), 1);
    assert_eq!(module.elements.len(), 1);
    assert_eq!(module.data.len(), 1);
    assert_eq!(module.data[0].data, b"payload");
    assert_eq!(module.exports.len(), 3);

    validate_module(&module).unwrap();
}

#[test]
fn decode_rejects_truncated_binaries() {
    let bytes = build(r#"(module (func (export "f") (result i32) i32.const 7))"#);
    // Cut anywhere inside the trailing code section: either the declared
    // section size overruns the input or the function/code counts disagree.
    for len in bytes.len().saturating_sub(8)..bytes.len() {
        assert!(decode(&bytes[..len]).is_err(), "prefix of {len} bytes");
    }
    assert!(decode(&bytes).is_ok());
}

#[test]
fn decode_preserves_instruction_order() {
    let bytes = build(
        r#"
        (module
          (func (result i32)
            i32.const 2
            i32.const 3
            i32.mul))
        "#,
    );
    let module = decode(&bytes).unwrap();
    assert_eq!(
        module.code[0].body,
        vec![
            Instruction::I32Const(2),
            Instruction::I32Const(3),
            Instruction::I32Mul,
        ]
    );
    assert_eq!(module.types[0].results, vec![ValueType::I32]);
}

#[test]
fn invalid_binaries_report_decode_codes() {
    assert_eq!(
        decode(&[]).unwrap_err().code,
        codes::INVALID_MAGIC
    );
    assert_eq!(
        decode(b"\0asm\x02\0\0\0").unwrap_err().code,
        codes::INVALID_VERSION
    );
    // Valid header, then a section id past the MVP range.
    assert_eq!(
        decode(b"\0asm\x01\0\0\0\x0D\x01\x00").unwrap_err().code,
        codes::MALFORMED_BINARY
    );
}
