//! Minimal embedding: register a host function, instantiate a module that
//! imports it, and invoke an export.
//!
//! Run with `cargo run --example host_add`.

use wvm::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let bytes = wat::parse_str(
        r#"
        (module
          (import "env" "offset" (func $offset (result i32)))
          (func (export "add_offset") (param i32) (result i32)
            local.get 0
            call $offset
            i32.add))
        "#,
    )
    .expect("valid wat");

    let mut vm = Vm::new();
    vm.register_host_module(ImportObject::new("env").with_func(
        "offset",
        FuncType::new(vec![], vec![ValueType::I32]),
        |_mem: Option<&mut MemoryInstance>, _args: &[Value]| Ok(vec![Value::I32(100)]),
    ))?;

    let module = Loader::parse_bytes(&bytes)?;
    vm.register_module("demo", &module)?;

    let add_offset = vm.find_exported_func("demo", "add_offset")?;
    let results = vm.invoke(add_offset, &[Value::I32(7)])?;
    println!("add_offset(7) = {:?}", results);
    Ok(())
}
