// WVM - wvm-runtime
// Module: Interpreter Engine
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The interpreter: instantiation driver and execution engine.
//!
//! The engine owns the operand stack and call-frame stack; the store owns
//! every runtime entity. Each public entry point is a top-level request and
//! begins by resetting the store's anonymous region, so scratch
//! instantiations of earlier requests do not accumulate while host modules
//! and named registrations persist.

mod exec;
mod instantiate;

use log::{debug, error};

use crate::func::FunctionInstance;
use crate::host::ImportObject;
use crate::module_instance::ModuleInstance;
use crate::prelude::*;
use crate::stack::{Frame, Stack};
use crate::store::Store;

/// Default bound on the call-frame stack.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Per-instruction hook; returning `true` requests an `Interrupted` trap.
pub type TickFn = Box<dyn FnMut() -> bool + Send>;

/// The WVM interpreter engine.
pub struct Engine {
    stack: Stack,
    frames: Vec<Frame>,
    tick: Option<TickFn>,
    max_call_depth: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("stack_height", &self.stack.len())
            .field("frame_depth", &self.frames.len())
            .field("max_call_depth", &self.max_call_depth)
            .field("tick", &self.tick.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

impl Engine {
    /// Creates an engine with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Stack::new(),
            frames: Vec::new(),
            tick: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Installs a per-instruction hook.
    ///
    /// The hook runs before every instruction dispatch; returning `true`
    /// raises an `Interrupted` trap. Embedders use this for fuel counters
    /// and timeouts.
    pub fn set_tick(&mut self, tick: TickFn) {
        self.tick = Some(tick);
    }

    /// Removes the per-instruction hook.
    pub fn clear_tick(&mut self) {
        self.tick = None;
    }

    /// Sets the call-depth bound.
    pub fn set_max_call_depth(&mut self, depth: usize) {
        self.max_call_depth = depth;
    }

    /// Registers a host module from an [`ImportObject`].
    ///
    /// The module and its entities persist across later requests. A module
    /// with the same name must not already exist.
    pub fn register_host_module(
        &mut self,
        store: &mut Store,
        import_object: ImportObject,
    ) -> Result<()> {
        store.reset();
        if store.find_module(&import_object.name).is_some() {
            error!(
                "host module registration failed: name {:?} already taken",
                import_object.name
            );
            return Err(Error::validation(
                codes::MODULE_NAME_CONFLICT,
                "module name already registered",
            ));
        }

        let mut instance = ModuleInstance::new(Some(import_object.name.as_str()));
        for (name, func) in import_object.funcs {
            let addr = store.alloc_function(FunctionInstance::Host {
                ty: func.ty,
                callable: func.callable,
            });
            instance.add_func_addr(addr);
            instance.add_export(&name, ExternalKind::Function, addr)?;
        }
        for (name, table) in import_object.tables {
            let addr = store.alloc_table(table);
            instance.add_table_addr(addr);
            instance.add_export(&name, ExternalKind::Table, addr)?;
        }
        for (name, memory) in import_object.memories {
            let addr = store.alloc_memory(memory);
            instance.add_mem_addr(addr);
            instance.add_export(&name, ExternalKind::Memory, addr)?;
        }
        for (name, global) in import_object.globals {
            let addr = store.alloc_global(global);
            instance.add_global_addr(addr);
            instance.add_export(&name, ExternalKind::Global, addr)?;
        }

        let mod_addr = store.import_module(instance);
        store.mark_persistent();
        debug!("registered host module at address {mod_addr}");
        Ok(())
    }

    /// Registers a named Wasm module: instantiates it and keeps it
    /// persistent across later requests.
    pub fn register_module(
        &mut self,
        store: &mut Store,
        name: &str,
        module: &Module,
    ) -> Result<Addr> {
        store.reset();
        let addr = self.instantiate(store, module, Some(name)).map_err(|err| {
            error!("module registration failed: {err}");
            err
        })?;
        store.mark_persistent();
        Ok(addr)
    }

    /// Instantiates a module as the scratch instance of this request.
    ///
    /// A named instance is findable and persists until the next top-level
    /// request that resets the store; an anonymous one (`None`) is only
    /// reachable through the returned address.
    pub fn instantiate_module(
        &mut self,
        store: &mut Store,
        name: Option<&str>,
        module: &Module,
    ) -> Result<Addr> {
        store.reset();
        let addr = self.instantiate(store, module, name).map_err(|err| {
            error!("module instantiation failed: {err}");
            err
        })?;
        if name.is_some() {
            store.mark_persistent();
        }
        Ok(addr)
    }

    /// Invokes an exported function by store address.
    ///
    /// Parameters are checked against the signature; results come back in
    /// declared order.
    pub fn invoke(
        &mut self,
        store: &mut Store,
        func_addr: Addr,
        params: &[Value],
    ) -> Result<Vec<Value>> {
        store.reset();
        let func = store.get_function(func_addr).map_err(|err| {
            error!("invoke failed: {err}");
            err
        })?;

        let ty = func.ty();
        if ty.params.len() != params.len()
            || ty
                .params
                .iter()
                .zip(params)
                .any(|(expected, value)| !value.matches_type(*expected))
        {
            error!("invoke failed: argument signature mismatch");
            return Err(Error::trap(
                codes::FUNC_SIG_MISMATCH,
                "arguments do not match function signature",
            ));
        }

        debug!("invoke: function address {func_addr}, {} params", params.len());
        let result = self.run_function(store, func_addr, params.to_vec());
        if let Err(err) = &result {
            error!("invoke trapped: {err}");
        }
        // A trap may leave partial state behind; the next invocation starts
        // from a clean stack either way.
        self.stack.truncate(0);
        self.frames.clear();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(wat: &str) -> Module {
        wvm_decoder::decode(&wat::parse_str(wat).unwrap()).unwrap()
    }

    fn instantiate(wat: &str) -> (Engine, Store, Addr) {
        let module = decode(wat);
        let mut engine = Engine::new();
        let mut store = Store::new();
        let addr = engine
            .instantiate_module(&mut store, Some("test"), &module)
            .unwrap();
        (engine, store, addr)
    }

    fn export_func(store: &Store, mod_addr: Addr, name: &str) -> Addr {
        store
            .get_module(mod_addr)
            .unwrap()
            .find_export(name, ExternalKind::Function)
            .unwrap()
    }

    #[test]
    fn add_function() {
        let (mut engine, mut store, mod_addr) = instantiate(
            r#"
            (module
              (func (export "add") (param i32 i32) (result i32)
                local.get 0
                local.get 1
                i32.add))
            "#,
        );
        let add = export_func(&store, mod_addr, "add");
        let results = engine
            .invoke(&mut store, add, &[Value::I32(3), Value::I32(4)])
            .unwrap();
        assert_eq!(results, vec![Value::I32(7)]);

        // Two's-complement wraparound, no trap.
        let results = engine
            .invoke(&mut store, add, &[Value::I32(i32::MAX), Value::I32(1)])
            .unwrap();
        assert_eq!(results, vec![Value::I32(i32::MIN)]);
    }

    #[test]
    fn invoke_signature_is_checked() {
        let (mut engine, mut store, mod_addr) = instantiate(
            r#"(module (func (export "f") (param i32)))"#,
        );
        let f = export_func(&store, mod_addr, "f");
        let err = engine.invoke(&mut store, f, &[]).unwrap_err();
        assert_eq!(err.code, codes::FUNC_SIG_MISMATCH);
        let err = engine
            .invoke(&mut store, f, &[Value::I64(0)])
            .unwrap_err();
        assert_eq!(err.code, codes::FUNC_SIG_MISMATCH);
    }

    #[test]
    fn division_traps() {
        let (mut engine, mut store, mod_addr) = instantiate(
            r#"
            (module
              (func (export "div") (param i32 i32) (result i32)
                local.get 0
                local.get 1
                i32.div_s))
            "#,
        );
        let div = export_func(&store, mod_addr, "div");
        let err = engine
            .invoke(&mut store, div, &[Value::I32(10), Value::I32(0)])
            .unwrap_err();
        assert_eq!(err.code, codes::DIVIDE_BY_ZERO);
        let err = engine
            .invoke(&mut store, div, &[Value::I32(i32::MIN), Value::I32(-1)])
            .unwrap_err();
        assert_eq!(err.code, codes::INTEGER_OVERFLOW);
        let results = engine
            .invoke(&mut store, div, &[Value::I32(10), Value::I32(3)])
            .unwrap();
        assert_eq!(results, vec![Value::I32(3)]);
    }

    #[test]
    fn block_branching() {
        let (mut engine, mut store, mod_addr) = instantiate(
            r#"
            (module
              (func (export "pick") (param i32) (result i32)
                (block (result i32)
                  (block (result i32)
                    i32.const 10
                    local.get 0
                    br_if 1
                    drop
                    i32.const 20))))
            "#,
        );
        let pick = export_func(&store, mod_addr, "pick");
        assert_eq!(
            engine.invoke(&mut store, pick, &[Value::I32(1)]).unwrap(),
            vec![Value::I32(10)]
        );
        assert_eq!(
            engine.invoke(&mut store, pick, &[Value::I32(0)]).unwrap(),
            vec![Value::I32(20)]
        );
    }

    #[test]
    fn loop_counts_down() {
        let (mut engine, mut store, mod_addr) = instantiate(
            r#"
            (module
              (func (export "sum") (param i32) (result i32)
                (local i32)
                (block
                  (loop
                    local.get 0
                    i32.eqz
                    br_if 1
                    local.get 1
                    local.get 0
                    i32.add
                    local.set 1
                    local.get 0
                    i32.const 1
                    i32.sub
                    local.set 0
                    br 0))
                local.get 1))
            "#,
        );
        let sum = export_func(&store, mod_addr, "sum");
        assert_eq!(
            engine.invoke(&mut store, sum, &[Value::I32(5)]).unwrap(),
            vec![Value::I32(15)]
        );
        assert_eq!(
            engine.invoke(&mut store, sum, &[Value::I32(0)]).unwrap(),
            vec![Value::I32(0)]
        );
    }

    #[test]
    fn br_table_selects_label() {
        let (mut engine, mut store, mod_addr) = instantiate(
            r#"
            (module
              (func (export "route") (param i32) (result i32)
                (block
                  (block
                    (block
                      local.get 0
                      br_table 0 1 2)
                    i32.const 100
                    return)
                  i32.const 200
                  return)
                i32.const 300))
            "#,
        );
        let route = export_func(&store, mod_addr, "route");
        assert_eq!(
            engine.invoke(&mut store, route, &[Value::I32(0)]).unwrap(),
            vec![Value::I32(100)]
        );
        assert_eq!(
            engine.invoke(&mut store, route, &[Value::I32(1)]).unwrap(),
            vec![Value::I32(200)]
        );
        // Out-of-range index takes the default label.
        assert_eq!(
            engine.invoke(&mut store, route, &[Value::I32(9)]).unwrap(),
            vec![Value::I32(300)]
        );
    }

    #[test]
    fn memory_load_store() {
        let (mut engine, mut store, mod_addr) = instantiate(
            r#"
            (module
              (memory 1)
              (data (i32.const 0) "hello")
              (func (export "get") (param i32) (result i32)
                local.get 0
                i32.load8_u)
              (func (export "put") (param i32 i32)
                local.get 0
                local.get 1
                i32.store))
            "#,
        );
        let get = export_func(&store, mod_addr, "get");
        let put = export_func(&store, mod_addr, "put");
        assert_eq!(
            engine.invoke(&mut store, get, &[Value::I32(0)]).unwrap(),
            vec![Value::I32(0x68)]
        );
        let err = engine
            .invoke(&mut store, get, &[Value::I32(65536)])
            .unwrap_err();
        assert_eq!(err.code, codes::MEMORY_OUT_OF_BOUNDS);

        engine
            .invoke(&mut store, put, &[Value::I32(100), Value::I32(-1)])
            .unwrap();
        assert_eq!(
            engine.invoke(&mut store, get, &[Value::I32(100)]).unwrap(),
            vec![Value::I32(0xFF)]
        );
    }

    #[test]
    fn memory_grow_and_size() {
        let (mut engine, mut store, mod_addr) = instantiate(
            r#"
            (module
              (memory 1 2)
              (func (export "grow") (param i32) (result i32)
                local.get 0
                memory.grow)
              (func (export "size") (result i32)
                memory.size))
            "#,
        );
        let grow = export_func(&store, mod_addr, "grow");
        let size = export_func(&store, mod_addr, "size");
        assert_eq!(
            engine.invoke(&mut store, size, &[]).unwrap(),
            vec![Value::I32(1)]
        );
        assert_eq!(
            engine.invoke(&mut store, grow, &[Value::I32(1)]).unwrap(),
            vec![Value::I32(1)]
        );
        assert_eq!(
            engine.invoke(&mut store, grow, &[Value::I32(1)]).unwrap(),
            vec![Value::I32(-1)]
        );
        assert_eq!(
            engine.invoke(&mut store, size, &[]).unwrap(),
            vec![Value::I32(2)]
        );
    }

    #[test]
    fn globals_and_start_function() {
        let (mut engine, mut store, mod_addr) = instantiate(
            r#"
            (module
              (global $g (mut i32) (i32.const 0))
              (func $init
                i32.const 42
                global.set $g)
              (func (export "read") (result i32)
                global.get $g)
              (start $init))
            "#,
        );
        let read = export_func(&store, mod_addr, "read");
        assert_eq!(
            engine.invoke(&mut store, read, &[]).unwrap(),
            vec![Value::I32(42)]
        );
    }

    #[test]
    fn start_trap_rolls_back() {
        let module = decode(
            r#"
            (module
              (func $boom unreachable)
              (start $boom))
            "#,
        );
        let mut engine = Engine::new();
        let mut store = Store::new();
        let before = store.live_counts();
        let err = engine
            .instantiate_module(&mut store, Some("m"), &module)
            .unwrap_err();
        assert_eq!(err.code, codes::UNREACHABLE);
        assert_eq!(store.live_counts(), before);
        assert!(store.find_module("m").is_none());
    }

    #[test]
    fn call_indirect_dispatch() {
        let (mut engine, mut store, mod_addr) = instantiate(
            r#"
            (module
              (type $ii (func (param i32) (result i32)))
              (table 4 funcref)
              (func $double (type $ii) local.get 0 i32.const 2 i32.mul)
              (func $square (type $ii) local.get 0 local.get 0 i32.mul)
              (func $wrong (param i64) (result i64) local.get 0)
              (elem (i32.const 0) $double $square $wrong)
              (func (export "call") (param i32 i32) (result i32)
                local.get 1
                local.get 0
                call_indirect (type $ii)))
            "#,
        );
        let call = export_func(&store, mod_addr, "call");
        assert_eq!(
            engine
                .invoke(&mut store, call, &[Value::I32(0), Value::I32(5)])
                .unwrap(),
            vec![Value::I32(10)]
        );
        assert_eq!(
            engine
                .invoke(&mut store, call, &[Value::I32(1), Value::I32(5)])
                .unwrap(),
            vec![Value::I32(25)]
        );

        // Signature-mismatched element.
        let err = engine
            .invoke(&mut store, call, &[Value::I32(2), Value::I32(5)])
            .unwrap_err();
        assert_eq!(err.code, codes::INDIRECT_CALL_TYPE_MISMATCH);

        // Null slot.
        let err = engine
            .invoke(&mut store, call, &[Value::I32(3), Value::I32(5)])
            .unwrap_err();
        assert_eq!(err.code, codes::UNINITIALIZED_ELEMENT);

        // Past the table end.
        let err = engine
            .invoke(&mut store, call, &[Value::I32(9), Value::I32(5)])
            .unwrap_err();
        assert_eq!(err.code, codes::UNDEFINED_ELEMENT);
    }

    #[test]
    fn host_function_call() {
        let module = decode(
            r#"
            (module
              (import "env" "mul3" (func $mul3 (param i32) (result i32)))
              (func (export "go") (param i32) (result i32)
                local.get 0
                call $mul3))
            "#,
        );
        let mut engine = Engine::new();
        let mut store = Store::new();
        let host = ImportObject::new("env").with_func(
            "mul3",
            FuncType::new(vec![ValueType::I32], vec![ValueType::I32]),
            |_mem: Option<&mut crate::MemoryInstance>, args: &[Value]| {
                let x = args[0].as_i32().unwrap_or(0);
                Ok(vec![Value::I32(x * 3)])
            },
        );
        engine.register_host_module(&mut store, host).unwrap();
        let mod_addr = engine
            .instantiate_module(&mut store, Some("m"), &module)
            .unwrap();
        let go = export_func(&store, mod_addr, "go");
        assert_eq!(
            engine.invoke(&mut store, go, &[Value::I32(7)]).unwrap(),
            vec![Value::I32(21)]
        );
    }

    #[test]
    fn host_trap_propagates() {
        let module = decode(
            r#"
            (module
              (import "env" "fail" (func $fail))
              (func (export "go") call $fail))
            "#,
        );
        let mut engine = Engine::new();
        let mut store = Store::new();
        let host = ImportObject::new("env").with_func(
            "fail",
            FuncType::default(),
            |_mem: Option<&mut crate::MemoryInstance>, _args: &[Value]| {
                Err(Error::trap(codes::UNREACHABLE, "host failure"))
            },
        );
        engine.register_host_module(&mut store, host).unwrap();
        let mod_addr = engine
            .instantiate_module(&mut store, Some("m"), &module)
            .unwrap();
        let go = export_func(&store, mod_addr, "go");
        let err = engine.invoke(&mut store, go, &[]).unwrap_err();
        assert_eq!(err.code, codes::UNREACHABLE);
    }

    #[test]
    fn tick_hook_interrupts() {
        let (mut engine, mut store, mod_addr) = instantiate(
            r#"
            (module
              (func (export "spin")
                (loop br 0)))
            "#,
        );
        let spin = export_func(&store, mod_addr, "spin");
        let mut fuel = 1000u32;
        engine.set_tick(Box::new(move || {
            fuel = fuel.saturating_sub(1);
            fuel == 0
        }));
        let err = engine.invoke(&mut store, spin, &[]).unwrap_err();
        assert_eq!(err.code, codes::INTERRUPTED);
    }

    #[test]
    fn call_depth_is_bounded() {
        // Unbounded wasm recursion pushes a native stack frame per level; the
        // default test-thread stack is too small to reach `max_call_depth`
        // before the OS stack itself would overflow, so this runs on a
        // thread with a larger stack.
        let handle = std::thread::Builder::new()
            .stack_size(64 * 1024 * 1024)
            .spawn(|| {
                let (mut engine, mut store, mod_addr) = instantiate(
                    r#"
                    (module
                      (func $rec (export "rec") call $rec))
                    "#,
                );
                let rec = export_func(&store, mod_addr, "rec");
                let err = engine.invoke(&mut store, rec, &[]).unwrap_err();
                assert_eq!(err.code, codes::CALL_STACK_EXHAUSTED);
            })
            .expect("failed to spawn thread");
        handle.join().expect("call_depth_is_bounded thread panicked");
    }

    #[test]
    fn module_name_conflict() {
        let module = decode("(module)");
        let mut engine = Engine::new();
        let mut store = Store::new();
        engine
            .register_module(&mut store, "m", &module)
            .unwrap();
        let err = engine
            .register_module(&mut store, "m", &module)
            .unwrap_err();
        assert_eq!(err.code, codes::MODULE_NAME_CONFLICT);
    }

    #[test]
    fn unknown_and_incompatible_imports() {
        let mut engine = Engine::new();
        let mut store = Store::new();
        let host = ImportObject::new("env").with_func(
            "f",
            FuncType::new(vec![ValueType::I32], vec![]),
            |_mem: Option<&mut crate::MemoryInstance>, _args: &[Value]| Ok(vec![]),
        );
        engine.register_host_module(&mut store, host).unwrap();

        let missing = decode(r#"(module (import "env" "g" (func)))"#);
        let err = engine
            .instantiate_module(&mut store, None, &missing)
            .unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_IMPORT);

        let wrong_kind = decode(r#"(module (import "env" "f" (global i32)))"#);
        let err = engine
            .instantiate_module(&mut store, None, &wrong_kind)
            .unwrap_err();
        assert_eq!(err.code, codes::IMPORT_TYPE_MISMATCH);

        let wrong_type = decode(r#"(module (import "env" "f" (func (param i64))))"#);
        let err = engine
            .instantiate_module(&mut store, None, &wrong_type)
            .unwrap_err();
        assert_eq!(err.code, codes::INCOMPATIBLE_IMPORT_TYPE);
    }

    #[test]
    fn elem_segment_bounds_are_atomic() {
        let module = decode(
            r#"
            (module
              (table 2 funcref)
              (func $f)
              (elem (i32.const 1) $f $f))
            "#,
        );
        let mut engine = Engine::new();
        let mut store = Store::new();
        let before = store.live_counts();
        let err = engine
            .instantiate_module(&mut store, Some("m"), &module)
            .unwrap_err();
        assert_eq!(err.code, codes::ELEM_SEG_DOES_NOT_FIT);
        assert_eq!(store.live_counts(), before);
    }

    #[test]
    fn data_segment_bounds_are_atomic() {
        let module = decode(
            r#"
            (module
              (memory 1)
              (data (i32.const 65534) "abcdef"))
            "#,
        );
        let mut engine = Engine::new();
        let mut store = Store::new();
        let err = engine
            .instantiate_module(&mut store, Some("m"), &module)
            .unwrap_err();
        assert_eq!(err.code, codes::DATA_SEG_DOES_NOT_FIT);
        assert_eq!(store.live_counts(), [0, 0, 0, 0, 0]);
    }

    #[test]
    fn float_ops_canonicalize_nan() {
        let (mut engine, mut store, mod_addr) = instantiate(
            r#"
            (module
              (func (export "nan_bits") (result i32)
                f32.const 0
                f32.const 0
                f32.div
                i32.reinterpret_f32))
            "#,
        );
        let nan_bits = export_func(&store, mod_addr, "nan_bits");
        let results = engine.invoke(&mut store, nan_bits, &[]).unwrap();
        assert_eq!(results, vec![Value::I32(0x7fc0_0000u32 as i32)]);
    }
}

