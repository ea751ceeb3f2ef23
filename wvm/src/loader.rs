// WVM - wvm
// Module: Loader
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Module loading from files, bytes, and pre-compiled shared objects.
//!
//! Plain `.wasm` files are read fully and decoded. A path ending in `.so`
//! is a pre-compiled module: the [`LoadManager`] implementation extracts
//! the embedded Wasm bytes and a version string, the version is matched
//! against [`crate::VERSION`], and the bytes then take the normal decode
//! path. Executing the compiled entry point is out of scope; the trait
//! keeps the seam open.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::error;

use wvm_decoder::Module;
use wvm_error::{codes, Error, Result};

/// Access to a pre-compiled shared-object module.
///
/// The core consumes only the embedded bytes and version; the raw symbol
/// accessor exists for embedders that execute the compiled entry point
/// themselves.
pub trait LoadManager {
    /// Points the manager at a shared object on disk.
    fn set_path(&mut self, path: &str) -> Result<()>;

    /// Version string the module was compiled against.
    fn get_version(&self) -> Result<String>;

    /// The original Wasm bytes embedded in the shared object.
    fn get_wasm_bytes(&self) -> Result<Vec<u8>>;

    /// Raw address of a named symbol, null when absent.
    fn get_raw_symbol(&self, name: &str) -> *const u8;
}

/// Loads and decodes WebAssembly modules.
#[derive(Default)]
pub struct Loader {
    load_mgr: Option<Box<dyn LoadManager>>,
}

impl core::fmt::Debug for Loader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Loader")
            .field("load_mgr", &self.load_mgr.as_ref().map(|_| "<manager>"))
            .finish()
    }
}

impl Loader {
    /// Creates a loader without a shared-object manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader that can open pre-compiled modules.
    #[must_use]
    pub fn with_load_manager(load_mgr: Box<dyn LoadManager>) -> Self {
        Self {
            load_mgr: Some(load_mgr),
        }
    }

    /// Reads a file fully into memory.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|err| {
            error!("cannot open {}: {err}", path.display());
            Error::io(codes::INVALID_PATH, "cannot open file")
        })?;
        let expected = file.metadata().map(|meta| meta.len()).unwrap_or(0);
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|err| {
            error!("cannot read {}: {err}", path.display());
            Error::io(codes::READ_ERROR, "cannot read file")
        })?;
        if (bytes.len() as u64) < expected {
            error!("short read on {}", path.display());
            return Err(Error::io(codes::END_OF_FILE, "file ended early"));
        }
        Ok(bytes)
    }

    /// Parses a module from a file path.
    ///
    /// Paths ending in `.so` go through the [`LoadManager`]; anything else
    /// is read and decoded directly.
    pub fn parse_module(&mut self, path: &str) -> Result<Module> {
        if path.ends_with(".so") {
            let bytes = self.load_compiled(path)?;
            Self::parse_bytes(&bytes)
        } else {
            let bytes = Self::load_file(path)?;
            Self::parse_bytes(&bytes)
        }
    }

    /// Decodes a module from in-memory bytes.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Module> {
        wvm_decoder::decode(bytes).map_err(|err| {
            error!("module decode failed: {err}");
            err
        })
    }

    fn load_compiled(&mut self, path: &str) -> Result<Vec<u8>> {
        let Some(load_mgr) = self.load_mgr.as_mut() else {
            error!("no load manager configured for {path}");
            return Err(Error::io(
                codes::INVALID_PATH,
                "no load manager for shared objects",
            ));
        };
        load_mgr.set_path(path)?;
        let version = load_mgr.get_version()?;
        if version != crate::VERSION {
            error!(
                "compiled module version {version:?} does not match runtime {:?}",
                crate::VERSION
            );
            return Err(Error::decode(
                codes::INVALID_VERSION,
                "compiled module version mismatch",
            ));
        }
        load_mgr.get_wasm_bytes()
    }
}
