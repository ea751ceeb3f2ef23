// WVM - wvm-decoder
// Module: Module Decoding
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Decoded module tree and the section decoder.
//!
//! [`Module::decode`] drives the section loop: magic and version first, then
//! one bounded sub-reader per section, with canonical ordering enforced for
//! non-custom sections. After the loop, cross-section index checks run so a
//! successfully decoded [`Module`] never holds an out-of-range index
//! reference between its own sections.

use log::debug;

use wvm_error::{codes, Error, Result};
use wvm_types::{
    ExternalKind, FuncType, GlobalType, Limits, MemoryType, RefType, TableType, ValueType,
};

use crate::binary;
use crate::instructions::{read_expr, Instruction};
use crate::reader::BinaryReader;

/// Description of an imported entity.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportDesc {
    /// Function import with its type index
    Function(u32),
    /// Table import with its declared type
    Table(TableType),
    /// Memory import with its declared type
    Memory(MemoryType),
    /// Global import with its declared type
    Global(GlobalType),
}

impl ImportDesc {
    /// The external kind this descriptor declares.
    #[must_use]
    pub const fn kind(&self) -> ExternalKind {
        match self {
            Self::Function(_) => ExternalKind::Function,
            Self::Table(_) => ExternalKind::Table,
            Self::Memory(_) => ExternalKind::Memory,
            Self::Global(_) => ExternalKind::Global,
        }
    }
}

/// One import entry: module name, entity name, and descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    /// Name of the providing module
    pub module: String,
    /// Name of the entity inside the providing module
    pub name: String,
    /// Kind and type of the imported entity
    pub desc: ImportDesc,
}

/// One export entry: name, kind, and index into the per-kind index space.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    /// Exported name
    pub name: String,
    /// Entity kind
    pub kind: ExternalKind,
    /// Index into the module's index space for that kind
    pub index: u32,
}

/// A module-defined global: type plus initializer expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    /// Declared type and mutability
    pub ty: GlobalType,
    /// Constant initializer expression
    pub init: Vec<Instruction>,
}

/// An element segment filling a slice of a table with function indices.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSegment {
    /// Target table index (0 in MVP)
    pub table_index: u32,
    /// Constant offset expression
    pub offset: Vec<Instruction>,
    /// Function indices to write
    pub init: Vec<u32>,
}

/// A data segment filling a slice of linear memory with bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSegment {
    /// Target memory index (0 in MVP)
    pub memory_index: u32,
    /// Constant offset expression
    pub offset: Vec<Instruction>,
    /// Byte payload
    pub data: Vec<u8>,
}

/// A function body: flattened local declarations plus instructions.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncBody {
    /// Declared locals in order, after expanding run-length declarations
    pub locals: Vec<ValueType>,
    /// Instruction body
    pub body: Vec<Instruction>,
}

/// A custom section, retained but never interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomSection {
    /// Section name
    pub name: String,
    /// Raw payload after the name
    pub data: Vec<u8>,
}

/// An immutable decoded WebAssembly module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    /// Function signatures from the type section
    pub types: Vec<FuncType>,
    /// Import entries
    pub imports: Vec<Import>,
    /// Type indices of module-defined functions
    pub functions: Vec<u32>,
    /// Module-defined tables
    pub tables: Vec<TableType>,
    /// Module-defined memories
    pub memories: Vec<MemoryType>,
    /// Module-defined globals
    pub globals: Vec<Global>,
    /// Export entries
    pub exports: Vec<Export>,
    /// Optional start function index
    pub start: Option<u32>,
    /// Element segments
    pub elements: Vec<ElementSegment>,
    /// Function bodies, parallel to `functions`
    pub code: Vec<FuncBody>,
    /// Data segments
    pub data: Vec<DataSegment>,
    /// Retained custom sections
    pub customs: Vec<CustomSection>,
}

impl Module {
    /// Decodes a module from its binary encoding.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(bytes);

        let magic = reader.read_bytes(4).map_err(|_| {
            Error::decode(codes::INVALID_MAGIC, "binary shorter than the magic header")
        })?;
        if magic != binary::WASM_MAGIC {
            return Err(Error::decode(
                codes::INVALID_MAGIC,
                "binary does not start with \\0asm",
            ));
        }
        let version = reader.read_bytes(4).map_err(|_| {
            Error::decode(codes::INVALID_VERSION, "binary shorter than the version field")
        })?;
        if version != binary::WASM_VERSION {
            return Err(Error::decode(
                codes::INVALID_VERSION,
                "unsupported binary format version",
            ));
        }

        let mut module = Self::default();
        let mut last_section_id = 0u8;

        while !reader.is_at_end() {
            let section_offset = reader.tell();
            let id = reader.read_u8()?;
            let size = reader.read_u32_leb()? as usize;
            let mut section = reader.sub_reader(size).map_err(|err| {
                Error::decode(
                    codes::SECTION_SIZE_MISMATCH,
                    "declared section size exceeds remaining input",
                )
                .with_offset(err.offset.unwrap_or(section_offset as u64))
            })?;

            if id != binary::CUSTOM_SECTION_ID {
                if id <= last_section_id {
                    return Err(Error::decode(
                        codes::SECTION_ORDER,
                        "section out of canonical order",
                    )
                    .with_offset(section_offset as u64));
                }
                last_section_id = id;
            }

            match id {
                binary::CUSTOM_SECTION_ID => module.customs.push(read_custom(&mut section)?),
                binary::TYPE_SECTION_ID => module.types = read_types(&mut section)?,
                binary::IMPORT_SECTION_ID => module.imports = read_imports(&mut section)?,
                binary::FUNCTION_SECTION_ID => module.functions = read_functions(&mut section)?,
                binary::TABLE_SECTION_ID => module.tables = read_tables(&mut section)?,
                binary::MEMORY_SECTION_ID => module.memories = read_memories(&mut section)?,
                binary::GLOBAL_SECTION_ID => module.globals = read_globals(&mut section)?,
                binary::EXPORT_SECTION_ID => module.exports = read_exports(&mut section)?,
                binary::START_SECTION_ID => module.start = Some(section.read_u32_leb()?),
                binary::ELEMENT_SECTION_ID => module.elements = read_elements(&mut section)?,
                binary::CODE_SECTION_ID => module.code = read_code(&mut section)?,
                binary::DATA_SECTION_ID => module.data = read_data(&mut section)?,
                _ => {
                    return Err(Error::decode(codes::MALFORMED_BINARY, "unknown section id")
                        .with_offset(section_offset as u64))
                }
            }

            section.finish()?;
        }

        module.check_cross_indices()?;
        debug!(
            "decoded module: {} types, {} imports, {} functions, {} exports",
            module.types.len(),
            module.imports.len(),
            module.functions.len(),
            module.exports.len()
        );
        Ok(module)
    }

    /// Number of imported entries of the given kind.
    #[must_use]
    pub fn num_imports_of(&self, kind: ExternalKind) -> u32 {
        self.imports
            .iter()
            .filter(|import| import.desc.kind() == kind)
            .count() as u32
    }

    /// Size of the function index space: imports first, then own functions.
    #[must_use]
    pub fn func_space_len(&self) -> u32 {
        self.num_imports_of(ExternalKind::Function) + self.functions.len() as u32
    }

    /// Size of the table index space.
    #[must_use]
    pub fn table_space_len(&self) -> u32 {
        self.num_imports_of(ExternalKind::Table) + self.tables.len() as u32
    }

    /// Size of the memory index space.
    #[must_use]
    pub fn memory_space_len(&self) -> u32 {
        self.num_imports_of(ExternalKind::Memory) + self.memories.len() as u32
    }

    /// Size of the global index space.
    #[must_use]
    pub fn global_space_len(&self) -> u32 {
        self.num_imports_of(ExternalKind::Global) + self.globals.len() as u32
    }

    /// Type index of a function in the function index space.
    #[must_use]
    pub fn func_type_index(&self, func_idx: u32) -> Option<u32> {
        let imported = self.num_imports_of(ExternalKind::Function);
        if func_idx < imported {
            self.imports
                .iter()
                .filter_map(|import| match import.desc {
                    ImportDesc::Function(type_idx) => Some(type_idx),
                    _ => None,
                })
                .nth(func_idx as usize)
        } else {
            self.functions.get((func_idx - imported) as usize).copied()
        }
    }

    fn check_cross_indices(&self) -> Result<()> {
        const BAD_TYPE_INDEX: Error = Error::decode(
            codes::MALFORMED_BINARY,
            "type index out of range",
        );

        if self.functions.len() != self.code.len() {
            return Err(Error::decode(
                codes::MALFORMED_BINARY,
                "function and code section counts differ",
            ));
        }

        let num_types = self.types.len() as u32;
        for type_idx in &self.functions {
            if *type_idx >= num_types {
                return Err(BAD_TYPE_INDEX);
            }
        }
        for import in &self.imports {
            if let ImportDesc::Function(type_idx) = import.desc {
                if type_idx >= num_types {
                    return Err(BAD_TYPE_INDEX);
                }
            }
        }

        let func_space = self.func_space_len();
        for export in &self.exports {
            let space = match export.kind {
                ExternalKind::Function => func_space,
                ExternalKind::Table => self.table_space_len(),
                ExternalKind::Memory => self.memory_space_len(),
                ExternalKind::Global => self.global_space_len(),
            };
            if export.index >= space {
                return Err(Error::decode(
                    codes::MALFORMED_BINARY,
                    "export index out of range",
                ));
            }
        }

        if let Some(start) = self.start {
            if start >= func_space {
                return Err(Error::decode(
                    codes::MALFORMED_BINARY,
                    "start function index out of range",
                ));
            }
        }

        for element in &self.elements {
            if element.table_index >= self.table_space_len() {
                return Err(Error::decode(
                    codes::MALFORMED_BINARY,
                    "element segment table index out of range",
                ));
            }
            for func_idx in &element.init {
                if *func_idx >= func_space {
                    return Err(Error::decode(
                        codes::MALFORMED_BINARY,
                        "element segment function index out of range",
                    ));
                }
            }
        }

        for segment in &self.data {
            if segment.memory_index >= self.memory_space_len() {
                return Err(Error::decode(
                    codes::MALFORMED_BINARY,
                    "data segment memory index out of range",
                ));
            }
        }

        Ok(())
    }
}

fn read_custom(reader: &mut BinaryReader<'_>) -> Result<CustomSection> {
    let name = reader.read_name()?;
    let data = reader.read_bytes(reader.remaining())?.to_vec();
    Ok(CustomSection { name, data })
}

fn read_types(reader: &mut BinaryReader<'_>) -> Result<Vec<FuncType>> {
    let count = reader.read_vec_count()?;
    let mut types = Vec::with_capacity(count);
    for _ in 0..count {
        let offset = reader.tell();
        let form = reader.read_u8()?;
        if form != binary::FUNC_TYPE {
            return Err(Error::decode(
                codes::MALFORMED_BINARY,
                "type section entry is not a function type",
            )
            .with_offset(offset as u64));
        }
        let params = read_value_types(reader)?;
        let results = read_value_types(reader)?;
        if results.len() > 1 {
            return Err(Error::decode(
                codes::MALFORMED_BINARY,
                "multiple results are not supported",
            )
            .with_offset(offset as u64));
        }
        types.push(FuncType::new(params, results));
    }
    Ok(types)
}

fn read_value_types(reader: &mut BinaryReader<'_>) -> Result<Vec<ValueType>> {
    let count = reader.read_vec_count()?;
    let mut types = Vec::with_capacity(count);
    for _ in 0..count {
        types.push(ValueType::from_byte(reader.read_u8()?)?);
    }
    Ok(types)
}

fn read_limits(reader: &mut BinaryReader<'_>) -> Result<Limits> {
    let offset = reader.tell();
    let flag = reader.read_u8()?;
    match flag {
        0x00 => Ok(Limits::new(reader.read_u32_leb()?, None)),
        0x01 => {
            let min = reader.read_u32_leb()?;
            let max = reader.read_u32_leb()?;
            Ok(Limits::new(min, Some(max)))
        }
        _ => Err(
            Error::decode(codes::MALFORMED_BINARY, "invalid limits flag")
                .with_offset(offset as u64),
        ),
    }
}

fn read_table_type(reader: &mut BinaryReader<'_>) -> Result<TableType> {
    let element = RefType::from_byte(reader.read_u8()?)?;
    let limits = read_limits(reader)?;
    Ok(TableType { element, limits })
}

fn read_memory_type(reader: &mut BinaryReader<'_>) -> Result<MemoryType> {
    let limits = read_limits(reader)?;
    Ok(MemoryType { limits })
}

fn read_global_type(reader: &mut BinaryReader<'_>) -> Result<GlobalType> {
    let value_type = ValueType::from_byte(reader.read_u8()?)?;
    let offset = reader.tell();
    let mutable = match reader.read_u8()? {
        0x00 => false,
        0x01 => true,
        _ => {
            return Err(Error::decode(
                codes::MALFORMED_BINARY,
                "invalid global mutability flag",
            )
            .with_offset(offset as u64))
        }
    };
    Ok(GlobalType {
        value_type,
        mutable,
    })
}

fn read_imports(reader: &mut BinaryReader<'_>) -> Result<Vec<Import>> {
    let count = reader.read_vec_count()?;
    let mut imports = Vec::with_capacity(count);
    for _ in 0..count {
        let module = reader.read_name()?;
        let name = reader.read_name()?;
        let kind = ExternalKind::from_byte(reader.read_u8()?)?;
        let desc = match kind {
            ExternalKind::Function => ImportDesc::Function(reader.read_u32_leb()?),
            ExternalKind::Table => ImportDesc::Table(read_table_type(reader)?),
            ExternalKind::Memory => ImportDesc::Memory(read_memory_type(reader)?),
            ExternalKind::Global => ImportDesc::Global(read_global_type(reader)?),
        };
        imports.push(Import { module, name, desc });
    }
    Ok(imports)
}

fn read_functions(reader: &mut BinaryReader<'_>) -> Result<Vec<u32>> {
    let count = reader.read_vec_count()?;
    let mut functions = Vec::with_capacity(count);
    for _ in 0..count {
        functions.push(reader.read_u32_leb()?);
    }
    Ok(functions)
}

fn read_tables(reader: &mut BinaryReader<'_>) -> Result<Vec<TableType>> {
    let count = reader.read_vec_count()?;
    let mut tables = Vec::with_capacity(count);
    for _ in 0..count {
        tables.push(read_table_type(reader)?);
    }
    Ok(tables)
}

fn read_memories(reader: &mut BinaryReader<'_>) -> Result<Vec<MemoryType>> {
    let count = reader.read_vec_count()?;
    let mut memories = Vec::with_capacity(count);
    for _ in 0..count {
        memories.push(read_memory_type(reader)?);
    }
    Ok(memories)
}

fn read_globals(reader: &mut BinaryReader<'_>) -> Result<Vec<Global>> {
    let count = reader.read_vec_count()?;
    let mut globals = Vec::with_capacity(count);
    for _ in 0..count {
        let ty = read_global_type(reader)?;
        let init = read_expr(reader)?;
        globals.push(Global { ty, init });
    }
    Ok(globals)
}

fn read_exports(reader: &mut BinaryReader<'_>) -> Result<Vec<Export>> {
    let count = reader.read_vec_count()?;
    let mut exports = Vec::with_capacity(count);
    for _ in 0..count {
        let name = reader.read_name()?;
        let kind = ExternalKind::from_byte(reader.read_u8()?)?;
        let index = reader.read_u32_leb()?;
        exports.push(Export { name, kind, index });
    }
    Ok(exports)
}

fn read_elements(reader: &mut BinaryReader<'_>) -> Result<Vec<ElementSegment>> {
    let count = reader.read_vec_count()?;
    let mut elements = Vec::with_capacity(count);
    for _ in 0..count {
        let table_index = reader.read_u32_leb()?;
        let offset = read_expr(reader)?;
        let func_count = reader.read_vec_count()?;
        let mut init = Vec::with_capacity(func_count);
        for _ in 0..func_count {
            init.push(reader.read_u32_leb()?);
        }
        elements.push(ElementSegment {
            table_index,
            offset,
            init,
        });
    }
    Ok(elements)
}

fn read_code(reader: &mut BinaryReader<'_>) -> Result<Vec<FuncBody>> {
    let count = reader.read_vec_count()?;
    let mut code = Vec::with_capacity(count);
    for _ in 0..count {
        let body_size = reader.read_u32_leb()? as usize;
        let mut body_reader = reader.sub_reader(body_size)?;

        let local_groups = body_reader.read_vec_count()?;
        let mut locals = Vec::new();
        let mut total: u64 = 0;
        for _ in 0..local_groups {
            let group_offset = body_reader.tell();
            let run = body_reader.read_u32_leb()?;
            let ty = ValueType::from_byte(body_reader.read_u8()?)?;
            total += u64::from(run);
            // The format admits counts far past anything instantiable.
            if total > u64::from(u32::MAX) {
                return Err(Error::decode(
                    codes::MALFORMED_BINARY,
                    "too many locals declared",
                )
                .with_offset(group_offset as u64));
            }
            locals.extend(core::iter::repeat(ty).take(run as usize));
        }

        let body = read_expr(&mut body_reader)?;
        body_reader.finish()?;
        code.push(FuncBody { locals, body });
    }
    Ok(code)
}

fn read_data(reader: &mut BinaryReader<'_>) -> Result<Vec<DataSegment>> {
    let count = reader.read_vec_count()?;
    let mut data = Vec::with_capacity(count);
    for _ in 0..count {
        let memory_index = reader.read_u32_leb()?;
        let offset = read_expr(reader)?;
        let payload = reader.read_vec_bytes()?.to_vec();
        data.push(DataSegment {
            memory_index,
            offset,
            data: payload,
        });
    }
    Ok(data)
}
