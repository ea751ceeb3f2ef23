// WVM - wvm-decoder
// Module: Instruction Decoding
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly instruction tree and its decoder.
//!
//! Instructions decode into one flat tagged enum. Structured control
//! instructions own their bodies as plain vectors, so the tree has value
//! ownership throughout and the interpreter can walk it without pointer
//! chasing.

use wvm_error::{codes, Error, Result};
use wvm_types::{BlockType, FloatBits32, FloatBits64};

use crate::binary;
use crate::reader::BinaryReader;

/// Alignment hint and static offset of a memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemArg {
    /// Power-of-two alignment hint; advisory only
    pub align: u32,
    /// Static byte offset added to the dynamic address
    pub offset: u32,
}

/// A decoded WebAssembly instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    // Control instructions
    /// `unreachable`
    Unreachable,
    /// `nop`
    Nop,
    /// `block` with its result type and body
    Block(BlockType, Vec<Instruction>),
    /// `loop` with its result type and body
    Loop(BlockType, Vec<Instruction>),
    /// `if` with its result type, then-body, and else-body
    If(BlockType, Vec<Instruction>, Vec<Instruction>),
    /// `br` to a label depth
    Br(u32),
    /// `br_if` to a label depth
    BrIf(u32),
    /// `br_table` with a label vector and default label
    BrTable(Vec<u32>, u32),
    /// `return`
    Return,
    /// `call` of a function index
    Call(u32),
    /// `call_indirect` through table 0 with an expected type index
    CallIndirect(u32),

    // Parametric instructions
    /// `drop`
    Drop,
    /// `select`
    Select,

    // Variable instructions
    /// `local.get`
    LocalGet(u32),
    /// `local.set`
    LocalSet(u32),
    /// `local.tee`
    LocalTee(u32),
    /// `global.get`
    GlobalGet(u32),
    /// `global.set`
    GlobalSet(u32),

    // Memory instructions
    /// `i32.load`
    I32Load(MemArg),
    /// `i64.load`
    I64Load(MemArg),
    /// `f32.load`
    F32Load(MemArg),
    /// `f64.load`
    F64Load(MemArg),
    /// `i32.load8_s`
    I32Load8S(MemArg),
    /// `i32.load8_u`
    I32Load8U(MemArg),
    /// `i32.load16_s`
    I32Load16S(MemArg),
    /// `i32.load16_u`
    I32Load16U(MemArg),
    /// `i64.load8_s`
    I64Load8S(MemArg),
    /// `i64.load8_u`
    I64Load8U(MemArg),
    /// `i64.load16_s`
    I64Load16S(MemArg),
    /// `i64.load16_u`
    I64Load16U(MemArg),
    /// `i64.load32_s`
    I64Load32S(MemArg),
    /// `i64.load32_u`
    I64Load32U(MemArg),
    /// `i32.store`
    I32Store(MemArg),
    /// `i64.store`
    I64Store(MemArg),
    /// `f32.store`
    F32Store(MemArg),
    /// `f64.store`
    F64Store(MemArg),
    /// `i32.store8`
    I32Store8(MemArg),
    /// `i32.store16`
    I32Store16(MemArg),
    /// `i64.store8`
    I64Store8(MemArg),
    /// `i64.store16`
    I64Store16(MemArg),
    /// `i64.store32`
    I64Store32(MemArg),
    /// `memory.size`
    MemorySize,
    /// `memory.grow`
    MemoryGrow,

    // Const instructions
    /// `i32.const`
    I32Const(i32),
    /// `i64.const`
    I64Const(i64),
    /// `f32.const`
    F32Const(FloatBits32),
    /// `f64.const`
    F64Const(FloatBits64),

    // i32 test/comparison
    /// `i32.eqz`
    I32Eqz,
    /// `i32.eq`
    I32Eq,
    /// `i32.ne`
    I32Ne,
    /// `i32.lt_s`
    I32LtS,
    /// `i32.lt_u`
    I32LtU,
    /// `i32.gt_s`
    I32GtS,
    /// `i32.gt_u`
    I32GtU,
    /// `i32.le_s`
    I32LeS,
    /// `i32.le_u`
    I32LeU,
    /// `i32.ge_s`
    I32GeS,
    /// `i32.ge_u`
    I32GeU,

    // i64 test/comparison
    /// `i64.eqz`
    I64Eqz,
    /// `i64.eq`
    I64Eq,
    /// `i64.ne`
    I64Ne,
    /// `i64.lt_s`
    I64LtS,
    /// `i64.lt_u`
    I64LtU,
    /// `i64.gt_s`
    I64GtS,
    /// `i64.gt_u`
    I64GtU,
    /// `i64.le_s`
    I64LeS,
    /// `i64.le_u`
    I64LeU,
    /// `i64.ge_s`
    I64GeS,
    /// `i64.ge_u`
    I64GeU,

    // f32 comparison
    /// `f32.eq`
    F32Eq,
    /// `f32.ne`
    F32Ne,
    /// `f32.lt`
    F32Lt,
    /// `f32.gt`
    F32Gt,
    /// `f32.le`
    F32Le,
    /// `f32.ge`
    F32Ge,

    // f64 comparison
    /// `f64.eq`
    F64Eq,
    /// `f64.ne`
    F64Ne,
    /// `f64.lt`
    F64Lt,
    /// `f64.gt`
    F64Gt,
    /// `f64.le`
    F64Le,
    /// `f64.ge`
    F64Ge,

    // i32 arithmetic
    /// `i32.clz`
    I32Clz,
    /// `i32.ctz`
    I32Ctz,
    /// `i32.popcnt`
    I32Popcnt,
    /// `i32.add`
    I32Add,
    /// `i32.sub`
    I32Sub,
    /// `i32.mul`
    I32Mul,
    /// `i32.div_s`
    I32DivS,
    /// `i32.div_u`
    I32DivU,
    /// `i32.rem_s`
    I32RemS,
    /// `i32.rem_u`
    I32RemU,
    /// `i32.and`
    I32And,
    /// `i32.or`
    I32Or,
    /// `i32.xor`
    I32Xor,
    /// `i32.shl`
    I32Shl,
    /// `i32.shr_s`
    I32ShrS,
    /// `i32.shr_u`
    I32ShrU,
    /// `i32.rotl`
    I32Rotl,
    /// `i32.rotr`
    I32Rotr,

    // i64 arithmetic
    /// `i64.clz`
    I64Clz,
    /// `i64.ctz`
    I64Ctz,
    /// `i64.popcnt`
    I64Popcnt,
    /// `i64.add`
    I64Add,
    /// `i64.sub`
    I64Sub,
    /// `i64.mul`
    I64Mul,
    /// `i64.div_s`
    I64DivS,
    /// `i64.div_u`
    I64DivU,
    /// `i64.rem_s`
    I64RemS,
    /// `i64.rem_u`
    I64RemU,
    /// `i64.and`
    I64And,
    /// `i64.or`
    I64Or,
    /// `i64.xor`
    I64Xor,
    /// `i64.shl`
    I64Shl,
    /// `i64.shr_s`
    I64ShrS,
    /// `i64.shr_u`
    I64ShrU,
    /// `i64.rotl`
    I64Rotl,
    /// `i64.rotr`
    I64Rotr,

    // f32 arithmetic
    /// `f32.abs`
    F32Abs,
    /// `f32.neg`
    F32Neg,
    /// `f32.ceil`
    F32Ceil,
    /// `f32.floor`
    F32Floor,
    /// `f32.trunc`
    F32Trunc,
    /// `f32.nearest`
    F32Nearest,
    /// `f32.sqrt`
    F32Sqrt,
    /// `f32.add`
    F32Add,
    /// `f32.sub`
    F32Sub,
    /// `f32.mul`
    F32Mul,
    /// `f32.div`
    F32Div,
    /// `f32.min`
    F32Min,
    /// `f32.max`
    F32Max,
    /// `f32.copysign`
    F32Copysign,

    // f64 arithmetic
    /// `f64.abs`
    F64Abs,
    /// `f64.neg`
    F64Neg,
    /// `f64.ceil`
    F64Ceil,
    /// `f64.floor`
    F64Floor,
    /// `f64.trunc`
    F64Trunc,
    /// `f64.nearest`
    F64Nearest,
    /// `f64.sqrt`
    F64Sqrt,
    /// `f64.add`
    F64Add,
    /// `f64.sub`
    F64Sub,
    /// `f64.mul`
    F64Mul,
    /// `f64.div`
    F64Div,
    /// `f64.min`
    F64Min,
    /// `f64.max`
    F64Max,
    /// `f64.copysign`
    F64Copysign,

    // Conversions
    /// `i32.wrap_i64`
    I32WrapI64,
    /// `i32.trunc_f32_s`
    I32TruncF32S,
    /// `i32.trunc_f32_u`
    I32TruncF32U,
    /// `i32.trunc_f64_s`
    I32TruncF64S,
    /// `i32.trunc_f64_u`
    I32TruncF64U,
    /// `i64.extend_i32_s`
    I64ExtendI32S,
    /// `i64.extend_i32_u`
    I64ExtendI32U,
    /// `i64.trunc_f32_s`
    I64TruncF32S,
    /// `i64.trunc_f32_u`
    I64TruncF32U,
    /// `i64.trunc_f64_s`
    I64TruncF64S,
    /// `i64.trunc_f64_u`
    I64TruncF64U,
    /// `f32.convert_i32_s`
    F32ConvertI32S,
    /// `f32.convert_i32_u`
    F32ConvertI32U,
    /// `f32.convert_i64_s`
    F32ConvertI64S,
    /// `f32.convert_i64_u`
    F32ConvertI64U,
    /// `f32.demote_f64`
    F32DemoteF64,
    /// `f64.convert_i32_s`
    F64ConvertI32S,
    /// `f64.convert_i32_u`
    F64ConvertI32U,
    /// `f64.convert_i64_s`
    F64ConvertI64S,
    /// `f64.convert_i64_u`
    F64ConvertI64U,
    /// `f64.promote_f32`
    F64PromoteF32,
    /// `i32.reinterpret_f32`
    I32ReinterpretF32,
    /// `i64.reinterpret_f64`
    I64ReinterpretF64,
    /// `f32.reinterpret_i32`
    F32ReinterpretI32,
    /// `f64.reinterpret_i64`
    F64ReinterpretI64,
}

/// What terminated a structured instruction body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyEnd {
    /// Terminated by `end`
    End,
    /// Terminated by `else`
    Else,
}

fn read_block_type(reader: &mut BinaryReader<'_>) -> Result<BlockType> {
    let offset = reader.tell();
    let byte = reader.read_u8()?;
    BlockType::from_byte(byte).map_err(|err| err.with_offset(offset as u64))
}

fn read_mem_arg(reader: &mut BinaryReader<'_>) -> Result<MemArg> {
    let align = reader.read_u32_leb()?;
    let offset = reader.read_u32_leb()?;
    Ok(MemArg { align, offset })
}

/// Reads instructions until `end`, the body of a function or expression.
pub fn read_expr(reader: &mut BinaryReader<'_>) -> Result<Vec<Instruction>> {
    let (body, end) = read_body(reader)?;
    if end == BodyEnd::Else {
        return Err(Error::decode(
            codes::MALFORMED_BINARY,
            "else outside of an if body",
        )
        .with_offset(reader.tell() as u64));
    }
    Ok(body)
}

fn read_body(reader: &mut BinaryReader<'_>) -> Result<(Vec<Instruction>, BodyEnd)> {
    let mut body = Vec::new();
    loop {
        let offset = reader.tell();
        let opcode = reader.read_u8()?;
        match opcode {
            binary::END => return Ok((body, BodyEnd::End)),
            binary::ELSE => return Ok((body, BodyEnd::Else)),
            _ => body.push(read_instruction(reader, opcode, offset)?),
        }
    }
}

fn read_instruction(
    reader: &mut BinaryReader<'_>,
    opcode: u8,
    offset: usize,
) -> Result<Instruction> {
    let instr = match opcode {
        binary::UNREACHABLE => Instruction::Unreachable,
        binary::NOP => Instruction::Nop,
        binary::BLOCK => {
            let block_type = read_block_type(reader)?;
            let body = read_expr(reader)?;
            Instruction::Block(block_type, body)
        }
        binary::LOOP => {
            let block_type = read_block_type(reader)?;
            let body = read_expr(reader)?;
            Instruction::Loop(block_type, body)
        }
        binary::IF => {
            let block_type = read_block_type(reader)?;
            let (then_body, end) = read_body(reader)?;
            let else_body = if end == BodyEnd::Else {
                read_expr(reader)?
            } else {
                Vec::new()
            };
            Instruction::If(block_type, then_body, else_body)
        }
        binary::BR => Instruction::Br(reader.read_u32_leb()?),
        binary::BR_IF => Instruction::BrIf(reader.read_u32_leb()?),
        binary::BR_TABLE => {
            let count = reader.read_vec_count()?;
            let mut labels = Vec::with_capacity(count);
            for _ in 0..count {
                labels.push(reader.read_u32_leb()?);
            }
            let default = reader.read_u32_leb()?;
            Instruction::BrTable(labels, default)
        }
        binary::RETURN => Instruction::Return,
        binary::CALL => Instruction::Call(reader.read_u32_leb()?),
        binary::CALL_INDIRECT => {
            let type_idx = reader.read_u32_leb()?;
            // MVP reserves the table-index byte as zero.
            let table = reader.read_u8()?;
            if table != 0 {
                return Err(Error::decode(
                    codes::MALFORMED_BINARY,
                    "call_indirect reserved byte must be zero",
                )
                .with_offset(offset as u64));
            }
            Instruction::CallIndirect(type_idx)
        }

        binary::DROP => Instruction::Drop,
        binary::SELECT => Instruction::Select,

        binary::LOCAL_GET => Instruction::LocalGet(reader.read_u32_leb()?),
        binary::LOCAL_SET => Instruction::LocalSet(reader.read_u32_leb()?),
        binary::LOCAL_TEE => Instruction::LocalTee(reader.read_u32_leb()?),
        binary::GLOBAL_GET => Instruction::GlobalGet(reader.read_u32_leb()?),
        binary::GLOBAL_SET => Instruction::GlobalSet(reader.read_u32_leb()?),

        binary::I32_LOAD => Instruction::I32Load(read_mem_arg(reader)?),
        binary::I64_LOAD => Instruction::I64Load(read_mem_arg(reader)?),
        binary::F32_LOAD => Instruction::F32Load(read_mem_arg(reader)?),
        binary::F64_LOAD => Instruction::F64Load(read_mem_arg(reader)?),
        binary::I32_LOAD8_S => Instruction::I32Load8S(read_mem_arg(reader)?),
        binary::I32_LOAD8_U => Instruction::I32Load8U(read_mem_arg(reader)?),
        binary::I32_LOAD16_S => Instruction::I32Load16S(read_mem_arg(reader)?),
        binary::I32_LOAD16_U => Instruction::I32Load16U(read_mem_arg(reader)?),
        binary::I64_LOAD8_S => Instruction::I64Load8S(read_mem_arg(reader)?),
        binary::I64_LOAD8_U => Instruction::I64Load8U(read_mem_arg(reader)?),
        binary::I64_LOAD16_S => Instruction::I64Load16S(read_mem_arg(reader)?),
        binary::I64_LOAD16_U => Instruction::I64Load16U(read_mem_arg(reader)?),
        binary::I64_LOAD32_S => Instruction::I64Load32S(read_mem_arg(reader)?),
        binary::I64_LOAD32_U => Instruction::I64Load32U(read_mem_arg(reader)?),
        binary::I32_STORE => Instruction::I32Store(read_mem_arg(reader)?),
        binary::I64_STORE => Instruction::I64Store(read_mem_arg(reader)?),
        binary::F32_STORE => Instruction::F32Store(read_mem_arg(reader)?),
        binary::F64_STORE => Instruction::F64Store(read_mem_arg(reader)?),
        binary::I32_STORE8 => Instruction::I32Store8(read_mem_arg(reader)?),
        binary::I32_STORE16 => Instruction::I32Store16(read_mem_arg(reader)?),
        binary::I64_STORE8 => Instruction::I64Store8(read_mem_arg(reader)?),
        binary::I64_STORE16 => Instruction::I64Store16(read_mem_arg(reader)?),
        binary::I64_STORE32 => Instruction::I64Store32(read_mem_arg(reader)?),
        binary::MEMORY_SIZE | binary::MEMORY_GROW => {
            // MVP reserves the memory-index byte as zero.
            let mem = reader.read_u8()?;
            if mem != 0 {
                return Err(Error::decode(
                    codes::MALFORMED_BINARY,
                    "memory instruction reserved byte must be zero",
                )
                .with_offset(offset as u64));
            }
            if opcode == binary::MEMORY_SIZE {
                Instruction::MemorySize
            } else {
                Instruction::MemoryGrow
            }
        }

        binary::I32_CONST => Instruction::I32Const(reader.read_s32_leb()?),
        binary::I64_CONST => Instruction::I64Const(reader.read_s64_leb()?),
        binary::F32_CONST => Instruction::F32Const(reader.read_f32()?),
        binary::F64_CONST => Instruction::F64Const(reader.read_f64()?),

        0x45 => Instruction::I32Eqz,
        0x46 => Instruction::I32Eq,
        0x47 => Instruction::I32Ne,
        0x48 => Instruction::I32LtS,
        0x49 => Instruction::I32LtU,
        0x4A => Instruction::I32GtS,
        0x4B => Instruction::I32GtU,
        0x4C => Instruction::I32LeS,
        0x4D => Instruction::I32LeU,
        0x4E => Instruction::I32GeS,
        0x4F => Instruction::I32GeU,
        0x50 => Instruction::I64Eqz,
        0x51 => Instruction::I64Eq,
        0x52 => Instruction::I64Ne,
        0x53 => Instruction::I64LtS,
        0x54 => Instruction::I64LtU,
        0x55 => Instruction::I64GtS,
        0x56 => Instruction::I64GtU,
        0x57 => Instruction::I64LeS,
        0x58 => Instruction::I64LeU,
        0x59 => Instruction::I64GeS,
        0x5A => Instruction::I64GeU,
        0x5B => Instruction::F32Eq,
        0x5C => Instruction::F32Ne,
        0x5D => Instruction::F32Lt,
        0x5E => Instruction::F32Gt,
        0x5F => Instruction::F32Le,
        0x60 => Instruction::F32Ge,
        0x61 => Instruction::F64Eq,
        0x62 => Instruction::F64Ne,
        0x63 => Instruction::F64Lt,
        0x64 => Instruction::F64Gt,
        0x65 => Instruction::F64Le,
        0x66 => Instruction::F64Ge,
        0x67 => Instruction::I32Clz,
        0x68 => Instruction::I32Ctz,
        0x69 => Instruction::I32Popcnt,
        0x6A => Instruction::I32Add,
        0x6B => Instruction::I32Sub,
        0x6C => Instruction::I32Mul,
        0x6D => Instruction::I32DivS,
        0x6E => Instruction::I32DivU,
        0x6F => Instruction::I32RemS,
        0x70 => Instruction::I32RemU,
        0x71 => Instruction::I32And,
        0x72 => Instruction::I32Or,
        0x73 => Instruction::I32Xor,
        0x74 => Instruction::I32Shl,
        0x75 => Instruction::I32ShrS,
        0x76 => Instruction::I32ShrU,
        0x77 => Instruction::I32Rotl,
        0x78 => Instruction::I32Rotr,
        0x79 => Instruction::I64Clz,
        0x7A => Instruction::I64Ctz,
        0x7B => Instruction::I64Popcnt,
        0x7C => Instruction::I64Add,
        0x7D => Instruction::I64Sub,
        0x7E => Instruction::I64Mul,
        0x7F => Instruction::I64DivS,
        0x80 => Instruction::I64DivU,
        0x81 => Instruction::I64RemS,
        0x82 => Instruction::I64RemU,
        0x83 => Instruction::I64And,
        0x84 => Instruction::I64Or,
        0x85 => Instruction::I64Xor,
        0x86 => Instruction::I64Shl,
        0x87 => Instruction::I64ShrS,
        0x88 => Instruction::I64ShrU,
        0x89 => Instruction::I64Rotl,
        0x8A => Instruction::I64Rotr,
        0x8B => Instruction::F32Abs,
        0x8C => Instruction::F32Neg,
        0x8D => Instruction::F32Ceil,
        0x8E => Instruction::F32Floor,
        0x8F => Instruction::F32Trunc,
        0x90 => Instruction::F32Nearest,
        0x91 => Instruction::F32Sqrt,
        0x92 => Instruction::F32Add,
        0x93 => Instruction::F32Sub,
        0x94 => Instruction::F32Mul,
        0x95 => Instruction::F32Div,
        0x96 => Instruction::F32Min,
        0x97 => Instruction::F32Max,
        0x98 => Instruction::F32Copysign,
        0x99 => Instruction::F64Abs,
        0x9A => Instruction::F64Neg,
        0x9B => Instruction::F64Ceil,
        0x9C => Instruction::F64Floor,
        0x9D => Instruction::F64Trunc,
        0x9E => Instruction::F64Nearest,
        0x9F => Instruction::F64Sqrt,
        0xA0 => Instruction::F64Add,
        0xA1 => Instruction::F64Sub,
        0xA2 => Instruction::F64Mul,
        0xA3 => Instruction::F64Div,
        0xA4 => Instruction::F64Min,
        0xA5 => Instruction::F64Max,
        0xA6 => Instruction::F64Copysign,
        0xA7 => Instruction::I32WrapI64,
        0xA8 => Instruction::I32TruncF32S,
        0xA9 => Instruction::I32TruncF32U,
        0xAA => Instruction::I32TruncF64S,
        0xAB => Instruction::I32TruncF64U,
        0xAC => Instruction::I64ExtendI32S,
        0xAD => Instruction::I64ExtendI32U,
        0xAE => Instruction::I64TruncF32S,
        0xAF => Instruction::I64TruncF32U,
        0xB0 => Instruction::I64TruncF64S,
        0xB1 => Instruction::I64TruncF64U,
        0xB2 => Instruction::F32ConvertI32S,
        0xB3 => Instruction::F32ConvertI32U,
        0xB4 => Instruction::F32ConvertI64S,
        0xB5 => Instruction::F32ConvertI64U,
        0xB6 => Instruction::F32DemoteF64,
        0xB7 => Instruction::F64ConvertI32S,
        0xB8 => Instruction::F64ConvertI32U,
        0xB9 => Instruction::F64ConvertI64S,
        0xBA => Instruction::F64ConvertI64U,
        0xBB => Instruction::F64PromoteF32,
        0xBC => Instruction::I32ReinterpretF32,
        0xBD => Instruction::I64ReinterpretF64,
        0xBE => Instruction::F32ReinterpretI32,
        0xBF => Instruction::F64ReinterpretI64,

        _ => {
            return Err(Error::decode(codes::UNKNOWN_OPCODE, "unknown opcode")
                .with_offset(offset as u64))
        }
    };
    Ok(instr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wvm_types::ValueType;

    fn expr(bytes: &[u8]) -> Result<Vec<Instruction>> {
        let mut reader = BinaryReader::new(bytes);
        read_expr(&mut reader)
    }

    #[test]
    fn simple_body() {
        // local.get 0; local.get 1; i32.add; end
        let body = expr(&[0x20, 0x00, 0x20, 0x01, 0x6A, 0x0B]).unwrap();
        assert_eq!(
            body,
            vec![
                Instruction::LocalGet(0),
                Instruction::LocalGet(1),
                Instruction::I32Add,
            ]
        );
    }

    #[test]
    fn nested_blocks() {
        // block (result i32) i32.const 7 end; end
        let body = expr(&[0x02, 0x7F, 0x41, 0x07, 0x0B, 0x0B]).unwrap();
        assert_eq!(
            body,
            vec![Instruction::Block(
                BlockType::Value(ValueType::I32),
                vec![Instruction::I32Const(7)],
            )]
        );
    }

    #[test]
    fn if_with_else() {
        // if i32.const 1 else i32.const 2 end; end
        let body = expr(&[0x04, 0x7F, 0x41, 0x01, 0x05, 0x41, 0x02, 0x0B, 0x0B]).unwrap();
        assert_eq!(
            body,
            vec![Instruction::If(
                BlockType::Value(ValueType::I32),
                vec![Instruction::I32Const(1)],
                vec![Instruction::I32Const(2)],
            )]
        );
    }

    #[test]
    fn if_without_else() {
        let body = expr(&[0x04, 0x40, 0x01, 0x0B, 0x0B]).unwrap();
        assert_eq!(
            body,
            vec![Instruction::If(
                BlockType::Empty,
                vec![Instruction::Nop],
                vec![],
            )]
        );
    }

    #[test]
    fn br_table_labels() {
        // br_table [1, 0] default 2; end (inside two dummy blocks not needed for decode)
        let body = expr(&[0x0E, 0x02, 0x01, 0x00, 0x02, 0x0B]).unwrap();
        assert_eq!(body, vec![Instruction::BrTable(vec![1, 0], 2)]);
    }

    #[test]
    fn call_indirect_reserved_byte() {
        let body = expr(&[0x11, 0x03, 0x00, 0x0B]).unwrap();
        assert_eq!(body, vec![Instruction::CallIndirect(3)]);

        let err = expr(&[0x11, 0x03, 0x01, 0x0B]).unwrap_err();
        assert_eq!(err.code, wvm_error::codes::MALFORMED_BINARY);
    }

    #[test]
    fn stray_else_is_rejected() {
        let err = expr(&[0x01, 0x05, 0x0B]).unwrap_err();
        assert_eq!(err.code, wvm_error::codes::MALFORMED_BINARY);
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        let err = expr(&[0xC0, 0x0B]).unwrap_err();
        assert_eq!(err.code, wvm_error::codes::UNKNOWN_OPCODE);
        assert_eq!(err.offset, Some(0));
    }

    #[test]
    fn const_values() {
        let body = expr(&[
            0x41, 0x7F, // i32.const -1
            0x42, 0xC0, 0xBB, 0x78, // i64.const -123456
            0x43, 0x00, 0x00, 0xC0, 0x7F, // f32.const nan (canonical bits)
            0x0B,
        ])
        .unwrap();
        assert_eq!(body[0], Instruction::I32Const(-1));
        assert_eq!(body[1], Instruction::I64Const(-123_456));
        assert_eq!(body[2], Instruction::F32Const(FloatBits32::NAN));
    }

    #[test]
    fn missing_end_is_unexpected_end() {
        let err = expr(&[0x01, 0x01]).unwrap_err();
        assert_eq!(err.code, wvm_error::codes::UNEXPECTED_END);
    }

    #[test]
    fn mem_arg_decoding() {
        let body = expr(&[0x28, 0x02, 0x08, 0x0B]).unwrap();
        assert_eq!(
            body,
            vec![Instruction::I32Load(MemArg {
                align: 2,
                offset: 8,
            })]
        );
    }
}
