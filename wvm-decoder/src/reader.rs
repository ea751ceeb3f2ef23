// WVM - wvm-decoder
// Module: Binary Reader
//
// Copyright (c) 2026 WVM Contributors
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Pull-style reader over a WebAssembly binary.
//!
//! [`BinaryReader`] borrows the full input and tracks an absolute cursor and
//! an exclusive limit, so a bounded [`BinaryReader::sub_reader`] is just
//! another view with a tighter limit and error offsets always refer to the
//! original byte stream. LEB128 reads enforce the 5/10-byte bounds of the
//! format and reject unused high bits in the final byte.

use wvm_error::{codes, Error, Result};
use wvm_types::{FloatBits32, FloatBits64};

/// Bounded cursor over the bytes of a WebAssembly binary.
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    limit: usize,
}

impl<'a> BinaryReader<'a> {
    /// Creates a reader over the whole input.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            limit: bytes.len(),
        }
    }

    /// Absolute offset of the cursor in the original input.
    #[must_use]
    pub fn tell(&self) -> usize {
        self.pos
    }

    /// Bytes left before the reader's limit.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }

    /// True when the cursor reached the limit.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.limit
    }

    fn eof(&self) -> Error {
        Error::unexpected_end().with_offset(self.pos as u64)
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        if self.pos >= self.limit {
            return Err(self.eof());
        }
        let byte = self.bytes[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(self.eof());
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Advances the cursor by `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Moves the cursor to an absolute offset within the reader's bounds.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.limit {
            return Err(self.eof());
        }
        self.pos = pos;
        Ok(())
    }

    /// Splits off a bounded child reader covering the next `len` bytes.
    ///
    /// The parent cursor advances past the child's range immediately; the
    /// caller drains the child and then checks [`Self::finish`] on it.
    pub fn sub_reader(&mut self, len: usize) -> Result<BinaryReader<'a>> {
        if self.remaining() < len {
            return Err(self.eof());
        }
        let child = BinaryReader {
            bytes: self.bytes,
            pos: self.pos,
            limit: self.pos + len,
        };
        self.pos += len;
        Ok(child)
    }

    /// Asserts that a bounded reader was fully consumed.
    pub fn finish(&self) -> Result<()> {
        if self.pos == self.limit {
            Ok(())
        } else {
            Err(Error::decode(
                codes::SECTION_SIZE_MISMATCH,
                "section content shorter than declared size",
            )
            .with_offset(self.pos as u64))
        }
    }

    fn leb_too_long(&self, start: usize) -> Error {
        Error::decode(
            codes::INTEGER_TOO_LONG,
            "LEB128 integer exceeds its byte bound",
        )
        .with_offset(start as u64)
    }

    fn leb_unused_bits(&self, start: usize) -> Error {
        Error::decode(
            codes::MALFORMED_BINARY,
            "LEB128 final byte has unused bits set",
        )
        .with_offset(start as u64)
    }

    /// Reads an unsigned LEB128 value of at most 32 bits (5 bytes).
    pub fn read_u32_leb(&mut self) -> Result<u32> {
        let start = self.pos;
        let mut result = 0u32;
        let mut shift = 0u32;
        for i in 0..5 {
            let byte = self.read_u8()?;
            result |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                if i == 4 && byte & 0x70 != 0 {
                    return Err(self.leb_unused_bits(start));
                }
                return Ok(result);
            }
            shift += 7;
        }
        Err(self.leb_too_long(start))
    }

    /// Reads an unsigned LEB128 value of at most 64 bits (10 bytes).
    pub fn read_u64_leb(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut result = 0u64;
        let mut shift = 0u32;
        for i in 0..10 {
            let byte = self.read_u8()?;
            result |= u64::from(byte & 0x7F) << shift.min(63);
            if byte & 0x80 == 0 {
                if i == 9 && byte & 0x7E != 0 {
                    return Err(self.leb_unused_bits(start));
                }
                return Ok(result);
            }
            shift += 7;
        }
        Err(self.leb_too_long(start))
    }

    fn read_signed_leb(&mut self, width: u32) -> Result<i64> {
        let start = self.pos;
        let max_bytes = width.div_ceil(7) as usize;
        let mut result = 0i64;
        let mut shift = 0u32;
        for i in 0..max_bytes {
            let byte = self.read_u8()?;
            result |= i64::from(byte & 0x7F) << shift.min(63);
            if byte & 0x80 == 0 {
                shift += 7;
                if shift < 64 && byte & 0x40 != 0 {
                    result |= -1i64 << shift;
                }
                // The decoded value must fit the target width; for the full
                // 64-bit width the last possible byte carries one value bit
                // and must otherwise be a pure sign extension.
                let in_range = match width {
                    32 => i64::from(result as i32) == result,
                    33 => result >= -(1i64 << 32) && result < (1i64 << 32),
                    _ => i + 1 < max_bytes || byte == 0x00 || byte == 0x7F,
                };
                if !in_range {
                    return Err(self.leb_unused_bits(start));
                }
                return Ok(result);
            }
            shift += 7;
        }
        Err(self.leb_too_long(start))
    }

    /// Reads a signed LEB128 value of at most 32 bits.
    pub fn read_s32_leb(&mut self) -> Result<i32> {
        self.read_signed_leb(32).map(|v| v as i32)
    }

    /// Reads a signed LEB128 value of at most 33 bits (block type encoding).
    pub fn read_s33_leb(&mut self) -> Result<i64> {
        self.read_signed_leb(33)
    }

    /// Reads a signed LEB128 value of at most 64 bits.
    pub fn read_s64_leb(&mut self) -> Result<i64> {
        self.read_signed_leb(64)
    }

    /// Reads a little-endian IEEE-754 single. Bit patterns are preserved.
    pub fn read_f32(&mut self) -> Result<FloatBits32> {
        let bytes = self.read_bytes(4)?;
        let arr: [u8; 4] = bytes.try_into().unwrap_or_default();
        Ok(FloatBits32::from_bits(u32::from_le_bytes(arr)))
    }

    /// Reads a little-endian IEEE-754 double. Bit patterns are preserved.
    pub fn read_f64(&mut self) -> Result<FloatBits64> {
        let bytes = self.read_bytes(8)?;
        let arr: [u8; 8] = bytes.try_into().unwrap_or_default();
        Ok(FloatBits64::from_bits(u64::from_le_bytes(arr)))
    }

    /// Reads a LEB-length-prefixed byte vector.
    pub fn read_vec_bytes(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u32_leb()? as usize;
        self.read_bytes(len)
    }

    /// Reads a length-prefixed UTF-8 name.
    pub fn read_name(&mut self) -> Result<String> {
        let start = self.pos;
        let bytes = self.read_vec_bytes()?;
        core::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| {
                Error::decode(codes::INVALID_UTF8, "name is not valid UTF-8")
                    .with_offset(start as u64)
            })
    }

    /// Reads a vector count and checks it against the bytes that remain.
    ///
    /// Every vector element occupies at least one byte, so a count larger
    /// than the remaining payload is malformed regardless of element type.
    pub fn read_vec_count(&mut self) -> Result<usize> {
        let start = self.pos;
        let count = self.read_u32_leb()? as usize;
        if count > self.remaining() {
            return Err(Error::decode(
                codes::MALFORMED_BINARY,
                "vector count exceeds remaining input",
            )
            .with_offset(start as u64));
        }
        Ok(count)
    }
}
