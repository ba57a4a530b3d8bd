// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Bounds-checked reading and length-prefixed field framing.
// Author: Lukas Bower

//! Length-prefixed field framing over a bounds-checked byte reader.
//!
//! Every integer on the wire is a fixed-width little-endian value. A variable
//! length field is framed as a `u32` length followed by that many raw bytes.
//! All reads go through [`Reader`], which checks every access against the end
//! of the input, so no call site can construct an out-of-range read no matter
//! what lengths the input claims.

/// Errors produced while decoding untrusted bytes.
///
/// Every variant maps to the wire-level `Invalid` status when it crosses the
/// boundary; the distinctions exist for in-process diagnostics only.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended before a fixed-width value could be read in full.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the input.
        remaining: usize,
    },
    /// A declared field length exceeds the bytes left in the input.
    #[error("field length {declared} exceeds remaining input {remaining}")]
    FieldOverrun {
        /// Length declared by the field's prefix.
        declared: u32,
        /// Bytes left in the input after the prefix.
        remaining: usize,
    },
}

/// Bounds-checked reader over an untrusted byte slice.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Wrap the supplied input.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consume exactly `len` bytes, or fail without consuming anything.
    ///
    /// The length check against `remaining` is what keeps the cursor inside
    /// the input: `pos + len` cannot exceed the slice length, so the offset
    /// arithmetic cannot wrap.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::Truncated {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..self.pos])
    }

    /// Consume a little-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes(
            bytes.try_into().expect("slice length checked"),
        ))
    }
}

/// Wire size of a length-prefixed field holding `bytes`.
pub(crate) fn field_wire_len(bytes: &[u8]) -> usize {
    4 + bytes.len()
}

/// Append a length-prefixed field to `out`.
pub(crate) fn put_field(out: &mut Vec<u8>, bytes: &[u8]) {
    let len = u32::try_from(bytes.len()).expect("field length exceeds wire limit");
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(bytes);
}

/// Decode one length-prefixed field into freshly owned bytes.
///
/// A zero-length field decodes to an empty vector with no allocation.
pub(crate) fn get_field(reader: &mut Reader<'_>) -> Result<Vec<u8>, DecodeError> {
    let declared = reader.read_u32()?;
    if declared as usize > reader.remaining() {
        return Err(DecodeError::FieldOverrun {
            declared,
            remaining: reader.remaining(),
        });
    }
    Ok(reader.take(declared as usize)?.to_vec())
}
