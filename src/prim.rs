//! Byte primitives and primitive codecs
//!
//! Every dynamically sized nested encoding in this crate is framed by a
//! four-byte big-endian length prefix, written by [`encode_length`] and read
//! back by [`decode_length`]. This module also holds the [`Codec`]
//! implementations for the Rust primitives used directly as typed values:
//! `bool`, `Vec<u8>` (byte strings) and `String` (UTF-8 strings).

use crate::conv::{target::Target, Codec};
use crate::error::{CodecError, CodecResult};
use crate::parse::Parser;

/// Appends `n` to `buf` as a four-byte big-endian length prefix.
#[inline]
pub fn encode_length<U: Target>(buf: &mut U, n: u32) -> usize {
    buf.push_many(n.to_be_bytes())
}

/// Consumes a four-byte big-endian length prefix.
#[inline]
pub fn decode_length<P: Parser>(p: &mut P) -> CodecResult<u32> {
    p.take_u32()
}

/// Consumes exactly `n` bytes, failing with
/// [`CodecError::UnexpectedEndOfData`] if fewer remain.
#[inline]
pub fn read_exact<P: Parser>(p: &mut P, n: usize) -> CodecResult<Vec<u8>> {
    p.take_dynamic(n)
}

/// Converts an in-memory element or byte count to its wire representation.
///
/// Counts beyond `u32::MAX` cannot be represented by the wire format.
#[inline]
pub(crate) fn wire_length(n: usize) -> u32 {
    debug_assert!(n <= u32::MAX as usize, "length {} exceeds u32 prefix", n);
    n as u32
}

/// Writes a length-prefixed payload.
pub(crate) fn encode_prefixed<U: Target>(buf: &mut U, payload: &[u8]) -> usize {
    buf.anticipate(4 + payload.len());
    encode_length(buf, wire_length(payload.len())) + buf.push_all(payload)
}

/// Reads a length-prefixed payload.
pub(crate) fn decode_prefixed<P: Parser>(p: &mut P) -> CodecResult<Vec<u8>> {
    let len = decode_length(p)?;
    read_exact(p, len as usize)
}

impl Codec for bool {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_one(u8::from(*self))
    }

    /// `false` is the empty byte string at top level, `true` is `0x01`
    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        match *self {
            true => buf.push_one(0x01),
            false => 0,
        }
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        *self = p.take_bool()?;
        Ok(())
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        *self = match bytes {
            [] | [0x00] => false,
            [0x01] => true,
            [byte] => return Err(CodecError::InvalidBooleanEncoding(*byte)),
            [first, ..] => return Err(CodecError::InvalidBooleanEncoding(*first)),
        };
        Ok(())
    }
}

impl Codec for Vec<u8> {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        encode_prefixed(buf, self)
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_all(self)
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        *self = decode_prefixed(p)?;
        Ok(())
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.clear();
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn to_top_level_bytes(&self) -> Vec<u8> {
        self.clone()
    }
}

impl Codec for String {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        encode_prefixed(buf, self.as_bytes())
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_all(self.as_bytes())
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        *self = String::from_utf8(decode_prefixed(p)?)?;
        Ok(())
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        *self = String::from_utf8(bytes.to_vec())?;
        Ok(())
    }
}
