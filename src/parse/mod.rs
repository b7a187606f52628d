//! Byte-level parsing model
//!
//! This module defines the [`Parser`] trait, an abstraction over a stateful
//! read-cursor into an immutable byte buffer, along with the implementing
//! type [`SliceParser`] that operates over a borrowed slice.
//!
//! Parsing is non-backtracking and zero-lookahead: a byte can only be viewed
//! by consuming it, and only once every preceding byte has been consumed.
//! Typed decoding is layered on top of this in [`Codec`](crate::conv::Codec).

use crate::error::{CodecError, CodecResult};

/// Stateful parse-object over a byte buffer
///
/// Implementors provide the primitive [`consume`](Parser::consume) operation
/// and the offset book-keeping; everything else has a default implementation
/// in terms of those.
///
/// The following properties must hold for every implementation:
///
/// * A fresh parser has `offset() == 0` and `view_len()` equal to the buffer length
/// * `remainder()` is the largest `n` for which `consume(n)` succeeds
/// * A successful `consume(n)` returns exactly `n` bytes and decreases `remainder()` by `n`;
///   a failed one leaves the parser unchanged
pub trait Parser {
    /// Total length of the underlying buffer.
    fn view_len(&self) -> usize;

    /// Number of bytes consumed so far.
    fn offset(&self) -> usize;

    /// Number of bytes that can still be consumed.
    fn remainder(&self) -> usize {
        self.view_len() - self.offset()
    }

    /// Returns `true` if every byte of the buffer has been consumed.
    fn is_exhausted(&self) -> bool {
        self.remainder() == 0
    }

    /// Attempts to consume and return exactly `nbytes` bytes.
    ///
    /// Requesting zero bytes always succeeds with an empty slice.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEndOfData`] when fewer than `nbytes`
    /// bytes remain, in which case nothing is consumed.
    fn consume(&mut self, nbytes: usize) -> CodecResult<&[u8]>;

    /// Consumes and returns a single byte.
    fn consume_byte(&mut self) -> CodecResult<u8> {
        Ok(self.consume(1)?[0])
    }

    /// Consumes `N` bytes and returns them in array-form
    fn consume_arr<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut ret = [0u8; N];
        ret.copy_from_slice(self.consume(N)?);
        Ok(ret)
    }

    /// Consumes four bytes and returns the corresponding big-endian `u32` value
    #[inline]
    fn take_u32(&mut self) -> CodecResult<u32> {
        self.consume_arr::<4>().map(u32::from_be_bytes)
    }

    /// Consumes a single byte and returns the boolean value it represents,
    /// in nested form.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidBooleanEncoding`] for any byte other than
    /// `0x00` or `0x01`.
    #[inline]
    fn take_bool(&mut self) -> CodecResult<bool> {
        match self.consume_byte()? {
            0x01 => Ok(true),
            0x00 => Ok(false),
            byte => Err(CodecError::InvalidBooleanEncoding(byte)),
        }
    }

    /// Consumes and returns an owned copy of the next `nbytes` bytes.
    #[inline]
    fn take_dynamic(&mut self, nbytes: usize) -> CodecResult<Vec<u8>> {
        self.consume(nbytes).map(Vec::from)
    }

    /// Consumes and returns every remaining byte.
    #[inline]
    fn take_rest(&mut self) -> Vec<u8> {
        let n = self.remainder();
        self.take_dynamic(n).unwrap_or_default()
    }
}

/// `Parser` over a borrowed byte-slice, tracking its offset directly
#[derive(Clone, Copy, Debug)]
pub struct SliceParser<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> SliceParser<'a> {
    /// Constructs a parser positioned at the first byte of `buf`
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }
}

impl<'a> From<&'a [u8]> for SliceParser<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Self::new(buf)
    }
}

impl Parser for SliceParser<'_> {
    #[inline]
    fn view_len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    fn consume(&mut self, nbytes: usize) -> CodecResult<&[u8]> {
        let available = self.remainder();
        if nbytes > available {
            return Err(CodecError::UnexpectedEndOfData {
                offset: self.offset,
                requested: nbytes,
                available,
            });
        }
        let start = self.offset;
        self.offset += nbytes;
        Ok(&self.buf[start..self.offset])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn consume_exact() {
        let buf = [0xde, 0xad, 0xbe, 0xef];
        let mut p = SliceParser::new(&buf);
        assert_eq!(p.consume(0).unwrap(), &[] as &[u8]);
        assert_eq!(p.consume(2).unwrap(), &[0xde, 0xad]);
        assert_eq!(p.remainder(), 2);
        let err = p.consume(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfData);
        assert_eq!(p.offset(), 2);
        assert_eq!(p.take_rest(), vec![0xbe, 0xef]);
        assert!(p.is_exhausted());
        assert_eq!(p.consume(0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn take_bool_rejects_other_bytes() {
        let buf = [0x01, 0x00, 0xff];
        let mut p = SliceParser::new(&buf);
        assert!(p.take_bool().unwrap());
        assert!(!p.take_bool().unwrap());
        assert_eq!(p.take_bool().unwrap_err().kind(), ErrorKind::InvalidBooleanEncoding);
    }

    #[test]
    fn take_u32_big_endian() {
        let buf = [0x00, 0x00, 0x01, 0x02];
        let mut p = SliceParser::new(&buf);
        assert_eq!(p.take_u32().unwrap(), 0x0102);
    }
}
