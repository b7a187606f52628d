//! Core of the binary-conversion API
//!
//! This module defines the [`Codec`] trait, implemented once per kind of
//! typed value, which carries the two encodings every value has on the wire:
//!
//!   * the *nested* encoding, used whenever a value is embedded inside a
//!     container or another value, which is always self-delimiting, and
//!   * the *top-level* encoding, used when a value makes up an entire wire
//!     part, which may drop any framing that the part boundary already
//!     conveys (length prefixes, trailing zero bytes, unit discriminants).
//!
//! Decoding is performed in place: the receiver is a *placeholder* value of
//! the expected type (usually obtained from a
//! [`TypeDescriptor`](crate::schema::TypeDescriptor)), whose state is
//! overwritten by the decoded contents. This lets containers and optionals
//! know which concrete type to parse for each element.
//!
//! The sub-module [`target`] offers the [`Target`](target::Target) trait,
//! the byte-sink dual to [`crate::parse::Parser`].

use crate::error::{CodecError, CodecResult, Leftover};
use crate::parse::{Parser, SliceParser};

use self::target::{ByteCounter, Target};

pub mod target;

/// Trait for typed values that have a nested and a top-level binary form
///
/// Encoding is infallible: every invariant that could make a value
/// unencodable (fixed lengths, integer ranges, address widths) is checked
/// when the value is constructed or populated.
pub trait Codec {
    /// Appends the nested encoding of `self` to `buf`, returning the number
    /// of bytes written.
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize;

    /// Appends the top-level encoding of `self` to `buf`, returning the number
    /// of bytes written.
    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize;

    /// Overwrites `self` with a value parsed, in nested form, from `p`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the `Parser`, and returns value-specific errors
    /// for malformed payloads. On error, the state of `self` is unspecified.
    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()>;

    /// Overwrites `self` with a value parsed from the entirety of `bytes`,
    /// interpreted as a top-level encoding.
    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()>;

    /// Returns a fresh buffer holding the nested encoding of `self`.
    #[must_use]
    fn to_nested_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        let _ = self.encode_nested(&mut buf);
        buf
    }

    /// Returns a fresh buffer holding the top-level encoding of `self`.
    #[must_use]
    fn to_top_level_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        let _ = self.encode_top_level(&mut buf);
        buf
    }

    /// Computes, without allocation, the length of the nested encoding of `self`.
    #[must_use]
    fn nested_len(&self) -> usize {
        let mut counter: ByteCounter = std::io::sink();
        self.encode_nested(&mut counter)
    }
}

/// Decodes a top-level buffer for a value without any self-framing of its
/// own, by parsing it in nested form and then requiring that every byte of
/// `bytes` was consumed.
pub(crate) fn decode_top_level_as_nested<T: Codec>(
    val: &mut T,
    bytes: &[u8],
) -> CodecResult<()> {
    let mut p = SliceParser::new(bytes);
    val.decode_nested(&mut p)?;
    match p.remainder() {
        0 => Ok(()),
        n => Err(CodecError::UnconsumedData(Leftover::Bytes(n))),
    }
}
