//! Contract code-metadata flags
//!
//! Two bytes of bit-flags, encoded identically in nested and top-level
//! position. Unknown bits are preserved as-is through a round-trip.

use crate::conv::{decode_top_level_as_nested, target::Target, Codec};
use crate::error::CodecResult;
use crate::parse::Parser;

const UPGRADEABLE: u8 = 0x01;
const READABLE: u8 = 0x04;
const PAYABLE: u8 = 0x02;
const PAYABLE_BY_SC: u8 = 0x04;

/// Deployment flags of a contract
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CodeMetadata {
    bytes: [u8; 2],
}

impl CodeMetadata {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn new(upgradeable: bool, readable: bool, payable: bool, payable_by_sc: bool) -> Self {
        let mut ret = Self::default();
        ret.set_upgradeable(upgradeable);
        ret.set_readable(readable);
        ret.set_payable(payable);
        ret.set_payable_by_sc(payable_by_sc);
        ret
    }

    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 2] {
        self.bytes
    }

    fn flag(&self, byte: usize, mask: u8) -> bool {
        self.bytes[byte] & mask != 0
    }

    fn set_flag(&mut self, byte: usize, mask: u8, on: bool) {
        if on {
            self.bytes[byte] |= mask;
        } else {
            self.bytes[byte] &= !mask;
        }
    }

    #[must_use]
    pub fn is_upgradeable(&self) -> bool {
        self.flag(0, UPGRADEABLE)
    }

    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.flag(0, READABLE)
    }

    #[must_use]
    pub fn is_payable(&self) -> bool {
        self.flag(1, PAYABLE)
    }

    #[must_use]
    pub fn is_payable_by_sc(&self) -> bool {
        self.flag(1, PAYABLE_BY_SC)
    }

    pub fn set_upgradeable(&mut self, on: bool) {
        self.set_flag(0, UPGRADEABLE, on)
    }

    pub fn set_readable(&mut self, on: bool) {
        self.set_flag(0, READABLE, on)
    }

    pub fn set_payable(&mut self, on: bool) {
        self.set_flag(1, PAYABLE, on)
    }

    pub fn set_payable_by_sc(&mut self, on: bool) {
        self.set_flag(1, PAYABLE_BY_SC, on)
    }
}

impl Codec for CodeMetadata {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many(self.bytes)
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many(self.bytes)
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        self.bytes = p.consume_arr::<2>()?;
        Ok(())
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        decode_top_level_as_nested(self, bytes)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{CodecError, ErrorKind, Leftover};

    #[test]
    fn flag_layout() {
        let md = CodeMetadata::new(true, true, true, true);
        assert_eq!(md.to_top_level_bytes(), vec![0x05, 0x06]);
        assert_eq!(CodeMetadata::new(true, false, true, false).to_bytes(), [0x01, 0x02]);
        assert_eq!(CodeMetadata::default().to_nested_bytes(), vec![0x00, 0x00]);

        let mut out = CodeMetadata::default();
        out.decode_top_level(&[0x04, 0x04]).unwrap();
        assert!(out.is_readable() && out.is_payable_by_sc());
        assert!(!out.is_upgradeable() && !out.is_payable());
    }

    #[test]
    fn top_level_requires_two_bytes() {
        let mut out = CodeMetadata::default();
        assert_eq!(
            out.decode_top_level(&[0x01]).unwrap_err().kind(),
            ErrorKind::UnexpectedEndOfData
        );
        assert!(matches!(
            out.decode_top_level(&[0x01, 0x00, 0x00]),
            Err(CodecError::UnconsumedData(Leftover::Bytes(1)))
        ));
    }
}
