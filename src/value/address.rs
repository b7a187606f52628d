//! Fixed-width account addresses
//!
//! An [`Address`] is exactly [`ADDRESS_LEN`] raw bytes (the public key of an
//! account or contract) and is encoded identically in nested and top-level
//! positions: no prefix, no trimming.

use std::convert::TryFrom;

use crate::conv::{target::Target, Codec};
use crate::error::{CodecError, CodecResult, WidthError};
use crate::hexstring::{bytes_of_hex, hex_of_bytes};
use crate::parse::Parser;

/// Number of bytes in an address
pub const ADDRESS_LEN: usize = 32;

/// 32-byte public key identifying an account or contract
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Constructs an address from its raw bytes
    #[inline(always)]
    #[must_use]
    pub const fn from_array(arr: [u8; ADDRESS_LEN]) -> Self {
        Self(arr)
    }

    /// The all-zero address
    #[must_use]
    pub const fn zero() -> Self {
        Self([0; ADDRESS_LEN])
    }

    /// Attempts to construct an address by copying a slice of presumptively
    /// [`ADDRESS_LEN`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidAddressLength`] if `bytes.len() != 32`.
    pub fn try_from_slice(bytes: &[u8]) -> CodecResult<Self> {
        match <[u8; ADDRESS_LEN]>::try_from(bytes) {
            Ok(arr) => Ok(Self(arr)),
            Err(_) => Err(WidthError::WrongWidth {
                exact: ADDRESS_LEN,
                actual: bytes.len(),
            }
            .into()),
        }
    }

    /// Parses a 64-character hex-string.
    pub fn from_hex(src: &str) -> CodecResult<Self> {
        Self::try_from_slice(&bytes_of_hex(src).map_err(CodecError::from)?)
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex_of_bytes(&self.0)
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl std::fmt::LowerHex for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(arr: [u8; ADDRESS_LEN]) -> Self {
        Self(arr)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = CodecError;

    fn try_from(bytes: &[u8]) -> CodecResult<Self> {
        Self::try_from_slice(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Codec for Address {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many(self.0)
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_many(self.0)
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        self.0 = p.consume_arr::<ADDRESS_LEN>()?;
        Ok(())
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        *self = Self::try_from_slice(bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    const ALICE: &str = "0139472eff6886771a982f3083da5d421f24c29181e63888228dc81ca60d69e1";

    #[test]
    fn roundtrip_byte_for_byte() {
        let addr = Address::from_hex(ALICE).unwrap();
        assert_eq!(addr.to_nested_bytes(), addr.to_top_level_bytes());
        assert_eq!(addr.to_top_level_bytes().len(), ADDRESS_LEN);

        let mut out = Address::zero();
        out.decode_top_level(&addr.to_top_level_bytes()).unwrap();
        assert_eq!(out, addr);
        assert_eq!(out.to_hex(), ALICE);
    }

    #[test]
    fn rejects_wrong_lengths() {
        for len in [31usize, 33] {
            let bytes = vec![7u8; len];
            assert_eq!(
                Address::try_from_slice(&bytes).unwrap_err().kind(),
                ErrorKind::InvalidAddressLength
            );
            let mut out = Address::zero();
            assert_eq!(
                out.decode_top_level(&bytes).unwrap_err().kind(),
                ErrorKind::InvalidAddressLength
            );
        }
    }
}
