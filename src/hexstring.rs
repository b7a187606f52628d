//! Validated conversion to and from hex-encoded strings
//!
//! Wire parts travel as hex-strings in the text framing of a contract call
//! (`"2a@0102@"`), and addresses are routinely written in hex as well. By
//! *hex-string* we mean a string matching `([0-9a-fA-F]{2})*`; case is not
//! significant on input, and lowercase is always produced on output.
//!
//! [`HexString`] holds the decoded bytes; `From` conversions are always
//! byte-based, while [`HexString::from_hex`] and `TryFrom<&str>` parse
//! hex-encoded text. The [`hex`](crate::hex) macro is a terse shorthand for
//! the latter, primarily for tests.

use std::convert::TryFrom;

use crate::error::HexConvError;

pub(crate) mod util {
    use crate::error::HexConvError;
    use std::fmt::Write;

    /// Formats a sequence of bytes into an undelimited lowercase hexadecimal `String`
    #[must_use]
    pub fn hex_of_bytes(bytes: &[u8]) -> String {
        let mut hex = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            if write!(&mut hex, "{byte:02x}").is_err() {
                unreachable!("write to String should never fail")
            }
        }
        hex
    }

    /// Attempts to parse a hexadecimally encoded string into the bytes it encodes.
    ///
    /// # Errors
    ///
    /// Returns `OddParity` for odd-length input, and `NonHex` if any
    /// character is not a hexadecimal digit.
    pub fn bytes_of_hex(src: &str) -> Result<Vec<u8>, HexConvError> {
        if src.len() % 2 != 0 {
            return Err(HexConvError::OddParity(src.to_owned()));
        }
        let nibble = |b: u8| match (b as char).to_digit(16) {
            Some(d) => Ok(d as u8),
            None => Err(HexConvError::NonHex(src.to_owned())),
        };

        let mut dst = Vec::with_capacity(src.len() / 2);
        for pair in src.as_bytes().chunks_exact(2) {
            dst.push((nibble(pair[0])? << 4) | nibble(pair[1])?);
        }
        Ok(dst)
    }
}

pub use util::{bytes_of_hex, hex_of_bytes};

/// Byte-buffer that is parsed from and displayed as a hex-encoded string
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[repr(transparent)]
pub struct HexString {
    bytes: Vec<u8>,
}

impl HexString {
    /// Parses a hex-encoded string.
    pub fn from_hex(src: &str) -> Result<Self, HexConvError> {
        Ok(Self {
            bytes: bytes_of_hex(src)?,
        })
    }

    /// Extracts a slice containing the decoded bytes
    #[inline(always)]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Destructs `self` into the decoded bytes
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the lowercase hex-encoding of the held bytes
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex_of_bytes(&self.bytes)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for HexString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hex!({:?})", self.to_hex())
    }
}

impl std::fmt::Display for HexString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::LowerHex for HexString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Vec<u8>> for HexString {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for HexString {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }
}

impl From<HexString> for Vec<u8> {
    fn from(val: HexString) -> Self {
        val.bytes
    }
}

impl AsRef<[u8]> for HexString {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<&str> for HexString {
    type Error = HexConvError;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        Self::from_hex(src)
    }
}

impl std::str::FromStr for HexString {
    type Err = HexConvError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::from_hex(src)
    }
}

#[cfg(feature = "serde_impls")]
impl serde::Serialize for HexString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Parses a string literal as a [`HexString`], panicking on invalid input.
#[macro_export]
macro_rules! hex {
    ( $s:expr ) => {
        match $crate::hexstring::HexString::from_hex($s) {
            Ok(h) => h,
            Err(err) => panic!("hex!: invalid hex-string literal {:?}: {}", $s, err),
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roundtrip_case_insensitive() {
        let h = HexString::from_hex("DeadBEEF").unwrap();
        assert_eq!(h.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(h.to_string(), "deadbeef");
        assert_eq!(hex!(""), HexString::default());
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(
            HexString::from_hex("abc"),
            Err(HexConvError::OddParity("abc".into()))
        );
        assert_eq!(
            HexString::from_hex("zz"),
            Err(HexConvError::NonHex("zz".into()))
        );
        assert!(HexString::from_hex("é1").is_err());
        assert_eq!(
            HexString::from_hex("+1"),
            Err(HexConvError::NonHex("+1".into()))
        );
        assert!(HexString::from_hex("00-f").is_err());
    }
}
