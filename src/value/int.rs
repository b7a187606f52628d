//! Fixed-width and arbitrary-precision integers
//!
//! Both families share the same top-level strategy: the shortest big-endian
//! byte string that represents the value (two's complement for signed
//! values), with zero always encoded as the empty string. They differ in
//! their nested forms; [`FixedInt`] always writes exactly `width` bytes,
//! while [`BigIntValue`] writes a four-byte length prefix followed by its
//! top-level payload.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::conv::{target::Target, Codec};
use crate::error::{BoundsError, CodecResult};
use crate::parse::Parser;
use crate::prim::{decode_prefixed, encode_prefixed};

/// Byte-width of a [`FixedInt`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntWidth {
    W8 = 1,
    W16 = 2,
    W32 = 4,
    W64 = 8,
}

impl IntWidth {
    /// Number of bytes in the nested encoding
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Inclusive range representable at this width
    #[must_use]
    pub const fn bounds(self, signed: bool) -> (i128, i128) {
        let bits = (self.bytes() * 8) as u32;
        if signed {
            (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
        } else {
            (0, (1i128 << bits) - 1)
        }
    }
}

/// Minimal two's complement length of a non-zero signed value,
/// `ceil((bit_length(v + (v < 0)) + 1) / 8)`.
fn signed_minimal_len(v: i128) -> usize {
    // for negative v, !v == -(v + 1), whose bit-length is that of v + 1
    let magnitude = if v < 0 { !v } else { v };
    let bits = (128 - magnitude.leading_zeros()) as usize;
    Integer::div_ceil(&(bits + 1), &8)
}

/// Returns the minimal top-level bytes of `value`, empty for zero.
pub(crate) fn big_to_bytes(value: &BigInt, signed: bool) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else if signed {
        value.to_signed_bytes_be()
    } else {
        value.magnitude().to_bytes_be()
    }
}

/// Interprets `bytes` as a big-endian integer, empty being zero.
pub(crate) fn big_from_bytes(bytes: &[u8], signed: bool) -> BigInt {
    if signed {
        BigInt::from_signed_bytes_be(bytes)
    } else {
        BigInt::from_biguint(Sign::Plus, BigUint::from_bytes_be(bytes))
    }
}

/// Integer of width 1, 2, 4 or 8 bytes, signed or unsigned
///
/// The value is held as an `i128`, which is wide enough for every
/// combination of width and signedness; it always lies within
/// [`IntWidth::bounds`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedInt {
    width: IntWidth,
    signed: bool,
    value: i128,
}

macro_rules! fixed_ctor {
    ($name:ident, $t:ty, $width:ident, $signed:expr) => {
        #[doc = concat!("Constructs a `", stringify!($t), "` value")]
        #[must_use]
        pub const fn $name(value: $t) -> Self {
            Self {
                width: IntWidth::$width,
                signed: $signed,
                value: value as i128,
            }
        }
    };
}

impl FixedInt {
    fixed_ctor!(u8, u8, W8, false);
    fixed_ctor!(u16, u16, W16, false);
    fixed_ctor!(u32, u32, W32, false);
    fixed_ctor!(u64, u64, W64, false);
    fixed_ctor!(i8, i8, W8, true);
    fixed_ctor!(i16, i16, W16, true);
    fixed_ctor!(i32, i32, W32, true);
    fixed_ctor!(i64, i64, W64, true);

    /// Constructs a zero-valued integer of the given type.
    #[must_use]
    pub const fn zero(width: IntWidth, signed: bool) -> Self {
        Self {
            width,
            signed,
            value: 0,
        }
    }

    /// Constructs an integer of the given type, checking that `value` fits.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ValueOutOfRange`] if `value` is not representable.
    pub fn new(width: IntWidth, signed: bool, value: i128) -> CodecResult<Self> {
        let mut ret = Self::zero(width, signed);
        ret.set(value)?;
        Ok(ret)
    }

    #[must_use]
    pub const fn width(&self) -> IntWidth {
        self.width
    }

    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    #[must_use]
    pub const fn value(&self) -> i128 {
        self.value
    }

    /// Replaces the held value, checking that it fits.
    pub fn set(&mut self, value: i128) -> CodecResult<()> {
        self.set_big(&BigInt::from(value))
    }

    /// Replaces the held value from an arbitrary-precision integer,
    /// checking that it fits.
    pub fn set_big(&mut self, value: &BigInt) -> CodecResult<()> {
        let (min, max) = self.width.bounds(self.signed);
        BoundsError::restrict(value, &BigInt::from(min), Some(&BigInt::from(max)))?;
        match value.to_i128() {
            Some(v) => {
                self.value = v;
                Ok(())
            }
            None => unreachable!("value within i64/u64 bounds always fits i128"),
        }
    }

    /// Returns the value as an arbitrary-precision integer
    #[must_use]
    pub fn to_bigint(&self) -> BigInt {
        BigInt::from(self.value)
    }

    fn fixed_bytes(&self) -> [u8; 16] {
        self.value.to_be_bytes()
    }
}

impl Codec for FixedInt {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        let w = self.width.bytes();
        buf.push_all(&self.fixed_bytes()[16 - w..])
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        if self.value == 0 {
            return 0;
        }
        let full = self.fixed_bytes();
        let len = if self.signed {
            signed_minimal_len(self.value)
        } else {
            16 - full.iter().take_while(|&&b| b == 0).count()
        };
        buf.push_all(&full[16 - len..])
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        let bytes = p.consume(self.width.bytes())?;
        let init: i128 = match bytes.first() {
            Some(&hi) if self.signed && hi & 0x80 != 0 => -1,
            _ => 0,
        };
        self.value = bytes
            .iter()
            .fold(init, |acc, &b| (acc << 8) | i128::from(b));
        Ok(())
    }

    /// Parses the whole buffer as a minimal-length integer, then checks it
    /// fits the declared width.
    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.set_big(&big_from_bytes(bytes, self.signed))
    }
}

/// Arbitrary-precision integer, signed or unsigned
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigIntValue {
    signed: bool,
    value: BigInt,
}

impl BigIntValue {
    /// Constructs a zero-valued integer
    #[must_use]
    pub fn zero(signed: bool) -> Self {
        Self {
            signed,
            value: BigInt::zero(),
        }
    }

    /// Constructs an unsigned big integer
    #[must_use]
    pub fn unsigned(value: BigUint) -> Self {
        Self {
            signed: false,
            value: BigInt::from(value),
        }
    }

    /// Constructs a signed big integer
    #[must_use]
    pub fn signed(value: BigInt) -> Self {
        Self {
            signed: true,
            value,
        }
    }

    /// Constructs a big integer of the given signedness.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ValueOutOfRange`] for negative unsigned values.
    pub fn new(signed: bool, value: BigInt) -> CodecResult<Self> {
        let mut ret = Self::zero(signed);
        ret.set(value)?;
        Ok(ret)
    }

    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    #[must_use]
    pub const fn value(&self) -> &BigInt {
        &self.value
    }

    /// Replaces the held value, rejecting negative values when unsigned.
    pub fn set(&mut self, value: BigInt) -> CodecResult<()> {
        if !self.signed {
            BoundsError::restrict(&value, &BigInt::zero(), None)?;
        }
        self.value = value;
        Ok(())
    }
}

impl Codec for BigIntValue {
    /// Length prefix followed by the minimal payload; zero is a bare `00000000`
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        encode_prefixed(buf, &big_to_bytes(&self.value, self.signed))
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_all(&big_to_bytes(&self.value, self.signed))
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        let payload = decode_prefixed(p)?;
        self.value = big_from_bytes(&payload, self.signed);
        Ok(())
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.value = big_from_bytes(bytes, self.signed);
        Ok(())
    }
}

impl From<FixedInt> for BigInt {
    fn from(val: FixedInt) -> Self {
        val.to_bigint()
    }
}

impl From<BigUint> for BigIntValue {
    fn from(val: BigUint) -> Self {
        Self::unsigned(val)
    }
}

impl From<BigInt> for BigIntValue {
    fn from(val: BigInt) -> Self {
        Self::signed(val)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use crate::hex;
    use crate::parse::SliceParser;

    fn top(v: &impl Codec) -> String {
        crate::hexstring::hex_of_bytes(&v.to_top_level_bytes())
    }

    fn nested(v: &impl Codec) -> String {
        crate::hexstring::hex_of_bytes(&v.to_nested_bytes())
    }

    #[test]
    fn bounds_per_width() {
        assert_eq!(IntWidth::W8.bounds(false), (0, 255));
        assert_eq!(IntWidth::W8.bounds(true), (-128, 127));
        assert_eq!(IntWidth::W64.bounds(false), (0, u64::MAX as i128));
        assert_eq!(IntWidth::W64.bounds(true), (i64::MIN as i128, i64::MAX as i128));
    }

    #[test]
    fn unsigned_encodings() {
        assert_eq!(top(&FixedInt::u8(0x42)), "42");
        assert_eq!(nested(&FixedInt::u8(0x42)), "42");
        assert_eq!(top(&FixedInt::u32(0)), "");
        assert_eq!(nested(&FixedInt::u32(0)), "00000000");
        assert_eq!(top(&FixedInt::u32(0x0100)), "0100");
        assert_eq!(nested(&FixedInt::u16(0x0100)), "0100");
        assert_eq!(top(&FixedInt::u64(u64::MAX)), "ffffffffffffffff");
    }

    #[test]
    fn signed_encodings_keep_sign_bit() {
        assert_eq!(top(&FixedInt::i32(0)), "");
        assert_eq!(top(&FixedInt::i32(-1)), "ff");
        assert_eq!(top(&FixedInt::i32(127)), "7f");
        assert_eq!(top(&FixedInt::i32(128)), "0080");
        assert_eq!(top(&FixedInt::i32(-128)), "80");
        assert_eq!(top(&FixedInt::i32(-129)), "ff7f");
        assert_eq!(nested(&FixedInt::i16(-2)), "fffe");
        assert_eq!(nested(&FixedInt::i64(i64::MIN)), "8000000000000000");
    }

    #[test]
    fn decode_nested_sign_extends() {
        let mut v = FixedInt::zero(IntWidth::W16, true);
        v.decode_nested(&mut SliceParser::new(&[0xff, 0xfe])).unwrap();
        assert_eq!(v.value(), -2);

        let mut u = FixedInt::zero(IntWidth::W16, false);
        u.decode_nested(&mut SliceParser::new(&[0xff, 0xfe])).unwrap();
        assert_eq!(u.value(), 0xfffe);
    }

    #[test]
    fn decode_top_level_range_checked() {
        let mut v = FixedInt::zero(IntWidth::W8, false);
        let err = v.decode_top_level(hex!("0100").as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueOutOfRange);

        v.decode_top_level(&[]).unwrap();
        assert_eq!(v.value(), 0);
        v.decode_top_level(hex!("00ff").as_bytes()).unwrap();
        assert_eq!(v.value(), 255);

        let mut s = FixedInt::zero(IntWidth::W8, true);
        s.decode_top_level(hex!("80").as_bytes()).unwrap();
        assert_eq!(s.value(), -128);
        assert_eq!(
            s.decode_top_level(hex!("0080").as_bytes()).unwrap_err().kind(),
            ErrorKind::ValueOutOfRange
        );
    }

    #[test]
    fn construction_checks_range() {
        assert!(FixedInt::new(IntWidth::W8, false, 255).is_ok());
        assert_eq!(
            FixedInt::new(IntWidth::W8, false, -1).unwrap_err().kind(),
            ErrorKind::ValueOutOfRange
        );
        assert_eq!(
            BigIntValue::new(false, BigInt::from(-5)).unwrap_err().kind(),
            ErrorKind::ValueOutOfRange
        );
    }

    #[test]
    fn bigint_encodings() {
        let zero = BigIntValue::zero(false);
        assert_eq!(nested(&zero), "00000000");
        assert_eq!(top(&zero), "");

        let v = BigIntValue::unsigned(BigUint::from(0x1234u32));
        assert_eq!(nested(&v), "000000021234");
        assert_eq!(top(&v), "1234");

        let n = BigIntValue::signed(BigInt::from(-256));
        assert_eq!(top(&n), "ff00");
        assert_eq!(nested(&n), "00000002ff00");

        let p = BigIntValue::signed(BigInt::from(255));
        assert_eq!(top(&p), "00ff");
    }

    #[test]
    fn bigint_roundtrip() {
        for signed in [false, true] {
            let src = BigIntValue::new(signed, BigInt::from(1_000_000_007u64)).unwrap();
            let mut out = BigIntValue::zero(signed);
            out.decode_nested(&mut SliceParser::new(&src.to_nested_bytes()))
                .unwrap();
            assert_eq!(out, src);
            out.decode_top_level(&src.to_top_level_bytes()).unwrap();
            assert_eq!(out, src);
        }
    }
}
