//! Exact decimal numbers scaled by a power of ten
//!
//! A [`Decimal`] is a non-negative rational number `digits / 10^scale`,
//! held exactly as a [`BigUint`] together with its scale; arithmetic never
//! goes through floating point. [`DecimalValue`] wraps a `Decimal` as a
//! typed value in one of two modes:
//!
//!   * *fixed scale*, where the scale is part of the type and only the
//!     scaled digits travel on the wire, encoded as an unsigned big integer;
//!   * *variable scale*, where the encoding is the nested unsigned big
//!     integer followed by the scale as four big-endian bytes, in both
//!     nested and top-level position.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::conv::{decode_top_level_as_nested, target::Target, Codec};
use crate::error::{CodecError, CodecResult};
use crate::parse::Parser;
use crate::prim::{decode_prefixed, encode_prefixed};

/// Scales up to this value have their power of ten precomputed
const MAX_TABLE_SCALE: u32 = 36;

lazy_static! {
    static ref POWERS_OF_TEN: Vec<BigUint> = (0..=MAX_TABLE_SCALE)
        .map(|s| num_traits::pow(BigUint::from(10u8), s as usize))
        .collect();
}

/// Returns `10^scale`
pub(crate) fn pow10(scale: u32) -> BigUint {
    match POWERS_OF_TEN.get(scale as usize) {
        Some(p) => p.clone(),
        None => num_traits::pow(BigUint::from(10u8), scale as usize),
    }
}

fn biguint_bytes(val: &BigUint) -> Vec<u8> {
    if val.is_zero() {
        Vec::new()
    } else {
        val.to_bytes_be()
    }
}

fn malformed() -> CodecError {
    CodecError::TypeMismatch {
        expected: "decimal string",
        found: "malformed string",
    }
}

/// Non-negative exact decimal `digits / 10^scale`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    digits: BigUint,
    scale: u32,
}

impl Decimal {
    /// Constructs a decimal from its already-scaled digits
    #[must_use]
    pub fn new(digits: BigUint, scale: u32) -> Self {
        Self { digits, scale }
    }

    /// Zero at the given scale
    #[must_use]
    pub fn zero(scale: u32) -> Self {
        Self::new(BigUint::zero(), scale)
    }

    /// The integer `value`, represented at the given scale
    #[must_use]
    pub fn from_integer(value: BigUint, scale: u32) -> Self {
        Self::new(value * pow10(scale), scale)
    }

    /// Parses a decimal string (`"12"`, `"12.5"`, `".5"`) and represents it at
    /// exactly `scale` fractional digits, truncating toward zero.
    pub fn parse_with_scale(src: &str, scale: u32) -> CodecResult<Self> {
        Ok(src.parse::<Decimal>()?.rescale(scale))
    }

    /// Scaled integer digits, i.e. `self * 10^scale`
    #[must_use]
    pub const fn digits(&self) -> &BigUint {
        &self.digits
    }

    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits.is_zero()
    }

    /// Integer part, truncated toward zero
    #[must_use]
    pub fn trunc(&self) -> BigUint {
        &self.digits / pow10(self.scale)
    }

    /// Represents the same number at `scale` fractional digits, truncating
    /// toward zero when `scale` is smaller than the current one.
    #[must_use]
    pub fn rescale(&self, scale: u32) -> Self {
        let digits = if scale >= self.scale {
            &self.digits * pow10(scale - self.scale)
        } else {
            &self.digits / pow10(self.scale - scale)
        };
        Self { digits, scale }
    }

    /// Exact sum, at the larger of the two scales
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let scale = self.scale.max(other.scale);
        Self::new(self.rescale(scale).digits + other.rescale(scale).digits, scale)
    }

    /// Exact difference, or `None` if it would be negative
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let scale = self.scale.max(other.scale);
        let (lhs, rhs) = (self.rescale(scale).digits, other.rescale(scale).digits);
        if lhs < rhs {
            None
        } else {
            Some(Self::new(lhs - rhs, scale))
        }
    }

    /// Exact product, at the sum of the two scales, or `None` if that sum
    /// does not fit a `u32`
    #[must_use]
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        let scale = self.scale.checked_add(other.scale)?;
        Some(Self::new(&self.digits * &other.digits, scale))
    }
}

impl Display for Decimal {
    /// Writes exactly `scale` fractional digits
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let digits = self.digits.to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&digits);
        }
        match digits.len().checked_sub(scale) {
            Some(split) if split > 0 => {
                write!(f, "{}.{}", &digits[..split], &digits[split..])
            }
            _ => {
                f.write_str("0.")?;
                f.write_str(&"0".repeat(scale - digits.len()))?;
                f.write_str(&digits)
            }
        }
    }
}

impl FromStr for Decimal {
    type Err = CodecError;

    /// Parses an unsigned decimal literal, keeping every fractional digit given
    fn from_str(src: &str) -> CodecResult<Self> {
        let src = src.trim();
        let (int, frac) = match src.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (src, ""),
        };
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (int.is_empty() && frac.is_empty()) || !all_digits(int) || !all_digits(frac) {
            return Err(malformed());
        }
        let joined = format!("{}{}", int, frac);
        let digits = match BigUint::parse_bytes(joined.as_bytes(), 10) {
            Some(d) => d,
            None => return Err(malformed()),
        };
        let scale = u32::try_from(frac.len()).map_err(|_| malformed())?;
        Ok(Self::new(digits, scale))
    }
}

#[cfg(feature = "serde_impls")]
impl serde::Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Typed decimal value, in fixed-scale or variable-scale mode
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecimalValue {
    value: Decimal,
    variable: bool,
}

impl DecimalValue {
    /// Fixed-scale decimal; `value` is rescaled to `scale`, truncating.
    #[must_use]
    pub fn fixed(value: &Decimal, scale: u32) -> Self {
        Self {
            value: value.rescale(scale),
            variable: false,
        }
    }

    /// Variable-scale decimal, keeping the scale of `value`
    #[must_use]
    pub fn variable(value: Decimal) -> Self {
        Self {
            value,
            variable: true,
        }
    }

    /// Zero-valued placeholder; `None` selects variable-scale mode.
    #[must_use]
    pub fn placeholder(scale: Option<u32>) -> Self {
        match scale {
            Some(scale) => Self::fixed(&Decimal::zero(scale), scale),
            None => Self::variable(Decimal::zero(0)),
        }
    }

    #[must_use]
    pub const fn value(&self) -> &Decimal {
        &self.value
    }

    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.value.scale
    }

    #[must_use]
    pub const fn is_variable_scale(&self) -> bool {
        self.variable
    }

    /// Replaces the held number, rescaling it to the fixed scale if there is one.
    pub fn set(&mut self, value: Decimal) {
        self.value = if self.variable {
            value
        } else {
            value.rescale(self.value.scale)
        };
    }
}

impl Codec for DecimalValue {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        let digits = biguint_bytes(&self.value.digits);
        let n = encode_prefixed(buf, &digits);
        if self.variable {
            n + buf.push_many(self.value.scale.to_be_bytes())
        } else {
            n
        }
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        if self.variable {
            self.encode_nested(buf)
        } else {
            buf.push_all(&biguint_bytes(&self.value.digits))
        }
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        self.value.digits = BigUint::from_bytes_be(&decode_prefixed(p)?);
        if self.variable {
            self.value.scale = p.take_u32()?;
        }
        Ok(())
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        match (self.variable, bytes.is_empty()) {
            (true, true) => {
                self.value = Decimal::zero(0);
                Ok(())
            }
            (true, false) => decode_top_level_as_nested(self, bytes),
            (false, _) => {
                self.value.digits = BigUint::from_bytes_be(bytes);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hexstring::hex_of_bytes;
    use crate::parse::SliceParser;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(dec("12.50").to_string(), "12.50");
        assert_eq!(dec("7").to_string(), "7");
        assert_eq!(dec(".5").to_string(), "0.5");
        assert_eq!(Decimal::new(BigUint::from(5u8), 3).to_string(), "0.005");
        assert!("1.2.3".parse::<Decimal>().is_err());
        assert!("-1".parse::<Decimal>().is_err());
        assert!("".parse::<Decimal>().is_err());
    }

    #[test]
    fn rescale_truncates_toward_zero() {
        assert_eq!(Decimal::parse_with_scale("1.999", 2).unwrap().to_string(), "1.99");
        assert_eq!(dec("1.5").rescale(4).to_string(), "1.5000");
        assert_eq!(dec("123.456").trunc(), BigUint::from(123u8));
    }

    #[test]
    fn exact_arithmetic() {
        assert_eq!(dec("0.1").add(&dec("0.2")), dec("0.3"));
        assert_eq!(dec("1.25").checked_mul(&dec("4")).unwrap().to_string(), "5.00");
        assert_eq!(Decimal::zero(u32::MAX).checked_mul(&dec("0.1")), None);
        assert_eq!(dec("1").checked_sub(&dec("0.25")).unwrap().to_string(), "0.75");
        assert_eq!(dec("0.25").checked_sub(&dec("1")), None);
    }

    #[test]
    fn fixed_scale_encoding() {
        let v = DecimalValue::fixed(&dec("1.5"), 2);
        // 150 == 0x96
        assert_eq!(hex_of_bytes(&v.to_top_level_bytes()), "96");
        assert_eq!(hex_of_bytes(&v.to_nested_bytes()), "0000000196");

        let mut out = DecimalValue::placeholder(Some(2));
        out.decode_top_level(&[0x96]).unwrap();
        assert_eq!(out, v);
        out.decode_nested(&mut SliceParser::new(&v.to_nested_bytes())).unwrap();
        assert_eq!(out.value().to_string(), "1.50");
    }

    #[test]
    fn variable_scale_encoding() {
        let v = DecimalValue::variable(dec("1.5"));
        assert_eq!(hex_of_bytes(&v.to_nested_bytes()), "000000010f00000001");
        assert_eq!(v.to_top_level_bytes(), v.to_nested_bytes());

        let mut out = DecimalValue::placeholder(None);
        out.decode_top_level(&v.to_top_level_bytes()).unwrap();
        assert_eq!(out, v);
        out.decode_top_level(&[]).unwrap();
        assert_eq!(out.value(), &Decimal::zero(0));
    }

    #[test]
    fn wide_scale_displays() {
        let mut out = DecimalValue::placeholder(None);
        out.decode_top_level(&[0x00, 0x00, 0x00, 0x01, 0x01, 0x00, 0x10, 0x00, 0x00])
            .unwrap();
        assert_eq!(out.scale(), 0x0010_0000);
        let text = out.value().to_string();
        assert_eq!(text.len(), 2 + 0x0010_0000);
        assert!(text.starts_with("0.000"));
        assert!(text.ends_with("001"));

        assert_eq!(Decimal::new(BigUint::from(123u8), 3).to_string(), "0.123");
        assert_eq!(Decimal::new(BigUint::from(1234u16), 3).to_string(), "1.234");
        assert_eq!(Decimal::zero(2).to_string(), "0.00");
    }
}
