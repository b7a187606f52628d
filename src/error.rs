//! Error types
//!
//! This module contains the closed error type [`CodecError`] that every
//! fallible operation in this crate returns, along with the detail types it
//! carries for the failure classes that need more than a byte or a name to
//! describe: [`WidthError`] for byte-widths, [`LengthError`] for
//! element-counts, [`BoundsError`] for numeric ranges, and [`HexConvError`]
//! for the text layer.
//!
//! Failures deep inside a value tree are wrapped, on the way up, with a
//! [`Locator`] naming the field, index or argument they occurred at. The
//! root cause can always be recovered through [`CodecError::kind`].

use std::error::Error;
use std::fmt::{Debug, Display, Formatter, Result};
use std::string::FromUtf8Error;

use num_bigint::BigInt;

/// Enumerated error type for values whose byte-width is fixed by the
/// wire format, such as addresses.
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum WidthError {
    /// Requirement of precise byte-width not satisfied
    WrongWidth { exact: usize, actual: usize },
}

impl Display for WidthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            WidthError::WrongWidth { exact, actual } => {
                write!(f, "{actual}-byte value violated requirement of {exact} bytes")
            }
        }
    }
}

impl Error for WidthError {}

/// Enumerated error type for collection-like values whose element-count
/// is fixed by a schema: arrays, tuples, multi-values.
///
/// Analogous to [`WidthError`], but counting elements rather than bytes.
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum LengthError {
    /// Requirement of precise element-count not satisfied
    WrongLength { exact: usize, actual: usize },
}

impl LengthError {
    /// Returns `Ok(())` if `actual == exact`, and the corresponding
    /// `WrongLength` error otherwise.
    pub fn check(exact: usize, actual: usize) -> std::result::Result<(), Self> {
        if exact == actual {
            Ok(())
        } else {
            Err(Self::WrongLength { exact, actual })
        }
    }
}

impl Display for LengthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            LengthError::WrongLength { exact, actual } => {
                write!(f, "{actual}-element value violated requirement of {exact} elements")
            }
        }
    }
}

impl Error for LengthError {}

/// Error type representing a numeric value that falls outside of the
/// range representable by its declared type.
///
/// Bounds and values are held as [`BigInt`] so that the same type can
/// describe both fixed-width overflow and negative values supplied for
/// unsigned big integers.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum BoundsError {
    Underflow { min: BigInt, val: BigInt },
    Overflow { max: BigInt, val: BigInt },
}

impl BoundsError {
    /// Checks that `val` falls into the inclusive range `[min, max]`,
    /// where an absent `max` means the range is unbounded above.
    pub fn restrict(val: &BigInt, min: &BigInt, max: Option<&BigInt>) -> std::result::Result<(), Self> {
        if val < min {
            return Err(Self::Underflow {
                min: min.clone(),
                val: val.clone(),
            });
        }
        match max {
            Some(max) if val > max => Err(Self::Overflow {
                max: max.clone(),
                val: val.clone(),
            }),
            _ => Ok(()),
        }
    }
}

impl Display for BoundsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            BoundsError::Underflow { min, val } => {
                write!(f, "provided value {} less than minimum bound {}", val, min)
            }
            BoundsError::Overflow { max, val } => {
                write!(f, "provided value {} greater than maximum bound {}", val, max)
            }
        }
    }
}

impl Error for BoundsError {}

/// Error type representing all possible conditions for invalidity
/// encountered when attempting to parse a string as a series
/// of hex-encoded bytes.
#[derive(Clone, PartialEq, Eq, Ord, PartialOrd)]
pub enum HexConvError {
    /// Error case for odd-length strings
    OddParity(String),
    /// Error case for strings containing non-hex characters,
    /// i.e. anything not in `[0-9a-fA-F]`.
    NonHex(String),
}

impl Debug for HexConvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::OddParity(invalid) => {
                write!(f, "non-even length-parity for string `{}`", invalid)
            }
            Self::NonHex(invalid) => write!(f, "non-hex character found in string `{}`", invalid),
        }
    }
}

impl Display for HexConvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::OddParity(_) => write!(f, "hex-conversion failed on odd-length string"),
            Self::NonHex(_) => write!(f, "hex-conversion failed on non-hex character"),
        }
    }
}

impl Error for HexConvError {}

/// Position within a value tree or argument list that an error is reported against
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Named field of a struct or enum variant
    Field(String),
    /// Positional element of a list, array, tuple or multi-value
    Index(usize),
    /// Top-level argument of a `Serializer` call
    Argument(usize),
}

impl Display for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Locator::Field(name) => write!(f, "field `{}`", name),
            Locator::Index(ix) => write!(f, "index {}", ix),
            Locator::Argument(ix) => write!(f, "argument {}", ix),
        }
    }
}

/// Unit of data left over after a decode that should have consumed everything
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Leftover {
    Bytes(usize),
    Parts(usize),
}

impl Display for Leftover {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Leftover::Bytes(n) => write!(f, "{} unconsumed byte(s)", n),
            Leftover::Parts(n) => write!(f, "{} unconsumed part(s)", n),
        }
    }
}

/// Flat classification of a [`CodecError`], with any [`Locator`] context
/// stripped away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnexpectedEndOfData,
    ValueOutOfRange,
    InvalidBooleanEncoding,
    InvalidOptionMarker,
    InvalidAddressLength,
    InvalidUtf8,
    LengthMismatch,
    MissingPlaceholder,
    OrderingViolation,
    UnconsumedData,
    TypeMismatch,
    MissingField,
    NoPartToWriteTo,
    InvalidHex,
    UnknownVariant,
    InvalidSeparator,
}

/// Enumeration over every failure that encoding, decoding or native
/// binding can report.
#[derive(Debug)]
#[non_exhaustive]
pub enum CodecError {
    /// A fixed-size or length-prefixed read requested more bytes (or parts)
    /// than remained.
    UnexpectedEndOfData {
        offset: usize,
        requested: usize,
        available: usize,
    },
    /// Integer does not fit the declared width or signedness
    ValueOutOfRange(BoundsError),
    InvalidBooleanEncoding(u8),
    InvalidOptionMarker(u8),
    InvalidAddressLength(WidthError),
    InvalidUtf8(FromUtf8Error),
    /// Array, tuple or multi-value arity violated
    LengthMismatch(LengthError),
    /// Decoding reached a value whose inner type cannot be determined
    MissingPlaceholder(&'static str),
    /// `OptionalValue` or `VariadicValues` found before the last position
    OrderingViolation {
        kind: &'static str,
        position: usize,
        count: usize,
    },
    UnconsumedData(Leftover),
    /// Native value has the wrong shape for the typed value it populates
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    MissingField(String),
    NoPartToWriteTo,
    InvalidHex(HexConvError),
    /// Discriminant or variant name not declared by the enum's descriptor
    UnknownVariant(String),
    /// Part separator that is empty or could occur inside a hex-encoded part
    InvalidSeparator(String),
    /// Error raised at a specific position inside a value tree
    Nested { at: Locator, source: Box<CodecError> },
}

impl CodecError {
    /// Wraps `self` with the position it was encountered at.
    #[must_use]
    pub fn at(self, at: Locator) -> Self {
        Self::Nested {
            at,
            source: Box::new(self),
        }
    }

    /// Returns the classification of the innermost error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::UnexpectedEndOfData { .. } => ErrorKind::UnexpectedEndOfData,
            CodecError::ValueOutOfRange(_) => ErrorKind::ValueOutOfRange,
            CodecError::InvalidBooleanEncoding(_) => ErrorKind::InvalidBooleanEncoding,
            CodecError::InvalidOptionMarker(_) => ErrorKind::InvalidOptionMarker,
            CodecError::InvalidAddressLength(_) => ErrorKind::InvalidAddressLength,
            CodecError::InvalidUtf8(_) => ErrorKind::InvalidUtf8,
            CodecError::LengthMismatch(_) => ErrorKind::LengthMismatch,
            CodecError::MissingPlaceholder(_) => ErrorKind::MissingPlaceholder,
            CodecError::OrderingViolation { .. } => ErrorKind::OrderingViolation,
            CodecError::UnconsumedData(_) => ErrorKind::UnconsumedData,
            CodecError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            CodecError::MissingField(_) => ErrorKind::MissingField,
            CodecError::NoPartToWriteTo => ErrorKind::NoPartToWriteTo,
            CodecError::InvalidHex(_) => ErrorKind::InvalidHex,
            CodecError::UnknownVariant(_) => ErrorKind::UnknownVariant,
            CodecError::InvalidSeparator(_) => ErrorKind::InvalidSeparator,
            CodecError::Nested { source, .. } => source.kind(),
        }
    }

    /// Returns the chain of locators leading to the innermost error,
    /// outermost first.
    #[must_use]
    pub fn path(&self) -> Vec<&Locator> {
        let mut ret = Vec::new();
        let mut cur = self;
        while let CodecError::Nested { at, source } = cur {
            ret.push(at);
            cur = source;
        }
        ret
    }

    /// Returns the innermost error, skipping over any `Nested` wrappers.
    #[must_use]
    pub fn root(&self) -> &CodecError {
        match self {
            CodecError::Nested { source, .. } => source.root(),
            other => other,
        }
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CodecError::UnexpectedEndOfData {
                offset,
                requested,
                available,
            } => write!(
                f,
                "unexpected end of data: requested {} at offset {} with only {} remaining",
                requested, offset, available
            ),
            CodecError::ValueOutOfRange(err) => write!(f, "value out of range: {}", err),
            CodecError::InvalidBooleanEncoding(byte) => {
                write!(f, "invalid boolean encoding 0x{byte:02x}")
            }
            CodecError::InvalidOptionMarker(byte) => {
                write!(f, "invalid option marker 0x{byte:02x} (expected 0x00 or 0x01)")
            }
            CodecError::InvalidAddressLength(err) => write!(f, "invalid address: {}", err),
            CodecError::InvalidUtf8(err) => write!(f, "invalid UTF-8 in string payload: {}", err),
            CodecError::LengthMismatch(err) => write!(f, "length mismatch: {}", err),
            CodecError::MissingPlaceholder(what) => {
                write!(f, "cannot decode {} without a placeholder for its inner type", what)
            }
            CodecError::OrderingViolation {
                kind,
                position,
                count,
            } => write!(
                f,
                "{} must be the last argument, found at position {} of {}",
                kind, position, count
            ),
            CodecError::UnconsumedData(leftover) => {
                write!(f, "decoding finished with {}", leftover)
            }
            CodecError::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {}, found {}", expected, found)
            }
            CodecError::MissingField(name) => write!(f, "missing field `{}`", name),
            CodecError::NoPartToWriteTo => write!(f, "no part to write to"),
            CodecError::InvalidHex(err) => Display::fmt(err, f),
            CodecError::UnknownVariant(what) => write!(f, "unknown enum variant {}", what),
            CodecError::InvalidSeparator(sep) => {
                write!(f, "invalid part separator {:?}: must be non-empty and contain no hex digits", sep)
            }
            CodecError::Nested { at, source } => write!(f, "{}: {}", at, source),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CodecError::ValueOutOfRange(err) => Some(err),
            CodecError::InvalidAddressLength(err) => Some(err),
            CodecError::InvalidUtf8(err) => Some(err),
            CodecError::LengthMismatch(err) => Some(err),
            CodecError::InvalidHex(err) => Some(err),
            CodecError::Nested { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<WidthError> for CodecError {
    fn from(err: WidthError) -> Self {
        Self::InvalidAddressLength(err)
    }
}

impl From<LengthError> for CodecError {
    fn from(err: LengthError) -> Self {
        Self::LengthMismatch(err)
    }
}

impl From<BoundsError> for CodecError {
    fn from(err: BoundsError) -> Self {
        Self::ValueOutOfRange(err)
    }
}

impl From<HexConvError> for CodecError {
    fn from(err: HexConvError) -> Self {
        Self::InvalidHex(err)
    }
}

impl From<FromUtf8Error> for CodecError {
    fn from(err: FromUtf8Error) -> Self {
        Self::InvalidUtf8(err)
    }
}

/// Type alias for Result with an error type of [`CodecError`]
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Extension trait for attaching a [`Locator`] to the error case of a `CodecResult`
pub(crate) trait ResultExt<T> {
    fn at(self, at: Locator) -> CodecResult<T>;

    fn at_field(self, name: &str) -> CodecResult<T>
    where
        Self: Sized,
    {
        self.at(Locator::Field(name.to_owned()))
    }

    fn at_index(self, ix: usize) -> CodecResult<T>
    where
        Self: Sized,
    {
        self.at(Locator::Index(ix))
    }
}

impl<T> ResultExt<T> for CodecResult<T> {
    fn at(self, at: Locator) -> CodecResult<T> {
        self.map_err(|err| err.at(at))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn dummy<T: Send + Sync>() {}

    #[test]
    fn codec_error_threadsafe() {
        dummy::<CodecError>()
    }

    #[test]
    fn kind_and_path_see_through_nesting() {
        let err = CodecError::InvalidBooleanEncoding(0x02)
            .at(Locator::Field("flag".into()))
            .at(Locator::Index(3))
            .at(Locator::Argument(0));
        assert_eq!(err.kind(), ErrorKind::InvalidBooleanEncoding);
        assert_eq!(
            err.path(),
            vec![
                &Locator::Argument(0),
                &Locator::Index(3),
                &Locator::Field("flag".into())
            ]
        );
        assert_eq!(
            err.to_string(),
            "argument 0: index 3: field `flag`: invalid boolean encoding 0x02"
        );
    }

    #[test]
    fn bounds_restrict() {
        let min = BigInt::from(0);
        let max = BigInt::from(255);
        assert!(BoundsError::restrict(&BigInt::from(255), &min, Some(&max)).is_ok());
        assert!(matches!(
            BoundsError::restrict(&BigInt::from(256), &min, Some(&max)),
            Err(BoundsError::Overflow { .. })
        ));
        assert!(matches!(
            BoundsError::restrict(&BigInt::from(-1), &min, None),
            Err(BoundsError::Underflow { .. })
        ));
    }

    #[test]
    fn length_check() {
        assert_eq!(LengthError::check(2, 2), Ok(()));
        assert_eq!(
            LengthError::check(2, 3),
            Err(LengthError::WrongLength { exact: 2, actual: 3 })
        );
    }
}
