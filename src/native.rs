//! Binding between host-native values and typed values
//!
//! [`NativeValue`] is a small dynamically typed data model (null, booleans,
//! integers, decimals, strings, bytes, sequences and ordered records) that
//! the caller works with. A typed value is populated from one through
//! [`FromNative::set_from_native`], and converted back into one through
//! [`ToNative::to_native`].
//!
//! Population is schema-driven: the receiver is a placeholder of the expected
//! type, and the native value has to fit its shape. Records are matched to
//! struct and enum fields by name, sequences to lists, arrays, tuples and
//! multi-values by position.
//!
//! An enum is described natively by a [`Record`] whose first entry is the
//! reserved key [`DISCRIMINANT_KEY`], followed by the fields of the variant.
//! A sequence whose first element is the discriminant and whose remaining
//! elements are the fields, a bare integer for a field-less variant, or a
//! variant name are accepted as well.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;

use crate::error::{BoundsError, CodecError, CodecResult, LengthError, Locator, ResultExt};
use crate::multi::{Argument, CountedVariadicValues, MultiValue, OptionalValue, VariadicValues};
use crate::schema::{ArgDescriptor, TypeDescriptor};
use crate::value::{
    Address, ArrayValue, BigIntValue, CodeMetadata, Decimal, DecimalValue, EnumValue,
    ExplicitEnumValue, Field, FixedInt, IntWidth, ListValue, OptionValue, StructValue, TupleValue,
    Value,
};

/// Record key holding the discriminant of an enum
pub const DISCRIMINANT_KEY: &str = "__discriminant__";

/// Dynamically typed host value
#[derive(Clone, Debug, PartialEq)]
pub enum NativeValue {
    Null,
    Bool(bool),
    Int(BigInt),
    Decimal(Decimal),
    Str(String),
    Bytes(Vec<u8>),
    Seq(Vec<NativeValue>),
    Record(Record),
}

impl NativeValue {
    /// Short lowercase name of the variant, for diagnostics
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Bool(_) => "bool",
            NativeValue::Int(_) => "integer",
            NativeValue::Decimal(_) => "decimal",
            NativeValue::Str(_) => "string",
            NativeValue::Bytes(_) => "bytes",
            NativeValue::Seq(_) => "sequence",
            NativeValue::Record(_) => "record",
        }
    }

    fn mismatch(&self, expected: &'static str) -> CodecError {
        CodecError::TypeMismatch {
            expected,
            found: self.kind_name(),
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            NativeValue::Int(i) => Some(i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NativeValue::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            NativeValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_seq(&self) -> Option<&[NativeValue]> {
        match self {
            NativeValue::Seq(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            NativeValue::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Interprets `self` as an integer, accepting decimal-digit strings.
    fn to_bigint(&self) -> CodecResult<BigInt> {
        match self {
            NativeValue::Int(i) => Ok(i.clone()),
            NativeValue::Str(s) => s
                .trim()
                .parse::<BigInt>()
                .map_err(|_| self.mismatch("integer")),
            other => Err(other.mismatch("integer")),
        }
    }

    fn to_u8(&self) -> CodecResult<u8> {
        let val = self.to_bigint()?;
        BoundsError::restrict(&val, &BigInt::from(0u8), Some(&BigInt::from(u8::MAX)))?;
        Ok(val.to_u8().unwrap_or_default())
    }
}

/// Ordered list of named native values
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Record {
    entries: Vec<(String, NativeValue)>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<NativeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets the entry `name`, keeping its position if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<NativeValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NativeValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    fn require(&self, name: &str) -> CodecResult<&NativeValue> {
        self.get(name)
            .ok_or_else(|| CodecError::MissingField(name.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NativeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<(String, NativeValue)> {
        self.entries
    }
}

impl<K: Into<String>> FromIterator<(K, NativeValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, NativeValue)>>(iter: I) -> Self {
        let mut ret = Record::new();
        for (k, v) in iter {
            ret.insert(k, v);
        }
        ret
    }
}

macro_rules! native_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for NativeValue {
                fn from(v: $t) -> Self {
                    NativeValue::Int(BigInt::from(v))
                }
            }
        )*
    };
}

native_from_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl From<bool> for NativeValue {
    fn from(v: bool) -> Self {
        NativeValue::Bool(v)
    }
}

impl From<BigInt> for NativeValue {
    fn from(v: BigInt) -> Self {
        NativeValue::Int(v)
    }
}

impl From<BigUint> for NativeValue {
    fn from(v: BigUint) -> Self {
        NativeValue::Int(BigInt::from_biguint(Sign::Plus, v))
    }
}

impl From<Decimal> for NativeValue {
    fn from(v: Decimal) -> Self {
        NativeValue::Decimal(v)
    }
}

impl From<&str> for NativeValue {
    fn from(v: &str) -> Self {
        NativeValue::Str(v.to_owned())
    }
}

impl From<String> for NativeValue {
    fn from(v: String) -> Self {
        NativeValue::Str(v)
    }
}

impl From<Vec<u8>> for NativeValue {
    fn from(v: Vec<u8>) -> Self {
        NativeValue::Bytes(v)
    }
}

impl From<&[u8]> for NativeValue {
    fn from(v: &[u8]) -> Self {
        NativeValue::Bytes(v.to_vec())
    }
}

impl From<Vec<NativeValue>> for NativeValue {
    fn from(v: Vec<NativeValue>) -> Self {
        NativeValue::Seq(v)
    }
}

impl From<Record> for NativeValue {
    fn from(v: Record) -> Self {
        NativeValue::Record(v)
    }
}

impl<T: Into<NativeValue>> From<Option<T>> for NativeValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => NativeValue::Null,
        }
    }
}

/// Populating a typed value from a native one
pub trait FromNative {
    /// Overwrites `self` with the contents of `native`, keeping the type of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeMismatch`] when `native` has the wrong
    /// shape, [`CodecError::MissingField`] when a record lacks a declared
    /// field, [`CodecError::LengthMismatch`] when a sequence has the wrong
    /// arity for a fixed-length type, and the range errors of the receiving
    /// value, wrapped with the position they occurred at.
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()>;
}

/// Conversion of a typed value into a native one
pub trait ToNative {
    fn to_native(&self) -> NativeValue;
}

impl FromNative for FixedInt {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        self.set_big(&native.to_bigint()?)
    }
}

impl ToNative for FixedInt {
    fn to_native(&self) -> NativeValue {
        NativeValue::Int(self.to_bigint())
    }
}

impl FromNative for BigIntValue {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        self.set(native.to_bigint()?)
    }
}

impl ToNative for BigIntValue {
    fn to_native(&self) -> NativeValue {
        NativeValue::Int(self.value().clone())
    }
}

impl FromNative for bool {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        match native {
            NativeValue::Bool(b) => {
                *self = *b;
                Ok(())
            }
            other => Err(other.mismatch("bool")),
        }
    }
}

impl ToNative for bool {
    fn to_native(&self) -> NativeValue {
        NativeValue::Bool(*self)
    }
}

impl FromNative for Vec<u8> {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        *self = match native {
            NativeValue::Bytes(b) => b.clone(),
            NativeValue::Str(s) => s.as_bytes().to_vec(),
            other => return Err(other.mismatch("bytes")),
        };
        Ok(())
    }
}

impl ToNative for Vec<u8> {
    fn to_native(&self) -> NativeValue {
        NativeValue::Bytes(self.clone())
    }
}

impl FromNative for String {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        *self = match native {
            NativeValue::Str(s) => s.clone(),
            NativeValue::Bytes(b) => String::from_utf8(b.clone())?,
            other => return Err(other.mismatch("string")),
        };
        Ok(())
    }
}

impl ToNative for String {
    fn to_native(&self) -> NativeValue {
        NativeValue::Str(self.clone())
    }
}

impl FromNative for Address {
    /// Accepts 32 raw bytes or 64 hex digits
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        *self = match native {
            NativeValue::Bytes(b) => Address::try_from_slice(b)?,
            NativeValue::Str(s) => Address::from_hex(s)?,
            other => return Err(other.mismatch("address")),
        };
        Ok(())
    }
}

impl ToNative for Address {
    fn to_native(&self) -> NativeValue {
        NativeValue::Bytes(self.to_vec())
    }
}

impl FromNative for DecimalValue {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        let value = match native {
            NativeValue::Decimal(d) => d.clone(),
            NativeValue::Str(s) => s.parse::<Decimal>()?,
            NativeValue::Int(i) => {
                BoundsError::restrict(i, &BigInt::from(0u8), None)?;
                let scale = if self.is_variable_scale() { 0 } else { self.scale() };
                Decimal::from_integer(i.magnitude().clone(), scale)
            }
            other => return Err(other.mismatch("decimal")),
        };
        self.set(value);
        Ok(())
    }
}

impl ToNative for DecimalValue {
    fn to_native(&self) -> NativeValue {
        NativeValue::Decimal(self.value().clone())
    }
}

const METADATA_FLAGS: [&str; 4] = ["upgradeable", "readable", "payable", "payable_by_sc"];

impl FromNative for CodeMetadata {
    /// Accepts the two raw flag bytes, or a record of boolean flags
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        match native {
            NativeValue::Bytes(b) => {
                LengthError::check(2, b.len())?;
                *self = CodeMetadata::from_bytes([b[0], b[1]]);
            }
            NativeValue::Record(r) => {
                let mut flags = [false; 4];
                for (flag, name) in flags.iter_mut().zip(METADATA_FLAGS) {
                    flag.set_from_native(r.require(name)?).at_field(name)?;
                }
                *self = CodeMetadata::new(flags[0], flags[1], flags[2], flags[3]);
            }
            other => return Err(other.mismatch("code metadata")),
        }
        Ok(())
    }
}

impl ToNative for CodeMetadata {
    fn to_native(&self) -> NativeValue {
        let flags = [
            self.is_upgradeable(),
            self.is_readable(),
            self.is_payable(),
            self.is_payable_by_sc(),
        ];
        NativeValue::Record(
            METADATA_FLAGS
                .iter()
                .zip(flags)
                .map(|(name, flag)| (*name, NativeValue::Bool(flag)))
                .collect(),
        )
    }
}

fn is_byte_type(ty: &TypeDescriptor) -> bool {
    *ty == TypeDescriptor::FixedInt {
        width: IntWidth::W8,
        signed: false,
    }
}

/// Builds one value per native element, from placeholders of `item_type`.
///
/// A byte string is accepted in place of a sequence of `u8` values.
fn native_items(item_type: &TypeDescriptor, native: &NativeValue) -> CodecResult<Vec<Value>> {
    match native {
        NativeValue::Seq(items) => items
            .iter()
            .enumerate()
            .map(|(ix, item)| -> CodecResult<Value> {
                let mut value = item_type.placeholder();
                value.set_from_native(item).at_index(ix)?;
                Ok(value)
            })
            .collect(),
        NativeValue::Bytes(bytes) if is_byte_type(item_type) => {
            Ok(bytes.iter().map(|&b| Value::u8(b)).collect())
        }
        other => Err(other.mismatch("sequence")),
    }
}

fn items_to_native(items: &[Value]) -> NativeValue {
    NativeValue::Seq(items.iter().map(ToNative::to_native).collect())
}

impl FromNative for ListValue {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        let items = native_items(self.item_type(), native)?;
        *self.items_mut() = items;
        Ok(())
    }
}

impl ToNative for ListValue {
    fn to_native(&self) -> NativeValue {
        items_to_native(self.items())
    }
}

impl FromNative for ArrayValue {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        let items = native_items(self.item_type(), native)?;
        self.set_items(items)
    }
}

impl ToNative for ArrayValue {
    fn to_native(&self) -> NativeValue {
        items_to_native(self.items())
    }
}

/// Populates `fields` by name from a record, or by position from a sequence.
fn fields_from_native(fields: &mut [Field], native: &NativeValue) -> CodecResult<()> {
    match native {
        NativeValue::Record(r) => {
            for field in fields.iter_mut() {
                field
                    .value
                    .set_from_native(r.require(&field.name)?)
                    .at_field(&field.name)?;
            }
            Ok(())
        }
        NativeValue::Seq(items) => positional_fields(fields, items),
        other => Err(other.mismatch("record")),
    }
}

fn positional_fields(fields: &mut [Field], items: &[NativeValue]) -> CodecResult<()> {
    LengthError::check(fields.len(), items.len())?;
    for (field, item) in fields.iter_mut().zip(items) {
        field.value.set_from_native(item).at_field(&field.name)?;
    }
    Ok(())
}

fn fields_to_native(fields: &[Field]) -> Record {
    fields
        .iter()
        .map(|f| (f.name.clone(), f.value.to_native()))
        .collect()
}

impl FromNative for StructValue {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        fields_from_native(self.fields_mut(), native)
    }
}

impl ToNative for StructValue {
    fn to_native(&self) -> NativeValue {
        NativeValue::Record(fields_to_native(self.fields()))
    }
}

impl FromNative for TupleValue {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        let items = native.as_seq().ok_or_else(|| native.mismatch("sequence"))?;
        LengthError::check(self.arity(), items.len())?;
        for (ix, (value, item)) in self.items_mut().iter_mut().zip(items).enumerate() {
            value.set_from_native(item).at_index(ix)?;
        }
        Ok(())
    }
}

impl ToNative for TupleValue {
    fn to_native(&self) -> NativeValue {
        items_to_native(self.items())
    }
}

impl EnumValue {
    fn select_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        if let NativeValue::Str(name) = native {
            if let Some(desc) = self.descriptor() {
                let discriminant = desc.variant_named(name)?.discriminant;
                return self.select(discriminant);
            }
        }
        self.select(native.to_u8()?)
    }
}

impl FromNative for EnumValue {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        match native {
            NativeValue::Record(r) => {
                self.select_native(r.require(DISCRIMINANT_KEY)?)
                    .at_field(DISCRIMINANT_KEY)?;
                fields_from_native(self.fields_mut(), native)
            }
            NativeValue::Seq(items) => match items.split_first() {
                Some((discriminant, rest)) => {
                    self.select_native(discriminant).at_index(0)?;
                    positional_fields(self.fields_mut(), rest)
                }
                None => Err(CodecError::MissingField(DISCRIMINANT_KEY.to_owned())),
            },
            NativeValue::Int(_) | NativeValue::Str(_) => {
                self.select_native(native)?;
                match self.fields().first() {
                    Some(field) => Err(CodecError::MissingField(field.name.clone())),
                    None => Ok(()),
                }
            }
            other => Err(other.mismatch("enum")),
        }
    }
}

impl ToNative for EnumValue {
    fn to_native(&self) -> NativeValue {
        let mut record = Record::new().with(DISCRIMINANT_KEY, self.discriminant());
        for field in self.fields() {
            record.insert(field.name.clone(), field.value.to_native());
        }
        NativeValue::Record(record)
    }
}

impl FromNative for ExplicitEnumValue {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        match native {
            NativeValue::Str(name) => self.set(name.clone()),
            other => Err(other.mismatch("variant name")),
        }
    }
}

impl ToNative for ExplicitEnumValue {
    fn to_native(&self) -> NativeValue {
        NativeValue::Str(self.name().to_owned())
    }
}

impl FromNative for OptionValue {
    /// `Null` is absent; anything else populates the inner value
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        if let NativeValue::Null = native {
            self.set(None);
            return Ok(());
        }
        let mut value = self.inner_placeholder()?;
        value.set_from_native(native)?;
        self.set(Some(value));
        Ok(())
    }
}

impl ToNative for OptionValue {
    fn to_native(&self) -> NativeValue {
        match self.get() {
            Some(value) => value.to_native(),
            None => NativeValue::Null,
        }
    }
}

macro_rules! dispatch_native {
    ($self:expr, $v:ident => $body:expr) => {
        match $self {
            Value::Int($v) => $body,
            Value::BigInt($v) => $body,
            Value::Bool($v) => $body,
            Value::Bytes($v) => $body,
            Value::Str($v) => $body,
            Value::Address($v) => $body,
            Value::Decimal($v) => $body,
            Value::CodeMetadata($v) => $body,
            Value::List($v) => $body,
            Value::Array($v) => $body,
            Value::Struct($v) => $body,
            Value::Tuple($v) => $body,
            Value::Enum($v) => $body,
            Value::ExplicitEnum($v) => $body,
            Value::Option($v) => $body,
        }
    };
}

impl FromNative for Value {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        dispatch_native!(self, v => v.set_from_native(native))
    }
}

impl ToNative for Value {
    fn to_native(&self) -> NativeValue {
        dispatch_native!(self, v => v.to_native())
    }
}

fn native_args(item_type: &ArgDescriptor, native: &NativeValue) -> CodecResult<Vec<Argument>> {
    let items = native.as_seq().ok_or_else(|| native.mismatch("sequence"))?;
    items
        .iter()
        .enumerate()
        .map(|(ix, item)| -> CodecResult<Argument> {
            let mut arg = item_type.instantiate();
            arg.set_from_native(item).at_index(ix)?;
            Ok(arg)
        })
        .collect()
}

fn args_to_native(items: &[Argument]) -> NativeValue {
    NativeValue::Seq(items.iter().map(ToNative::to_native).collect())
}

impl FromNative for MultiValue {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        let items = native.as_seq().ok_or_else(|| native.mismatch("sequence"))?;
        LengthError::check(self.items().len(), items.len())?;
        for (ix, (arg, item)) in self.items_mut().iter_mut().zip(items).enumerate() {
            arg.set_from_native(item).at_index(ix)?;
        }
        Ok(())
    }
}

impl FromNative for OptionalValue {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        if let NativeValue::Null = native {
            self.set(None);
            return Ok(());
        }
        let mut arg = self.placeholder()?;
        arg.set_from_native(native)?;
        self.set(Some(arg));
        Ok(())
    }
}

impl FromNative for VariadicValues {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        let items = native_args(self.item_type(), native)?;
        *self.items_mut() = items;
        Ok(())
    }
}

impl FromNative for CountedVariadicValues {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        let items = native_args(self.item_type(), native)?;
        *self.items_mut() = items;
        Ok(())
    }
}

impl FromNative for Argument {
    fn set_from_native(&mut self, native: &NativeValue) -> CodecResult<()> {
        match self {
            Argument::Single(v) => v.set_from_native(native),
            Argument::Multi(v) => v.set_from_native(native),
            Argument::Optional(v) => v.set_from_native(native),
            Argument::Variadic(v) => v.set_from_native(native),
            Argument::Counted(v) => v.set_from_native(native),
        }
    }
}

impl ToNative for Argument {
    fn to_native(&self) -> NativeValue {
        match self {
            Argument::Single(v) => v.to_native(),
            Argument::Multi(v) => args_to_native(v.items()),
            Argument::Optional(v) => match v.get() {
                Some(arg) => arg.to_native(),
                None => NativeValue::Null,
            },
            Argument::Variadic(v) => args_to_native(v.items()),
            Argument::Counted(v) => args_to_native(v.items()),
        }
    }
}

/// Populates a whole argument list from one native value per argument.
///
/// A trailing optional argument may be left out of `natives` entirely.
pub fn args_from_native(args: &mut [Argument], natives: &[NativeValue]) -> CodecResult<()> {
    for (ix, arg) in args.iter_mut().enumerate() {
        let native = natives.get(ix).unwrap_or(&NativeValue::Null);
        arg.set_from_native(native).at(Locator::Argument(ix))?;
    }
    if natives.len() > args.len() {
        return Err(LengthError::WrongLength {
            exact: args.len(),
            actual: natives.len(),
        }
        .into());
    }
    Ok(())
}

#[cfg(feature = "serde_impls")]
mod serde_impls {
    use super::{NativeValue, Record};
    use crate::hexstring::hex_of_bytes;
    use num_traits::ToPrimitive;
    use serde::ser::{SerializeMap, SerializeSeq};
    use serde::{Serialize, Serializer};

    impl Serialize for NativeValue {
        /// Integers beyond the 64-bit range, and bytes, are written as strings
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                NativeValue::Null => serializer.serialize_unit(),
                NativeValue::Bool(b) => serializer.serialize_bool(*b),
                NativeValue::Int(i) => match (i.to_i64(), i.to_u64()) {
                    (Some(v), _) => serializer.serialize_i64(v),
                    (None, Some(v)) => serializer.serialize_u64(v),
                    (None, None) => serializer.collect_str(i),
                },
                NativeValue::Decimal(d) => d.serialize(serializer),
                NativeValue::Str(s) => serializer.serialize_str(s),
                NativeValue::Bytes(b) => serializer.serialize_str(&hex_of_bytes(b)),
                NativeValue::Seq(items) => {
                    let mut seq = serializer.serialize_seq(Some(items.len()))?;
                    for item in items {
                        seq.serialize_element(item)?;
                    }
                    seq.end()
                }
                NativeValue::Record(r) => r.serialize(serializer),
            }
        }
    }

    impl Serialize for Record {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self.iter() {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }
}
