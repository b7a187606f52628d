//! The typed value tree
//!
//! [`Value`] is the closed set of typed values that can appear as a
//! contract-call argument or inside another value. Each variant wraps a
//! type from one of the sub-modules, which implements [`Codec`] for it;
//! `Value` itself dispatches to those implementations.

use num_bigint::{BigInt, BigUint};

use crate::conv::{target::Target, Codec};
use crate::error::CodecResult;
use crate::parse::Parser;

pub mod address;
pub mod decimal;
pub mod enumeration;
pub mod int;
pub mod metadata;
pub mod option;
pub mod record;
pub mod seq;

pub use address::Address;
pub use decimal::{Decimal, DecimalValue};
pub use enumeration::{EnumValue, ExplicitEnumValue};
pub use int::{BigIntValue, FixedInt, IntWidth};
pub use metadata::CodeMetadata;
pub use option::OptionValue;
pub use record::{Field, StructValue, TupleValue};
pub use seq::{ArrayValue, ListValue};

/// Typed value with a nested and a top-level wire encoding
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(FixedInt),
    BigInt(BigIntValue),
    Bool(bool),
    Bytes(Vec<u8>),
    Str(String),
    Address(Address),
    Decimal(DecimalValue),
    CodeMetadata(CodeMetadata),
    List(ListValue),
    Array(ArrayValue),
    Struct(StructValue),
    Tuple(TupleValue),
    Enum(EnumValue),
    ExplicitEnum(ExplicitEnumValue),
    Option(OptionValue),
}

/// Dispatches a method call to the `Codec` implementation of the wrapped value.
macro_rules! dispatch {
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

impl Value {
    /// Short lowercase name of the variant, for diagnostics
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "fixed-width integer",
            Value::BigInt(_) => "big integer",
            Value::Bool(_) => "bool",
            Value::Bytes(_) => "bytes",
            Value::Str(_) => "string",
            Value::Address(_) => "address",
            Value::Decimal(_) => "decimal",
            Value::CodeMetadata(_) => "code metadata",
            Value::List(_) => "list",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
            Value::Tuple(_) => "tuple",
            Value::Enum(_) => "enum",
            Value::ExplicitEnum(_) => "explicit enum",
            Value::Option(_) => "option",
        }
    }

    #[must_use]
    pub const fn u8(v: u8) -> Self {
        Value::Int(FixedInt::u8(v))
    }

    #[must_use]
    pub const fn u16(v: u16) -> Self {
        Value::Int(FixedInt::u16(v))
    }

    #[must_use]
    pub const fn u32(v: u32) -> Self {
        Value::Int(FixedInt::u32(v))
    }

    #[must_use]
    pub const fn u64(v: u64) -> Self {
        Value::Int(FixedInt::u64(v))
    }

    #[must_use]
    pub const fn i8(v: i8) -> Self {
        Value::Int(FixedInt::i8(v))
    }

    #[must_use]
    pub const fn i16(v: i16) -> Self {
        Value::Int(FixedInt::i16(v))
    }

    #[must_use]
    pub const fn i32(v: i32) -> Self {
        Value::Int(FixedInt::i32(v))
    }

    #[must_use]
    pub const fn i64(v: i64) -> Self {
        Value::Int(FixedInt::i64(v))
    }

    #[must_use]
    pub fn biguint(v: impl Into<BigUint>) -> Self {
        Value::BigInt(BigIntValue::unsigned(v.into()))
    }

    #[must_use]
    pub fn bigint(v: impl Into<BigInt>) -> Self {
        Value::BigInt(BigIntValue::signed(v.into()))
    }

    #[must_use]
    pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(v.into())
    }

    #[must_use]
    pub fn str(v: impl Into<String>) -> Self {
        Value::Str(v.into())
    }

    /// Address parsed from 64 hex digits
    pub fn address_hex(src: &str) -> CodecResult<Self> {
        Address::from_hex(src).map(Value::Address)
    }
}

impl Codec for Value {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        dispatch!(self, v => v.encode_nested(buf))
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        dispatch!(self, v => v.encode_top_level(buf))
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        dispatch!(self, v => v.decode_nested(p))
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        dispatch!(self, v => v.decode_top_level(bytes))
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    FixedInt => Int,
    BigIntValue => BigInt,
    bool => Bool,
    Vec<u8> => Bytes,
    String => Str,
    Address => Address,
    DecimalValue => Decimal,
    CodeMetadata => CodeMetadata,
    ListValue => List,
    ArrayValue => Array,
    StructValue => Struct,
    TupleValue => Tuple,
    EnumValue => Enum,
    ExplicitEnumValue => ExplicitEnum,
    OptionValue => Option,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schema::{
        EnumDescriptor, ExplicitEnumDescriptor, FieldDescriptor, StructDescriptor, TypeDescriptor,
        VariantDescriptor,
    };

    fn roundtrip(v: &Value, ty: &TypeDescriptor) {
        let mut out = ty.placeholder();
        out.decode_top_level(&v.to_top_level_bytes()).unwrap();
        assert_eq!(&out, v);
        let mut out = ty.placeholder();
        out.decode_nested(&mut crate::parse::SliceParser::new(&v.to_nested_bytes()))
            .unwrap();
        assert_eq!(&out, v);
    }

    #[test]
    fn scalars_roundtrip_through_placeholders() {
        roundtrip(&Value::u8(0x42), &TypeDescriptor::u8());
        roundtrip(&Value::i32(-129), &TypeDescriptor::i32());
        roundtrip(&Value::u64(0), &TypeDescriptor::u64());
        roundtrip(&Value::biguint(1_000_000u32), &TypeDescriptor::biguint());
        roundtrip(&Value::bigint(-1), &TypeDescriptor::bigint());
        roundtrip(&Value::Bool(false), &TypeDescriptor::Bool);
        roundtrip(&Value::bytes(vec![1, 2, 3]), &TypeDescriptor::Bytes);
        roundtrip(&Value::str("calico"), &TypeDescriptor::Str);
        roundtrip(&Value::Address(Address::from_array([9; 32])), &TypeDescriptor::Address);
    }

    #[test]
    fn composites_roundtrip_through_placeholders() {
        let ty = TypeDescriptor::list(TypeDescriptor::option(TypeDescriptor::u32()));
        let v = Value::List(ListValue::with_items(
            TypeDescriptor::option(TypeDescriptor::u32()),
            vec![
                Value::Option(OptionValue::some(Value::u32(3))),
                Value::Option(OptionValue::none(TypeDescriptor::u32())),
            ],
        ));
        roundtrip(&v, &ty);

        let ty = TypeDescriptor::Tuple(vec![TypeDescriptor::Str, TypeDescriptor::array(TypeDescriptor::u8(), 2)]);
        let v = Value::Tuple(TupleValue::new(vec![
            Value::str("ab"),
            Value::Array(ArrayValue::new(TypeDescriptor::u8(), 2, vec![Value::u8(1), Value::u8(2)]).unwrap()),
        ]));
        roundtrip(&v, &ty);
    }

    #[test]
    fn records_and_enums_roundtrip_through_placeholders() {
        let ty = TypeDescriptor::Struct(StructDescriptor::new(
            "Grant",
            vec![
                FieldDescriptor::new("who", TypeDescriptor::Address),
                FieldDescriptor::new("flags", TypeDescriptor::CodeMetadata),
                FieldDescriptor::new("cap", TypeDescriptor::option(TypeDescriptor::biguint())),
            ],
        ));
        let v = Value::Struct(StructValue::new(
            "Grant",
            vec![
                Field::new("who", Value::Address(Address::from_array([7; 32]))),
                Field::new("flags", Value::CodeMetadata(CodeMetadata::new(true, true, false, true))),
                Field::new("cap", Value::Option(OptionValue::some(Value::biguint(500u32)))),
            ],
        ));
        roundtrip(&v, &ty);

        let ty = TypeDescriptor::Enum(EnumDescriptor::new(
            "Mode",
            vec![
                VariantDescriptor::unit(0, "Off"),
                VariantDescriptor::new(2, "Rate", vec![FieldDescriptor::new("per", TypeDescriptor::u16())]),
            ],
        ));
        roundtrip(&Value::Enum(EnumValue::unit(0)), &ty);
        roundtrip(
            &Value::Enum(EnumValue::new(2, vec![Field::new("per", Value::u16(300))])),
            &ty,
        );

        let ty = TypeDescriptor::ExplicitEnum(ExplicitEnumDescriptor::new(
            "Side",
            vec!["Buy".to_owned(), "Sell".to_owned()],
        ));
        roundtrip(&Value::ExplicitEnum(ExplicitEnumValue::new("Sell")), &ty);
    }

    #[test]
    fn decimals_and_metadata_roundtrip_through_placeholders() {
        let price: Decimal = "12.345".parse().unwrap();
        roundtrip(
            &Value::Decimal(DecimalValue::fixed(&price, 4)),
            &TypeDescriptor::Decimal { scale: Some(4) },
        );
        roundtrip(
            &Value::Decimal(DecimalValue::variable(price)),
            &TypeDescriptor::Decimal { scale: None },
        );
        roundtrip(
            &Value::CodeMetadata(CodeMetadata::new(false, true, true, false)),
            &TypeDescriptor::CodeMetadata,
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::u8(1).kind_name(), "fixed-width integer");
        assert_eq!(Value::from(true).kind_name(), "bool");
    }
}
