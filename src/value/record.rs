//! Heterogeneous products: named-field structs and positional tuples
//!
//! Neither carries any framing of its own; the nested encoding is the
//! concatenation of the nested encodings of its members in declaration
//! order, and the top-level encoding is identical. A top-level buffer must be
//! consumed exactly, leftover bytes being reported as
//! [`CodecError::UnconsumedData`](crate::error::CodecError::UnconsumedData).

use crate::conv::{decode_top_level_as_nested, target::Target, Codec};
use crate::error::{CodecResult, ResultExt};
use crate::parse::Parser;
use crate::value::Value;

/// Named member of a struct or enum variant
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

pub(crate) fn encode_fields<U: Target>(fields: &[Field], buf: &mut U) -> usize {
    fields.iter().map(|f| f.value.encode_nested(buf)).sum()
}

pub(crate) fn decode_fields<P: Parser>(fields: &mut [Field], p: &mut P) -> CodecResult<()> {
    for field in fields.iter_mut() {
        field.value.decode_nested(p).at_field(&field.name)?;
    }
    Ok(())
}

/// Struct with an ordered list of named fields
#[derive(Clone, Debug, PartialEq)]
pub struct StructValue {
    name: String,
    fields: Vec<Field>,
}

impl StructValue {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Mutable access to the fields; the field list itself cannot grow or shrink.
    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    /// Looks up a field value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .map(|f| &mut f.value)
    }

    #[must_use]
    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl Codec for StructValue {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        encode_fields(&self.fields, buf)
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        encode_fields(&self.fields, buf)
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        decode_fields(&mut self.fields, p)
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        decode_top_level_as_nested(self, bytes)
    }
}

/// Tuple of positional values, with arity fixed at construction
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TupleValue {
    items: Vec<Value>,
}

impl TupleValue {
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Value] {
        &mut self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

impl Codec for TupleValue {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        self.items.iter().map(|item| item.encode_nested(buf)).sum()
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        self.encode_nested(buf)
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        for (ix, item) in self.items.iter_mut().enumerate() {
            item.decode_nested(p).at_index(ix)?;
        }
        Ok(())
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        decode_top_level_as_nested(self, bytes)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{CodecError, ErrorKind, Leftover, Locator};
    use crate::hexstring::hex_of_bytes;
    use crate::value::int::{BigIntValue, FixedInt};
    use num_bigint::BigUint;

    fn sample() -> StructValue {
        StructValue::new(
            "Payment",
            vec![
                Field::new("amount", Value::BigInt(BigIntValue::unsigned(BigUint::from(1000u32)))),
                Field::new("nonce", Value::Int(FixedInt::u32(7))),
                Field::new("memo", Value::Bytes(b"hi".to_vec())),
            ],
        )
    }

    #[test]
    fn struct_is_concatenation_of_fields() {
        let s = sample();
        assert_eq!(
            hex_of_bytes(&s.to_nested_bytes()),
            "0000000203e800000007000000026869"
        );
        assert_eq!(s.to_top_level_bytes(), s.to_nested_bytes());

        let mut out = sample();
        if let Some(nonce) = out.field_mut("nonce") {
            *nonce = Value::Int(FixedInt::u32(0));
        }
        out.decode_top_level(&s.to_top_level_bytes()).unwrap();
        assert_eq!(out, s);
        assert_eq!(out.field("nonce"), Some(&Value::Int(FixedInt::u32(7))));
    }

    #[test]
    fn struct_errors_carry_field_name() {
        let mut out = sample();
        let err = out.decode_top_level(&[0, 0, 0, 0, 0, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfData);
        assert_eq!(err.path(), vec![&Locator::Field("nonce".into())]);
    }

    #[test]
    fn struct_rejects_trailing_bytes() {
        let s = sample();
        let mut bytes = s.to_top_level_bytes();
        bytes.push(0xaa);
        let mut out = sample();
        assert!(matches!(
            out.decode_top_level(&bytes),
            Err(CodecError::UnconsumedData(Leftover::Bytes(1)))
        ));
    }

    #[test]
    fn tuple_positional() {
        let t = TupleValue::new(vec![Value::Int(FixedInt::u8(1)), Value::Bool(true)]);
        assert_eq!(t.to_top_level_bytes(), vec![0x01, 0x01]);
        let mut out = TupleValue::new(vec![Value::Int(FixedInt::u8(0)), Value::Bool(false)]);
        let err = out.decode_top_level(&[0x01, 0x02]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBooleanEncoding);
        assert_eq!(err.path(), vec![&Locator::Index(1)]);
    }
}
