//! Optional values
//!
//! The nested form is a presence marker (`0x00` or `0x01`) followed, when
//! present, by the nested encoding of the inner value. At top level, an
//! absent value is the empty byte string and a present value is encoded
//! exactly as in nested position.

use crate::conv::{decode_top_level_as_nested, target::Target, Codec};
use crate::error::{CodecError, CodecResult};
use crate::parse::Parser;
use crate::schema::TypeDescriptor;
use crate::value::Value;

const ABSENT: u8 = 0x00;
const PRESENT: u8 = 0x01;

/// Zero or one value of a given type
#[derive(Clone, Debug)]
pub struct OptionValue {
    inner: Option<Box<Value>>,
    inner_type: Option<TypeDescriptor>,
}

impl OptionValue {
    /// Absent value of type `inner_type`
    #[must_use]
    pub fn none(inner_type: TypeDescriptor) -> Self {
        Self {
            inner: None,
            inner_type: Some(inner_type),
        }
    }

    /// Present value, without a type descriptor.
    ///
    /// The held value serves as its own placeholder when decoding.
    #[must_use]
    pub fn some(value: Value) -> Self {
        Self {
            inner: Some(Box::new(value)),
            inner_type: None,
        }
    }

    /// Present value of type `inner_type`
    #[must_use]
    pub fn some_typed(inner_type: TypeDescriptor, value: Value) -> Self {
        Self {
            inner: Some(Box::new(value)),
            inner_type: Some(inner_type),
        }
    }

    #[must_use]
    pub fn get(&self) -> Option<&Value> {
        self.inner.as_deref()
    }

    #[must_use]
    pub fn is_some(&self) -> bool {
        self.inner.is_some()
    }

    #[must_use]
    pub fn inner_type(&self) -> Option<&TypeDescriptor> {
        self.inner_type.as_ref()
    }

    pub fn set(&mut self, value: Option<Value>) {
        self.inner = value.map(Box::new);
    }

    /// Returns a placeholder to decode the inner value into, preferring a
    /// fresh one from the type descriptor over the currently held value.
    pub(crate) fn inner_placeholder(&mut self) -> CodecResult<Value> {
        match (&self.inner_type, self.inner.take()) {
            (Some(ty), _) => Ok(ty.placeholder()),
            (None, Some(held)) => Ok(*held),
            (None, None) => Err(CodecError::MissingPlaceholder("option")),
        }
    }
}

impl PartialEq for OptionValue {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Codec for OptionValue {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        match &self.inner {
            None => buf.push_one(ABSENT),
            Some(value) => buf.push_one(PRESENT) + value.encode_nested(buf),
        }
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        match &self.inner {
            None => 0,
            Some(_) => self.encode_nested(buf),
        }
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        match p.consume_byte()? {
            ABSENT => {
                self.inner = None;
                Ok(())
            }
            PRESENT => {
                let mut value = self.inner_placeholder()?;
                value.decode_nested(p)?;
                self.inner = Some(Box::new(value));
                Ok(())
            }
            byte => Err(CodecError::InvalidOptionMarker(byte)),
        }
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        if bytes.is_empty() {
            self.inner = None;
            Ok(())
        } else {
            decode_top_level_as_nested(self, bytes)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use crate::value::int::FixedInt;

    #[test]
    fn absent_and_present() {
        let none = OptionValue::none(TypeDescriptor::u16());
        assert_eq!(none.to_top_level_bytes(), Vec::<u8>::new());
        assert_eq!(none.to_nested_bytes(), vec![0x00]);

        let some = OptionValue::some(Value::Int(FixedInt::u16(5)));
        assert_eq!(some.to_top_level_bytes(), vec![0x01, 0x00, 0x05]);
        assert_eq!(some.to_nested_bytes(), some.to_top_level_bytes());
    }

    #[test]
    fn decode_uses_descriptor() {
        let mut out = OptionValue::none(TypeDescriptor::u16());
        out.decode_top_level(&[0x01, 0x00, 0x05]).unwrap();
        assert_eq!(out, OptionValue::some(Value::Int(FixedInt::u16(5))));
        out.decode_top_level(&[]).unwrap();
        assert!(!out.is_some());
        out.decode_top_level(&[0x01, 0x00, 0x06]).unwrap();
        assert_eq!(out.get(), Some(&Value::Int(FixedInt::u16(6))));
    }

    #[test]
    fn decode_failures() {
        let mut out = OptionValue::none(TypeDescriptor::u16());
        assert_eq!(
            out.decode_top_level(&[0x02]).unwrap_err().kind(),
            ErrorKind::InvalidOptionMarker
        );
        assert_eq!(
            out.decode_top_level(&[0x00, 0x00]).unwrap_err().kind(),
            ErrorKind::UnconsumedData
        );

        let mut untyped = OptionValue::some(Value::Bool(true));
        untyped.decode_top_level(&[0x00]).unwrap();
        assert_eq!(
            untyped.decode_top_level(&[0x01, 0x01]).unwrap_err().kind(),
            ErrorKind::MissingPlaceholder
        );
    }
}
