//! Homogeneous sequences: dynamic lists and fixed-length arrays
//!
//! Both sequence types carry the [`TypeDescriptor`] of their elements, which
//! is used during decoding to construct a fresh placeholder for each element
//! before parsing into it.
//!
//! A [`ListValue`] is self-delimiting only in nested position, where it is
//! prefixed by its element count. At top level the count is dropped, so the
//! list has to be the sole content of its part and decoding simply runs until
//! the part is exhausted.
//!
//! An [`ArrayValue`] never writes its length, as the length belongs to the
//! schema. Its top-level decoding is lenient in the same way as for lists,
//! reading elements until the part is exhausted without comparing the count
//! against the declared length.

use crate::conv::{target::Target, Codec};
use crate::error::{CodecError, CodecResult, LengthError, Leftover, ResultExt};
use crate::parse::{Parser, SliceParser};
use crate::prim::{decode_length, encode_length, wire_length};
use crate::schema::TypeDescriptor;
use crate::value::Value;

fn encode_items<U: Target>(items: &[Value], buf: &mut U) -> usize {
    items.iter().map(|item| item.encode_nested(buf)).sum()
}

/// Decodes exactly `count` elements in nested form.
fn decode_counted<P: Parser>(
    item_type: &TypeDescriptor,
    count: usize,
    p: &mut P,
) -> CodecResult<Vec<Value>> {
    let mut items = Vec::with_capacity(count.min(p.remainder()));
    for ix in 0..count {
        let mut item = item_type.placeholder();
        item.decode_nested(p).at_index(ix)?;
        items.push(item);
    }
    Ok(items)
}

/// Decodes nested elements until `bytes` is exhausted.
fn decode_until_exhausted(item_type: &TypeDescriptor, bytes: &[u8]) -> CodecResult<Vec<Value>> {
    let mut p = SliceParser::new(bytes);
    let mut items = Vec::new();
    while !p.is_exhausted() {
        let before = p.offset();
        let mut item = item_type.placeholder();
        item.decode_nested(&mut p).at_index(items.len())?;
        if p.offset() == before {
            // a zero-width element can never exhaust the buffer
            return Err(CodecError::UnconsumedData(Leftover::Bytes(p.remainder())));
        }
        items.push(item);
    }
    Ok(items)
}

/// Dynamically sized homogeneous sequence
#[derive(Clone, Debug)]
pub struct ListValue {
    items: Vec<Value>,
    item_type: TypeDescriptor,
}

impl ListValue {
    /// Constructs an empty list of elements of type `item_type`
    #[must_use]
    pub fn new(item_type: TypeDescriptor) -> Self {
        Self {
            items: Vec::new(),
            item_type,
        }
    }

    /// Constructs a list holding `items`, each of which is assumed to be of
    /// type `item_type`.
    #[must_use]
    pub fn with_items(item_type: TypeDescriptor, items: Vec<Value>) -> Self {
        Self { items, item_type }
    }

    #[must_use]
    pub fn item_type(&self) -> &TypeDescriptor {
        &self.item_type
    }

    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<Value> {
        &mut self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: Value) {
        self.items.push(item)
    }
}

impl PartialEq for ListValue {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Codec for ListValue {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        encode_length(buf, wire_length(self.items.len())) + encode_items(&self.items, buf)
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        encode_items(&self.items, buf)
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        let count = decode_length(p)? as usize;
        self.items = decode_counted(&self.item_type, count, p)?;
        Ok(())
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.items = decode_until_exhausted(&self.item_type, bytes)?;
        Ok(())
    }
}

/// Homogeneous sequence whose length is fixed by its type
#[derive(Clone, Debug)]
pub struct ArrayValue {
    length: usize,
    items: Vec<Value>,
    item_type: TypeDescriptor,
}

impl ArrayValue {
    /// Constructs an array of `length` placeholder elements
    #[must_use]
    pub fn placeholder(item_type: TypeDescriptor, length: usize) -> Self {
        let items = (0..length).map(|_| item_type.placeholder()).collect();
        Self {
            length,
            items,
            item_type,
        }
    }

    /// Constructs an array holding `items`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::LengthMismatch`] unless there are exactly
    /// `length` items.
    pub fn new(item_type: TypeDescriptor, length: usize, items: Vec<Value>) -> CodecResult<Self> {
        LengthError::check(length, items.len())?;
        Ok(Self {
            length,
            items,
            item_type,
        })
    }

    /// Declared number of elements
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn item_type(&self) -> &TypeDescriptor {
        &self.item_type
    }

    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Replaces every element, checking the declared length.
    pub fn set_items(&mut self, items: Vec<Value>) -> CodecResult<()> {
        LengthError::check(self.length, items.len())?;
        self.items = items;
        Ok(())
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.items == other.items
    }
}

impl Codec for ArrayValue {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        encode_items(&self.items, buf)
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        encode_items(&self.items, buf)
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        self.items = decode_counted(&self.item_type, self.length, p)?;
        Ok(())
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.items = decode_until_exhausted(&self.item_type, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{ErrorKind, Locator};
    use crate::hexstring::hex_of_bytes;
    use crate::value::int::FixedInt;

    fn u16s(vals: &[u16]) -> Vec<Value> {
        vals.iter().map(|&v| Value::Int(FixedInt::u16(v))).collect()
    }

    #[test]
    fn list_nested_has_count() {
        let list = ListValue::with_items(TypeDescriptor::u16(), u16s(&[1, 2]));
        assert_eq!(hex_of_bytes(&list.to_nested_bytes()), "0000000200010002");
        assert_eq!(hex_of_bytes(&list.to_top_level_bytes()), "00010002");
        assert_eq!(ListValue::new(TypeDescriptor::u16()).to_top_level_bytes(), Vec::<u8>::new());
    }

    #[test]
    fn list_decodes_from_placeholders() {
        let mut list = ListValue::new(TypeDescriptor::u16());
        list.decode_top_level(&[0, 1, 0, 2, 0, 3]).unwrap();
        assert_eq!(list.items(), u16s(&[1, 2, 3]).as_slice());

        let mut p = SliceParser::new(&[0, 0, 0, 1, 0, 9, 0xff]);
        list.decode_nested(&mut p).unwrap();
        assert_eq!(list.items(), u16s(&[9]).as_slice());
        assert_eq!(p.remainder(), 1);
    }

    #[test]
    fn list_error_reports_index() {
        let mut list = ListValue::new(TypeDescriptor::u16());
        let err = list.decode_top_level(&[0, 1, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfData);
        assert_eq!(err.path(), vec![&Locator::Index(1)]);
    }

    #[test]
    fn array_length_enforced_on_construction() {
        let err = ArrayValue::new(TypeDescriptor::u16(), 3, u16s(&[1, 2])).unwrap_err();
        assert!(matches!(
            err,
            CodecError::LengthMismatch(LengthError::WrongLength { exact: 3, actual: 2 })
        ));
        let arr = ArrayValue::new(TypeDescriptor::u16(), 2, u16s(&[1, 2])).unwrap();
        assert_eq!(hex_of_bytes(&arr.to_nested_bytes()), "00010002");
    }

    #[test]
    fn array_nested_reads_declared_length() {
        let mut arr = ArrayValue::placeholder(TypeDescriptor::u8(), 2);
        let mut p = SliceParser::new(&[7, 8, 9]);
        arr.decode_nested(&mut p).unwrap();
        assert_eq!(arr.items().len(), 2);
        assert_eq!(p.remainder(), 1);
    }

    #[test]
    fn array_top_level_is_lenient() {
        let mut arr = ArrayValue::placeholder(TypeDescriptor::u8(), 2);
        arr.decode_top_level(&[7, 8, 9]).unwrap();
        assert_eq!(arr.items().len(), 3);
        assert_eq!(arr.length(), 2);
    }

    #[test]
    fn zero_width_items_do_not_loop() {
        let mut list = ListValue::new(TypeDescriptor::Tuple(Vec::new()));
        assert_eq!(
            list.decode_top_level(&[1]).unwrap_err().kind(),
            ErrorKind::UnconsumedData
        );
    }
}
