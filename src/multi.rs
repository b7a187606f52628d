//! Argument-level combinators
//!
//! These types only ever appear in the argument list of a contract call,
//! never inside a [`Value`]. Rather than having an encoding of their own,
//! they expand into zero or more wire parts:
//!
//!   * [`MultiValue`] contributes the parts of each of its items, in order;
//!   * [`OptionalValue`] contributes the parts of its value, or none at all;
//!   * [`VariadicValues`] contributes the parts of each of its items;
//!   * [`CountedVariadicValues`] contributes one part holding its item count,
//!     followed by the parts of each of its items.
//!
//! Optional and variadic arguments are only delimited by the end of the part
//! list, so they are only legal in trailing position; see
//! [`check_ordering`].

use tracing::{debug, trace};

use crate::conv::Codec;
use crate::error::{CodecError, CodecResult, Locator, ResultExt};
use crate::parts::PartsHolder;
use crate::prim::wire_length;
use crate::schema::ArgDescriptor;
use crate::value::{FixedInt, Value};

/// One entry of a contract-call argument list
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    Single(Value),
    Multi(MultiValue),
    Optional(OptionalValue),
    Variadic(VariadicValues),
    Counted(CountedVariadicValues),
}

impl Argument {
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Argument::Single(_) => "single value",
            Argument::Multi(_) => "multi-value",
            Argument::Optional(_) => "optional value",
            Argument::Variadic(_) => "variadic values",
            Argument::Counted(_) => "counted variadic values",
        }
    }

    /// Appends the parts of this argument to `holder`.
    pub fn encode_parts(&self, holder: &mut PartsHolder) -> CodecResult<()> {
        match self {
            Argument::Single(value) => {
                holder.append_empty_part();
                let part = holder.last_part_mut()?;
                let _ = value.encode_top_level(part);
                trace!(index = holder.len() - 1, kind = value.kind_name(), "appended part");
                Ok(())
            }
            Argument::Multi(multi) => encode_all(&multi.items, holder),
            Argument::Optional(optional) => match &optional.value {
                Some(arg) => arg.encode_parts(holder),
                None => Ok(()),
            },
            Argument::Variadic(variadic) => encode_all(&variadic.items, holder),
            Argument::Counted(counted) => {
                let count = FixedInt::u32(wire_length(counted.items.len()));
                holder.append_empty_part();
                let _ = count.encode_top_level(holder.last_part_mut()?);
                trace!(count = counted.items.len(), "appended count part");
                encode_all(&counted.items, holder)
            }
        }
    }

    /// Overwrites this argument with values read from `holder`, starting at
    /// its focused part.
    pub fn decode_parts(&mut self, holder: &mut PartsHolder) -> CodecResult<()> {
        match self {
            Argument::Single(value) => {
                let part = holder.read_whole_focused_part()?;
                value.decode_top_level(part)?;
                trace!(index = holder.focused_index(), kind = value.kind_name(), "consumed part");
                holder.focus_on_next_part()
            }
            Argument::Multi(multi) => {
                for (ix, item) in multi.items.iter_mut().enumerate() {
                    item.decode_parts(holder).at_index(ix)?;
                }
                Ok(())
            }
            Argument::Optional(optional) => {
                if holder.is_focused_beyond_last_part() {
                    optional.value = None;
                    return Ok(());
                }
                let mut arg = optional.placeholder()?;
                arg.decode_parts(holder)?;
                optional.value = Some(Box::new(arg));
                Ok(())
            }
            Argument::Variadic(variadic) => {
                variadic.items.clear();
                while !holder.is_focused_beyond_last_part() {
                    let before = holder.focused_index();
                    let mut item = variadic.item_type.instantiate();
                    item.decode_parts(holder).at_index(variadic.items.len())?;
                    variadic.items.push(item);
                    if holder.focused_index() == before {
                        break;
                    }
                }
                Ok(())
            }
            Argument::Counted(counted) => {
                let mut count = FixedInt::u32(0);
                count.decode_top_level(holder.read_whole_focused_part()?)?;
                holder.focus_on_next_part()?;
                let count = count.value() as usize;
                trace!(count, "consumed count part");
                counted.items = Vec::with_capacity(count.min(holder.remaining()));
                for ix in 0..count {
                    let mut item = counted.item_type.instantiate();
                    item.decode_parts(holder).at_index(ix)?;
                    counted.items.push(item);
                }
                Ok(())
            }
        }
    }
}

fn encode_all(items: &[Argument], holder: &mut PartsHolder) -> CodecResult<()> {
    items.iter().try_for_each(|item| item.encode_parts(holder))
}

/// Checks that optional and variadic arguments only appear in trailing
/// position, looking through multi-values.
///
/// # Errors
///
/// Returns [`CodecError::OrderingViolation`] for the first offending argument,
/// wrapped with the location of any enclosing multi-value.
pub fn check_ordering(args: &[Argument]) -> CodecResult<()> {
    check_tail(args, true)
}

fn check_tail(args: &[Argument], is_tail: bool) -> CodecResult<()> {
    let count = args.len();
    for (position, arg) in args.iter().enumerate() {
        let tail = is_tail && position + 1 == count;
        match arg {
            Argument::Optional(_) | Argument::Variadic(_) if !tail => {
                debug!(kind = arg.kind_name(), position, count, "ordering violation");
                return Err(CodecError::OrderingViolation {
                    kind: arg.kind_name(),
                    position,
                    count,
                });
            }
            Argument::Multi(multi) => {
                check_tail(&multi.items, tail).at(Locator::Index(position))?;
            }
            Argument::Optional(optional) => {
                if let Some(inner) = &optional.value {
                    check_tail(std::slice::from_ref(inner.as_ref()), tail)?;
                }
            }
            Argument::Variadic(VariadicValues { items, .. })
            | Argument::Counted(CountedVariadicValues { items, .. }) => {
                for (ix, item) in items.iter().enumerate() {
                    check_tail(std::slice::from_ref(item), false).at(Locator::Index(ix))?;
                }
            }
            Argument::Single(_) => (),
        }
    }
    Ok(())
}

/// Fixed group of arguments, contributing the parts of each
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MultiValue {
    items: Vec<Argument>,
}

impl MultiValue {
    #[must_use]
    pub fn new(items: Vec<Argument>) -> Self {
        Self { items }
    }

    /// Multi-value of plain values
    #[must_use]
    pub fn of_values(values: Vec<Value>) -> Self {
        Self::new(values.into_iter().map(Argument::Single).collect())
    }

    #[must_use]
    pub fn items(&self) -> &[Argument] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Argument] {
        &mut self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Argument> {
        self.items
    }
}

/// Trailing argument that may be omitted entirely
#[derive(Clone, Debug)]
pub struct OptionalValue {
    value: Option<Box<Argument>>,
    item_type: Option<ArgDescriptor>,
}

impl OptionalValue {
    /// Omitted argument of shape `item_type`
    #[must_use]
    pub fn none(item_type: ArgDescriptor) -> Self {
        Self {
            value: None,
            item_type: Some(item_type),
        }
    }

    /// Supplied argument, which also serves as its own placeholder
    #[must_use]
    pub fn some(value: Argument) -> Self {
        Self {
            value: Some(Box::new(value)),
            item_type: None,
        }
    }

    #[must_use]
    pub fn get(&self) -> Option<&Argument> {
        self.value.as_deref()
    }

    #[must_use]
    pub fn item_type(&self) -> Option<&ArgDescriptor> {
        self.item_type.as_ref()
    }

    pub fn set(&mut self, value: Option<Argument>) {
        self.value = value.map(Box::new);
    }

    pub(crate) fn placeholder(&mut self) -> CodecResult<Argument> {
        match (&self.item_type, self.value.take()) {
            (Some(ty), _) => Ok(ty.instantiate()),
            (None, Some(held)) => Ok(*held),
            (None, None) => Err(CodecError::MissingPlaceholder("optional argument")),
        }
    }
}

impl PartialEq for OptionalValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Trailing run of zero or more arguments of the same shape
#[derive(Clone, Debug)]
pub struct VariadicValues {
    items: Vec<Argument>,
    item_type: ArgDescriptor,
}

impl VariadicValues {
    #[must_use]
    pub fn new(item_type: ArgDescriptor) -> Self {
        Self::with_items(item_type, Vec::new())
    }

    #[must_use]
    pub fn with_items(item_type: ArgDescriptor, items: Vec<Argument>) -> Self {
        Self { items, item_type }
    }

    /// Variadic run of plain values of type `item_type`
    #[must_use]
    pub fn of_values(item_type: crate::schema::TypeDescriptor, values: Vec<Value>) -> Self {
        Self::with_items(
            ArgDescriptor::Single(item_type),
            values.into_iter().map(Argument::Single).collect(),
        )
    }

    #[must_use]
    pub fn items(&self) -> &[Argument] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<Argument> {
        &mut self.items
    }

    #[must_use]
    pub fn item_type(&self) -> &ArgDescriptor {
        &self.item_type
    }
}

impl PartialEq for VariadicValues {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

/// Run of arguments of the same shape, preceded by a part holding its length
#[derive(Clone, Debug)]
pub struct CountedVariadicValues {
    items: Vec<Argument>,
    item_type: ArgDescriptor,
}

impl CountedVariadicValues {
    #[must_use]
    pub fn new(item_type: ArgDescriptor) -> Self {
        Self::with_items(item_type, Vec::new())
    }

    #[must_use]
    pub fn with_items(item_type: ArgDescriptor, items: Vec<Argument>) -> Self {
        Self { items, item_type }
    }

    #[must_use]
    pub fn of_values(item_type: crate::schema::TypeDescriptor, values: Vec<Value>) -> Self {
        Self::with_items(
            ArgDescriptor::Single(item_type),
            values.into_iter().map(Argument::Single).collect(),
        )
    }

    #[must_use]
    pub fn items(&self) -> &[Argument] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<Argument> {
        &mut self.items
    }

    #[must_use]
    pub fn item_type(&self) -> &ArgDescriptor {
        &self.item_type
    }
}

impl PartialEq for CountedVariadicValues {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Argument::Single(value)
    }
}

impl From<MultiValue> for Argument {
    fn from(value: MultiValue) -> Self {
        Argument::Multi(value)
    }
}

impl From<OptionalValue> for Argument {
    fn from(value: OptionalValue) -> Self {
        Argument::Optional(value)
    }
}

impl From<VariadicValues> for Argument {
    fn from(value: VariadicValues) -> Self {
        Argument::Variadic(value)
    }
}

impl From<CountedVariadicValues> for Argument {
    fn from(value: CountedVariadicValues) -> Self {
        Argument::Counted(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::TypeDescriptor;

    fn encode(arg: &Argument) -> Vec<Vec<u8>> {
        let mut holder = PartsHolder::new();
        arg.encode_parts(&mut holder).unwrap();
        holder.into_parts()
    }

    #[test]
    fn multi_contributes_item_parts() {
        let multi = MultiValue::of_values(vec![Value::u8(1), Value::Bool(false), Value::str("a")]);
        assert_eq!(encode(&multi.into()), vec![vec![1], vec![], b"a".to_vec()]);
    }

    #[test]
    fn counted_variadic_leads_with_count() {
        let counted = CountedVariadicValues::of_values(TypeDescriptor::u32(), vec![Value::u32(1), Value::u32(2)]);
        assert_eq!(encode(&counted.into()), vec![vec![2], vec![1], vec![2]]);
        let empty = CountedVariadicValues::new(TypeDescriptor::u32().into());
        assert_eq!(encode(&empty.into()), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn counted_variadic_reads_exactly_count() {
        let mut holder = PartsHolder::from_parts(vec![vec![2], vec![7], vec![8], vec![9]]);
        let mut arg = ArgDescriptor::counted_variadic(TypeDescriptor::u8().into()).instantiate();
        arg.decode_parts(&mut holder).unwrap();
        let expected = CountedVariadicValues::of_values(TypeDescriptor::u8(), vec![Value::u8(7), Value::u8(8)]);
        assert_eq!(arg, Argument::Counted(expected));
        assert_eq!(holder.remaining(), 1);
    }

    #[test]
    fn variadic_is_greedy() {
        let mut holder = PartsHolder::from_parts(vec![vec![1], vec![2], vec![3]]);
        let mut arg = ArgDescriptor::variadic(TypeDescriptor::u8().into()).instantiate();
        arg.decode_parts(&mut holder).unwrap();
        match arg {
            Argument::Variadic(v) => assert_eq!(v.items().len(), 3),
            other => panic!("unexpected argument {:?}", other),
        }
        assert!(holder.is_focused_beyond_last_part());
    }

    #[test]
    fn variadic_of_empty_multi_terminates() {
        let mut holder = PartsHolder::from_parts(vec![vec![1]]);
        let mut arg = ArgDescriptor::variadic(ArgDescriptor::Multi(Vec::new())).instantiate();
        arg.decode_parts(&mut holder).unwrap();
        assert_eq!(holder.remaining(), 1);
    }

    #[test]
    fn ordering_rules() {
        let optional: Argument = OptionalValue::none(TypeDescriptor::u8().into()).into();
        let variadic: Argument = VariadicValues::new(TypeDescriptor::u8().into()).into();
        let counted: Argument = CountedVariadicValues::new(TypeDescriptor::u8().into()).into();

        check_ordering(&[Value::u8(1).into(), optional.clone()]).unwrap();
        check_ordering(&[counted.clone(), variadic.clone()]).unwrap();

        let err = check_ordering(&[optional.clone(), Value::u8(1).into()]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::OrderingViolation { kind: "optional value", position: 0, count: 2 }
        ));

        let nested = MultiValue::new(vec![variadic.clone()]);
        let err = check_ordering(&[nested.into(), Value::u8(1).into()]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OrderingViolation);
        assert_eq!(err.path(), vec![&Locator::Index(0)]);

        let trailing = MultiValue::new(vec![Value::u8(1).into(), variadic]);
        check_ordering(&[counted, trailing.into()]).unwrap();
    }

    #[test]
    fn optional_decodes_absent_at_end() {
        let mut holder = PartsHolder::from_parts(vec![]);
        let mut arg = ArgDescriptor::optional(TypeDescriptor::u8().into()).instantiate();
        arg.decode_parts(&mut holder).unwrap();
        assert_eq!(arg, Argument::Optional(OptionalValue::none(TypeDescriptor::u8().into())));
    }
}
