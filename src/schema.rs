//! Type descriptors
//!
//! Decoding writes into a *placeholder* value of the expected type, so every
//! container needs to know how to manufacture fresh placeholders for its
//! elements. The types in this module describe value types as plain data,
//! and construct those placeholders on demand.
//!
//! # `TypeDescriptor`
//!
//! [`TypeDescriptor`] has one node per variant of [`Value`], carrying the
//! static information that the value itself needs: width and signedness for
//! integers, the scale of a fixed-scale decimal, element types for sequences
//! and options, field names and types for structs, and the variant table of
//! an enum. [`TypeDescriptor::placeholder`] returns a fresh zero-valued
//! [`Value`] of the described type.
//!
//! # `ArgDescriptor`
//!
//! [`ArgDescriptor`] is the analogue of `TypeDescriptor` at the level of a
//! contract-call argument list, where the multi-value combinators of
//! [`crate::multi`] may appear in addition to single values.
//! [`ArgDescriptor::instantiate`] returns a fresh [`Argument`].
//!
//! Descriptors are normally obtained from a contract ABI by an external
//! loader; the shorthand constructors here are mostly for hand-written
//! schemas and tests.

use crate::error::{CodecError, CodecResult};
use crate::multi::{Argument, CountedVariadicValues, MultiValue, OptionalValue, VariadicValues};
use crate::value::{
    Address, ArrayValue, BigIntValue, CodeMetadata, DecimalValue, EnumValue, ExplicitEnumValue,
    Field, FixedInt, ListValue, OptionValue, StructValue, TupleValue, Value,
};

pub use crate::value::IntWidth;

/// Name and type of a struct field or enum-variant field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    fn placeholder(&self) -> Field {
        Field::new(self.name.clone(), self.ty.placeholder())
    }
}

/// Named struct type with fields in declaration order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// Single variant of an enum type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantDescriptor {
    pub discriminant: u8,
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl VariantDescriptor {
    pub fn new(discriminant: u8, name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            discriminant,
            name: name.into(),
            fields,
        }
    }

    /// Variant without any fields
    pub fn unit(discriminant: u8, name: impl Into<String>) -> Self {
        Self::new(discriminant, name, Vec::new())
    }

    /// Returns placeholder fields for this variant, in declaration order.
    #[must_use]
    pub fn placeholder_fields(&self) -> Vec<Field> {
        self.fields.iter().map(FieldDescriptor::placeholder).collect()
    }
}

/// Enum type as a table of variants
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: String,
    pub variants: Vec<VariantDescriptor>,
}

impl EnumDescriptor {
    pub fn new(name: impl Into<String>, variants: Vec<VariantDescriptor>) -> Self {
        Self {
            name: name.into(),
            variants,
        }
    }

    /// Looks up a variant by discriminant.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownVariant`] if no variant has that discriminant.
    pub fn variant(&self, discriminant: u8) -> CodecResult<&VariantDescriptor> {
        self.variants
            .iter()
            .find(|v| v.discriminant == discriminant)
            .ok_or_else(|| {
                CodecError::UnknownVariant(format!("{} of enum `{}`", discriminant, self.name))
            })
    }

    /// Looks up a variant by name.
    pub fn variant_named(&self, name: &str) -> CodecResult<&VariantDescriptor> {
        self.variants
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| CodecError::UnknownVariant(format!("`{}` of enum `{}`", name, self.name)))
    }
}

/// Enum type encoded by variant name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplicitEnumDescriptor {
    pub name: String,
    pub variants: Vec<String>,
}

impl ExplicitEnumDescriptor {
    pub fn new(name: impl Into<String>, variants: Vec<String>) -> Self {
        Self {
            name: name.into(),
            variants,
        }
    }
}

/// Description of the type of a [`Value`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeDescriptor {
    FixedInt { width: IntWidth, signed: bool },
    BigInt { signed: bool },
    Bool,
    Bytes,
    Str,
    Address,
    /// Decimal with a fixed scale, or a variable one if `None`
    Decimal { scale: Option<u32> },
    CodeMetadata,
    List(Box<TypeDescriptor>),
    Array { length: usize, item: Box<TypeDescriptor> },
    Struct(StructDescriptor),
    Tuple(Vec<TypeDescriptor>),
    Enum(EnumDescriptor),
    ExplicitEnum(ExplicitEnumDescriptor),
    Option(Box<TypeDescriptor>),
}

macro_rules! int_desc {
    ($name:ident, $width:ident, $signed:expr) => {
        #[must_use]
        pub const fn $name() -> Self {
            TypeDescriptor::FixedInt {
                width: IntWidth::$width,
                signed: $signed,
            }
        }
    };
}

impl TypeDescriptor {
    int_desc!(u8, W8, false);
    int_desc!(u16, W16, false);
    int_desc!(u32, W32, false);
    int_desc!(u64, W64, false);
    int_desc!(i8, W8, true);
    int_desc!(i16, W16, true);
    int_desc!(i32, W32, true);
    int_desc!(i64, W64, true);

    #[must_use]
    pub const fn biguint() -> Self {
        TypeDescriptor::BigInt { signed: false }
    }

    #[must_use]
    pub const fn bigint() -> Self {
        TypeDescriptor::BigInt { signed: true }
    }

    #[must_use]
    pub fn list(item: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(item))
    }

    #[must_use]
    pub fn array(item: TypeDescriptor, length: usize) -> Self {
        TypeDescriptor::Array {
            length,
            item: Box::new(item),
        }
    }

    #[must_use]
    pub fn option(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Option(Box::new(inner))
    }

    /// Constructs a fresh zero-valued [`Value`] of this type.
    ///
    /// Structs, tuples and arrays are populated with placeholders for each of
    /// their members, enums hold their first declared variant, and options
    /// are absent.
    #[must_use]
    pub fn placeholder(&self) -> Value {
        match self {
            TypeDescriptor::FixedInt { width, signed } => Value::Int(FixedInt::zero(*width, *signed)),
            TypeDescriptor::BigInt { signed } => Value::BigInt(BigIntValue::zero(*signed)),
            TypeDescriptor::Bool => Value::Bool(false),
            TypeDescriptor::Bytes => Value::Bytes(Vec::new()),
            TypeDescriptor::Str => Value::Str(String::new()),
            TypeDescriptor::Address => Value::Address(Address::zero()),
            TypeDescriptor::Decimal { scale } => Value::Decimal(DecimalValue::placeholder(*scale)),
            TypeDescriptor::CodeMetadata => Value::CodeMetadata(CodeMetadata::default()),
            TypeDescriptor::List(item) => Value::List(ListValue::new(item.as_ref().clone())),
            TypeDescriptor::Array { length, item } => {
                Value::Array(ArrayValue::placeholder(item.as_ref().clone(), *length))
            }
            TypeDescriptor::Struct(desc) => Value::Struct(StructValue::new(
                desc.name.clone(),
                desc.fields.iter().map(FieldDescriptor::placeholder).collect(),
            )),
            TypeDescriptor::Tuple(items) => {
                Value::Tuple(TupleValue::new(items.iter().map(Self::placeholder).collect()))
            }
            TypeDescriptor::Enum(desc) => Value::Enum(EnumValue::placeholder(desc.clone())),
            TypeDescriptor::ExplicitEnum(desc) => {
                Value::ExplicitEnum(ExplicitEnumValue::placeholder(desc.variants.clone()))
            }
            TypeDescriptor::Option(inner) => Value::Option(OptionValue::none(inner.as_ref().clone())),
        }
    }
}

/// Description of one contract-call argument
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgDescriptor {
    Single(TypeDescriptor),
    Multi(Vec<ArgDescriptor>),
    Optional(Box<ArgDescriptor>),
    Variadic(Box<ArgDescriptor>),
    CountedVariadic(Box<ArgDescriptor>),
}

impl ArgDescriptor {
    #[must_use]
    pub fn optional(inner: ArgDescriptor) -> Self {
        ArgDescriptor::Optional(Box::new(inner))
    }

    #[must_use]
    pub fn variadic(item: ArgDescriptor) -> Self {
        ArgDescriptor::Variadic(Box::new(item))
    }

    #[must_use]
    pub fn counted_variadic(item: ArgDescriptor) -> Self {
        ArgDescriptor::CountedVariadic(Box::new(item))
    }

    /// Constructs a fresh placeholder argument of this shape. Optional and
    /// variadic arguments start out empty.
    #[must_use]
    pub fn instantiate(&self) -> Argument {
        match self {
            ArgDescriptor::Single(ty) => Argument::Single(ty.placeholder()),
            ArgDescriptor::Multi(items) => {
                Argument::Multi(MultiValue::new(items.iter().map(Self::instantiate).collect()))
            }
            ArgDescriptor::Optional(inner) => {
                Argument::Optional(OptionalValue::none(inner.as_ref().clone()))
            }
            ArgDescriptor::Variadic(item) => {
                Argument::Variadic(VariadicValues::new(item.as_ref().clone()))
            }
            ArgDescriptor::CountedVariadic(item) => {
                Argument::Counted(CountedVariadicValues::new(item.as_ref().clone()))
            }
        }
    }
}

impl From<TypeDescriptor> for ArgDescriptor {
    fn from(ty: TypeDescriptor) -> Self {
        ArgDescriptor::Single(ty)
    }
}
