//! Model for representing and transcoding smart-contract call arguments
//!
//! # Overview
//!
//! A call to a smart contract carries its arguments as an ordered list of
//! byte-string *parts*, usually rendered as hex strings joined by `@`. Each
//! argument type has a precise binary layout, which moreover differs
//! depending on whether a value is written *nested* (inside an enclosing
//! value, where it has to be self-delimiting) or *top-level* (alone in its
//! own part, where the part boundary already frames it).
//!
//! This library models those layouts without any code generation. The shape
//! of every argument is described at runtime by a [`TypeDescriptor`] (or,
//! for the multi-part forms, an [`ArgDescriptor`]); values are held in the
//! closed [`Value`] type, and transcoded through the [`Codec`] trait.
//! Decoding is schema-driven: a descriptor produces a placeholder value of
//! the right shape, and the placeholder is then populated in place.
//!
//! On top of the single-value codec sit the multi-part argument forms
//! ([`MultiValue`], [`OptionalValue`], [`VariadicValues`],
//! [`CountedVariadicValues`]) which may spread over several parts, the
//! [`PartsHolder`] buffer they are written to and read from, and the
//! [`Serializer`] entry point that runs a whole argument list through them.
//!
//! Finally, the [`native`] module binds the typed values to a small,
//! dynamically typed host data model ([`NativeValue`]), so that callers can
//! supply and receive arguments as plain records, sequences and scalars.
//!
//! # Layout conventions
//!
//! All multi-byte integers are big-endian. Lengths are 4-byte unsigned
//! prefixes. Top-level integers are written in their minimal two's-complement
//! (or unsigned) form, so that zero is an empty part.
//!
//! # Example
//!
//! ```
//! use calico::{ArgDescriptor, Argument, Serializer, TypeDescriptor, Value};
//! use calico::multi::OptionalValue;
//!
//! let s = Serializer::new();
//! let args: Vec<Argument> = vec![Value::u8(0x42).into(), OptionalValue::some(Value::u8(0x43).into()).into()];
//! assert_eq!(s.serialize(&args).unwrap(), "42@43");
//!
//! let mut dest: Vec<_> = [
//!     TypeDescriptor::u8().into(),
//!     ArgDescriptor::optional(TypeDescriptor::u8().into()),
//! ]
//! .iter()
//! .map(ArgDescriptor::instantiate)
//! .collect();
//! s.deserialize("42@43", &mut dest).unwrap();
//! assert_eq!(dest, args);
//! ```

pub mod conv;
pub mod error;
pub mod hexstring;
pub mod multi;
pub mod native;
pub mod parse;
pub mod parts;
pub mod prim;
pub mod schema;
pub mod serializer;
pub mod value;

pub use crate::conv::{target::Target, Codec};
pub use crate::error::{CodecError, CodecResult, ErrorKind, Locator};
pub use crate::hexstring::HexString;
pub use crate::multi::{
    Argument, CountedVariadicValues, MultiValue, OptionalValue, VariadicValues,
};
pub use crate::native::{FromNative, NativeValue, Record, ToNative};
pub use crate::parse::{Parser, SliceParser};
pub use crate::parts::PartsHolder;
pub use crate::schema::{ArgDescriptor, TypeDescriptor};
pub use crate::serializer::{Serializer, SerializerConfig};
pub use crate::value::{Decimal, Value};
