//! Contract-call argument serialization
//!
//! [`Serializer`] is the entry point that turns a whole argument list into
//! wire parts (and text), and populates a list of placeholder arguments from
//! them. Each [`Argument`] expands into its parts as described in
//! [`crate::multi`]; ordering constraints are checked before any part is
//! produced or consumed.

use tracing::debug;

use crate::error::{CodecError, CodecResult, Locator, ResultExt};
use crate::multi::{check_ordering, Argument};
use crate::parts::PartsHolder;

/// Default separator between hex-encoded parts
pub const DEFAULT_SEPARATOR: &str = "@";

/// Runtime configuration of a [`Serializer`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializerConfig {
    /// String placed between hex-encoded parts
    ///
    /// Must be non-empty and free of hex digits, so that it can never occur
    /// inside an encoded part.
    pub separator: String,
}

impl SerializerConfig {
    /// Checks that the separator can be told apart from part contents.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidSeparator`] for an empty separator or one
    /// containing a hex digit.
    pub fn validate(&self) -> CodecResult<()> {
        let sep = &self.separator;
        if sep.is_empty() || sep.chars().any(|c| c.is_ascii_hexdigit()) {
            debug!(separator = %sep, "rejected part separator");
            return Err(CodecError::InvalidSeparator(sep.clone()));
        }
        Ok(())
    }
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_owned(),
        }
    }
}

/// Converts argument lists to and from parts and their text framing
#[derive(Clone, Debug, Default)]
pub struct Serializer {
    config: SerializerConfig,
}

impl Serializer {
    /// Serializer using `@` as separator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializer joining parts with `separator`.
    ///
    /// # Errors
    ///
    /// See [`SerializerConfig::validate`].
    pub fn with_separator(separator: impl Into<String>) -> CodecResult<Self> {
        Self::with_config(SerializerConfig {
            separator: separator.into(),
        })
    }

    pub fn with_config(config: SerializerConfig) -> CodecResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Serializes `args` into hex-encoded parts joined by the separator.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::OrderingViolation`](crate::error::CodecError::OrderingViolation)
    /// if an optional or variadic argument is not in trailing position.
    pub fn serialize(&self, args: &[Argument]) -> CodecResult<String> {
        let holder = self.encode_holder(args)?;
        Ok(holder.encode_to_text(&self.config.separator))
    }

    /// Serializes `args` into raw wire parts.
    pub fn serialize_to_parts(&self, args: &[Argument]) -> CodecResult<Vec<Vec<u8>>> {
        Ok(self.encode_holder(args)?.into_parts())
    }

    fn encode_holder(&self, args: &[Argument]) -> CodecResult<PartsHolder> {
        check_ordering(args)?;
        let mut holder = PartsHolder::new();
        for (ix, arg) in args.iter().enumerate() {
            arg.encode_parts(&mut holder).at(Locator::Argument(ix))?;
        }
        debug!(args = args.len(), parts = holder.len(), "serialized arguments");
        Ok(holder)
    }

    /// Populates the placeholder arguments `dest` from `text`.
    ///
    /// # Errors
    ///
    /// Besides the errors of the individual values, fails with
    /// [`CodecError::InvalidHex`](crate::error::CodecError::InvalidHex) on
    /// malformed text and with
    /// [`CodecError::UnconsumedData`](crate::error::CodecError::UnconsumedData)
    /// if parts remain once every argument has been decoded.
    pub fn deserialize(&self, text: &str, dest: &mut [Argument]) -> CodecResult<()> {
        let holder = PartsHolder::decode_from_text(text, &self.config.separator)?;
        self.decode_holder(holder, dest)
    }

    /// Populates the placeholder arguments `dest` from raw wire parts.
    pub fn deserialize_parts(&self, parts: Vec<Vec<u8>>, dest: &mut [Argument]) -> CodecResult<()> {
        self.decode_holder(PartsHolder::from_parts(parts), dest)
    }

    fn decode_holder(&self, mut holder: PartsHolder, dest: &mut [Argument]) -> CodecResult<()> {
        check_ordering(dest)?;
        for (ix, arg) in dest.iter_mut().enumerate() {
            arg.decode_parts(&mut holder).at(Locator::Argument(ix))?;
        }
        if let Err(err) = holder.ensure_exhausted() {
            debug!(parts = holder.len(), remaining = holder.remaining(), "unconsumed parts");
            return Err(err);
        }
        debug!(args = dest.len(), parts = holder.len(), "deserialized arguments");
        Ok(())
    }
}
