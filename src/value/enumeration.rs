//! Tagged unions
//!
//! [`EnumValue`] is the general sum type: a one-byte discriminant followed by
//! the fields of the selected variant. Which fields follow is determined by
//! the [`EnumDescriptor`], so decoding an enum whose discriminant may change
//! requires one.
//!
//! [`ExplicitEnumValue`] is the by-name variant encoding used for field-less
//! enums whose wire form is the variant name itself.

use crate::conv::{decode_top_level_as_nested, target::Target, Codec};
use crate::error::{CodecError, CodecResult, LengthError};
use crate::parse::Parser;
use crate::prim::{decode_prefixed, encode_prefixed};
use crate::schema::EnumDescriptor;
use crate::value::record::{decode_fields, encode_fields, Field};

/// Discriminant-tagged enum value
#[derive(Clone, Debug)]
pub struct EnumValue {
    discriminant: u8,
    fields: Vec<Field>,
    variants: Option<EnumDescriptor>,
}

impl EnumValue {
    /// Constructs an enum value without a descriptor.
    ///
    /// Such a value can be encoded, but can only be decoded into when the
    /// decoded discriminant matches its current one.
    #[must_use]
    pub fn new(discriminant: u8, fields: Vec<Field>) -> Self {
        Self {
            discriminant,
            fields,
            variants: None,
        }
    }

    /// Field-less variant without a descriptor
    #[must_use]
    pub fn unit(discriminant: u8) -> Self {
        Self::new(discriminant, Vec::new())
    }

    /// Placeholder holding the first declared variant of `variants`, with
    /// placeholder fields.
    #[must_use]
    pub fn placeholder(variants: EnumDescriptor) -> Self {
        let (discriminant, fields) = match variants.variants.first() {
            Some(v) => (v.discriminant, v.placeholder_fields()),
            None => (0, Vec::new()),
        };
        Self {
            discriminant,
            fields,
            variants: Some(variants),
        }
    }

    /// Constructs the variant `discriminant` of `variants`, checking that the
    /// supplied fields match the declared ones by name and count.
    pub fn with_descriptor(
        variants: EnumDescriptor,
        discriminant: u8,
        fields: Vec<Field>,
    ) -> CodecResult<Self> {
        let declared = variants.variant(discriminant)?;
        LengthError::check(declared.fields.len(), fields.len())?;
        for (decl, field) in declared.fields.iter().zip(fields.iter()) {
            if decl.name != field.name {
                return Err(CodecError::MissingField(decl.name.clone()));
            }
        }
        Ok(Self {
            discriminant,
            fields,
            variants: Some(variants),
        })
    }

    #[must_use]
    pub const fn discriminant(&self) -> u8 {
        self.discriminant
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    #[must_use]
    pub fn descriptor(&self) -> Option<&EnumDescriptor> {
        self.variants.as_ref()
    }

    /// Name of the current variant, if known
    #[must_use]
    pub fn variant_name(&self) -> Option<&str> {
        self.variants
            .as_ref()
            .and_then(|d| d.variant(self.discriminant).ok())
            .map(|v| v.name.as_str())
    }

    /// Switches to variant `discriminant`, replacing the fields with
    /// placeholders for that variant.
    ///
    /// Without a descriptor, only the current discriminant is accepted and
    /// the existing fields are kept as placeholders.
    pub fn select(&mut self, discriminant: u8) -> CodecResult<()> {
        match &self.variants {
            Some(variants) => {
                if discriminant != self.discriminant || self.fields.is_empty() {
                    self.fields = variants.variant(discriminant)?.placeholder_fields();
                }
            }
            None if discriminant == self.discriminant => (),
            None => return Err(CodecError::MissingPlaceholder("enum variant")),
        }
        self.discriminant = discriminant;
        Ok(())
    }

    fn is_default_unit(&self) -> bool {
        self.discriminant == 0 && self.fields.is_empty()
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.discriminant == other.discriminant && self.fields == other.fields
    }
}

impl Codec for EnumValue {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_one(self.discriminant) + encode_fields(&self.fields, buf)
    }

    /// Empty for the field-less variant 0, identical to nested otherwise
    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        if self.is_default_unit() {
            0
        } else {
            self.encode_nested(buf)
        }
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        let discriminant = p.consume_byte()?;
        self.select(discriminant)?;
        decode_fields(&mut self.fields, p)
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        if !bytes.is_empty() {
            return decode_top_level_as_nested(self, bytes);
        }
        if let Some(variants) = &self.variants {
            if !variants.variant(0)?.fields.is_empty() {
                return Err(CodecError::UnexpectedEndOfData {
                    offset: 0,
                    requested: 1,
                    available: 0,
                });
            }
        }
        self.discriminant = 0;
        self.fields.clear();
        Ok(())
    }
}

/// Enum encoded by variant name
#[derive(Clone, Debug)]
pub struct ExplicitEnumValue {
    name: String,
    variants: Option<Vec<String>>,
}

impl ExplicitEnumValue {
    /// Constructs a value without a list of known variants
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: None,
        }
    }

    /// Placeholder whose decoded name is checked against `variants`
    #[must_use]
    pub fn placeholder(variants: Vec<String>) -> Self {
        Self {
            name: variants.first().cloned().unwrap_or_default(),
            variants: Some(variants),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the variant name, validating it when the variants are known.
    pub fn set(&mut self, name: String) -> CodecResult<()> {
        if let Some(variants) = &self.variants {
            if !variants.iter().any(|v| *v == name) {
                return Err(CodecError::UnknownVariant(format!("`{}`", name)));
            }
        }
        self.name = name;
        Ok(())
    }
}

impl PartialEq for ExplicitEnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Codec for ExplicitEnumValue {
    fn encode_nested<U: Target>(&self, buf: &mut U) -> usize {
        encode_prefixed(buf, self.name.as_bytes())
    }

    fn encode_top_level<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_all(self.name.as_bytes())
    }

    fn decode_nested<P: Parser>(&mut self, p: &mut P) -> CodecResult<()> {
        self.set(String::from_utf8(decode_prefixed(p)?)?)
    }

    fn decode_top_level(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.set(String::from_utf8(bytes.to_vec())?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::{ErrorKind, Locator};
    use crate::hexstring::hex_of_bytes;
    use crate::schema::{EnumDescriptor, FieldDescriptor, TypeDescriptor, VariantDescriptor};
    use crate::value::int::FixedInt;
    use crate::value::Value;

    fn status() -> EnumDescriptor {
        EnumDescriptor::new(
            "Status",
            vec![
                VariantDescriptor::unit(0, "Idle"),
                VariantDescriptor::new(
                    5,
                    "Busy",
                    vec![
                        FieldDescriptor::new("job", TypeDescriptor::u16()),
                        FieldDescriptor::new("urgent", TypeDescriptor::Bool),
                    ],
                ),
            ],
        )
    }

    fn busy() -> EnumValue {
        EnumValue::with_descriptor(
            status(),
            5,
            vec![
                Field::new("job", Value::Int(FixedInt::u16(0x0102))),
                Field::new("urgent", Value::Bool(true)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn unit_variant_zero_is_empty_at_top_level() {
        assert_eq!(EnumValue::unit(0).to_top_level_bytes(), Vec::<u8>::new());
        assert_eq!(EnumValue::unit(0).to_nested_bytes(), vec![0x00]);
        assert_eq!(EnumValue::unit(3).to_top_level_bytes(), vec![0x03]);
    }

    #[test]
    fn variant_with_fields() {
        let v = busy();
        assert_eq!(hex_of_bytes(&v.to_top_level_bytes()), "05010201");
        assert_eq!(v.to_top_level_bytes(), v.to_nested_bytes());
        assert_eq!(v.variant_name(), Some("Busy"));
    }

    #[test]
    fn decode_switches_variant() {
        let mut out = EnumValue::placeholder(status());
        assert_eq!(out.variant_name(), Some("Idle"));
        out.decode_top_level(&busy().to_top_level_bytes()).unwrap();
        assert_eq!(out, busy());

        out.decode_top_level(&[]).unwrap();
        assert_eq!(out, EnumValue::unit(0));
    }

    #[test]
    fn decode_failures() {
        let mut out = EnumValue::placeholder(status());
        assert_eq!(out.decode_top_level(&[0x07]).unwrap_err().kind(), ErrorKind::UnknownVariant);

        let err = out.decode_top_level(&[0x05, 0x00, 0x01, 0x09]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBooleanEncoding);
        assert_eq!(err.path(), vec![&Locator::Field("urgent".into())]);

        let mut bare = EnumValue::unit(0);
        assert_eq!(bare.decode_top_level(&[0x05]).unwrap_err().kind(), ErrorKind::MissingPlaceholder);
    }

    #[test]
    fn with_descriptor_checks_fields() {
        let err = EnumValue::with_descriptor(status(), 5, vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
        let err = EnumValue::with_descriptor(
            status(),
            5,
            vec![
                Field::new("job", Value::Int(FixedInt::u16(1))),
                Field::new("rush", Value::Bool(true)),
            ],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn explicit_enum_by_name() {
        let v = ExplicitEnumValue::new("Fungible");
        assert_eq!(v.to_top_level_bytes(), b"Fungible".to_vec());
        assert_eq!(&v.to_nested_bytes()[..4], &[0, 0, 0, 8]);

        let mut out = ExplicitEnumValue::placeholder(vec!["Fungible".into(), "NonFungible".into()]);
        out.decode_top_level(b"NonFungible").unwrap();
        assert_eq!(out.name(), "NonFungible");
        assert_eq!(out.decode_top_level(b"Other").unwrap_err().kind(), ErrorKind::UnknownVariant);
    }
}
