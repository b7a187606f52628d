//! Ordered buffer of wire parts
//!
//! A contract call carries its arguments as a sequence of byte-string
//! *parts*. [`PartsHolder`] is built up part by part when serializing, and
//! read back through a cursor (the *focused part*) when deserializing.
//!
//! In text form, each part is hex-encoded and the parts are joined by a
//! separator (`@` by default), so that `[[0x42], [], [0x01, 0x02]]` becomes
//! `"42@@0102"`.
//!
//! Setting the `smallvec_parts` feature flag backs the part list by a
//! `SmallVec` that stores short argument lists inline.

use crate::error::{CodecError, CodecResult, Leftover, ResultExt};
use crate::hexstring::{bytes_of_hex, hex_of_bytes};

mod store {
    cfg_if::cfg_if! {
        if #[cfg(feature = "smallvec_parts")] {
            /// Utility alias to allow clean alternation between
            /// different backing stores of [`PartsHolder`](super::PartsHolder)
            pub type Store = smallvec::SmallVec<[Vec<u8>; 4]>;

            pub fn vectorize(store: Store) -> Vec<Vec<u8>> {
                store.into_vec()
            }

            pub fn internalize(parts: Vec<Vec<u8>>) -> Store {
                Store::from_vec(parts)
            }
        } else {
            /// Utility alias to allow clean alternation between
            /// different backing stores of [`PartsHolder`](super::PartsHolder)
            pub type Store = Vec<Vec<u8>>;

            pub fn vectorize(store: Store) -> Vec<Vec<u8>> {
                store
            }

            pub fn internalize(parts: Vec<Vec<u8>>) -> Store {
                parts
            }
        }
    }
}

/// Sequence of byte-string parts with a read cursor
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartsHolder {
    parts: store::Store,
    focused: usize,
}

impl PartsHolder {
    /// Constructs an empty holder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a holder over existing parts, focused on the first one
    #[must_use]
    pub fn from_parts(parts: Vec<Vec<u8>>) -> Self {
        Self {
            parts: store::internalize(parts),
            focused: 0,
        }
    }

    #[must_use]
    pub fn parts(&self) -> &[Vec<u8>] {
        &self.parts
    }

    #[must_use]
    pub fn into_parts(self) -> Vec<Vec<u8>> {
        store::vectorize(self.parts)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Appends a new, empty part, which becomes the last part.
    pub fn append_empty_part(&mut self) {
        self.parts.push(Vec::new());
    }

    /// Returns the last part for writing.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::NoPartToWriteTo`] if there are no parts.
    pub fn last_part_mut(&mut self) -> CodecResult<&mut Vec<u8>> {
        self.parts.last_mut().ok_or(CodecError::NoPartToWriteTo)
    }

    /// Appends `bytes` to the last part.
    pub fn append_to_last_part(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.last_part_mut()?.extend_from_slice(bytes);
        Ok(())
    }

    /// Index of the focused part, equal to [`len`](Self::len) once every part
    /// has been read.
    #[must_use]
    pub const fn focused_index(&self) -> usize {
        self.focused
    }

    #[must_use]
    pub fn is_focused_beyond_last_part(&self) -> bool {
        self.focused >= self.parts.len()
    }

    /// Number of parts from the focused one to the end
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.parts.len().saturating_sub(self.focused)
    }

    fn past_end(&self) -> CodecError {
        CodecError::UnexpectedEndOfData {
            offset: self.focused,
            requested: 1,
            available: 0,
        }
    }

    /// Returns the entire focused part, without moving the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnexpectedEndOfData`] if the cursor is beyond the
    /// last part; `offset` is then the part index rather than a byte offset.
    pub fn read_whole_focused_part(&self) -> CodecResult<&[u8]> {
        match self.parts.get(self.focused) {
            Some(part) => Ok(part.as_slice()),
            None => Err(self.past_end()),
        }
    }

    /// Moves the cursor to the next part.
    pub fn focus_on_next_part(&mut self) -> CodecResult<()> {
        if self.is_focused_beyond_last_part() {
            return Err(self.past_end());
        }
        self.focused += 1;
        Ok(())
    }

    /// Fails with [`CodecError::UnconsumedData`] unless every part has been read.
    pub fn ensure_exhausted(&self) -> CodecResult<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::UnconsumedData(Leftover::Parts(n))),
        }
    }

    /// Hex-encodes every part and joins them with `separator`.
    #[must_use]
    pub fn encode_to_text(&self, separator: &str) -> String {
        self.parts
            .iter()
            .map(|part| hex_of_bytes(part))
            .collect::<Vec<String>>()
            .join(separator)
    }

    /// Splits `text` on `separator` and hex-decodes each piece into a part.
    ///
    /// An empty string holds a single empty part.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidHex`] for a piece that is not valid hex,
    /// wrapped with the index of that piece.
    pub fn decode_from_text(text: &str, separator: &str) -> CodecResult<Self> {
        let mut parts = Vec::new();
        for (ix, piece) in text.split(separator).enumerate() {
            let part = bytes_of_hex(piece).map_err(CodecError::from);
            parts.push(part.at_index(ix)?);
        }
        Ok(Self::from_parts(parts))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn build_parts() {
        let mut holder = PartsHolder::new();
        assert_eq!(holder.append_to_last_part(&[1]).unwrap_err().kind(), ErrorKind::NoPartToWriteTo);
        holder.append_empty_part();
        holder.append_to_last_part(&[0x42]).unwrap();
        holder.append_empty_part();
        holder.append_empty_part();
        holder.append_to_last_part(&[0x01]).unwrap();
        holder.append_to_last_part(&[0x02]).unwrap();
        assert_eq!(holder.encode_to_text("@"), "42@@0102");
        assert_eq!(holder.len(), 3);
    }

    #[test]
    fn cursor_walks_parts() {
        let mut holder = PartsHolder::from_parts(vec![vec![1], vec![]]);
        assert_eq!(holder.read_whole_focused_part().unwrap(), &[1]);
        holder.focus_on_next_part().unwrap();
        assert_eq!(holder.read_whole_focused_part().unwrap(), &[] as &[u8]);
        assert!(matches!(holder.ensure_exhausted(), Err(CodecError::UnconsumedData(Leftover::Parts(1)))));
        holder.focus_on_next_part().unwrap();
        assert!(holder.is_focused_beyond_last_part());
        holder.ensure_exhausted().unwrap();
        assert_eq!(
            holder.read_whole_focused_part().unwrap_err().kind(),
            ErrorKind::UnexpectedEndOfData
        );
        assert_eq!(holder.focus_on_next_part().unwrap_err().kind(), ErrorKind::UnexpectedEndOfData);
    }

    #[test]
    fn text_framing() {
        let holder = PartsHolder::decode_from_text("2A@@0102", "@").unwrap();
        assert_eq!(holder.parts(), &[vec![0x2a], vec![], vec![0x01, 0x02]]);
        assert_eq!(holder.encode_to_text("@"), "2a@@0102");

        let empty = PartsHolder::decode_from_text("", "@").unwrap();
        assert_eq!(empty.parts(), &[Vec::<u8>::new()]);

        let custom = PartsHolder::decode_from_text("01|02", "|").unwrap();
        assert_eq!(custom.into_parts(), vec![vec![1], vec![2]]);

        let err = PartsHolder::decode_from_text("01@0g", "@").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHex);
        assert_eq!(err.path(), vec![&crate::error::Locator::Index(1)]);

        let err = PartsHolder::decode_from_text("+1@+a", "@").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHex);
        assert_eq!(err.path(), vec![&crate::error::Locator::Index(0)]);
    }
}
