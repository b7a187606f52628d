/// Byte-oriented sink with infallible incremental append operations
///
/// `Target` plays the role of [`std::io::Write`] for encoders in this crate,
/// except that every `push_*` method is total: the returned `usize` is the
/// number of bytes appended, used by callers for book-keeping only, and is
/// never a signal of partial success.
pub trait Target {
    /// Hints that at least `extra` more bytes are about to be appended.
    ///
    /// May be a no-op. Implementors with a notion of capacity should reserve
    /// accordingly; further calls and further pushes may follow.
    fn anticipate(&mut self, extra: usize);

    /// Appends a single byte. Always returns `1`.
    fn push_one(&mut self, b: u8) -> usize;

    /// Appends the bytes of a fixed-size array. Always returns `N`.
    ///
    /// Must be observably identical to calling `push_one` on each element in order.
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize;

    /// Appends every byte of a slice. Always returns `buf.len()`.
    ///
    /// Must be observably identical to calling `push_one` on each element in order.
    fn push_all(&mut self, buf: &[u8]) -> usize;
}

/// Alias for `std::io::Sink` used to count the number of bytes an encoding
/// would produce, without writing anything.
pub type ByteCounter = std::io::Sink;

impl Target for ByteCounter {
    #[inline(always)]
    fn anticipate(&mut self, _: usize) {}

    #[inline(always)]
    fn push_one(&mut self, _: u8) -> usize {
        1
    }

    #[inline(always)]
    fn push_many<const N: usize>(&mut self, _: [u8; N]) -> usize {
        N
    }

    #[inline(always)]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        buf.len()
    }
}

impl Target for Vec<u8> {
    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.reserve(extra)
    }

    #[inline]
    fn push_one(&mut self, b: u8) -> usize {
        self.push(b);
        1
    }

    #[inline]
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize {
        self.extend_from_slice(&arr);
        N
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counter_matches_vec() {
        let mut v: Vec<u8> = Vec::new();
        let mut c: ByteCounter = std::io::sink();
        let n = v.push_one(1) + v.push_many([2, 3]) + v.push_all(&[4, 5, 6]);
        let m = c.push_one(1) + c.push_many([2, 3]) + c.push_all(&[4, 5, 6]);
        assert_eq!(n, 6);
        assert_eq!(n, m);
        assert_eq!(v, vec![1, 2, 3, 4, 5, 6]);
    }
}
