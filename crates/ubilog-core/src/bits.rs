use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::CoreError;

/// Immutable bit sequence backed by a shared packed buffer.
///
/// Bit `i` of the underlying buffer lives in byte `i / 8` under mask
/// `1 << (i % 8)`. A `Bits` value is an `(offset, length)` window into that
/// buffer, so cloning and slicing never copy bit data.
#[derive(Clone, Default)]
pub struct Bits {
    buf: Bytes,
    start: usize,
    len: usize,
}

impl Bits {
    /// The empty sequence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single-bit sequence.
    pub fn from_bit(bit: bool) -> Self {
        let mut out = BitBuf::with_capacity(1);
        out.push(bit);
        out.freeze()
    }

    /// Wraps `len` bits of an LSB-first packed buffer.
    ///
    /// `len` is clamped to the number of bits the buffer holds.
    pub fn from_packed(bytes: impl Into<Bytes>, len: usize) -> Self {
        let buf = bytes.into();
        let len = len.min(buf.len().saturating_mul(8));
        Self { buf, start: 0, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns bit `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.len).then(|| self.bit_at(index))
    }

    fn bit_at(&self, index: usize) -> bool {
        let pos = self.start + index;
        (self.buf[pos / 8] >> (pos % 8)) & 1 == 1
    }

    /// Sub-view over `range`, clamped to the sequence bounds.
    pub fn slice(&self, range: Range<usize>) -> Self {
        let end = range.end.min(self.len);
        let start = range.start.min(end);
        Self {
            buf: self.buf.clone(),
            start: self.start + start,
            len: end - start,
        }
    }

    /// Splits into `[0, at)` and `[at, len)`; `None` when `at > len`.
    pub fn split_at(&self, at: usize) -> Option<(Self, Self)> {
        if at > self.len {
            return None;
        }
        Some((self.slice(0..at), self.slice(at..self.len)))
    }

    /// Returns `self ++ other` in a fresh buffer.
    pub fn concat(&self, other: &Bits) -> Self {
        let mut out = BitBuf::with_capacity(self.len + other.len);
        out.extend_from_bits(self);
        out.extend_from_bits(other);
        out.freeze()
    }

    pub fn push_front(&self, bit: bool) -> Self {
        Self::from_bit(bit).concat(self)
    }

    pub fn push_back(&self, bit: bool) -> Self {
        let mut out = BitBuf::with_capacity(self.len + 1);
        out.extend_from_bits(self);
        out.push(bit);
        out.freeze()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bit_at(i))
    }

    /// Packs into `ceil(len / 8)` bytes, LSB first, trailing bits zero.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        if self.start % 8 == 0 {
            let first = self.start / 8;
            let mut out = self.buf[first..first + self.len.div_ceil(8)].to_vec();
            let tail = self.len % 8;
            if let (Some(last), true) = (out.last_mut(), tail != 0) {
                *last &= (1_u8 << tail) - 1;
            }
            return out;
        }
        let mut out = BitBuf::with_capacity(self.len);
        out.extend_from_bits(self);
        out.into_packed_bytes()
    }
}

impl PartialEq for Bits {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for Bits {}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits(\"{self}\")")
    }
}

impl FromStr for Bits {
    type Err = CoreError;

    /// Parses a text of `0`/`1` characters, leftmost character first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = BitBuf::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => out.push(false),
                '1' => out.push(true),
                _ => return Err(CoreError::InvalidInput("bit text must contain only 0 and 1")),
            }
        }
        Ok(out.freeze())
    }
}

impl From<BitBuf> for Bits {
    fn from(buf: BitBuf) -> Self {
        buf.freeze()
    }
}

/// Append-only builder for [`Bits`].
#[derive(Debug, Clone, Default)]
pub struct BitBuf {
    bytes: Vec<u8>,
    len: usize,
}

impl BitBuf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 1 << offset;
            }
        }
        self.len += 1;
    }

    pub fn extend_from_bits(&mut self, bits: &Bits) {
        self.bytes.reserve(bits.len().div_ceil(8));
        for bit in bits.iter() {
            self.push(bit);
        }
    }

    pub fn freeze(self) -> Bits {
        let len = self.len;
        Bits::from_packed(self.bytes, len)
    }

    fn into_packed_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
