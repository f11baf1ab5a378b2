use ubilog_core::Bits;

use crate::error::CodecError;

/// Left-to-right cursor over a bit sequence.
#[derive(Debug, Clone)]
pub struct BitReader {
    bits: Bits,
    pos: usize,
}

impl BitReader {
    pub fn new(bits: &Bits) -> Self {
        Self {
            bits: bits.clone(),
            pos: 0,
        }
    }

    /// Bits not yet consumed.
    pub fn remaining_len(&self) -> usize {
        self.bits.len() - self.pos
    }

    /// Fails with `MalformedStream` unless `needed` bits remain.
    pub fn ensure(&self, needed: usize) -> Result<(), CodecError> {
        let available = self.remaining_len();
        if available < needed {
            return Err(CodecError::MalformedStream { needed, available });
        }
        Ok(())
    }

    pub fn read_bit(&mut self) -> Result<bool, CodecError> {
        match self.bits.get(self.pos) {
            Some(bit) => {
                self.pos += 1;
                Ok(bit)
            }
            None => Err(CodecError::MalformedStream {
                needed: 1,
                available: 0,
            }),
        }
    }

    /// Consumes the next `n` bits as a shared view.
    pub fn take(&mut self, n: usize) -> Result<Bits, CodecError> {
        self.ensure(n)?;
        let out = self.bits.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(out)
    }

    /// The unconsumed tail.
    pub fn into_remaining(self) -> Bits {
        self.bits.slice(self.pos..self.bits.len())
    }
}

/// Runs `read` over `bits`, returning `(remaining, value)`.
pub fn decode_with<T, F>(bits: &Bits, read: F) -> Result<(Bits, T), CodecError>
where
    F: FnOnce(&mut BitReader) -> Result<T, CodecError>,
{
    let mut reader = BitReader::new(bits);
    let value = read(&mut reader)?;
    Ok((reader.into_remaining(), value))
}
