//! Length-prefixed bit strings and fixed-count byte arrays.

use ubilog_core::{BitBuf, Bits};

use crate::error::CodecError;
use crate::nat::{read_u64, write_u64};
use crate::reader::{decode_with, BitReader};

/// Width of the bit-string length prefix.
pub const LENGTH_PREFIX_WIDTH: usize = 16;
/// Longest bit string the prefix can describe.
pub const MAX_BITSTRING_LEN: usize = (1 << LENGTH_PREFIX_WIDTH) - 1;

/// Appends `len(data)` as a 16-bit field, then `data`.
pub fn write_bitstring(out: &mut BitBuf, data: &Bits) -> Result<(), CodecError> {
    let len = data.len();
    if len > MAX_BITSTRING_LEN {
        return Err(CodecError::LengthExceeded { len });
    }
    write_u64(out, LENGTH_PREFIX_WIDTH, len as u64);
    out.extend_from_bits(data);
    Ok(())
}

pub fn encode_bitstring(data: &Bits) -> Result<Bits, CodecError> {
    let mut out = BitBuf::with_capacity(LENGTH_PREFIX_WIDTH + data.len());
    write_bitstring(&mut out, data)?;
    Ok(out.freeze())
}

pub fn read_bitstring(reader: &mut BitReader) -> Result<Bits, CodecError> {
    let len = read_u64(reader, LENGTH_PREFIX_WIDTH)? as usize;
    reader.take(len)
}

pub fn decode_bitstring(bits: &Bits) -> Result<(Bits, Bits), CodecError> {
    decode_with(bits, read_bitstring)
}

/// Appends exactly `n` octets as 8-bit fields.
///
/// The count is not written; the reader must know it. Octets missing
/// from `bytes` are written as zero and extra octets are ignored.
pub fn write_bytes(out: &mut BitBuf, n: usize, bytes: &[u8]) {
    for i in 0..n {
        let byte = bytes.get(i).copied().unwrap_or(0);
        write_u64(out, 8, u64::from(byte));
    }
}

pub fn encode_bytes(n: usize, bytes: &[u8]) -> Bits {
    let mut out = BitBuf::with_capacity(n.min(bytes.len()).saturating_mul(8));
    write_bytes(&mut out, n, bytes);
    out.freeze()
}

pub fn read_bytes(reader: &mut BitReader, n: usize) -> Result<Vec<u8>, CodecError> {
    reader.ensure(n.saturating_mul(8))?;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(read_u64(reader, 8)? as u8);
    }
    Ok(out)
}

pub fn decode_bytes(n: usize, bits: &Bits) -> Result<(Bits, Vec<u8>), CodecError> {
    decode_with(bits, |r| read_bytes(r, n))
}
