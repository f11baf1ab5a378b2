//! Fixed-width naturals, least-significant bit first.

use ubilog_core::{BitBuf, Bits, Nat, U256};

use crate::error::CodecError;
use crate::reader::{decode_with, BitReader};

/// Width of the 256-bit hash and timestamp fields.
pub const U256_WIDTH: usize = 256;

/// Appends exactly `width` bits of `value`, low bit first.
///
/// Bits of `value` at or above `width` are dropped.
pub fn write_fixed(out: &mut BitBuf, width: usize, value: &Nat) {
    for i in 0..width {
        out.push(value.bit(i as u64));
    }
}

/// Appends a field of up to 64 significant bits; wider fields pad with zero.
pub fn write_u64(out: &mut BitBuf, width: usize, value: u64) {
    for i in 0..width {
        out.push(i < 64 && (value >> i) & 1 == 1);
    }
}

pub fn write_u256(out: &mut BitBuf, value: &U256) {
    for i in 0..U256_WIDTH {
        out.push(value.bit(i));
    }
}

pub fn encode_fixed(width: usize, value: &Nat) -> Bits {
    let mut out = BitBuf::with_capacity(width);
    write_fixed(&mut out, width, value);
    out.freeze()
}

/// Consumes exactly `width` bits; `value = Σ bit_i · 2^i`.
pub fn read_fixed(reader: &mut BitReader, width: usize) -> Result<Nat, CodecError> {
    let field = reader.take(width)?;
    // packed layout is already little-endian by bit significance
    Ok(Nat::from_bytes_le(&field.to_packed_bytes()))
}

/// Reads a field of any width, keeping its low 64 bits.
pub fn read_u64(reader: &mut BitReader, width: usize) -> Result<u64, CodecError> {
    let field = reader.take(width)?;
    Ok(field
        .iter()
        .take(64)
        .enumerate()
        .fold(0, |acc, (i, bit)| acc | (u64::from(bit) << i)))
}

pub fn read_u256(reader: &mut BitReader) -> Result<U256, CodecError> {
    let field = reader.take(U256_WIDTH)?;
    Ok(U256::from_little_endian(&field.to_packed_bytes()))
}

pub fn decode_fixed(width: usize, bits: &Bits) -> Result<(Bits, Nat), CodecError> {
    decode_with(bits, |r| read_fixed(r, width))
}
