//! Hash, proof-of-work slice, block body and block codecs.

use ubilog_core::{BitBuf, Bits, Block, BlockBody, Hash, PowSlice};

use crate::error::CodecError;
use crate::list::{read_list, write_list};
use crate::nat::{read_u256, read_u64, write_u256, write_u64, U256_WIDTH};
use crate::reader::{decode_with, BitReader};
use crate::varlen::{read_bitstring, write_bitstring};

pub const HASH_WIDTH: usize = U256_WIDTH;
pub const WORK_WIDTH: usize = 64;
pub const TIME_WIDTH: usize = U256_WIDTH;

pub fn write_hash(out: &mut BitBuf, hash: &Hash) {
    write_u256(out, &hash.to_u256());
}

pub fn encode_hash(hash: &Hash) -> Bits {
    let mut out = BitBuf::with_capacity(HASH_WIDTH);
    write_hash(&mut out, hash);
    out.freeze()
}

pub fn read_hash(reader: &mut BitReader) -> Result<Hash, CodecError> {
    Ok(Hash::from_u256(&read_u256(reader)?))
}

pub fn decode_hash(bits: &Bits) -> Result<(Bits, Hash), CodecError> {
    decode_with(bits, read_hash)
}

pub fn write_pow_slice(out: &mut BitBuf, slice: &PowSlice) -> Result<(), CodecError> {
    write_u64(out, WORK_WIDTH, slice.work);
    write_bitstring(out, &slice.data)
}

pub fn encode_pow_slice(slice: &PowSlice) -> Result<Bits, CodecError> {
    let mut out = BitBuf::new();
    write_pow_slice(&mut out, slice)?;
    Ok(out.freeze())
}

pub fn read_pow_slice(reader: &mut BitReader) -> Result<PowSlice, CodecError> {
    let work = read_u64(reader, WORK_WIDTH)?;
    let data = read_bitstring(reader)?;
    Ok(PowSlice { work, data })
}

pub fn decode_pow_slice(bits: &Bits) -> Result<(Bits, PowSlice), CodecError> {
    decode_with(bits, read_pow_slice)
}

pub fn write_body(out: &mut BitBuf, body: &[Bits]) -> Result<(), CodecError> {
    write_list(out, body, write_bitstring)
}

pub fn encode_body(body: &[Bits]) -> Result<Bits, CodecError> {
    let mut out = BitBuf::new();
    write_body(&mut out, body)?;
    Ok(out.freeze())
}

pub fn read_body(reader: &mut BitReader) -> Result<BlockBody, CodecError> {
    read_list(reader, read_bitstring)
}

pub fn decode_body(bits: &Bits) -> Result<(Bits, BlockBody), CodecError> {
    decode_with(bits, read_body)
}

/// `prev` hash, 256-bit `time`, then the body list.
pub fn write_block(out: &mut BitBuf, block: &Block) -> Result<(), CodecError> {
    write_hash(out, &block.prev);
    write_u256(out, &block.time);
    write_body(out, &block.body)
}

pub fn encode_block(block: &Block) -> Result<Bits, CodecError> {
    let mut out = BitBuf::new();
    write_block(&mut out, block)?;
    Ok(out.freeze())
}

pub fn read_block(reader: &mut BitReader) -> Result<Block, CodecError> {
    let prev = read_hash(reader)?;
    let time = read_u256(reader)?;
    let body = read_body(reader)?;
    Ok(Block { prev, time, body })
}

pub fn decode_block(bits: &Bits) -> Result<(Bits, Block), CodecError> {
    decode_with(bits, read_block)
}
