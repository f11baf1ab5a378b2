//! Self-terminating lists.
//!
//! Each element is preceded by a `1` bit and the list ends with a `0` bit,
//! which is the unrolled form of `Nil = 0`, `Cons = 1 ++ head ++ tail`.
//! Both directions loop, so list length never grows the call stack.

use ubilog_core::{BitBuf, Bits};

use crate::error::CodecError;
use crate::reader::{decode_with, BitReader};

pub fn write_list<T, F>(out: &mut BitBuf, items: &[T], mut write_elem: F) -> Result<(), CodecError>
where
    F: FnMut(&mut BitBuf, &T) -> Result<(), CodecError>,
{
    for item in items {
        out.push(true);
        write_elem(out, item)?;
    }
    out.push(false);
    Ok(())
}

pub fn encode_list<T, F>(items: &[T], write_elem: F) -> Result<Bits, CodecError>
where
    F: FnMut(&mut BitBuf, &T) -> Result<(), CodecError>,
{
    let mut out = BitBuf::new();
    write_list(&mut out, items, write_elem)?;
    Ok(out.freeze())
}

pub fn read_list<T, F>(reader: &mut BitReader, mut read_elem: F) -> Result<Vec<T>, CodecError>
where
    F: FnMut(&mut BitReader) -> Result<T, CodecError>,
{
    let mut items = Vec::new();
    while reader.read_bit()? {
        items.push(read_elem(reader)?);
    }
    Ok(items)
}

pub fn decode_list<T, F>(bits: &Bits, read_elem: F) -> Result<(Bits, Vec<T>), CodecError>
where
    F: FnMut(&mut BitReader) -> Result<T, CodecError>,
{
    decode_with(bits, |r| read_list(r, read_elem))
}
