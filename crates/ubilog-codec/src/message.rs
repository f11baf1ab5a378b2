//! Tagged peer-to-peer messages.
//!
//! A 4-bit tag (read as a fixed-width natural) precedes the payload:
//!
//! | wire bits | value | message    |
//! |-----------|-------|------------|
//! | `0000`    | 0     | `PutPeers` |
//! | `1000`    | 1     | `PutBlock` |
//! | `0100`    | 2     | `AskBlock` |
//! | `1100`    | 3     | `PutSlice` |
//!
//! The two high bits are reserved and always zero; the other twelve tag
//! values are free for future message kinds.

use tracing::{debug, trace};
use ubilog_core::{BitBuf, Bits, Message};

use crate::address::{read_address, write_address};
use crate::error::CodecError;
use crate::list::{read_list, write_list};
use crate::nat::{read_u64, write_u64};
use crate::reader::{decode_with, BitReader};
use crate::record::{
    read_block, read_hash, read_pow_slice, write_block, write_hash, write_pow_slice,
};

pub const MESSAGE_TAG_WIDTH: usize = 4;

/// Wire tag of each message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageTag {
    PutPeers = 0,
    PutBlock = 1,
    AskBlock = 2,
    PutSlice = 3,
}

impl MessageTag {
    pub fn of(message: &Message) -> Self {
        match message {
            Message::PutPeers(_) => Self::PutPeers,
            Message::PutBlock(_) => Self::PutBlock,
            Message::AskBlock(_) => Self::AskBlock,
            Message::PutSlice(_) => Self::PutSlice,
        }
    }

    /// Maps the full 4-bit tag value, reserved bits included.
    pub fn from_wire(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(Self::PutPeers),
            1 => Ok(Self::PutBlock),
            2 => Ok(Self::AskBlock),
            3 => Ok(Self::PutSlice),
            other => Err(CodecError::UnknownMessageTag(other)),
        }
    }

    pub fn wire_value(self) -> u8 {
        self as u8
    }
}

pub fn write_message(out: &mut BitBuf, message: &Message) -> Result<(), CodecError> {
    let tag = MessageTag::of(message);
    write_u64(out, MESSAGE_TAG_WIDTH, u64::from(tag.wire_value()));
    match message {
        Message::PutPeers(peers) => write_list(out, peers, write_address),
        Message::PutBlock(block) => write_block(out, block),
        Message::AskBlock(hash) => {
            write_hash(out, hash);
            Ok(())
        }
        Message::PutSlice(slice) => write_pow_slice(out, slice),
    }
}

pub fn encode_message(message: &Message) -> Result<Bits, CodecError> {
    let mut out = BitBuf::new();
    write_message(&mut out, message)?;
    trace!(kind = message.kind(), bits = out.len(), "encoded message");
    Ok(out.freeze())
}

pub fn read_message(reader: &mut BitReader) -> Result<Message, CodecError> {
    let raw = read_u64(reader, MESSAGE_TAG_WIDTH)? as u8;
    let tag = MessageTag::from_wire(raw).inspect_err(|_| {
        debug!(tag = raw, "dropping message with unknown tag");
    })?;
    trace!(?tag, remaining = reader.remaining_len(), "decoding message");
    let message = match tag {
        MessageTag::PutPeers => Message::PutPeers(read_list(reader, read_address)?),
        MessageTag::PutBlock => Message::PutBlock(read_block(reader)?),
        MessageTag::AskBlock => Message::AskBlock(read_hash(reader)?),
        MessageTag::PutSlice => Message::PutSlice(read_pow_slice(reader)?),
    };
    Ok(message)
}

pub fn decode_message(bits: &Bits) -> Result<(Bits, Message), CodecError> {
    decode_with(bits, read_message)
}
