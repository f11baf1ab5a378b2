//! Ubilog bit-level wire codec.
//!
//! Fixed-width naturals, length-prefixed bit strings and self-terminating
//! lists compose into codecs for hashes, blocks, peer addresses and the
//! peer-to-peer message set. Every decoder consumes bits left to right and
//! hands back the unconsumed remainder.

pub mod address;
pub mod error;
pub mod frame;
pub mod list;
pub mod message;
pub mod nat;
pub mod reader;
pub mod record;
pub mod varlen;

pub use address::{decode_address, encode_address};
pub use error::CodecError;
pub use frame::{decode_frame, decode_message_frame, encode_frame, encode_message_frame};
pub use message::{decode_message, encode_message, MessageTag};
pub use nat::{decode_fixed, encode_fixed};
pub use reader::BitReader;
pub use record::{decode_block, decode_hash, encode_block, encode_hash};
pub use varlen::{decode_bitstring, decode_bytes, encode_bitstring, encode_bytes};
