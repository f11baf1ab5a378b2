//! Byte framing for crossing byte-oriented boundaries.
//!
//! A frame is a 2-byte little-endian bit count followed by the bits packed
//! eight per byte, bit 0 of each group in the least significant position.
//! This is exactly the packed form of a length-prefixed bit string.

use tracing::{debug, trace};
use ubilog_core::{Bits, Message};

use crate::error::CodecError;
use crate::message::{decode_message, encode_message};
use crate::varlen::encode_bitstring;

/// Bytes taken by the bit-count header.
pub const FRAME_HEADER_LEN: usize = 2;

/// Packs bits into `ceil(len / 8)` bytes with no header.
pub fn pack_bits(bits: &Bits) -> Vec<u8> {
    bits.to_packed_bytes()
}

/// Frames `bits`; fails with `LengthExceeded` at 65536 bits or more.
pub fn encode_frame(bits: &Bits) -> Result<Vec<u8>, CodecError> {
    let prefixed = encode_bitstring(bits)?;
    Ok(pack_bits(&prefixed))
}

/// Recovers the framed bits.
///
/// Missing header or payload bytes read as zero, so this never fails;
/// bytes past the declared count are ignored.
pub fn decode_frame(bytes: &[u8]) -> Bits {
    let lo = bytes.first().copied().unwrap_or(0);
    let hi = bytes.get(1).copied().unwrap_or(0);
    let count = usize::from(u16::from_le_bytes([lo, hi]));
    let needed = count.div_ceil(8);
    let mut payload = bytes.get(FRAME_HEADER_LEN..).unwrap_or_default().to_vec();
    if payload.len() < needed {
        debug!(
            declared_bits = count,
            payload_bytes = payload.len(),
            "frame shorter than its header, zero-filling"
        );
        payload.resize(needed, 0);
    }
    payload.truncate(needed);
    Bits::from_packed(payload, count)
}

pub fn encode_message_frame(message: &Message) -> Result<Vec<u8>, CodecError> {
    let frame = encode_frame(&encode_message(message)?)?;
    trace!(kind = message.kind(), bytes = frame.len(), "framed message");
    Ok(frame)
}

/// Decodes one message from a frame; unconsumed trailing bits are ignored.
pub fn decode_message_frame(bytes: &[u8]) -> Result<Message, CodecError> {
    let (_rest, message) = decode_message(&decode_frame(bytes))?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::{
        decode_frame, decode_message_frame, encode_frame, encode_message_frame, pack_bits,
    };
    use crate::error::CodecError;
    use ubilog_core::{Address, BitBuf, Bits, Message};

    fn bits(text: &str) -> Bits {
        text.parse().expect("valid bit text")
    }

    #[test]
    fn header_is_little_endian_bit_count() {
        let frame = encode_frame(&bits("1010000011")).expect("frames");
        assert_eq!(frame, vec![10, 0, 0x05, 0x03]);
    }

    #[test]
    fn empty_frame_is_header_only() {
        assert_eq!(encode_frame(&Bits::empty()).expect("frames"), vec![0, 0]);
        assert!(decode_frame(&[0, 0]).is_empty());
        assert!(decode_frame(&[]).is_empty());
    }

    #[test]
    fn frame_round_trip() {
        let original = bits("110100111010110001");
        let decoded = decode_frame(&encode_frame(&original).expect("frames"));
        assert_eq!(decoded, original);
    }

    #[test]
    fn missing_bytes_read_as_zero() {
        let decoded = decode_frame(&[12, 0, 0xff]);
        assert_eq!(decoded, bits("111111110000"));
    }

    #[test]
    fn extra_bytes_are_ignored() {
        let decoded = decode_frame(&[3, 0, 0xff, 0xff, 0xff]);
        assert_eq!(decoded, bits("111"));
    }

    #[test]
    fn frames_carry_no_trailing_padding() {
        let original = bits("110100111010110001");
        let mut frame = encode_frame(&original).expect("frames");
        assert_eq!(frame.len(), 2 + original.len().div_ceil(8));
        // zero-padded frames as written by older peers decode the same
        frame.extend_from_slice(&[0, 0]);
        assert_eq!(decode_frame(&frame), original);
    }

    #[test]
    fn oversized_frame_is_rejected() {
        let mut big = BitBuf::new();
        for _ in 0..65536 {
            big.push(false);
        }
        assert_eq!(
            encode_frame(&big.freeze()).expect_err("too many bits"),
            CodecError::LengthExceeded { len: 65536 }
        );
    }

    #[test]
    fn raw_packing_has_no_header() {
        assert_eq!(pack_bits(&bits("00000001")), vec![0x80]);
    }

    #[test]
    fn message_frame_round_trip() {
        let message = Message::PutPeers(vec![Address::ipv4([127, 0, 0, 1], 42001)]);
        let frame = encode_message_frame(&message).expect("frames");
        // 4 tag bits + 1 + 49 address bits + 1 terminator
        assert_eq!(frame[..2], [55, 0]);
        assert_eq!(decode_message_frame(&frame).expect("decodes"), message);
    }
}
