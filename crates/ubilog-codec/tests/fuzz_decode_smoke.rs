use std::panic;

use ubilog_codec::address::decode_address;
use ubilog_codec::frame::{decode_frame, decode_message_frame, encode_message_frame};
use ubilog_codec::message::decode_message;
use ubilog_codec::record::decode_block;
use ubilog_core::{Address, Bits, Block, Hash, Message, U256};

fn xorshift64(state: &mut u64) -> u64 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    *state
}

fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut s = seed.max(1);
    let mut out = vec![0_u8; len];
    for b in &mut out {
        *b = (xorshift64(&mut s) & 0xFF) as u8;
    }
    out
}

fn sample_messages() -> Vec<Message> {
    vec![
        Message::PutPeers(vec![
            Address::ipv4([127, 0, 0, 1], 42001),
            Address::ipv4([10, 1, 2, 3], 16936),
        ]),
        Message::PutBlock(Block {
            prev: Hash([0x5A_u8; 32]),
            time: U256::from(1_700_000_000_u64),
            body: vec!["10110".parse().expect("bits"), Bits::empty()],
        }),
        Message::AskBlock(Hash([0xC3_u8; 32])),
    ]
}

#[test]
fn fuzz_like_random_inputs_do_not_panic_decoders() {
    for i in 0..2000_u64 {
        let len = ((i as usize) * 73) % 512;
        let data = random_bytes(0xBAD5EED ^ i, len);

        let framed = panic::catch_unwind(|| decode_message_frame(&data));
        assert!(framed.is_ok(), "decode_message_frame panicked at case {i}");

        let raw = Bits::from_packed(data.clone(), len * 8);
        let message = panic::catch_unwind(|| decode_message(&raw));
        assert!(message.is_ok(), "decode_message panicked at case {i}");

        let block = panic::catch_unwind(|| decode_block(&raw));
        assert!(block.is_ok(), "decode_block panicked at case {i}");

        let address = panic::catch_unwind(|| decode_address(&raw));
        assert!(address.is_ok(), "decode_address panicked at case {i}");
    }
}

#[test]
fn fuzz_like_mutations_of_valid_frames_do_not_panic() {
    for message in sample_messages() {
        let mut frame = encode_message_frame(&message).expect("message should frame");
        for i in 0..512_usize {
            let idx = i % frame.len();
            frame[idx] ^= (i as u8).wrapping_mul(31).wrapping_add(1);
            let data = frame.clone();

            let decoded = panic::catch_unwind(|| decode_message_frame(&data));
            assert!(
                decoded.is_ok(),
                "decode_message_frame panicked for mutated {} at case {i}",
                message.kind()
            );
        }
    }
}

#[test]
fn truncated_frames_fail_without_panicking() {
    for message in sample_messages() {
        let frame = encode_message_frame(&message).expect("message should frame");
        for cut in 0..frame.len() {
            let bits = decode_frame(&frame[..cut]);
            let result = panic::catch_unwind(|| decode_message(&bits));
            assert!(result.is_ok(), "decode panicked at cut {cut}");
        }
    }
}
