#![no_main]

use libfuzzer_sys::fuzz_target;
use ubilog_codec::address::decode_address;
use ubilog_codec::frame::decode_message_frame;
use ubilog_codec::message::decode_message;
use ubilog_codec::record::{decode_block, decode_pow_slice};
use ubilog_core::Bits;

fuzz_target!(|data: &[u8]| {
    let _ = decode_message_frame(data);

    let raw = Bits::from_packed(data.to_vec(), data.len() * 8);
    let _ = decode_message(&raw);
    let _ = decode_block(&raw);
    let _ = decode_pow_slice(&raw);
    let _ = decode_address(&raw);
});
