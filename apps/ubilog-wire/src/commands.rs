use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use ubilog_codec::frame::{decode_message_frame, encode_message_frame};
use ubilog_codec::message::{decode_message, encode_message};
use ubilog_core::{Address, Bits, Block, Hash, Message, PowSlice, U256};

use crate::config::WireConfig;

/// Message shapes the `encode` command can build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageRequest {
    /// Empty list means "use the configured peers".
    Peers(Vec<String>),
    AskBlock(Hash),
    PutBlock {
        prev: Hash,
        time: U256,
        slices: Vec<Bits>,
    },
    PutSlice {
        work: u64,
        data: Bits,
    },
}

pub fn build_message(request: &MessageRequest, cfg: &WireConfig) -> Result<Message> {
    let message = match request {
        MessageRequest::Peers(peers) if peers.is_empty() => {
            let addresses = cfg
                .peer_addresses()
                .context("configured peers are invalid")?;
            info!(count = addresses.len(), "using configured peers");
            Message::PutPeers(addresses)
        }
        MessageRequest::Peers(peers) => {
            let addresses = peers
                .iter()
                .map(|peer| Address::parse_with_default_port(peer, cfg.net_port))
                .collect::<Result<Vec<_>, _>>()
                .context("peer argument is invalid")?;
            Message::PutPeers(addresses)
        }
        MessageRequest::AskBlock(hash) => Message::AskBlock(*hash),
        MessageRequest::PutBlock { prev, time, slices } => Message::PutBlock(Block {
            prev: *prev,
            time: *time,
            body: slices.clone(),
        }),
        MessageRequest::PutSlice { work, data } => Message::PutSlice(PowSlice {
            work: *work,
            data: data.clone(),
        }),
    };
    Ok(message)
}

/// Hex frame by default, raw bit text with `as_bits`.
pub fn render_encoded(message: &Message, as_bits: bool) -> Result<String> {
    if as_bits {
        let bits = encode_message(message)
            .with_context(|| format!("failed to encode {}", message.kind()))?;
        return Ok(bits.to_string());
    }
    let frame = encode_message_frame(message)
        .with_context(|| format!("failed to frame {}", message.kind()))?;
    Ok(hex::encode(frame))
}

/// Accepts a hex frame, or raw bit text with `as_bits`.
pub fn decode_input(input: &str, as_bits: bool) -> Result<Message> {
    let input = input.trim();
    if as_bits {
        let bits: Bits = input.parse().context("input is not bit text")?;
        let (rest, message) = decode_message(&bits).context("failed to decode message")?;
        if !rest.is_empty() {
            debug!(trailing = rest.len(), "ignoring trailing bits");
        }
        return Ok(message);
    }
    let digits = input.strip_prefix("0x").unwrap_or(input);
    let frame = hex::decode(digits).context("input is not hex")?;
    if frame.is_empty() {
        bail!("input frame is empty");
    }
    decode_message_frame(&frame).context("failed to decode message frame")
}

pub fn describe(message: &Message) -> String {
    match message {
        Message::PutPeers(peers) => {
            let mut out = format!("PutPeers ({} peers)\n", peers.len());
            for peer in peers {
                out.push_str(&format!("  {peer}\n"));
            }
            out
        }
        Message::PutBlock(block) => {
            let mut out = format!(
                "PutBlock prev={} time={} slices={}\n",
                block.prev,
                block.time,
                block.body.len()
            );
            for (i, slice) in block.body.iter().enumerate() {
                out.push_str(&format!("  slice[{i}] {} bits: {slice}\n", slice.len()));
            }
            out
        }
        Message::AskBlock(hash) => format!("AskBlock {hash}\n"),
        Message::PutSlice(slice) => format!(
            "PutSlice work={} data={} bits: {}\n",
            slice.work,
            slice.data.len(),
            slice.data
        ),
    }
}

pub fn parse_u256(text: &str) -> Result<U256, String> {
    match text.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16).map_err(|e| format!("{e:?}")),
        None => U256::from_dec_str(text).map_err(|e| format!("{e:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> WireConfig {
        WireConfig {
            net_port: 16936,
            peers: vec!["127.0.0.1:42001".to_string(), "127.0.0.2".to_string()],
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn empty_peer_list_falls_back_to_config() {
        let message = build_message(&MessageRequest::Peers(Vec::new()), &cfg()).expect("builds");
        assert_eq!(
            message,
            Message::PutPeers(vec![
                Address::ipv4([127, 0, 0, 1], 42001),
                Address::ipv4([127, 0, 0, 2], 16936),
            ])
        );
    }

    #[test]
    fn explicit_peers_use_net_port_default() {
        let request = MessageRequest::Peers(vec!["10.0.0.1".to_string()]);
        let message = build_message(&request, &cfg()).expect("builds");
        assert_eq!(
            message,
            Message::PutPeers(vec![Address::ipv4([10, 0, 0, 1], 16936)])
        );
        let bad = MessageRequest::Peers(vec!["nope".to_string()]);
        assert!(build_message(&bad, &cfg()).is_err());
    }

    #[test]
    fn hex_output_round_trips_through_decode() {
        let message = Message::AskBlock(Hash::from_hex("0x1234").expect("valid hash"));
        let hex = render_encoded(&message, false).expect("renders");
        assert!(hex.starts_with("0401"));
        assert_eq!(decode_input(&hex, false).expect("decodes"), message);
        assert_eq!(
            decode_input(&format!("0x{hex}"), false).expect("decodes"),
            message
        );
    }

    #[test]
    fn bit_output_round_trips_through_decode() {
        let message = Message::PutSlice(PowSlice {
            work: 5,
            data: "101".parse().expect("bits"),
        });
        let text = render_encoded(&message, true).expect("renders");
        assert!(text.starts_with("1100"));
        assert_eq!(decode_input(&text, true).expect("decodes"), message);
    }

    #[test]
    fn decode_reports_bad_input() {
        assert!(decode_input("zz", false).is_err());
        assert!(decode_input("", false).is_err());
        assert!(decode_input("0111", true).is_err());
        assert!(decode_input("01x", true).is_err());
    }

    #[test]
    fn describe_lists_block_slices() {
        let message = Message::PutBlock(Block {
            prev: Hash::ZERO,
            time: U256::from(9_u64),
            body: vec!["11".parse().expect("bits")],
        });
        let text = describe(&message);
        assert!(text.starts_with("PutBlock prev=0x0000"));
        assert!(text.contains("time=9 slices=1"));
        assert!(text.contains("slice[0] 2 bits: 11"));
    }

    #[test]
    fn describe_renders_one_line_per_peer() {
        let message = Message::PutPeers(vec![
            Address::ipv4([127, 0, 0, 1], 42001),
            Address::ipv4([10, 0, 0, 2], 80),
        ]);
        assert_eq!(
            describe(&message),
            "PutPeers (2 peers)\n  127.0.0.1:42001\n  10.0.0.2:80\n"
        );
        assert_eq!(
            describe(&Message::PutSlice(PowSlice {
                work: 3,
                data: "10".parse().expect("bits"),
            })),
            "PutSlice work=3 data=2 bits: 10\n"
        );
    }

    #[test]
    fn u256_parser_accepts_decimal_and_hex() {
        assert_eq!(parse_u256("1000"), Ok(U256::from(1000_u64)));
        assert_eq!(parse_u256("0xff"), Ok(U256::from(255_u64)));
        assert!(parse_u256("ten").is_err());
    }
}
