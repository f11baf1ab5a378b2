use tracing::debug;
use ubilog_core::{Address, BitBuf, Bits};

use crate::error::CodecError;
use crate::nat::{read_u64, write_u64};
use crate::reader::{decode_with, BitReader};
use crate::varlen::write_bytes;

/// Tag bit selecting the IPv4 layout. A `1` tag is reserved for IPv6.
pub const IPV4_TAG: bool = false;
pub const PORT_WIDTH: usize = 16;
/// Tag, four octets, port.
pub const IPV4_ADDRESS_BITS: usize = 1 + 4 * 8 + PORT_WIDTH;

pub fn write_address(out: &mut BitBuf, address: &Address) -> Result<(), CodecError> {
    match address {
        Address::Ipv4 { octets, port } => {
            out.push(IPV4_TAG);
            write_bytes(out, octets.len(), octets);
            write_u64(out, PORT_WIDTH, u64::from(*port));
            Ok(())
        }
        Address::Ipv6 { .. } => {
            debug!(%address, "refusing to encode address without a wire form");
            Err(CodecError::UnsupportedAddressFamily)
        }
    }
}

pub fn encode_address(address: &Address) -> Result<Bits, CodecError> {
    let mut out = BitBuf::with_capacity(IPV4_ADDRESS_BITS);
    write_address(&mut out, address)?;
    Ok(out.freeze())
}

pub fn read_address(reader: &mut BitReader) -> Result<Address, CodecError> {
    if reader.read_bit()? != IPV4_TAG {
        debug!("address tag is not IPv4");
        return Err(CodecError::UnsupportedAddressFamily);
    }
    reader.ensure(IPV4_ADDRESS_BITS - 1)?;
    let mut octets = [0_u8; 4];
    for octet in &mut octets {
        *octet = read_u64(reader, 8)? as u8;
    }
    let port = read_u64(reader, PORT_WIDTH)? as u16;
    Ok(Address::Ipv4 { octets, port })
}

pub fn decode_address(bits: &Bits) -> Result<(Bits, Address), CodecError> {
    decode_with(bits, read_address)
}

#[cfg(test)]
mod tests {
    use super::{decode_address, encode_address, IPV4_ADDRESS_BITS};
    use crate::error::CodecError;
    use ubilog_core::{Address, Bits};

    fn bits(text: &str) -> Bits {
        text.parse().expect("valid bit text")
    }

    #[test]
    fn localhost_round_trip() {
        let addr = Address::ipv4([127, 0, 0, 1], 42001);
        let encoded = encode_address(&addr).expect("ipv4 encodes");
        assert_eq!(encoded.len(), IPV4_ADDRESS_BITS);
        assert_eq!(encoded.get(0), Some(false));
        let (rest, decoded) = decode_address(&encoded).expect("decodes");
        assert!(rest.is_empty());
        assert_eq!(decoded, addr);
    }

    #[test]
    fn layout_is_tag_octets_port() {
        let encoded = encode_address(&Address::ipv4([1, 2, 3, 128], 1)).expect("encodes");
        assert_eq!(
            encoded,
            bits(concat!(
                "0",
                "10000000",
                "01000000",
                "11000000",
                "00000001",
                "1000000000000000"
            ))
        );
    }

    #[test]
    fn ipv6_is_not_encodable() {
        let addr = Address::Ipv6 {
            segments: [0, 0, 0, 0, 0, 0, 0, 1],
            port: 42001,
        };
        assert_eq!(
            encode_address(&addr).expect_err("no ipv6 wire form"),
            CodecError::UnsupportedAddressFamily
        );
    }

    #[test]
    fn reserved_tag_is_rejected() {
        let mut encoded = encode_address(&Address::ipv4([10, 0, 0, 1], 80)).expect("encodes");
        encoded = encoded.slice(1..encoded.len()).push_front(true);
        assert_eq!(
            decode_address(&encoded).expect_err("tag 1"),
            CodecError::UnsupportedAddressFamily
        );
    }

    #[test]
    fn truncated_address_is_malformed() {
        let err = decode_address(&bits("0101")).expect_err("short");
        assert_eq!(
            err,
            CodecError::MalformedStream {
                needed: 48,
                available: 3
            }
        );
        assert!(decode_address(&Bits::empty()).is_err());
    }
}
