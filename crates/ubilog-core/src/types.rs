use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

use ethereum_types::U256;
use num_bigint::BigUint;

use crate::bits::Bits;
use crate::error::CoreError;
use crate::hash::Hash;

/// Arbitrary-precision natural carried by fixed-width wire fields.
///
/// Fields known to be 256 bits wide (`Hash`, `Block::time`) use [`U256`].
pub type Nat = BigUint;

/// Default node port, used for peers configured without one.
pub const DEFAULT_NET_PORT: u16 = 16936;

/// Payload chunk paired with its proof-of-work value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowSlice {
    /// Work counter / difficulty, 64 bits.
    pub work: u64,
    /// Payload bits, shorter than 65536.
    pub data: Bits,
}

/// Ordered payload slices of a block.
pub type BlockBody = Vec<Bits>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Hash of the previous block.
    pub prev: Hash,
    /// Timestamp, 256 bits.
    pub time: U256,
    pub body: BlockBody,
}

/// Peer network address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    Ipv4 { octets: [u8; 4], port: u16 },
    /// Declared for the tag space only; the wire codec rejects it.
    Ipv6 { segments: [u16; 8], port: u16 },
}

impl Address {
    pub fn ipv4(octets: [u8; 4], port: u16) -> Self {
        Self::Ipv4 { octets, port }
    }

    pub fn port(&self) -> u16 {
        match self {
            Self::Ipv4 { port, .. } | Self::Ipv6 { port, .. } => *port,
        }
    }

    /// Parses `a.b.c.d[:port]`, falling back to `default_port`.
    pub fn parse_with_default_port(text: &str, default_port: u16) -> Result<Self, CoreError> {
        let text = text.trim();
        let (host, port) = match text.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| CoreError::InvalidInput("peer port must be 0..=65535"))?;
                (host, port)
            }
            None => (text, default_port),
        };
        let ip = host
            .parse::<Ipv4Addr>()
            .map_err(|_| CoreError::InvalidInput("peer host must be an IPv4 address"))?;
        Ok(Self::ipv4(ip.octets(), port))
    }
}

impl From<SocketAddrV4> for Address {
    fn from(addr: SocketAddrV4) -> Self {
        Self::ipv4(addr.ip().octets(), addr.port())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4 { octets, port } => write!(f, "{}:{port}", Ipv4Addr::from(*octets)),
            Self::Ipv6 { segments, port } => {
                write!(f, "[{}]:{port}", std::net::Ipv6Addr::from(*segments))
            }
        }
    }
}

/// Peer-to-peer protocol message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    PutPeers(Vec<Address>),
    PutBlock(Block),
    AskBlock(Hash),
    PutSlice(PowSlice),
}

impl Message {
    /// Short variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PutPeers(_) => "PutPeers",
            Self::PutBlock(_) => "PutBlock",
            Self::AskBlock(_) => "AskBlock",
            Self::PutSlice(_) => "PutSlice",
        }
    }
}
