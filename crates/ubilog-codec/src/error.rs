use thiserror::Error;

/// Errors returned by bit-level encode/decode operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Bit string too long for its 16-bit length prefix.
    #[error("length exceeded: {len} bits do not fit a 16-bit length field")]
    LengthExceeded { len: usize },
    /// Address tag not recognized, or an address family with no wire form.
    #[error("unsupported address family")]
    UnsupportedAddressFamily,
    /// 4-bit message tag outside the known table.
    #[error("unknown message tag {0}")]
    UnknownMessageTag(u8),
    /// Input ran out before a fixed-width or length-prefixed read completed.
    #[error("malformed stream: needed {needed} bits, {available} available")]
    MalformedStream { needed: usize, available: usize },
}
