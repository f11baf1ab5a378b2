use std::fmt;
use std::str::FromStr;

use ethereum_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Number of hex digits in the canonical hash text form.
pub const HASH_HEX_DIGITS: usize = 64;

/// 256-bit block hash, stored big-endian.
///
/// The canonical text form is `0x` followed by 64 lowercase hex digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    pub const ZERO: Hash = Hash([0_u8; 32]);

    /// Validating constructor from hex text.
    ///
    /// Accepts an optional `0x` prefix and 1 to 64 hex digits; shorter
    /// inputs are zero-padded on the left.
    pub fn from_hex(text: &str) -> Result<Self, CoreError> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        if digits.is_empty() {
            return Err(CoreError::InvalidInput("hash must not be empty"));
        }
        if digits.len() > HASH_HEX_DIGITS {
            return Err(CoreError::InvalidInput(
                "hash must be at most 64 hex digits",
            ));
        }
        let padded = format!("{digits:0>width$}", width = HASH_HEX_DIGITS);
        let mut bytes = [0_u8; 32];
        hex::decode_to_slice(padded, &mut bytes)
            .map_err(|_| CoreError::InvalidInput("hash must be hex"))?;
        Ok(Self(bytes))
    }

    /// Canonical `0x`-prefixed, zero-padded lowercase text.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Big-integer interpretation of the hash.
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }

    pub fn from_u256(value: &U256) -> Self {
        let mut bytes = [0_u8; 32];
        value.to_big_endian(&mut bytes);
        Self(bytes)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Hash {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}
