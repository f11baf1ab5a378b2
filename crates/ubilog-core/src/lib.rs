//! Core ubilog primitives shared across crates.
//!
//! Includes the packed bit sequence, the block hash type, wire-level domain
//! values, and base errors.

pub mod bits;
pub mod error;
pub mod hash;
pub mod types;

pub use bits::{BitBuf, Bits};
pub use error::CoreError;
pub use ethereum_types::U256;
pub use hash::Hash;
pub use num_bigint::BigUint;
pub use types::{Address, Block, BlockBody, Message, Nat, PowSlice, DEFAULT_NET_PORT};
