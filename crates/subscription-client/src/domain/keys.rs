//! # Identity Keys
//!
//! Fixed-length public identifiers and derived account addresses.
//!
//! A [`Pubkey`] identifies a party (provider, subscriber, program); an
//! [`Address`] locates a program-owned account. Both are opaque 32-byte
//! values with byte-for-byte equality; the hex text form exists only for
//! configuration and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length in bytes of every identifier and derived address.
pub const KEY_LEN: usize = 32;

/// Failure to parse a fixed-length identifier from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    /// Input decoded to the wrong number of bytes.
    #[error("identifier must be {KEY_LEN} bytes, got {0}")]
    WrongLength(usize),

    /// Input was not valid hex.
    #[error("identifier is not valid hex: {0}")]
    InvalidHex(String),
}

/// An opaque 32-byte public identifier.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pubkey([u8; KEY_LEN]);

/// Identifies a data provider.
pub type ProviderId = Pubkey;

/// Identifies a subscriber.
pub type SubscriberId = Pubkey;

/// Identifies the deployed program (supplied by configuration, never derived).
pub type ProgramId = Pubkey;

impl Pubkey {
    /// Wrap raw key bytes.
    pub const fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw key bytes.
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl From<[u8; KEY_LEN]> for Pubkey {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Pubkey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s).map(Self)
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", hex::encode(self.0))
    }
}

/// A deterministically derived account address.
///
/// Addresses are recomputed from their inputs on every use; they are never
/// persisted and have no lifecycle of their own.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address([u8; KEY_LEN]);

impl Address {
    /// Wrap raw address bytes.
    pub const fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw address bytes.
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl From<[u8; KEY_LEN]> for Address {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed(s).map(Self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(self.0))
    }
}

fn parse_fixed(s: &str) -> Result<[u8; KEY_LEN], KeyParseError> {
    let bytes = hex::decode(s).map_err(|e| KeyParseError::InvalidHex(e.to_string()))?;
    let len = bytes.len();
    <[u8; KEY_LEN]>::try_from(bytes).map_err(|_| KeyParseError::WrongLength(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pubkey_roundtrip() {
        let key = Pubkey::new([7u8; KEY_LEN]);
        let parsed: Pubkey = key.to_string().parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_pubkey_rejects_short_input() {
        let err = "abcd".parse::<Pubkey>().unwrap_err();
        assert_eq!(err, KeyParseError::WrongLength(2));
    }

    #[test]
    fn test_pubkey_rejects_non_hex() {
        let err = "zz".repeat(KEY_LEN).parse::<Pubkey>().unwrap_err();
        assert!(matches!(err, KeyParseError::InvalidHex(_)));
    }

    #[test]
    fn test_address_roundtrip() {
        let addr = Address::new([9u8; KEY_LEN]);
        let parsed: Address = addr.to_string().parse().unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn test_byte_equality_defines_identity() {
        assert_eq!(Pubkey::new([1u8; KEY_LEN]), Pubkey::new([1u8; KEY_LEN]));
        assert_ne!(Pubkey::new([1u8; KEY_LEN]), Pubkey::new([2u8; KEY_LEN]));
    }
}
