//! # Derived Addresses
//!
//! Deterministic derivation of the four program-owned account addresses from
//! the program id, a namespace tag, and the (provider, subscriber) key pair.
//!
//! The derivation is pure and collision-resistant across distinct
//! `(tag, keys)` tuples; the same inputs always yield the same address.
//! Addresses are derived fresh for every operation rather than cached.

use sha2::{Digest, Sha256};

use super::keys::{Address, ProgramId, ProviderId, SubscriberId, KEY_LEN};

/// Namespace tags matching the on-chain program's account seeds.
pub mod seeds {
    /// Global program state (single instance).
    pub const STORAGE: &[u8] = b"storage";
    /// Per-provider quality aggregate.
    pub const QUALITY: &[u8] = b"quality";
    /// Per-(subscriber, provider) subscription record.
    pub const SUBSCRIPTION: &[u8] = b"subscription";
    /// Per-provider subscriber roster.
    pub const SUBSCRIBERS: &[u8] = b"subscribers";
}

/// The four account addresses every lifecycle operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivedAddresses {
    /// Global program state account.
    pub state: Address,
    /// The provider's quality record.
    pub quality: Address,
    /// The (subscriber, provider) subscription record.
    pub subscription: Address,
    /// The provider's subscriber roster.
    pub subscribers_list: Address,
}

/// Derive an address by hashing seeds with the program id.
fn derive(program_id: &ProgramId, parts: &[&[u8]]) -> Address {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(b"ProgramDerivedAddress");
    let digest = hasher.finalize();
    let mut out = [0u8; KEY_LEN];
    out.copy_from_slice(&digest);
    Address::new(out)
}

/// Derive the global state address.
pub fn state_address(program_id: &ProgramId) -> Address {
    derive(program_id, &[seeds::STORAGE])
}

/// Derive a provider's quality record address.
pub fn quality_address(program_id: &ProgramId, provider: &ProviderId) -> Address {
    derive(program_id, &[seeds::QUALITY, provider.as_bytes()])
}

/// Derive the subscription record address for a (subscriber, provider) pair.
pub fn subscription_address(
    program_id: &ProgramId,
    subscriber: &SubscriberId,
    provider: &ProviderId,
) -> Address {
    derive(
        program_id,
        &[seeds::SUBSCRIPTION, subscriber.as_bytes(), provider.as_bytes()],
    )
}

/// Derive a provider's subscriber roster address.
pub fn subscribers_list_address(program_id: &ProgramId, provider: &ProviderId) -> Address {
    derive(program_id, &[seeds::SUBSCRIBERS, provider.as_bytes()])
}

/// Derive all four addresses for one (provider, subscriber) pair.
pub fn derive_all(
    program_id: &ProgramId,
    provider: &ProviderId,
    subscriber: &SubscriberId,
) -> DerivedAddresses {
    DerivedAddresses {
        state: state_address(program_id),
        quality: quality_address(program_id, provider),
        subscription: subscription_address(program_id, subscriber, provider),
        subscribers_list: subscribers_list_address(program_id, provider),
    }
}
