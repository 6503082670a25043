//! # Subscription Client
//!
//! Client-side adapter for the on-chain data subscription program.
//!
//! The program owns all subscription state; this crate derives the addresses
//! of the accounts holding that state, assembles and submits the lifecycle
//! transitions (`subscribe`, `renewSubscription`, `cancelSubscription`,
//! `initializeQualityInfo`), translates the program's numeric error codes
//! into a stable taxonomy, and classifies records into
//! active / expiring-soon / expired against an injected clock.
//!
//! ## Module Structure
//!
//! ```text
//! subscription-client/
//! ├── domain/         # Keys, address derivation, status, records,
//! │                   # typed transitions, error taxonomy
//! ├── ports/          # SubscriptionApi (inbound) + ProgramClient,
//! │                   # SigningIdentity, Clock (outbound, with mocks)
//! ├── application/    # SubscriptionService orchestrating everything
//! ├── adapters/       # SystemClock
//! └── config.rs       # ClientConfig (program id + membership mint)
//! ```
//!
//! ## Guarantees
//!
//! | Concern | Behavior |
//! |---------|----------|
//! | Address derivation | Deterministic, recomputed per call, never cached |
//! | Renew pre-step | Quality record initialized iff truly absent; idempotent |
//! | Partial reads | Unreadable per-subscriber records skipped, not fatal |
//! | Missing roster | Treated as an empty subscriber list |
//! | Retries | None; retry policy belongs to the caller |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::SystemClock;
pub use application::SubscriptionService;
pub use config::{ClientConfig, ConfigError, MEMBERSHIP_MINT_VAR, PROGRAM_ID_VAR};
pub use domain::{
    classify, derive_all, Address, ClientError, DerivedAddresses, EligibilityProof,
    KeyParseError, ProgramId, ProviderId, Pubkey, QualityRecord, QualityScore, StateRecord,
    SubscriberId, SubscribersList, SubscriptionError, SubscriptionRecord, SubscriptionStatus,
    SubscriptionView, TransactionId, Transition, EXPIRING_SOON_WINDOW_SECS, KEY_LEN,
    MAX_QUALITY_SCORE, MIN_QUALITY_SCORE, SECONDS_PER_DAY,
};
pub use ports::{
    Clock, FixedClock, MockIdentity, MockProgramClient, ProgramClient, SigningIdentity,
    SubscriptionApi,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
