//! # Typed Transitions
//!
//! The four state-transition requests the program accepts, with exhaustive
//! per-call account and argument structs. A transition that is missing a
//! binding, or that carries one the program does not expect, is
//! unrepresentable.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::SubscriptionError;
use super::keys::{Address, ProviderId, Pubkey, SubscriberId};

/// Lowest accepted quality score.
pub const MIN_QUALITY_SCORE: u8 = 0;

/// Highest accepted quality score.
pub const MAX_QUALITY_SCORE: u8 = 100;

/// Opaque identifier of a submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionId(pub String);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to the token account proving the caller holds the membership
/// credential required to subscribe, renew, or cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityProof(pub Address);

/// A provider quality score, validated into `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScore(u8);

impl QualityScore {
    /// The raw score value.
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for QualityScore {
    type Error = SubscriptionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > MAX_QUALITY_SCORE {
            return Err(SubscriptionError::QualityOutOfRange);
        }
        Ok(Self(value))
    }
}

/// Accounts bound to a `subscribe` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeAccounts {
    /// The subscriber signing and paying for the call.
    pub subscriber: SubscriberId,
    /// The provider being subscribed to.
    pub provider: ProviderId,
    /// Global state account.
    pub state: Address,
    /// Provider quality record.
    pub quality: Address,
    /// The subscription record to create.
    pub subscription: Address,
    /// Provider subscriber roster.
    pub subscribers_list: Address,
    /// Current global owner, read from the state account.
    pub owner: Pubkey,
    /// Membership credential token account.
    pub nft_token: EligibilityProof,
}

/// Arguments for a `subscribe` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeArgs {
    /// Delivery endpoint for the subscribed data.
    pub recipient: String,
    /// Unix second the subscription ends.
    pub end_time: i64,
}

/// Accounts bound to a `renewSubscription` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewAccounts {
    /// The subscriber signing and paying for the call.
    pub subscriber: SubscriberId,
    /// The provider whose subscription is renewed.
    pub provider: ProviderId,
    /// Global state account.
    pub state: Address,
    /// Provider quality record (initialized beforehand if absent).
    pub quality: Address,
    /// The subscription record to advance.
    pub subscription: Address,
    /// Provider subscriber roster.
    pub subscribers_list: Address,
    /// Current global owner, read from the state account.
    pub owner: Pubkey,
    /// Membership credential token account.
    pub nft_token: EligibilityProof,
}

/// Arguments for a `renewSubscription` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewArgs {
    /// Replacement delivery endpoint.
    pub new_recipient: String,
    /// New end time, Unix seconds.
    pub new_end_time: i64,
    /// Score assigned to the provider for the elapsed period.
    pub quality_score: QualityScore,
}

/// Accounts bound to a `cancelSubscription` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelAccounts {
    /// The subscriber signing and paying for the call.
    pub subscriber: SubscriberId,
    /// The provider whose subscription is cancelled.
    pub provider: ProviderId,
    /// The subscription record to remove.
    pub subscription: Address,
    /// Provider quality record.
    pub quality: Address,
    /// Membership credential token account, if required by the program.
    pub nft_token: Option<EligibilityProof>,
}

/// Arguments for a `cancelSubscription` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelArgs {
    /// Final score assigned to the provider.
    pub quality_score: QualityScore,
}

/// Accounts bound to an `initializeQualityInfo` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeQualityAccounts {
    /// The subscriber signing and paying for the call.
    pub payer: SubscriberId,
    /// The provider to create the quality record for.
    pub provider: ProviderId,
    /// The quality record address.
    pub quality: Address,
}

/// A fully bound state-transition request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Create a subscription for a (subscriber, provider) pair.
    Subscribe {
        /// Account bindings.
        accounts: SubscribeAccounts,
        /// Call arguments.
        args: SubscribeArgs,
    },
    /// Advance an existing subscription's end time.
    RenewSubscription {
        /// Account bindings.
        accounts: RenewAccounts,
        /// Call arguments.
        args: RenewArgs,
    },
    /// Remove an existing subscription.
    CancelSubscription {
        /// Account bindings.
        accounts: CancelAccounts,
        /// Call arguments.
        args: CancelArgs,
    },
    /// Create the provider's quality record if it does not exist yet.
    InitializeQualityInfo {
        /// Account bindings.
        accounts: InitializeQualityAccounts,
    },
}

impl Transition {
    /// The transition name as the program's schema spells it.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Transition::Subscribe { .. } => "subscribe",
            Transition::RenewSubscription { .. } => "renewSubscription",
            Transition::CancelSubscription { .. } => "cancelSubscription",
            Transition::InitializeQualityInfo { .. } => "initializeQualityInfo",
        }
    }
}
