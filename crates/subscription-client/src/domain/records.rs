//! # Account Records
//!
//! Read-side views of the accounts the program owns. The program is the
//! authority over these records; this crate only observes them.

use serde::{Deserialize, Serialize};

use super::keys::{Address, ProviderId, Pubkey, SubscriberId};
use super::status::SubscriptionStatus;

/// The global program state account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Current global owner; mutating transitions must name this identity.
    pub owner: Pubkey,
}

/// A provider's quality aggregate, created lazily on first renewal.
///
/// Exactly one quality record exists per provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityRecord {
    /// The provider being scored.
    pub provider: ProviderId,
    /// Latest aggregate score, within `0..=100`.
    pub quality_score: u8,
}

/// One live subscription between a subscriber and a provider.
///
/// The program guarantees at most one live record per pair: created by
/// `subscribe`, advanced in place by `renewSubscription`, removed by
/// `cancelSubscription`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// The subscriber who owns this record.
    pub owner: SubscriberId,
    /// Delivery endpoint for the subscribed data.
    pub recipient: String,
    /// Unix second after which the subscription no longer grants access.
    pub end_time: i64,
}

/// A provider's subscriber roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribersList {
    /// The provider the roster belongs to.
    pub provider: ProviderId,
    /// All subscribers that ever subscribed to this provider.
    pub subscribers: Vec<SubscriberId>,
}

/// A subscription record joined with its derived address and computed status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionView {
    /// Where the record lives.
    pub address: Address,
    /// Delivery endpoint.
    pub recipient: String,
    /// Unix second the subscription ends.
    pub end_time: i64,
    /// Status at the time of the query.
    pub status: SubscriptionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keys::KEY_LEN;

    #[test]
    fn test_subscription_record_serde_roundtrip() {
        let record = SubscriptionRecord {
            owner: Pubkey::new([3u8; KEY_LEN]),
            recipient: "https://feeds.example/ingest".to_string(),
            end_time: 1_700_000_000,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: SubscriptionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let view = SubscriptionView {
            address: Address::new([1u8; KEY_LEN]),
            recipient: "r".to_string(),
            end_time: 0,
            status: SubscriptionStatus::ExpiringSoon,
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("expiring_soon"));
    }
}
