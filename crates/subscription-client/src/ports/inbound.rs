//! # Inbound Ports
//!
//! The API this crate offers to applications: the four lifecycle transitions
//! plus the read-side queries.

use async_trait::async_trait;

use crate::domain::{
    EligibilityProof, ProviderId, SubscriberId, SubscriptionError, SubscriptionStatus,
    SubscriptionView, TransactionId,
};

/// Subscription lifecycle API - inbound port.
///
/// Mutating calls require a connected signing identity and are single-flight:
/// no client-side locking is performed, and concurrent calls on the same
/// (subscriber, provider) pair are arbitrated by the program alone.
#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    /// Create a subscription to `provider` ending `duration_days` from now.
    async fn create(
        &self,
        provider: ProviderId,
        recipient: &str,
        duration_days: u64,
        proof: EligibilityProof,
    ) -> Result<TransactionId, SubscriptionError>;

    /// Advance an existing subscription to `new_end_time`, scoring the
    /// provider for the elapsed period.
    ///
    /// Initializes the provider's quality record first if it does not exist
    /// yet. The initialization is idempotent: a renew interrupted between the
    /// two steps can simply be called again.
    async fn renew(
        &self,
        provider: ProviderId,
        new_recipient: &str,
        new_end_time: i64,
        quality_score: u8,
        proof: EligibilityProof,
    ) -> Result<TransactionId, SubscriptionError>;

    /// Cancel an existing subscription, scoring the provider one last time.
    async fn cancel(
        &self,
        provider: ProviderId,
        quality_score: u8,
        proof: Option<EligibilityProof>,
    ) -> Result<TransactionId, SubscriptionError>;

    /// Classify an end time against the injected clock.
    fn status_of(&self, end_time: i64) -> SubscriptionStatus;

    /// Every subscriber on the provider's roster. A provider with no roster
    /// account has no subscribers, which is an empty list, not an error.
    async fn subscribers_of(
        &self,
        provider: ProviderId,
    ) -> Result<Vec<SubscriberId>, SubscriptionError>;

    /// Count the provider's subscriptions whose end time is in the future.
    ///
    /// Subscribers whose record cannot be fetched are counted as not
    /// currently subscribed rather than failing the whole count.
    async fn count_active_subscriptions(
        &self,
        provider: ProviderId,
    ) -> Result<usize, SubscriptionError>;

    /// All unexpired subscriptions owned by `subscriber`, each with its
    /// computed status.
    async fn subscriptions_for(
        &self,
        subscriber: SubscriberId,
    ) -> Result<Vec<SubscriptionView>, SubscriptionError>;
}
