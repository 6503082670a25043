//! # Subscription Service
//!
//! Application service orchestrating the subscription lifecycle against the
//! injected program client, signing identity, and clock. Holds no state of
//! its own: every address is re-derived per call and the remote program is
//! the sole arbiter of record existence.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::domain::{
    classify, derive_all, pda, Address, CancelAccounts, CancelArgs, ClientError,
    EligibilityProof, InitializeQualityAccounts, ProviderId, QualityScore, RenewAccounts,
    RenewArgs, SubscribeAccounts, SubscribeArgs, SubscriberId, SubscriptionError,
    SubscriptionStatus, SubscriptionView, TransactionId, Transition, SECONDS_PER_DAY,
};
use crate::ports::{Clock, ProgramClient, SigningIdentity, SubscriptionApi};

/// Subscription Service - orchestrates lifecycle transitions and queries.
pub struct SubscriptionService<C: ProgramClient> {
    config: ClientConfig,
    client: Arc<C>,
    identity: Arc<dyn SigningIdentity>,
    clock: Arc<dyn Clock>,
}

impl<C: ProgramClient> SubscriptionService<C> {
    /// Create a service over its collaborators.
    pub fn new(
        config: ClientConfig,
        client: Arc<C>,
        identity: Arc<dyn SigningIdentity>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            client,
            identity,
            clock,
        }
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn require_identity(&self) -> Result<SubscriberId, SubscriptionError> {
        self.identity
            .public_id()
            .ok_or(SubscriptionError::IdentityNotConnected)
    }

    /// Create the provider's quality record.
    ///
    /// Idempotent from the caller's perspective: if the submission is
    /// rejected but the record turns out to exist (created concurrently
    /// between our read and the submission), the rejection is the documented
    /// already-initialized case and counts as success.
    async fn initialize_quality(
        &self,
        payer: SubscriberId,
        provider: ProviderId,
        quality: Address,
    ) -> Result<(), SubscriptionError> {
        let transition = Transition::InitializeQualityInfo {
            accounts: InitializeQualityAccounts {
                payer,
                provider,
                quality,
            },
        };
        tracing::info!(provider = %provider, "initializing quality record");
        match self.client.submit(transition).await {
            Ok(_) => Ok(()),
            Err(err) => {
                if self.client.fetch_quality(quality).await.is_ok() {
                    tracing::debug!(provider = %provider, "quality record already initialized");
                    Ok(())
                } else {
                    Err(err.into())
                }
            }
        }
    }
}

#[async_trait]
impl<C: ProgramClient + 'static> SubscriptionApi for SubscriptionService<C> {
    async fn create(
        &self,
        provider: ProviderId,
        recipient: &str,
        duration_days: u64,
        proof: EligibilityProof,
    ) -> Result<TransactionId, SubscriptionError> {
        let subscriber = self.require_identity()?;
        let addrs = derive_all(&self.config.program_id, &provider, &subscriber);
        let state = self.client.fetch_state(addrs.state).await?;
        let end_time = self.clock.unix_now() + duration_days as i64 * SECONDS_PER_DAY;

        let transition = Transition::Subscribe {
            accounts: SubscribeAccounts {
                subscriber,
                provider,
                state: addrs.state,
                quality: addrs.quality,
                subscription: addrs.subscription,
                subscribers_list: addrs.subscribers_list,
                owner: state.owner,
                nft_token: proof,
            },
            args: SubscribeArgs {
                recipient: recipient.to_string(),
                end_time,
            },
        };
        tracing::info!(provider = %provider, end_time, "submitting subscribe");
        let tx = self.client.submit(transition).await?;
        tracing::info!(tx = %tx, "subscribe accepted");
        Ok(tx)
    }

    async fn renew(
        &self,
        provider: ProviderId,
        new_recipient: &str,
        new_end_time: i64,
        quality_score: u8,
        proof: EligibilityProof,
    ) -> Result<TransactionId, SubscriptionError> {
        let subscriber = self.require_identity()?;
        let quality_score = QualityScore::try_from(quality_score)?;
        let addrs = derive_all(&self.config.program_id, &provider, &subscriber);

        // Step 1: the quality record must exist before renewing. Only a true
        // not-found triggers initialization; a failed read propagates rather
        // than masking a transient outage as absence.
        match self.client.fetch_quality(addrs.quality).await {
            Ok(_) => {}
            Err(ClientError::AccountNotFound(_)) => {
                self.initialize_quality(subscriber, provider, addrs.quality)
                    .await?;
            }
            Err(other) => return Err(other.into()),
        }

        // Step 2: the renew itself.
        let state = self.client.fetch_state(addrs.state).await?;
        let transition = Transition::RenewSubscription {
            accounts: RenewAccounts {
                subscriber,
                provider,
                state: addrs.state,
                quality: addrs.quality,
                subscription: addrs.subscription,
                subscribers_list: addrs.subscribers_list,
                owner: state.owner,
                nft_token: proof,
            },
            args: RenewArgs {
                new_recipient: new_recipient.to_string(),
                new_end_time,
                quality_score,
            },
        };
        tracing::info!(provider = %provider, new_end_time, "submitting renew");
        let tx = self.client.submit(transition).await?;
        tracing::info!(tx = %tx, "renew accepted");
        Ok(tx)
    }

    async fn cancel(
        &self,
        provider: ProviderId,
        quality_score: u8,
        proof: Option<EligibilityProof>,
    ) -> Result<TransactionId, SubscriptionError> {
        let subscriber = self.require_identity()?;
        let quality_score = QualityScore::try_from(quality_score)?;
        let addrs = derive_all(&self.config.program_id, &provider, &subscriber);

        let transition = Transition::CancelSubscription {
            accounts: CancelAccounts {
                subscriber,
                provider,
                subscription: addrs.subscription,
                quality: addrs.quality,
                nft_token: proof,
            },
            args: CancelArgs { quality_score },
        };
        tracing::info!(provider = %provider, "submitting cancel");
        let tx = self.client.submit(transition).await?;
        tracing::info!(tx = %tx, "cancel accepted");
        Ok(tx)
    }

    fn status_of(&self, end_time: i64) -> SubscriptionStatus {
        classify(end_time, self.clock.unix_now())
    }

    async fn subscribers_of(
        &self,
        provider: ProviderId,
    ) -> Result<Vec<SubscriberId>, SubscriptionError> {
        let address = pda::subscribers_list_address(&self.config.program_id, &provider);
        match self.client.fetch_subscribers_list(address).await {
            Ok(list) => Ok(list.subscribers),
            // No roster account means nobody ever subscribed.
            Err(ClientError::AccountNotFound(_)) => Ok(Vec::new()),
            Err(other) => Err(other.into()),
        }
    }

    async fn count_active_subscriptions(
        &self,
        provider: ProviderId,
    ) -> Result<usize, SubscriptionError> {
        let subscribers = self.subscribers_of(provider).await?;
        let now = self.clock.unix_now();
        let mut active = 0;
        for subscriber in subscribers {
            let address =
                pda::subscription_address(&self.config.program_id, &subscriber, &provider);
            match self.client.fetch_subscription(address).await {
                Ok(record) if record.end_time > now => active += 1,
                Ok(_) => {}
                // Unreadable record counts as not currently subscribed; the
                // count degrades gracefully instead of failing outright.
                Err(err) => {
                    tracing::warn!(subscriber = %subscriber, error = %err,
                        "skipping subscriber with unreadable record");
                }
            }
        }
        Ok(active)
    }

    async fn subscriptions_for(
        &self,
        subscriber: SubscriberId,
    ) -> Result<Vec<SubscriptionView>, SubscriptionError> {
        let now = self.clock.unix_now();
        let records = self.client.list_subscriptions().await?;
        Ok(records
            .into_iter()
            .filter(|(_, record)| record.owner == subscriber && record.end_time > now)
            .map(|(address, record)| SubscriptionView {
                address,
                status: classify(record.end_time, now),
                recipient: record.recipient,
                end_time: record.end_time,
            })
            .collect())
    }
}
