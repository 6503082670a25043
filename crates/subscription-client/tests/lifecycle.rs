//! # Lifecycle Integration Test
//!
//! Drives a full subscription lifecycle (create, renew twice, cancel) plus
//! the read-side queries against the in-memory mock program, checking that
//! the account picture the service leaves behind matches the state machine:
//! `NonExistent -> live -> renewed -> NonExistent`.

use std::sync::Arc;

use subscription_client::domain::pda;
use subscription_client::{
    Address, ClientConfig, EligibilityProof, FixedClock, MockIdentity, MockProgramClient,
    Pubkey, StateRecord, SubscriptionApi, SubscriptionError, SubscriptionService,
    SubscriptionStatus, KEY_LEN, SECONDS_PER_DAY,
};

const NOW: i64 = 1_700_000_000;

fn program_id() -> Pubkey {
    Pubkey::new([10u8; KEY_LEN])
}

fn provider() -> Pubkey {
    Pubkey::new([20u8; KEY_LEN])
}

fn subscriber() -> Pubkey {
    Pubkey::new([30u8; KEY_LEN])
}

fn build_service(
    client: Arc<MockProgramClient>,
) -> SubscriptionService<MockProgramClient> {
    client.set_state(
        pda::state_address(&program_id()),
        StateRecord {
            owner: Pubkey::new([50u8; KEY_LEN]),
        },
    );
    SubscriptionService::new(
        ClientConfig::new(program_id(), Pubkey::new([11u8; KEY_LEN])),
        client,
        Arc::new(MockIdentity::connected(subscriber())),
        Arc::new(FixedClock(NOW)),
    )
}

#[tokio::test]
async fn full_lifecycle_create_renew_cancel() {
    let client = Arc::new(MockProgramClient::new());
    let service = build_service(client.clone());
    let proof = EligibilityProof(Address::new([40u8; KEY_LEN]));

    // Nothing exists yet.
    assert_eq!(service.count_active_subscriptions(provider()).await.unwrap(), 0);
    assert!(service.subscriptions_for(subscriber()).await.unwrap().is_empty());

    // Create a 30-day subscription.
    service
        .create(provider(), "https://feeds.example/ingest", 30, proof)
        .await
        .unwrap();
    assert_eq!(service.count_active_subscriptions(provider()).await.unwrap(), 1);
    assert_eq!(service.subscribers_of(provider()).await.unwrap(), vec![subscriber()]);

    let views = service.subscriptions_for(subscriber()).await.unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].status, SubscriptionStatus::Active);
    assert_eq!(views[0].end_time, NOW + 30 * SECONDS_PER_DAY);

    // First renew initializes the provider's quality record.
    service
        .renew(provider(), "https://feeds.example/v2", NOW + 90 * SECONDS_PER_DAY, 85, proof)
        .await
        .unwrap();
    assert_eq!(client.quality_init_count(), 1);

    // Second renew finds it present.
    service
        .renew(provider(), "https://feeds.example/v2", NOW + 120 * SECONDS_PER_DAY, 90, proof)
        .await
        .unwrap();
    assert_eq!(client.quality_init_count(), 1);

    let views = service.subscriptions_for(subscriber()).await.unwrap();
    assert_eq!(views[0].end_time, NOW + 120 * SECONDS_PER_DAY);
    assert_eq!(views[0].recipient, "https://feeds.example/v2");

    // Cancel removes the record; the roster keeps historical members.
    service.cancel(provider(), 88, Some(proof)).await.unwrap();
    assert_eq!(service.count_active_subscriptions(provider()).await.unwrap(), 0);
    assert!(service.subscriptions_for(subscriber()).await.unwrap().is_empty());
    assert_eq!(service.subscribers_of(provider()).await.unwrap(), vec![subscriber()]);
}

#[tokio::test]
async fn mutating_calls_fail_without_identity() {
    let client = Arc::new(MockProgramClient::new());
    client.set_state(
        pda::state_address(&program_id()),
        StateRecord {
            owner: Pubkey::new([50u8; KEY_LEN]),
        },
    );
    let service = SubscriptionService::new(
        ClientConfig::new(program_id(), Pubkey::new([11u8; KEY_LEN])),
        client.clone(),
        Arc::new(MockIdentity::disconnected()),
        Arc::new(FixedClock(NOW)),
    );
    let proof = EligibilityProof(Address::new([40u8; KEY_LEN]));

    assert_eq!(
        service.create(provider(), "r", 30, proof).await.unwrap_err(),
        SubscriptionError::IdentityNotConnected
    );
    assert_eq!(
        service
            .renew(provider(), "r", NOW + SECONDS_PER_DAY, 50, proof)
            .await
            .unwrap_err(),
        SubscriptionError::IdentityNotConnected
    );
    assert_eq!(
        service.cancel(provider(), 50, None).await.unwrap_err(),
        SubscriptionError::IdentityNotConnected
    );
    assert!(client.submissions().is_empty());

    // Read-side queries still work without an identity.
    assert!(service.subscribers_of(provider()).await.unwrap().is_empty());
}
