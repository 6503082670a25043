//! # Outbound Ports
//!
//! Traits for the external collaborators: the program client that carries
//! reads and transitions to the remote program, the signing identity acting
//! as subscriber/payer, and the clock. Mock implementations for testing live
//! here as well.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::domain::{
    Address, ClientError, QualityRecord, StateRecord, SubscriberId, SubscribersList,
    SubscriptionRecord, TransactionId, Transition,
};

/// Program client - outbound port.
///
/// One method per account kind keeps reads statically typed; `submit` takes
/// a fully bound [`Transition`]. The client owns transport concerns
/// (timeouts, retries are the caller's policy, not this crate's).
#[async_trait]
pub trait ProgramClient: Send + Sync {
    /// Submit a state transition, returning the transaction identifier.
    async fn submit(&self, transition: Transition) -> Result<TransactionId, ClientError>;

    /// Fetch the global state account.
    async fn fetch_state(&self, address: Address) -> Result<StateRecord, ClientError>;

    /// Fetch a provider's quality record.
    async fn fetch_quality(&self, address: Address) -> Result<QualityRecord, ClientError>;

    /// Fetch a (subscriber, provider) subscription record.
    async fn fetch_subscription(&self, address: Address)
        -> Result<SubscriptionRecord, ClientError>;

    /// Fetch a provider's subscriber roster.
    async fn fetch_subscribers_list(
        &self,
        address: Address,
    ) -> Result<SubscribersList, ClientError>;

    /// List every subscription record the program currently owns.
    async fn list_subscriptions(
        &self,
    ) -> Result<Vec<(Address, SubscriptionRecord)>, ClientError>;
}

/// Signing identity - outbound port.
///
/// Mutating operations require a connected identity; `None` means no wallet
/// is connected and every mutating call must fail before touching the wire.
pub trait SigningIdentity: Send + Sync {
    /// The public identifier acting as subscriber and payer, if connected.
    fn public_id(&self) -> Option<SubscriberId>;
}

/// Clock - outbound port.
///
/// Injected so status classification and end-time arithmetic are testable.
pub trait Clock: Send + Sync {
    /// Current Unix time in seconds.
    fn unix_now(&self) -> i64;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

#[derive(Default)]
struct MockProgramState {
    states: HashMap<Address, StateRecord>,
    quality: HashMap<Address, QualityRecord>,
    subscriptions: HashMap<Address, SubscriptionRecord>,
    subscribers_lists: HashMap<Address, SubscribersList>,
    failing: HashSet<Address>,
    hidden_quality_once: HashSet<Address>,
    submit_failure: Option<(u32, String)>,
    submit_failure_once: Option<(u32, String)>,
    submissions: Vec<Transition>,
    next_tx: u64,
}

/// In-memory program client for testing.
///
/// Applies submitted transitions to its own account map so multi-step flows
/// (initialize-then-renew, create-then-count) behave like the real program.
#[derive(Default)]
pub struct MockProgramClient {
    inner: Mutex<MockProgramState>,
}

impl MockProgramClient {
    /// Create an empty mock program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the global state account.
    pub fn set_state(&self, address: Address, record: StateRecord) {
        self.inner.lock().unwrap().states.insert(address, record);
    }

    /// Seed a quality record.
    pub fn set_quality(&self, address: Address, record: QualityRecord) {
        self.inner.lock().unwrap().quality.insert(address, record);
    }

    /// Seed a subscription record.
    pub fn set_subscription(&self, address: Address, record: SubscriptionRecord) {
        self.inner
            .lock()
            .unwrap()
            .subscriptions
            .insert(address, record);
    }

    /// Seed a subscriber roster.
    pub fn set_subscribers_list(&self, address: Address, record: SubscribersList) {
        self.inner
            .lock()
            .unwrap()
            .subscribers_lists
            .insert(address, record);
    }

    /// Make every fetch of `address` fail with a transport error.
    pub fn fail_fetches_of(&self, address: Address) {
        self.inner.lock().unwrap().failing.insert(address);
    }

    /// Make every subsequent submission fail with the given program code.
    pub fn fail_submissions_with(&self, code: u32, message: &str) {
        self.inner.lock().unwrap().submit_failure = Some((code, message.to_string()));
    }

    /// Make only the next submission fail with the given program code.
    pub fn fail_next_submission_with(&self, code: u32, message: &str) {
        self.inner.lock().unwrap().submit_failure_once = Some((code, message.to_string()));
    }

    /// Report the quality record at `address` as missing exactly once even if
    /// it exists. Simulates a record created concurrently between a read and
    /// the following initialization attempt.
    pub fn hide_quality_once(&self, address: Address) {
        self.inner.lock().unwrap().hidden_quality_once.insert(address);
    }

    /// Stop failing submissions.
    pub fn clear_submit_failure(&self) {
        self.inner.lock().unwrap().submit_failure = None;
    }

    /// Everything submitted so far, including rejected submissions.
    pub fn submissions(&self) -> Vec<Transition> {
        self.inner.lock().unwrap().submissions.clone()
    }

    /// How many `initializeQualityInfo` submissions were attempted.
    pub fn quality_init_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .submissions
            .iter()
            .filter(|t| matches!(t, Transition::InitializeQualityInfo { .. }))
            .count()
    }

    fn check_failing(state: &MockProgramState, address: Address) -> Result<(), ClientError> {
        if state.failing.contains(&address) {
            return Err(ClientError::Transport(format!(
                "injected fetch failure for {address}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ProgramClient for MockProgramClient {
    async fn submit(&self, transition: Transition) -> Result<TransactionId, ClientError> {
        let mut state = self.inner.lock().unwrap();
        state.submissions.push(transition.clone());

        if let Some((code, message)) = state.submit_failure_once.take() {
            return Err(ClientError::Program { code, message });
        }
        if let Some((code, message)) = state.submit_failure.clone() {
            return Err(ClientError::Program { code, message });
        }

        match transition {
            Transition::Subscribe { accounts, args } => {
                state.subscriptions.insert(
                    accounts.subscription,
                    SubscriptionRecord {
                        owner: accounts.subscriber,
                        recipient: args.recipient,
                        end_time: args.end_time,
                    },
                );
                let roster = state
                    .subscribers_lists
                    .entry(accounts.subscribers_list)
                    .or_insert_with(|| SubscribersList {
                        provider: accounts.provider,
                        subscribers: Vec::new(),
                    });
                if !roster.subscribers.contains(&accounts.subscriber) {
                    roster.subscribers.push(accounts.subscriber);
                }
            }
            Transition::RenewSubscription { accounts, args } => {
                if let Some(record) = state.subscriptions.get_mut(&accounts.subscription) {
                    record.recipient = args.new_recipient;
                    record.end_time = args.new_end_time;
                }
            }
            Transition::CancelSubscription { accounts, .. } => {
                state.subscriptions.remove(&accounts.subscription);
            }
            Transition::InitializeQualityInfo { accounts } => {
                state.quality.insert(
                    accounts.quality,
                    QualityRecord {
                        provider: accounts.provider,
                        quality_score: 0,
                    },
                );
            }
        }

        state.next_tx += 1;
        Ok(TransactionId(format!("mock-tx-{}", state.next_tx)))
    }

    async fn fetch_state(&self, address: Address) -> Result<StateRecord, ClientError> {
        let state = self.inner.lock().unwrap();
        Self::check_failing(&state, address)?;
        state
            .states
            .get(&address)
            .copied()
            .ok_or(ClientError::AccountNotFound(address))
    }

    async fn fetch_quality(&self, address: Address) -> Result<QualityRecord, ClientError> {
        let mut state = self.inner.lock().unwrap();
        Self::check_failing(&state, address)?;
        if state.hidden_quality_once.remove(&address) {
            return Err(ClientError::AccountNotFound(address));
        }
        state
            .quality
            .get(&address)
            .copied()
            .ok_or(ClientError::AccountNotFound(address))
    }

    async fn fetch_subscription(
        &self,
        address: Address,
    ) -> Result<SubscriptionRecord, ClientError> {
        let state = self.inner.lock().unwrap();
        Self::check_failing(&state, address)?;
        state
            .subscriptions
            .get(&address)
            .cloned()
            .ok_or(ClientError::AccountNotFound(address))
    }

    async fn fetch_subscribers_list(
        &self,
        address: Address,
    ) -> Result<SubscribersList, ClientError> {
        let state = self.inner.lock().unwrap();
        Self::check_failing(&state, address)?;
        state
            .subscribers_lists
            .get(&address)
            .cloned()
            .ok_or(ClientError::AccountNotFound(address))
    }

    async fn list_subscriptions(
        &self,
    ) -> Result<Vec<(Address, SubscriptionRecord)>, ClientError> {
        let state = self.inner.lock().unwrap();
        Ok(state
            .subscriptions
            .iter()
            .map(|(addr, record)| (*addr, record.clone()))
            .collect())
    }
}

/// Mock signing identity for testing.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockIdentity {
    /// Connected identity, or `None` for a disconnected wallet.
    pub id: Option<SubscriberId>,
}

impl MockIdentity {
    /// A connected identity.
    pub fn connected(id: SubscriberId) -> Self {
        Self { id: Some(id) }
    }

    /// A disconnected identity.
    pub fn disconnected() -> Self {
        Self { id: None }
    }
}

impl SigningIdentity for MockIdentity {
    fn public_id(&self) -> Option<SubscriberId> {
        self.id
    }
}

/// Clock pinned to a fixed instant for testing.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_now(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Pubkey, KEY_LEN};

    #[tokio::test]
    async fn test_mock_fetch_missing_account() {
        let client = MockProgramClient::new();
        let addr = Address::new([1u8; KEY_LEN]);
        let err = client.fetch_state(addr).await.unwrap_err();
        assert_eq!(err, ClientError::AccountNotFound(addr));
    }

    #[tokio::test]
    async fn test_mock_fetch_failure_injection() {
        let client = MockProgramClient::new();
        let addr = Address::new([1u8; KEY_LEN]);
        client.set_subscription(
            addr,
            SubscriptionRecord {
                owner: Pubkey::new([2u8; KEY_LEN]),
                recipient: "r".to_string(),
                end_time: 10,
            },
        );
        client.fail_fetches_of(addr);
        let err = client.fetch_subscription(addr).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[tokio::test]
    async fn test_mock_submit_failure_records_submission() {
        let client = MockProgramClient::new();
        client.fail_submissions_with(6001, "already subscribed");
        let transition = Transition::InitializeQualityInfo {
            accounts: crate::domain::InitializeQualityAccounts {
                payer: Pubkey::new([1u8; KEY_LEN]),
                provider: Pubkey::new([2u8; KEY_LEN]),
                quality: Address::new([3u8; KEY_LEN]),
            },
        };
        assert!(client.submit(transition).await.is_err());
        assert_eq!(client.submissions().len(), 1);
    }

    #[test]
    fn test_disconnected_identity() {
        assert!(MockIdentity::disconnected().public_id().is_none());
    }
}
