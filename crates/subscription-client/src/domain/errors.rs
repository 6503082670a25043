//! # Error Taxonomy
//!
//! Two layers of failure:
//!
//! - [`ClientError`] is what the program-client port surfaces raw: a missing
//!   account, a coded program rejection, or a transport failure.
//! - [`SubscriptionError`] is the stable application-level taxonomy callers
//!   see. Each program code translates to exactly one kind; everything
//!   without a recognized code collapses into [`SubscriptionError::Unknown`]
//!   with the original message preserved.

use thiserror::Error;

use super::keys::Address;

/// Raw failure surfaced by the program client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The requested account does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(Address),

    /// The program rejected a transition with a numeric code.
    #[error("program error {code}: {message}")]
    Program {
        /// Raw numeric code from the program.
        code: u32,
        /// Message attached by the program or runtime.
        message: String,
    },

    /// Connectivity or timeout failure below the program layer.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Numeric codes of the program's custom errors.
pub mod codes {
    /// Requested duration is below the program minimum.
    pub const PERIOD_TOO_SHORT: u32 = 6000;
    /// A live subscription already exists for the pair.
    pub const ALREADY_SUBSCRIBED: u32 = 6001;
    /// Payment attached to the call does not cover the period.
    pub const INSUFFICIENT_PAYMENT: u32 = 6002;
    /// The eligibility proof does not hold the membership credential.
    pub const INVALID_NFT_HOLDER: u32 = 6003;
    /// No subscription record exists for the pair.
    pub const SUBSCRIPTION_NOT_FOUND: u32 = 6004;
    /// Quality score outside `0..=100`.
    pub const QUALITY_OUT_OF_RANGE: u32 = 6005;
    /// The subscription's end time has already passed.
    pub const SUBSCRIPTION_ALREADY_ENDED: u32 = 6006;
    /// The subscription is still active and cannot be cancelled early.
    pub const ACTIVE_SUBSCRIPTION: u32 = 6007;
    /// Caller is not the owner the call requires.
    pub const NOT_OWNER: u32 = 6008;
}

/// Application-level subscription failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Requested duration is below the program minimum.
    #[error("subscription period is too short")]
    PeriodTooShort,

    /// A live subscription already exists for this pair.
    #[error("already subscribed to this provider")]
    AlreadySubscribed,

    /// Payment attached to the call does not cover the period.
    #[error("insufficient payment for the requested period")]
    InsufficientPayment,

    /// The eligibility proof does not hold the membership credential.
    #[error("caller does not hold the membership credential")]
    InvalidNftHolder,

    /// No subscription record exists for this pair.
    #[error("subscription not found")]
    SubscriptionNotFound,

    /// Quality score outside `0..=100`.
    #[error("quality score out of range")]
    QualityOutOfRange,

    /// The subscription's end time has already passed.
    #[error("subscription has already ended")]
    SubscriptionAlreadyEnded,

    /// The subscription is still active and cannot be cancelled early.
    #[error("subscription is still active")]
    ActiveSubscription,

    /// Caller is not the owner the call requires.
    #[error("caller is not the owner")]
    NotOwner,

    /// No signing identity is connected; all mutating calls require one.
    #[error("no signing identity connected")]
    IdentityNotConnected,

    /// Any failure without a recognized program code.
    #[error("unrecognized failure: {0}")]
    Unknown(String),
}

impl SubscriptionError {
    /// Translate a raw program code, falling back to `Unknown`.
    pub fn from_code(code: u32, message: &str) -> Self {
        match code {
            codes::PERIOD_TOO_SHORT => Self::PeriodTooShort,
            codes::ALREADY_SUBSCRIBED => Self::AlreadySubscribed,
            codes::INSUFFICIENT_PAYMENT => Self::InsufficientPayment,
            codes::INVALID_NFT_HOLDER => Self::InvalidNftHolder,
            codes::SUBSCRIPTION_NOT_FOUND => Self::SubscriptionNotFound,
            codes::QUALITY_OUT_OF_RANGE => Self::QualityOutOfRange,
            codes::SUBSCRIPTION_ALREADY_ENDED => Self::SubscriptionAlreadyEnded,
            codes::ACTIVE_SUBSCRIPTION => Self::ActiveSubscription,
            codes::NOT_OWNER => Self::NotOwner,
            other => Self::Unknown(format!("program error {other}: {message}")),
        }
    }
}

impl From<ClientError> for SubscriptionError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Program { code, message } => Self::from_code(code, &message),
            other => Self::Unknown(other.to_string()),
        }
    }
}
