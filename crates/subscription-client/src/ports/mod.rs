//! # Ports Module
//!
//! Inbound API trait and outbound dependency traits, with mock outbound
//! implementations for testing.

pub mod inbound;
pub mod outbound;

pub use inbound::SubscriptionApi;
pub use outbound::{
    Clock, FixedClock, MockIdentity, MockProgramClient, ProgramClient, SigningIdentity,
};
