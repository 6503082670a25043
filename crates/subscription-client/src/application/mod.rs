//! # Application Module
//!
//! The orchestrating service behind [`crate::ports::SubscriptionApi`].

pub mod service;

pub use service::SubscriptionService;
