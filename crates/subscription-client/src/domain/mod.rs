//! # Domain Module
//!
//! The pure core: identifiers, address derivation, lifecycle status,
//! observed records, typed transitions, and the error taxonomy. Nothing in
//! here performs I/O or reads the system clock.

pub mod errors;
pub mod keys;
pub mod pda;
pub mod records;
pub mod status;
pub mod transitions;

pub use errors::*;
pub use keys::*;
pub use pda::{
    derive_all, quality_address, state_address, subscribers_list_address, subscription_address,
    DerivedAddresses,
};
pub use records::*;
pub use status::*;
pub use transitions::*;
