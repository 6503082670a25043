//! # Adapters Module
//!
//! Concrete implementations of the outbound ports that do not belong to the
//! caller. The program client itself is supplied by the embedding
//! application; only the wall clock lives here.

pub mod clock;

pub use clock::SystemClock;
