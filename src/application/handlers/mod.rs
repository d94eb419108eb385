//! Command and query handlers.
//!
//! One handler per operation; dependencies are constructor-injected
//! `Arc<dyn Port>` values so handlers are testable with mocks.

pub mod account;
pub mod billing;
pub mod nutrition;
