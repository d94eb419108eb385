//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `stripe` - Stripe REST integration and a scriptable mock
//! - `postgres` - sqlx repositories
//! - `memory` - in-memory repositories for tests and local runs
//! - `http` - axum routers, handlers, and DTOs

pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;
