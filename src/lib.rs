//! Macrolog - Nutrition tracking SaaS backend.
//!
//! Users hold an account record with daily macro targets, subscribe
//! through Stripe, log foods and meals, and read daily progress. The
//! subscription lifecycle is webhook-driven with a server-side
//! reconciliation path healing missed deliveries.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
