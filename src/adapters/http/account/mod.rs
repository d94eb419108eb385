//! Account HTTP module.

mod dto;
mod handlers;
mod routes;

pub use dto::{AccountResponse, RegisterRequest, TargetsRequest};
pub use routes::routes;
