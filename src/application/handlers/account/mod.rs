//! Account handlers: registration, record reads, targets updates.

mod get_account;
mod register_user;
mod update_targets;

pub use get_account::{GetAccountHandler, GetAccountQuery};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};
pub use update_targets::{UpdateTargetsCommand, UpdateTargetsHandler};
