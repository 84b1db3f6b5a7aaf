//! Application layer for userauths.
//!
//! Use cases that combine the record rules from `userauths-core` with the
//! repositories supplied by an infrastructure adapter.

pub mod changes;
pub mod service;

pub use changes::{AccountChanges, NewAccount, ProfileChanges};
pub use service::{AccountService, Registration};
