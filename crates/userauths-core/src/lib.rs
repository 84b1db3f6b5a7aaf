//! Domain records for the userauths authentication subsystem.
//!
//! Two records live here: [`Account`](account::Account), the login identity,
//! and [`Profile`](profile::Profile), the optional personal data an account
//! owns. Both carry their save-time default derivation; storage is reached
//! only through the repository traits.

pub mod account;
pub mod config;
pub mod error;
pub mod fields;
pub mod ids;
pub mod profile;

// Re-export common error type
pub use error::{Result, UserAuthsError};
pub use ids::{AccountId, ProfileId};
