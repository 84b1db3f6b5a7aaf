//! Account domain module.
//!
//! # Module Structure
//!
//! - `model`: The account record and its save-time defaults
//! - `identity`: Login and credential capabilities
//! - `repository`: Persistence trait

mod identity;
mod model;
mod repository;

pub use identity::{CredentialHolder, LoginIdentity};
pub use model::{Account, email_local_part};
pub use repository::AccountRepository;
