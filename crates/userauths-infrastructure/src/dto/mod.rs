//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema of the store file. They are
//! private to the infrastructure layer and handle the evolution of the
//! storage format over time.
//!
//! ## Schema Versioning (Semantic Versioning)
//!
//! - **MAJOR (X.0.0)**: Breaking changes (field removal, type changes)
//! - **MINOR (1.X.0)**: Backward-compatible changes (renames with a migration, new optional fields)
//!
//! ### Account Version History
//! - **1.0.0**: Initial schema
//!
//! ### Profile Version History
//! - **1.0.0**: Legacy column names (`user`, `date`, `pid`)
//! - **1.1.0**: `owner`, `created_at`, `public_id`

mod account;
mod profile;
mod store_document;

pub use account::{ACCOUNT_ENTITY, AccountV1_0_0, create_account_migrator};
pub use profile::{PROFILE_ENTITY, ProfileV1_0_0, ProfileV1_1_0, create_profile_migrator};
pub use store_document::StoreDocument;
