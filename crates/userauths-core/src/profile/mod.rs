//! Profile domain module.

mod model;
mod public_id;
mod repository;

pub use model::{Profile, ProfileDisplay};
pub use public_id::{PublicId, PublicIdGenerator};
pub use repository::ProfileRepository;
