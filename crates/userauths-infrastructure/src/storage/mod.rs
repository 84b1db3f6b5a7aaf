//! Storage primitives for the user stores.

mod atomic_file;
pub(crate) mod tables;

pub use atomic_file::{AtomicFile, FileFormat};
pub use tables::{MAX_PUBLIC_ID_ATTEMPTS, UserTables};
