pub mod config_service;
pub mod dto;
pub mod file_store;
pub mod in_memory_store;
pub mod paths;
pub mod public_id_generator;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_store::FileUserStore;
pub use crate::in_memory_store::InMemoryUserStore;
pub use crate::paths::UserAuthsPaths;
pub use crate::public_id_generator::RandomPublicIdGenerator;
