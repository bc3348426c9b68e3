pub mod config;
pub mod course_store;
pub mod errors;
pub mod gateway;

#[cfg(test)]
pub mod test_helpers;

pub use config::{StoreConfig, UserConfig};
pub use course_store::CourseStore;
pub use errors::{StorageError, StorageResult};
pub use gateway::PersistenceGateway;
