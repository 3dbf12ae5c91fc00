//! Infrastructure layer: file storage, configuration and paths.

pub mod config_service;
pub mod paths;
pub mod state_repository;
pub mod storage;

pub use config_service::ConfigService;
pub use paths::{FolioPaths, PathError};
pub use state_repository::KeyValueStateRepository;
pub use storage::{InMemoryKeyValueStore, TomlKeyValueStore};
