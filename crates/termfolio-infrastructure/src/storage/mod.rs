//! Storage layer: atomic TOML files and key/value stores.

mod atomic_toml;
mod memory_store;
mod toml_store;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use memory_store::InMemoryKeyValueStore;
pub use toml_store::TomlKeyValueStore;
