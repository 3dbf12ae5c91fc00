pub mod command;
pub mod config;
pub mod error;
pub mod portfolio;
pub mod relay;
pub mod session;
pub mod state;

// Re-export common error type
pub use error::FolioError;
