//! Core types, configuration, and error handling for the cograph workspace.
//!
//! This crate provides the shared foundation used by the other cograph
//! crates:
//! - [`CographError`] — unified error type using `thiserror`
//! - [`CographConfig`] — configuration loaded from `.cograph.toml`
//! - Shared types: [`ChangeRecord`], [`OutputFormat`]

mod config;
mod error;
mod types;

pub use config::{CentralityConfig, CographConfig, MiningConfig};
pub use error::CographError;
pub use types::{ChangeRecord, OutputFormat};

/// A convenience `Result` type for cograph operations.
pub type Result<T> = std::result::Result<T, CographError>;
