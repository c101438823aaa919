//! Ludia Core Library
//!
//! This crate provides the domain models, error types, configuration,
//! sanitization and metadata validation shared across all Ludia components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod sanitize;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use sanitize::{escape, escape_opt};
