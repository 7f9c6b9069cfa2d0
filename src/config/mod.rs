//! Configuration management for the blogsmith CLI.
//!
//! This module provides a flexible configuration system that supports:
//! - File-based configuration
//! - Environment variable overrides
//! - Builder pattern for programmatic configuration
//! - Validation of required settings
//!
//! Credentials live in the `Config` value passed by reference through the
//! application; nothing here writes to the process environment.

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

// Re-export the main types for convenience
pub use types::{Config, LlmProvider, LlmSettings};
