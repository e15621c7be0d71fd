//! apidoc Common - Shared types and utilities
//!
//! This crate provides the configuration record, the data model of the
//! Swagger UI bootstrap and the error type shared across all apidoc crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, SwaggerUiConfig};
pub use error::{Error, Result};
