//! Shared utilities for stockdash
//!
//! This crate provides the ambient pieces used across the workspace:
//! tracing setup and the environment-backed application settings.

pub mod config;
pub mod logging;

pub use config::Settings;
pub use logging::{init_file_tracing, init_tracing};
