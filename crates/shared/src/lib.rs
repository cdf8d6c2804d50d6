//! Shared types, errors, and configuration for Fiscora.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for the budgeting dimensions
//! - The forecast cutoff comparison rule
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, FiscalConfig};
pub use error::{AppError, AppResult};
