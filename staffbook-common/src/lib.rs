//! # Staffbook Common Library
//!
//! Shared code for the staffbook service:
//! - Database initialization and row models
//! - Sample data seeding
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use db::models::{Department, Employee};
pub use error::{Error, Result};
