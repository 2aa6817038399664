//! Database schema, row models and seeding

pub mod init;
pub mod models;
pub mod seed;

pub use init::*;
pub use models::*;
