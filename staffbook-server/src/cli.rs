//! Command-line arguments
//!
//! Every option can also come from the environment; clap resolves the
//! argument-over-environment priority before [`Settings::resolve`] layers the
//! TOML file and compiled defaults underneath.
//!
//! [`Settings::resolve`]: staffbook_common::config::Settings::resolve

use clap::Parser;
use staffbook_common::config::Overrides;
use std::path::PathBuf;

/// Command-line arguments for staffbook-server
#[derive(Parser, Debug)]
#[command(name = "staffbook-server")]
#[command(about = "Departments and employees REST service")]
#[command(version)]
pub struct Cli {
    /// SQLite database file or `sqlite://` URL
    #[arg(long, env = "DATABASE_URL")]
    pub database: Option<String>,

    /// Host to bind
    #[arg(long, env = "STAFFBOOK_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "STAFFBOOK_PORT")]
    pub port: Option<u16>,

    /// Use a throwaway in-memory database
    #[arg(long, env = "STAFFBOOK_TESTING")]
    pub testing: bool,

    /// TOML config file (default: ~/.config/staffbook/config.toml if present)
    #[arg(short, long, env = "STAFFBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Insert the sample departments and employees at startup
    #[arg(long)]
    pub seed: bool,
}

impl Cli {
    /// Values that take priority over the TOML file
    pub fn overrides(&self) -> Overrides {
        Overrides {
            database: self.database.clone(),
            host: self.host.clone(),
            port: self.port,
            testing: self.testing,
        }
    }
}
