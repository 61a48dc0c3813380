//! CLI module for delivery-api
//!
//! Provides command-line interface for the server and operator tasks.

/// serve サブコマンド
pub mod serve;
/// user サブコマンド
pub mod user;

use clap::{Parser, Subcommand};

/// Delivery tracking API server
#[derive(Parser, Debug)]
#[command(name = "delivery-api")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    DELIVERY_API_HOST                 Bind address (default: 0.0.0.0)
    DELIVERY_API_PORT                 Listen port (default: 3333)
    DELIVERY_API_DATABASE_URL         Database URL (default: sqlite:data/delivery-api.db)
    DELIVERY_API_JWT_SECRET           JWT signing key (random per process if not set)
    DELIVERY_API_JWT_EXPIRES_IN_SECS  Token lifetime in seconds (default: 86400)
    DELIVERY_API_BCRYPT_COST          bcrypt cost (default: 8)
    DELIVERY_API_LOG_LEVEL            Log level (default: info)
    DELIVERY_API_LOG_DIR              Directory for daily log files
"#)]
pub struct Cli {
    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Serve(serve::ServeArgs),
    /// Manage users directly in the database
    User(user::UserArgs),
}
