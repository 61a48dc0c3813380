//! Delivery tracking API Server Entry Point

use clap::Parser;
use delivery_api::cli::{serve::ServeArgs, Cli, Commands};
use delivery_api::common::error::ServiceError;
use delivery_api::config::{get_bcrypt_cost, get_database_url, AuthConfig};
use delivery_api::db::migrations::initialize_database;
use delivery_api::{logging, server, AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        None => run_server(ServeArgs::default()).await,
        Some(Commands::Serve(args)) => run_server(args).await,
        Some(Commands::User(args)) => run_user_command(args).await,
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_server(args: ServeArgs) -> Result<(), ServiceError> {
    info!(
        "Starting Delivery API v{}",
        env!("CARGO_PKG_VERSION")
    );

    let database_url = get_database_url();
    info!("Using database {}", database_url);
    let pool = initialize_database(&database_url).await?;

    let state = AppState::from_pool(pool, AuthConfig::from_env());
    server::run(state, &args.bind_addr()).await
}

async fn run_user_command(args: delivery_api::cli::user::UserArgs) -> Result<(), ServiceError> {
    let pool = initialize_database(&get_database_url()).await?;
    let user = delivery_api::cli::user::execute(args.command, &pool, get_bcrypt_cost()).await?;
    println!("Created user {} <{}> ({})", user.id, user.email, user.role);

    pool.close().await;
    Ok(())
}
