//! user サブコマンド
//!
//! データベースに直接ユーザーを作成します（`sale`ロールの発行手段）。

use clap::{Args, Subcommand};
use sqlx::SqlitePool;

use crate::api::validation::{check_email, check_min_trimmed, check_password, MIN_NAME_LEN};
use crate::common::auth::{User, UserRole};
use crate::common::error::{ServiceError, ValidationErrors};

/// user サブコマンドの引数
#[derive(Args, Debug)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommands,
}

/// user サブコマンド一覧
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create a user with an explicit role
    Create(CreateUserArgs),
}

/// user create の引数
#[derive(Args, Debug, Clone)]
pub struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Email address (unique)
    #[arg(long)]
    pub email: String,

    /// Password (at least 6 characters)
    #[arg(long)]
    pub password: String,

    /// Role: customer or sale
    #[arg(long, default_value = "customer")]
    pub role: UserRole,
}

/// user サブコマンドを実行
pub async fn execute(
    command: UserCommands,
    pool: &SqlitePool,
    bcrypt_cost: u32,
) -> Result<User, ServiceError> {
    match command {
        UserCommands::Create(args) => create_user(args, pool, bcrypt_cost).await,
    }
}

async fn create_user(
    args: CreateUserArgs,
    pool: &SqlitePool,
    bcrypt_cost: u32,
) -> Result<User, ServiceError> {
    let mut errors = ValidationErrors::new();
    let name = check_min_trimmed(&mut errors, "name", &args.name, MIN_NAME_LEN).to_string();
    check_email(&mut errors, &args.email);
    check_password(&mut errors, &args.password);
    errors.into_result()?;

    let password_hash =
        crate::auth::password::hash_password_blocking(args.password, bcrypt_cost).await?;
    let user = crate::db::users::create(pool, &name, &args.email, &password_hash, args.role).await?;

    tracing::info!(user_id = %user.id, role = %user.role, "User created from CLI");
    Ok(user)
}
