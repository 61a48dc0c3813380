//! Delivery tracking API Server
//!
//! ユーザー・セッション・配送・配送ログを扱うREST APIサーバー

#![warn(missing_docs)]

/// 共通型定義（ドメインモデル・エラー）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 認証・認可機能
pub mod auth;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// 配送ログの追記・閲覧ルール
pub mod delivery_log;

/// ロギング初期化ユーティリティ
pub mod logging;

/// HTTPサーバー起動・シャットダウン
pub mod server;

use std::sync::Arc;

use config::AuthConfig;
use db::traits::{DeliveryRepository, UserRepository};
use delivery_log::DeliveryLogManager;
use sqlx::SqlitePool;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// ユーザーRepository
    pub users: Arc<dyn UserRepository>,
    /// 配送・配送ログRepository
    pub deliveries: Arc<dyn DeliveryRepository>,
    /// 認証設定
    pub auth: AuthConfig,
}

impl AppState {
    /// SQLiteプールから状態を構築
    pub fn from_pool(pool: SqlitePool, auth: AuthConfig) -> Self {
        Self {
            users: Arc::new(pool.clone()),
            deliveries: Arc::new(pool),
            auth,
        }
    }

    /// 配送ログマネージャーを取得
    pub fn delivery_log_manager(&self) -> DeliveryLogManager {
        DeliveryLogManager::new(self.deliveries.clone())
    }
}
