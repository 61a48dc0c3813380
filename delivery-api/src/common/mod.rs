//! 共通型定義
//!
//! ドメインモデルとエラー型

/// 認証関連のデータモデル（ユーザー、ロール、JWTクレーム）
pub mod auth;

/// 配送・配送ログのデータモデル
pub mod delivery;

/// エラー型
pub mod error;
