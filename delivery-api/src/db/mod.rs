//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// ユーザー管理
pub mod users;

/// 配送管理
pub mod deliveries;

/// 配送ログ（追記のみ）
pub mod delivery_logs;

/// データベース初期化・マイグレーション
pub mod migrations;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;

use crate::common::error::CommonError;
use chrono::{DateTime, SecondsFormat, Utc};

/// タイムスタンプを保存用文字列に変換
///
/// 桁数を固定して文字列比較の順序と時系列順序を一致させる。
pub(crate) fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 保存用文字列からタイムスタンプを復元
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, CommonError> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

/// 一意制約違反か
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}
