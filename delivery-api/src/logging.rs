//! ロギング初期化
//!
//! `DELIVERY_API_LOG_LEVEL`（未設定なら`RUST_LOG`、どちらもなければ`info`）で
//! フィルタを決め、標準出力に出力する。`DELIVERY_API_LOG_DIR`が設定されていれば
//! 日次ローテーションのファイル出力を追加する。

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::common::error::CommonError;

/// ログファイル名のプレフィックス
pub const LOG_FILE_PREFIX: &str = "delivery-api.log";

const DEFAULT_LOG_LEVEL: &str = "info";

// ファイル出力のワーカーはプロセス終了まで保持する
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// フィルタ指定を環境変数から決定
pub fn filter_directive() -> String {
    std::env::var("DELIVERY_API_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// ログ出力先ディレクトリ（未設定ならファイル出力なし）
pub fn log_dir() -> Option<PathBuf> {
    std::env::var("DELIVERY_API_LOG_DIR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// グローバルsubscriberを初期化
pub fn init() -> Result<(), CommonError> {
    let directive = filter_directive();
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!(
            "Invalid log filter '{}': {}; falling back to '{}'",
            directive, e, DEFAULT_LOG_LEVEL
        );
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    });

    let file_layer = match log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir).map_err(|e| {
                CommonError::Config(format!(
                    "Failed to create log directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().with_writer(writer).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| CommonError::Config(format!("Failed to initialize logging: {}", e)))
}
