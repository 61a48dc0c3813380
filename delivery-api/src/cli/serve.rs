//! serve サブコマンド
//!
//! APIサーバーを起動します。

use clap::Args;

use crate::config::{get_env_with_fallback_or, get_env_with_fallback_parse};

/// デフォルトの待ち受けポート
pub const DEFAULT_PORT: u16 = 3333;

/// デフォルトのバインドアドレス
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port [env: DELIVERY_API_PORT, legacy PORT] [default: 3333]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address [env: DELIVERY_API_HOST, legacy HOST] [default: 0.0.0.0]
    #[arg(short = 'H', long)]
    pub host: Option<String>,
}

impl ServeArgs {
    /// 引数と環境変数からバインドアドレスを決定
    ///
    /// 優先順位: コマンドライン引数 > 環境変数 > 旧環境変数 > デフォルト
    pub fn bind_addr(&self) -> String {
        let host = self
            .host
            .clone()
            .unwrap_or_else(|| get_env_with_fallback_or("DELIVERY_API_HOST", "HOST", DEFAULT_HOST));
        let port = self.port.unwrap_or_else(|| {
            get_env_with_fallback_parse("DELIVERY_API_PORT", "PORT", DEFAULT_PORT)
        });
        format!("{}:{}", host, port)
    }
}
