//! axumサーバー起動・シャットダウンハンドリング

use std::future::Future;

use tokio::net::TcpListener;
use tracing::info;

use crate::common::error::ServiceError;
use crate::AppState;

/// アドレスにバインドしてサーバーを起動し、OSシグナルで停止する
pub async fn run(state: AppState, bind_addr: &str) -> Result<(), ServiceError> {
    let listener = TcpListener::bind(bind_addr).await.map_err(|e| {
        ServiceError::Internal(format!("Failed to bind to {}: {}", bind_addr, e))
    })?;
    serve(state, listener, shutdown_signal()).await
}

/// 既存のリスナーでサーバーを起動し、`shutdown`完了で停止する
pub async fn serve<F>(state: AppState, listener: TcpListener, shutdown: F) -> Result<(), ServiceError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener
        .local_addr()
        .map_err(|e| ServiceError::Internal(format!("Failed to read local address: {}", e)))?;
    info!("Delivery API server listening on {}", local_addr);

    let app = crate::api::create_app(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServiceError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
