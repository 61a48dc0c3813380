// 配送ログの追記・取得

use crate::common::delivery::DeliveryLog;
use crate::common::error::{CommonError, ServiceError};
use chrono::Utc;
use sqlx::{Sqlite, SqlitePool};
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp};

/// 配送ログを追記
///
/// ステータスによる追記可否の判定は呼び出し側（`delivery_log`）の責務。
pub async fn create(
    pool: &SqlitePool,
    delivery_id: Uuid,
    description: &str,
) -> Result<DeliveryLog, ServiceError> {
    insert_with(pool, delivery_id, description).await
}

/// 任意のExecutor（プール・トランザクション）上で配送ログを追記
pub(crate) async fn insert_with<'e, E>(
    executor: E,
    delivery_id: Uuid,
    description: &str,
) -> Result<DeliveryLog, ServiceError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO delivery_logs (id, delivery_id, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(delivery_id.to_string())
    .bind(description)
    .bind(format_timestamp(now))
    .bind(format_timestamp(now))
    .execute(executor)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to create delivery log: {}", e)))?;

    Ok(DeliveryLog {
        id,
        delivery_id,
        description: description.to_string(),
        created_at: now,
        updated_at: now,
    })
}

/// 配送のログを挿入順で取得
pub async fn list_by_delivery(
    pool: &SqlitePool,
    delivery_id: Uuid,
) -> Result<Vec<DeliveryLog>, ServiceError> {
    let rows = sqlx::query_as::<_, DeliveryLogRow>(
        "SELECT id, delivery_id, description, created_at, updated_at FROM delivery_logs
         WHERE delivery_id = ? ORDER BY rowid ASC",
    )
    .bind(delivery_id.to_string())
    .fetch_all(pool)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to list delivery logs: {}", e)))?;

    rows.into_iter()
        .map(DeliveryLogRow::into_log)
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// 配送のログ件数を取得
pub async fn count_by_delivery(pool: &SqlitePool, delivery_id: Uuid) -> Result<i64, ServiceError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM delivery_logs WHERE delivery_id = ?")
        .bind(delivery_id.to_string())
        .fetch_one(pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to count delivery logs: {}", e)))
}

#[derive(sqlx::FromRow)]
struct DeliveryLogRow {
    id: String,
    delivery_id: String,
    description: String,
    created_at: String,
    updated_at: String,
}

impl DeliveryLogRow {
    fn into_log(self) -> Result<DeliveryLog, CommonError> {
        Ok(DeliveryLog {
            id: Uuid::parse_str(&self.id)?,
            delivery_id: Uuid::parse_str(&self.delivery_id)?,
            description: self.description,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}
