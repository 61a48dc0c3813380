// 配送CRUD操作

use crate::common::delivery::{
    Delivery, DeliveryDetails, DeliveryStatus, DeliverySummary, OwnerSummary,
};
use crate::common::error::{CommonError, ServiceError};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp};

const DELIVERY_COLUMNS: &str = "id, user_id, description, status, created_at, updated_at";

/// 配送を作成（初期ステータスは`processing`）
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `user_id` - 所有者のユーザーID
/// * `description` - 内容
pub async fn create(
    pool: &SqlitePool,
    user_id: Uuid,
    description: &str,
) -> Result<Delivery, ServiceError> {
    let delivery = Delivery {
        id: Uuid::new_v4(),
        user_id,
        description: description.to_string(),
        status: DeliveryStatus::default(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    sqlx::query(
        "INSERT INTO deliveries (id, user_id, description, status, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(delivery.id.to_string())
    .bind(delivery.user_id.to_string())
    .bind(&delivery.description)
    .bind(delivery.status.as_str())
    .bind(format_timestamp(delivery.created_at))
    .bind(format_timestamp(delivery.updated_at))
    .execute(pool)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to create delivery: {}", e)))?;

    Ok(delivery)
}

/// IDで配送を取得
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Delivery>, ServiceError> {
    let row = sqlx::query_as::<_, DeliveryRow>(&format!(
        "SELECT {} FROM deliveries WHERE id = ?",
        DELIVERY_COLUMNS
    ))
    .bind(id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to find delivery: {}", e)))?;

    row.map(DeliveryRow::into_delivery)
        .transpose()
        .map_err(Into::into)
}

/// 所有者とログを含む配送詳細を取得
///
/// 配送が存在しない場合は`Ok(None)`。
pub async fn find_details(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<DeliveryDetails>, ServiceError> {
    let Some(delivery) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let user = super::users::find_by_id(pool, delivery.user_id)
        .await?
        .ok_or_else(|| {
            ServiceError::Internal(format!(
                "Owner {} of delivery {} is missing",
                delivery.user_id, delivery.id
            ))
        })?;
    let logs = super::delivery_logs::list_by_delivery(pool, delivery.id).await?;

    Ok(Some(DeliveryDetails {
        delivery,
        user: user.into(),
        logs,
    }))
}

/// 全配送を所有者の概要付きで取得（新しい順）
pub async fn list_with_owner(pool: &SqlitePool) -> Result<Vec<DeliverySummary>, ServiceError> {
    let rows = sqlx::query_as::<_, DeliverySummaryRow>(
        "SELECT d.id, d.user_id, d.description, d.status, d.created_at, d.updated_at,
                u.name AS owner_name, u.email AS owner_email
         FROM deliveries d
         JOIN users u ON u.id = d.user_id
         ORDER BY d.created_at DESC, d.rowid DESC",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to list deliveries: {}", e)))?;

    rows.into_iter()
        .map(DeliverySummaryRow::into_summary)
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// 配送ステータスを更新し、変更ログを同一トランザクションで追記
///
/// # Returns
/// * `Ok(Some(Delivery))` - 更新後の配送
/// * `Ok(None)` - 配送が存在しない
pub async fn update_status(
    pool: &SqlitePool,
    id: Uuid,
    status: DeliveryStatus,
) -> Result<Option<Delivery>, ServiceError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to begin transaction: {}", e)))?;

    let result = sqlx::query("UPDATE deliveries SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(format_timestamp(Utc::now()))
        .bind(id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to update delivery: {}", e)))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    super::delivery_logs::insert_with(&mut *tx, id, &status_change_description(status)).await?;

    let row = sqlx::query_as::<_, DeliveryRow>(&format!(
        "SELECT {} FROM deliveries WHERE id = ?",
        DELIVERY_COLUMNS
    ))
    .bind(id.to_string())
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to reload delivery: {}", e)))?;

    tx.commit()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to commit transaction: {}", e)))?;

    Ok(Some(row.into_delivery()?))
}

/// ステータス変更時に自動追記するログ本文
pub fn status_change_description(status: DeliveryStatus) -> String {
    format!("status changed to {}", status)
}

#[derive(sqlx::FromRow)]
struct DeliveryRow {
    id: String,
    user_id: String,
    description: String,
    status: String,
    created_at: String,
    updated_at: String,
}

impl DeliveryRow {
    fn into_delivery(self) -> Result<Delivery, CommonError> {
        Ok(Delivery {
            id: Uuid::parse_str(&self.id)?,
            user_id: Uuid::parse_str(&self.user_id)?,
            description: self.description,
            status: self.status.parse()?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DeliverySummaryRow {
    #[sqlx(flatten)]
    delivery: DeliveryRow,
    owner_name: String,
    owner_email: String,
}

impl DeliverySummaryRow {
    fn into_summary(self) -> Result<DeliverySummary, CommonError> {
        Ok(DeliverySummary {
            delivery: self.delivery.into_delivery()?,
            user: OwnerSummary {
                name: self.owner_name,
                email: self.owner_email,
            },
        })
    }
}
