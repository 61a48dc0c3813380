//! 配送ログマネージャー
//!
//! 配送ステータスに応じたログ追記の可否判定と、
//! 呼び出し元ロールに応じた配送詳細の閲覧制御を行う。

use std::sync::Arc;

use uuid::Uuid;

use crate::common::auth::Caller;
use crate::common::delivery::{DeliveryDetails, DeliveryLog, DeliveryStatus};
use crate::common::error::{ServiceError, ServiceResult};
use crate::db::traits::DeliveryRepository;

/// 配送が見つからない場合のメッセージ
pub const DELIVERY_NOT_FOUND_MESSAGE: &str = "delivery not found";

/// 他人の配送を閲覧しようとした場合のメッセージ
pub const FORBIDDEN_VIEW_MESSAGE: &str = "the user can only view their deliveries";

/// ログ追記の判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogAppendDecision {
    /// 追記可能
    Allow,
    /// 追記不可
    Deny(LogAppendDenial),
}

/// ログ追記を拒否する理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogAppendDenial {
    /// 配達完了済み
    AlreadyDelivered,
    /// まだ発送されていない
    AwaitingShipment,
}

impl LogAppendDenial {
    /// クライアントに返すメッセージ
    pub fn message(&self) -> &'static str {
        match self {
            LogAppendDenial::AlreadyDelivered => "this order has already been delivered",
            LogAppendDenial::AwaitingShipment => "change status to shipped",
        }
    }
}

impl From<LogAppendDenial> for ServiceError {
    fn from(denial: LogAppendDenial) -> Self {
        ServiceError::Conflict(denial.message().to_string())
    }
}

/// 現在のステータスでログを追記できるか判定する
pub fn can_append_log(status: DeliveryStatus) -> LogAppendDecision {
    match status {
        DeliveryStatus::Delivered => LogAppendDecision::Deny(LogAppendDenial::AlreadyDelivered),
        DeliveryStatus::Processing => LogAppendDecision::Deny(LogAppendDenial::AwaitingShipment),
        DeliveryStatus::Pending | DeliveryStatus::Shipped => LogAppendDecision::Allow,
    }
}

/// 呼び出し元が配送を閲覧できるか
pub fn can_view_delivery(caller: &Caller, owner_id: Uuid) -> bool {
    caller.role.can_view_any_delivery() || caller.id == owner_id
}

/// 配送ログマネージャー
#[derive(Clone)]
pub struct DeliveryLogManager {
    deliveries: Arc<dyn DeliveryRepository>,
}

impl DeliveryLogManager {
    /// Repositoryを指定して作成
    pub fn new(deliveries: Arc<dyn DeliveryRepository>) -> Self {
        Self { deliveries }
    }

    /// 配送ログを追記する
    ///
    /// # Returns
    /// * `Ok(DeliveryLog)` - 追記されたログ
    /// * `Err(ServiceError::NotFound)` - 配送が存在しない
    /// * `Err(ServiceError::Conflict)` - 現在のステータスでは追記できない
    pub async fn create_log(
        &self,
        delivery_id: Uuid,
        description: &str,
    ) -> ServiceResult<DeliveryLog> {
        let delivery = self
            .deliveries
            .find_delivery(delivery_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(DELIVERY_NOT_FOUND_MESSAGE.to_string()))?;

        if let LogAppendDecision::Deny(denial) = can_append_log(delivery.status) {
            tracing::debug!(
                delivery_id = %delivery_id,
                status = %delivery.status,
                "Delivery log append rejected"
            );
            return Err(denial.into());
        }

        let log = self.deliveries.append_log(delivery_id, description).await?;
        tracing::info!(delivery_id = %delivery_id, log_id = %log.id, "Delivery log appended");
        Ok(log)
    }

    /// 配送を所有者・ログ付きで取得する
    ///
    /// 配送が存在しない場合は`Ok(None)`を返し、レスポンス形式は呼び出し側が決める。
    pub async fn show(
        &self,
        caller: &Caller,
        delivery_id: Uuid,
    ) -> ServiceResult<Option<DeliveryDetails>> {
        let Some(details) = self.deliveries.find_delivery_details(delivery_id).await? else {
            return Ok(None);
        };

        if !can_view_delivery(caller, details.delivery.user_id) {
            return Err(ServiceError::Authorization(
                FORBIDDEN_VIEW_MESSAGE.to_string(),
            ));
        }

        Ok(Some(details))
    }
}
