//! Repository traitパターン定義
//!
//! DB操作を抽象化し、ドメインロジックをDBなしでテストできるようにする。
//! 各traitは既存のフリー関数に対応する。

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::common::auth::{User, UserRole};
use crate::common::delivery::{
    Delivery, DeliveryDetails, DeliveryLog, DeliveryStatus, DeliverySummary,
};
use crate::common::error::ServiceError;

// ---------------------------------------------------------------------------
// UserRepository
// ---------------------------------------------------------------------------

/// ユーザー操作のRepository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを作成（メールアドレス重複はConflict）
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, ServiceError>;
    /// メールアドレスでユーザーを検索
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError>;
    /// IDでユーザーを検索
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ServiceError>;
}

// ---------------------------------------------------------------------------
// DeliveryRepository
// ---------------------------------------------------------------------------

/// 配送・配送ログ操作のRepository trait
#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    /// 配送を作成
    async fn create_delivery(
        &self,
        user_id: Uuid,
        description: &str,
    ) -> Result<Delivery, ServiceError>;
    /// IDで配送を取得
    async fn find_delivery(&self, id: Uuid) -> Result<Option<Delivery>, ServiceError>;
    /// 所有者とログを含む配送詳細を取得
    async fn find_delivery_details(&self, id: Uuid)
        -> Result<Option<DeliveryDetails>, ServiceError>;
    /// 全配送を所有者の概要付きで取得
    async fn list_deliveries(&self) -> Result<Vec<DeliverySummary>, ServiceError>;
    /// ステータスを更新し変更ログを追記
    async fn update_status(
        &self,
        id: Uuid,
        status: DeliveryStatus,
    ) -> Result<Option<Delivery>, ServiceError>;
    /// 配送ログを追記
    async fn append_log(
        &self,
        delivery_id: Uuid,
        description: &str,
    ) -> Result<DeliveryLog, ServiceError>;
}

// ---------------------------------------------------------------------------
// SqlitePool implementations
// ---------------------------------------------------------------------------

#[async_trait]
impl UserRepository for SqlitePool {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, ServiceError> {
        super::users::create(self, name, email, password_hash, role).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        super::users::find_by_email(self, email).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        super::users::find_by_id(self, id).await
    }
}

#[async_trait]
impl DeliveryRepository for SqlitePool {
    async fn create_delivery(
        &self,
        user_id: Uuid,
        description: &str,
    ) -> Result<Delivery, ServiceError> {
        super::deliveries::create(self, user_id, description).await
    }

    async fn find_delivery(&self, id: Uuid) -> Result<Option<Delivery>, ServiceError> {
        super::deliveries::find_by_id(self, id).await
    }

    async fn find_delivery_details(
        &self,
        id: Uuid,
    ) -> Result<Option<DeliveryDetails>, ServiceError> {
        super::deliveries::find_details(self, id).await
    }

    async fn list_deliveries(&self) -> Result<Vec<DeliverySummary>, ServiceError> {
        super::deliveries::list_with_owner(self).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: DeliveryStatus,
    ) -> Result<Option<Delivery>, ServiceError> {
        super::deliveries::update_status(self, id, status).await
    }

    async fn append_log(
        &self,
        delivery_id: Uuid,
        description: &str,
    ) -> Result<DeliveryLog, ServiceError> {
        super::delivery_logs::create(self, delivery_id, description).await
    }
}

// ===========================================================================
// Mock
// ===========================================================================


// ===========================================================================
// Tests
// ===========================================================================
