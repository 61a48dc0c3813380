// 配送・配送ログのデータモデル

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::auth::PublicUser;
use super::error::CommonError;

/// 配送ステータス
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// 受付待ち
    Pending,
    /// 処理中（作成直後の状態）
    #[default]
    Processing,
    /// 発送済み
    Shipped,
    /// 配達完了
    Delivered,
}

impl DeliveryStatus {
    /// すべてのステータス
    pub const ALL: [DeliveryStatus; 4] = [
        DeliveryStatus::Pending,
        DeliveryStatus::Processing,
        DeliveryStatus::Shipped,
        DeliveryStatus::Delivered,
    ];

    /// DB・APIで使う文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Processing => "processing",
            DeliveryStatus::Shipped => "shipped",
            DeliveryStatus::Delivered => "delivered",
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeliveryStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CommonError::UnknownVariant {
                kind: "delivery status",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 配送
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    /// 配送ID
    pub id: Uuid,
    /// 所有者のユーザーID
    pub user_id: Uuid,
    /// 内容
    pub description: String,
    /// ステータス
    pub status: DeliveryStatus,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 更新日時
    pub updated_at: DateTime<Utc>,
}

/// 配送ログ（追記のみ）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryLog {
    /// ログID
    pub id: Uuid,
    /// 配送ID
    pub delivery_id: Uuid,
    /// 記録内容
    pub description: String,
    /// 作成日時（表示順のキー）
    pub created_at: DateTime<Utc>,
    /// 更新日時
    pub updated_at: DateTime<Utc>,
}

/// 所有者とログを含む配送詳細
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryDetails {
    /// 配送本体
    #[serde(flatten)]
    pub delivery: Delivery,
    /// 所有者
    pub user: PublicUser,
    /// ログ（挿入順）
    pub logs: Vec<DeliveryLog>,
}

/// 一覧表示用の所有者情報
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerSummary {
    /// 氏名
    pub name: String,
    /// メールアドレス
    pub email: String,
}

/// 一覧表示用の配送
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliverySummary {
    /// 配送本体
    #[serde(flatten)]
    pub delivery: Delivery,
    /// 所有者
    pub user: OwnerSummary,
}
