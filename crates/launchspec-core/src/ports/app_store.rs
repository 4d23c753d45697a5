//! AppStore port - App の保存先（API サーバーまたは InMemory）
//!
//! # 設計原則
//! - 書き込みが成功したら、サーバー側で計算された属性
//!   （`tasksRunning` など）を返す。モデルはそれをマージしてから同期完了にする
//! - 新規作成（create）と更新（update）は `is_new` で区別する

use async_trait::async_trait;

use crate::domain::Attributes;

/// StoreError は AppStore の操作エラー
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("app '{0}' not found")]
    NotFound(String),

    #[error("app '{0}' already exists")]
    AlreadyExists(String),

    #[error("store operation failed: {0}")]
    OperationFailed(String),
}

/// AppStore は App の属性を永続化する
#[async_trait]
pub trait AppStore: Send + Sync {
    /// Write an App. Returns the attributes the server computed or changed,
    /// to be merged into the model.
    async fn save(&self, attributes: &Attributes, is_new: bool) -> Result<Attributes, StoreError>;

    /// Read an App by id.
    async fn fetch(&self, id: &str) -> Result<Attributes, StoreError>;
}
