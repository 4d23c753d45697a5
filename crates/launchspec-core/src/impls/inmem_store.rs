//! InMemoryAppStore - 開発用の App 保存先
//!
//! # 学習ポイント
//! - tokio::sync::Mutex による async 排他制御
//! - サーバー側で計算される属性（tasksRunning / tasksStaged）の再現

use std::collections::HashMap;

use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{Attributes, READ_ONLY_ATTRIBUTES};
use crate::ports::{AppStore, StoreError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TaskCounts {
    running: u64,
    staged: u64,
}

#[derive(Debug, Clone)]
struct StoredApp {
    attributes: Attributes,
    counts: TaskCounts,
}

/// InMemoryAppStore は開発用の AppStore
///
/// # 実装詳細
/// - HashMap<String, StoredApp> で id ごとに保存
/// - クライアントが送ってきた読み取り専用属性は無視し、
///   保存側のタスク数で上書きする
#[derive(Debug, Default)]
pub struct InMemoryAppStore {
    apps: Mutex<HashMap<String, StoredApp>>,
}

impl InMemoryAppStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the scheduler reporting task counts for an App.
    pub async fn set_task_counts(
        &self,
        id: &str,
        running: u64,
        staged: u64,
    ) -> Result<(), StoreError> {
        let mut apps = self.apps.lock().await;
        let app = apps
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        app.counts = TaskCounts { running, staged };
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.apps.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.apps.lock().await.is_empty()
    }
}

fn app_id(attributes: &Attributes) -> Result<String, StoreError> {
    attributes
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| StoreError::OperationFailed("app has no id".to_string()))
}

fn server_attributes(counts: TaskCounts) -> Attributes {
    let mut attrs = Attributes::new();
    attrs.insert(READ_ONLY_ATTRIBUTES[0], json!(counts.running));
    attrs.insert(READ_ONLY_ATTRIBUTES[1], json!(counts.staged));
    attrs
}

#[async_trait::async_trait]
impl AppStore for InMemoryAppStore {
    async fn save(&self, attributes: &Attributes, is_new: bool) -> Result<Attributes, StoreError> {
        let id = app_id(attributes)?;
        let mut apps = self.apps.lock().await;

        if is_new && apps.contains_key(&id) {
            return Err(StoreError::AlreadyExists(id));
        }

        let counts = apps.get(&id).map(|app| app.counts).unwrap_or_default();
        let stored = StoredApp {
            attributes: attributes.without_read_only(),
            counts,
        };
        apps.insert(id.clone(), stored);

        if is_new {
            info!(app_id = %id, "created app");
        } else {
            debug!(app_id = %id, "updated app");
        }
        Ok(server_attributes(counts))
    }

    async fn fetch(&self, id: &str) -> Result<Attributes, StoreError> {
        let apps = self.apps.lock().await;
        let app = apps
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(app.attributes.merged(&server_attributes(app.counts)))
    }
}
