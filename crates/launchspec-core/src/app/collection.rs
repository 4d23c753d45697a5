//! AppCollection - モデルと保存先をつなぐ
//!
//! # 役割
//! - コレクションのメンバーとして AppModel を生成（persisted = true で開始）
//! - save / fetch を AppStore に委譲し、成功したら同期完了を通知
//!
//! # 借用について
//! リクエスト中は `RefCell` の借用を保持しない。保存待ちの間も
//! フォームからの編集はそのまま受け付ける。

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{AppDefaults, ModelError, ValidationError};
use crate::model::{AppModel, AppModelBuilder, BuildError, SharedModel};
use crate::ports::{AppStore, IdGenerator, StoreError};

/// SyncError は save / fetch のエラー
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Client-side validation failed; nothing was sent.
    #[error("app is invalid, not sent: {} error(s)", .0.len())]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The server's reply could not be merged into the model.
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

pub struct AppCollection {
    store: Arc<dyn AppStore>,
    id_generator: Arc<dyn IdGenerator>,
    defaults: AppDefaults,
}

impl AppCollection {
    pub fn new(store: Arc<dyn AppStore>, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            id_generator,
            defaults: AppDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: AppDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Builder for a model that is not (yet) part of this collection.
    pub fn builder(&self) -> AppModelBuilder {
        AppModelBuilder::new(self.id_generator.clone()).defaults(self.defaults.clone())
    }

    /// A model that already belongs to this collection, hence persisted.
    pub fn member(&self, attributes: Value) -> Result<AppModel, BuildError> {
        self.builder().overrides(attributes)?.in_collection(true).build()
    }

    /// Write the model to the store.
    ///
    /// The current attributes are validated first; an invalid model is
    /// rejected without contacting the store. On success the attributes
    /// returned by the store go through the model's validated set path,
    /// then the sync signal fires.
    pub async fn save(&self, model: &SharedModel) -> Result<(), SyncError> {
        let (attributes, is_new) = {
            let mut m = model.borrow_mut();
            if !m.is_valid() {
                let errors = m.validation_error().map(<[_]>::to_vec).unwrap_or_default();
                warn!(app_id = m.id().unwrap_or_default(), "not saving invalid app");
                return Err(SyncError::Invalid(errors));
            }
            (m.attributes().clone(), m.is_new())
        };

        let server = self.store.save(&attributes, is_new).await?;

        let mut m = model.borrow_mut();
        m.set_many(server)?;
        m.handle_sync();
        debug!(app_id = m.id().unwrap_or_default(), is_new, "saved app");
        Ok(())
    }

    /// Refresh the model from the store.
    pub async fn fetch(&self, model: &SharedModel) -> Result<(), SyncError> {
        let id = model.borrow().id().unwrap_or_default().to_string();
        let attributes = self.store.fetch(&id).await?;

        let mut m = model.borrow_mut();
        m.set_many(attributes)?;
        m.handle_sync();
        Ok(())
    }

    /// Load an App by id as a member of this collection.
    pub async fn load(&self, id: &str) -> Result<AppModel, SyncError> {
        let attributes = self.store.fetch(id).await?;
        Ok(self.member(Value::from(attributes))?)
    }
}
