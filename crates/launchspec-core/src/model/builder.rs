//! AppModelBuilder - AppModel の構築
//!
//! # 構築手順
//! 1. デフォルト値（`AppDefaults`）
//! 2. 呼び出し側の上書き値をマージ
//! 3. `id` がなければ IdGenerator から生成
//! 4. コレクションに属するなら `persisted = true` で開始
//!
//! 構築時にはバリデーションしない（フォームは未入力の状態から始まるため）。

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{AppDefaults, AppSpec, Attributes, ModelError};
use crate::ports::IdGenerator;

use super::app::AppModel;

/// BuildError は AppModel 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid overrides: {0}")]
    Overrides(#[source] ModelError),

    #[error("invalid defaults: {0}")]
    Defaults(#[source] ModelError),
}

/// AppModelBuilder は AppModel を構築
///
/// # 使用例
/// ```ignore
/// let model = AppModelBuilder::new(ids)
///     .overrides(json!({ "id": "web", "cmd": "sleep 100" }))?
///     .build()?;
/// ```
pub struct AppModelBuilder {
    id_generator: Arc<dyn IdGenerator>,
    defaults: AppDefaults,
    overrides: Attributes,
    in_collection: bool,
}

impl AppModelBuilder {
    pub fn new(id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            id_generator,
            defaults: AppDefaults::default(),
            overrides: Attributes::new(),
            in_collection: false,
        }
    }

    /// Replace the default attribute values.
    pub fn defaults(mut self, defaults: AppDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Lay a JSON object of caller values over the defaults.
    pub fn overrides(mut self, overrides: Value) -> Result<Self, BuildError> {
        let overrides = Attributes::try_from(overrides).map_err(BuildError::Overrides)?;
        self.overrides = self.overrides.merged(&overrides);
        Ok(self)
    }

    /// Start from a typed spec.
    pub fn spec(mut self, spec: &AppSpec) -> Result<Self, BuildError> {
        let overrides = spec.to_attributes().map_err(BuildError::Overrides)?;
        self.overrides = self.overrides.merged(&overrides);
        Ok(self)
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key, value.into());
        self
    }

    /// Mark the model as a member of a collection, i.e. already persisted.
    pub fn in_collection(mut self, in_collection: bool) -> Self {
        self.in_collection = in_collection;
        self
    }

    pub fn build(self) -> Result<AppModel, BuildError> {
        let mut attributes = self
            .defaults
            .to_attributes()
            .map_err(BuildError::Defaults)?
            .merged(&self.overrides);

        if !attributes.contains_key("id") {
            let id = self.id_generator.generate_app_id();
            attributes.insert("id", Value::String(id.into_string()));
        }

        Ok(AppModel::from_parts(attributes, self.in_collection))
    }
}
