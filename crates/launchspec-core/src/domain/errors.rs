//! Errors - モデル操作のエラー型
//!
//! バリデーション失敗は例外ではなくデータとして扱う。`AppModel` に
//! `validation_error` として保存され、`set` の戻り値でも返される。

use thiserror::Error;

use super::validation::ValidationError;

/// AppModel の操作エラー
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation failed: {}", describe(.0))]
    Invalid(Vec<ValidationError>),

    #[error("attributes must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("serialized output was not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl ModelError {
    /// Validation errors carried by this error, if it is a rejection.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            ModelError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// JSON 値の型名（エラーメッセージ用）
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_error() {
        let err = ModelError::Invalid(vec![
            ValidationError::new("mem", "m1"),
            ValidationError::new("cpus", "m2"),
        ]);
        assert_eq!(err.to_string(), "validation failed: mem: m1; cpus: m2");
        assert_eq!(err.validation_errors().map(<[_]>::len), Some(2));
    }

    #[test]
    fn not_an_object_names_the_kind() {
        let err = ModelError::NotAnObject(kind_of(&serde_json::json!([1, 2])));
        assert_eq!(err.to_string(), "attributes must be a JSON object, got array");
        assert!(err.validation_errors().is_none());
    }
}
