//! App - アプリケーション層
//!
//! モデルと保存先（AppStore）のつなぎ込み。

pub mod collection;

pub use self::collection::{AppCollection, SyncError};
