//! Ports - 抽象化レイヤー
//!
//! AppModel が外部に依存する部分（保存先、ID 生成、時刻）を trait として
//! 定義する。テストでは決定的な実装に差し替える。

pub mod app_store;
pub mod clock;
pub mod id_generator;

// 主要な trait を再エクスポート
pub use self::app_store::{AppStore, StoreError};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, SequentialIdGenerator, UlidGenerator};
