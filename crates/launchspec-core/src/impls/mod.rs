//! Impls - 開発・テスト用の実装
//!
//! # 実装一覧
//! - **InMemoryAppStore**: プロセス内の HashMap に保存する AppStore

pub mod inmem_store;

pub use self::inmem_store::InMemoryAppStore;
