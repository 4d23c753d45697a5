//! launchspec-core
//!
//! Client-side App model and form bindings for a task scheduler.
//!
//! # モジュール構成
//! - **domain**: 属性、バリデーション、イベント、タスク
//! - **ports**: 抽象化レイヤー（AppStore, IdGenerator, Clock）
//! - **model**: AppModel とその builder、observer 登録
//! - **app**: AppCollection（save / fetch / load）
//! - **impls**: 実装（InMemoryAppStore など開発用）
//! - **view**: FormGroup / AppForm と HTML 出力

pub mod domain;
pub mod ports;
pub mod model;
pub mod app;
pub mod impls;
pub mod view;
