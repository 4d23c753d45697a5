//! view - App 編集フォームの描画
//!
//! - **node**: 仮想ノードと HTML 出力
//! - **input**: input / textarea 記述子と change イベント
//! - **form_group**: 1 属性分の入力欄（FormGroup）
//! - **form**: FormGroup を並べた AppForm
//! - **style**: クラス名の設定

pub mod form;
pub mod form_group;
pub mod input;
pub mod node;
pub mod style;

pub use form::AppForm;
pub use form_group::{FormGroup, View};
pub use input::{Binding, Callback, EventTarget, InputElement, InputEvent, InputKind, InputProps};
pub use node::{Element, Node};
pub use style::FormStyle;
