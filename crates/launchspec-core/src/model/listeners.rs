//! Listeners - AppModel のイベント購読
//!
//! ハンドラはモデル本体ではなく `ModelState`（persisted フラグと
//! TaskCollection）だけを受け取る。そのため発行中にモデルへ再入できず、
//! 借用も衝突しない。
//!
//! 構築時に登録される組み込みハンドラ:
//! - `rescope_tasks`: `id` の変更を TaskCollection のスコープキーに反映
//! - `mark_persisted`: 同期完了で `persisted = true`（元には戻らない）

use serde_json::Value;
use tracing::debug;

use crate::domain::{AppEvent, EventKind, TaskCollection};

/// State that event handlers are allowed to touch.
#[derive(Debug, Default)]
pub struct ModelState {
    pub persisted: bool,
    pub tasks: TaskCollection,
}

pub type Handler = Box<dyn FnMut(&mut ModelState, &AppEvent)>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    handler: Handler,
}

/// Registered handlers, called in registration order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, kind, handler });
        id
    }

    /// Returns false when the id was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn emit(&mut self, state: &mut ModelState, event: &AppEvent) {
        for subscription in self
            .subscriptions
            .iter_mut()
            .filter(|s| s.kind.matches(event))
        {
            (subscription.handler)(state, event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

/// Point the task sub-collection at the App's new id.
pub fn rescope_tasks(state: &mut ModelState, event: &AppEvent) {
    if let AppEvent::Changed {
        attribute, current, ..
    } = event
        && attribute == "id"
    {
        let app_id = scope_key(current);
        debug!(from = %state.tasks.app_id(), to = %app_id, "rescoping tasks");
        state.tasks.options.app_id = app_id;
    }
}

/// Remember that the App exists in the backing store.
pub fn mark_persisted(state: &mut ModelState, event: &AppEvent) {
    if matches!(event, AppEvent::Synced) {
        state.persisted = true;
    }
}

/// Scoping key for an id value. Construction does not validate, so the
/// initial id can be any JSON value.
pub(crate) fn scope_key(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
