//! Events - AppModel が発行するイベント
//!
//! 購読者は `EventKind` で関心のあるイベントを選ぶ。

use serde_json::Value;

use super::validation::ValidationError;

/// AppEvent は AppModel で発生したイベント
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// An attribute was committed with a value different from before.
    Changed {
        attribute: String,
        previous: Option<Value>,
        current: Value,
    },

    /// A set was rejected; carries the errors now stored on the model.
    Invalid(Vec<ValidationError>),

    /// The backing store acknowledged a write or a fetch.
    Synced,
}

/// Which events a subscription receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Every event.
    All,
    /// Any committed attribute change.
    Change,
    /// Committed changes of one attribute.
    ChangeOf(String),
    Invalid,
    Sync,
}

impl EventKind {
    pub fn change_of(attribute: impl Into<String>) -> Self {
        EventKind::ChangeOf(attribute.into())
    }

    pub fn matches(&self, event: &AppEvent) -> bool {
        match (self, event) {
            (EventKind::All, _) => true,
            (EventKind::Change, AppEvent::Changed { .. }) => true,
            (EventKind::ChangeOf(want), AppEvent::Changed { attribute, .. }) => want == attribute,
            (EventKind::Invalid, AppEvent::Invalid(_)) => true,
            (EventKind::Sync, AppEvent::Synced) => true,
            _ => false,
        }
    }
}
