//! AppModel: one schedulable application as edited in the UI.
//!
//! Design:
//! - Attributes live in a JSON object so inputs can write anything and
//!   validation sees exactly what was written.
//! - Every write goes through `set_many`, which validates the merged
//!   candidate first and either commits or rejects as a whole.
//! - Persistence state and the task sub-collection are updated only by
//!   event handlers registered at construction.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use tracing::debug;

use crate::domain::{
    AppEvent, AppSpec, Attributes, EventKind, ModelError, TaskCollection, TaskCollectionOptions,
    ValidationError, validate,
};

use super::listeners::{
    Handler, Listeners, ModelState, SubscriptionId, mark_persisted, rescope_tasks, scope_key,
};

/// An AppModel shared by the views of one form.
pub type SharedModel = Rc<RefCell<AppModel>>;

/// Pretty-print indentation never exceeds ten spaces.
const MAX_INDENT: usize = 10;

#[derive(Debug)]
pub struct AppModel {
    attributes: Attributes,
    validation_error: Option<Vec<ValidationError>>,
    state: ModelState,
    listeners: Listeners,
}

impl AppModel {
    /// Assemble a model from already-merged attributes. Use
    /// `AppModelBuilder` for defaults and id generation.
    pub(crate) fn from_parts(attributes: Attributes, in_collection: bool) -> Self {
        let app_id = attributes.get("id").map(scope_key).unwrap_or_default();
        let mut model = Self {
            attributes,
            validation_error: None,
            state: ModelState {
                persisted: in_collection,
                tasks: TaskCollection::new(TaskCollectionOptions { app_id }),
            },
            listeners: Listeners::new(),
        };
        model
            .listeners
            .subscribe(EventKind::change_of("id"), Box::new(rescope_tasks));
        model
            .listeners
            .subscribe(EventKind::Sync, Box::new(mark_persisted));
        model
    }

    /// Wrap for sharing between the views of a form.
    pub fn into_shared(self) -> SharedModel {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Errors of the last rejected set, `None` after a successful one.
    pub fn validation_error(&self) -> Option<&[ValidationError]> {
        self.validation_error.as_deref()
    }

    /// True until the first successful sync, unless the model was created
    /// as a member of a collection.
    pub fn is_new(&self) -> bool {
        !self.state.persisted
    }

    pub fn tasks(&self) -> &TaskCollection {
        &self.state.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskCollection {
        &mut self.state.tasks
    }

    /// Validation rules for a full candidate attribute set.
    pub fn validate(attrs: &Attributes) -> Option<Vec<ValidationError>> {
        validate(attrs)
    }

    /// Validate the current attributes and record the outcome.
    pub fn is_valid(&mut self) -> bool {
        self.validation_error = validate(&self.attributes);
        self.validation_error.is_none()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        let mut changes = Attributes::new();
        changes.insert(key, value.into());
        self.set_many(changes)
    }

    /// Commit `changes` if the merged attributes pass validation.
    ///
    /// On rejection nothing is written, `validation_error` holds the
    /// failures and an `Invalid` event is emitted. On success
    /// `validation_error` is cleared and a `Changed` event is emitted for
    /// each attribute whose value actually changed.
    pub fn set_many(&mut self, changes: Attributes) -> Result<(), ModelError> {
        let candidate = self.attributes.merged(&changes);
        if let Some(errors) = validate(&candidate) {
            debug!(
                app_id = self.id().unwrap_or_default(),
                errors = errors.len(),
                "rejected attribute change"
            );
            self.validation_error = Some(errors.clone());
            self.emit(AppEvent::Invalid(errors.clone()));
            return Err(ModelError::Invalid(errors));
        }
        self.validation_error = None;

        let mut events = Vec::new();
        for (attribute, current) in changes {
            let previous = self.attributes.insert(attribute.clone(), current.clone());
            if previous.as_ref() != Some(&current) {
                events.push(AppEvent::Changed {
                    attribute,
                    previous,
                    current,
                });
            }
        }
        for event in events {
            self.emit(event);
        }
        Ok(())
    }

    /// Completion signal of a successful write or fetch.
    pub fn handle_sync(&mut self) {
        debug!(app_id = self.id().unwrap_or_default(), "synced");
        self.emit(AppEvent::Synced);
    }

    pub fn subscribe(&mut self, kind: EventKind, handler: Handler) -> SubscriptionId {
        self.listeners.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// JSON of every attribute with the read-only keys removed at any depth,
    /// suitable for pasting as a command line argument. `indent`
    /// pretty-prints with that many spaces (capped at ten; zero means
    /// compact).
    pub fn stringify(&self, indent: Option<usize>) -> Result<String, ModelError> {
        let writable = self.attributes.without_read_only();
        match indent.map(|n| n.min(MAX_INDENT)) {
            Some(width) if width > 0 => {
                let pad = " ".repeat(width);
                let mut out = Vec::new();
                let formatter = PrettyFormatter::with_indent(pad.as_bytes());
                let mut ser = Serializer::with_formatter(&mut out, formatter);
                writable.serialize(&mut ser)?;
                Ok(String::from_utf8(out)?)
            }
            _ => Ok(serde_json::to_string(&writable)?),
        }
    }

    /// Every attribute, read-only ones included.
    pub fn to_json(&self) -> Value {
        Value::from(self.attributes.clone())
    }

    pub fn to_spec(&self) -> Result<AppSpec, ModelError> {
        AppSpec::from_attributes(&self.attributes)
    }

    fn emit(&mut self, event: AppEvent) {
        self.listeners.emit(&mut self.state, &event);
    }
}
