//! Input-like elements and their change events.
//!
//! An `InputElement` is a descriptor: binding it never mutates the original,
//! `with_binding` returns a new one. That way a form can keep one child
//! descriptor and render it again and again.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use super::node::{escape, write_attributes};

/// Cloneable event handler.
pub struct Callback<E>(Rc<dyn Fn(&E)>);

impl<E> Callback<E> {
    pub fn new(f: impl Fn(&E) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn emit(&self, event: &E) {
        (self.0)(event)
    }
}

impl<E> Clone for Callback<E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<E> fmt::Debug for Callback<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

/// Element that fired a change.
#[derive(Debug, Clone, PartialEq)]
pub struct EventTarget {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub target: EventTarget,
}

impl InputEvent {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            target: EventTarget {
                name: name.into(),
                value: value.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Input,
    Textarea,
}

/// Slots an input-like element exposes.
#[derive(Debug, Clone, Default)]
pub struct InputProps {
    pub class_name: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub value: Option<Value>,
    pub on_change: Option<Callback<InputEvent>>,
    /// Anything else (`type`, `placeholder`, `rows`, ...), written as is.
    pub extra: Vec<(String, String)>,
}

/// Binding attributes injected by a field wrapper.
#[derive(Debug, Clone)]
pub struct Binding {
    pub class_name: String,
    pub id: String,
    pub name: String,
    pub value: Option<Value>,
    pub on_change: Callback<InputEvent>,
}

#[derive(Debug, Clone)]
pub struct InputElement {
    pub kind: InputKind,
    pub props: InputProps,
}

impl InputElement {
    pub fn input() -> Self {
        Self {
            kind: InputKind::Input,
            props: InputProps::default(),
        }
    }

    pub fn textarea() -> Self {
        Self {
            kind: InputKind::Textarea,
            props: InputProps::default(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.extra.push((name.into(), value.into()));
        self
    }

    /// New descriptor with the binding slots overwritten; `extra` is kept.
    pub fn with_binding(&self, binding: Binding) -> Self {
        let mut props = self.props.clone();
        props.class_name = Some(binding.class_name);
        props.id = Some(binding.id);
        props.name = Some(binding.name);
        props.value = binding.value;
        props.on_change = Some(binding.on_change);
        Self {
            kind: self.kind,
            props,
        }
    }

    /// Simulate the user changing the value. Returns false when no change
    /// handler is bound.
    pub fn change(&self, value: impl Into<Value>) -> bool {
        let Some(on_change) = &self.props.on_change else {
            return false;
        };
        let name = self.props.name.clone().unwrap_or_default();
        on_change.emit(&InputEvent::new(name, value));
        true
    }

    /// The value as it appears in the rendered field.
    pub fn display_value(&self) -> String {
        match &self.props.value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub(crate) fn write_html(&self, out: &mut String) {
        let value = self.display_value();
        let mut attributes: Vec<(&str, &str)> = Vec::new();
        if let Some(class) = &self.props.class_name {
            attributes.push(("class", class.as_str()));
        }
        if let Some(id) = &self.props.id {
            attributes.push(("id", id.as_str()));
        }
        if let Some(name) = &self.props.name {
            attributes.push(("name", name.as_str()));
        }
        if self.kind == InputKind::Input {
            attributes.push(("value", value.as_str()));
        }
        attributes.extend(self.props.extra.iter().map(|(n, v)| (n.as_str(), v.as_str())));

        match self.kind {
            InputKind::Input => {
                out.push_str("<input");
                write_attributes(out, attributes.into_iter());
                out.push('>');
            }
            InputKind::Textarea => {
                out.push_str("<textarea");
                write_attributes(out, attributes.into_iter());
                out.push('>');
                out.push_str(&escape(&value));
                out.push_str("</textarea>");
            }
        }
    }
}
