//! Validation rules for App attributes.
//!
//! `validate` is pure: it looks at a candidate attribute set and reports
//! every failing rule. Rules are independent, so one bad attribute never
//! hides another, but each rule yields at most one error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::attributes::Attributes;

pub const MEM_MESSAGE: &str = "Memory must be a non-negative Number";
pub const CPUS_MESSAGE: &str = "CPUs must be a non-negative Number";
pub const INSTANCES_MESSAGE: &str = "Instances must be a non-negative Number";
pub const ID_MESSAGE: &str = "ID must be a non-empty String";
pub const CMD_MESSAGE: &str =
    "Command must be a non-empty String if executor and container image are not provided";

/// Image prefix that lets an executor-backed container run without `cmd`.
pub const DOCKER_IMAGE_PREFIX: &str = "docker";

/// One failed rule: which attribute, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub attribute: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attribute, self.message)
    }
}

/// Check a full candidate attribute set.
///
/// Returns `None` when every rule passes, otherwise the failures in rule
/// order: `mem`, `cpus`, `instances`, `id`, `cmd`.
pub fn validate(attrs: &Attributes) -> Option<Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_non_negative_number(attrs.get("mem")) {
        errors.push(ValidationError::new("mem", MEM_MESSAGE));
    }

    if !is_non_negative_number(attrs.get("cpus")) {
        errors.push(ValidationError::new("cpus", CPUS_MESSAGE));
    }

    if !is_non_negative_number(attrs.get("instances")) {
        errors.push(ValidationError::new("instances", INSTANCES_MESSAGE));
    }

    if non_empty_str(attrs.get("id")).is_none() {
        errors.push(ValidationError::new("id", ID_MESSAGE));
    }

    // Updates such as scale/suspend carry no cmd; docker containers with an
    // executor are allowed through.
    if non_empty_str(attrs.get("cmd")).is_none() && !runs_docker_container(attrs) {
        errors.push(ValidationError::new("cmd", CMD_MESSAGE));
    }

    if errors.is_empty() { None } else { Some(errors) }
}

/// The docker fallback: non-empty `executor` and a `container.image`
/// beginning with `"docker"`.
pub fn runs_docker_container(attrs: &Attributes) -> bool {
    if non_empty_str(attrs.get("executor")).is_none() {
        return false;
    }

    attrs
        .get("container")
        .and_then(Value::as_object)
        .and_then(|container| non_empty_str(container.get("image")))
        .is_some_and(|image| image.starts_with(DOCKER_IMAGE_PREFIX))
}

fn is_non_negative_number(value: Option<&Value>) -> bool {
    matches!(value.and_then(Value::as_f64), Some(n) if !n.is_nan() && n >= 0.0)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
