//! App attributes: the dynamically-typed attribute bag and its typed views.
//!
//! Form inputs can write any JSON value into any key, and validation has to
//! see those values as they are (a string `"16"` for `mem` is an error, not
//! a number). So the model stores a `serde_json` object; `AppSpec` is the
//! typed view for callers who want one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::errors::{ModelError, kind_of};
use super::ids::AppId;

/// Attributes computed by the scheduler. They are kept on the model but
/// never written out by `stringify`.
pub const READ_ONLY_ATTRIBUTES: [&str; 2] = ["tasksRunning", "tasksStaged"];

pub fn is_read_only(key: &str) -> bool {
    READ_ONLY_ATTRIBUTES.contains(&key)
}

/// Attribute bag of an App (a JSON object).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// `self` with every key of `other` laid over it.
    pub fn merged(&self, other: &Attributes) -> Attributes {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Copy without the read-only keys, at every depth.
    pub fn without_read_only(&self) -> Attributes {
        Attributes(strip_read_only(&self.0))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

fn strip_read_only(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| !is_read_only(key))
        .map(|(key, value)| (key.clone(), strip_value(value)))
        .collect()
}

fn strip_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(strip_read_only(map)),
        Value::Array(items) => Value::Array(items.iter().map(strip_value).collect()),
        other => other.clone(),
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Attributes {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ModelError::NotAnObject(kind_of(&other))),
        }
    }
}

impl From<Attributes> for Value {
    fn from(attrs: Attributes) -> Self {
        Value::Object(attrs.0)
    }
}

impl IntoIterator for Attributes {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Container settings. Only `image` is interpreted; anything else the
/// scheduler accepts (options, volumes, ...) is carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub image: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Container {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            extra: Map::new(),
        }
    }
}

/// Placement constraint, written as `[field, operator]` or
/// `[field, operator, value]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Constraint {
    pub field: String,
    pub operator: String,
    pub value: Option<String>,
}

impl Constraint {
    pub fn new(field: impl Into<String>, operator: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl TryFrom<Vec<String>> for Constraint {
    type Error = String;

    fn try_from(parts: Vec<String>) -> Result<Self, Self::Error> {
        let len = parts.len();
        let mut parts = parts.into_iter();
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(field), Some(operator), value, None) => Ok(Self {
                field,
                operator,
                value,
            }),
            _ => Err(format!("constraint must have 2 or 3 elements, got {len}")),
        }
    }
}

impl From<Constraint> for Vec<String> {
    fn from(c: Constraint) -> Self {
        let mut parts = vec![c.field, c.operator];
        parts.extend(c.value);
        parts
    }
}

/// Default attribute values for a new App.
///
/// The `id` is not part of the defaults: it comes from the injected
/// `IdGenerator` when the caller does not supply one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppDefaults {
    pub cpus: f64,
    pub mem: f64,
    pub instances: u32,
    pub cmd: Option<String>,
    pub constraints: Vec<Constraint>,
    pub container: Option<Container>,
    pub env: BTreeMap<String, String>,
    pub executor: String,
    pub ports: Vec<u32>,
    pub uris: Vec<String>,
}

impl Default for AppDefaults {
    fn default() -> Self {
        Self {
            cpus: 0.1,
            mem: 16.0,
            instances: 1,
            cmd: None,
            constraints: Vec::new(),
            container: None,
            env: BTreeMap::new(),
            executor: String::new(),
            ports: vec![0],
            uris: Vec::new(),
        }
    }
}

impl AppDefaults {
    pub fn to_attributes(&self) -> Result<Attributes, ModelError> {
        Attributes::try_from(serde_json::to_value(self)?)
    }
}

/// Typed view of an App's attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSpec {
    pub id: AppId,
    pub cpus: f64,
    pub mem: f64,
    pub instances: u32,
    #[serde(default)]
    pub cmd: Option<String>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(default)]
    pub container: Option<Container>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub executor: String,
    #[serde(default)]
    pub ports: Vec<u32>,
    #[serde(default)]
    pub uris: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_running: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_staged: Option<u32>,
}

impl AppSpec {
    pub fn to_attributes(&self) -> Result<Attributes, ModelError> {
        Attributes::try_from(serde_json::to_value(self)?)
    }

    pub fn from_attributes(attrs: &Attributes) -> Result<Self, ModelError> {
        Ok(serde_json::from_value(Value::Object(attrs.as_map().clone()))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_the_form_defaults() {
        let attrs = AppDefaults::default().to_attributes().unwrap();

        assert_eq!(attrs.get("cpus"), Some(&json!(0.1)));
        assert_eq!(attrs.get("mem"), Some(&json!(16.0)));
        assert_eq!(attrs.get("instances"), Some(&json!(1)));
        assert_eq!(attrs.get("cmd"), Some(&Value::Null));
        assert_eq!(attrs.get("container"), Some(&Value::Null));
        assert_eq!(attrs.get("executor"), Some(&json!("")));
        assert_eq!(attrs.get("env"), Some(&json!({})));
        assert_eq!(attrs.get("ports"), Some(&json!([0])));
        assert_eq!(attrs.get("uris"), Some(&json!([])));
        assert_eq!(attrs.get("constraints"), Some(&json!([])));
        assert!(!attrs.contains_key("id"));
    }

    #[test]
    fn partial_defaults_config_fills_the_rest() {
        let defaults: AppDefaults = serde_json::from_str(r#"{ "mem": 128.0 }"#).unwrap();
        assert_eq!(defaults.mem, 128.0);
        assert_eq!(defaults.cpus, 0.1);
        assert_eq!(defaults.ports, vec![0]);
    }

    #[test]
    fn merged_lays_other_over_self() {
        let base = Attributes::try_from(json!({ "a": 1, "b": 2 })).unwrap();
        let over = Attributes::try_from(json!({ "b": 3, "c": 4 })).unwrap();
        let merged = base.merged(&over);
        assert_eq!(Value::from(merged), json!({ "a": 1, "b": 3, "c": 4 }));
    }

    #[test]
    fn without_read_only_drops_keys_at_every_depth() {
        let attrs = Attributes::try_from(json!({
            "id": "web",
            "tasksRunning": 3,
            "tasksStaged": 1,
            "env": { "tasksRunning": "1", "MODE": "prod" },
            "container": { "image": "docker/x", "tasksStaged": 2 },
            "healthChecks": [{ "path": "/", "tasksRunning": 0 }],
        }))
        .unwrap();

        let filtered = attrs.without_read_only();
        assert_eq!(
            Value::from(filtered),
            json!({
                "id": "web",
                "env": { "MODE": "prod" },
                "container": { "image": "docker/x" },
                "healthChecks": [{ "path": "/" }],
            })
        );
    }

    #[test]
    fn non_object_is_rejected() {
        let err = Attributes::try_from(json!("web")).unwrap_err();
        assert!(matches!(err, ModelError::NotAnObject("string")));
    }

    #[test]
    fn constraint_accepts_two_or_three_parts() {
        let c: Constraint = serde_json::from_value(json!(["hostname", "UNIQUE"])).unwrap();
        assert_eq!(c, Constraint::new("hostname", "UNIQUE"));

        let c: Constraint = serde_json::from_value(json!(["rack", "LIKE", "rack-[1-3]"])).unwrap();
        assert_eq!(c.value.as_deref(), Some("rack-[1-3]"));
        assert_eq!(serde_json::to_value(&c).unwrap(), json!(["rack", "LIKE", "rack-[1-3]"]));

        assert!(serde_json::from_value::<Constraint>(json!(["hostname"])).is_err());
    }

    #[test]
    fn container_keeps_unknown_fields() {
        let raw = json!({ "image": "docker:///nginx", "options": ["-p"] });
        let c: Container = serde_json::from_value(raw).unwrap();
        assert_eq!(c.image, "docker:///nginx");
        assert_eq!(c.extra.get("options"), Some(&json!(["-p"])));
    }

    #[test]
    fn spec_reads_read_only_counters() {
        let attrs = Attributes::try_from(json!({
            "id": "web",
            "cpus": 1.0,
            "mem": 64.0,
            "instances": 2,
            "tasksRunning": 2,
        }))
        .unwrap();

        let spec = AppSpec::from_attributes(&attrs).unwrap();
        assert_eq!(spec.id.as_str(), "web");
        assert_eq!(spec.tasks_running, Some(2));
        assert_eq!(spec.tasks_staged, None);
    }
}
