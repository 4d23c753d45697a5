//! Tasks of one App, scoped by the App's id.
//!
//! The collection does not own task data in any durable sense: it is a view
//! keyed by `app_id`, and the owning `AppModel` keeps that key in step with
//! its own `id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One running (or staged) instance of an App.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub host: String,
    #[serde(default)]
    pub ports: Vec<u32>,
    #[serde(default)]
    pub staged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Staged but not started yet.
    pub fn is_staged(&self) -> bool {
        self.started_at.is_none()
    }
}

/// Scoping options of a TaskCollection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskCollectionOptions {
    pub app_id: String,
}

/// Tasks belonging to one App.
#[derive(Debug, Clone, Default)]
pub struct TaskCollection {
    pub options: TaskCollectionOptions,
    tasks: Vec<Task>,
}

impl TaskCollection {
    pub fn new(options: TaskCollectionOptions) -> Self {
        Self {
            options,
            tasks: Vec::new(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.options.app_id
    }

    /// Endpoint the tasks of the current App are read from.
    pub fn url(&self) -> String {
        format!("/v2/apps/{}/tasks", self.options.app_id)
    }

    /// Replace the contents wholesale (as after a fetch).
    pub fn reset(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn staged_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_staged()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(id: &str, started: bool) -> Task {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        Task {
            id: id.to_string(),
            host: "agent-1".to_string(),
            ports: vec![31000],
            staged_at: Some(at),
            started_at: started.then_some(at),
        }
    }

    #[test]
    fn url_follows_app_id() {
        let mut tasks = TaskCollection::new(TaskCollectionOptions {
            app_id: "web".to_string(),
        });
        assert_eq!(tasks.url(), "/v2/apps/web/tasks");

        tasks.options.app_id = "api".to_string();
        assert_eq!(tasks.url(), "/v2/apps/api/tasks");
    }

    #[test]
    fn reset_replaces_tasks() {
        let mut tasks = TaskCollection::default();
        tasks.reset(vec![task("a", true), task("b", false)]);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks.staged_count(), 1);

        tasks.reset(vec![]);
        assert!(tasks.is_empty());
    }

    #[test]
    fn task_reads_camel_case_json() {
        let json = r#"{
            "id": "web.1",
            "host": "agent-2",
            "ports": [31001],
            "stagedAt": "2024-01-01T12:00:00Z"
        }"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.host, "agent-2");
        assert!(t.is_staged());
    }
}
