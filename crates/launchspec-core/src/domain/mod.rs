//! Domain model (ids, attributes, validation, events, tasks).

pub mod attributes;
pub mod errors;
pub mod events;
pub mod ids;
pub mod tasks;
pub mod validation;

pub use attributes::{
    AppDefaults, AppSpec, Attributes, Constraint, Container, READ_ONLY_ATTRIBUTES, is_read_only,
};
pub use errors::ModelError;
pub use events::{AppEvent, EventKind};
pub use ids::AppId;
pub use tasks::{Task, TaskCollection, TaskCollectionOptions};
pub use validation::{ValidationError, validate};
