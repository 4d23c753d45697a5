//! The App entity: attribute bag, validation on write, persistence state
//! and event subscriptions.

pub mod app;
pub mod builder;
pub mod listeners;

pub use self::app::{AppModel, SharedModel};
pub use self::builder::{AppModelBuilder, BuildError};
pub use self::listeners::{
    Handler, Listeners, ModelState, SubscriptionId, mark_persisted, rescope_tasks,
};
