use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use serde_json::json;

use launchspec_core::app::AppCollection;
use launchspec_core::domain::{AppEvent, EventKind};
use launchspec_core::impls::InMemoryAppStore;
use launchspec_core::model::ModelState;
use launchspec_core::ports::SequentialIdGenerator;
use launchspec_core::view::{AppForm, View};

#[tokio::test]
async fn edit_through_form_then_save() {
    let store = Arc::new(InMemoryAppStore::new());
    let collection = AppCollection::new(store.clone(), Arc::new(SequentialIdGenerator::new()));
    let model = collection.builder().build().unwrap().into_shared();

    let changed = Rc::new(RefCell::new(Vec::new()));
    let log = changed.clone();
    model.borrow_mut().subscribe(
        EventKind::Change,
        Box::new(move |_: &mut ModelState, event: &AppEvent| {
            if let AppEvent::Changed { attribute, .. } = event {
                log.borrow_mut().push(attribute.clone());
            }
        }),
    );

    let form = AppForm::standard(model.clone());

    // no cmd yet, so the first edit is rejected as a whole
    form.render().find_input("id").unwrap().change("web");
    assert_eq!(model.borrow().id(), Some("app_1"));
    let node = form.render();
    assert_eq!(node.find_by_class("has-error").len(), 1);
    assert!(node.to_html().contains("Command must be a non-empty String"));

    form.render().find_input("cmd").unwrap().change("python -m http.server");
    form.render().find_input("id").unwrap().change("web");
    form.render().find_input("instances").unwrap().change(3);
    assert!(form.render().find_by_class("has-error").is_empty());
    assert_eq!(*changed.borrow(), vec!["cmd", "id", "instances"]);
    assert_eq!(model.borrow().tasks().url(), "/v2/apps/web/tasks");

    assert!(model.borrow().is_new());
    collection.save(&model).await.unwrap();
    assert!(!model.borrow().is_new());

    let m = model.borrow();
    assert_eq!(m.get("tasksRunning"), Some(&json!(0)));
    let sent = m.stringify(None).unwrap();
    assert!(!sent.contains("tasksRunning"));
    assert!(!sent.contains("tasksStaged"));
    assert!(sent.contains(r#""id":"web""#));
    drop(m);

    let loaded = collection.load("web").await.unwrap();
    assert_eq!(loaded.get("instances"), Some(&json!(3)));
    assert_eq!(store.len().await, 1);
}
