//! FormGroup - 1 つの入力欄を AppModel の 1 属性に結びつける
//!
//! # 役割
//! - 子要素（input / textarea）に id, name, value, change ハンドラを注入
//! - その属性のバリデーションエラーだけを表示
//!
//! 子要素は常に 1 つ（型で保証）。コンポーネント自身は状態を持たず、
//! render はモデルと props だけから毎回組み立て直す。

use tracing::{debug, warn};

use crate::domain::ValidationError;
use crate::model::SharedModel;

use super::input::{Binding, Callback, InputElement, InputEvent};
use super::node::{Element, Node};
use super::style::FormStyle;

/// Something that renders to a node tree.
pub trait View {
    fn render(&self) -> Node;
}

pub struct FormGroup {
    attribute: String,
    model: SharedModel,
    label: String,
    help: String,
    child: InputElement,
    style: FormStyle,
}

impl FormGroup {
    pub fn new(attribute: impl Into<String>, model: SharedModel, child: InputElement) -> Self {
        Self {
            attribute: attribute.into(),
            model,
            label: String::new(),
            help: String::new(),
            child,
            style: FormStyle::default(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn style(mut self, style: FormStyle) -> Self {
        self.style = style;
        self
    }

    pub(crate) fn set_style(&mut self, style: FormStyle) {
        self.style = style;
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn field_id(&self) -> String {
        format!("{}-field", self.attribute)
    }

    /// Errors on the model for this group's attribute, in model order.
    pub fn errors(&self) -> Vec<ValidationError> {
        self.model
            .borrow()
            .validation_error()
            .unwrap_or_default()
            .iter()
            .filter(|e| e.attribute == self.attribute)
            .cloned()
            .collect()
    }

    /// Write the changed value into the model through its validated path.
    pub fn on_input_change(model: &SharedModel, event: &InputEvent) {
        let Ok(mut m) = model.try_borrow_mut() else {
            warn!(attribute = %event.target.name, "model busy, input change dropped");
            return;
        };
        if let Err(err) = m.set(&event.target.name, event.target.value.clone()) {
            debug!(attribute = %event.target.name, %err, "input change rejected");
        }
    }

    /// The child with this group's binding merged in.
    pub fn bound_child(&self) -> InputElement {
        let model = self.model.clone();
        let value = self.model.borrow().get(&self.attribute).cloned();
        self.child.with_binding(Binding {
            class_name: self.style.control.clone(),
            id: self.field_id(),
            name: self.attribute.clone(),
            value,
            on_change: Callback::new(move |event: &InputEvent| {
                FormGroup::on_input_change(&model, event)
            }),
        })
    }
}

impl View for FormGroup {
    fn render(&self) -> Node {
        let field_id = self.field_id();

        let error_blocks: Vec<Element> = self
            .errors()
            .into_iter()
            .map(|e| Element::new("div").class(&self.style.help_block).text(e.message))
            .collect();

        let mut class = self.style.group.clone();
        if !error_blocks.is_empty() {
            class.push(' ');
            class.push_str(&self.style.error);
        }

        Element::new("div")
            .class(class)
            .child(
                Element::new("label")
                    .attr("for", &field_id)
                    .class(&self.style.label)
                    .text(&self.label),
            )
            .child(
                Element::new("div")
                    .class(&self.style.field_column)
                    .child(self.bound_child())
                    .children(error_blocks),
            )
            .child(
                Element::new("div").class(&self.style.help_column).child(
                    Element::new("span")
                        .class(&self.style.help_block)
                        .text(&self.help),
                ),
            )
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppModelBuilder;
    use crate::ports::SequentialIdGenerator;
    use serde_json::json;
    use std::sync::Arc;

    fn shared_model() -> SharedModel {
        AppModelBuilder::new(Arc::new(SequentialIdGenerator::new()))
            .overrides(json!({ "id": "web", "cmd": "sleep 100" }))
            .unwrap()
            .build()
            .unwrap()
            .into_shared()
    }

    fn group(attribute: &str, model: &SharedModel) -> FormGroup {
        FormGroup::new(attribute, model.clone(), InputElement::input())
            .label("Label")
            .help("Help")
    }

    /// Error blocks live in the field column, after the input.
    fn error_texts(node: &Node) -> Vec<String> {
        node.find_by_class("col-md-7")[0]
            .children
            .iter()
            .filter(|n| n.as_element().is_some_and(|e| e.has_class("help-block")))
            .map(Node::text_content)
            .collect()
    }

    fn force_errors(model: &SharedModel) {
        // mem and cpus rejected in one go
        let changes =
            crate::domain::Attributes::try_from(json!({ "mem": -1, "cpus": -1 })).unwrap();
        model.borrow_mut().set_many(changes).unwrap_err();
    }

    #[test]
    fn renders_only_errors_for_its_attribute() {
        let model = shared_model();
        force_errors(&model);

        let mem = group("mem", &model).render();
        let root = mem.as_element().unwrap();
        assert!(root.has_class("has-error"));
        assert_eq!(error_texts(&mem), vec![crate::domain::validation::MEM_MESSAGE]);

        let instances = group("instances", &model).render();
        assert!(!instances.as_element().unwrap().has_class("has-error"));
        assert!(error_texts(&instances).is_empty());
    }

    #[test]
    fn errors_are_read_from_the_model() {
        let model = shared_model();
        {
            let mut m = model.borrow_mut();
            let changes = crate::domain::Attributes::try_from(json!({ "mem": -1 })).unwrap();
            m.set_many(changes).unwrap_err();
        }
        let g = group("mem", &model);
        assert_eq!(g.errors().len(), 1);
        assert_eq!(g.errors()[0].attribute, "mem");
    }

    #[test]
    fn child_gets_binding_attributes() {
        let model = shared_model();
        let node = group("mem", &model).render();
        let input = node.find_input("mem").unwrap();

        assert_eq!(input.props.class_name.as_deref(), Some("form-control"));
        assert_eq!(input.props.id.as_deref(), Some("mem-field"));
        assert_eq!(input.props.name.as_deref(), Some("mem"));
        assert_eq!(input.props.value, Some(json!(16.0)));
        assert!(input.props.on_change.is_some());

        let labels = node.find_by_class("control-label");
        assert_eq!(labels[0].attribute("for"), Some("mem-field"));
    }

    #[test]
    fn structure_matches_markup() {
        let model = shared_model();
        let html = group("cmd", &model).render().to_html();
        assert_eq!(
            html,
            concat!(
                r#"<div class="form-group">"#,
                r#"<label for="cmd-field" class="col-md-2 control-label">Label</label>"#,
                r#"<div class="col-md-7">"#,
                r#"<input class="form-control" id="cmd-field" name="cmd" value="sleep 100">"#,
                r#"</div>"#,
                r#"<div class="col-md-3"><span class="help-block">Help</span></div>"#,
                r#"</div>"#,
            )
        );
    }

    #[test]
    fn input_change_writes_through_model() {
        let model = shared_model();
        let node = group("instances", &model).render();

        assert!(node.find_input("instances").unwrap().change(4));
        assert_eq!(model.borrow().get("instances"), Some(&json!(4)));
        assert!(model.borrow().validation_error().is_none());
    }

    #[test]
    fn rejected_input_shows_up_on_next_render() {
        let model = shared_model();
        let g = group("mem", &model);

        g.render().find_input("mem").unwrap().change("lots");
        assert_eq!(model.borrow().get("mem"), Some(&json!(16.0)));

        let node = g.render();
        assert!(node.as_element().unwrap().has_class("has-error"));
        assert_eq!(error_texts(&node).len(), 1);
        // value shown is still the committed one
        assert_eq!(node.find_input("mem").unwrap().props.value, Some(json!(16.0)));
    }

    #[test]
    fn rendering_does_not_touch_the_original_child() {
        let model = shared_model();
        let child = InputElement::textarea().attr("rows", "3");
        let g = FormGroup::new("cmd", model.clone(), child.clone());

        let _ = g.render();
        let _ = g.render();

        assert!(child.props.name.is_none());
        let bound = g.bound_child();
        assert_eq!(bound.props.extra, vec![("rows".to_string(), "3".to_string())]);
    }

    #[test]
    fn change_while_model_borrowed_is_dropped() {
        let model = shared_model();
        let node = group("mem", &model).render();
        let input = node.find_input("mem").unwrap();

        let guard = model.borrow();
        input.change(64.0);
        drop(guard);

        assert_eq!(model.borrow().get("mem"), Some(&json!(16.0)));
    }

    #[test]
    fn custom_style_is_applied() {
        let model = shared_model();
        force_errors(&model);
        let style = FormStyle {
            error: "is-invalid".to_string(),
            ..FormStyle::default()
        };
        let node = group("mem", &model).style(style).render();
        assert!(node.as_element().unwrap().has_class("is-invalid"));
    }
}
