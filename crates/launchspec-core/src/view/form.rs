//! AppForm - App 編集フォーム
//!
//! FormGroup を並べて 1 つの `<form>` にまとめるだけ。
//! 各 FormGroup は同じ SharedModel を共有する。

use crate::model::SharedModel;

use super::form_group::{FormGroup, View};
use super::input::InputElement;
use super::node::{Element, Node};
use super::style::FormStyle;

pub struct AppForm {
    model: SharedModel,
    groups: Vec<FormGroup>,
    style: FormStyle,
}

impl AppForm {
    pub fn new(model: SharedModel) -> Self {
        Self {
            model,
            groups: Vec::new(),
            style: FormStyle::default(),
        }
    }

    /// The usual fields of the "new app" dialog.
    pub fn standard(model: SharedModel) -> Self {
        Self::new(model)
            .field("id", "ID", "Unique name of the app.", InputElement::input())
            .field(
                "cmd",
                "Command",
                "Shell command run for each instance.",
                InputElement::textarea().attr("rows", "3"),
            )
            .field(
                "executor",
                "Executor",
                "Leave empty for the default executor.",
                InputElement::input(),
            )
            .field(
                "cpus",
                "CPUs",
                "CPU shares per instance.",
                InputElement::input().attr("type", "number").attr("step", "0.01"),
            )
            .field(
                "mem",
                "Memory (MB)",
                "Memory per instance.",
                InputElement::input().attr("type", "number"),
            )
            .field(
                "instances",
                "Instances",
                "Number of instances to run.",
                InputElement::input().attr("type", "number"),
            )
    }

    /// Restyle the form and every group already added.
    pub fn style(mut self, style: FormStyle) -> Self {
        for group in &mut self.groups {
            group.set_style(style.clone());
        }
        self.style = style;
        self
    }

    pub fn field(
        mut self,
        attribute: &str,
        label: &str,
        help: &str,
        child: InputElement,
    ) -> Self {
        let group = FormGroup::new(attribute, self.model.clone(), child)
            .label(label)
            .help(help)
            .style(self.style.clone());
        self.groups.push(group);
        self
    }

    pub fn groups(&self) -> &[FormGroup] {
        &self.groups
    }

    /// Keep only the named groups, in the given order. Unknown names are skipped.
    pub fn only(mut self, attributes: &[String]) -> Self {
        let mut kept = Vec::with_capacity(attributes.len());
        for name in attributes {
            if let Some(pos) = self.groups.iter().position(|g| g.attribute() == name) {
                kept.push(self.groups.remove(pos));
            }
        }
        self.groups = kept;
        self
    }
}

impl View for AppForm {
    fn render(&self) -> Node {
        Element::new("form")
            .class(&self.style.form)
            .children(self.groups.iter().map(View::render))
            .into()
    }
}
