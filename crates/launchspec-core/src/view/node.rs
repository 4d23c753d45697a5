//! Virtual nodes produced by views, plus HTML output.

use std::fmt::Write as _;

use super::input::InputElement;

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Input(InputElement),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Depth-first walk, `self` first.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = vec![self];
        if let Node::Element(e) = self {
            for child in &e.children {
                out.extend(child.descendants());
            }
        }
        out
    }

    /// Elements carrying `class`, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter_map(Node::as_element)
            .filter(|e| e.has_class(class))
            .collect()
    }

    /// First input element named `name`.
    pub fn find_input(&self, name: &str) -> Option<&InputElement> {
        self.descendants().into_iter().find_map(|node| match node {
            Node::Input(input) if input.props.name.as_deref() == Some(name) => Some(input),
            _ => None,
        })
    }

    /// Concatenated text of this node and everything below it.
    pub fn text_content(&self) -> String {
        self.descendants()
            .into_iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.write_html(out),
            Node::Input(input) => input.write_html(out),
            Node::Text(t) => out.push_str(&escape(t)),
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<InputElement> for Node {
    fn from(input: InputElement) -> Self {
        Node::Input(input)
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: &'static str,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        write_attributes(out, self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str())));
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

pub(crate) fn write_attributes<'a>(
    out: &mut String,
    attributes: impl Iterator<Item = (&'a str, &'a str)>,
) {
    for (name, value) in attributes {
        let _ = write!(out, " {}=\"{}\"", name, escape(value));
    }
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
