//! Document tree and tolerant tree builder.

use std::fmt::Write as _;

use tracing::trace;

use crate::path::ElementPath;
use crate::tokenizer::{Token, Tokenizer};

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Table-internal elements whose end tags do not reach past a `table`.
const TABLE_SCOPED: &[&str] = &["tbody", "thead", "tfoot", "tr", "td", "th", "caption"];

const TABLE_SECTIONS: &[&str] = &["tbody", "thead", "tfoot"];

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with its children.
    Element(Element),
    /// Decoded character data.
    Text(String),
    /// Script/style body kept verbatim.
    RawText(String),
    /// A comment.
    Comment(String),
}

/// An HTML element. Names are lower-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Lower-case tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by lower-case name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in source order.
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Child nodes.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Child elements with the given name.
    pub fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.child_elements().filter(move |e| e.name == name)
    }

    /// This element and all descendants named `name`, in document order.
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_named(self, name, &mut found);
        found
    }

    /// Concatenated character data of all descendants, as written.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        append_text(self, &mut out);
        out
    }

    /// Text content with whitespace runs (including non-breaking spaces)
    /// collapsed to one space and trimmed.
    pub fn normalized_text(&self) -> String {
        self.text_content()
            .split(|c: char| c.is_whitespace() || c == '\u{a0}')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Serializes the element and its subtree.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

/// A parsed HTML document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    children: Vec<Node>,
}

impl Document {
    /// Parses markup into a tree. Never fails; see the crate docs.
    pub fn parse(html: &str) -> Self {
        let mut builder = TreeBuilder::default();
        for token in Tokenizer::new(html) {
            builder.push(token);
        }
        let document = builder.finish();
        trace!(top_level = document.children.len(), "parsed HTML document");
        document
    }

    /// Top-level nodes.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Top-level elements.
    pub fn root_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First element (in document order) selected by `path`.
    pub fn locate(&self, path: &ElementPath) -> Option<&Element> {
        path.select(self.root_elements()).into_iter().next()
    }
}

/// Stack-based builder applying the table repairs browsers perform.
#[derive(Default)]
struct TreeBuilder {
    roots: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn push(&mut self, token: Token) {
        match token {
            Token::StartTag {
                name,
                attrs,
                self_closing,
            } => self.start(name, attrs, self_closing),
            Token::EndTag { name } => self.end(&name),
            Token::Text(text) => {
                if !text.is_empty() {
                    self.append(Node::Text(text));
                }
            }
            Token::RawText(text) => self.append(Node::RawText(text)),
            Token::Comment(text) => self.append(Node::Comment(text)),
        }
    }

    fn start(&mut self, name: String, attrs: Vec<(String, String)>, self_closing: bool) {
        match name.as_str() {
            "tr" => {
                self.close_to(&["table", "tbody", "thead", "tfoot"]);
                if self.current_is("table") {
                    self.open.push(Element::new("tbody"));
                }
            }
            "td" | "th" => {
                self.close_to(&["tr", "table", "tbody", "thead", "tfoot"]);
                if self.current_is("table") {
                    self.open.push(Element::new("tbody"));
                }
                if self.current_in(TABLE_SECTIONS) {
                    self.open.push(Element::new("tr"));
                }
            }
            "tbody" | "thead" | "tfoot" => self.close_to(&["table"]),
            _ => {}
        }

        let element = Element {
            name,
            attrs,
            children: Vec::new(),
        };
        if self_closing || VOID_ELEMENTS.contains(&element.name.as_str()) {
            self.append(Node::Element(element));
        } else {
            self.open.push(element);
        }
    }

    fn end(&mut self, name: &str) {
        let table_scoped = TABLE_SCOPED.contains(&name);
        let mut target = None;
        for (i, element) in self.open.iter().enumerate().rev() {
            if element.name == name {
                target = Some(i);
                break;
            }
            if table_scoped && element.name == "table" {
                break;
            }
        }
        match target {
            Some(i) => {
                while self.open.len() > i {
                    self.pop();
                }
            }
            None => trace!(tag = name, "ignoring unmatched end tag"),
        }
    }

    /// Pops open elements until the innermost one named in `stops` is current.
    /// Does nothing when none of them is open.
    fn close_to(&mut self, stops: &[&str]) {
        let Some(i) = self
            .open
            .iter()
            .rposition(|e| stops.contains(&e.name.as_str()))
        else {
            return;
        };
        while self.open.len() > i + 1 {
            self.pop();
        }
    }

    fn current_is(&self, name: &str) -> bool {
        self.open.last().is_some_and(|e| e.name == name)
    }

    fn current_in(&self, names: &[&str]) -> bool {
        self.open
            .last()
            .is_some_and(|e| names.contains(&e.name.as_str()))
    }

    fn append(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn pop(&mut self) {
        if let Some(element) = self.open.pop() {
            self.append(Node::Element(element));
        }
    }

    fn finish(mut self) -> Document {
        while !self.open.is_empty() {
            self.pop();
        }
        Document { children: self.roots }
    }
}

fn collect_named<'a>(element: &'a Element, name: &str, found: &mut Vec<&'a Element>) {
    if element.name == name {
        found.push(element);
    }
    for child in element.child_elements() {
        collect_named(child, name, found);
    }
}

fn append_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(e) if e.name == "br" => out.push('\n'),
            Node::Element(e) => append_text(e, out),
            Node::RawText(_) | Node::Comment(_) => {}
        }
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(e) => write_element(e, out),
        Node::Text(text) => escape_into(text, false, out),
        Node::RawText(text) => out.push_str(text),
        Node::Comment(text) => {
            let _ = write!(out, "<!--{text}-->");
        }
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }
    out.push('>');
    if VOID_ELEMENTS.contains(&element.name.as_str()) {
        return;
    }
    for child in &element.children {
        write_node(child, out);
    }
    let _ = write!(out, "</{}>", element.name);
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
