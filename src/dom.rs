use crate::style::InlineStyle;
use std::error::Error as StdError;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    NotAnElement(&'static str),
    InvalidAppend(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnElement(op) => write!(f, "{op} target is not an element"),
            Self::InvalidAppend(msg) => write!(f, "invalid appendChild: {msg}"),
        }
    }
}

impl StdError for Error {}

/// Handle into a [`Document`]'s node arena. Handles are never reused;
/// a handle from another document indexes garbage and will panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node_type: NodeType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag_name: String,
    pub style: InlineStyle,
}

impl Element {
    fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            style: InlineStyle::default(),
        }
    }
}

/// In-memory document tree. Owns every node; callers hold [`NodeId`]s.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
}

impl Document {
    /// An empty page: document root containing `<html><body></body></html>`.
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        let mut doc = Self {
            nodes: vec![root],
            root: NodeId(0),
            body: NodeId(0),
        };
        let html = doc.create_element("html");
        let body = doc.create_element("body");
        doc.attach(doc.root, html);
        doc.attach(html, body);
        doc.body = body;
        doc
    }

    fn create_node(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            node_type,
        });
        id
    }

    /// Creates a detached element; it joins the tree via [`Document::append_child`].
    pub fn create_element(&mut self, tag_name: impl Into<String>) -> NodeId {
        self.create_node(NodeType::Element(Element::new(tag_name)))
    }

    /// Creates a detached text node.
    pub fn create_text_node(&mut self, text: impl Into<String>) -> NodeId {
        self.create_node(NodeType::Text(text.into()))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Moves `child` under `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if matches!(self.nodes[parent.0].node_type, NodeType::Text(_)) {
            return Err(Error::InvalidAppend("text nodes cannot have children"));
        }
        if child == self.root || child == parent {
            return Err(Error::InvalidAppend("node may not contain itself"));
        }
        // Parent must not already sit inside the child's subtree
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(Error::InvalidAppend("node would contain its ancestor"));
            }
            cursor = self.parent(node);
        }
        if let Some(old_parent) = self.parent(child) {
            self.nodes[old_parent.0].children.retain(|id| *id != child);
        }
        self.attach(parent, child);
        Ok(())
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// All children, text nodes included (`childNodes`).
    pub fn child_nodes(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Element children only (`children`).
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .filter(|c| matches!(self.nodes[c.0].node_type, NodeType::Element(_)))
            .collect()
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag_name.as_str())
    }

    /// The literal text of a text node, `None` for anything else.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].node_type {
            NodeType::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Concatenated text of the subtree rooted at `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        match &self.nodes[id.0].node_type {
            NodeType::Text(text) => text.clone(),
            _ => {
                let mut out = String::new();
                for child in &self.nodes[id.0].children {
                    out.push_str(&self.text_content(*child));
                }
                out
            }
        }
    }

    pub fn style(&self, id: NodeId) -> Result<&InlineStyle> {
        self.element(id)
            .map(|e| &e.style)
            .ok_or(Error::NotAnElement("style"))
    }

    pub fn style_mut(&mut self, id: NodeId) -> Result<&mut InlineStyle> {
        self.element_mut(id)
            .map(|e| &mut e.style)
            .ok_or(Error::NotAnElement("style"))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[test]
fn test_empty_document_shape() {
    let doc = Document::new();
    let html = doc.children(doc.root());
    assert_eq!(html.len(), 1);
    assert_eq!(doc.tag_name(html[0]), Some("html"));
    assert_eq!(doc.children(html[0]), vec![doc.body()]);
    assert_eq!(doc.tag_name(doc.body()), Some("body"));
    assert!(doc.child_nodes(doc.body()).is_empty());
}

#[cfg(test)]
#[test]
fn test_append_child() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    let text = doc.create_text_node("hi");
    assert_eq!(doc.parent(div), None);
    doc.append_child(doc.body(), div).unwrap();
    doc.append_child(div, text).unwrap();
    assert_eq!(doc.parent(div), Some(doc.body()));
    assert_eq!(doc.child_nodes(div), &[text]);
    assert_eq!(doc.text_content(doc.body()), "hi");

    // Re-appending moves the node rather than duplicating it
    let other = doc.create_element("div");
    doc.append_child(doc.body(), other).unwrap();
    doc.append_child(other, text).unwrap();
    assert!(doc.child_nodes(div).is_empty());
    assert_eq!(doc.child_nodes(other), &[text]);
}

#[cfg(test)]
#[test]
fn test_append_rejected() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    let text = doc.create_text_node("hi");
    doc.append_child(doc.body(), div).unwrap();
    assert_eq!(
        doc.append_child(text, div),
        Err(Error::InvalidAppend("text nodes cannot have children"))
    );
    assert_eq!(
        doc.append_child(div, div),
        Err(Error::InvalidAppend("node may not contain itself"))
    );
    // body sits under html; pulling html below body would make a cycle
    let html = doc.parent(doc.body()).unwrap();
    assert_eq!(
        doc.append_child(doc.body(), html),
        Err(Error::InvalidAppend("node would contain its ancestor"))
    );
}
