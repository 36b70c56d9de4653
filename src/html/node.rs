//! Tag tree storage and depth-first queries.
//!
//! Nodes live in a flat arena owned by [`Document`]. Children are stored as
//! ordered id lists on the parent; the parent link is a plain id used only to
//! walk upward.

use std::fmt;

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The synthetic document root.
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone)]
pub struct TagNode {
    raw: String,
    name: String,
    class_name: String,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TagNode {
    fn new(raw: &str, text: &str, parent: Option<NodeId>) -> Self {
        Self {
            raw: raw.to_string(),
            name: tag_name(raw),
            class_name: attribute_value(raw, "class").unwrap_or_default(),
            text: text.to_string(),
            parent,
            children: Vec::new(),
        }
    }
}

/// A parsed HTML document. Immutable once the tree builder hands it out.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<TagNode>,
}

impl Document {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![TagNode::new("", "", None)],
        }
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            id: NodeId::ROOT,
        }
    }

    /// Number of nodes, including the synthetic root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no tag was found below the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, raw: &str, text: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TagNode::new(raw, text, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(crate) fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub(crate) fn set_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0].text = text.to_string();
    }

    fn node(&self, id: NodeId) -> &TagNode {
        &self.nodes[id.0]
    }
}

/// Borrowed handle to one node of a [`Document`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Tag name, e.g. `div` or `a`. Empty for the synthetic root.
    pub fn name(&self) -> &'a str {
        &self.doc.node(self.id).name
    }

    /// Value of the `class` attribute, or `""` when absent.
    pub fn class_name(&self) -> &'a str {
        &self.doc.node(self.id).class_name
    }

    /// Text that directly follows this node's opening tag.
    pub fn text(&self) -> &'a str {
        &self.doc.node(self.id).text
    }

    /// Raw tag source including the angle brackets.
    pub fn raw(&self) -> &'a str {
        &self.doc.node(self.id).raw
    }

    /// Quoted value of an arbitrary attribute.
    pub fn attribute(&self, name: &str) -> Option<String> {
        attribute_value(self.raw(), name)
    }

    /// `href` target, or `""` when the tag carries none.
    pub fn link(&self) -> String {
        self.attribute("href").unwrap_or_default()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.doc.node(self.id).parent.map(|id| NodeRef { doc: self.doc, id })
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + ExactSizeIterator + 'a {
        let doc = self.doc;
        doc.node(self.id)
            .children
            .iter()
            .map(move |&id| NodeRef { doc, id })
    }

    pub fn last_child(&self) -> Option<NodeRef<'a>> {
        self.children().next_back()
    }

    /// Lazy pre-order walk over every node below this one, in document order.
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.doc.node(self.id).children.clone();
        stack.reverse();
        Descendants {
            doc: self.doc,
            stack,
        }
    }

    pub fn tags_by_name(&self, name: &str) -> Vec<NodeRef<'a>> {
        self.descendants().filter(|n| n.name() == name).collect()
    }

    pub fn tags_by_class(&self, class_name: &str) -> Vec<NodeRef<'a>> {
        self.descendants()
            .filter(|n| n.class_name() == class_name)
            .collect()
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("class", &self.class_name())
            .field("text", &self.text())
            .field("parent", &self.parent().map(|p| p.name()))
            .finish()
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.node(id).children.iter().rev().copied());
        Some(NodeRef { doc: self.doc, id })
    }
}

/// `<a href="x">` -> `a`, `<br/>` -> `br`, `<!-- c -->` -> `!--`.
fn tag_name(raw: &str) -> String {
    let inner = raw.strip_prefix('<').unwrap_or(raw);
    inner
        .split(|c: char| c.is_whitespace() || c == '>')
        .next()
        .unwrap_or("")
        .trim_end_matches('/')
        .to_ascii_lowercase()
}

/// Finds `name="value"` (or single-quoted / bare) inside a raw tag.
fn attribute_value(raw: &str, name: &str) -> Option<String> {
    let needle = format!("{name}=");
    for (pos, _) in raw.match_indices(&needle) {
        let boundary = raw[..pos]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_whitespace());
        if !boundary {
            continue;
        }
        let rest = &raw[pos + needle.len()..];
        let value = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &rest[1..];
                body.find(q).map(|end| &body[..end])
            }
            Some(_) => rest.split(|c: char| c.is_whitespace() || c == '>').next(),
            None => None,
        };
        if let Some(value) = value {
            return Some(value.to_string());
        }
    }
    None
}
