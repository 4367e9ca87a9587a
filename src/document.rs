//! Document model - a tree of content nodes addressed by paths
//!
//! The top level of a document is a list of element nodes, one per line.
//! Elements contain text leaves (and possibly nested elements); the text
//! of a node is the concatenation of all its descendant leaves.

use std::fmt;

/// Stable identity of an element, unaffected by its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Positional address of a node: child indices from the document root
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Path(Vec<usize>);

impl Path {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path of the top-level node at `index`
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Index among the top-level nodes (the first path element)
    pub fn root_index(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// Path of this node's child at `index`
    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Path(indices)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "]")
    }
}

/// What the decorator needs to know about a node
pub trait ContentNode {
    /// Whether this node is a container element (as opposed to a text leaf)
    fn is_element(&self) -> bool;

    /// Flattened plain text of the node
    fn text(&self) -> String;

    /// Stable identity, if the node has one
    fn id(&self) -> Option<NodeId> {
        None
    }
}

/// A container node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: NodeId,
    pub children: Vec<Node>,
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Concatenated text of all descendant leaves
    pub fn string(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Descendant at a path relative to this node
    pub fn descendant(&self, indices: &[usize]) -> Option<&Node> {
        match indices.split_first() {
            None => Some(self),
            Some((&first, rest)) => match self {
                Node::Element(element) => element.children.get(first)?.descendant(rest),
                Node::Text(_) => None,
            },
        }
    }
}

impl ContentNode for Node {
    fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    fn text(&self) -> String {
        self.string()
    }

    fn id(&self) -> Option<NodeId> {
        match self {
            Node::Element(element) => Some(element.id),
            Node::Text(_) => None,
        }
    }
}

/// A document: an ordered list of top-level line elements
#[derive(Debug, Clone)]
pub struct Document {
    /// Top-level nodes
    children: Vec<Node>,
    /// Next identity to hand out
    next_id: u64,
}

impl Document {
    /// Create a document holding one empty line
    pub fn new() -> Self {
        let mut doc = Self {
            children: Vec::new(),
            next_id: 0,
        };
        let line = doc.line("");
        doc.children.push(line);
        doc
    }

    /// Create a document with one line element per line of `content`
    pub fn from_text(content: &str) -> Self {
        let mut doc = Self {
            children: Vec::new(),
            next_id: 0,
        };
        for text in content.lines() {
            let line = doc.line(text);
            doc.children.push(line);
        }
        // Always have at least one line
        if doc.children.is_empty() {
            let line = doc.line("");
            doc.children.push(line);
        }
        doc
    }

    /// Build a new line element with a fresh identity
    pub fn line(&mut self, text: &str) -> Node {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        Node::Element(Element {
            id,
            children: vec![Node::Text(text.to_string())],
        })
    }

    /// Number of top-level nodes
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Top-level nodes
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Top-level nodes paired with their paths
    pub fn entries(&self) -> impl Iterator<Item = (&Node, Path)> {
        self.children
            .iter()
            .enumerate()
            .map(|(i, node)| (node, Path::root(i)))
    }

    /// Node at a path
    pub fn node(&self, path: &Path) -> Option<&Node> {
        let (&first, rest) = path.as_slice().split_first()?;
        self.children.get(first)?.descendant(rest)
    }

    /// Flattened text of the top-level node at `index`
    pub fn line_text(&self, index: usize) -> Option<String> {
        self.children.get(index).map(Node::string)
    }

    /// Replace the text of a line, keeping its identity
    ///
    /// Returns false if the index is out of range.
    pub fn set_line(&mut self, index: usize, text: &str) -> bool {
        match self.children.get_mut(index) {
            Some(Node::Element(element)) => {
                element.children = vec![Node::Text(text.to_string())];
                true
            }
            Some(node) => {
                *node = Node::Text(text.to_string());
                true
            }
            None => false,
        }
    }

    /// Insert a new line before `index` (or at the end if past it)
    pub fn insert_line(&mut self, index: usize, text: &str) {
        let line = self.line(text);
        let index = index.min(self.children.len());
        self.children.insert(index, line);
    }

    /// Append a new line
    pub fn push_line(&mut self, text: &str) {
        let line = self.line(text);
        self.children.push(line);
    }

    /// Append an arbitrary top-level node
    pub fn push_node(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Remove the line at `index`
    pub fn remove_line(&mut self, index: usize) -> Option<Node> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    /// Whole document as text, lines joined with `\n`
    pub fn to_text(&self) -> String {
        self.children
            .iter()
            .map(Node::string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
