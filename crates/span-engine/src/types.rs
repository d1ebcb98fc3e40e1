use serde::{Deserialize, Serialize};

/// Kind of a tree node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Markup element (paragraph, stage direction, speaker label, span, ...)
    #[default]
    Element,

    /// Comment; `text` holds the body
    Comment,

    /// Processing instruction; `text` holds the raw instruction
    ProcessingInstruction,
}

/// A node of the document tree
///
/// Text lives in two slots: `text` is the content before the first child,
/// `tail` is the content after this node and before its next sibling. The
/// tail belongs to the parent's content but is stored here so that it moves
/// with the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,

    /// Qualified tag name as found in the markup (may carry a prefix)
    pub tag: String,

    /// Attributes in document order
    #[serde(default)]
    pub attributes: Vec<(String, String)>,

    /// Leading text
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub children: Vec<Node>,

    /// Trailing text
    #[serde(default)]
    pub tail: String,
}

impl Node {
    /// Create an empty element
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Element,
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Create a comment node
    pub fn comment(body: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Comment,
            text: body.into(),
            ..Default::default()
        }
    }

    /// Create a processing instruction node from its raw content
    pub fn processing_instruction(raw: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::ProcessingInstruction,
            text: raw.into(),
            ..Default::default()
        }
    }

    /// Builder: set leading text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder: set trailing text
    #[must_use]
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Builder: append a child
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: add an attribute
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Tag name without a namespace prefix (`tei:stage` -> `stage`)
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.tag
            .rsplit_once(':')
            .map_or(self.tag.as_str(), |(_, local)| local)
    }

    /// Whether any element child exists
    #[must_use]
    pub fn has_element_children(&self) -> bool {
        self.children.iter().any(Node::is_element)
    }

    /// Look up an attribute value
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Rendered character data of this node, excluding its own tail
    ///
    /// Comments and processing instructions render as nothing; their tails
    /// still count towards the parent.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text_content(&mut out);
        out
    }

    fn write_text_content(&self, out: &mut String) {
        if self.is_element() {
            out.push_str(&self.text);
            for child in &self.children {
                child.write_text_content(out);
                out.push_str(&child.tail);
            }
        }
    }

    /// Whether an element with `tag` occurs anywhere below this node
    #[must_use]
    pub fn has_descendant_tag(&self, tag: &str) -> bool {
        self.children
            .iter()
            .any(|child| (child.is_element() && child.tag == tag) || child.has_descendant_tag(tag))
    }

    /// Number of element nodes in this subtree, this node included
    #[must_use]
    pub fn element_count(&self) -> usize {
        let own = usize::from(self.is_element());
        own + self
            .children
            .iter()
            .map(Node::element_count)
            .sum::<usize>()
    }
}
