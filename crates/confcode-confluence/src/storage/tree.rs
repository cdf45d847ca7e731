//! Tree node representation for Confluence storage format.

use std::collections::BTreeMap;

/// Tag of a structured macro element.
pub const STRUCTURED_MACRO_TAG: &str = "ac:structured-macro";

/// Tag of the literal-body child holding a macro's CDATA payload.
pub const PLAIN_TEXT_BODY_TAG: &str = "ac:plain-text-body";

/// Node in a parsed storage format tree.
#[derive(Debug, Clone, Default)]
pub struct TreeNode {
    /// Element tag name (may include a namespace prefix).
    pub tag: String,
    /// Direct text content.
    pub text: String,
    /// Text after the element (XML tail).
    pub tail: String,
    /// Element attributes.
    pub attrs: BTreeMap<String, String>,
    /// Child nodes.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new tree node with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set tail content.
    #[must_use]
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Set attributes.
    #[must_use]
    pub fn with_attrs(mut self, attrs: BTreeMap<String, String>) -> Self {
        self.attrs = attrs;
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether this element is a heading, levels 1 through 9.
    ///
    /// All nine levels count as heading boundaries for the forward-scan
    /// matching rule.
    #[must_use]
    pub fn is_heading(&self) -> bool {
        let bytes = self.tag.as_bytes();
        bytes.len() == 2 && bytes[0] == b'h' && (b'1'..=b'9').contains(&bytes[1])
    }

    /// Whether this element is a code macro
    /// (`<ac:structured-macro ac:name="code">`).
    #[must_use]
    pub fn is_code_macro(&self) -> bool {
        self.tag == STRUCTURED_MACRO_TAG
            && self.attrs.get("ac:name").is_some_and(|name| name == "code")
    }

    /// Whether this element is a macro's literal (plain-text) body.
    #[must_use]
    pub fn is_plain_text_body(&self) -> bool {
        self.tag == PLAIN_TEXT_BODY_TAG
    }

    /// Normalized text content of this node and its descendants,
    /// used as the file-mapping lookup key for headings.
    #[must_use]
    pub fn heading_text(&self) -> String {
        let mut parts = Vec::new();
        collect_text(self, &mut parts);
        parts.join(" ")
    }

    /// Replace the literal body's payload with `content`, dropping any
    /// previously parsed children. Re-running against a page therefore
    /// never duplicates content.
    pub fn set_literal_content(&mut self, content: &str) {
        self.children.clear();
        self.text = content.to_owned();
    }
}

/// Collect trimmed text fragments from a node's subtree (not its tail).
fn collect_text(node: &TreeNode, parts: &mut Vec<String>) {
    let text = node.text.trim();
    if !text.is_empty() {
        parts.push(text.to_owned());
    }
    for child in &node.children {
        collect_text(child, parts);
        let tail = child.tail.trim();
        if !tail.is_empty() {
            parts.push(tail.to_owned());
        }
    }
}
