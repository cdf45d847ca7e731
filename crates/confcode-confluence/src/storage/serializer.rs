//! Storage format serializer with CDATA support.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use super::tree::TreeNode;

/// Pattern for matching plain-text-body elements. `(?s)` so that payloads
/// spanning many lines (whole source files) are matched.
static PLAIN_TEXT_BODY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(<(?:ac:|ns\d+:)?plain-text-body[^>]*>)(.*?)(</(?:ac:|ns\d+:)?plain-text-body>)")
        .expect("invalid plain-text-body regex")
});

/// Serialize a parsed tree back to a storage format string.
///
/// Only the children of the synthetic root are serialized, so the output
/// is the page's inner content with no wrapper tags. CDATA sections are
/// restored around every `ac:plain-text-body` payload so embedded source
/// text is emitted as literal, unescaped character data.
pub fn serialize(tree: &TreeNode) -> String {
    let mut out = String::with_capacity(4096);

    for child in &tree.children {
        serialize_node(child, &mut out);
    }

    restore_cdata_sections(&out)
}

/// Serialize a single node recursively.
fn serialize_node(node: &TreeNode, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);

    for (key, value) in &node.attrs {
        write!(out, r#" {}="{}""#, key, escape_attr(value)).unwrap();
    }

    if node.children.is_empty() && node.text.is_empty() {
        out.push_str(" />");
    } else {
        out.push('>');

        if !node.text.is_empty() {
            out.push_str(&escape_text(&node.text));
        }

        for child in &node.children {
            serialize_node(child, out);
        }

        write!(out, "</{}>", node.tag).unwrap();
    }

    if !node.tail.is_empty() {
        out.push_str(&escape_text(&node.tail));
    }
}

/// Escape text for XML content.
fn escape_text(text: &str) -> String {
    escape_xml(text, false)
}

/// Escape text for XML attribute values.
fn escape_attr(text: &str) -> String {
    escape_xml(text, true)
}

/// Escape XML special characters.
fn escape_xml(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            '\'' if escape_quotes => result.push_str("&apos;"),
            _ => result.push(ch),
        }
    }
    result
}

/// Restore CDATA sections for plain-text-body elements.
///
/// Undoes the entity escaping applied during serialization and wraps the
/// raw payload in `<![CDATA[...]]>`. A literal `]]>` in the payload is
/// split across adjacent CDATA sections so the output stays well-formed.
fn restore_cdata_sections(markup: &str) -> String {
    PLAIN_TEXT_BODY_PATTERN
        .replace_all(markup, |caps: &regex::Captures| {
            let tag_start = &caps[1];
            let tag_end = &caps[3];

            let content = caps[2]
                .replace("&lt;", "<")
                .replace("&gt;", ">")
                .replace("&quot;", "\"")
                .replace("&apos;", "'")
                .replace("&amp;", "&")
                .replace("]]>", "]]]]><![CDATA[>");

            format!("{tag_start}<![CDATA[{content}]]>{tag_end}")
        })
        .into_owned()
}
