//! Storage format parser with namespace support.

use std::collections::BTreeMap;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::entities::convert_html_entities;
use super::tree::TreeNode;
use crate::error::StorageError;

/// Confluence XML namespaces.
const NAMESPACES: &[(&str, &str)] = &[
    ("ac", "http://www.atlassian.com/schema/confluence/4/ac/"),
    ("ri", "http://www.atlassian.com/schema/confluence/4/ri/"),
];

/// Parse a storage format body into a [`TreeNode`] tree.
///
/// The body is wrapped in a synthetic root element carrying `ac:` and
/// `ri:` namespace declarations; named HTML entities are converted to
/// Unicode first since the storage format declares none of them. The
/// returned node is the synthetic root, whose children are the page's
/// actual top-level elements, so no wrapper tags ever leak into
/// serialized output.
pub fn parse(markup: &str) -> Result<TreeNode, StorageError> {
    let markup = convert_html_entities(markup);

    let namespace_decls = NAMESPACES
        .iter()
        .map(|(prefix, uri)| format!(r#"xmlns:{prefix}="{uri}""#))
        .collect::<Vec<_>>()
        .join(" ");
    let wrapped = format!("<root {namespace_decls}>{markup}</root>");

    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = decode_tag(&reader, e.name().as_ref());
                let mut root = parse_children(&mut reader, &tag)?;
                root.tag = tag;
                return Ok(root);
            }
            Event::Eof => return Ok(TreeNode::default()),
            _ => {}
        }
        buf.clear();
    }
}

/// Parse child nodes up to the matching end tag of `parent_tag`.
fn parse_children<R: BufRead>(
    reader: &mut Reader<R>,
    parent_tag: &str,
) -> Result<TreeNode, StorageError> {
    let mut buf = Vec::new();
    let mut node = TreeNode::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let child_tag = decode_tag(reader, e.name().as_ref());
                let child_attrs = decode_attrs(reader, &e);
                let mut child = parse_children(reader, &child_tag)?;
                child.tag = child_tag;
                child.attrs = child_attrs;
                node.children.push(child);
            }
            Event::Empty(e) => {
                let child = TreeNode {
                    tag: decode_tag(reader, e.name().as_ref()),
                    attrs: decode_attrs(reader, &e),
                    ..Default::default()
                };
                node.children.push(child);
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?.into_owned();
                append_text(&mut node, &text);
            }
            Event::GeneralRef(e) => {
                // Entity references left alone by the HTML pre-pass
                // (e.g. &lt; &gt; &amp;)
                let entity = reader.decoder().decode(&e)?.into_owned();
                append_text(&mut node, &decode_entity(&entity));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                append_text(&mut node, &text);
            }
            Event::End(e) => {
                if decode_tag(reader, e.name().as_ref()) == parent_tag {
                    return Ok(node);
                }
                // Mismatched end tag - continue
            }
            Event::Eof => return Ok(node),
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

/// Append text either to the node's own text or the last child's tail.
fn append_text(node: &mut TreeNode, text: &str) {
    if let Some(last_child) = node.children.last_mut() {
        last_child.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

fn decode_tag<R: BufRead>(reader: &Reader<R>, name: &[u8]) -> String {
    reader.decoder().decode(name).map_or_else(
        |_| String::from_utf8_lossy(name).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

fn decode_attrs<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    for attr in e.attributes().flatten() {
        let key = reader.decoder().decode(attr.key.as_ref()).map_or_else(
            |_| String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            std::borrow::Cow::into_owned,
        );

        // Skip namespace declarations
        if key.starts_with("xmlns") {
            continue;
        }

        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );

        attrs.insert(key, value);
    }
    attrs
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        // Numeric character references
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        // Unknown entity - preserve as-is
        _ => format!("&{entity};"),
    }
}
