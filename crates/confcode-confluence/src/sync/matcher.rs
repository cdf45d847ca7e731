//! Heading to code-macro matching and mutation.
//!
//! A heading is matched to a code macro iff, scanning forward through its
//! following siblings, a code macro occurs strictly before any other
//! heading-level element (h1 through h9 all count as boundaries). The
//! first macro found is the one associated; at most one per heading.

use confcode_config::FileMapping;
use tracing::{info, warn};

use super::report::HeadingOutcome;
use crate::storage::{PLAIN_TEXT_BODY_TAG, TreeNode};

/// Walk the tree and sync every matched heading's code macro from its
/// mapped file. Returns the per-heading outcomes in document order.
///
/// File mismatches are not fatal: an unmatched heading or an unreadable
/// file produces a diagnostic outcome and the scan continues.
pub(crate) fn sync_code_blocks(root: &mut TreeNode, files: &FileMapping) -> Vec<HeadingOutcome> {
    let mut outcomes = Vec::new();
    sync_level(root, files, &mut outcomes);
    outcomes
}

/// Process one sibling list, then recurse into children.
fn sync_level(node: &mut TreeNode, files: &FileMapping, outcomes: &mut Vec<HeadingOutcome>) {
    for (heading_idx, macro_idx) in matched_pairs(&node.children) {
        let heading = node.children[heading_idx].heading_text();
        outcomes.push(apply_mapping(
            &mut node.children[macro_idx],
            &heading,
            files,
        ));
    }

    for child in &mut node.children {
        // Macro bodies never contain headings of their own
        if !child.is_code_macro() {
            sync_level(child, files, outcomes);
        }
    }
}

/// Indices of (heading, first following code macro) pairs among siblings.
fn matched_pairs(siblings: &[TreeNode]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();

    for (i, sibling) in siblings.iter().enumerate() {
        if !sibling.is_heading() {
            continue;
        }
        for (j, following) in siblings.iter().enumerate().skip(i + 1) {
            if following.is_heading() {
                break;
            }
            if following.is_code_macro() {
                pairs.push((i, j));
                break;
            }
        }
    }

    pairs
}

/// Mutate one code macro from the mapping entry for `heading`.
fn apply_mapping(
    macro_node: &mut TreeNode,
    heading: &str,
    files: &FileMapping,
) -> HeadingOutcome {
    // An empty macro lacks the literal-body child; create it on demand
    let body_idx = match macro_node
        .children
        .iter()
        .position(TreeNode::is_plain_text_body)
    {
        Some(idx) => idx,
        None => {
            macro_node.children.push(TreeNode::new(PLAIN_TEXT_BODY_TAG));
            macro_node.children.len() - 1
        }
    };

    let Some(path) = files.get(heading) else {
        warn!("Unmatched heading \"{}\"", heading);
        return HeadingOutcome::Unmatched {
            heading: heading.to_owned(),
        };
    };

    match std::fs::read_to_string(path) {
        Ok(content) => {
            info!("Heading \"{}\" matched to file {}", heading, path.display());
            macro_node.children[body_idx].set_literal_content(&content);
            HeadingOutcome::Updated {
                heading: heading.to_owned(),
                path: path.clone(),
            }
        }
        Err(error) => {
            warn!(
                "Can't read file {} for heading \"{}\": {}",
                path.display(),
                heading,
                error
            );
            HeadingOutcome::FileError {
                heading: heading.to_owned(),
                path: path.clone(),
                error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;
    use std::path::PathBuf;

    use super::*;
    use crate::storage::{parse, serialize};
    use pretty_assertions::assert_eq;

    const CODE_MACRO: &str = r#"<ac:structured-macro ac:name="code"><ac:plain-text-body><![CDATA[old]]></ac:plain-text-body></ac:structured-macro>"#;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn mapping(entries: &[(&str, &PathBuf)]) -> FileMapping {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).clone()))
            .collect()
    }

    #[test]
    fn test_heading_with_macro_is_updated() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_fixture(&dir, "a.txt", "print(1)");

        let mut tree = parse(&format!("<h1>Foo</h1>{CODE_MACRO}")).unwrap();
        let outcomes = sync_code_blocks(&mut tree, &mapping(&[("Foo", &file)]));

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_updated());

        let markup = serialize(&tree);
        assert!(markup.contains("<![CDATA[print(1)]]>"));
        assert!(!markup.contains("old"));
    }

    #[test]
    fn test_heading_blocked_by_nearer_heading() {
        // Bar owns the macro; Foo's forward scan hits Bar first
        let dir = tempfile::tempdir().unwrap();
        let file = write_fixture(&dir, "a.txt", "print(1)");

        let mut tree = parse(&format!("<h1>Foo</h1><h2>Bar</h2>{CODE_MACRO}")).unwrap();
        let outcomes = sync_code_blocks(
            &mut tree,
            &mapping(&[("Foo", &file), ("Bar", &file)]),
        );

        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            HeadingOutcome::Updated { heading, .. } => assert_eq!(heading, "Bar"),
            other => panic!("expected Updated, got {other:?}"),
        }
    }

    #[test]
    fn test_first_macro_wins() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_fixture(&dir, "a.txt", "new");

        let mut tree = parse(&format!("<h1>Foo</h1>{CODE_MACRO}{CODE_MACRO}")).unwrap();
        let outcomes = sync_code_blocks(&mut tree, &mapping(&[("Foo", &file)]));

        assert_eq!(outcomes.len(), 1);
        let markup = serialize(&tree);
        // First macro mutated, second untouched
        let first = markup.find("<![CDATA[new]]>").unwrap();
        let second = markup.find("<![CDATA[old]]>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_heading_without_macro_is_skipped() {
        let mut tree = parse("<h1>Bar</h1><p>prose only</p>").unwrap();
        let outcomes = sync_code_blocks(&mut tree, &FileMapping::new());
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_unmatched_heading_produces_diagnostic_and_no_mutation() {
        let mut tree = parse(&format!("<h1>Unknown</h1>{CODE_MACRO}")).unwrap();
        let outcomes = sync_code_blocks(&mut tree, &FileMapping::new());

        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            HeadingOutcome::Unmatched { heading } => assert_eq!(heading, "Unknown"),
            other => panic!("expected Unmatched, got {other:?}"),
        }
        assert!(serialize(&tree).contains("<![CDATA[old]]>"));
    }

    #[test]
    fn test_missing_file_produces_diagnostic_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_fixture(&dir, "b.txt", "ok");
        let missing = dir.path().join("nope.txt");

        let mut tree = parse(&format!(
            "<h1>First</h1>{CODE_MACRO}<h1>Second</h1>{CODE_MACRO}"
        ))
        .unwrap();
        let outcomes = sync_code_blocks(
            &mut tree,
            &mapping(&[("First", &missing), ("Second", &good)]),
        );

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], HeadingOutcome::FileError { .. }));
        assert!(outcomes[1].is_updated());

        let markup = serialize(&tree);
        assert!(markup.contains("<![CDATA[old]]>"));
        assert!(markup.contains("<![CDATA[ok]]>"));
    }

    #[test]
    fn test_empty_macro_gains_literal_body() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_fixture(&dir, "a.txt", "filled");

        let mut tree =
            parse(r#"<h1>Foo</h1><ac:structured-macro ac:name="code" />"#).unwrap();
        let outcomes = sync_code_blocks(&mut tree, &mapping(&[("Foo", &file)]));

        assert!(outcomes[0].is_updated());
        assert!(serialize(&tree).contains("<ac:plain-text-body><![CDATA[filled]]></ac:plain-text-body>"));
    }

    #[test]
    fn test_source_code_injected_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let source = "if a < b && c > d {\n    run(\"x & y\");\n}\n";
        let file = write_fixture(&dir, "src.rs", source);

        let mut tree = parse(&format!("<h2>Snippet</h2>{CODE_MACRO}")).unwrap();
        sync_code_blocks(&mut tree, &mapping(&[("Snippet", &file)]));

        let markup = serialize(&tree);
        let expected = format!("<![CDATA[{source}]]>");
        assert!(
            markup.contains(&expected),
            "expected literal CDATA payload in {markup}"
        );
    }

    #[test]
    fn test_non_code_macro_is_not_matched() {
        let mut tree = parse(
            r#"<h1>Foo</h1><ac:structured-macro ac:name="toc"><ac:plain-text-body><![CDATA[x]]></ac:plain-text-body></ac:structured-macro>"#,
        )
        .unwrap();
        let outcomes = sync_code_blocks(&mut tree, &FileMapping::new());
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_all_heading_levels_are_boundaries() {
        // h9 between h1 and the macro blocks the match for h1
        let dir = tempfile::tempdir().unwrap();
        let file = write_fixture(&dir, "a.txt", "x");

        let mut tree = parse(&format!("<h1>Foo</h1><h9>Deep</h9>{CODE_MACRO}")).unwrap();
        let outcomes = sync_code_blocks(
            &mut tree,
            &mapping(&[("Foo", &file), ("Deep", &file)]),
        );

        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            HeadingOutcome::Updated { heading, .. } => assert_eq!(heading, "Deep"),
            other => panic!("expected Updated for Deep, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_heading_without_macro_is_ignored() {
        // <h1>Foo</h1><macro/><h1>Bar</h1> with mapping {Foo: a.txt}
        let dir = tempfile::tempdir().unwrap();
        let file = write_fixture(&dir, "a.txt", "print(1)");

        let mut tree = parse(&format!("<h1>Foo</h1>{CODE_MACRO}<h1>Bar</h1>")).unwrap();
        let outcomes = sync_code_blocks(&mut tree, &mapping(&[("Foo", &file)]));

        // Bar has no following macro: not selected at all
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            HeadingOutcome::Updated { heading, .. } => assert_eq!(heading, "Foo"),
            other => panic!("expected Updated for Foo, got {other:?}"),
        }

        // Full output: injected CDATA, untouched Bar, no wrapper tags
        let markup = serialize(&tree);
        assert_eq!(
            markup,
            concat!(
                "<h1>Foo</h1>",
                r#"<ac:structured-macro ac:name="code">"#,
                "<ac:plain-text-body><![CDATA[print(1)]]></ac:plain-text-body>",
                "</ac:structured-macro>",
                "<h1>Bar</h1>"
            )
        );
    }
}
