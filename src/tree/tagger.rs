use std::slice;

use crate::error::MalformedTreeError;
use crate::models::{FluencyTag, LabeledLeaf, ParseNode, format_leaves, parse_forest, parse_tree};

/// Lazy left-to-right traversal yielding one tagged leaf per word.
///
/// Every leaf beneath an EDITED, INTJ or PRN node is tagged `E`, including
/// leaves under plain nodes nested inside such a span. All other leaves are
/// tagged `_`. The root's own label is never tested.
pub struct TaggedLeaves<'a> {
    root_leaf: Option<&'a str>,
    stack: Vec<(slice::Iter<'a, ParseNode>, bool)>,
}

impl<'a> TaggedLeaves<'a> {
    fn new(root: &'a ParseNode) -> Self {
        match root {
            ParseNode::Leaf(word) => Self {
                root_leaf: Some(word.as_str()),
                stack: Vec::new(),
            },
            ParseNode::Internal { children, .. } => Self {
                root_leaf: None,
                stack: vec![(children.iter(), false)],
            },
        }
    }
}

impl<'a> Iterator for TaggedLeaves<'a> {
    type Item = LabeledLeaf;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(word) = self.root_leaf.take() {
            return Some(LabeledLeaf::new(word, FluencyTag::Fluent));
        }

        loop {
            let (children, disfluent) = self.stack.last_mut()?;
            let disfluent = *disfluent;
            let Some(node) = children.next() else {
                self.stack.pop();
                continue;
            };
            match node {
                ParseNode::Leaf(word) => {
                    return Some(LabeledLeaf::new(
                        word.as_str(),
                        FluencyTag::from_disfluent(disfluent),
                    ));
                }
                ParseNode::Internal { children, .. } => {
                    let disfluent = disfluent || node.is_special_span();
                    self.stack.push((children.iter(), disfluent));
                }
            }
        }
    }
}

/// Tag the leaves of a parsed tree by the kind of span they fall under
pub fn tag_tree(root: &ParseNode) -> TaggedLeaves<'_> {
    TaggedLeaves::new(root)
}

/// Structural annotation line for one tree: `word tag word tag ...`
pub fn annotate_tree(root: &ParseNode) -> String {
    format_leaves(&tag_tree(root).collect::<Vec<_>>())
}

/// Decode a linearized tree and return its structural annotation line
pub fn annotate_linearized(tree: &str) -> Result<String, MalformedTreeError> {
    Ok(annotate_tree(&parse_tree(tree)?))
}

/// Structural annotation of a whole tree file, all sentences joined by single spaces
pub fn annotate_forest(text: &str) -> Result<String, MalformedTreeError> {
    let lines: Vec<String> = parse_forest(text)?.iter().map(annotate_tree).collect();
    Ok(lines.join(" "))
}
