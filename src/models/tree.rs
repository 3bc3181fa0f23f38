use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use serde::{Deserialize, Serialize};

use crate::error::MalformedTreeError;

use super::SpanKind;

/// In-memory constituency tree. Parents own their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseNode {
    /// A terminal word
    Leaf(String),
    /// A labelled constituent with ordered children
    Internal { label: String, children: Vec<ParseNode> },
}

impl ParseNode {
    pub fn leaf(word: impl Into<String>) -> Self {
        Self::Leaf(word.into())
    }

    pub fn internal(label: impl Into<String>, children: Vec<ParseNode>) -> Self {
        Self::Internal {
            label: label.into(),
            children,
        }
    }

    /// Label of an internal node, `None` for leaves
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Leaf(_) => None,
            Self::Internal { label, .. } => Some(label),
        }
    }

    pub fn children(&self) -> &[ParseNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Internal { children, .. } => children,
        }
    }

    /// Whether this node starts an EDITED/INTJ/PRN span.
    ///
    /// Matches the list encoding `[label, child, ...]` where any element equal to
    /// one of the special labels counts: the node's own label, or a leaf child
    /// whose word is literally the label.
    pub fn is_special_span(&self) -> bool {
        match self {
            Self::Leaf(_) => false,
            Self::Internal { label, children } => {
                SpanKind::from_label(label).is_special()
                    || children.iter().any(|child| match child {
                        Self::Leaf(word) => SpanKind::from_label(word).is_special(),
                        Self::Internal { .. } => false,
                    })
            }
        }
    }

    /// Leaf words in left-to-right order
    pub fn leaves(&self) -> Vec<&str> {
        let mut words = Vec::new();
        self.collect_leaves(&mut words);
        words
    }

    fn collect_leaves<'a>(&'a self, words: &mut Vec<&'a str>) {
        match self {
            Self::Leaf(word) => words.push(word),
            Self::Internal { children, .. } => {
                for child in children {
                    child.collect_leaves(words);
                }
            }
        }
    }
}

impl fmt::Display for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(word) => f.write_str(word),
            Self::Internal { label, children } => {
                write!(f, "({}", label)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme<'a> {
    Open,
    Close,
    Atom(&'a str),
}

struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Lexeme<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let (start, c) = self.chars.next()?;
        match c {
            '(' => Some(Lexeme::Open),
            ')' => Some(Lexeme::Close),
            _ => {
                let mut end = start + c.len_utf8();
                while let Some((i, c)) = self
                    .chars
                    .next_if(|(_, c)| !c.is_whitespace() && *c != '(' && *c != ')')
                {
                    end = i + c.len_utf8();
                }
                Some(Lexeme::Atom(&self.source[start..end]))
            }
        }
    }
}

/// Decode a single linearized tree such as `(ROOT (NP (DT the) (NN dog)))`
pub fn parse_tree(text: &str) -> Result<ParseNode, MalformedTreeError> {
    let mut trees = parse_forest(text)?;
    match trees.len() {
        0 => Err(MalformedTreeError::new("empty tree", text)),
        1 => Ok(trees.remove(0)),
        n => Err(MalformedTreeError::new(
            format!("expected one tree, found {}", n),
            text,
        )),
    }
}

/// Decode every bracketed tree in `text`, in order.
///
/// Trees may be separated by any whitespace, and a root may carry an empty
/// label as in treebank files (`( (S ...))`).
pub fn parse_forest(text: &str) -> Result<Vec<ParseNode>, MalformedTreeError> {
    let mut lexer = Lexer::new(text).peekable();
    let mut trees = Vec::new();

    while let Some(lexeme) = lexer.next() {
        match lexeme {
            Lexeme::Open => trees.push(parse_node(&mut lexer, text)?),
            Lexeme::Close => {
                return Err(MalformedTreeError::new("unbalanced closing bracket", text));
            }
            Lexeme::Atom(atom) => {
                return Err(MalformedTreeError::new(
                    format!("word {:?} outside of brackets", atom),
                    text,
                ));
            }
        }
    }

    Ok(trees)
}

/// Parse the remainder of a node whose opening bracket was already consumed
fn parse_node<'a>(
    lexer: &mut Peekable<Lexer<'a>>,
    text: &str,
) -> Result<ParseNode, MalformedTreeError> {
    let label = match lexer.next_if(|l| matches!(l, Lexeme::Atom(_))) {
        Some(Lexeme::Atom(label)) => label.to_string(),
        _ => String::new(),
    };

    let mut children = Vec::new();
    loop {
        match lexer.next() {
            Some(Lexeme::Open) => children.push(parse_node(lexer, text)?),
            Some(Lexeme::Atom(word)) => children.push(ParseNode::leaf(word)),
            Some(Lexeme::Close) => return Ok(ParseNode::Internal { label, children }),
            None => return Err(MalformedTreeError::new("unclosed opening bracket", text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_tree() {
        let tree = parse_tree("(ROOT (NP (DT the) (NN dog)))").unwrap();
        let expected = ParseNode::internal(
            "ROOT",
            vec![ParseNode::internal(
                "NP",
                vec![
                    ParseNode::internal("DT", vec![ParseNode::leaf("the")]),
                    ParseNode::internal("NN", vec![ParseNode::leaf("dog")]),
                ],
            )],
        );
        assert_eq!(tree, expected);
        assert_eq!(tree.leaves(), vec!["the", "dog"]);
    }

    #[test]
    fn test_display_relinearizes() {
        let text = "(ROOT (S (INTJ (UH uh)) (NP (PRP i)) (VP (VBP know))))";
        assert_eq!(parse_tree(text).unwrap().to_string(), text);
    }

    #[test]
    fn test_parse_tolerates_irregular_whitespace() {
        let tree = parse_tree("(ROOT\n  (NP(DT the)\t(NN dog)) )").unwrap();
        assert_eq!(tree.to_string(), "(ROOT (NP (DT the) (NN dog)))");
    }

    #[test]
    fn test_parse_forest_with_empty_root_label() {
        let trees = parse_forest("( (S (NP (PRP i))))\n\n(ROOT (INTJ (UH yeah)))\n").unwrap();
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].label(), Some(""));
        assert_eq!(trees[1].leaves(), vec!["yeah"]);
    }

    #[test]
    fn test_unbalanced_trees_are_rejected() {
        let err = parse_tree("(ROOT (NP (DT the))").unwrap_err();
        assert_eq!(err.reason, "unclosed opening bracket");

        let err = parse_tree("(ROOT (NP (DT the))))").unwrap_err();
        assert_eq!(err.reason, "unbalanced closing bracket");

        assert!(parse_tree("").is_err());
        assert!(parse_tree("the (DT dog)").is_err());
        assert!(parse_tree("(A a) (B b)").is_err());
    }

    #[test]
    fn test_special_span_detection() {
        let intj = parse_tree("(INTJ (UH um))").unwrap();
        assert!(intj.is_special_span());

        let np = parse_tree("(NP (DT the))").unwrap();
        assert!(!np.is_special_span());

        // A preterminal whose word is itself a special label also matches
        let odd = parse_tree("(NN PRN)").unwrap();
        assert!(odd.is_special_span());

        assert!(!ParseNode::leaf("EDITED").is_special_span());
    }
}
