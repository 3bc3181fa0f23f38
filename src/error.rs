use thiserror::Error;

/// A linearized tree that is not a single, balanced, bracketed tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed tree ({reason}): {tree:?}")]
pub struct MalformedTreeError {
    /// What was wrong with the bracket structure
    pub reason: String,
    /// The offending tree text
    pub tree: String,
}

impl MalformedTreeError {
    pub fn new(reason: impl Into<String>, tree: &str) -> Self {
        Self {
            reason: reason.into(),
            tree: tree.to_string(),
        }
    }
}

/// Errors raised by the annotation core
#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error(transparent)]
    MalformedTree(#[from] MalformedTreeError),

    /// The parser returned a different number of trees than it was given sentences
    #[error("Parser returned {actual} trees for {expected} sentences")]
    TreeCountMismatch { expected: usize, actual: usize },
}
