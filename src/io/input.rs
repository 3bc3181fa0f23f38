use std::path::Path;

use anyhow::{Context, Result};

use crate::stages::linearize_forest;

/// Read a raw transcript as UTF-8 text
pub fn read_transcript(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}

/// Read a file of bracketed trees, one linearized tree per sentence
pub fn read_tree_file(path: &Path) -> Result<Vec<String>> {
    let content = read_transcript(path)?;
    linearize_forest(&content).with_context(|| format!("Failed to parse trees in {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_tree_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc_parse.txt");
        std::fs::write(&path, "(ROOT (NN yes))\n(ROOT (INTJ (UH uh)))").unwrap();

        let trees = read_tree_file(&path).unwrap();
        assert_eq!(trees, vec!["(ROOT (NN yes))", "(ROOT (INTJ (UH uh)))"]);
    }

    #[test]
    fn test_missing_file() {
        assert!(read_transcript(Path::new("/nonexistent/transcript.txt")).is_err());
    }
}
