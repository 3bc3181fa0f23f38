//! Bracket-depth scanning of linearized trees.
//!
//! The flat fluency pass works directly on the whitespace tokens of a tree such
//! as `(ROOT (EDITED (NP (DT the))) (VP (VBZ runs)))`. Every token that carries
//! a `)` closes a leaf, and leaves inside an `(EDITED` subtree are disfluent.
//! Region boundaries come from two running bracket counters that are re-anchored
//! at every `(EDITED` token rather than from a stack, so nested regions are
//! tracked relative to the innermost marker only.

use crate::error::MalformedTreeError;
use crate::models::{FluencyTag, LabeledLeaf, format_leaves};

/// Token that opens a disfluent subtree
pub const EDITED_MARKER: &str = "(EDITED";

/// A whitespace-delimited unit of a linearized tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeToken<'a> {
    pub text: &'a str,
    /// Number of `(` characters in the token
    pub opens: usize,
    /// Number of `)` characters in the token
    pub closes: usize,
}

impl<'a> TreeToken<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            opens: text.matches('(').count(),
            closes: text.matches(')').count(),
        }
    }

    pub fn opens_edited(&self) -> bool {
        self.text.contains(EDITED_MARKER)
    }

    /// Whether the token ends a leaf (`word)` or `word)))`)
    pub fn closes_leaf(&self) -> bool {
        self.closes > 0
    }

    /// The leaf word, i.e. the token with every `)` removed
    pub fn word(&self) -> String {
        self.text.replace(')', "")
    }
}

/// A run of disfluent leaves, as a half-open range of leaf indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisfluencyRegion {
    pub start: usize,
    pub end: usize,
}

impl DisfluencyRegion {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, leaf_index: usize) -> bool {
        (self.start..self.end).contains(&leaf_index)
    }
}

/// Leaves and disfluency regions found by one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub leaves: Vec<LabeledLeaf>,
    pub regions: Vec<DisfluencyRegion>,
}

/// Split a linearized tree into tokens on whitespace
pub fn tokenize(tree: &str) -> Vec<TreeToken<'_>> {
    tree.split_whitespace().map(TreeToken::new).collect()
}

/// Check that `tree` is exactly one balanced bracketed tree
pub fn validate_balanced(tree: &str) -> Result<(), MalformedTreeError> {
    let trimmed = tree.trim();
    if trimmed.is_empty() {
        return Err(MalformedTreeError::new("empty tree", tree));
    }
    if !trimmed.starts_with('(') {
        return Err(MalformedTreeError::new("missing root bracket", tree));
    }

    let mut depth = 0usize;
    let mut root_closed_at = None;
    for (i, c) in trimmed.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| MalformedTreeError::new("unbalanced closing bracket", tree))?;
                if depth == 0 && root_closed_at.is_none() {
                    root_closed_at = Some(i);
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(MalformedTreeError::new("unclosed opening bracket", tree));
    }
    if root_closed_at.is_some_and(|i| i + 1 < trimmed.len()) {
        return Err(MalformedTreeError::new("content after root closes", tree));
    }
    Ok(())
}

/// Scan a linearized tree once for its tagged leaves and disfluency regions.
///
/// Trees without any `EDITED` marker are tagged with a plain linear scan;
/// otherwise the bracket-counting scan decides which leaves fall in a region.
pub fn scan_tree(tree: &str) -> Result<ScanResult, MalformedTreeError> {
    validate_balanced(tree)?;
    let tokens = tokenize(tree);

    if tree.contains("EDITED") {
        Ok(scan_edited(&tokens))
    } else {
        Ok(ScanResult {
            leaves: scan_plain(&tokens),
            regions: Vec::new(),
        })
    }
}

/// Tag every leaf of a linearized tree as fluent (`_`) or disfluent (`E`)
pub fn scan_fluent(tree: &str) -> Result<Vec<LabeledLeaf>, MalformedTreeError> {
    Ok(scan_tree(tree)?.leaves)
}

/// Disfluency regions of a linearized tree, as leaf index ranges
pub fn disfluency_regions(tree: &str) -> Result<Vec<DisfluencyRegion>, MalformedTreeError> {
    Ok(scan_tree(tree)?.regions)
}

/// Flat fluency line for one tree: `word tag word tag ...`
pub fn flat_labels(tree: &str) -> Result<String, MalformedTreeError> {
    Ok(format_leaves(&scan_fluent(tree)?))
}

/// Pair every leaf-closing token with `_`
pub fn scan_plain(tokens: &[TreeToken<'_>]) -> Vec<LabeledLeaf> {
    tokens
        .iter()
        .filter(|t| t.closes_leaf())
        .map(|t| LabeledLeaf::new(t.word(), FluencyTag::Fluent))
        .collect()
}

/// Counter-based scan over the tokens of a full tree, root included.
///
/// The root's opening token is dropped and one `)` is removed from the last
/// token before counting starts.
pub fn scan_edited(tokens: &[TreeToken<'_>]) -> ScanResult {
    let mut body: Vec<TreeToken<'_>> = tokens.iter().skip(1).copied().collect();
    if let Some(last) = body.last_mut() {
        let text = last.text.strip_suffix(')').unwrap_or(last.text);
        *last = TreeToken::new(text);
    }

    let mut result = ScanResult::default();
    let mut open_count = 0usize;
    let mut close_count = 0usize;
    let mut in_disfluent_region = false;
    let mut region_start = 0usize;

    for token in &body {
        open_count += token.opens;
        close_count += token.closes;

        if token.opens_edited() {
            // Counters restart at the newest marker, so the region closes when
            // this subtree's brackets balance, not the outermost one's
            open_count = 1;
            close_count = 0;
            if !in_disfluent_region {
                region_start = result.leaves.len();
            }
            in_disfluent_region = true;
        } else if token.closes_leaf() {
            result.leaves.push(LabeledLeaf::new(
                token.word(),
                FluencyTag::from_disfluent(in_disfluent_region),
            ));
        }

        if close_count > 0 && open_count == close_count {
            if in_disfluent_region {
                result.regions.push(DisfluencyRegion {
                    start: region_start,
                    end: result.leaves.len(),
                });
            }
            open_count = 0;
            close_count = 0;
            in_disfluent_region = false;
        }
    }

    if in_disfluent_region {
        result.regions.push(DisfluencyRegion {
            start: region_start,
            end: result.leaves.len(),
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(tree: &str) -> Vec<(String, &'static str)> {
        scan_fluent(tree)
            .unwrap()
            .into_iter()
            .map(|leaf| (leaf.word, leaf.tag.as_str()))
            .collect()
    }

    fn pairs(expected: &[(&str, &'static str)]) -> Vec<(String, &'static str)> {
        expected.iter().map(|(w, t)| (w.to_string(), *t)).collect()
    }

    #[test]
    fn test_token_counts() {
        let token = TreeToken::new("runs)))");
        assert_eq!(token.opens, 0);
        assert_eq!(token.closes, 3);
        assert_eq!(token.word(), "runs");
        assert!(TreeToken::new("(EDITED").opens_edited());
        assert!(!TreeToken::new("(NP").closes_leaf());
    }

    #[test]
    fn test_trees_without_edited_are_fluent() {
        let trees = [
            "(ROOT (NP (DT the) (NN dog)) (VP (VBZ runs)))",
            "(ROOT (S (INTJ (UH uh)) (NP (PRP i)) (VP (VBP know))))",
            "(S (PRN (, ,) (S (NP (PRP you)) (VP (VBP know))) (, ,)))",
            "(X (Y z))",
        ];
        for tree in trees {
            assert!(scan_fluent(tree).unwrap().iter().all(|l| !l.is_disfluent()));
        }
    }

    #[test]
    fn test_single_edited_region() {
        assert_eq!(
            tags("(ROOT (EDITED (NP (DT the))) (VP (VBZ runs)))"),
            pairs(&[("the", "E"), ("runs", "_")])
        );
    }

    #[test]
    fn test_repair_after_reparandum() {
        let tree = "(ROOT (S (EDITED (NP (PRP she))) (NP (PRP she)) (VP (VBZ likes) (NP (NNS movies)))))";
        assert_eq!(flat_labels(tree).unwrap(), "she E she _ likes _ movies _");
    }

    #[test]
    fn test_nested_edited_closes_at_inner_balance() {
        // The inner marker re-anchors the counters and `(NN` balances them at 3 == 3
        assert_eq!(
            tags("(ROOT (EDITED (NP (EDITED (DT a))) (NN b)))"),
            pairs(&[("a", "E"), ("b", "_")])
        );
    }

    #[test]
    fn test_triple_nested_edited() {
        assert_eq!(
            flat_labels("(S (EDITED (EDITED (EDITED (X a)) (Y b)) (Z c)) (W d))").unwrap(),
            "a E b _ c _ d _"
        );
        assert_eq!(
            disfluency_regions("(S (EDITED (EDITED (EDITED (X a)) (Y b)) (Z c)) (W d))").unwrap(),
            vec![DisfluencyRegion { start: 0, end: 1 }]
        );
    }

    #[test]
    fn test_nested_edited_uses_reset_semantics() {
        // The inner marker re-anchors the counters, so the region ends with the
        // inner subtree and `b` is tagged fluent although the outer EDITED covers it.
        assert_eq!(
            tags("(ROOT (EDITED (EDITED (DT a)) (NN b)) (NN c))"),
            pairs(&[("a", "E"), ("b", "_"), ("c", "_")])
        );
    }

    #[test]
    fn test_adjacent_edited_regions() {
        let tree = "(ROOT (S (EDITED (NP (PRP i))) (EDITED (NP (PRP i))) (NP (PRP i)) (VP (VBP mean))))";
        assert_eq!(flat_labels(tree).unwrap(), "i E i E i _ mean _");
        assert_eq!(
            disfluency_regions(tree).unwrap(),
            vec![
                DisfluencyRegion { start: 0, end: 1 },
                DisfluencyRegion { start: 1, end: 2 },
            ]
        );
    }

    #[test]
    fn test_regions_follow_tags() {
        let region = disfluency_regions("(ROOT (EDITED (NP (DT the))) (VP (VBZ runs)))").unwrap();
        assert_eq!(region, vec![DisfluencyRegion { start: 0, end: 1 }]);
        assert!(region[0].contains(0));
        assert!(!region[0].contains(1));

        let nested = disfluency_regions("(ROOT (EDITED (NP (EDITED (DT a))) (NN b)))").unwrap();
        assert_eq!(nested, vec![DisfluencyRegion { start: 0, end: 1 }]);

        assert!(disfluency_regions("(ROOT (NP (DT the)))").unwrap().is_empty());
    }

    #[test]
    fn test_edited_as_word_does_not_open_region() {
        assert_eq!(
            tags("(ROOT (NP (NN EDITED)) (VP (VBD ran)))"),
            pairs(&[("EDITED", "_"), ("ran", "_")])
        );
    }

    #[test]
    fn test_end_to_end_fluent_sentence() {
        assert_eq!(
            flat_labels("(ROOT (NP (DT the) (NN dog)) (VP (VBZ runs)))").unwrap(),
            "the _ dog _ runs _"
        );
    }

    #[test]
    fn test_scan_tree_returns_leaves_and_regions() {
        let scan = scan_tree("(ROOT (S (EDITED (NP (PRP i))) (NP (PRP i)) (VP (VBP see))))").unwrap();
        assert_eq!(format_leaves(&scan.leaves), "i E i _ see _");
        assert_eq!(scan.regions, vec![DisfluencyRegion { start: 0, end: 1 }]);

        let plain = scan_tree("(ROOT (NP (DT the) (NN dog)))").unwrap();
        assert_eq!(plain.leaves.len(), 2);
        assert!(plain.regions.is_empty());
    }

    #[test]
    fn test_scan_is_repeatable() {
        let tree = "(ROOT (EDITED (NP (EDITED (DT a))) (NN b)))";
        assert_eq!(scan_fluent(tree).unwrap(), scan_fluent(tree).unwrap());
    }

    #[test]
    fn test_malformed_trees_fail_fast() {
        assert_eq!(
            scan_fluent("(ROOT (EDITED (NP (DT the)) (VP (VBZ runs)))").unwrap_err().reason,
            "unclosed opening bracket"
        );
        assert_eq!(
            scan_fluent("(ROOT (NP (DT the))))").unwrap_err().reason,
            "unbalanced closing bracket"
        );
        assert_eq!(scan_fluent("   ").unwrap_err().reason, "empty tree");
        assert_eq!(scan_fluent("the dog").unwrap_err().reason, "missing root bracket");
        assert_eq!(
            scan_fluent("(A (B b)) (C (D d))").unwrap_err().reason,
            "content after root closes"
        );
    }
}
