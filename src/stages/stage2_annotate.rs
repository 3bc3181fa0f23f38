use serde::Serialize;
use tracing::info;

use crate::error::AnnotateError;
use crate::models::{LabeledLeaf, ParseNode, format_leaves, parse_forest, parse_tree};
use crate::tree::{scan_tree, tag_tree};

/// Configuration for Stage 2
#[derive(Debug, Clone)]
pub struct Stage2Config {
    /// Produce the flat EDITED-only fluency labels
    pub disfluency: bool,
}

impl Default for Stage2Config {
    fn default() -> Self {
        Self { disfluency: true }
    }
}

/// Tag counts gathered while annotating a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationStats {
    pub sentences: usize,
    /// Leaves seen by the flat pass
    pub words: usize,
    pub disfluent_words: usize,
    pub disfluency_regions: usize,
    /// Leaves seen by the structural pass
    pub structural_words: usize,
    pub structural_disfluent_words: usize,
}

/// Result of Stage 2 annotation
#[derive(Debug, Clone)]
pub struct Stage2Result {
    /// One flat `word tag ...` line per sentence, when enabled
    pub flat_lines: Option<Vec<String>>,
    /// One structural `word tag ...` line per sentence
    pub structural_lines: Vec<String>,
    pub stats: AnnotationStats,
}

impl Stage2Result {
    /// Flat fluency artifact: one line per sentence
    pub fn flat_text(&self) -> Option<String> {
        self.flat_lines.as_ref().map(|lines| lines.join("\n"))
    }

    /// Structural artifact: every sentence on a single space-joined line
    pub fn structural_text(&self) -> String {
        self.structural_lines.join(" ")
    }
}

/// Execute Stage 2: tag the leaves of every linearized tree.
///
/// The flat pass scans bracket depth for EDITED regions; the structural pass
/// decodes each tree and also marks INTJ and PRN spans.
pub fn execute_stage2(trees: &[String], config: &Stage2Config) -> Result<Stage2Result, AnnotateError> {
    let mut stats = AnnotationStats {
        sentences: trees.len(),
        ..Default::default()
    };
    let mut flat_lines = config.disfluency.then(Vec::new);
    let mut structural_lines = Vec::with_capacity(trees.len());

    for tree in trees {
        if let Some(lines) = flat_lines.as_mut() {
            let scan = scan_tree(tree)?;
            stats.words += scan.leaves.len();
            stats.disfluent_words += count_disfluent(&scan.leaves);
            stats.disfluency_regions += scan.regions.len();
            lines.push(format_leaves(&scan.leaves));
        }

        let leaves: Vec<LabeledLeaf> = tag_tree(&parse_tree(tree)?).collect();
        stats.structural_words += leaves.len();
        stats.structural_disfluent_words += count_disfluent(&leaves);
        structural_lines.push(format_leaves(&leaves));
    }

    info!(
        "Stage 2: {} sentences, {} flat disfluent words in {} regions, {} of {} structural words tagged E",
        stats.sentences,
        stats.disfluent_words,
        stats.disfluency_regions,
        stats.structural_disfluent_words,
        stats.structural_words
    );

    Ok(Stage2Result {
        flat_lines,
        structural_lines,
        stats,
    })
}

/// Decode a tree file into normalized linearized trees, one per sentence
pub fn linearize_forest(text: &str) -> Result<Vec<String>, AnnotateError> {
    Ok(parse_forest(text)?
        .iter()
        .map(ParseNode::to_string)
        .collect())
}

fn count_disfluent(leaves: &[LabeledLeaf]) -> usize {
    leaves.iter().filter(|l| l.is_disfluent()).count()
}
