use tracing::info;

use crate::text::{SplitterConfig, split_sentences};

/// Result of Stage 0 preparation
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    /// Cleaned sentences, in document order
    pub sentences: Vec<String>,
    /// Total words across all sentences
    pub word_count: usize,
}

/// Perform Stage 0: split raw transcript text into parser-ready sentences
pub fn prepare(text: &str, config: &SplitterConfig) -> PreparedDocument {
    let sentences = split_sentences(text, config);
    let word_count = sentences
        .iter()
        .map(|s| s.split_whitespace().count())
        .sum();

    info!(
        "Prepared {} sentences ({} words)",
        sentences.len(),
        word_count
    );

    PreparedDocument {
        sentences,
        word_count,
    }
}
