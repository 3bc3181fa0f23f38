use anyhow::Result;
use tracing::{debug, info};

use crate::error::AnnotateError;
use crate::parser::TreeParser;

/// Configuration for Stage 1
#[derive(Debug, Clone)]
pub struct Stage1Config {
    /// Sentences sent to the parser per call
    pub batch_size: usize,
}

impl Default for Stage1Config {
    fn default() -> Self {
        Self { batch_size: 1 }
    }
}

/// Result of Stage 1 parsing
#[derive(Debug)]
pub struct Stage1Result {
    /// One linearized tree per sentence, in sentence order
    pub trees: Vec<String>,
    /// Number of parser calls made
    pub batches: usize,
}

/// Execute Stage 1: parse every sentence with the external parser
pub async fn execute_stage1<P: TreeParser>(
    parser: &P,
    sentences: &[String],
    config: &Stage1Config,
) -> Result<Stage1Result> {
    let batch_size = config.batch_size.max(1);
    let mut trees = Vec::with_capacity(sentences.len());
    let mut batches = 0;

    for batch in sentences.chunks(batch_size) {
        let parsed = parser.parse_batch(batch).await?;
        if parsed.len() != batch.len() {
            return Err(AnnotateError::TreeCountMismatch {
                expected: batch.len(),
                actual: parsed.len(),
            }
            .into());
        }
        batches += 1;
        debug!("Batch {}: parsed {} sentences", batches, batch.len());
        trees.extend(parsed);
    }

    info!(
        "Stage 1: parsed {} sentences in {} batches",
        trees.len(),
        batches
    );

    Ok(Stage1Result { trees, batches })
}
