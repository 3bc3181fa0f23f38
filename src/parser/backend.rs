use std::future::Future;

use anyhow::Result;

use super::{CommandParser, HttpParser};

/// External constituency parser: sentences in, linearized trees out.
///
/// Implementations return exactly one bracketed tree per input sentence, in
/// input order. The parsing model itself lives outside this crate.
pub trait TreeParser {
    fn parse_batch(&self, sentences: &[String]) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// The parser collaborators the CLI can select between
pub enum ParserBackend {
    Command(CommandParser),
    Http(HttpParser),
}

impl TreeParser for ParserBackend {
    async fn parse_batch(&self, sentences: &[String]) -> Result<Vec<String>> {
        match self {
            Self::Command(parser) => parser.parse_batch(sentences).await,
            Self::Http(parser) => parser.parse_batch(sentences).await,
        }
    }
}
