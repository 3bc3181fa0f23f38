pub mod annotator;
pub mod error;
pub mod io;
pub mod models;
pub mod parser;
pub mod stages;
pub mod text;
pub mod tree;

pub use annotator::{Annotation, Annotator, AnnotatorConfig};
pub use error::{AnnotateError, MalformedTreeError};
pub use io::{AnnotationReport, ArtifactPaths, read_transcript, read_tree_file};
pub use models::{FluencyTag, LabeledLeaf, ParseNode, SpanKind, parse_forest, parse_tree};
pub use parser::{
    CommandParser, CommandParserConfig, HttpParser, HttpParserConfig, ParserBackend, TreeParser,
};
pub use stages::{
    AnnotationStats, Stage1Config, Stage2Config, Stage3Config, execute_stage1, execute_stage2,
    execute_stage3, prepare,
};
pub use text::{SplitterConfig, split_sentences, validate_token};
pub use tree::{
    DisfluencyRegion, ScanResult, disfluency_regions, flat_labels, scan_fluent, scan_tree, tag_tree,
};
