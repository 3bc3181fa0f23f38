use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::error::AnnotateError;
use crate::io::AnnotationReport;
use crate::parser::{CommandParser, CommandParserConfig, TreeParser};
use crate::stages::{
    Stage1Config, Stage2Config, Stage2Result, Stage3Config, Stage3Result, execute_stage1,
    execute_stage2, execute_stage3, prepare,
};
use crate::text::SplitterConfig;

/// Settings shared by every stage of an annotation run
#[derive(Debug, Clone)]
pub struct AnnotatorConfig {
    /// Parser model file, forwarded to subprocess parsers
    pub model: Option<PathBuf>,
    /// Produce the flat EDITED-only labels
    pub disfluency: bool,
    /// Sentences per parser call
    pub batch_size: usize,
    /// Write the `_parse.txt` tree artifact
    pub write_parse: bool,
    pub splitter: SplitterConfig,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            model: None,
            disfluency: true,
            batch_size: 1,
            write_parse: true,
            splitter: SplitterConfig::default(),
        }
    }
}

/// Everything produced for one document
#[derive(Debug, Clone)]
pub struct Annotation {
    /// Cleaned sentences sent to the parser (empty when starting from trees)
    pub sentences: Vec<String>,
    /// One linearized tree per sentence
    pub trees: Vec<String>,
    pub tags: Stage2Result,
}

/// Runs the pipeline: prepare, parse, annotate, render
pub struct Annotator {
    config: AnnotatorConfig,
}

impl Annotator {
    pub fn new(config: AnnotatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Subprocess parser that receives this annotator's model path
    pub fn command_parser(&self, program: impl Into<String>, args: Vec<String>) -> CommandParser {
        CommandParser::new(CommandParserConfig {
            program: program.into(),
            args,
            model: self.config.model.clone(),
        })
    }

    /// Annotate a raw transcript, using `parser` to produce the trees
    pub async fn annotate_text<P: TreeParser>(&self, parser: &P, text: &str) -> Result<Annotation> {
        let prepared = prepare(text, &self.config.splitter);
        let parsed = execute_stage1(
            parser,
            &prepared.sentences,
            &Stage1Config {
                batch_size: self.config.batch_size,
            },
        )
        .await?;
        let tags = execute_stage2(&parsed.trees, &self.stage2_config())?;

        Ok(Annotation {
            sentences: prepared.sentences,
            trees: parsed.trees,
            tags,
        })
    }

    /// Annotate trees that were already parsed
    pub fn annotate_trees(&self, trees: Vec<String>) -> Result<Annotation, AnnotateError> {
        let tags = execute_stage2(&trees, &self.stage2_config())?;
        Ok(Annotation {
            sentences: Vec::new(),
            trees,
            tags,
        })
    }

    /// Write the artifacts for `annotation` next to `output`
    pub fn render(
        &self,
        annotation: &Annotation,
        input: &Path,
        output: &Path,
        report_path: Option<&Path>,
    ) -> Result<Stage3Result> {
        let report = report_path.map(|path| {
            (
                path,
                AnnotationReport::new(input, annotation.tags.stats.clone()),
            )
        });

        let result = execute_stage3(
            output,
            &annotation.trees,
            &annotation.tags,
            report.as_ref().map(|(path, report)| (*path, report)),
            &Stage3Config {
                write_parse: self.config.write_parse,
            },
        )?;

        info!(
            "Annotated {} sentences from {:?}",
            annotation.tags.stats.sentences, input
        );
        Ok(result)
    }

    fn stage2_config(&self) -> Stage2Config {
        Stage2Config {
            disfluency: self.config.disfluency,
        }
    }
}
