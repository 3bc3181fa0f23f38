use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::io::{AnnotationReport, ArtifactPaths, write_text};

use super::Stage2Result;

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Whether to write the linearized parse trees
    pub write_parse: bool,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self { write_parse: true }
    }
}

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct Stage3Result {
    pub parse_path: Option<PathBuf>,
    /// Absent when the flat pass was disabled
    pub flat_path: Option<PathBuf>,
    pub structural_path: PathBuf,
    pub report_path: Option<PathBuf>,
}

/// Execute Stage 3: Rendering
///
/// Writes the artifacts derived from `output`:
/// 1. `*_parse.txt`: linearized trees, newline-joined
/// 2. `*_orig_dys.txt`: flat fluency labels, one line per sentence
/// 3. `*_dys.txt`: structural labels, space-joined
pub fn execute_stage3(
    output: &Path,
    trees: &[String],
    annotation: &Stage2Result,
    report: Option<(&Path, &AnnotationReport)>,
    config: &Stage3Config,
) -> Result<Stage3Result> {
    let paths = ArtifactPaths::for_output(output);
    let mut result = Stage3Result {
        parse_path: None,
        flat_path: None,
        structural_path: paths.structural.clone(),
        report_path: None,
    };

    if config.write_parse {
        info!("Writing parse trees to {:?}", paths.parse);
        write_text(&paths.parse, &trees.join("\n"))?;
        result.parse_path = Some(paths.parse);
    }

    if let Some(flat) = annotation.flat_text() {
        info!("Writing flat disfluency labels to {:?}", paths.flat);
        write_text(&paths.flat, &flat)?;
        result.flat_path = Some(paths.flat);
    }

    info!("Writing structural labels to {:?}", paths.structural);
    write_text(&paths.structural, &annotation.structural_text())?;

    if let Some((path, report)) = report {
        info!("Writing run report to {:?}", path);
        report.write_json(path)?;
        result.report_path = Some(path.to_path_buf());
    }

    Ok(result)
}
