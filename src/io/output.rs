use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::stages::AnnotationStats;

/// Files written for one annotated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Linearized parse trees, one per line
    pub parse: PathBuf,
    /// Flat EDITED-only fluency labels, one line per sentence
    pub flat: PathBuf,
    /// EDITED/INTJ/PRN labels, one space-joined line
    pub structural: PathBuf,
}

impl ArtifactPaths {
    /// Derive artifact names from an output path: `X.txt` gives
    /// `X_parse.txt`, `X_orig_dys.txt` and `X_dys.txt`.
    pub fn for_output(output: &Path) -> Self {
        Self {
            parse: with_suffix(output, "_parse"),
            flat: with_suffix(output, "_orig_dys"),
            structural: with_suffix(output, "_dys"),
        }
    }
}

fn with_suffix(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}.txt", stem, suffix),
    };
    output.with_file_name(name)
}

/// Write `text` to `path`, replacing any existing file
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("Failed to write file: {:?}", path))
}

/// Machine-readable summary of one annotation run
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationReport {
    pub run_id: String,
    /// RFC 3339 UTC timestamp
    pub generated_at: String,
    /// Source transcript or tree file
    pub input: PathBuf,
    #[serde(flatten)]
    pub stats: AnnotationStats,
}

impl AnnotationReport {
    pub fn new(input: &Path, stats: AnnotationStats) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            input: input.to_path_buf(),
            stats,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths() {
        let paths = ArtifactPaths::for_output(Path::new("out/episode.txt"));
        assert_eq!(paths.parse, PathBuf::from("out/episode_parse.txt"));
        assert_eq!(paths.flat, PathBuf::from("out/episode_orig_dys.txt"));
        assert_eq!(paths.structural, PathBuf::from("out/episode_dys.txt"));
    }

    #[test]
    fn test_artifact_paths_without_extension() {
        let paths = ArtifactPaths::for_output(Path::new("episode"));
        assert_eq!(paths.structural, PathBuf::from("episode_dys.txt"));
    }

    #[test]
    fn test_report_fields() {
        let stats = AnnotationStats {
            sentences: 1,
            words: 3,
            ..Default::default()
        };
        let report = AnnotationReport::new(Path::new("in.txt"), stats);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sentences"], 1);
        assert_eq!(json["words"], 3);
        assert_eq!(json["input"], "in.txt");
        assert_eq!(report.run_id.len(), 36);
    }
}
