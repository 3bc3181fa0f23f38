use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::TreeParser;

/// Configuration for a parser run as a subprocess
#[derive(Debug, Clone)]
pub struct CommandParserConfig {
    /// Program to execute
    pub program: String,
    /// Arguments passed before `--model`
    pub args: Vec<String>,
    /// Model file handed to the program as `--model <path>`
    pub model: Option<PathBuf>,
}

impl CommandParserConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            model: None,
        }
    }
}

/// Runs an external parser once per batch.
///
/// Sentences are written to the child's stdin one per line; every non-empty
/// stdout line is read back as one linearized tree.
pub struct CommandParser {
    config: CommandParserConfig,
}

impl CommandParser {
    pub fn new(config: CommandParserConfig) -> Self {
        Self { config }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.config.program);
        command.args(&self.config.args);
        if let Some(model) = &self.config.model {
            command.arg("--model").arg(model);
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

impl TreeParser for CommandParser {
    async fn parse_batch(&self, sentences: &[String]) -> Result<Vec<String>> {
        debug!(
            "Running {} on {} sentences",
            self.config.program,
            sentences.len()
        );

        let mut child = self
            .command()
            .spawn()
            .with_context(|| format!("Failed to start parser command: {}", self.config.program))?;

        let mut stdin = child.stdin.take().context("Parser stdin was not captured")?;
        let mut input = sentences.join("\n");
        input.push('\n');

        // Feed stdin while stdout drains so large batches cannot fill both pipes
        let writer = tokio::spawn(async move {
            stdin.write_all(input.as_bytes()).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .context("Failed to wait for parser command")?;

        if !output.status.success() {
            anyhow::bail!(
                "Parser command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        writer
            .await
            .context("Parser input task failed")?
            .context("Failed to write sentences to parser")?;

        let stdout = String::from_utf8(output.stdout).context("Parser output is not valid UTF-8")?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
