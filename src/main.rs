use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use disfluency::{
    Annotation, Annotator, AnnotatorConfig, HttpParser, HttpParserConfig, ParserBackend,
    SplitterConfig, prepare, read_transcript, read_tree_file,
};

#[derive(Parser)]
#[command(name = "disfluency")]
#[command(author, version, about = "Disfluency annotation of speech transcripts from parse trees", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split and clean a transcript into parser-ready sentences
    Prepare {
        /// Raw transcript (UTF-8 text)
        #[arg(short, long)]
        input: PathBuf,

        /// Write sentences here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum words per sentence
        #[arg(long, default_value = "300")]
        max_words: usize,
    },

    /// Parse a transcript and write parse, disfluency and structural labels
    Annotate {
        /// Raw transcript (UTF-8 text)
        #[arg(short, long)]
        input: PathBuf,

        /// Output path; artifacts are named X_parse.txt, X_orig_dys.txt, X_dys.txt
        #[arg(short, long)]
        output: PathBuf,

        /// Parser program that reads sentences on stdin and prints one tree per line
        #[arg(long, conflicts_with = "parser_url")]
        parser_command: Option<String>,

        /// Argument for the parser program (repeatable)
        #[arg(long = "parser-arg", allow_hyphen_values = true, requires = "parser_command")]
        parser_args: Vec<String>,

        /// Parser service endpoint (defaults to DISFLUENCY_PARSER_URL)
        #[arg(long)]
        parser_url: Option<String>,

        /// Parser model file passed to the parser program
        #[arg(long)]
        model: Option<PathBuf>,

        /// Sentences per parser call
        #[arg(long, default_value = "1")]
        batch_size: usize,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Label trees that were already parsed
    Tag {
        /// File of bracketed trees
        #[arg(short, long)]
        trees: PathBuf,

        /// Output path; artifacts are named X_parse.txt, X_orig_dys.txt, X_dys.txt
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Skip the flat EDITED-only disfluency labels
    #[arg(long)]
    no_disfluency: bool,

    /// Skip writing the X_parse.txt tree file
    #[arg(long)]
    no_parse_output: bool,

    /// Also write a JSON run report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Prepare {
            input,
            output,
            max_words,
        } => {
            setup_logging(false);
            prepare_transcript(&input, output.as_deref(), max_words)
        }
        Commands::Annotate {
            input,
            output,
            parser_command,
            parser_args,
            parser_url,
            model,
            batch_size,
            common,
        } => {
            setup_logging(common.verbose);
            let annotator = Annotator::new(AnnotatorConfig {
                model,
                disfluency: !common.no_disfluency,
                write_parse: !common.no_parse_output,
                batch_size,
                ..Default::default()
            });
            let parser = match parser_command {
                Some(program) => ParserBackend::Command(annotator.command_parser(program, parser_args)),
                None => ParserBackend::Http(HttpParser::new(
                    HttpParserConfig::from_env_with_endpoint(parser_url)?,
                )?),
            };

            info!("Loading transcript from {:?}", input);
            let text = read_transcript(&input)?;
            let annotation = annotator
                .annotate_text(&parser, &text)
                .await
                .context("Failed to annotate transcript")?;
            render(&annotator, &annotation, &input, &output, common.report.as_deref())
        }
        Commands::Tag {
            trees,
            output,
            common,
        } => {
            setup_logging(common.verbose);
            let annotator = Annotator::new(AnnotatorConfig {
                disfluency: !common.no_disfluency,
                write_parse: !common.no_parse_output,
                ..Default::default()
            });

            info!("Loading trees from {:?}", trees);
            let parsed = read_tree_file(&trees)?;
            let annotation = annotator
                .annotate_trees(parsed)
                .context("Failed to annotate trees")?;
            render(&annotator, &annotation, &trees, &output, common.report.as_deref())
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn prepare_transcript(input: &Path, output: Option<&Path>, max_words: usize) -> Result<()> {
    let text = read_transcript(input)?;
    let prepared = prepare(&text, &SplitterConfig { max_words });
    let sentences = prepared.sentences.join("\n");

    match output {
        Some(path) => {
            disfluency::io::write_text(path, &sentences)?;
            info!("Sentences written to {:?}", path);
        }
        None => println!("{}", sentences),
    }
    Ok(())
}

fn render(
    annotator: &Annotator,
    annotation: &Annotation,
    input: &Path,
    output: &Path,
    report: Option<&Path>,
) -> Result<()> {
    let result = annotator.render(annotation, input, output, report)?;

    if let Some(path) = &result.parse_path {
        info!("Parse trees written to {:?}", path);
    }
    if let Some(path) = &result.flat_path {
        info!("Disfluency labels written to {:?}", path);
    }
    info!("Structural labels written to {:?}", result.structural_path);

    let stats = &annotation.tags.stats;
    let disfluent_pct = if stats.structural_words > 0 {
        stats.structural_disfluent_words as f64 / stats.structural_words as f64 * 100.0
    } else {
        0.0
    };
    info!(
        "Complete: {} sentences, {} words, {:.1}% tagged E",
        stats.sentences, stats.structural_words, disfluent_pct
    );

    Ok(())
}
