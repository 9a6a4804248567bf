use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use kwic_cli::driver::{batch_requests, exit_code, resolve_pattern, run_batch};
use kwic_cli::output::{write_json, write_outcomes, write_transcript, OutputFormat};
use kwic_cli::session::show_topics;
use kwic_core::config::Config;
use kwic_core::types::{SearchRequest, Topic};
use kwic_text::SnippetExtractor;

fn parse_topic(s: &str) -> Result<Topic, String> {
    s.parse::<Topic>().map_err(|e| e.to_string())
}

/// Keyword-in-context snippets from annual-report text.
#[derive(Parser)]
#[command(name = "kwic", version)]
#[command(about = "Find topic and keyword mentions in annual reports, with surrounding sentences")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct PatternArgs {
    /// Built-in topic (see `kwic topics`)
    #[arg(short, long, value_parser = parse_topic, conflicts_with = "keyword")]
    topic: Option<Topic>,

    /// Keyword or regex, matched case-insensitively at word boundaries
    #[arg(short, long)]
    keyword: Option<String>,

    /// Match the keyword literally instead of as a regex
    #[arg(long, requires = "keyword")]
    escape: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search one report
    Search {
        /// Plain-text report
        path: PathBuf,

        #[command(flatten)]
        pattern: PatternArgs,

        /// Company label for the transcript header (defaults to the file stem)
        #[arg(long)]
        company: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Search every configured report (or every .txt under DIR)
    Batch {
        /// Directory of reports; overrides the config
        dir: Option<PathBuf>,

        #[command(flatten)]
        pattern: PatternArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// List built-in topics and their patterns
    Topics,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let extractor = SnippetExtractor::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Search { path, pattern, company, format } => {
            let spec = resolve_pattern(pattern.topic, pattern.keyword, pattern.escape, &settings);
            let mut request = SearchRequest::new(path, spec);
            request.company = company;
            let outcome = extractor.run(&request)?;
            match format {
                OutputFormat::Text => write_transcript(&mut out, &outcome)?,
                OutputFormat::Json => write_json(&mut out, &outcome)?,
            }
        }
        Commands::Batch { dir, pattern, format, no_progress } => {
            let spec = resolve_pattern(pattern.topic, pattern.keyword, pattern.escape, &settings);
            let requests = batch_requests(&config, &settings, dir.as_deref(), &spec)?;
            let outcomes = run_batch(&extractor, &requests, !no_progress)?;
            write_outcomes(&mut out, &outcomes, format)?;
        }
        Commands::Topics => show_topics(&mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    kwic_cli::init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}
