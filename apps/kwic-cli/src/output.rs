use std::io::{self, Write};

use kwic_core::types::{SearchOutcome, Snippet};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Numbered human-readable snippets
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Human-readable transcript for one search.
pub fn write_transcript<W: Write>(out: &mut W, outcome: &SearchOutcome) -> io::Result<()> {
    if let Some(company) = &outcome.company {
        writeln!(out, "\nCompany name: [{}]", company)?;
    }
    if outcome.is_empty() {
        writeln!(out, "No occurrences of '{}' found.", outcome.label)?;
        return Ok(());
    }
    for snippet in &outcome.snippets {
        write_snippet(out, &outcome.label, snippet)?;
    }
    Ok(())
}

fn write_snippet<W: Write>(out: &mut W, label: &str, snippet: &Snippet) -> io::Result<()> {
    writeln!(out, "\n--- {} Snippet {} ---", label, snippet.ordinal)?;
    if let Some(previous) = &snippet.previous { writeln!(out, "{}", previous)?; }
    writeln!(out, "\n < {} >\n", snippet.sentence)?;
    if let Some(next) = &snippet.next { writeln!(out, "{}", next)?; }
    Ok(())
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_outcomes<W: Write>(out: &mut W, outcomes: &[SearchOutcome], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for outcome in outcomes { write_transcript(out, outcome)?; }
            Ok(())
        }
        OutputFormat::Json => write_json(out, outcomes),
    }
}
