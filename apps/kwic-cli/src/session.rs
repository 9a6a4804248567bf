use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use kwic_core::document::Document;
use kwic_core::error::Result;
use kwic_core::traits::Segmenter;
use kwic_core::types::{PatternSpec, SearchOutcome, Topic};
use kwic_text::{find_snippets, registry, Pattern, PunctuationSegmenter};

use crate::output::write_transcript;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(PatternSpec),
    Topics,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// A bare line is an unescaped keyword; slash commands select topics.
pub fn parse_command(input: &str) -> Result<Command> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Command::Empty);
    }
    if let Some(name) = input.strip_prefix("/topic ") {
        return Ok(Command::Search(PatternSpec::Topic(name.parse::<Topic>()?)));
    }
    if let Some(text) = input.strip_prefix("/literal ") {
        return Ok(Command::Search(PatternSpec::Literal(text.trim().to_string())));
    }
    Ok(match input {
        "/quit" | "/q" | "quit" | "exit" => Command::Quit,
        "/help" | "/h" => Command::Help,
        "/topics" | "/t" => Command::Topics,
        s if s.starts_with('/') => Command::Unknown(s.to_string()),
        s => Command::Search(PatternSpec::Keyword(s.to_string())),
    })
}

/// One report, segmented once and searched repeatedly.
pub struct Session {
    company: String,
    source: PathBuf,
    sentences: Vec<String>,
}

impl Session {
    pub fn load(path: &Path, company: Option<String>) -> Result<Self> {
        let document = Document::load(path)?;
        let company = company.unwrap_or_else(|| document.id().to_string());
        Ok(Self::from_text(company, path, document.text()))
    }

    pub fn from_text(company: impl Into<String>, source: impl Into<PathBuf>, text: &str) -> Self {
        Self { company: company.into(), source: source.into(), sentences: PunctuationSegmenter.segment(text) }
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn search(&self, spec: &PatternSpec) -> Result<SearchOutcome> {
        let pattern = Pattern::compile(spec)?;
        Ok(SearchOutcome {
            company: Some(self.company.clone()),
            label: pattern.label().to_string(),
            source: self.source.clone(),
            sentence_count: self.sentences.len(),
            snippets: find_snippets(&self.sentences, &pattern),
        })
    }

    /// Prompt loop. Pattern errors are printed and the prompt repeats.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "Company name: [{}] ({} sentences)", self.company, self.sentences.len())?;
        show_help(out)?;
        loop {
            write!(out, "kwic> ")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }
            match parse_command(&line) {
                Ok(Command::Empty) => continue,
                Ok(Command::Quit) => {
                    writeln!(out, "👋 Goodbye!")?;
                    break;
                }
                Ok(Command::Help) => show_help(out)?,
                Ok(Command::Topics) => show_topics(out)?,
                Ok(Command::Unknown(cmd)) => writeln!(out, "❌ Unknown command: {} (try /help)", cmd)?,
                Ok(Command::Search(spec)) => match self.search(&spec) {
                    Ok(outcome) => write_transcript(out, &outcome)?,
                    Err(e) => writeln!(out, "❌ {}", e)?,
                },
                Err(e) => writeln!(out, "❌ {}", e)?,
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

fn show_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "🎯 Commands:")?;
    writeln!(out, "  <keyword>        - Search for a keyword (regex syntax allowed)")?;
    writeln!(out, "  /literal <text>  - Search for text literally")?;
    writeln!(out, "  /topic <name>    - Search a built-in topic")?;
    writeln!(out, "  /topics          - List built-in topics")?;
    writeln!(out, "  /help            - Show this help message")?;
    writeln!(out, "  /quit            - Exit")
}

pub fn show_topics<W: Write>(out: &mut W) -> io::Result<()> {
    for (topic, pattern) in registry().iter() {
        writeln!(out, "  {:<18} {:<20} {}", topic.key(), topic.label(), pattern.as_str())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwic_core::error::Error;

    #[test]
    fn parses_slash_commands_and_keywords() {
        assert_eq!(parse_command("  ").unwrap(), Command::Empty);
        assert_eq!(parse_command("/q").unwrap(), Command::Quit);
        assert_eq!(parse_command("/topic buyback").unwrap(), Command::Search(PatternSpec::Topic(Topic::Buyback)));
        assert_eq!(
            parse_command("net interest margin\n").unwrap(),
            Command::Search(PatternSpec::Keyword("net interest margin".to_string()))
        );
        assert_eq!(parse_command("/stats").unwrap(), Command::Unknown("/stats".to_string()));
        assert!(matches!(parse_command("/topic weather"), Err(Error::UnknownTopic(_))));
    }
}
