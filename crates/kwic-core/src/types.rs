//! Domain types passed between the extractor and its drivers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;

/// A financial-report theme with a built-in pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Dividend,
    Buyback,
    CapitalAllocation,
    Leverage,
    Moat,
    NetInterest,
    UnitCaseVolume,
}

impl Topic {
    pub const ALL: [Topic; 7] = [
        Topic::Dividend,
        Topic::Buyback,
        Topic::CapitalAllocation,
        Topic::Leverage,
        Topic::Moat,
        Topic::NetInterest,
        Topic::UnitCaseVolume,
    ];

    /// Stable identifier used on the command line and in config files.
    pub fn key(self) -> &'static str {
        match self {
            Topic::Dividend => "dividend",
            Topic::Buyback => "buyback",
            Topic::CapitalAllocation => "capital_allocation",
            Topic::Leverage => "leverage",
            Topic::Moat => "moat",
            Topic::NetInterest => "net_interest",
            Topic::UnitCaseVolume => "unit_case_volume",
        }
    }

    /// Human-readable label used in transcript headers.
    pub fn label(self) -> &'static str {
        match self {
            Topic::Dividend => "Dividend",
            Topic::Buyback => "Buyback",
            Topic::CapitalAllocation => "Capital allocation",
            Topic::Leverage => "Leverage",
            Topic::Moat => "Moat",
            Topic::NetInterest => "Net interest",
            Topic::UnitCaseVolume => "Unit case volume",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Topic {
    type Err = Error;

    /// Accepts keys case-insensitively with `-`, `_` or spaces between words.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
            .collect();
        match normalized.as_str() {
            "buy_back" | "repurchase" => return Ok(Topic::Buyback),
            "capex" => return Ok(Topic::CapitalAllocation),
            _ => {}
        }
        Topic::ALL
            .into_iter()
            .find(|t| t.key() == normalized || t.key().replace('_', "") == normalized)
            .ok_or_else(|| Error::UnknownTopic(s.to_string()))
    }
}

/// How a search selects its matching rule.
///
/// `Keyword` is compiled as-is between word boundaries, so regex
/// metacharacters keep their meaning. `Literal` is escaped first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSpec {
    Topic(Topic),
    Keyword(String),
    Literal(String),
}

impl Default for PatternSpec {
    fn default() -> Self {
        PatternSpec::Topic(Topic::Dividend)
    }
}

impl From<Topic> for PatternSpec {
    fn from(topic: Topic) -> Self {
        PatternSpec::Topic(topic)
    }
}

/// One search over one report: the configuration value a driver builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub source: PathBuf,
    pub company: Option<String>,
    pub pattern: PatternSpec,
}

impl SearchRequest {
    pub fn new(source: impl Into<PathBuf>, pattern: impl Into<PatternSpec>) -> Self {
        Self { source: source.into(), company: None, pattern: pattern.into() }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}

/// A matched sentence with its immediate neighbours.
///
/// - `ordinal`: 1-based position among the snippets of one search
/// - `index`: 0-based position of the matched sentence in the document
/// - `previous`/`next`: neighbouring sentences, absent at the document edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub ordinal: usize,
    pub index: usize,
    pub sentence: String,
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// Result of running one `SearchRequest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub company: Option<String>,
    pub label: String,
    pub source: PathBuf,
    pub sentence_count: usize,
    pub snippets: Vec<Snippet>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}
