//! Case-insensitive, word-boundary matching rules for report topics.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use kwic_core::error::{Error, Result};
use kwic_core::traits::SentenceMatcher;
use kwic_core::types::{PatternSpec, Topic};

/// Alternation body for each topic; wrapped in `\b(...)\b` when compiled.
fn topic_alternatives(topic: Topic) -> &'static str {
    match topic {
        Topic::Dividend => {
            r"dividend(s)?|dividend[-\s]?policy|dividend[-\s]?per[-\s]?share|payout[-\s]?ratio|cash[-\s]?return"
        }
        Topic::Buyback => {
            r"buy[-\s]?back(s|ed|ing)?|repurchase(d|s|ing)?|bought\s+back|share[-\s]?repurchase|repurchase[-\s]?(program|plan|authorization)"
        }
        Topic::CapitalAllocation => {
            r"capital[-\s]?allocation|capital[-\s]?expenditures?|capex|reinvest(ed|ing|ment)?|acquisitions?|return[-\s]?on[-\s]?(invested[-\s]?)?capital|roic"
        }
        Topic::Leverage => {
            r"leverage[ds]?|debt[-\s]?to[-\s]?equity|net[-\s]?debt|borrowings?|gearing|interest[-\s]?coverage|indebtedness"
        }
        Topic::Moat => {
            r"moats?|competitive[-\s]?advantages?|pricing[-\s]?power|switching[-\s]?costs?|network[-\s]?effects?|brand[-\s]?strength|market[-\s]?share"
        }
        Topic::NetInterest => r"net[-\s]?interest[-\s]?(income|margin)|nim",
        Topic::UnitCaseVolume => r"unit[-\s]?case[-\s]?volumes?",
    }
}

/// A compiled matching rule with the label it is reported under.
#[derive(Debug, Clone)]
pub struct Pattern {
    label: String,
    regex: Regex,
}

impl Pattern {
    /// The registry's prebuilt pattern for `topic`.
    pub fn topic(topic: Topic) -> &'static Pattern {
        registry().get(topic)
    }

    /// Wraps `keyword` in word boundaries without escaping it, so regex
    /// syntax in the keyword is honoured ("buy ?backs?") and malformed
    /// syntax is a `MatchPattern` error. Alternatives are grouped, so every
    /// branch of "dividend|buyback" is anchored on both sides.
    pub fn keyword(keyword: &str) -> Result<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::MatchPattern { keyword: keyword.to_string(), reason: "keyword is empty".to_string() });
        }
        let regex = build(&format!(r"\b(?:{})\b", keyword)).map_err(|e| Error::MatchPattern {
            keyword: keyword.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { label: keyword.to_string(), regex })
    }

    /// Matches `text` literally. Word boundaries are only required on edges
    /// that are word characters, so "(index)" still matches before a space.
    pub fn literal(text: &str) -> Result<Self> {
        let text = text.trim();
        let (Some(first), Some(last)) = (text.chars().next(), text.chars().last()) else {
            return Err(Error::MatchPattern { keyword: text.to_string(), reason: "keyword is empty".to_string() });
        };
        let edge = |c: char| if is_word_char(c) { r"\b" } else { "" };
        let source = format!("{}{}{}", edge(first), regex::escape(text), edge(last));
        let regex = build(&source).map_err(|e| Error::MatchPattern {
            keyword: text.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { label: text.to_string(), regex })
    }

    pub fn compile(spec: &PatternSpec) -> Result<Self> {
        match spec {
            PatternSpec::Topic(topic) => Ok(Self::topic(*topic).clone()),
            PatternSpec::Keyword(keyword) => Self::keyword(keyword),
            PatternSpec::Literal(text) => Self::literal(text),
        }
    }

    pub fn label(&self) -> &str { &self.label }

    pub fn as_str(&self) -> &str { self.regex.as_str() }

    pub fn is_match(&self, sentence: &str) -> bool { self.regex.is_match(sentence) }
}

impl SentenceMatcher for Pattern {
    fn label(&self) -> &str { &self.label }

    fn is_match(&self, sentence: &str) -> bool { self.regex.is_match(sentence) }
}

/// Same notion of "word character" that `\b` uses.
static WORD_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w$").expect("word-character regex is valid"));

fn is_word_char(c: char) -> bool {
    WORD_CHAR.is_match(c.encode_utf8(&mut [0; 4]))
}

fn build(source: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

/// Read-only topic → pattern table, built once on first use.
pub struct PatternRegistry {
    patterns: Vec<Pattern>,
}

static REGISTRY: Lazy<PatternRegistry> = Lazy::new(PatternRegistry::build);

pub fn registry() -> &'static PatternRegistry {
    &REGISTRY
}

impl PatternRegistry {
    fn build() -> Self {
        let patterns = Topic::ALL
            .iter()
            .map(|&topic| {
                let source = format!(r"\b({})\b", topic_alternatives(topic));
                let regex = build(&source).expect("built-in topic patterns are valid");
                Pattern { label: topic.label().to_string(), regex }
            })
            .collect();
        Self { patterns }
    }

    pub fn get(&self, topic: Topic) -> &Pattern {
        // `patterns` follows the order of `Topic::ALL`
        &self.patterns[topic as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Topic, &Pattern)> + '_ {
        Topic::ALL.iter().copied().zip(self.patterns.iter())
    }
}
