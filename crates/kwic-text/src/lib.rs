//! kwic-text
//!
//! Sentence segmentation, the topic pattern registry and keyword-in-context
//! snippet search. `SnippetExtractor::run` ties them together for one report.

pub mod patterns;
pub mod search;
pub mod segment;

pub use patterns::{registry, Pattern, PatternRegistry};
pub use search::{find_snippets, stream_snippets, SnippetExtractor};
pub use segment::{sentences, PunctuationSegmenter};
