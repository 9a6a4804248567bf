use std::iter::Peekable;

use kwic_core::document::Document;
use kwic_core::error::Result;
use kwic_core::traits::{Segmenter, SentenceMatcher};
use kwic_core::types::{SearchOutcome, SearchRequest, Snippet};

use crate::patterns::Pattern;
use crate::segment::{sentences, PunctuationSegmenter, Sentences};

/// One snippet per matching sentence, in document order, numbered from 1.
pub fn find_snippets<M>(sentences: &[String], matcher: &M) -> Vec<Snippet>
where
    M: SentenceMatcher + ?Sized,
{
    let mut snippets = Vec::new();
    for (i, sentence) in sentences.iter().enumerate() {
        if !matcher.is_match(sentence) { continue; }
        snippets.push(Snippet {
            ordinal: snippets.len() + 1,
            index: i,
            sentence: sentence.clone(),
            previous: i.checked_sub(1).map(|p| sentences[p].clone()),
            next: sentences.get(i + 1).cloned(),
        });
    }
    tracing::debug!(label = matcher.label(), sentences = sentences.len(), snippets = snippets.len(), "snippet search");
    snippets
}

/// Streams snippets straight from the document text without materializing
/// the sentence list. Yields the same snippets as [`find_snippets`].
pub fn stream_snippets<'t, 'm, M>(text: &'t str, matcher: &'m M) -> SnippetStream<'t, 'm, M>
where
    M: SentenceMatcher + ?Sized,
{
    SnippetStream { sentences: sentences(text).peekable(), matcher, previous: None, index: 0, ordinal: 0 }
}

pub struct SnippetStream<'t, 'm, M: ?Sized> {
    sentences: Peekable<Sentences<'t>>,
    matcher: &'m M,
    previous: Option<&'t str>,
    index: usize,
    ordinal: usize,
}

impl<'t, 'm, M> Iterator for SnippetStream<'t, 'm, M>
where
    M: SentenceMatcher + ?Sized,
{
    type Item = Snippet;

    fn next(&mut self) -> Option<Snippet> {
        while let Some(current) = self.sentences.next() {
            let index = self.index;
            self.index += 1;
            let previous = self.previous.replace(current);
            if self.matcher.is_match(current) {
                self.ordinal += 1;
                return Some(Snippet {
                    ordinal: self.ordinal,
                    index,
                    sentence: current.to_string(),
                    previous: previous.map(str::to_string),
                    next: self.sentences.peek().map(|s| s.to_string()),
                });
            }
        }
        None
    }
}

/// Loads a report, segments it and collects the snippets for one pattern.
pub struct SnippetExtractor<S = PunctuationSegmenter> {
    segmenter: S,
}

impl SnippetExtractor {
    pub fn new() -> Self { Self { segmenter: PunctuationSegmenter } }
}

impl Default for SnippetExtractor {
    fn default() -> Self { Self::new() }
}

impl<S: Segmenter> SnippetExtractor<S> {
    pub fn with_segmenter(segmenter: S) -> Self { Self { segmenter } }

    pub fn search_text<M>(&self, text: &str, matcher: &M) -> Vec<Snippet>
    where
        M: SentenceMatcher + ?Sized,
    {
        find_snippets(&self.segmenter.segment(text), matcher)
    }

    /// Runs one request. A malformed keyword and an unreadable source both
    /// fail before any segmentation happens.
    pub fn run(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let pattern = Pattern::compile(&request.pattern)?;
        let document = Document::load(&request.source)?;
        let company = request.company.clone().unwrap_or_else(|| document.id().to_string());
        let sentences = self.segmenter.segment(&document.into_text());
        let snippets = find_snippets(&sentences, &pattern);
        tracing::info!(company = %company, label = pattern.label(), snippets = snippets.len(), "search finished");
        Ok(SearchOutcome {
            company: Some(company),
            label: pattern.label().to_string(),
            source: request.source.clone(),
            sentence_count: sentences.len(),
            snippets,
        })
    }
}
