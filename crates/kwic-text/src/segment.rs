//! Punctuation-based sentence segmentation.
//!
//! A sentence is a run of non-terminator characters closed by one of `.`,
//! `!`, `?`, trimmed of space, tab, CR and LF. Abbreviations and decimals
//! ("U.S.", "3.14") end sentences too; there is no special casing.

use kwic_core::traits::Segmenter;

const TERMINATORS: [char; 3] = ['.', '!', '?'];

fn is_terminator(c: char) -> bool {
    TERMINATORS.contains(&c)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Lazily yields the sentences of `text` in document order.
pub fn sentences(text: &str) -> Sentences<'_> {
    Sentences { rest: text }
}

/// Forward-only sentence iterator borrowing from the document text.
///
/// An unterminated trailing fragment is yielded if it is non-empty after
/// trimming.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while !self.rest.is_empty() {
            // terminators are ASCII, so `i + 1` is a char boundary
            let end = self.rest.find(is_terminator).map_or(self.rest.len(), |i| i + 1);
            let (candidate, rest) = self.rest.split_at(end);
            self.rest = rest;
            let trimmed = candidate.trim_matches(is_blank);
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSegmenter;

impl Segmenter for PunctuationSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let out: Vec<String> = sentences(text).map(str::to_owned).collect();
        tracing::debug!(sentences = out.len(), bytes = text.len(), "segmented document");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_terminators_yield_no_empty_sentences() {
        let got: Vec<&str> = sentences("Really?! Yes... \n\n ok.").collect();
        assert_eq!(got, vec!["Really?", "!", "Yes.", ".", ".", "ok."]);
    }

    #[test]
    fn trailing_fragment_is_kept_when_not_blank() {
        let got: Vec<&str> = sentences("Done. And then").collect();
        assert_eq!(got, vec!["Done.", "And then"]);
        assert_eq!(sentences("Done.  \r\n\t").count(), 1);
    }

    #[test]
    fn multibyte_text_splits_on_ascii_terminators_only() {
        let got: Vec<&str> = sentences("Ça va. 邮储银行分红。Dividende!").collect();
        assert_eq!(got, vec!["Ça va.", "邮储银行分红。Dividende!"]);
    }
}
