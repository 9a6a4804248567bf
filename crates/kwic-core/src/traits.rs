/// Splits a document's text into ordered, trimmed, non-empty sentences.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// A compiled matching rule tested against one whole sentence at a time.
pub trait SentenceMatcher: Send + Sync {
    /// Name shown in transcript headers (topic label or the raw keyword).
    fn label(&self) -> &str;
    fn is_match(&self, sentence: &str) -> bool;
}
