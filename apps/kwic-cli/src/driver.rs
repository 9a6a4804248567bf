use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use kwic_core::config::{Config, Settings};
use kwic_core::document::{doc_id, list_txt_files};
use kwic_core::error::{Error, Result};
use kwic_core::traits::Segmenter;
use kwic_core::types::{PatternSpec, SearchOutcome, SearchRequest, Topic};
use kwic_text::SnippetExtractor;

/// Flag > `search.pattern` in config > the dividend topic.
pub fn resolve_pattern(topic: Option<Topic>, keyword: Option<String>, escape: bool, settings: &Settings) -> PatternSpec {
    match (topic, keyword) {
        (Some(topic), _) => PatternSpec::Topic(topic),
        (None, Some(keyword)) if escape => PatternSpec::Literal(keyword),
        (None, Some(keyword)) => PatternSpec::Keyword(keyword),
        (None, None) => settings.search.pattern.clone().unwrap_or_default(),
    }
}

/// Requests for a batch run. An explicit directory wins; otherwise the
/// configured `[[reports]]` list, otherwise every `.txt` under
/// `data.reports_dir`.
pub fn batch_requests(config: &Config, settings: &Settings, dir: Option<&Path>, pattern: &PatternSpec) -> Result<Vec<SearchRequest>> {
    if dir.is_none() && !settings.reports.is_empty() {
        return Ok(settings
            .reports
            .iter()
            .map(|r| SearchRequest::new(config.resolve(&r.path), pattern.clone()).with_company(&r.company))
            .collect());
    }
    let root = match dir {
        Some(dir) => dir.to_path_buf(),
        None => config.resolve(&settings.data.reports_dir),
    };
    let files = list_txt_files(&root)?;
    if files.is_empty() {
        tracing::warn!(dir = %root.display(), "no .txt reports found");
    }
    Ok(files
        .into_iter()
        .map(|path| {
            let company = doc_id(&path);
            SearchRequest::new(path, pattern.clone()).with_company(company)
        })
        .collect())
}

/// Runs every request in order; the first unreadable source or bad pattern
/// aborts the batch.
pub fn run_batch<S: Segmenter>(extractor: &SnippetExtractor<S>, requests: &[SearchRequest], show_progress: bool) -> Result<Vec<SearchOutcome>> {
    let pb = if show_progress && requests.len() > 1 {
        let pb = ProgressBar::new(requests.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
            pb.set_style(style);
        }
        pb
    } else {
        ProgressBar::hidden()
    };
    let mut outcomes = Vec::with_capacity(requests.len());
    for request in requests {
        pb.set_message(request.company.clone().unwrap_or_default());
        let outcome = extractor.run(request);
        pb.inc(1);
        match outcome {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        }
    }
    pb.finish_and_clear();
    Ok(outcomes)
}

/// Process exit status for a failed run: 2 for a malformed pattern, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Error>() {
        Some(Error::MatchPattern { .. }) => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_configured_pattern() {
        let mut settings = Settings::default();
        assert_eq!(resolve_pattern(None, None, false, &settings), PatternSpec::Topic(Topic::Dividend));
        settings.search.pattern = Some(PatternSpec::Topic(Topic::Leverage));
        assert_eq!(resolve_pattern(None, None, false, &settings), PatternSpec::Topic(Topic::Leverage));
        assert_eq!(
            resolve_pattern(None, Some("net debt".to_string()), false, &settings),
            PatternSpec::Keyword("net debt".to_string())
        );
        assert_eq!(
            resolve_pattern(None, Some("S&P".to_string()), true, &settings),
            PatternSpec::Literal("S&P".to_string())
        );
        assert_eq!(resolve_pattern(Some(Topic::Moat), None, false, &settings), PatternSpec::Topic(Topic::Moat));
    }

    #[test]
    fn exit_codes_distinguish_pattern_errors() {
        let bad = anyhow::Error::from(Error::MatchPattern { keyword: "(".to_string(), reason: "unclosed".to_string() });
        assert_eq!(exit_code(&bad), 2);
        let missing = anyhow::Error::from(Error::source_unavailable(
            "a.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        ));
        assert_eq!(exit_code(&missing), 1);
    }
}
