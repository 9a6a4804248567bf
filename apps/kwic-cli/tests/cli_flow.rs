use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

use kwic_cli::driver::{batch_requests, run_batch};
use kwic_cli::output::{write_outcomes, OutputFormat};
use kwic_cli::session::Session;
use kwic_core::config::Config;
use kwic_core::error::Error;
use kwic_core::types::{PatternSpec, Topic};
use kwic_text::SnippetExtractor;

const KO: &str = "Unit case volume grew 2%. We paid dividends of $1.94 per share. Buybacks were modest.";
const PSBC: &str = "Net interest margin narrowed. No dividend changes were made.";

fn write_reports(dir: &std::path::Path) {
    fs::create_dir_all(dir.join("reports")).unwrap();
    fs::write(dir.join("reports/ko2024.txt"), KO).unwrap();
    fs::write(dir.join("reports/psbc2024.txt"), PSBC).unwrap();
}

#[test]
fn batch_over_reports_dir_uses_file_stems() {
    let tmp = TempDir::new().unwrap();
    write_reports(tmp.path());
    let config = Config::load_for_env(tmp.path(), "test").expect("config");
    let settings = config.settings().expect("settings");

    let spec = PatternSpec::Topic(Topic::Dividend);
    let requests = batch_requests(&config, &settings, None, &spec).expect("requests");
    let companies: Vec<_> = requests.iter().filter_map(|r| r.company.clone()).collect();
    assert_eq!(companies, vec!["ko2024", "psbc2024"]);

    let outcomes = run_batch(&SnippetExtractor::new(), &requests, false).expect("batch");
    // "$1.94" splits the dividend sentence into "We paid dividends of $1." and "94 per share."
    assert_eq!(outcomes[0].snippets.len(), 1);
    assert_eq!(outcomes[0].snippets[0].sentence, "We paid dividends of $1.");
    assert_eq!(outcomes[1].snippets.len(), 1);

    let mut buf = Vec::new();
    write_outcomes(&mut buf, &outcomes, OutputFormat::Text).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("Company name: [ko2024]"));
    assert!(text.contains("--- Dividend Snippet 1 ---"));
    assert!(text.contains(" < No dividend changes were made. >"));
}

#[test]
fn batch_prefers_configured_report_list() {
    let tmp = TempDir::new().unwrap();
    write_reports(tmp.path());
    fs::write(
        tmp.path().join("config.toml"),
        "[search]\npattern = { topic = \"net_interest\" }\n\n[[reports]]\ncompany = \"PSBC\"\npath = \"reports/psbc2024.txt\"\n",
    )
    .unwrap();
    let config = Config::load_for_env(tmp.path(), "test").expect("config");
    let settings = config.settings().expect("settings");
    let spec = settings.search.pattern.clone().expect("configured pattern");

    let requests = batch_requests(&config, &settings, None, &spec).expect("requests");
    assert_eq!(requests.len(), 1);
    let outcomes = run_batch(&SnippetExtractor::new(), &requests, false).expect("batch");
    assert_eq!(outcomes[0].company.as_deref(), Some("PSBC"));
    assert_eq!(outcomes[0].label, "Net interest");
    assert_eq!(outcomes[0].snippets[0].next.as_deref(), Some("No dividend changes were made."));
}

#[test]
fn batch_aborts_on_missing_report() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[[reports]]\ncompany = \"KO\"\npath = \"gone.txt\"\n").unwrap();
    let config = Config::load_for_env(tmp.path(), "test").expect("config");
    let settings = config.settings().expect("settings");
    let requests = batch_requests(&config, &settings, None, &PatternSpec::default()).expect("requests");
    assert!(matches!(run_batch(&SnippetExtractor::new(), &requests, false), Err(Error::SourceUnavailable { .. })));
}

#[test]
fn interactive_session_reprompts_after_bad_pattern() {
    let session = Session::from_text("KO", "ko2024.txt", KO);
    assert_eq!(session.sentence_count(), 4);

    let input = Cursor::new("buyback(\n/topic buyback\nzebra\n/quit\n");
    let mut out = Vec::new();
    session.run(input, &mut out).expect("session");
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Invalid search pattern 'buyback('"));
    assert!(text.contains("--- Buyback Snippet 1 ---"));
    assert!(text.contains(" < Buybacks were modest. >"));
    assert!(text.contains("No occurrences of 'zebra' found."));
    assert!(text.ends_with("👋 Goodbye!\n"));
}

#[test]
fn interactive_session_ends_on_eof() {
    let session = Session::from_text("PSBC", "psbc.txt", PSBC);
    let mut out = Vec::new();
    session.run(Cursor::new("/literal net interest margin\n"), &mut out).expect("session");
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("--- net interest margin Snippet 1 ---"));
}
