use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Full text of one report, read once and never mutated.
#[derive(Debug, Clone)]
pub struct Document {
    id: String,
    text: String,
}

impl Document {
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_file_content(path)?;
        tracing::info!(path = %path.display(), bytes = text.len(), "loaded document");
        Ok(Self { id: doc_id(path), text })
    }

    pub fn id(&self) -> &str { &self.id }

    pub fn text(&self) -> &str { &self.text }

    pub fn into_text(self) -> String { self.text }
}

/// Reads a report as UTF-8, falling back to lossy decoding for stray bytes.
fn read_file_content(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::source_unavailable(path, e))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), "document is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Company label for a report: its file stem.
pub fn doc_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// All `.txt` files under `root`, sorted.
pub fn list_txt_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::source_unavailable(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "reports directory not found"),
        ));
    }
    let mut txt_files = Vec::new();
    for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") { txt_files.push(path.to_path_buf()); }
    }
    txt_files.sort();
    Ok(txt_files)
}
