//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `KWIC_*` env vars.
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against the directory the config was loaded from.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::PatternSpec;

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

/// Typed view of the merged configuration. Every field has a default, so an
/// absent `config.toml` is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub search: SearchSettings,
    pub reports: Vec<ReportEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub reports_dir: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self { reports_dir: "reports".to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub pattern: Option<PatternSpec>,
}

/// A named report, e.g. `{ company = "PSBC", path = "psbc2024_FULL.txt" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub company: String,
    pub path: String,
}

impl Settings {
    pub fn validate(&self) -> crate::error::Result<()> {
        for (i, report) in self.reports.iter().enumerate() {
            if report.company.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("reports[{}] has an empty company", i)));
            }
            if report.path.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("reports[{}] ({}) has an empty path", i, report.company)));
            }
        }
        match &self.search.pattern {
            Some(PatternSpec::Keyword(k)) | Some(PatternSpec::Literal(k)) if k.trim().is_empty() => {
                Err(Error::InvalidConfig("search.pattern keyword is empty".to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let base = env::current_dir()?;
        Self::load_from(&base)
    }

    pub fn load_from(base: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(base, &env_name)
    }

    pub fn load_for_env(base: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(base.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("KWIC_").split("__"));

        let config = Self { figment, base_dir: base.to_path_buf() };
        config.settings()?.validate()?;
        tracing::debug!(base = %base.display(), env = env_name, "configuration loaded");
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))
    }

    /// Resolve a configured path against the config's base directory.
    pub fn resolve<S: AsRef<str>>(&self, p: S) -> PathBuf {
        resolve_with_base(&self.base_dir, p)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Topic;

    #[test]
    fn empty_report_company_is_rejected() {
        let settings = Settings {
            reports: vec![ReportEntry { company: " ".to_string(), path: "a.txt".to_string() }],
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn blank_keyword_is_rejected() {
        let mut settings = Settings::default();
        settings.search.pattern = Some(PatternSpec::Keyword("  ".to_string()));
        assert!(settings.validate().is_err());
        settings.search.pattern = Some(PatternSpec::Topic(Topic::Moat));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn relative_paths_join_the_base() {
        let base = Path::new("/srv/reports");
        assert_eq!(resolve_with_base(base, "psbc.txt"), PathBuf::from("/srv/reports/psbc.txt"));
        assert_eq!(resolve_with_base(base, "/tmp/ko.txt"), PathBuf::from("/tmp/ko.txt"));
    }
}
