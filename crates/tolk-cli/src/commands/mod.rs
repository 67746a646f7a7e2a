//! CLI command implementations.

mod coverage;
mod exists;
mod translate;

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use miette::{miette, Result};
use tolk::{LoadError, MemoryStore};
use tracing::debug;

use crate::output::LoadDiagnostic;

pub use coverage::{run_coverage, CoverageArgs};
pub use exists::{run_exists, ExistsArgs};
pub use translate::{run_translate, TranslateArgs};

/// Where translations are read from.
#[derive(Debug, clap::Args)]
pub struct SourceArgs {
    /// Bundle files shaped { "<locale>": { "<key>": ... } } (repeatable)
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Single-locale translation files (repeatable)
    #[arg(long = "locale-file", value_name = "LOCALE=PATH", value_parser = parse_locale_file)]
    pub locale_files: Vec<(String, PathBuf)>,
}

/// Current and fallback locale selection.
#[derive(Debug, clap::Args)]
pub struct LocaleArgs {
    /// Current locale (e.g., en, de-CH)
    #[arg(long, env = "TOLK_LOCALE", default_value = "en")]
    pub locale: String,

    /// Fallback locale consulted when the current locale lacks a key
    #[arg(long, env = "TOLK_FALLBACK")]
    pub fallback: Option<String>,
}

impl SourceArgs {
    /// Load every bundle, then every single-locale file, into `store`.
    pub fn load_into(&self, store: &MemoryStore) -> Result<()> {
        if self.files.is_empty() && self.locale_files.is_empty() {
            return Err(miette!(
                "no translations given: pass --file or --locale-file LOCALE=PATH"
            ));
        }
        for path in &self.files {
            let content = read(path)?;
            let locales = store
                .load_bundle_str(&content)
                .map_err(|e| LoadDiagnostic::new(path, &content, &e))?;
            debug!(path = %path.display(), locales, "loaded bundle");
        }
        for (locale, path) in &self.locale_files {
            let content = read(path)?;
            store
                .load_locale_str(locale.as_str(), &content)
                .map_err(|e| LoadDiagnostic::new(path, &content, &e))?;
        }
        Ok(())
    }
}

impl LocaleArgs {
    /// An empty store configured with these locales.
    pub fn store(&self) -> MemoryStore {
        MemoryStore::builder()
            .locale(self.locale.as_str())
            .maybe_fallback(self.fallback.as_deref())
            .build()
    }
}

fn read(path: &Path) -> Result<String> {
    read_to_string(path).map_err(|source| {
        let error = LoadError::Io {
            path: path.to_path_buf(),
            source,
        };
        LoadDiagnostic::new(path, "", &error).into()
    })
}

/// Parse a `LOCALE=PATH` argument.
fn parse_locale_file(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((locale, path)) if !locale.is_empty() && !path.is_empty() => {
            Ok((locale.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!(
            "invalid locale file '{}': expected LOCALE=PATH",
            s
        )),
    }
}

/// Parse a `name=value` parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
