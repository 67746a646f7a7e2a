//! Error and diagnostic types for the tolk engine.

use std::io::Error as IoError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while loading translations into a store.
///
/// These are the only fatal errors in the crate: rendering and lookup never
/// fail, they degrade and report a [`Diagnostic`] instead.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a translation file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// The translation document is not valid JSON.
    #[error("invalid translation document for '{locale}': {source}")]
    Json {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    /// The translation document is valid JSON but not an object.
    #[error("translation document for '{locale}' must be an object, found {found}")]
    NotAnObject { locale: String, found: &'static str },
}

/// A non-fatal condition observed while rendering a translation.
///
/// Diagnostics are informational: they are handed to a
/// [`DiagnosticSink`](crate::DiagnosticSink) and never change what the
/// caller gets back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// A placeholder in the text has no entry in the replacement map.
    #[error(
        "placeholder {placeholder} not found in replacements for {text:?}{}",
        did_you_mean(suggestions)
    )]
    MissingPlaceholder {
        placeholder: String,
        text: String,
        suggestions: Vec<String>,
    },

    /// A plural count was supplied but is not a number.
    #[error("plural count {count:?} is not a number, pluralization skipped")]
    NonNumericPluralCount { count: String },

    /// The plural rule picked a form the text does not provide.
    #[error(
        "no plural form {index} for locale '{locale}' in {text:?} ({forms} provided), using the first form"
    )]
    InsufficientPluralForms {
        locale: String,
        index: usize,
        forms: usize,
        text: String,
    },

    /// The placeholder delimiters were not exactly two non-empty markers.
    #[error("expected a start and an end placeholder delimiter, got {given:?}")]
    MisconfiguredDelimiters { given: Vec<String> },
}

impl Diagnostic {
    /// Short machine-readable name for this diagnostic.
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::MissingPlaceholder { .. } => "missing_placeholder",
            Diagnostic::NonNumericPluralCount { .. } => "non_numeric_plural_count",
            Diagnostic::InsufficientPluralForms { .. } => "insufficient_plural_forms",
            Diagnostic::MisconfiguredDelimiters { .. } => "misconfigured_delimiters",
        }
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Returns up to three names from `available` close to `key`.
///
/// Closeness is Levenshtein distance: at most 1 for keys of three
/// characters or fewer, at most 2 otherwise. Closest names come first,
/// ties are broken alphabetically.
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|name| (strsim::levenshtein(key, name), name))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.clone())
        .collect()
}
