//! Miette diagnostic wrapper for translation load errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![expect(unused_assignments)]

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use tolk::LoadError;

/// A miette-compatible diagnostic for a translation file that failed to load.
///
/// JSON syntax errors point at the offending location in the file.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(tolk::load))]
pub struct LoadDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: Option<SourceSpan>,

    message: String,

    #[help]
    help: Option<String>,
}

impl LoadDiagnostic {
    /// Create a diagnostic from a LoadError with source context.
    pub fn new(path: &Path, content: &str, err: &LoadError) -> Self {
        let (span, help) = match err {
            LoadError::Json { source, .. } => {
                let offset = byte_offset(content, source.line(), source.column());
                (Some((offset, 1).into()), None)
            }
            LoadError::NotAnObject { .. } => (
                None,
                Some("translation files must hold a JSON object of keys".to_string()),
            ),
            LoadError::Io { .. } => (None, None),
        };

        LoadDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            message: err.to_string(),
            help,
        }
    }
}

/// Convert a 1-based line:column to a byte offset into `content`.
///
/// Line terminators count in full, so `\r\n` files keep their alignment.
/// The result is clamped to the content length, which miette requires.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let offset = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>()
        + column.saturating_sub(1);
    offset.min(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tolk::MemoryStore;

    #[test]
    fn json_error_points_into_source() {
        let content = "{\n  \"a\": \"b\",\n  oops\n}";
        let err = MemoryStore::default()
            .load_locale_str("en", content)
            .unwrap_err();

        let diagnostic = LoadDiagnostic::new(Path::new("en.json"), content, &err);
        let span = diagnostic.span.unwrap();
        let line_start = content.find("  oops").unwrap();
        assert!((line_start..line_start + 7).contains(&span.offset()));
        assert!(diagnostic.message.contains("'en'"));
    }

    #[test]
    fn offsets_count_crlf_line_endings() {
        let content = "ab\r\ncd\r\nef";
        assert_eq!(byte_offset(content, 3, 1), 8);
        assert_eq!(&content[byte_offset(content, 2, 2)..][..1], "d");
        assert_eq!(byte_offset(content, 9, 9), content.len());
    }

    #[test]
    fn json_error_in_crlf_file_points_into_source() {
        let content = "{\r\n  \"a\": \"b\",\r\n  oops\r\n}";
        let err = MemoryStore::default()
            .load_locale_str("en", content)
            .unwrap_err();

        let diagnostic = LoadDiagnostic::new(Path::new("en.json"), content, &err);
        let span = diagnostic.span.unwrap();
        let line_start = content.find("  oops").unwrap();
        assert!((line_start..line_start + 6).contains(&span.offset()));
    }
}
