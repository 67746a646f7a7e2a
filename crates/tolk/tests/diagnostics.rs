//! Tests for diagnostic messages and sinks.

use std::io::{Result as IoResult, Write};
use std::sync::{Arc, Mutex};

use tolk::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink, compute_suggestions};
use tracing::subscriber::with_default;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

fn capture(filter: &str, f: impl FnOnce()) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    with_default(subscriber, f);
    buffer.contents()
}

fn missing(placeholder: &str, suggestions: &[&str]) -> Diagnostic {
    Diagnostic::MissingPlaceholder {
        placeholder: placeholder.to_string(),
        text: format!("Hi {placeholder}"),
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    }
}

// =========================================================================
// Messages
// =========================================================================

#[test]
fn missing_placeholder_message() {
    insta::assert_snapshot!(
        missing("{name}", &[]),
        @r#"placeholder {name} not found in replacements for "Hi {name}""#
    );
    insta::assert_snapshot!(
        missing("{nmae}", &["name", "game"]),
        @r#"placeholder {nmae} not found in replacements for "Hi {nmae}" (did you mean: name, game?)"#
    );
}

#[test]
fn plural_messages() {
    insta::assert_snapshot!(
        Diagnostic::NonNumericPluralCount { count: "abc".to_string() },
        @r#"plural count "abc" is not a number, pluralization skipped"#
    );
    insta::assert_snapshot!(
        Diagnostic::InsufficientPluralForms {
            locale: "ru".to_string(),
            index: 2,
            forms: 2,
            text: "файл:::файла".to_string(),
        },
        @r#"no plural form 2 for locale 'ru' in "файл:::файла" (2 provided), using the first form"#
    );
}

#[test]
fn delimiter_message() {
    insta::assert_snapshot!(
        Diagnostic::MisconfiguredDelimiters { given: vec!["%".to_string()] },
        @r#"expected a start and an end placeholder delimiter, got ["%"]"#
    );
}

#[test]
fn kinds_are_snake_case() {
    assert_eq!(missing("{a}", &[]).kind(), "missing_placeholder");
    assert_eq!(
        Diagnostic::MisconfiguredDelimiters { given: vec![] }.kind(),
        "misconfigured_delimiters"
    );
}

#[test]
fn suggestions_are_ranked_and_limited() {
    let available: Vec<String> = ["cont", "coun", "counts", "amount", "c"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        compute_suggestions("count", &available),
        vec!["cont", "coun", "counts"]
    );
    assert!(compute_suggestions("xyz", &available).is_empty());
}

// =========================================================================
// Sinks
// =========================================================================

#[test]
fn collecting_sink_deduplicates_in_order() {
    let sink = CollectingSink::new();
    sink.report(missing("{a}", &[]));
    sink.report(missing("{b}", &[]));
    sink.report(missing("{a}", &[]));

    assert_eq!(sink.len(), 2);
    assert_eq!(
        sink.diagnostics(),
        vec![missing("{a}", &[]), missing("{b}", &[])]
    );

    assert_eq!(sink.take().len(), 2);
    assert!(sink.is_empty());
}

#[test]
fn tracing_sink_emits_warning() {
    let output = capture("warn", || {
        TracingSink.report(missing("{name}", &[]));
    });

    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("tolk::diagnostics"), "{output}");
    assert!(output.contains("placeholder {name} not found"), "{output}");
    assert!(output.contains("kind=\"missing_placeholder\""), "{output}");
}

#[test]
fn tracing_sink_can_be_silenced() {
    let output = capture("warn,tolk::diagnostics=off", || {
        TracingSink.report(missing("{name}", &[]));
    });
    assert!(output.is_empty(), "{output}");
}
