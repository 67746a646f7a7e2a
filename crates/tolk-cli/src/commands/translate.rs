//! Implementation of the `tolk translate` command.

use std::sync::Arc;

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tolk::{
    CollectingSink, DelimiterPair, DiagnosticSink, Engine, Query, Renderer, TracingSink,
    TranslationValue, Value,
};

use super::{parse_key_val, LocaleArgs, SourceArgs};

/// Arguments for the translate command.
#[derive(Debug, clap::Args)]
pub struct TranslateArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub locales: LocaleArgs,

    /// Translation key (e.g., menu.open)
    #[arg(long, required = true)]
    pub key: String,

    /// Text used when no locale has the key
    #[arg(long = "default")]
    pub default_value: Option<String>,

    /// Parameters in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Count selecting a plural form
    #[arg(long)]
    pub count: Option<String>,

    /// Placeholder delimiters: a start and an end marker
    #[arg(long, num_args = 1.., value_name = "MARKER")]
    pub delimiters: Vec<String>,

    /// Exit with non-zero code if rendering reported any diagnostic
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for translate results.
#[derive(Serialize)]
pub struct TranslateResult {
    pub key: String,
    pub locale: String,
    pub value: TranslationValue,
    pub diagnostics: Vec<DiagnosticJson>,
}

/// A rendering diagnostic in JSON output.
#[derive(Serialize)]
pub struct DiagnosticJson {
    pub kind: &'static str,
    pub message: String,
}

/// Interpret a command-line string as the most specific [`Value`].
fn parse_value(raw: String) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::from(f),
        _ => Value::from(raw),
    }
}

/// Run the translate command.
pub fn run_translate(args: TranslateArgs) -> Result<i32> {
    let store = args.locales.store();
    args.sources.load_into(&store)?;

    let sink = Arc::new(CollectingSink::new());
    let delimiters = if args.delimiters.is_empty() {
        DelimiterPair::default()
    } else {
        DelimiterPair::from_markers(&args.delimiters, sink.as_ref())
    };
    let renderer = Renderer::builder()
        .delimiters(delimiters)
        .sink(sink.clone())
        .build();
    let engine = Engine::builder().store(&store).renderer(renderer).build();

    let query = Query::builder()
        .maybe_default_value(args.default_value)
        .replacements(
            args.params
                .into_iter()
                .map(|(name, value)| (name, parse_value(value)))
                .collect(),
        )
        .maybe_count(args.count.map(parse_value))
        .build();

    let value = engine.translate(&args.key, &query);
    let diagnostics = sink.take();
    for diagnostic in &diagnostics {
        TracingSink.report(diagnostic.clone());
    }

    if args.json {
        let output = TranslateResult {
            key: args.key,
            locale: engine.locale(),
            value,
            diagnostics: diagnostics
                .iter()
                .map(|d| DiagnosticJson {
                    kind: d.kind(),
                    message: d.to_string(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{}", value);
    }

    if args.strict && !diagnostics.is_empty() {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
