//! Coverage command implementation.

use clap::Args;
use miette::{miette, IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;
use tolk::interpreter::{category_str, plural_form_count, PLURAL_SEPARATOR};
use tolk::{CldrPluralRules, KeyTable, MemoryStore, TranslationStore, TranslationValue};

use super::SourceArgs;
use crate::output::table::{format_coverage_table, LocaleCoverage};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Source locale every other locale is compared against.
    #[arg(long, default_value = "en")]
    pub source: String,

    /// Locales to check coverage for (comma-separated). Defaults to every
    /// loaded locale except the source.
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    locale: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
    plural_gaps: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let store = MemoryStore::default();
    args.sources.load_into(&store)?;

    let snapshot = store.snapshot();
    let Some(source_table) = snapshot.translations.get(&args.source) else {
        return Err(miette!("source locale '{}' is not loaded", args.source));
    };
    let source_keys = store.keys(&args.source);
    let source_count = source_keys.len();

    let locales = if args.lang.is_empty() {
        store
            .locales()
            .into_iter()
            .filter(|locale| *locale != args.source)
            .collect()
    } else {
        args.lang.clone()
    };

    let empty = KeyTable::new();
    let coverage_data: Vec<LocaleCoverage> = locales
        .into_iter()
        .map(|locale| {
            // An unloaded locale has every key missing
            let table = snapshot.translations.get(&locale).unwrap_or(&empty);
            locale_coverage(locale, &source_keys, source_table, table)
        })
        .collect();

    let any_incomplete = coverage_data.iter().any(|c| !c.is_complete());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                locale: c.locale.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
                plural_gaps: c.plural_gaps.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{}", table);

        let heading = Style::new().bold();
        for locale_coverage in &coverage_data {
            if !locale_coverage.missing.is_empty() {
                let title = format!("Missing in {}:", locale_coverage.locale);
                println!(
                    "\n{}",
                    title.if_supports_color(Stream::Stdout, |text| text.style(heading))
                );
                for key in &locale_coverage.missing {
                    println!("  - {}", key);
                }
            }
            if !locale_coverage.plural_gaps.is_empty() {
                let forms: Vec<&str> = CldrPluralRules
                    .forms(&locale_coverage.locale)
                    .iter()
                    .copied()
                    .map(category_str)
                    .collect();
                let title = format!(
                    "Too few plural forms in {} (expected {}):",
                    locale_coverage.locale,
                    forms.join(PLURAL_SEPARATOR)
                );
                println!(
                    "\n{}",
                    title.if_supports_color(Stream::Stdout, |text| text.style(heading))
                );
                for key in &locale_coverage.plural_gaps {
                    println!("  - {}", key);
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Compare one locale's keys against the source locale.
///
/// A key counts as a plural gap when its source text has `:::` forms and
/// the translation provides fewer forms than the locale's plural rules use.
fn locale_coverage(
    locale: String,
    source_keys: &[String],
    source: &KeyTable,
    translations: &KeyTable,
) -> LocaleCoverage {
    let needed = CldrPluralRules.forms(&locale).len();
    let mut translated = 0;
    let mut missing = Vec::new();
    let mut plural_gaps = Vec::new();

    for key in source_keys {
        let Some(value) = translations.get(key) else {
            missing.push(key.clone());
            continue;
        };
        translated += 1;

        let is_plural = source
            .get(key)
            .and_then(TranslationValue::as_text)
            .is_some_and(|text| text.contains(PLURAL_SEPARATOR));
        let too_few = value
            .as_text()
            .is_some_and(|text| plural_form_count(text) < needed);
        if is_plural && too_few {
            plural_gaps.push(key.clone());
        }
    }

    LocaleCoverage {
        locale,
        translated,
        missing,
        plural_gaps,
    }
}
