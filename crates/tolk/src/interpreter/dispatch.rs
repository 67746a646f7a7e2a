//! Selection of one plural form from `:::`-separated text.

use crate::interpreter::diagnostics::DiagnosticSink;
use crate::interpreter::error::Diagnostic;
use crate::interpreter::plural::{PluralNumber, PluralRuleProvider};
use crate::types::Value;

/// Separator between the plural forms of a translation.
pub const PLURAL_SEPARATOR: &str = ":::";

/// Pick the plural form of `rendered` for `count` in `locale`.
///
/// Forms are separated by [`PLURAL_SEPARATOR`] and the chosen one is
/// trimmed. This never fails:
/// - a non-numeric count leaves `rendered` untouched
/// - an index past the last form falls back to the first form
///
/// Both cases are reported to `sink`.
pub fn dispatch_plural(
    rules: &dyn PluralRuleProvider,
    sink: &dyn DiagnosticSink,
    locale: &str,
    rendered: String,
    count: &Value,
) -> String {
    let Some(number) = PluralNumber::from_value(count) else {
        sink.report(Diagnostic::NonNumericPluralCount {
            count: count.to_string(),
        });
        return rendered;
    };

    let forms: Vec<&str> = rendered.split(PLURAL_SEPARATOR).collect();
    let index = rules.plural_form_index(locale, number);
    if let Some(form) = forms.get(index) {
        return form.trim().to_string();
    }

    sink.report(Diagnostic::InsufficientPluralForms {
        locale: locale.to_string(),
        index,
        forms: forms.len(),
        text: rendered.clone(),
    });
    forms
        .first()
        .map(|form| form.trim().to_string())
        .unwrap_or_default()
}

/// Number of plural forms in a text.
pub fn plural_form_count(text: &str) -> usize {
    text.split(PLURAL_SEPARATOR).count()
}
