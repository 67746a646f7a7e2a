//! Placeholder substitution and rendering of resolved translations.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use bon::bon;
use regex::{Captures, Regex};

use crate::interpreter::delimiters::DelimiterPair;
use crate::interpreter::diagnostics::{DiagnosticSink, TracingSink};
use crate::interpreter::dispatch::dispatch_plural;
use crate::interpreter::error::{Diagnostic, compute_suggestions};
use crate::interpreter::plural::{CldrPluralRules, PluralNumber, PluralRuleProvider};
use crate::types::{Replacements, TranslationValue, Value};

/// Renders resolved translations: substitutes placeholders, then selects a
/// plural form when a count is given.
///
/// The placeholder matcher is compiled once, when the renderer is built,
/// from its [`DelimiterPair`]. A renderer is immutable afterwards and can be
/// shared across threads.
///
/// # Example
///
/// ```
/// use tolk::{Renderer, TranslationValue, params};
///
/// let renderer = Renderer::default();
/// let text = TranslationValue::from("{count} apple:::{count} apples");
///
/// let rendered = renderer.render("en", &text, &params! { "count" => 3 }, Some(&3.into()));
/// assert_eq!(rendered, "3 apples");
/// ```
pub struct Renderer {
    delimiters: DelimiterPair,
    matcher: Option<Regex>,
    plural_rules: Arc<dyn PluralRuleProvider>,
    sink: Arc<dyn DiagnosticSink>,
}

#[bon]
impl Renderer {
    /// Build a renderer.
    ///
    /// Defaults: `{`/`}` delimiters, [`CldrPluralRules`], [`TracingSink`].
    #[builder]
    pub fn new(
        #[builder(default)] delimiters: DelimiterPair,
        plural_rules: Option<Arc<dyn PluralRuleProvider>>,
        sink: Option<Arc<dyn DiagnosticSink>>,
    ) -> Self {
        let sink = sink.unwrap_or_else(|| Arc::new(TracingSink));
        let matcher = match delimiters.matcher() {
            Ok(matcher) => Some(matcher),
            Err(_) => {
                sink.report(Diagnostic::MisconfiguredDelimiters {
                    given: vec![delimiters.start().to_string(), delimiters.end().to_string()],
                });
                None
            }
        };
        Self {
            delimiters,
            matcher,
            plural_rules: plural_rules.unwrap_or_else(|| Arc::new(CldrPluralRules)),
            sink,
        }
    }

    /// The delimiters this renderer matches.
    pub fn delimiters(&self) -> &DelimiterPair {
        &self.delimiters
    }

    /// The plural rules used for `:::` form selection.
    pub fn plural_rules(&self) -> &dyn PluralRuleProvider {
        self.plural_rules.as_ref()
    }

    /// The sink receiving this renderer's diagnostics.
    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    /// Render a translation found under `locale`.
    ///
    /// - `Text` has its placeholders substituted, then, when `count` is
    ///   given, is reduced to a single plural form.
    /// - `List` has each element substituted independently; missing
    ///   placeholders are not reported and plural forms are not split.
    /// - `Other` is returned unchanged.
    ///
    /// A non-numeric `count` is reported for every kind of translation.
    pub fn render(
        &self,
        locale: &str,
        translation: &TranslationValue,
        replacements: &Replacements,
        count: Option<&Value>,
    ) -> TranslationValue {
        match translation {
            TranslationValue::Text(text) => {
                let rendered = self.replace(text, replacements, true);
                match count {
                    Some(count) => TranslationValue::Text(dispatch_plural(
                        self.plural_rules.as_ref(),
                        self.sink.as_ref(),
                        locale,
                        rendered,
                        count,
                    )),
                    None => TranslationValue::Text(rendered),
                }
            }
            TranslationValue::List(items) => {
                self.check_count(count);
                TranslationValue::List(
                    items
                        .iter()
                        .map(|item| self.replace(item, replacements, false))
                        .collect(),
                )
            }
            TranslationValue::Other(value) => {
                self.check_count(count);
                TranslationValue::Other(value.clone())
            }
        }
    }

    /// Report a non-numeric count on values without plural forms.
    fn check_count(&self, count: Option<&Value>) {
        if let Some(count) = count.filter(|count| PluralNumber::from_value(count).is_none()) {
            self.sink.report(Diagnostic::NonNumericPluralCount {
                count: count.to_string(),
            });
        }
    }

    /// Substitute every placeholder of `text` found in `replacements`.
    ///
    /// Placeholders without a replacement stay in place, delimiters
    /// included, and are reported as [`Diagnostic::MissingPlaceholder`].
    pub fn substitute(&self, text: &str, replacements: &Replacements) -> String {
        self.replace(text, replacements, true)
    }

    /// Names of all placeholders in `text`, in order of appearance.
    pub fn placeholders<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let Some(matcher) = &self.matcher else {
            return Vec::new();
        };
        matcher
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    fn replace(&self, text: &str, replacements: &Replacements, warn: bool) -> String {
        let Some(matcher) = &self.matcher else {
            return text.to_string();
        };
        matcher
            .replace_all(text, |caps: &Captures<'_>| {
                let placeholder = caps.get(0).map_or("", |m| m.as_str());
                let name = caps.get(1).map_or("", |m| m.as_str());
                if let Some(value) = replacements.get(name) {
                    return value.to_string();
                }
                if warn {
                    self.sink.report(Diagnostic::MissingPlaceholder {
                        placeholder: placeholder.to_string(),
                        text: text.to_string(),
                        suggestions: suggest_names(name, replacements),
                    });
                }
                placeholder.to_string()
            })
            .into_owned()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::builder().build()
    }
}

impl Debug for Renderer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Renderer")
            .field("delimiters", &self.delimiters)
            .field("matcher", &self.matcher.as_ref().map(Regex::as_str))
            .finish_non_exhaustive()
    }
}

fn suggest_names(name: &str, replacements: &Replacements) -> Vec<String> {
    let mut available: Vec<String> = replacements.keys().cloned().collect();
    available.sort();
    compute_suggestions(name, &available)
}
