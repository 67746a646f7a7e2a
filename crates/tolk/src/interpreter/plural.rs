//! CLDR plural form selection.
//!
//! Translations carry their plural forms as `:::`-separated segments, in
//! ascending CLDR category order for the language: English writes
//! `"one item:::{n} items"`, Russian writes four segments for
//! `one`, `few`, `many` and `other`, Japanese writes a single segment.
//!
//! The category for a count comes from ICU cardinal rules. Rules are cached
//! per thread per language to avoid re-creating `PluralRules` instances on
//! every call. The segment index is the category's position in the
//! language's form list.

use std::cell::RefCell;

use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

use crate::types::Value;

use PluralCategory::{Few, Many, One, Other, Two, Zero};

const ONE_OTHER: &[PluralCategory] = &[One, Other];
const OTHER: &[PluralCategory] = &[Other];
const ONE_FEW_MANY_OTHER: &[PluralCategory] = &[One, Few, Many, Other];
const ONE_FEW_OTHER: &[PluralCategory] = &[One, Few, Other];
const ONE_TWO_OTHER: &[PluralCategory] = &[One, Two, Other];
const ONE_TWO_FEW_OTHER: &[PluralCategory] = &[One, Two, Few, Other];
const ONE_TWO_FEW_MANY_OTHER: &[PluralCategory] = &[One, Two, Few, Many, Other];
const ZERO_ONE_OTHER: &[PluralCategory] = &[Zero, One, Other];
const ALL: &[PluralCategory] = &[Zero, One, Two, Few, Many, Other];

/// Language subtag to the plural forms translators provide, in segment order.
///
/// Categories ICU may report for very large numbers or fractions only
/// (French `many` for a million, Czech `many` for decimals) are left out,
/// so that integer counts always land on a segment translators write.
const FORM_TABLE: &[(&str, &[PluralCategory])] = &[
    ("af", ONE_OTHER),
    ("am", ONE_OTHER),
    ("ar", ALL),
    ("az", ONE_OTHER),
    ("be", ONE_FEW_MANY_OTHER),
    ("bg", ONE_OTHER),
    ("bn", ONE_OTHER),
    ("bs", ONE_FEW_OTHER),
    ("ca", ONE_OTHER),
    ("cs", ONE_FEW_OTHER),
    ("cy", ALL),
    ("da", ONE_OTHER),
    ("de", ONE_OTHER),
    ("el", ONE_OTHER),
    ("en", ONE_OTHER),
    ("es", ONE_OTHER),
    ("et", ONE_OTHER),
    ("eu", ONE_OTHER),
    ("fa", ONE_OTHER),
    ("fi", ONE_OTHER),
    ("fil", ONE_OTHER),
    ("fr", ONE_OTHER),
    ("ga", ONE_TWO_FEW_MANY_OTHER),
    ("gd", ONE_TWO_FEW_OTHER),
    ("gl", ONE_OTHER),
    ("gu", ONE_OTHER),
    ("he", ONE_TWO_OTHER),
    ("hi", ONE_OTHER),
    ("hr", ONE_FEW_OTHER),
    ("hu", ONE_OTHER),
    ("hy", ONE_OTHER),
    ("id", OTHER),
    ("is", ONE_OTHER),
    ("it", ONE_OTHER),
    ("ja", OTHER),
    ("ka", ONE_OTHER),
    ("kk", ONE_OTHER),
    ("km", OTHER),
    ("kn", ONE_OTHER),
    ("ko", OTHER),
    ("lo", OTHER),
    ("lt", ONE_FEW_OTHER),
    ("lv", ZERO_ONE_OTHER),
    ("mk", ONE_OTHER),
    ("ml", ONE_OTHER),
    ("mr", ONE_OTHER),
    ("ms", OTHER),
    ("mt", ONE_TWO_FEW_MANY_OTHER),
    ("my", OTHER),
    ("nb", ONE_OTHER),
    ("nl", ONE_OTHER),
    ("nn", ONE_OTHER),
    ("no", ONE_OTHER),
    ("pl", ONE_FEW_MANY_OTHER),
    ("pt", ONE_OTHER),
    ("ro", ONE_FEW_OTHER),
    ("ru", ONE_FEW_MANY_OTHER),
    ("sk", ONE_FEW_OTHER),
    ("sl", ONE_TWO_FEW_OTHER),
    ("sq", ONE_OTHER),
    ("sr", ONE_FEW_OTHER),
    ("sv", ONE_OTHER),
    ("sw", ONE_OTHER),
    ("ta", ONE_OTHER),
    ("te", ONE_OTHER),
    ("th", OTHER),
    ("tr", ONE_OTHER),
    ("uk", ONE_FEW_MANY_OTHER),
    ("ur", ONE_OTHER),
    ("uz", ONE_OTHER),
    ("vi", OTHER),
    ("yue", OTHER),
    ("zh", OTHER),
];

/// Language used for codes missing from [`FORM_TABLE`].
const DEFAULT_LANGUAGE: &str = "en";

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by language code.
    static PLURAL_RULES_CACHE: RefCell<Vec<(&'static str, Option<PluralRules>)>> =
        const { RefCell::new(Vec::new()) };
}

/// A numeric plural count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PluralNumber {
    Integer(i64),
    Decimal(f64),
}

impl PluralNumber {
    /// Extract a count from a value, if it is numeric.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(PluralNumber::Integer(*n)),
            Value::Float(f) => Some(PluralNumber::Decimal(*f)),
            Value::Bool(_) | Value::String(_) => None,
        }
    }

    /// The count as an integer, if it has no fractional part.
    fn as_integer(self) -> Option<i64> {
        match self {
            PluralNumber::Integer(n) => Some(n),
            PluralNumber::Decimal(f) if f.is_finite() && f.fract() == 0.0 => {
                let n = f as i64;
                (n as f64 == f).then_some(n)
            }
            PluralNumber::Decimal(_) => None,
        }
    }
}

impl From<i64> for PluralNumber {
    fn from(n: i64) -> Self {
        PluralNumber::Integer(n)
    }
}

impl From<f64> for PluralNumber {
    fn from(f: f64) -> Self {
        PluralNumber::Decimal(f)
    }
}

/// Maps a locale and a count to the zero-based plural segment to use.
///
/// Implementations must be deterministic and total: every locale string,
/// known or not, yields an index.
///
/// Closures with the matching signature implement this trait, which is
/// handy for pinning an index in tests:
///
/// ```
/// use tolk::{PluralNumber, PluralRuleProvider};
///
/// let always_second = |_: &str, _: PluralNumber| 1_usize;
/// assert_eq!(always_second.plural_form_index("en", PluralNumber::Integer(1)), 1);
/// ```
pub trait PluralRuleProvider: Send + Sync {
    fn plural_form_index(&self, locale: &str, count: PluralNumber) -> usize;
}

impl<F> PluralRuleProvider for F
where
    F: Fn(&str, PluralNumber) -> usize + Send + Sync,
{
    fn plural_form_index(&self, locale: &str, count: PluralNumber) -> usize {
        self(locale, count)
    }
}

/// Plural rules from CLDR data.
///
/// Integer counts are categorized by ICU. Counts with a fractional part
/// always use the `other` form.
///
/// # Examples
///
/// ```
/// use tolk::{CldrPluralRules, PluralNumber, PluralRuleProvider};
///
/// let rules = CldrPluralRules;
///
/// // English: "one:::other"
/// assert_eq!(rules.plural_form_index("en", PluralNumber::Integer(1)), 0);
/// assert_eq!(rules.plural_form_index("en-GB", PluralNumber::Integer(2)), 1);
///
/// // Russian: "one:::few:::many:::other"
/// assert_eq!(rules.plural_form_index("ru", PluralNumber::Integer(1)), 0);
/// assert_eq!(rules.plural_form_index("ru", PluralNumber::Integer(3)), 1);
/// assert_eq!(rules.plural_form_index("ru", PluralNumber::Integer(5)), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CldrPluralRules;

impl CldrPluralRules {
    /// Plural forms a translation for `locale` is expected to provide, in
    /// segment order.
    pub fn forms(&self, locale: &str) -> &'static [PluralCategory] {
        lookup(&language_of(locale)).1
    }

    /// CLDR category for a count in `locale`.
    pub fn category(&self, locale: &str, count: PluralNumber) -> PluralCategory {
        let Some(n) = count.as_integer() else {
            return Other;
        };
        let (lang, _) = lookup(&language_of(locale));
        PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
            if let Some((_, rules)) = cache.iter().find(|(code, _)| *code == lang) {
                return rules.as_ref().map_or(Other, |r| r.category_for(n));
            }
            let rules = build_rules(lang);
            let category = rules.as_ref().map_or(Other, |r| r.category_for(n));
            cache.push((lang, rules));
            category
        })
    }
}

impl PluralRuleProvider for CldrPluralRules {
    fn plural_form_index(&self, locale: &str, count: PluralNumber) -> usize {
        let forms = self.forms(locale);
        let category = self.category(locale, count);
        forms
            .iter()
            .position(|c| *c == category)
            .or_else(|| forms.iter().position(|c| *c == Other))
            .unwrap_or(0)
    }
}

/// Translate a `PluralCategory` enum to its CLDR keyword.
pub fn category_str(category: PluralCategory) -> &'static str {
    match category {
        Zero => "zero",
        One => "one",
        Two => "two",
        Few => "few",
        Many => "many",
        Other => "other",
    }
}

/// Lowercased language subtag of a locale such as `de-CH` or `pt_BR`.
fn language_of(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_ascii_lowercase()
}

/// Find the table entry for a language, or the default language's entry.
fn lookup(lang: &str) -> (&'static str, &'static [PluralCategory]) {
    FORM_TABLE
        .iter()
        .find(|(code, _)| *code == lang)
        .copied()
        .unwrap_or((DEFAULT_LANGUAGE, ONE_OTHER))
}

/// Build cardinal `PluralRules` for a language code from the table.
fn build_rules(lang: &'static str) -> Option<PluralRules> {
    let locale: Locale = lang.parse().ok()?;
    PluralRules::try_new(locale.into(), PluralRuleType::Cardinal.into()).ok()
}
