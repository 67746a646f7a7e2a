//! Locale fallback chain for finding a translation.
//!
//! A key is looked up, first match wins, in:
//!
//! 1. the requested locale (`de-CH`)
//! 2. its base language when the locale is regional (`de`)
//! 3. the fallback locale
//!
//! and otherwise resolves to a default value, the key itself unless the
//! caller supplied one. Resolution reads the table and never modifies it.

use std::borrow::Cow;

use crate::types::{TranslationTable, TranslationValue};

/// Separator between the language and region parts of a locale.
pub const REGION_SEPARATOR: char = '-';

/// Which step of the fallback chain produced a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Found in the requested locale.
    Exact,
    /// Found in the base language of a regional locale.
    Regional,
    /// Found in the fallback locale.
    Fallback,
    /// Not found; the default value was used.
    Default,
}

/// A raw, not yet rendered, translation and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    /// The stored value, or the default.
    pub value: Cow<'a, TranslationValue>,
    /// Locale the value is attributed to; plural rules follow this locale.
    pub locale: &'a str,
    /// The step that matched.
    pub source: ResolutionSource,
}

/// The base language of a regional locale: `de` for `de-CH`.
///
/// Returns `None` for locales without a region.
pub fn base_locale(locale: &str) -> Option<&str> {
    locale
        .split_once(REGION_SEPARATOR)
        .map(|(base, _)| base)
}

/// Find the translation for `key`, starting from `current`.
///
/// A value found in the fallback locale is attributed to `current`. The
/// default value is attributed to `current` when the fallback locale is
/// unset or not loaded, and to the fallback locale when it is loaded but
/// lacks the key.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use tolk::{ResolutionSource, TranslationTable, TranslationValue, resolve};
///
/// let mut table = TranslationTable::new();
/// table.insert(
///     "de".to_string(),
///     HashMap::from([("hello".to_string(), TranslationValue::from("Hallo"))]),
/// );
///
/// let found = resolve(&table, "de-CH", Some("en"), "hello", None);
/// assert_eq!(*found.value, TranslationValue::from("Hallo"));
/// assert_eq!(found.locale, "de");
/// assert_eq!(found.source, ResolutionSource::Regional);
///
/// let missing = resolve(&table, "de-CH", Some("en"), "bye", None);
/// assert_eq!(*missing.value, TranslationValue::from("bye"));
/// assert_eq!(missing.source, ResolutionSource::Default);
/// ```
pub fn resolve<'a>(
    table: &'a TranslationTable,
    current: &'a str,
    fallback: Option<&'a str>,
    key: &str,
    default: Option<&str>,
) -> Resolution<'a> {
    let found = |locale: &'a str, source: ResolutionSource| {
        table
            .get(locale)
            .and_then(|keys| keys.get(key))
            .map(|value| (value, locale, source))
    };

    let matched = found(current, ResolutionSource::Exact)
        .or_else(|| base_locale(current).and_then(|base| found(base, ResolutionSource::Regional)))
        .or_else(|| fallback.and_then(|fallback| found(fallback, ResolutionSource::Fallback)));

    if let Some((value, locale, source)) = matched {
        let locale = match source {
            ResolutionSource::Fallback => current,
            _ => locale,
        };
        return Resolution {
            value: Cow::Borrowed(value),
            locale,
            source,
        };
    }

    let locale = match fallback {
        Some(fallback) if table.contains_key(fallback) => fallback,
        _ => current,
    };
    Resolution {
        value: Cow::Owned(TranslationValue::Text(default.unwrap_or(key).to_string())),
        locale,
        source: ResolutionSource::Default,
    }
}

/// Whether `key` has a translation for `current`.
///
/// When `current` is loaded, only its own table is consulted: neither the
/// base language of a regional locale nor the fallback locale count. When
/// `current` is not loaded, the answer comes from the fallback locale
/// (`false` if that is unset or not loaded either).
///
/// This is narrower than [`resolve`], which would still find a translation
/// through the base language or the fallback for a loaded `current`.
pub fn key_exists(
    table: &TranslationTable,
    current: &str,
    fallback: Option<&str>,
    key: &str,
) -> bool {
    match table.get(current) {
        Some(keys) => keys.contains_key(key),
        None => fallback
            .and_then(|fallback| table.get(fallback))
            .is_some_and(|keys| keys.contains_key(key)),
    }
}
