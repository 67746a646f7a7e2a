//! The translation engine.
//!
//! [`Engine`] is the user-facing API: it reads a snapshot of its store on
//! every call, resolves the key through the locale fallback chain and
//! renders the result.

use bon::Builder;
use tracing::debug;

use crate::interpreter::{Renderer, ResolutionSource, key_exists, resolve};
use crate::store::{Snapshot, TranslationStore};
use crate::types::{Replacements, TranslationValue, Value};

/// Options for a single translation.
///
/// # Example
///
/// ```
/// use tolk::{Query, params};
///
/// let query = Query::builder()
///     .default_value("Nothing here")
///     .replacements(params! { "n" => 2 })
///     .count(2)
///     .build();
/// assert_eq!(query.count, Some(2.into()));
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct Query {
    /// Text used when no locale has the key. Defaults to the key itself.
    #[builder(into)]
    pub default_value: Option<String>,

    /// Values for the placeholders of the translation.
    #[builder(default)]
    pub replacements: Replacements,

    /// Count selecting a plural form. No plural form is selected without it.
    #[builder(into)]
    pub count: Option<Value>,
}

impl Query {
    /// A query with no default value, replacements or count.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Translates keys using the translations of a [`TranslationStore`].
///
/// The engine holds no translation data itself. Every call reads a fresh
/// [`Snapshot`](crate::Snapshot), so locales added, removed or switched in
/// the store are seen by the next call. Lookups never fail: a missing key
/// produces the default value (the key itself unless the query names one).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tolk::{Engine, MemoryStore, Query, params};
///
/// let store = Arc::new(MemoryStore::builder().locale("de-CH").fallback("en").build());
/// store.load_locale_str("de", r#"{ "greeting": "Hallo {name}!" }"#).unwrap();
/// store.load_locale_str("en", r#"{ "apples": "one apple:::{n} apples" }"#).unwrap();
///
/// let engine = Engine::new(store.clone());
///
/// let query = Query::builder().replacements(params! { "name" => "Anna" }).build();
/// assert_eq!(engine.text("greeting", &query), "Hallo Anna!");
///
/// let query = Query::builder().replacements(params! { "n" => 3 }).count(3).build();
/// assert_eq!(engine.text("apples", &query), "3 apples");
///
/// assert_eq!(engine.text("unknown.key", &Query::new()), "unknown.key");
/// ```
#[derive(Debug, Builder)]
pub struct Engine<S> {
    /// Where translations and the current locale are read from.
    store: S,

    /// Placeholder and plural rendering.
    #[builder(default)]
    renderer: Renderer,
}

impl<S: TranslationStore> Engine<S> {
    /// Create an engine with the default renderer.
    pub fn new(store: S) -> Self {
        Engine::builder().store(store).build()
    }

    /// The store this engine reads from.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The renderer used for placeholders and plural forms.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The store's current locale.
    pub fn locale(&self) -> String {
        self.store.snapshot().locale
    }

    /// Translate `key` in the store's current locale.
    pub fn translate(&self, key: &str, query: &Query) -> TranslationValue {
        let snapshot = self.store.snapshot();
        self.translate_snapshot(&snapshot.locale, &snapshot, key, query)
    }

    /// Translate `key` in `locale`, regardless of the current locale.
    ///
    /// The store's fallback locale still applies.
    pub fn translate_in(&self, locale: &str, key: &str, query: &Query) -> TranslationValue {
        let snapshot = self.store.snapshot();
        self.translate_snapshot(locale, &snapshot, key, query)
    }

    /// [`translate`](Self::translate) flattened to a string; list elements
    /// are joined with newlines.
    pub fn text(&self, key: &str, query: &Query) -> String {
        self.translate(key, query).to_string()
    }

    /// [`translate_in`](Self::translate_in) flattened to a string.
    pub fn text_in(&self, locale: &str, key: &str, query: &Query) -> String {
        self.translate_in(locale, key, query).to_string()
    }

    /// Whether `key` has a translation for the current locale.
    ///
    /// Only the current locale is consulted when it is loaded; the fallback
    /// locale is consulted only when it is not. See
    /// [`key_exists`](crate::key_exists).
    pub fn key_exists(&self, key: &str) -> bool {
        let snapshot = self.store.snapshot();
        key_exists(
            &snapshot.translations,
            &snapshot.locale,
            snapshot.fallback.as_deref(),
            key,
        )
    }

    /// Whether translations for `locale` are loaded.
    pub fn locale_exists(&self, locale: &str) -> bool {
        self.store.snapshot().translations.contains_key(locale)
    }

    fn translate_snapshot(
        &self,
        locale: &str,
        snapshot: &Snapshot,
        key: &str,
        query: &Query,
    ) -> TranslationValue {
        let resolution = resolve(
            &snapshot.translations,
            locale,
            snapshot.fallback.as_deref(),
            key,
            query.default_value.as_deref(),
        );
        if resolution.source != ResolutionSource::Exact {
            debug!(
                key,
                locale,
                resolved = resolution.locale,
                source = ?resolution.source,
                "translation not found in requested locale"
            );
        }
        self.renderer.render(
            resolution.locale,
            &resolution.value,
            &query.replacements,
            query.count.as_ref(),
        )
    }
}
