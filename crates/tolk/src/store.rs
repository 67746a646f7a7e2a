//! Translation storage read by the engine.
//!
//! The engine only ever reads a [`Snapshot`] through [`TranslationStore`].
//! [`MemoryStore`] is the in-process implementation: it owns the current
//! locale, the fallback locale and the translation table, and provides the
//! mutation entry points (set locales, add, load and remove translations).

use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bon::bon;
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, warn};

use crate::interpreter::LoadError;
use crate::types::{KeyTable, TranslationTable, TranslationValue};

/// Separator joining nested object names into a flat key.
pub const KEY_SEPARATOR: char = '.';

/// A consistent view of a store at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// The current locale.
    pub locale: String,
    /// The fallback locale, if one is configured.
    pub fallback: Option<String>,
    /// All loaded translations.
    pub translations: Arc<TranslationTable>,
}

/// Source of translations for an [`Engine`](crate::Engine).
///
/// `snapshot` must not have side effects. Every engine call takes a fresh
/// snapshot, so stores may change between calls.
pub trait TranslationStore: Send + Sync {
    fn snapshot(&self) -> Snapshot;
}

impl<T: TranslationStore + ?Sized> TranslationStore for Arc<T> {
    fn snapshot(&self) -> Snapshot {
        (**self).snapshot()
    }
}

impl<T: TranslationStore + ?Sized> TranslationStore for &T {
    fn snapshot(&self) -> Snapshot {
        (**self).snapshot()
    }
}

#[derive(Debug)]
struct StoreState {
    locale: String,
    fallback: Option<String>,
    translations: Arc<TranslationTable>,
}

/// In-memory translation store.
///
/// State sits behind a `RwLock` and the table behind an `Arc` that is
/// copied on write, so taking a snapshot is cheap and a snapshot is never
/// affected by later mutations.
///
/// # Example
///
/// ```
/// use tolk::MemoryStore;
///
/// let store = MemoryStore::builder().locale("de-CH").fallback("en").build();
/// store.load_locale_str("en", r#"{ "menu": { "open": "Open" } }"#).unwrap();
///
/// assert!(store.locale_exists("en"));
/// assert_eq!(store.locale(), "de-CH");
/// assert_eq!(store.keys("en"), vec!["menu.open"]);
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

#[bon]
impl MemoryStore {
    /// Build a store. The locale defaults to `en`, with no fallback and no
    /// translations.
    #[builder]
    pub fn new(
        #[builder(default = "en".to_string(), into)] locale: String,
        #[builder(into)] fallback: Option<String>,
        #[builder(default)] translations: TranslationTable,
    ) -> Self {
        Self {
            state: RwLock::new(StoreState {
                locale,
                fallback,
                translations: Arc::new(translations),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::builder().build()
    }
}

impl MemoryStore {
    // =========================================================================
    // Locale Management
    // =========================================================================

    /// The current locale.
    pub fn locale(&self) -> String {
        self.read().locale.clone()
    }

    /// Change the current locale. Its translations need not be loaded yet.
    pub fn set_locale(&self, locale: impl Into<String>) {
        self.write().locale = locale.into();
    }

    /// The fallback locale, if any.
    pub fn fallback_locale(&self) -> Option<String> {
        self.read().fallback.clone()
    }

    /// Change the fallback locale.
    pub fn set_fallback_locale(&self, locale: impl Into<String>) {
        self.write().fallback = Some(locale.into());
    }

    /// Remove the fallback locale.
    pub fn clear_fallback_locale(&self) {
        self.write().fallback = None;
    }

    // =========================================================================
    // Translation Management
    // =========================================================================

    /// Whether translations for `locale` are loaded.
    pub fn locale_exists(&self, locale: &str) -> bool {
        self.read().translations.contains_key(locale)
    }

    /// All loaded locales, sorted.
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.read().translations.keys().cloned().collect();
        locales.sort();
        locales
    }

    /// All keys loaded for `locale`, sorted. Empty when it is not loaded.
    pub fn keys(&self, locale: &str) -> Vec<String> {
        let state = self.read();
        let mut keys: Vec<String> = state
            .translations
            .get(locale)
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Add translations to `locale`, keeping its existing keys.
    ///
    /// Keys present in both are overwritten by `translations`.
    pub fn add_locale(&self, locale: impl Into<String>, translations: KeyTable) {
        let locale = locale.into();
        let count = translations.len();
        let mut state = self.write();
        Arc::make_mut(&mut state.translations)
            .entry(locale.clone())
            .or_default()
            .extend(translations);
        debug!(%locale, keys = count, "added translations");
    }

    /// Add translations from a JSON object, keeping existing keys.
    ///
    /// Nested objects are flattened into dotted keys; see [`flatten`].
    /// Returns the number of keys added.
    pub fn add_locale_json(
        &self,
        locale: impl Into<String>,
        document: JsonValue,
    ) -> Result<usize, LoadError> {
        let locale = locale.into();
        let translations = flatten_document(&locale, document)?;
        let count = translations.len();
        self.add_locale(locale, translations);
        Ok(count)
    }

    /// Load a locale from a JSON document, replacing its previous keys.
    ///
    /// Returns the number of keys loaded.
    pub fn load_locale_str(
        &self,
        locale: impl Into<String>,
        content: &str,
    ) -> Result<usize, LoadError> {
        let locale = locale.into();
        let document: JsonValue =
            serde_json::from_str(content).map_err(|source| LoadError::Json {
                locale: locale.clone(),
                source,
            })?;
        let translations = flatten_document(&locale, document)?;
        let count = translations.len();
        let mut state = self.write();
        Arc::make_mut(&mut state.translations).insert(locale.clone(), translations);
        debug!(%locale, keys = count, "loaded translations");
        Ok(count)
    }

    /// Load a locale from a JSON file, replacing its previous keys.
    ///
    /// # Example
    ///
    /// ```ignore
    /// store.load_locale_file("de", "assets/i18n/de.json")?;
    /// ```
    pub fn load_locale_file(
        &self,
        locale: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_locale_str(locale, &content)
    }

    /// Load a bundle of locales from one JSON document shaped
    /// `{ "<locale>": { "<key>": ... } }`, replacing each listed locale.
    ///
    /// Returns the number of locales loaded.
    pub fn load_bundle_str(&self, content: &str) -> Result<usize, LoadError> {
        let bundle = "<bundle>";
        let document: JsonValue =
            serde_json::from_str(content).map_err(|source| LoadError::Json {
                locale: bundle.to_string(),
                source,
            })?;
        let JsonValue::Object(locales) = document else {
            return Err(LoadError::NotAnObject {
                locale: bundle.to_string(),
                found: json_type_name(&document),
            });
        };

        let mut loaded = Vec::with_capacity(locales.len());
        for (locale, document) in locales {
            let translations = flatten_document(&locale, document)?;
            loaded.push((locale, translations));
        }

        let count = loaded.len();
        let mut state = self.write();
        let table = Arc::make_mut(&mut state.translations);
        for (locale, translations) in loaded {
            debug!(%locale, keys = translations.len(), "loaded translations");
            table.insert(locale, translations);
        }
        Ok(count)
    }

    /// Load a bundle file; see [`load_bundle_str`](Self::load_bundle_str).
    pub fn load_bundle_file(&self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_bundle_str(&content)
    }

    /// Remove all translations for `locale`.
    ///
    /// Returns whether the locale was loaded.
    pub fn remove_locale(&self, locale: &str) -> bool {
        if !self.locale_exists(locale) {
            return false;
        }
        let mut state = self.write();
        let removed = Arc::make_mut(&mut state.translations)
            .remove(locale)
            .is_some();
        if removed {
            debug!(locale, "removed translations");
        }
        removed
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TranslationStore for MemoryStore {
    fn snapshot(&self) -> Snapshot {
        let state = self.read();
        Snapshot {
            locale: state.locale.clone(),
            fallback: state.fallback.clone(),
            translations: Arc::clone(&state.translations),
        }
    }
}

/// Flatten a JSON object of translations into a [`KeyTable`].
///
/// Nested objects become dotted keys (`{"menu": {"open": "Open"}}` gives
/// `menu.open`), strings become `Text`, arrays of strings become `List`.
/// Anything else is kept as `Other`; arrays holding non-strings are
/// kept as `Other` too, with a warning.
pub fn flatten(object: Map<String, JsonValue>) -> KeyTable {
    let mut table = KeyTable::new();
    flatten_into(None, object, &mut table);
    table
}

fn flatten_into(prefix: Option<&str>, object: Map<String, JsonValue>, table: &mut KeyTable) {
    for (name, value) in object {
        let key = match prefix {
            Some(prefix) => format!("{prefix}{KEY_SEPARATOR}{name}"),
            None => name,
        };
        let value = match value {
            JsonValue::Object(nested) => {
                flatten_into(Some(&key), nested, table);
                continue;
            }
            JsonValue::String(text) => TranslationValue::Text(text),
            JsonValue::Array(items) if items.iter().all(JsonValue::is_string) => {
                TranslationValue::List(
                    items
                        .into_iter()
                        .filter_map(|item| match item {
                            JsonValue::String(text) => Some(text),
                            _ => None,
                        })
                        .collect(),
                )
            }
            JsonValue::Array(items) => {
                warn!(%key, "only arrays of strings are supported as list translations");
                TranslationValue::Other(JsonValue::Array(items))
            }
            other => TranslationValue::Other(other),
        };
        table.insert(key, value);
    }
}

fn flatten_document(locale: &str, document: JsonValue) -> Result<KeyTable, LoadError> {
    match document {
        JsonValue::Object(object) => Ok(flatten(object)),
        other => Err(LoadError::NotAnObject {
            locale: locale.to_string(),
            found: json_type_name(&other),
        }),
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
