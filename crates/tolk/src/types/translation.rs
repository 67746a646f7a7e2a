use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::Value;

/// Translations for a single locale, keyed by translation key.
pub type KeyTable = HashMap<String, TranslationValue>;

/// All loaded translations, keyed by locale.
pub type TranslationTable = HashMap<String, KeyTable>;

/// Placeholder name (without delimiters) to substitution value.
pub type Replacements = HashMap<String, Value>;

/// A stored translation, or the result of rendering one.
///
/// `List` holds pre-split content such as paragraphs: each element is
/// rendered on its own and the list is never split into plural forms.
/// `Other` carries anything else a translation document may contain
/// (numbers, booleans, null) and passes through rendering untouched.
///
/// # Example
///
/// ```
/// use tolk::TranslationValue;
///
/// let value: TranslationValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
/// assert_eq!(value, TranslationValue::from(vec!["a", "b"]));
/// assert_eq!(value.to_string(), "a\nb");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationValue {
    /// A single string, possibly holding `:::`-separated plural forms.
    Text(String),

    /// An ordered sequence of strings.
    List(Vec<String>),

    /// A value that is neither a string nor a list of strings.
    Other(JsonValue),
}

impl TranslationValue {
    /// Get this value as text, if it is a single string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TranslationValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            TranslationValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Lists are joined with newlines; `Other` uses its JSON text.
impl Display for TranslationValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TranslationValue::Text(s) => write!(f, "{s}"),
            TranslationValue::List(items) => write!(f, "{}", items.join("\n")),
            TranslationValue::Other(JsonValue::Null) => Ok(()),
            TranslationValue::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for TranslationValue {
    fn from(s: String) -> Self {
        TranslationValue::Text(s)
    }
}

impl From<&str> for TranslationValue {
    fn from(s: &str) -> Self {
        TranslationValue::Text(s.to_string())
    }
}

impl From<Vec<String>> for TranslationValue {
    fn from(items: Vec<String>) -> Self {
        TranslationValue::List(items)
    }
}

impl From<Vec<&str>> for TranslationValue {
    fn from(items: Vec<&str>) -> Self {
        TranslationValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl PartialEq<str> for TranslationValue {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for TranslationValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}
