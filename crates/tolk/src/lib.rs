pub mod engine;
pub mod interpreter;
pub mod store;
pub mod types;

pub use engine::{Engine, Query};
pub use interpreter::{
    CldrPluralRules, CollectingSink, DelimiterPair, Diagnostic, DiagnosticSink, LoadError,
    PluralNumber, PluralRuleProvider, Renderer, Resolution, ResolutionSource, TracingSink,
    compute_suggestions, key_exists, resolve,
};
pub use store::{MemoryStore, Snapshot, TranslationStore};
pub use types::{KeyTable, Replacements, TranslationTable, TranslationValue, Value};

/// Creates a [`Replacements`] map from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, booleans or strings directly.
///
/// # Example
///
/// ```
/// use tolk::{params, Value};
///
/// let p = params! { "count" => 3, "name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["count"].as_number(), Some(3));
/// assert_eq!(p["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
