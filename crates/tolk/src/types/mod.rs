mod translation;
mod value;

pub use translation::{KeyTable, Replacements, TranslationTable, TranslationValue};
pub use value::Value;
