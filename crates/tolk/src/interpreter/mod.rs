//! The tolk resolution and rendering engine.
//!
//! This module finds the raw translation for a key through the locale
//! fallback chain, substitutes placeholders and selects plural forms.
//! Everything here is a pure function of its inputs apart from diagnostics,
//! which go to a [`DiagnosticSink`].

mod delimiters;
mod diagnostics;
mod dispatch;
mod error;
mod plural;
mod render;
mod resolve;

pub use delimiters::DelimiterPair;
pub use diagnostics::{CollectingSink, DiagnosticSink, TracingSink};
pub use dispatch::{PLURAL_SEPARATOR, dispatch_plural, plural_form_count};
pub use error::{Diagnostic, LoadError, compute_suggestions};
pub use plural::{CldrPluralRules, PluralNumber, PluralRuleProvider, category_str};
pub use render::Renderer;
pub use resolve::{
    REGION_SEPARATOR, Resolution, ResolutionSource, base_locale, key_exists, resolve,
};
