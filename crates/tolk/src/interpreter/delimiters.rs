//! Placeholder delimiter configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::interpreter::diagnostics::DiagnosticSink;
use crate::interpreter::error::Diagnostic;

const DEFAULT_START: &str = "{";
const DEFAULT_END: &str = "}";

/// Start and end markers bounding a placeholder name, e.g. `{` and `}`
/// for `{name}`.
///
/// Markers are literal text: `[[` and `]]` match `[[name]]`, not a regex
/// character class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimiterPair {
    start: String,
    end: String,
}

impl Default for DelimiterPair {
    fn default() -> Self {
        Self::new(DEFAULT_START, DEFAULT_END)
    }
}

impl DelimiterPair {
    /// Create a delimiter pair from its two markers.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Build a pair from a list of markers that should hold exactly two
    /// non-empty entries.
    ///
    /// Anything else is reported as
    /// [`Diagnostic::MisconfiguredDelimiters`] and repaired: a missing or
    /// empty marker takes the default (`{` or `}`) and extra markers are
    /// ignored.
    ///
    /// ```
    /// use tolk::{CollectingSink, DelimiterPair};
    ///
    /// let sink = CollectingSink::new();
    /// assert_eq!(
    ///     DelimiterPair::from_markers(&["<<", ">>"], &sink),
    ///     DelimiterPair::new("<<", ">>")
    /// );
    /// assert!(sink.is_empty());
    ///
    /// assert_eq!(
    ///     DelimiterPair::from_markers(&["<<"], &sink),
    ///     DelimiterPair::new("<<", "}")
    /// );
    /// assert_eq!(sink.len(), 1);
    /// ```
    pub fn from_markers<S: AsRef<str>>(markers: &[S], sink: &dyn DiagnosticSink) -> Self {
        let marker = |index: usize, default: &str| {
            markers
                .get(index)
                .map(AsRef::as_ref)
                .filter(|m| !m.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        let pair = Self::new(marker(0, DEFAULT_START), marker(1, DEFAULT_END));

        if markers.len() != 2 || markers.iter().any(|m| m.as_ref().is_empty()) {
            sink.report(Diagnostic::MisconfiguredDelimiters {
                given: markers.iter().map(|m| m.as_ref().to_string()).collect(),
            });
        }
        pair
    }

    /// The marker opening a placeholder.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The marker closing a placeholder.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Compile the matcher for `start`, one or more word characters, `end`.
    ///
    /// The name is capture group 1.
    pub(crate) fn matcher(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!(
            "{}([0-9A-Za-z_]+){}",
            regex::escape(&self.start),
            regex::escape(&self.end)
        ))
    }
}
