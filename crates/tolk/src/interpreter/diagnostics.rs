//! Operator-facing channel for non-fatal rendering diagnostics.

use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::interpreter::error::Diagnostic;

/// Receives diagnostics produced while rendering.
///
/// Reporting must not fail or block for long: it is called inline from
/// rendering, which never returns an error.
pub trait DiagnosticSink: Send + Sync {
    /// Record a single diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

/// Emits every diagnostic as a `tracing` warning.
///
/// Events use the target `tolk::diagnostics` and carry the diagnostic's
/// [`kind`](Diagnostic::kind) as a field, so they can be filtered with an
/// `EnvFilter` directive such as `tolk::diagnostics=off`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        warn!(target: "tolk::diagnostics", kind = diagnostic.kind(), "{diagnostic}");
    }
}

/// Keeps diagnostics in memory, in arrival order, without duplicates.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tolk::{CollectingSink, DelimiterPair, Renderer, params};
///
/// let sink = Arc::new(CollectingSink::new());
/// let renderer = Renderer::builder()
///     .delimiters(DelimiterPair::default())
///     .sink(sink.clone())
///     .build();
///
/// renderer.substitute("Hi {name}", &params! {});
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all diagnostics collected so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Drain all collected diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        mem::take(&mut *self.lock())
    }

    /// Number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Poisoning is ignored; no write leaves the Vec half-updated.
    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        let mut diagnostics = self.lock();
        if !diagnostics.contains(&diagnostic) {
            diagnostics.push(diagnostic);
        }
    }
}
