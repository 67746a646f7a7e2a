//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Coverage data for a single locale.
pub struct LocaleCoverage {
    /// Locale code (e.g., "de", "fr-CA").
    pub locale: String,
    /// Number of source keys translated.
    pub translated: usize,
    /// Source keys with no translation.
    pub missing: Vec<String>,
    /// Translated keys with fewer `:::` forms than the locale needs.
    pub plural_gaps: Vec<String>,
}

impl LocaleCoverage {
    /// Whether every source key is translated with enough plural forms.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.plural_gaps.is_empty()
    }
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(source_count: usize, coverage: &[LocaleCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Locale", "Coverage", "Missing", "Plural gaps"]);

    for locale in coverage {
        table.add_row(vec![
            locale.locale.clone(),
            format!("{}/{}", locale.translated, source_count),
            locale.missing.len().to_string(),
            locale.plural_gaps.len().to_string(),
        ]);
    }

    table
}
