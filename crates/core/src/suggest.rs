//! Autocomplete suggestions for the name search box
//!
//! Suggestions are derived from the input text and the full list only. The
//! [`Autocomplete`] value tracks the text being typed and whether the
//! suggestion list is open; committing a search produces a
//! [`FilterUpdate::Search`] for the query string.

use crate::doctor::Doctor;
use crate::query::FilterUpdate;

/// Maximum number of suggestions shown under the search box
pub const SUGGESTION_LIMIT: usize = 3;

/// First [`SUGGESTION_LIMIT`] doctors whose name contains `input`
///
/// Case-insensitive, in list order. Blank input yields nothing.
pub fn suggestions<'a>(input: &str, doctors: &'a [Doctor]) -> Vec<&'a Doctor> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let needle = input.to_lowercase();
    doctors
        .iter()
        .filter(|doctor| doctor.name.to_lowercase().contains(&needle))
        .take(SUGGESTION_LIMIT)
        .collect()
}

/// Narrow the specialty catalog to names containing `needle`
pub fn filter_catalog<'a>(catalog: &'a [String], needle: &str) -> Vec<&'a str> {
    let needle = needle.to_lowercase();
    catalog
        .iter()
        .filter(|specialty| specialty.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

/// Search box state: typed text plus suggestion visibility
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Autocomplete {
    text: String,
    open: bool,
}

impl Autocomplete {
    /// Start from the search value currently in the query string
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            open: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Suggestions for the current text, empty while the list is closed
    pub fn visible<'a>(&self, doctors: &'a [Doctor]) -> Vec<&'a Doctor> {
        if self.open {
            suggestions(&self.text, doctors)
        } else {
            Vec::new()
        }
    }

    /// Record typed text and return the matching suggestions
    ///
    /// The list opens for non-blank text and closes when the text is blank.
    pub fn on_input<'a>(&mut self, text: &str, doctors: &'a [Doctor]) -> Vec<&'a Doctor> {
        self.text = text.to_string();
        let matches = suggestions(text, doctors);
        self.open = !text.trim().is_empty();
        matches
    }

    /// Commit the typed text as the search filter
    pub fn submit(&mut self) -> FilterUpdate {
        self.open = false;
        FilterUpdate::Search(self.text.clone())
    }

    /// Pick a suggestion: its name becomes the text and the search filter
    pub fn select(&mut self, doctor: &Doctor) -> FilterUpdate {
        self.text = doctor.name.clone();
        self.open = false;
        FilterUpdate::Search(doctor.name.clone())
    }

    /// Close the list after an interaction outside the search box
    pub fn dismiss(&mut self) {
        self.open = false;
    }
}
