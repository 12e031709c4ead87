//! Presentation boundary
//!
//! Everything a rendering layer needs: whether data is still loading, the
//! error to show if the fetch failed, and the derived result list.

use serde::Serialize;

use crate::doctor::{specialty_catalog, Doctor};
use crate::filters::{derive_view, FilterState};

/// Message shown when the doctor list could not be fetched
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch doctors data";

/// Message shown when no doctor passes the active filters
pub const NO_RESULTS_MESSAGE: &str = "No doctors found";

pub const NO_RESULTS_HINT: &str = "Try adjusting your filters or search criteria";

/// Fetched doctors plus the specialty catalog computed once from them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    doctors: Vec<Doctor>,
    catalog: Vec<String>,
}

impl Directory {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        let catalog = specialty_catalog(&doctors);
        Self { doctors, catalog }
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    /// Derive the visible list for a filter state
    pub fn view(&self, filters: &FilterState) -> DirectoryView<'_> {
        let doctors = derive_view(&self.doctors, filters);
        DirectoryView {
            count: doctors.len(),
            total: self.doctors.len(),
            query: filters.to_query_string(),
            filters: filters.clone(),
            specialties: &self.catalog,
            doctors,
        }
    }
}

/// Result of applying a filter state to a [`Directory`]
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryView<'a> {
    /// Canonical query string for the active filters, without `?`
    pub query: String,
    pub filters: FilterState,
    pub count: usize,
    pub total: usize,
    pub specialties: &'a [String],
    pub doctors: Vec<&'a Doctor>,
}

impl DirectoryView<'_> {
    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}

/// Lifecycle of the single fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready(Directory),
}

impl LoadState {
    /// Settle the fetch outcome. Any failure becomes [`FETCH_ERROR_MESSAGE`].
    pub fn from_result<E>(result: Result<Vec<Doctor>, E>) -> Self {
        match result {
            Ok(doctors) => LoadState::Ready(Directory::new(doctors)),
            Err(_) => LoadState::Failed(FETCH_ERROR_MESSAGE.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn directory(&self) -> Option<&Directory> {
        match self {
            LoadState::Ready(directory) => Some(directory),
            _ => None,
        }
    }

    /// What the rendering layer receives for a filter state
    ///
    /// The list is empty while loading and after a failure.
    pub fn present(&self, filters: &FilterState) -> Presentation<'_> {
        Presentation {
            loading: self.is_loading(),
            error: self.error(),
            doctors: self
                .directory()
                .map(|directory| derive_view(directory.doctors(), filters))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Presentation<'a> {
    pub loading: bool,
    pub error: Option<&'a str>,
    pub doctors: Vec<&'a Doctor>,
}
