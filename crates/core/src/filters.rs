//! Filter and sort engine
//!
//! [`derive_view`] computes the visible list from the full doctor list and a
//! [`FilterState`]. Name, mode and specialty filters combine with AND; the
//! specialty filter itself matches when ANY selected specialty is present.

use serde::Serialize;

use crate::doctor::{ConsultationMode, Doctor};

/// Consultation mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeFilter {
    #[default]
    Any,
    Video,
    Clinic,
}

impl ModeFilter {
    /// Parse a `mode` query value. Unrecognized values mean no filtering.
    pub fn parse(value: &str) -> Self {
        match value {
            "video" => ModeFilter::Video,
            "clinic" => ModeFilter::Clinic,
            _ => ModeFilter::Any,
        }
    }

    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            ModeFilter::Any => None,
            ModeFilter::Video => Some("video"),
            ModeFilter::Clinic => Some("clinic"),
        }
    }

    fn required_mode(&self) -> Option<ConsultationMode> {
        match self {
            ModeFilter::Any => None,
            ModeFilter::Video => Some(ConsultationMode::VideoConsult),
            ModeFilter::Clinic => Some(ConsultationMode::InClinic),
        }
    }

    pub fn matches(&self, doctor: &Doctor) -> bool {
        match self.required_mode() {
            Some(mode) => doctor.offers(mode),
            None => true,
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep the order received from the endpoint
    #[default]
    Unsorted,
    /// Fee, lowest first
    Fees,
    /// Experience, most experienced first
    Experience,
}

impl SortKey {
    /// Parse a `sort` query value. Unrecognized values mean no sorting.
    pub fn parse(value: &str) -> Self {
        match value {
            "fees" => SortKey::Fees,
            "experience" => SortKey::Experience,
            _ => SortKey::Unsorted,
        }
    }

    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            SortKey::Unsorted => None,
            SortKey::Fees => Some("fees"),
            SortKey::Experience => Some("experience"),
        }
    }
}

/// Active search, filter and sort selections
///
/// Always decoded from a query string (see [`crate::query`]); there is no
/// other source of truth for it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterState {
    pub search: String,
    pub mode: ModeFilter,
    pub sort: SortKey,
    /// Selected specialties in the order they were chosen, without duplicates
    pub specialties: Vec<String>,
}

impl FilterState {
    /// True when no field would filter or reorder the list
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.mode == ModeFilter::Any
            && self.sort == SortKey::Unsorted
            && self.specialties.is_empty()
    }

    pub fn is_specialty_selected(&self, specialty: &str) -> bool {
        self.specialties.iter().any(|s| s == specialty)
    }

    fn matches_name(&self, needle: &str, doctor: &Doctor) -> bool {
        needle.is_empty() || doctor.name.to_lowercase().contains(needle)
    }

    /// Predicate over doctors with the lower-cased search computed once
    fn matcher(&self) -> impl Fn(&Doctor) -> bool + '_ {
        let needle = self.search.to_lowercase();
        move |doctor: &Doctor| {
            self.matches_name(&needle, doctor)
                && self.mode.matches(doctor)
                && self.matches_specialty(doctor)
        }
    }

    fn matches_specialty(&self, doctor: &Doctor) -> bool {
        self.specialties.is_empty()
            || doctor
                .specialties
                .iter()
                .any(|specialty| self.is_specialty_selected(specialty))
    }

    /// Whether a doctor passes every filter of this state
    pub fn matches(&self, doctor: &Doctor) -> bool {
        self.matcher()(doctor)
    }
}

/// Compute the filtered, ordered list for a filter state
///
/// The input slice is left untouched and the result borrows from it. Sorting
/// is stable, so doctors with equal keys keep their relative order.
pub fn derive_view<'a>(doctors: &'a [Doctor], state: &FilterState) -> Vec<&'a Doctor> {
    let matches = state.matcher();
    let mut result: Vec<&Doctor> = doctors.iter().filter(|doctor| matches(*doctor)).collect();

    match state.sort {
        SortKey::Unsorted => {}
        SortKey::Fees => result.sort_by_key(|doctor| doctor.fees),
        SortKey::Experience => result.sort_by(|a, b| b.experience.cmp(&a.experience)),
    }

    result
}
