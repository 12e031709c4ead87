//! Doctor records and their normalization
//!
//! Pure functions that turn the raw records served by the directory endpoint
//! into [`Doctor`] values. Missing or malformed fields never fail the batch:
//! they degrade to empty strings, zero, or an empty list.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Consultation channel offered by a doctor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsultationMode {
    #[serde(rename = "Video Consult")]
    VideoConsult,
    #[serde(rename = "In Clinic")]
    InClinic,
}

impl ConsultationMode {
    pub fn label(&self) -> &'static str {
        match self {
            ConsultationMode::VideoConsult => "Video Consult",
            ConsultationMode::InClinic => "In Clinic",
        }
    }
}

impl fmt::Display for ConsultationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized doctor entry
///
/// Immutable once built. `specialties` keeps the order of the source record
/// with duplicates and empty names removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub photo: Option<String>,
    pub specialties: Vec<String>,
    pub qualifications: String,
    pub experience: u32,
    pub experience_text: String,
    pub fees: u64,
    pub fees_text: String,
    pub clinic: String,
    pub location: String,
    pub consultation_modes: Vec<ConsultationMode>,
}

impl Doctor {
    pub fn offers(&self, mode: ConsultationMode) -> bool {
        self.consultation_modes.contains(&mode)
    }

    /// First specialty listed for the doctor, shown on result cards
    pub fn primary_specialty(&self) -> Option<&str> {
        self.specialties.first().map(String::as_str)
    }

    /// Initials used as a placeholder when there is no photo
    ///
    /// "Dr. Jane Roe" becomes "DJR".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

/// Identifier as served by the endpoint, which may be a string or a number
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(u64),
}

impl Default for RawId {
    fn default() -> Self {
        RawId::Text(String::new())
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Text(text) => f.write_str(text),
            RawId::Number(number) => write!(f, "{number}"),
        }
    }
}

/// Read an explicit `null` as the field's default value
///
/// `#[serde(default)]` only covers absent fields; the endpoint also sends
/// `null` for fields it has no value for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Doctor record as returned by the directory endpoint
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawDoctor {
    #[serde(deserialize_with = "null_as_default")]
    pub id: RawId,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub photo: Option<String>,
    pub doctor_introduction: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub specialities: Vec<RawSpecialty>,
    #[serde(deserialize_with = "null_as_default")]
    pub fees: String,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: String,
    pub clinic: Option<RawClinic>,
    #[serde(deserialize_with = "null_as_default")]
    pub video_consult: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub in_clinic: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawSpecialty {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawClinic {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub address: Option<RawAddress>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawAddress {
    #[serde(deserialize_with = "null_as_default")]
    pub locality: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address_line1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub logo_url: String,
}

/// Parse a currency formatted fee by keeping only its digits
///
/// "₹ 1,500" becomes 1500. Text without digits yields 0; a fee too large to
/// represent saturates at `u64::MAX` so it still sorts as the most expensive.
pub fn parse_fee(text: &str) -> u64 {
    text.chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |fee, digit| {
            fee.saturating_mul(10).saturating_add(u64::from(digit))
        })
}

/// Parse the leading integer of an experience string
///
/// "13 Years of experience" becomes 13. A first token that does not start
/// with a digit yields 0.
pub fn parse_experience(text: &str) -> u32 {
    let Some(token) = text.split_whitespace().next() else {
        return 0;
    };

    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Extract qualifications from a free-text introduction
///
/// Returns the second comma separated segment, trimmed. Empty when the
/// introduction has fewer than two segments.
pub fn extract_qualifications(introduction: Option<&str>) -> String {
    introduction
        .and_then(|intro| intro.split(',').nth(1))
        .map(|segment| segment.trim().to_string())
        .unwrap_or_default()
}

/// Map a raw endpoint record into a [`Doctor`]
pub fn normalize_doctor(raw: RawDoctor) -> Doctor {
    let mut specialties: Vec<String> = Vec::with_capacity(raw.specialities.len());
    for specialty in raw.specialities {
        if !specialty.name.is_empty() && !specialties.contains(&specialty.name) {
            specialties.push(specialty.name);
        }
    }

    let mut consultation_modes = Vec::with_capacity(2);
    if raw.video_consult {
        consultation_modes.push(ConsultationMode::VideoConsult);
    }
    if raw.in_clinic {
        consultation_modes.push(ConsultationMode::InClinic);
    }

    let (clinic, location) = match raw.clinic {
        Some(clinic) => {
            let locality = clinic.address.map(|a| a.locality).unwrap_or_default();
            (clinic.name, locality)
        }
        None => (String::new(), String::new()),
    };

    Doctor {
        id: raw.id.to_string(),
        qualifications: extract_qualifications(raw.doctor_introduction.as_deref()),
        photo: raw.photo.filter(|photo| !photo.is_empty()),
        specialties,
        experience: parse_experience(&raw.experience),
        experience_text: raw.experience,
        fees: parse_fee(&raw.fees),
        fees_text: raw.fees,
        clinic,
        location,
        consultation_modes,
        name: raw.name,
    }
}

/// Normalize a full batch, keeping the order received from the endpoint
pub fn normalize_doctors(raw: Vec<RawDoctor>) -> Vec<Doctor> {
    raw.into_iter().map(normalize_doctor).collect()
}

/// Distinct specialty names across all doctors, sorted lexicographically
pub fn specialty_catalog(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(|doctor| doctor.specialties.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> serde_json::Value {
        serde_json::json!({
            "id": "111070",
            "name": "Dr. Kshitija Jagdale",
            "name_initials": "KJ",
            "photo": "https://doctorlistingingestionpr.azureedge.net/photo.jpg",
            "doctor_introduction": "Dr. Kshitija Jagdale, BDS, is a dentist in Pune.",
            "specialities": [{ "name": "Dentist" }],
            "fees": "₹ 400",
            "experience": "13 Years of experience",
            "languages": ["English", "Hindi"],
            "clinic": {
                "name": "Signature Smiles Dental Clinic",
                "address": {
                    "locality": "Wanowrie",
                    "city": "Pune",
                    "address_line1": "Shop No 2",
                    "location": "18.4974, 73.8946",
                    "logo_url": ""
                }
            },
            "video_consult": true,
            "in_clinic": true
        })
    }

    #[test]
    fn test_parse_fee_with_currency_symbol() {
        assert_eq!(parse_fee("₹ 500"), 500);
    }

    #[test]
    fn test_parse_fee_with_thousands_separator() {
        assert_eq!(parse_fee("₹ 1,500"), 1500);
    }

    #[test]
    fn test_parse_fee_without_digits() {
        assert_eq!(parse_fee("Free"), 0);
        assert_eq!(parse_fee(""), 0);
    }

    #[test]
    fn test_parse_fee_overflow_saturates() {
        assert_eq!(parse_fee("₹ 5,000,000,000"), 5_000_000_000);
        assert_eq!(parse_fee("₹ 99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn test_parse_experience_leading_integer() {
        assert_eq!(parse_experience("13 Years of experience"), 13);
        assert_eq!(parse_experience("5+ Years"), 5);
    }

    #[test]
    fn test_parse_experience_non_numeric() {
        assert_eq!(parse_experience("Years unknown"), 0);
        assert_eq!(parse_experience(""), 0);
    }

    #[test]
    fn test_extract_qualifications_second_segment() {
        assert_eq!(
            extract_qualifications(Some("Dr. A, MBBS, MD, practices in Delhi")),
            "MBBS"
        );
    }

    #[test]
    fn test_extract_qualifications_missing() {
        assert_eq!(extract_qualifications(None), "");
        assert_eq!(extract_qualifications(Some("No commas here")), "");
        assert_eq!(extract_qualifications(Some("Dr. A,   ")), "");
    }

    #[test]
    fn test_normalize_full_record() {
        let raw: RawDoctor = serde_json::from_value(sample_record()).unwrap();
        let doctor = normalize_doctor(raw);

        assert_eq!(doctor.id, "111070");
        assert_eq!(doctor.name, "Dr. Kshitija Jagdale");
        assert_eq!(doctor.specialties, vec!["Dentist"]);
        assert_eq!(doctor.qualifications, "BDS");
        assert_eq!(doctor.experience, 13);
        assert_eq!(doctor.experience_text, "13 Years of experience");
        assert_eq!(doctor.fees, 400);
        assert_eq!(doctor.fees_text, "₹ 400");
        assert_eq!(doctor.clinic, "Signature Smiles Dental Clinic");
        assert_eq!(doctor.location, "Wanowrie");
        assert_eq!(
            doctor.consultation_modes,
            vec![ConsultationMode::VideoConsult, ConsultationMode::InClinic]
        );
    }

    #[test]
    fn test_normalize_numeric_id() {
        let raw: RawDoctor = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "Dr. Numeric"
        }))
        .unwrap();

        assert_eq!(normalize_doctor(raw).id, "42");
    }

    #[test]
    fn test_normalize_sparse_record_degrades_gracefully() {
        let raw: RawDoctor = serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "Dr. Sparse",
            "photo": ""
        }))
        .unwrap();
        let doctor = normalize_doctor(raw);

        assert_eq!(doctor.photo, None);
        assert!(doctor.specialties.is_empty());
        assert_eq!(doctor.qualifications, "");
        assert_eq!(doctor.fees, 0);
        assert_eq!(doctor.experience, 0);
        assert_eq!(doctor.clinic, "");
        assert_eq!(doctor.location, "");
        assert!(doctor.consultation_modes.is_empty());
    }

    #[test]
    fn test_normalize_null_fields_degrade_gracefully() {
        let records: Vec<RawDoctor> = serde_json::from_value(serde_json::json!([
            {
                "id": null,
                "name": null,
                "fees": null,
                "experience": null,
                "specialities": null,
                "video_consult": null,
                "in_clinic": null,
                "clinic": null
            },
            {
                "id": "2",
                "name": "Dr. Partial",
                "specialities": [{ "name": null }, { "name": "ENT" }],
                "clinic": { "name": null, "address": { "locality": null } }
            }
        ]))
        .unwrap();
        let doctors = normalize_doctors(records);

        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].id, "");
        assert_eq!(doctors[0].name, "");
        assert_eq!(doctors[0].fees, 0);
        assert_eq!(doctors[0].fees_text, "");
        assert_eq!(doctors[0].experience, 0);
        assert!(doctors[0].specialties.is_empty());
        assert!(doctors[0].consultation_modes.is_empty());
        assert_eq!(doctors[0].clinic, "");
        assert_eq!(doctors[1].specialties, vec!["ENT"]);
        assert_eq!(doctors[1].clinic, "");
        assert_eq!(doctors[1].location, "");
    }

    #[test]
    fn test_normalize_only_clinic() {
        let raw: RawDoctor = serde_json::from_value(serde_json::json!({
            "id": "2",
            "name": "Dr. Clinic",
            "in_clinic": true,
            "video_consult": false
        }))
        .unwrap();
        let doctor = normalize_doctor(raw);

        assert!(doctor.offers(ConsultationMode::InClinic));
        assert!(!doctor.offers(ConsultationMode::VideoConsult));
    }

    #[test]
    fn test_normalize_removes_duplicate_specialties() {
        let raw: RawDoctor = serde_json::from_value(serde_json::json!({
            "id": "3",
            "name": "Dr. Twice",
            "specialities": [{ "name": "ENT" }, { "name": "Dentist" }, { "name": "ENT" }]
        }))
        .unwrap();

        assert_eq!(normalize_doctor(raw).specialties, vec!["ENT", "Dentist"]);
    }

    #[test]
    fn test_normalize_batch_preserves_order() {
        let records: Vec<RawDoctor> = serde_json::from_value(serde_json::json!([
            { "id": "b", "name": "Second" },
            { "id": "a", "name": "First" }
        ]))
        .unwrap();
        let doctors = normalize_doctors(records);

        let ids: Vec<&str> = doctors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_initials_and_primary_specialty() {
        let raw: RawDoctor = serde_json::from_value(sample_record()).unwrap();
        let doctor = normalize_doctor(raw);

        assert_eq!(doctor.initials(), "DKJ");
        assert_eq!(doctor.primary_specialty(), Some("Dentist"));
    }

    #[test]
    fn test_specialty_catalog_sorted_and_distinct() {
        let records: Vec<RawDoctor> = serde_json::from_value(serde_json::json!([
            { "id": "1", "name": "A", "specialities": [{ "name": "General Physician" }, { "name": "ENT" }] },
            { "id": "2", "name": "B", "specialities": [{ "name": "Dentist" }, { "name": "ENT" }] }
        ]))
        .unwrap();
        let doctors = normalize_doctors(records);

        assert_eq!(
            specialty_catalog(&doctors),
            vec!["Dentist", "ENT", "General Physician"]
        );
    }

    #[test]
    fn test_consultation_mode_labels() {
        assert_eq!(ConsultationMode::VideoConsult.to_string(), "Video Consult");
        assert_eq!(ConsultationMode::InClinic.to_string(), "In Clinic");
        assert_eq!(
            serde_json::to_string(&ConsultationMode::InClinic).unwrap(),
            "\"In Clinic\""
        );
    }
}
