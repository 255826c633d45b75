//! Request-scoped data shapes for the application processor.
//!
//! Nothing here outlives a single webhook call.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The validated inbound webhook payload. Other fields are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationRequest {
    pub application_text: String,
}

/// Whether the applicant has carried for another family before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "First-time")]
    FirstTime,
    Experienced,
}

/// Structured fields the model pulls out of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Any JSON number; whole values are written back without a fraction.
    #[serde(serialize_with = "serialize_whole_number")]
    pub age: Option<f64>,
    pub bmi: Option<f64>,
    /// Full state name, never an abbreviation.
    pub state: Option<String>,
    pub experienced_surrogate: ExperienceLevel,
    pub has_medical_flags: bool,
    pub has_background_flags: bool,
    pub has_preterm_history: bool,
}

/// Typed model output. Deserializing into this struct is the shape check:
/// anything that does not fit is rejected as a response format error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantSummary {
    pub formatted_summary: String,
    pub extracted_fields: ExtractedFields,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_gold_star: bool,
}

/// `"is_gold_star": null` reads as `false`, same as an absent key.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn serialize_whole_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 => serializer.serialize_some(&(*v as i64)),
        Some(v) => serializer.serialize_some(v),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = r#"{
        "formatted_summary": "CANDIDATE APPLICATION SUMMARY\nName: Jane Doe",
        "extracted_fields": {
            "age": 31,
            "bmi": 23.4,
            "state": "Texas",
            "experienced_surrogate": "First-time",
            "has_medical_flags": false,
            "has_background_flags": false,
            "has_preterm_history": false
        },
        "is_gold_star": true
    }"#;

    #[test]
    fn test_applicant_summary_deserializes_correctly() {
        let summary: ApplicantSummary = serde_json::from_str(FULL_RESPONSE).unwrap();
        assert!(summary.is_gold_star);
        assert_eq!(summary.extracted_fields.age, Some(31.0));
        assert_eq!(summary.extracted_fields.state.as_deref(), Some("Texas"));
        assert_eq!(
            summary.extracted_fields.experienced_surrogate,
            ExperienceLevel::FirstTime
        );
    }

    #[test]
    fn test_is_gold_star_defaults_to_false() {
        let json = r#"{
            "formatted_summary": "x",
            "extracted_fields": {
                "age": null,
                "bmi": null,
                "state": null,
                "experienced_surrogate": "Experienced",
                "has_medical_flags": true,
                "has_background_flags": false,
                "has_preterm_history": true
            }
        }"#;
        let summary: ApplicantSummary = serde_json::from_str(json).unwrap();
        assert!(!summary.is_gold_star);
        assert_eq!(summary.extracted_fields.bmi, None);
    }

    #[test]
    fn test_null_is_gold_star_reads_as_false() {
        let json = r#"{
            "formatted_summary": "x",
            "extracted_fields": {
                "age": 30,
                "bmi": 24.1,
                "state": "Ohio",
                "experienced_surrogate": "First-time",
                "has_medical_flags": false,
                "has_background_flags": false,
                "has_preterm_history": false
            },
            "is_gold_star": null
        }"#;
        let summary: ApplicantSummary = serde_json::from_str(json).unwrap();
        assert!(!summary.is_gold_star);
    }

    #[test]
    fn test_float_age_is_accepted_and_written_as_whole_number() {
        let json = r#"{
            "age": 29.0,
            "bmi": 22.0,
            "state": null,
            "experienced_surrogate": "Experienced",
            "has_medical_flags": false,
            "has_background_flags": false,
            "has_preterm_history": false
        }"#;
        let fields: ExtractedFields = serde_json::from_str(json).unwrap();
        assert_eq!(fields.age, Some(29.0));

        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["age"], serde_json::json!(29));
        assert_eq!(value["age"].to_string(), "29");
    }

    #[test]
    fn test_fractional_age_is_kept() {
        let fields = ExtractedFields {
            age: Some(29.5),
            bmi: None,
            state: None,
            experienced_surrogate: ExperienceLevel::FirstTime,
            has_medical_flags: false,
            has_background_flags: false,
            has_preterm_history: false,
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["age"], serde_json::json!(29.5));
    }

    #[test]
    fn test_missing_extracted_fields_is_rejected() {
        let json = r#"{"formatted_summary": "x", "is_gold_star": true}"#;
        assert!(serde_json::from_str::<ApplicantSummary>(json).is_err());
    }

    #[test]
    fn test_unknown_experience_level_is_rejected() {
        let json = r#""Sometimes""#;
        assert!(serde_json::from_str::<ExperienceLevel>(json).is_err());
    }

    #[test]
    fn test_experience_level_serializes_with_display_names() {
        assert_eq!(
            serde_json::to_string(&ExperienceLevel::FirstTime).unwrap(),
            r#""First-time""#
        );
        assert_eq!(
            serde_json::to_string(&ExperienceLevel::Experienced).unwrap(),
            r#""Experienced""#
        );
    }
}
