//! Patient types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Patient gender as recorded by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    #[serde(rename = "M")]
    Male,
    /// Female.
    #[serde(rename = "F")]
    Female,
    /// Other.
    #[serde(rename = "O")]
    Other,
}

/// A patient record as returned by the `/patients/` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Server-side numeric id.
    pub id: i64,
    /// Hospital-assigned patient identifier.
    pub patient_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Gender.
    pub gender: Gender,
    /// Medical record number, unique per patient.
    pub medical_record_number: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for creating or updating a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    /// Hospital-assigned patient identifier.
    pub patient_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Gender.
    pub gender: Gender,
    /// Medical record number.
    pub medical_record_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gender_wire_format() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"M\"");
        let gender: Gender = serde_json::from_str("\"O\"").unwrap();
        assert_eq!(gender, Gender::Other);
    }

    #[test]
    fn test_patient_deserializes_from_api_shape() {
        let json = r#"{
            "id": 3,
            "patient_id": "P-001",
            "first_name": "Jane",
            "last_name": "Doe",
            "date_of_birth": "1969-04-12",
            "gender": "F",
            "medical_record_number": "MRN-42",
            "created_at": "2024-01-15T10:30:00Z",
            "updated_at": "2024-01-15T10:30:00Z"
        }"#;
        let patient: Patient = serde_json::from_str(json).unwrap();
        assert_eq!(patient.full_name(), "Jane Doe");
        assert_eq!(patient.gender, Gender::Female);
    }
}
