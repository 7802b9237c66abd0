//! Patient medical history types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Smoking status recorded in a medical history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmokingStatus {
    /// Never smoked.
    #[default]
    Never,
    /// Former smoker.
    Former,
    /// Current smoker.
    Current,
}

/// Medical history relevant to retinal disease risk, as returned by
/// `/medical-history/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalHistory {
    /// Record id.
    pub id: i64,
    /// Id of the patient the history belongs to.
    pub patient: i64,
    /// Whether the patient has diabetes.
    #[serde(default)]
    pub has_diabetes: bool,
    /// Years since diabetes diagnosis.
    #[serde(default)]
    pub diabetes_duration: Option<u32>,
    /// Whether the patient has hypertension.
    #[serde(default)]
    pub has_hypertension: bool,
    /// Family history of glaucoma.
    #[serde(default)]
    pub has_glaucoma_family_history: bool,
    /// Smoking status.
    #[serde(default)]
    pub smoking_status: SmokingStatus,
    /// Current medications.
    #[serde(default)]
    pub current_medications: Vec<String>,
    /// Previous eye surgeries, free text.
    #[serde(default)]
    pub previous_eye_surgeries: String,
    /// Previous retinal treatments, free text.
    #[serde(default)]
    pub previous_retinal_treatments: String,
    /// Most recent HbA1c measurement.
    #[serde(default)]
    pub last_hba1c: Option<f64>,
    /// Most recent systolic blood pressure.
    #[serde(default)]
    pub last_blood_pressure_systolic: Option<u32>,
    /// Most recent diastolic blood pressure.
    #[serde(default)]
    pub last_blood_pressure_diastolic: Option<u32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or updating a medical history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NewMedicalHistory {
    /// Id of the patient the history belongs to.
    pub patient: i64,
    /// Whether the patient has diabetes.
    #[serde(default)]
    pub has_diabetes: bool,
    /// Years since diabetes diagnosis.
    #[serde(default)]
    pub diabetes_duration: Option<u32>,
    /// Whether the patient has hypertension.
    #[serde(default)]
    pub has_hypertension: bool,
    /// Family history of glaucoma.
    #[serde(default)]
    pub has_glaucoma_family_history: bool,
    /// Smoking status.
    #[serde(default)]
    pub smoking_status: SmokingStatus,
    /// Current medications.
    #[serde(default)]
    pub current_medications: Vec<String>,
    /// Previous eye surgeries, free text.
    #[serde(default)]
    pub previous_eye_surgeries: String,
    /// Previous retinal treatments, free text.
    #[serde(default)]
    pub previous_retinal_treatments: String,
    /// Most recent HbA1c measurement.
    #[serde(default)]
    pub last_hba1c: Option<f64>,
    /// Most recent systolic blood pressure.
    #[serde(default)]
    pub last_blood_pressure_systolic: Option<u32>,
    /// Most recent diastolic blood pressure.
    #[serde(default)]
    pub last_blood_pressure_diastolic: Option<u32>,
}
