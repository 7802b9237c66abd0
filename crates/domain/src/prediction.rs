//! AI prediction and disease types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Processing state of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    /// Analysis still running server-side.
    Processing,
    /// Analysis finished.
    Completed,
    /// Analysis failed; see `error_message`.
    Failed,
}

/// A retinal disease known to the backend (read-only resource).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disease {
    /// Disease id.
    pub id: i64,
    /// Disease name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// ICD code, if assigned.
    #[serde(default)]
    pub icd_code: String,
    /// Severity levels the disease is graded on.
    #[serde(default)]
    pub severity_levels: Vec<String>,
}

/// Result of an AI analysis over one retinal image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Prediction id.
    pub id: Uuid,
    /// Id of the analyzed image.
    pub retinal_image: Uuid,
    /// Id of the detected disease, absent for normal findings.
    #[serde(default)]
    pub disease: Option<i64>,
    /// Denormalized disease name.
    #[serde(default)]
    pub disease_name: Option<String>,
    /// Model confidence in the finding, 0.0 to 1.0.
    #[serde(default)]
    pub confidence_score: Option<f64>,
    /// Graded severity, empty for normal findings.
    #[serde(default)]
    pub severity: String,
    /// True when no disease was detected.
    #[serde(default)]
    pub is_normal: bool,
    /// Features the model flagged in the image.
    #[serde(default)]
    pub detected_features: Vec<String>,
    /// Risk factors associated with the finding.
    #[serde(default)]
    pub risk_factors: Vec<String>,
    /// Recommended follow-up actions.
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Version of the inference model.
    #[serde(default)]
    pub model_version: String,
    /// Server-side processing time in seconds.
    #[serde(default)]
    pub processing_time: Option<f64>,
    /// Processing state.
    pub status: PredictionStatus,
    /// Error details when `status` is `Failed`.
    #[serde(default)]
    pub error_message: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Whether a professional confirmed the finding.
    #[serde(default)]
    pub is_confirmed: bool,
    /// When the finding was reviewed.
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Prediction {
    /// True once the server finished processing, successfully or not.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(
            self.status,
            PredictionStatus::Completed | PredictionStatus::Failed
        )
    }
}
