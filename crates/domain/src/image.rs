//! Retinal image types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which eye a fundus image was taken of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Eye {
    /// Left eye.
    #[default]
    Left,
    /// Right eye.
    Right,
    /// Both eyes in one capture.
    Both,
}

impl Eye {
    /// Wire representation used in form fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Both => "both",
        }
    }
}

/// Operator-assessed quality of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    /// Excellent quality.
    Excellent,
    /// Good quality.
    #[default]
    Good,
    /// Fair quality.
    Fair,
    /// Poor quality, may hinder analysis.
    Poor,
}

impl ImageQuality {
    /// Wire representation used in form fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

/// A stored retinal fundus image, as returned by `/retinal-images/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetinalImage {
    /// Image id.
    pub id: Uuid,
    /// Id of the patient the image belongs to.
    pub patient: i64,
    /// Patient display name, denormalized by the server.
    #[serde(default)]
    pub patient_name: Option<String>,
    /// Server-side media path of the image file.
    pub image: String,
    /// Which eye was captured.
    pub eye: Eye,
    /// Capture quality.
    pub image_quality: ImageQuality,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}
