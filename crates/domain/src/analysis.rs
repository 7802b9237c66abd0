//! Image analysis upload request.

use crate::config::ClientConfig;
use crate::error::{DomainError, DomainResult};
use crate::image::{Eye, ImageQuality};

/// A retinal image upload destined for `POST /analyze/`.
///
/// Carries the raw image bytes plus the metadata the backend expects as
/// multipart form fields. Validation mirrors the server-side rules so
/// that obviously bad uploads are rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// File name of the image, including extension.
    pub file_name: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
    /// Hospital-assigned patient identifier to attach the image to.
    pub patient_id: Option<String>,
    /// Which eye was captured.
    pub eye: Eye,
    /// Capture quality.
    pub image_quality: ImageQuality,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl AnalysisRequest {
    /// Create a request with default metadata (left eye, good quality).
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            patient_id: None,
            eye: Eye::default(),
            image_quality: ImageQuality::default(),
            notes: None,
        }
    }

    /// Attach the upload to a patient.
    #[must_use]
    pub fn with_patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    /// Set which eye was captured.
    #[must_use]
    pub const fn with_eye(mut self, eye: Eye) -> Self {
        self.eye = eye;
        self
    }

    /// Set the capture quality.
    #[must_use]
    pub const fn with_image_quality(mut self, quality: ImageQuality) -> Self {
        self.image_quality = quality;
        self
    }

    /// Attach notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The lower-case file extension, if the name has one.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }

    /// Validate the upload against the configured limits.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UploadTooLarge`],
    /// [`DomainError::MissingExtension`] or
    /// [`DomainError::UnsupportedImageFormat`] when the payload breaks
    /// the configured rules.
    pub fn validate(&self, config: &ClientConfig) -> DomainResult<()> {
        let size = self.bytes.len() as u64;
        if size > config.max_upload_bytes {
            return Err(DomainError::UploadTooLarge {
                size,
                max: config.max_upload_bytes,
            });
        }

        let Some(extension) = self.extension() else {
            return Err(DomainError::MissingExtension {
                file_name: self.file_name.clone(),
            });
        };

        if !config.accepts_extension(&extension) {
            return Err(DomainError::UnsupportedImageFormat { extension });
        }

        Ok(())
    }
}
