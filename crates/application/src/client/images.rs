//! Retinal image operations, including analysis uploads.

use serde::Serialize;
use uuid::Uuid;

use fundus_domain::{AnalysisRequest, Eye, Prediction, RetinalImage};

use crate::error::ApiResult;
use crate::ports::{HttpTransport, MultipartField};

use super::{with_query, ApiClient};

/// Query parameters for listing retinal images.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageQuery {
    /// Restrict to images of one patient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<i64>,
    /// Restrict to one eye.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye: Option<Eye>,
}

impl ImageQuery {
    /// Restrict to images of the given patient.
    #[must_use]
    pub const fn patient(mut self, id: i64) -> Self {
        self.patient = Some(id);
        self
    }

    /// Restrict to the given eye.
    #[must_use]
    pub const fn eye(mut self, eye: Eye) -> Self {
        self.eye = Some(eye);
        self
    }
}

/// Client for `/retinal-images/` and the `/analyze/` action.
pub struct ImagesClient<'a, T: HttpTransport> {
    pub(crate) client: &'a ApiClient<T>,
}

impl<T: HttpTransport> ImagesClient<'_, T> {
    /// List stored images.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn list(&self, query: &ImageQuery) -> ApiResult<Vec<RetinalImage>> {
        let url = with_query(self.client.endpoint("retinal-images/")?, query)?;
        self.client.get_json(url).await
    }

    /// Fetch one image record.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn get(&self, id: Uuid) -> ApiResult<RetinalImage> {
        let url = self.client.endpoint(&format!("retinal-images/{id}/"))?;
        self.client.get_json(url).await
    }

    /// Upload an image for a patient without running analysis.
    ///
    /// The upload is validated against the configured size and format
    /// limits before any network call.
    ///
    /// # Errors
    ///
    /// Returns a domain error for invalid uploads, otherwise an
    /// [`crate::ApiError`] on failure.
    pub async fn upload(&self, patient: i64, upload: &AnalysisRequest) -> ApiResult<RetinalImage> {
        upload.validate(self.client.config())?;

        let mut fields = vec![
            MultipartField::Text {
                name: "patient".to_string(),
                value: patient.to_string(),
            },
            MultipartField::File {
                name: "image".to_string(),
                file_name: upload.file_name.clone(),
                bytes: upload.bytes.clone(),
            },
            MultipartField::Text {
                name: "eye".to_string(),
                value: upload.eye.as_str().to_string(),
            },
            MultipartField::Text {
                name: "image_quality".to_string(),
                value: upload.image_quality.as_str().to_string(),
            },
        ];
        if let Some(notes) = &upload.notes {
            fields.push(MultipartField::Text {
                name: "notes".to_string(),
                value: notes.clone(),
            });
        }

        let url = self.client.endpoint("retinal-images/")?;
        self.client.post_multipart(url, fields).await
    }

    /// Delete an image record.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        let url = self.client.endpoint(&format!("retinal-images/{id}/"))?;
        self.client.delete(url).await
    }

    /// Upload an image and run AI analysis on it in one call.
    ///
    /// Inference happens entirely server-side; the client only ships
    /// the image and metadata and decodes the resulting prediction.
    ///
    /// # Errors
    ///
    /// Returns a domain error for invalid uploads, otherwise an
    /// [`crate::ApiError`] on failure. A failed server-side analysis
    /// arrives as a 500 status error.
    pub async fn analyze(&self, upload: &AnalysisRequest) -> ApiResult<Prediction> {
        upload.validate(self.client.config())?;

        let mut fields = vec![
            MultipartField::File {
                name: "image".to_string(),
                file_name: upload.file_name.clone(),
                bytes: upload.bytes.clone(),
            },
            MultipartField::Text {
                name: "eye".to_string(),
                value: upload.eye.as_str().to_string(),
            },
            MultipartField::Text {
                name: "image_quality".to_string(),
                value: upload.image_quality.as_str().to_string(),
            },
        ];
        if let Some(patient_id) = &upload.patient_id {
            fields.push(MultipartField::Text {
                name: "patient_id".to_string(),
                value: patient_id.clone(),
            });
        }
        if let Some(notes) = &upload.notes {
            fields.push(MultipartField::Text {
                name: "notes".to_string(),
                value: notes.clone(),
            });
        }

        let url = self.client.endpoint("analyze/")?;
        self.client.post_multipart(url, fields).await
    }
}
