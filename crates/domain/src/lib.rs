//! Fundus Domain - Core business types
//!
//! This crate defines the domain model for the Fundus retinal imaging
//! client. All types here are pure Rust with no I/O dependencies.

pub mod analysis;
pub mod config;
pub mod error;
pub mod history;
pub mod image;
pub mod patient;
pub mod prediction;
pub mod session;
pub mod stats;

pub use analysis::AnalysisRequest;
pub use config::ClientConfig;
pub use error::{AuthError, DomainError, DomainResult};
pub use history::{MedicalHistory, NewMedicalHistory, SmokingStatus};
pub use image::{Eye, ImageQuality, RetinalImage};
pub use patient::{Gender, NewPatient, Patient};
pub use prediction::{Disease, Prediction, PredictionStatus};
pub use session::{Role, Session, UserProfile};
pub use stats::{DashboardStats, DiseaseSlice, TrendPoint};
