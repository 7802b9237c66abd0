//! Fundus API client - command-line demo.
//!
//! Wires the full stack (reqwest transport, file session repository,
//! session store, API client) and exposes a handful of commands for
//! exercising it against a running backend:
//!
//! ```text
//! fundus login <username> <password>
//! fundus profile
//! fundus patients [search]
//! fundus analyze <image-file> [patient-id]
//! fundus stats
//! fundus logout
//! ```
//!
//! Configuration comes from `FUNDUS_*` environment variables; logging
//! verbosity from `RUST_LOG`.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use fundus_application::{ApiClient, PatientQuery, SessionStore};
use fundus_domain::AnalysisRequest;
use fundus_infrastructure::{FileSessionRepository, ReqwestTransport, load_config};

type AppError = Box<dyn std::error::Error>;

fn usage() -> AppError {
    "usage: fundus <login <username> <password> | profile | patients [search] | analyze <image-file> [patient-id] | stats | logout>"
        .into()
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        return Err(usage());
    };

    let config = load_config()?;
    let repository = FileSessionRepository::at_default_path()
        .ok_or("no data directory available for session storage")?;
    let store = SessionStore::new(Arc::new(repository));
    store.restore().await;

    let transport = ReqwestTransport::new()?;
    let client = ApiClient::new(config, transport, store);

    match (command.as_str(), &args[1..]) {
        ("login", [username, password]) => {
            let session = client.auth().login(username, password).await?;
            info!(username = %session.user.username, "logged in");
            println!("logged in as {}", session.user.display_name());
        }
        ("profile", []) => {
            let profile = client.auth().profile().await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ("patients", rest) => {
            let mut query = PatientQuery::default();
            if let [search] = rest {
                query = query.search(search);
            }
            for patient in client.patients().list(&query).await? {
                println!("{}\t{}", patient.patient_id, patient.full_name());
            }
        }
        ("analyze", [file, rest @ ..]) => {
            let path = PathBuf::from(file);
            let file_name = path
                .file_name()
                .ok_or("image path has no file name")?
                .to_string_lossy()
                .into_owned();
            let bytes = tokio::fs::read(&path).await?;

            let mut upload = AnalysisRequest::new(file_name, bytes);
            if let [patient_id] = rest {
                upload = upload.with_patient_id(patient_id);
            }

            let prediction = client.images().analyze(&upload).await?;
            println!("{}", serde_json::to_string_pretty(&prediction)?);
        }
        ("stats", []) => {
            let stats = client.dashboard().stats().await?;
            println!(
                "{} analyses, {} abnormal ({:.1}%), {} active users",
                stats.total_analyses,
                stats.abnormal_cases,
                stats.abnormal_ratio() * 100.0,
                stats.active_users
            );
        }
        ("logout", []) => {
            client.auth().logout().await;
            println!("logged out");
        }
        _ => return Err(usage()),
    }

    Ok(())
}
