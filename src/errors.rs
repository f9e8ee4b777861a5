//! Typed error hierarchy for the campaign runner.
//!
//! - `BackendError`: a single request to the remote backend failed
//! - `UploadError`: the customer upload step could not produce customers
//! - `CampaignError`: a prerequisite step failed and the run was aborted
//! - `CallDispatchError`: one customer's call failed; recorded, never fatal

use std::path::PathBuf;
use thiserror::Error;

/// Errors from one request against the campaign backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("could not build request for {endpoint}: {source}")]
    BuildRequest {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("{endpoint} returned a body that is not valid JSON: {message}")]
    InvalidJson {
        endpoint: &'static str,
        message: String,
    },

    #[error("{endpoint} response is missing '{field}'")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },
}

/// Errors from the customer upload step.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no customer file selected")]
    NoFile,

    #[error("failed to read customer file at {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Request(#[from] BackendError),

    #[error("upload response has no customer list")]
    MissingCustomers,
}

/// A prerequisite step failed; no calls were placed.
///
/// The message already embeds the step's cause, so no source chain is exposed.
#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("customer upload failed: {0}")]
    Upload(UploadError),

    #[error("script generation failed: {0}")]
    ScriptGeneration(BackendError),

    #[error("voice synthesis failed: {0}")]
    VoiceSynthesis(BackendError),
}

impl CampaignError {
    /// Short name of the step that failed.
    pub fn step(&self) -> &'static str {
        match self {
            CampaignError::Upload(_) => "upload",
            CampaignError::ScriptGeneration(_) => "script",
            CampaignError::VoiceSynthesis(_) => "voice",
        }
    }
}

impl From<UploadError> for CampaignError {
    fn from(err: UploadError) -> Self {
        CampaignError::Upload(err)
    }
}

/// One customer's call could not be placed.
#[derive(Debug, Error)]
pub enum CallDispatchError {
    #[error("missing phone number")]
    MissingPhone,

    #[error(transparent)]
    Request(#[from] BackendError),
}
